pub mod expression_handlers;
pub mod generator;
pub mod statement_handlers;
pub mod symbol_table;
pub mod tac;
pub mod validate;
pub mod wire;

pub use generator::{lower, IRGenerator};
pub use tac::{Instruction, Opcode, Operand, Procedure, Program, Temp};
