pub mod json_ast;

pub use json_ast::{load_program, program_from_value};
