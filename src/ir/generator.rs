use super::symbol_table::SymbolTable;
use super::tac::{Instruction, Procedure, Program, Temp};
use super::statement_handlers;
use crate::ast;
use crate::utils::config::procedures::PREFIX;
use crate::utils::errors::BxResult;
use log::debug;

/// Maximal-munch lowering state for one procedure: the temporary counter,
/// the symbol table and the instructions emitted so far.
pub struct IRGenerator {
    pub(crate) temp_counter: u32,
    pub(crate) symbol_table: SymbolTable,
    pub(crate) body: Vec<Instruction>,
}

impl Default for IRGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IRGenerator {
    pub fn new() -> Self {
        Self {
            temp_counter: 0,
            symbol_table: SymbolTable::new(),
            body: Vec::with_capacity(64),
        }
    }

    pub fn allocate_temp(&mut self) -> Temp {
        let temp = Temp(self.temp_counter);
        self.temp_counter += 1;
        temp
    }

    pub(crate) fn push(&mut self, instr: Instruction) {
        self.body.push(instr);
    }

    /// Lower one procedure body. Consumes the generator: temporaries and
    /// bindings never leak into another procedure.
    pub fn generate_procedure(mut self, proc: &ast::ProcDecl) -> BxResult<Procedure> {
        for stmt in &proc.body {
            statement_handlers::handle_statement(&mut self, stmt)?;
        }
        let name = format!("{}{}", PREFIX, proc.name);
        debug!(
            "lowered {}: {} instructions, {} temporaries",
            name,
            self.body.len(),
            self.temp_counter
        );
        Ok(Procedure {
            name,
            body: self.body,
        })
    }
}

/// Lower a checked AST into TAC, one procedure per declaration.
pub fn lower(program: &ast::Program) -> BxResult<Program> {
    let procedures = program
        .procs
        .iter()
        .map(|proc| IRGenerator::new().generate_procedure(proc))
        .collect::<BxResult<Vec<_>>>()?;
    Ok(Program::new(procedures))
}
