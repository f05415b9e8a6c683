use super::expression_handlers::lower_expression;
use super::tac::Instruction;
use super::IRGenerator;
use crate::ast::{Expression, Statement};
use crate::utils::errors::BxResult;

pub fn handle_statement(gen: &mut IRGenerator, stmt: &Statement) -> BxResult<()> {
    match stmt {
        Statement::VarDecl { name, init, .. } => handle_var_decl(gen, name, init),
        Statement::Assign { lvalue, rvalue } => handle_assign(gen, lvalue, rvalue),
        Statement::Print(expr) => handle_print(gen, expr),
    }
}

// The binding exists before the initializer is lowered, so the initializer
// writes straight into the variable's own temporary.
pub fn handle_var_decl(gen: &mut IRGenerator, name: &str, init: &Expression) -> BxResult<()> {
    let temp = gen.allocate_temp();
    gen.symbol_table.bind(name, temp);
    lower_expression(gen, init, temp)
}

pub fn handle_assign(gen: &mut IRGenerator, lvalue: &str, rvalue: &Expression) -> BxResult<()> {
    let temp = gen.symbol_table.lookup(lvalue)?;
    lower_expression(gen, rvalue, temp)
}

pub fn handle_print(gen: &mut IRGenerator, expr: &Expression) -> BxResult<()> {
    let temp = gen.allocate_temp();
    lower_expression(gen, expr, temp)?;
    gen.push(Instruction::print(temp));
    Ok(())
}
