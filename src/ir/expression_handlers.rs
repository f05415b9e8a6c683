use super::tac::{Instruction, Opcode, Temp};
use super::IRGenerator;
use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::utils::errors::BxResult;
use log::warn;

/// Emit the instructions that leave the value of `expr` in `dest`.
pub fn lower_expression(gen: &mut IRGenerator, expr: &Expression, dest: Temp) -> BxResult<()> {
    match expr {
        Expression::Var(name) => handle_var(gen, name, dest),
        Expression::Int(value) => {
            gen.push(Instruction::constant(*value, dest));
            Ok(())
        }
        Expression::Bool(value) => {
            warn!("boolean literal {} lowered to placeholder const 0", value);
            emit_placeholder(gen, dest);
            Ok(())
        }
        Expression::UnOp { op, arg } => handle_unop(gen, *op, arg, dest),
        Expression::BinOp { op, left, right } => handle_binop(gen, *op, left, right, dest),
    }
}

pub fn handle_var(gen: &mut IRGenerator, name: &str, dest: Temp) -> BxResult<()> {
    let bound = gen.symbol_table.lookup(name)?;
    gen.push(Instruction::unary(Opcode::Copy, bound, dest));
    Ok(())
}

pub fn handle_unop(
    gen: &mut IRGenerator,
    op: UnaryOperator,
    arg: &Expression,
    dest: Temp,
) -> BxResult<()> {
    let Some(opcode) = op.opcode() else {
        warn!("operator '{}' has no TAC lowering yet, using const 0", op.name());
        emit_placeholder(gen, dest);
        return Ok(());
    };
    let t_arg = gen.allocate_temp();
    lower_expression(gen, arg, t_arg)?;
    gen.push(Instruction::unary(opcode, t_arg, dest));
    Ok(())
}

// Left temporary is allocated and lowered strictly before the right one.
pub fn handle_binop(
    gen: &mut IRGenerator,
    op: BinaryOperator,
    left: &Expression,
    right: &Expression,
    dest: Temp,
) -> BxResult<()> {
    let Some(opcode) = op.opcode() else {
        warn!("operator '{}' has no TAC lowering yet, using const 0", op.name());
        emit_placeholder(gen, dest);
        return Ok(());
    };
    let t_left = gen.allocate_temp();
    let t_right = gen.allocate_temp();
    lower_expression(gen, left, t_left)?;
    lower_expression(gen, right, t_right)?;
    gen.push(Instruction::binary(opcode, t_left, t_right, dest));
    Ok(())
}

fn emit_placeholder(gen: &mut IRGenerator, dest: Temp) {
    gen.push(Instruction::constant(0, dest));
}
