//! Consistency checks for TAC that did not come straight out of the
//! lowering pass, e.g. programs decoded from the JSON interchange format.

use super::tac::{Procedure, Program, Temp};
use crate::utils::errors::{BxError, BxResult};
use std::collections::{BTreeSet, HashSet};

/// Every instruction is well formed and every temporary is written before it is read.
pub fn check_program(program: &Program) -> BxResult<()> {
    for procedure in &program.procedures {
        check_procedure(procedure)?;
    }
    Ok(())
}

pub fn check_procedure(procedure: &Procedure) -> BxResult<()> {
    let mut defined: HashSet<Temp> = HashSet::new();
    for instr in &procedure.body {
        instr.check_shape()?;
        for used in instr.uses() {
            if !defined.contains(&used) {
                return Err(BxError::UndefinedTemporary {
                    temp: used.to_string(),
                    procedure: procedure.name.clone(),
                });
            }
        }
        defined.extend(instr.result);
    }
    Ok(())
}

/// Temporaries mentioned in the body are exactly `%0 .. %k-1`.
pub fn check_dense(procedure: &Procedure) -> BxResult<()> {
    let mut seen = BTreeSet::new();
    for instr in &procedure.body {
        seen.extend(instr.uses());
        seen.extend(instr.result);
    }
    for (expected, temp) in seen.iter().enumerate() {
        if temp.id() as usize != expected {
            return Err(BxError::SparseTemporaries {
                procedure: procedure.name.clone(),
                message: format!("expected %{} but next temporary is {}", expected, temp),
            });
        }
    }
    Ok(())
}
