//! Assembly backends. Each target implements [`AssemblyEmitter`] with one
//! routine per TAC opcode; [`dispatch`] routes an instruction to its routine
//! and the registry maps target names to backend constructors.

pub mod arm64;
pub mod common;
pub mod x86_64;

pub use common::*;

use crate::ir::tac::{Instruction, Opcode, Program, Temp};
use crate::utils::config::{arm64 as arm64_config, x86_64 as x86_64_config};
use crate::utils::errors::{BxError, BxResult};
use lazy_static::lazy_static;
use log::{debug, trace};
use std::collections::BTreeMap;

pub trait AssemblyEmitter {
    fn name(&self) -> &'static str;

    /// Start a procedure: forget every slot and line of the previous one.
    fn begin_procedure(&mut self, name: &str);

    fn emit_const(&mut self, value: i64, dst: Temp);
    fn emit_copy(&mut self, src: Temp, dst: Temp);
    fn emit_neg(&mut self, src: Temp, dst: Temp);
    fn emit_not(&mut self, src: Temp, dst: Temp);
    fn emit_add(&mut self, lhs: Temp, rhs: Temp, dst: Temp);
    fn emit_sub(&mut self, lhs: Temp, rhs: Temp, dst: Temp);
    fn emit_mul(&mut self, lhs: Temp, rhs: Temp, dst: Temp);
    fn emit_div(&mut self, lhs: Temp, rhs: Temp, dst: Temp);
    fn emit_mod(&mut self, lhs: Temp, rhs: Temp, dst: Temp);
    fn emit_and(&mut self, lhs: Temp, rhs: Temp, dst: Temp);
    fn emit_or(&mut self, lhs: Temp, rhs: Temp, dst: Temp);
    fn emit_xor(&mut self, lhs: Temp, rhs: Temp, dst: Temp);
    fn emit_shl(&mut self, lhs: Temp, rhs: Temp, dst: Temp);
    fn emit_shr(&mut self, lhs: Temp, rhs: Temp, dst: Temp);
    fn emit_print(&mut self, arg: Temp);

    /// Finish the current procedure and return its complete text, prologue
    /// and epilogue included. The frame size is only known at this point.
    fn end_procedure(&mut self) -> Vec<String>;

    /// Wrap finished procedures with the file-level sections and directives.
    fn program_text(&self, procedures: &[Vec<String>]) -> String;

    /// Lower a whole TAC program into one assembly file.
    fn lower(&mut self, program: &Program) -> BxResult<String> {
        let mut procedures = Vec::with_capacity(program.procedures.len());
        for procedure in &program.procedures {
            self.begin_procedure(&procedure.name);
            for instr in &procedure.body {
                dispatch(self, instr)?;
            }
            procedures.push(self.end_procedure());
        }
        Ok(self.program_text(&procedures))
    }
}

/// Route one instruction to the emitter routine for its opcode.
pub fn dispatch<E: AssemblyEmitter + ?Sized>(emitter: &mut E, instr: &Instruction) -> BxResult<()> {
    instr.check_shape()?;
    trace!("{}: {}", emitter.name(), instr);
    match instr.opcode {
        Opcode::Const => emitter.emit_const(instr.literal_arg(0)?, instr.dest()?),
        Opcode::Copy => emitter.emit_copy(instr.temp_arg(0)?, instr.dest()?),
        Opcode::Neg => emitter.emit_neg(instr.temp_arg(0)?, instr.dest()?),
        Opcode::Not => emitter.emit_not(instr.temp_arg(0)?, instr.dest()?),
        Opcode::Add => {
            let (lhs, rhs, dst) = binary_operands(instr)?;
            emitter.emit_add(lhs, rhs, dst)
        }
        Opcode::Sub => {
            let (lhs, rhs, dst) = binary_operands(instr)?;
            emitter.emit_sub(lhs, rhs, dst)
        }
        Opcode::Mul => {
            let (lhs, rhs, dst) = binary_operands(instr)?;
            emitter.emit_mul(lhs, rhs, dst)
        }
        Opcode::Div => {
            let (lhs, rhs, dst) = binary_operands(instr)?;
            emitter.emit_div(lhs, rhs, dst)
        }
        Opcode::Mod => {
            let (lhs, rhs, dst) = binary_operands(instr)?;
            emitter.emit_mod(lhs, rhs, dst)
        }
        Opcode::And => {
            let (lhs, rhs, dst) = binary_operands(instr)?;
            emitter.emit_and(lhs, rhs, dst)
        }
        Opcode::Or => {
            let (lhs, rhs, dst) = binary_operands(instr)?;
            emitter.emit_or(lhs, rhs, dst)
        }
        Opcode::Xor => {
            let (lhs, rhs, dst) = binary_operands(instr)?;
            emitter.emit_xor(lhs, rhs, dst)
        }
        Opcode::Shl => {
            let (lhs, rhs, dst) = binary_operands(instr)?;
            emitter.emit_shl(lhs, rhs, dst)
        }
        Opcode::Shr => {
            let (lhs, rhs, dst) = binary_operands(instr)?;
            emitter.emit_shr(lhs, rhs, dst)
        }
        Opcode::Print => emitter.emit_print(instr.temp_arg(0)?),
    }
    Ok(())
}

fn binary_operands(instr: &Instruction) -> BxResult<(Temp, Temp, Temp)> {
    Ok((instr.temp_arg(0)?, instr.temp_arg(1)?, instr.dest()?))
}

type BackendConstructor = fn() -> Box<dyn AssemblyEmitter>;

fn new_x64_linux() -> Box<dyn AssemblyEmitter> {
    Box::new(x86_64::X64LinuxEmitter::new())
}

fn new_arm64_darwin() -> Box<dyn AssemblyEmitter> {
    Box::new(arm64::Arm64DarwinEmitter::new())
}

lazy_static! {
    static ref BACKENDS: BTreeMap<&'static str, BackendConstructor> = {
        let mut backends: BTreeMap<&'static str, BackendConstructor> = BTreeMap::new();
        backends.insert(x86_64_config::TARGET_NAME, new_x64_linux);
        backends.insert(arm64_config::TARGET_NAME, new_arm64_darwin);
        backends
    };
}

/// A fresh backend instance for `name`.
pub fn get_backend(name: &str) -> BxResult<Box<dyn AssemblyEmitter>> {
    BACKENDS
        .get(name)
        .map(|construct| construct())
        .ok_or_else(|| BxError::UnknownTarget {
            name: name.to_string(),
            available: available_targets().join(", "),
        })
}

pub fn available_targets() -> Vec<&'static str> {
    BACKENDS.keys().copied().collect()
}

pub struct AssemblyGenerator {
    target: String,
    assembly_output: String,
}

impl AssemblyGenerator {
    pub fn new(target: &str) -> BxResult<Self> {
        if !BACKENDS.contains_key(target) {
            return Err(BxError::UnknownTarget {
                name: target.to_string(),
                available: available_targets().join(", "),
            });
        }
        Ok(Self {
            target: target.to_string(),
            assembly_output: String::new(),
        })
    }

    // Every call lowers with a fresh backend, so repeated calls agree.
    pub fn emit_assembly(&mut self, program: &Program) -> BxResult<()> {
        let mut emitter = get_backend(&self.target)?;
        self.assembly_output = emitter.lower(program)?;
        debug!(
            "{}: {} procedure(s), {} bytes of assembly",
            self.target,
            program.procedures.len(),
            self.assembly_output.len()
        );
        Ok(())
    }

    pub fn get_output(&self) -> &str {
        &self.assembly_output
    }
}
