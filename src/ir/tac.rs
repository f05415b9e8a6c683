//! Three-address code: the flat IR produced by maximal munch and consumed by
//! the backends. Every instruction stands on its own; values only flow
//! between instructions through temporaries.

use crate::utils::errors::{BxError, BxResult};
use std::fmt;

/// Procedure-local temporary, printed as `%N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Temp(pub u32);

impl Temp {
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Temp(Temp),
    Int(i64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Temp(t) => write!(f, "{}", t),
            Operand::Int(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Const,
    Copy,
    Neg,
    Not,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Print,
}

impl Opcode {
    pub const ALL: [Opcode; 15] = [
        Opcode::Const,
        Opcode::Copy,
        Opcode::Neg,
        Opcode::Not,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Shl,
        Opcode::Shr,
        Opcode::Print,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Const => "const",
            Opcode::Copy => "copy",
            Opcode::Neg => "neg",
            Opcode::Not => "not",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Mod => "mod",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::Shl => "shl",
            Opcode::Shr => "shr",
            Opcode::Print => "print",
        }
    }

    pub fn from_name(name: &str) -> BxResult<Self> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.name() == name)
            .ok_or_else(|| BxError::UnknownOpcode {
                opcode: name.to_string(),
            })
    }

    pub fn arity(&self) -> usize {
        match self {
            Opcode::Const | Opcode::Copy | Opcode::Neg | Opcode::Not | Opcode::Print => 1,
            _ => 2,
        }
    }

    pub fn has_result(&self) -> bool {
        !matches!(self, Opcode::Print)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub args: Vec<Operand>,
    pub result: Option<Temp>,
}

impl Instruction {
    pub fn constant(value: i64, dst: Temp) -> Self {
        Self {
            opcode: Opcode::Const,
            args: vec![Operand::Int(value)],
            result: Some(dst),
        }
    }

    pub fn unary(opcode: Opcode, src: Temp, dst: Temp) -> Self {
        Self {
            opcode,
            args: vec![Operand::Temp(src)],
            result: Some(dst),
        }
    }

    pub fn binary(opcode: Opcode, lhs: Temp, rhs: Temp, dst: Temp) -> Self {
        Self {
            opcode,
            args: vec![Operand::Temp(lhs), Operand::Temp(rhs)],
            result: Some(dst),
        }
    }

    pub fn print(arg: Temp) -> Self {
        Self {
            opcode: Opcode::Print,
            args: vec![Operand::Temp(arg)],
            result: None,
        }
    }

    /// Check the operand count, operand kinds and result presence against the opcode.
    pub fn check_shape(&self) -> BxResult<()> {
        let opcode = self.opcode;
        if self.args.len() != opcode.arity() {
            return Err(BxError::malformed(
                opcode.name(),
                format!("expected {} argument(s), found {}", opcode.arity(), self.args.len()),
            ));
        }
        for (index, arg) in self.args.iter().enumerate() {
            match (opcode, arg) {
                (Opcode::Const, Operand::Int(_)) => {}
                (Opcode::Const, Operand::Temp(t)) => {
                    return Err(BxError::malformed(
                        "const",
                        format!("argument must be an integer literal, found {}", t),
                    ))
                }
                (_, Operand::Int(v)) => {
                    return Err(BxError::malformed(
                        opcode.name(),
                        format!("argument {} must be a temporary, found literal {}", index, v),
                    ))
                }
                (_, Operand::Temp(_)) => {}
            }
        }
        match (opcode.has_result(), self.result) {
            (true, None) => Err(BxError::malformed(opcode.name(), "missing result temporary")),
            (false, Some(t)) => Err(BxError::malformed(
                opcode.name(),
                format!("produces no value but names result {}", t),
            )),
            _ => Ok(()),
        }
    }

    pub fn temp_arg(&self, index: usize) -> BxResult<Temp> {
        match self.args.get(index) {
            Some(Operand::Temp(t)) => Ok(*t),
            Some(Operand::Int(v)) => Err(BxError::malformed(
                self.opcode.name(),
                format!("argument {} must be a temporary, found literal {}", index, v),
            )),
            None => Err(BxError::malformed(
                self.opcode.name(),
                format!("missing argument {}", index),
            )),
        }
    }

    pub fn literal_arg(&self, index: usize) -> BxResult<i64> {
        match self.args.get(index) {
            Some(Operand::Int(v)) => Ok(*v),
            Some(Operand::Temp(t)) => Err(BxError::malformed(
                self.opcode.name(),
                format!("argument {} must be an integer literal, found {}", index, t),
            )),
            None => Err(BxError::malformed(
                self.opcode.name(),
                format!("missing argument {}", index),
            )),
        }
    }

    pub fn dest(&self) -> BxResult<Temp> {
        self.result
            .ok_or_else(|| BxError::malformed(self.opcode.name(), "missing result temporary"))
    }

    /// Temporaries read by this instruction, in argument order
    pub fn uses(&self) -> impl Iterator<Item = Temp> + '_ {
        self.args.iter().filter_map(|arg| match arg {
            Operand::Temp(t) => Some(*t),
            Operand::Int(_) => None,
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(result) = self.result {
            write!(f, "{} = ", result)?;
        }
        write!(f, "{}", self.opcode)?;
        for (i, arg) in self.args.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    pub name: String,
    pub body: Vec<Instruction>,
}

impl Procedure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Vec::new(),
        }
    }

    /// Number of distinct temporaries mentioned anywhere in the body
    pub fn temp_count(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        for instr in &self.body {
            seen.extend(instr.uses());
            seen.extend(instr.result);
        }
        seen.len()
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "proc {}:", self.name)?;
        for instr in &self.body {
            writeln!(f, "    {}", instr)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub procedures: Vec<Procedure>,
}

impl Program {
    pub fn new(procedures: Vec<Procedure>) -> Self {
        Self { procedures }
    }

    pub fn instruction_count(&self) -> usize {
        self.procedures.iter().map(|p| p.body.len()).sum()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for procedure in &self.procedures {
            write!(f, "{}", procedure)?;
        }
        Ok(())
    }
}
