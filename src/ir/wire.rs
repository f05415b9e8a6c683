//! JSON interchange format for TAC programs:
//!
//! ```text
//! [ { "proc": "@main",
//!     "body": [ { "opcode": "const", "args": [42], "result": "%0" },
//!               { "opcode": "print", "args": ["%0"], "result": null } ] } ]
//! ```

use super::tac::{Instruction, Opcode, Operand, Procedure, Program, Temp};
use crate::utils::errors::{BxError, BxResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref TEMP_REF: Regex = Regex::new(r"^%([0-9]+)$").unwrap();
}

#[derive(Debug, Serialize, Deserialize)]
struct WireProcedure {
    proc: String,
    body: Vec<WireInstruction>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireInstruction {
    opcode: String,
    args: Vec<WireArg>,
    #[serde(default)]
    result: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum WireArg {
    Int(i64),
    Temp(String),
}

pub fn parse_temp(text: &str) -> BxResult<Temp> {
    let caps = TEMP_REF
        .captures(text)
        .ok_or_else(|| BxError::input_error(text, "temporary references look like %N"))?;
    let id = caps[1]
        .parse::<u32>()
        .map_err(|e| BxError::input_error(text, format!("temporary id out of range: {}", e)))?;
    Ok(Temp(id))
}

fn decode_instruction(wire: WireInstruction) -> BxResult<Instruction> {
    let opcode = Opcode::from_name(&wire.opcode)?;
    let args = wire
        .args
        .into_iter()
        .map(|arg| match arg {
            WireArg::Int(v) => Ok(Operand::Int(v)),
            WireArg::Temp(s) => parse_temp(&s).map(Operand::Temp),
        })
        .collect::<BxResult<Vec<_>>>()?;
    let result = wire.result.as_deref().map(parse_temp).transpose()?;
    Ok(Instruction {
        opcode,
        args,
        result,
    })
}

fn encode_instruction(instr: &Instruction) -> WireInstruction {
    WireInstruction {
        opcode: instr.opcode.name().to_string(),
        args: instr
            .args
            .iter()
            .map(|arg| match arg {
                Operand::Int(v) => WireArg::Int(*v),
                Operand::Temp(t) => WireArg::Temp(t.to_string()),
            })
            .collect(),
        result: instr.result.map(|t| t.to_string()),
    }
}

pub fn from_json(text: &str) -> BxResult<Program> {
    let procs: Vec<WireProcedure> = serde_json::from_str(text)?;
    let procedures = procs
        .into_iter()
        .map(|p| {
            let body = p
                .body
                .into_iter()
                .map(decode_instruction)
                .collect::<BxResult<Vec<_>>>()?;
            Ok(Procedure { name: p.proc, body })
        })
        .collect::<BxResult<Vec<_>>>()?;
    Ok(Program::new(procedures))
}

pub fn to_json(program: &Program) -> BxResult<String> {
    let procs: Vec<WireProcedure> = program
        .procedures
        .iter()
        .map(|p| WireProcedure {
            proc: p.name.clone(),
            body: p.body.iter().map(encode_instruction).collect(),
        })
        .collect();
    let mut text = serde_json::to_string_pretty(&procs)?;
    text.push('\n');
    Ok(text)
}
