use std::{fs, fs::File, io::Read, path::Path};

pub mod ast;
pub mod backend;
pub mod frontend;
pub mod ir;
pub mod utils;

pub use utils::errors;

use crate::backend::AssemblyGenerator;
use crate::errors::{BxError, BxResult};

/// What a compiler input file holds, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// JSON dump of a checked syntax tree (`*.json`)
    Ast,
    /// TAC in the JSON wire format (`*.tac.json`)
    Tac,
}

impl InputKind {
    pub fn of(path: &Path) -> Self {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if name.ends_with(".tac.json") {
            InputKind::Tac
        } else {
            InputKind::Ast
        }
    }
}

pub fn read(filename: &Path) -> BxResult<String> {
    match filename.extension() {
        Some(ext) if ext == "json" => {}
        _ => {
            return Err(BxError::FileReadError(format!(
                "{}: input must be a .json file",
                filename.display()
            )))
        }
    }
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

pub fn write_output(filename: &Path, contents: &str) -> BxResult<()> {
    fs::write(filename, contents)
        .map_err(|e| BxError::FileWriteError(format!("{}: {}", filename.display(), e)))
}

/// Lower a checked syntax tree all the way to assembly for `target`.
pub fn compile_ast(program: &ast::Program, target: &str) -> BxResult<String> {
    let tac = ir::lower(program)?;
    compile_tac(&tac, target)
}

/// Check a TAC program and lower it to assembly for `target`.
pub fn compile_tac(program: &ir::Program, target: &str) -> BxResult<String> {
    ir::validate::check_program(program)?;
    let mut generator = AssemblyGenerator::new(target)?;
    generator.emit_assembly(program)?;
    Ok(generator.get_output().to_string())
}
