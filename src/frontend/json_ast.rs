//! Loader for the JSON dump of a checked BX syntax tree. Every node is a
//! two-element array `["<kind:variant>", { fields }]`:
//!
//! ```text
//! {"ast": [["<decl:proc>", {"name": ["<name>", {"value": "main"}],
//!                           "body": [["<statement:eval>", {...}], ...]}]]}
//! ```

use crate::ast::{BinaryOperator, Expression, ProcDecl, Program, Statement, Type, UnaryOperator};
use crate::utils::errors::{BxError, BxResult};
use log::debug;
use serde_json::{Map, Value};

type Fields = Map<String, Value>;

pub fn load_program(text: &str) -> BxResult<Program> {
    let doc: Value = serde_json::from_str(text)?;
    program_from_value(&doc)
}

pub fn program_from_value(doc: &Value) -> BxResult<Program> {
    let decls = doc
        .get("ast")
        .and_then(Value::as_array)
        .ok_or_else(|| BxError::input_error("$", "expected an object with an \"ast\" array"))?;

    let mut procs = Vec::with_capacity(decls.len());
    for (i, decl) in decls.iter().enumerate() {
        let loc = format!("ast[{}]", i);
        let (tag, fields) = tagged(decl, &loc)?;
        if tag != "<decl:proc>" {
            return Err(BxError::input_error(loc, format!("unsupported declaration {}", tag)));
        }
        procs.push(load_proc(fields, &loc)?);
    }
    let program = Program { procs };
    debug!(
        "loaded {} procedure(s), {} statement(s)",
        program.procs.len(),
        program.statement_count()
    );
    Ok(program)
}

fn load_proc(fields: &Fields, loc: &str) -> BxResult<ProcDecl> {
    let name = match fields.get("name") {
        Some(name) => name_of(name, &format!("{}.name", loc))?,
        None => "main".to_string(),
    };
    let body = field(fields, "body", loc)?
        .as_array()
        .ok_or_else(|| BxError::input_error(format!("{}.body", loc), "expected a statement list"))?
        .iter()
        .enumerate()
        .map(|(i, stmt)| load_statement(stmt, &format!("{}.body[{}]", loc, i)))
        .collect::<BxResult<Vec<_>>>()?;
    Ok(ProcDecl { name, body })
}

fn load_statement(node: &Value, loc: &str) -> BxResult<Statement> {
    let (tag, fields) = tagged(node, loc)?;
    match tag {
        "<statement:vardecl>" => {
            let name = name_of(field(fields, "name", loc)?, &format!("{}.name", loc))?;
            let init = match fields.get("init") {
                Some(init) => load_expression(init, &format!("{}.init", loc))?,
                None => Expression::Int(0),
            };
            let ty = match fields.get("type") {
                Some(ty) => load_type(ty, &format!("{}.type", loc))?,
                None => Type::Int,
            };
            Ok(Statement::VarDecl { name, ty, init })
        }
        "<statement:assign>" => {
            let lvalue_loc = format!("{}.lvalue", loc);
            let (lvalue_tag, lvalue) = tagged(field(fields, "lvalue", loc)?, &lvalue_loc)?;
            if lvalue_tag != "<lvalue:var>" {
                return Err(BxError::input_error(
                    lvalue_loc,
                    format!("unsupported lvalue {}", lvalue_tag),
                ));
            }
            let name = name_of(field(lvalue, "name", &lvalue_loc)?, &lvalue_loc)?;
            let rvalue = load_expression(field(fields, "rvalue", loc)?, &format!("{}.rvalue", loc))?;
            Ok(Statement::Assign { lvalue: name, rvalue })
        }
        "<statement:eval>" => load_print(field(fields, "expression", loc)?, &format!("{}.expression", loc)),
        other => Err(BxError::input_error(loc, format!("unsupported statement {}", other))),
    }
}

// The only call BX knows is `print(e)`.
fn load_print(node: &Value, loc: &str) -> BxResult<Statement> {
    let (tag, fields) = tagged(node, loc)?;
    if tag != "<expression:call>" {
        return Err(BxError::input_error(loc, format!("expected a print call, found {}", tag)));
    }
    if let Some(target) = fields.get("target") {
        let target = name_of(target, &format!("{}.target", loc))?;
        if target != "print" {
            return Err(BxError::input_error(loc, format!("unknown procedure '{}'", target)));
        }
    }
    let args = field(fields, "arguments", loc)?
        .as_array()
        .ok_or_else(|| BxError::input_error(format!("{}.arguments", loc), "expected an argument list"))?;
    match args.as_slice() {
        [arg] => Ok(Statement::Print(load_expression(arg, &format!("{}.arguments[0]", loc))?)),
        _ => Err(BxError::input_error(
            loc,
            format!("print takes exactly one argument, found {}", args.len()),
        )),
    }
}

fn load_expression(node: &Value, loc: &str) -> BxResult<Expression> {
    let (tag, fields) = tagged(node, loc)?;
    match tag {
        "<expression:var>" => Ok(Expression::Var(name_of(field(fields, "name", loc)?, loc)?)),
        "<expression:int>" => field(fields, "value", loc)?
            .as_i64()
            .map(Expression::Int)
            .ok_or_else(|| BxError::input_error(loc, "integer literal out of range")),
        "<expression:bool>" => field(fields, "value", loc)?
            .as_bool()
            .map(Expression::Bool)
            .ok_or_else(|| BxError::input_error(loc, "expected true or false")),
        "<expression:uniop>" => {
            let name = name_of(field(fields, "operator", loc)?, loc)?;
            let op = UnaryOperator::from_name(&name)
                .ok_or_else(|| BxError::input_error(loc, format!("unknown unary operator '{}'", name)))?;
            let arg = load_expression(field(fields, "argument", loc)?, &format!("{}.argument", loc))?;
            Ok(Expression::unop(op, arg))
        }
        "<expression:binop>" => {
            let name = name_of(field(fields, "operator", loc)?, loc)?;
            let op = BinaryOperator::from_name(&name)
                .ok_or_else(|| BxError::input_error(loc, format!("unknown binary operator '{}'", name)))?;
            let left = load_expression(field(fields, "left", loc)?, &format!("{}.left", loc))?;
            let right = load_expression(field(fields, "right", loc)?, &format!("{}.right", loc))?;
            Ok(Expression::binop(op, left, right))
        }
        other => Err(BxError::input_error(loc, format!("unsupported expression {}", other))),
    }
}

fn load_type(node: &Value, loc: &str) -> BxResult<Type> {
    let name = match node {
        Value::String(s) => s.as_str(),
        _ => tagged(node, loc)?.0,
    };
    match name {
        "int" | "<type:int>" => Ok(Type::Int),
        "bool" | "<type:bool>" => Ok(Type::Bool),
        other => Err(BxError::input_error(loc, format!("unknown type {}", other))),
    }
}

fn tagged<'a>(node: &'a Value, loc: &str) -> BxResult<(&'a str, &'a Fields)> {
    match node.as_array().map(Vec::as_slice) {
        Some([Value::String(tag), Value::Object(fields)]) => Ok((tag.as_str(), fields)),
        _ => Err(BxError::input_error(loc, "expected [\"<kind>\", {...}]")),
    }
}

fn field<'a>(fields: &'a Fields, key: &str, loc: &str) -> BxResult<&'a Value> {
    fields
        .get(key)
        .ok_or_else(|| BxError::input_error(loc, format!("missing field \"{}\"", key)))
}

// Names are either `["<name>", {"value": "x"}]` or a bare string.
fn name_of(node: &Value, loc: &str) -> BxResult<String> {
    if let Value::String(s) = node {
        return Ok(s.clone());
    }
    let (_, fields) = tagged(node, loc)?;
    field(fields, "value", loc)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BxError::input_error(loc, "name value must be a string"))
}
