/*
*                    bxc -- BX compiler.
*
* program    = { "def" ident "(" ")" "{" { statement } "}" } ;
* statement  = "var" ident "=" expression ":" type ";"
*            | ident "=" expression ";"
*            | "print" "(" expression ")" ";" ;
* type       = "int" | "bool" ;
* expression = ident | number | "true" | "false"
*            | unop expression | expression binop expression
*            | "(" expression ")" ;
* unop       = "-" | "~" | "!" ;
* binop      = "+" | "-" | "*" | "/" | "%" | "&" | "|" | "^" | "<<" | ">>"
*            | "==" | "!=" | "<" | "<=" | ">" | ">=" | "&&" | "||" ;
*
* Trees handed to this crate are already scope- and range-checked.
*/

mod expressions;
mod program;
mod statements;

pub use expressions::{BinaryOperator, Expression, UnaryOperator};
pub use program::{Block, ProcDecl, Program};
pub use statements::{Statement, Type};
