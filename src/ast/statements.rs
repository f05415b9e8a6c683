use super::Expression;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    VarDecl {
        name: String,
        ty: Type,
        init: Expression,
    },
    Assign {
        lvalue: String,
        rvalue: Expression,
    },
    Print(Expression),
}

impl Statement {
    pub fn var_decl(name: impl Into<String>, init: Expression) -> Self {
        Statement::VarDecl {
            name: name.into(),
            ty: Type::Int,
            init,
        }
    }

    pub fn assign(lvalue: impl Into<String>, rvalue: Expression) -> Self {
        Statement::Assign {
            lvalue: lvalue.into(),
            rvalue,
        }
    }

    pub fn print(expr: Expression) -> Self {
        Statement::Print(expr)
    }
}
