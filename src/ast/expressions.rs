use crate::ir::tac::Opcode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Opposite,
    BitwiseNegation,
    BooleanNot,
}

impl UnaryOperator {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "opposite" => Some(UnaryOperator::Opposite),
            "bitwise-negation" => Some(UnaryOperator::BitwiseNegation),
            "boolean-not" | "boolean-negation" | "boolean_negation" => Some(UnaryOperator::BooleanNot),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnaryOperator::Opposite => "opposite",
            UnaryOperator::BitwiseNegation => "bitwise-negation",
            UnaryOperator::BooleanNot => "boolean-not",
        }
    }

    /// TAC opcode for the operator, `None` for boolean operators which still
    /// lower to a placeholder constant.
    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            UnaryOperator::Opposite => Some(Opcode::Neg),
            UnaryOperator::BitwiseNegation => Some(Opcode::Not),
            UnaryOperator::BooleanNot => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulus,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalLeftShift,
    LogicalRightShift,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    BooleanAnd,
    BooleanOr,
}

impl BinaryOperator {
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name {
            "addition" => BinaryOperator::Addition,
            "subtraction" => BinaryOperator::Subtraction,
            "multiplication" => BinaryOperator::Multiplication,
            "division" => BinaryOperator::Division,
            "modulus" => BinaryOperator::Modulus,
            "bitwise-and" => BinaryOperator::BitwiseAnd,
            "bitwise-or" => BinaryOperator::BitwiseOr,
            "bitwise-xor" => BinaryOperator::BitwiseXor,
            "logical-left-shift" => BinaryOperator::LogicalLeftShift,
            "logical-right-shift" => BinaryOperator::LogicalRightShift,
            "equality" | "is_equal_to" => BinaryOperator::Equal,
            "disequality" | "is_not_equal_to" => BinaryOperator::NotEqual,
            "lt" | "is_lower_than" => BinaryOperator::LessThan,
            "lte" | "is_lower_than_or_equal" => BinaryOperator::LessThanOrEqual,
            "gt" | "is_greater_than" => BinaryOperator::GreaterThan,
            "gte" | "is_greater_than_or_equal" => BinaryOperator::GreaterThanOrEqual,
            "boolean-and" | "boolean_and" => BinaryOperator::BooleanAnd,
            "boolean-or" | "boolean_or" => BinaryOperator::BooleanOr,
            _ => return None,
        };
        Some(op)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BinaryOperator::Addition => "addition",
            BinaryOperator::Subtraction => "subtraction",
            BinaryOperator::Multiplication => "multiplication",
            BinaryOperator::Division => "division",
            BinaryOperator::Modulus => "modulus",
            BinaryOperator::BitwiseAnd => "bitwise-and",
            BinaryOperator::BitwiseOr => "bitwise-or",
            BinaryOperator::BitwiseXor => "bitwise-xor",
            BinaryOperator::LogicalLeftShift => "logical-left-shift",
            BinaryOperator::LogicalRightShift => "logical-right-shift",
            BinaryOperator::Equal => "equality",
            BinaryOperator::NotEqual => "disequality",
            BinaryOperator::LessThan => "lt",
            BinaryOperator::LessThanOrEqual => "lte",
            BinaryOperator::GreaterThan => "gt",
            BinaryOperator::GreaterThanOrEqual => "gte",
            BinaryOperator::BooleanAnd => "boolean-and",
            BinaryOperator::BooleanOr => "boolean-or",
        }
    }

    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            BinaryOperator::Addition => Some(Opcode::Add),
            BinaryOperator::Subtraction => Some(Opcode::Sub),
            BinaryOperator::Multiplication => Some(Opcode::Mul),
            BinaryOperator::Division => Some(Opcode::Div),
            BinaryOperator::Modulus => Some(Opcode::Mod),
            BinaryOperator::BitwiseAnd => Some(Opcode::And),
            BinaryOperator::BitwiseOr => Some(Opcode::Or),
            BinaryOperator::BitwiseXor => Some(Opcode::Xor),
            BinaryOperator::LogicalLeftShift => Some(Opcode::Shl),
            BinaryOperator::LogicalRightShift => Some(Opcode::Shr),
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual
            | BinaryOperator::BooleanAnd
            | BinaryOperator::BooleanOr => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Var(String),
    Int(i64),
    Bool(bool),
    UnOp {
        op: UnaryOperator,
        arg: Box<Expression>,
    },
    BinOp {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn var(name: impl Into<String>) -> Self {
        Expression::Var(name.into())
    }

    pub fn int(value: i64) -> Self {
        Expression::Int(value)
    }

    pub fn unop(op: UnaryOperator, arg: Expression) -> Self {
        Expression::UnOp { op, arg: Box::new(arg) }
    }

    pub fn binop(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
