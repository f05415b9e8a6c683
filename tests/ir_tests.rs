#[cfg(test)]
mod tests {
    use bxc::ast::{self, BinaryOperator, Expression, Statement, UnaryOperator};
    use bxc::ir::tac::{Instruction, Opcode, Procedure, Temp};
    use bxc::ir::{self, validate};
    use bxc::utils::errors::{BxError, BxResult};

    // Helper function to lower a single `main` body and return its TAC
    fn lower_main(body: Vec<Statement>) -> BxResult<Procedure> {
        let program = ir::lower(&ast::Program::main(body))?;
        assert_eq!(program.procedures.len(), 1, "Should produce exactly one procedure");
        Ok(program.procedures[0].clone())
    }

    fn int(v: i64) -> Expression {
        Expression::int(v)
    }

    fn var(name: &str) -> Expression {
        Expression::var(name)
    }

    fn binop(op: BinaryOperator, l: Expression, r: Expression) -> Expression {
        Expression::binop(op, l, r)
    }

    fn t(id: u32) -> Temp {
        Temp(id)
    }

    // Test printing a literal
    // Purpose: print gets a fresh temporary and the literal is loaded into it
    #[test]
    fn test_print_literal() -> BxResult<()> {
        let proc = lower_main(vec![Statement::print(int(42))])?;

        assert_eq!(proc.name, "@main", "Procedure should be named @main");
        assert_eq!(
            proc.body,
            vec![Instruction::constant(42, t(0)), Instruction::print(t(0))],
            "Should load 42 into %0 and print it"
        );
        Ok(())
    }

    // Test variable declaration and use
    // Purpose: the initializer writes into the variable's own temporary and a read is a copy
    #[test]
    fn test_var_decl_and_read() -> BxResult<()> {
        let proc = lower_main(vec![
            Statement::var_decl("x", int(7)),
            Statement::print(var("x")),
        ])?;

        assert_eq!(
            proc.body,
            vec![
                Instruction::constant(7, t(0)),
                Instruction::unary(Opcode::Copy, t(0), t(1)),
                Instruction::print(t(1)),
            ]
        );
        Ok(())
    }

    // Test binary operator temporaries
    // Purpose: destination first, then left operand, then right operand
    #[test]
    fn test_binop_temporary_order() -> BxResult<()> {
        let proc = lower_main(vec![Statement::print(binop(
            BinaryOperator::Addition,
            int(1),
            int(2),
        ))])?;

        assert_eq!(
            proc.body,
            vec![
                Instruction::constant(1, t(1)),
                Instruction::constant(2, t(2)),
                Instruction::binary(Opcode::Add, t(1), t(2), t(0)),
                Instruction::print(t(0)),
            ]
        );
        Ok(())
    }

    // Test nested evaluation order
    // Purpose: the whole left subtree is lowered before the right operand
    #[test]
    fn test_left_before_right() -> BxResult<()> {
        // print((1 - 2) * 3)
        let expr = binop(
            BinaryOperator::Multiplication,
            binop(BinaryOperator::Subtraction, int(1), int(2)),
            int(3),
        );
        let proc = lower_main(vec![Statement::print(expr)])?;

        assert_eq!(
            proc.body,
            vec![
                Instruction::constant(1, t(3)),
                Instruction::constant(2, t(4)),
                Instruction::binary(Opcode::Sub, t(3), t(4), t(1)),
                Instruction::constant(3, t(2)),
                Instruction::binary(Opcode::Mul, t(1), t(2), t(0)),
                Instruction::print(t(0)),
            ]
        );
        Ok(())
    }

    // Test unary operators
    #[test]
    fn test_unary_operators() -> BxResult<()> {
        let proc = lower_main(vec![
            Statement::print(Expression::unop(UnaryOperator::Opposite, int(5))),
            Statement::print(Expression::unop(UnaryOperator::BitwiseNegation, int(0))),
        ])?;

        assert_eq!(
            proc.body,
            vec![
                Instruction::constant(5, t(1)),
                Instruction::unary(Opcode::Neg, t(1), t(0)),
                Instruction::print(t(0)),
                Instruction::constant(0, t(3)),
                Instruction::unary(Opcode::Not, t(3), t(2)),
                Instruction::print(t(2)),
            ]
        );
        Ok(())
    }

    // Test assignment
    // Purpose: the right-hand side is lowered straight into the variable's temporary
    #[test]
    fn test_assignment_targets_variable_temp() -> BxResult<()> {
        let proc = lower_main(vec![
            Statement::var_decl("x", int(0)),
            Statement::assign("x", binop(BinaryOperator::Addition, var("x"), int(1))),
        ])?;

        assert_eq!(
            proc.body,
            vec![
                Instruction::constant(0, t(0)),
                Instruction::unary(Opcode::Copy, t(0), t(1)),
                Instruction::constant(1, t(2)),
                Instruction::binary(Opcode::Add, t(1), t(2), t(0)),
            ]
        );
        Ok(())
    }

    // Test every arithmetic and bitwise operator
    // Purpose: the operator table maps each operator to its opcode
    #[test]
    fn test_operator_table() -> BxResult<()> {
        let table = [
            (BinaryOperator::Addition, Opcode::Add),
            (BinaryOperator::Subtraction, Opcode::Sub),
            (BinaryOperator::Multiplication, Opcode::Mul),
            (BinaryOperator::Division, Opcode::Div),
            (BinaryOperator::Modulus, Opcode::Mod),
            (BinaryOperator::BitwiseAnd, Opcode::And),
            (BinaryOperator::BitwiseOr, Opcode::Or),
            (BinaryOperator::BitwiseXor, Opcode::Xor),
            (BinaryOperator::LogicalLeftShift, Opcode::Shl),
            (BinaryOperator::LogicalRightShift, Opcode::Shr),
        ];
        for (op, opcode) in table {
            let proc = lower_main(vec![Statement::print(binop(op, int(6), int(3)))])?;
            assert_eq!(
                proc.body[2].opcode, opcode,
                "{} should lower to {}",
                op.name(),
                opcode
            );
        }
        Ok(())
    }

    // Test the boolean placeholder
    // Purpose: comparisons, connectives and boolean values lower to `const 0` without lowering operands
    #[test]
    fn test_boolean_placeholder() -> BxResult<()> {
        let exprs = vec![
            binop(BinaryOperator::LessThan, int(1), int(2)),
            binop(BinaryOperator::BooleanAnd, Expression::Bool(true), Expression::Bool(false)),
            Expression::unop(UnaryOperator::BooleanNot, Expression::Bool(false)),
            Expression::Bool(true),
        ];
        for expr in exprs {
            let proc = lower_main(vec![Statement::print(expr.clone())])?;
            assert_eq!(
                proc.body,
                vec![Instruction::constant(0, t(0)), Instruction::print(t(0))],
                "{:?} should lower to the placeholder",
                expr
            );
        }
        Ok(())
    }

    // Test unbound variable
    // Purpose: reading a name without a binding is an internal error
    #[test]
    fn test_unbound_variable() {
        let result = lower_main(vec![Statement::print(var("ghost"))]);
        match result {
            Err(e @ BxError::UnboundVariable { .. }) => {
                assert!(e.is_internal(), "Unbound variable is an internal error");
                assert!(e.to_string().contains("ghost"));
            }
            other => panic!("Expected UnboundVariable, got {:?}", other),
        }
    }

    // Test numbering density
    // Purpose: a larger program uses exactly %0..%k-1 and defines every temporary before use
    #[test]
    fn test_temporaries_are_dense() -> BxResult<()> {
        let proc = lower_main(vec![
            Statement::var_decl("a", int(10)),
            Statement::var_decl("b", binop(BinaryOperator::Modulus, var("a"), int(3))),
            Statement::assign(
                "a",
                binop(
                    BinaryOperator::BitwiseXor,
                    binop(BinaryOperator::LogicalLeftShift, var("a"), var("b")),
                    Expression::unop(UnaryOperator::Opposite, var("b")),
                ),
            ),
            Statement::print(binop(BinaryOperator::Subtraction, var("a"), var("b"))),
        ])?;

        validate::check_dense(&proc)?;
        validate::check_procedure(&proc)?;
        let results: Vec<u32> = proc.body.iter().filter_map(|i| i.result).map(|t| t.id()).collect();
        assert!(results.contains(&(proc.temp_count() as u32 - 1)), "Highest temporary is written");
        Ok(())
    }

    // Test determinism
    #[test]
    fn test_lowering_is_deterministic() -> BxResult<()> {
        let body = vec![
            Statement::var_decl("x", int(7)),
            Statement::print(binop(
                BinaryOperator::Subtraction,
                binop(BinaryOperator::Multiplication, var("x"), int(3)),
                int(1),
            )),
        ];
        let first = ir::lower(&ast::Program::main(body.clone()))?;
        let second = ir::lower(&ast::Program::main(body))?;
        assert_eq!(first, second, "Two lowerings of the same tree should be identical");
        Ok(())
    }

    // Test multiple procedures
    // Purpose: counters and bindings restart for each procedure
    #[test]
    fn test_procedures_are_independent() -> BxResult<()> {
        let program = ast::Program {
            procs: vec![
                ast::ProcDecl {
                    name: "main".to_string(),
                    body: vec![Statement::var_decl("x", int(1)), Statement::print(var("x"))],
                },
                ast::ProcDecl {
                    name: "helper".to_string(),
                    body: vec![Statement::print(int(2))],
                },
            ],
        };
        let tac = ir::lower(&program)?;

        assert_eq!(tac.procedures[0].name, "@main");
        assert_eq!(tac.procedures[1].name, "@helper");
        assert_eq!(
            tac.procedures[1].body[0],
            Instruction::constant(2, t(0)),
            "Second procedure should start again at %0"
        );
        Ok(())
    }

    // Test textual form
    #[test]
    fn test_display() -> BxResult<()> {
        let proc = lower_main(vec![Statement::print(binop(
            BinaryOperator::Addition,
            int(1),
            int(2),
        ))])?;
        let text = proc.to_string();

        assert!(text.starts_with("proc @main:\n"));
        assert!(text.contains("    %1 = const 1\n"));
        assert!(text.contains("    %0 = add %1, %2\n"));
        assert!(text.contains("    print %0\n"));
        Ok(())
    }
}
