#[cfg(test)]
mod tests {
    use bxc::ast::{self, BinaryOperator, Expression, Statement};
    use bxc::ir::tac::{Instruction, Opcode, Operand, Procedure, Program, Temp};
    use bxc::ir::{self, validate, wire};
    use bxc::utils::errors::{BxError, BxResult};

    const SAMPLE: &str = r#"[
      { "proc": "@main",
        "body": [
          { "opcode": "const", "args": [20], "result": "%1" },
          { "opcode": "const", "args": [22], "result": "%2" },
          { "opcode": "add", "args": ["%1", "%2"], "result": "%0" },
          { "opcode": "print", "args": ["%0"], "result": null }
        ] }
    ]"#;

    // Test decoding the interchange format
    #[test]
    fn test_decode_sample() -> BxResult<()> {
        let program = wire::from_json(SAMPLE)?;

        assert_eq!(program.procedures.len(), 1);
        let main = &program.procedures[0];
        assert_eq!(main.name, "@main");
        assert_eq!(main.body[0], Instruction::constant(20, Temp(1)));
        assert_eq!(
            main.body[2],
            Instruction::binary(Opcode::Add, Temp(1), Temp(2), Temp(0))
        );
        assert_eq!(main.body[3].result, None, "print has a null result");
        validate::check_program(&program)?;
        Ok(())
    }

    // Test encoding
    // Purpose: temporaries are "%N" strings, literals are numbers, print has a null result
    #[test]
    fn test_encode_shape() -> BxResult<()> {
        let program = ir::lower(&ast::Program::main(vec![Statement::print(Expression::binop(
            BinaryOperator::Multiplication,
            Expression::int(6),
            Expression::int(7),
        ))]))?;
        let text = wire::to_json(&program)?;
        let doc: serde_json::Value = serde_json::from_str(&text)?;

        assert_eq!(doc[0]["proc"], "@main");
        assert_eq!(doc[0]["body"][0]["opcode"], "const");
        assert_eq!(doc[0]["body"][0]["args"][0], 6);
        assert_eq!(doc[0]["body"][0]["result"], "%1");
        assert_eq!(doc[0]["body"][2]["args"][1], "%2");
        assert!(doc[0]["body"][3]["result"].is_null());

        assert_eq!(wire::from_json(&text)?, program, "Decoding the encoding gives the same program");
        Ok(())
    }

    // Test a missing result field on print
    #[test]
    fn test_result_may_be_omitted() -> BxResult<()> {
        let program = wire::from_json(
            r#"[{"proc": "@main", "body": [
                {"opcode": "const", "args": [1], "result": "%0"},
                {"opcode": "print", "args": ["%0"]}]}]"#,
        )?;
        assert_eq!(program.procedures[0].body[1], Instruction::print(Temp(0)));
        Ok(())
    }

    // Test malformed temporary names
    #[test]
    fn test_bad_temporary_reference() {
        for bad in ["x1", "%", "%-1", "%1a", "% 1"] {
            let text = format!(
                r#"[{{"proc": "@main", "body": [{{"opcode": "copy", "args": ["{}"], "result": "%0"}}]}}]"#,
                bad
            );
            match wire::from_json(&text) {
                Err(BxError::InputError { location, .. }) => assert_eq!(location, bad),
                other => panic!("Expected InputError for {:?}, got {:?}", bad, other),
            }
        }
    }

    // Test unknown opcodes
    #[test]
    fn test_unknown_opcode() {
        let result = wire::from_json(
            r#"[{"proc": "@main", "body": [{"opcode": "jmp", "args": [], "result": null}]}]"#,
        );
        match result {
            Err(BxError::UnknownOpcode { opcode }) => assert_eq!(opcode, "jmp"),
            other => panic!("Expected UnknownOpcode, got {:?}", other),
        }
    }

    // Test structurally invalid JSON
    #[test]
    fn test_invalid_json_document() {
        assert!(matches!(
            wire::from_json(r#"{"proc": "@main"}"#),
            Err(BxError::JsonError(_))
        ));
        assert!(matches!(
            wire::from_json(r#"[{"proc": "@main", "body": [{"opcode": "const", "args": [1.5], "result": "%0"}]}]"#),
            Err(BxError::JsonError(_))
        ));
    }

    // Test validation of use before definition
    #[test]
    fn test_use_before_definition() -> BxResult<()> {
        let program = wire::from_json(
            r#"[{"proc": "@main", "body": [
                {"opcode": "print", "args": ["%3"], "result": null}]}]"#,
        )?;
        match validate::check_program(&program) {
            Err(BxError::UndefinedTemporary { temp, procedure }) => {
                assert_eq!(temp, "%3");
                assert_eq!(procedure, "@main");
            }
            other => panic!("Expected UndefinedTemporary, got {:?}", other),
        }
        Ok(())
    }

    // Test validation of instruction shapes
    #[test]
    fn test_malformed_shapes() {
        let cases = vec![
            // const with a temporary argument
            Instruction {
                opcode: Opcode::Const,
                args: vec![Operand::Temp(Temp(0))],
                result: Some(Temp(1)),
            },
            // add with one argument
            Instruction {
                opcode: Opcode::Add,
                args: vec![Operand::Temp(Temp(0))],
                result: Some(Temp(1)),
            },
            // neg without a result
            Instruction {
                opcode: Opcode::Neg,
                args: vec![Operand::Temp(Temp(0))],
                result: None,
            },
            // print with a result
            Instruction {
                opcode: Opcode::Print,
                args: vec![Operand::Temp(Temp(0))],
                result: Some(Temp(1)),
            },
        ];
        for instr in cases {
            let mut proc = Procedure::new("@main");
            proc.body.push(Instruction::constant(1, Temp(0)));
            proc.body.push(instr.clone());
            let program = Program::new(vec![proc]);
            assert!(
                matches!(
                    validate::check_program(&program),
                    Err(BxError::MalformedInstruction { .. })
                ),
                "{} should be rejected",
                instr
            );
        }
    }

    // Test density check
    #[test]
    fn test_sparse_numbering_detected() {
        let mut proc = Procedure::new("@main");
        proc.body.push(Instruction::constant(1, Temp(0)));
        proc.body.push(Instruction::constant(2, Temp(2)));
        match validate::check_dense(&proc) {
            Err(BxError::SparseTemporaries { procedure, .. }) => assert_eq!(procedure, "@main"),
            other => panic!("Expected SparseTemporaries, got {:?}", other),
        }
    }
}
