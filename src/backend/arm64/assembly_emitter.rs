use super::immediate::{add_immediate, load_immediate, stack_operand};
use crate::backend::common::{SlotAllocator, SlotDirection};
use crate::backend::AssemblyEmitter;
use crate::ir::tac::Temp;
use crate::utils::config::arm64::*;
use crate::utils::config::procedures::symbol_name;
use crate::utils::string_utils::{asm_line, join_lines, label_line};
use log::debug;

/// AArch64 backend for Darwin. Temporaries live at `[SP, #8*slot]`; binary
/// operations load into X0/X1 and compute into X2.
pub struct Arm64DarwinEmitter {
    slots: SlotAllocator,
    procedure: String,
    body: Vec<String>,
}

impl Default for Arm64DarwinEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Arm64DarwinEmitter {
    pub fn new() -> Self {
        Self {
            slots: SlotAllocator::new(SlotDirection::AboveStackPointer),
            procedure: String::new(),
            body: Vec::new(),
        }
    }

    // Slot addresses are formed right before each access, since far slots
    // share one scratch register.
    fn access(&mut self, mnemonic: &str, reg: &str, temp: Temp) {
        let offset = self.slots.offset(temp) as u64;
        let (setup, operand) = stack_operand(offset);
        self.body.extend(setup);
        self.push(mnemonic, &[reg, &operand]);
    }

    fn load(&mut self, reg: &str, temp: Temp) {
        self.access("ldr", reg, temp);
    }

    fn store(&mut self, reg: &str, temp: Temp) {
        self.access("str", reg, temp);
    }

    fn push(&mut self, mnemonic: &str, operands: &[&str]) {
        self.body.push(asm_line(mnemonic, operands));
    }

    fn emit_unop(&mut self, mnemonic: &str, src: Temp, dst: Temp) {
        self.load(LHS, src);
        self.push(mnemonic, &[RHS, LHS]);
        self.store(RHS, dst);
    }

    fn emit_binop(&mut self, mnemonic: &str, lhs: Temp, rhs: Temp, dst: Temp) {
        self.load(LHS, lhs);
        self.load(RHS, rhs);
        self.push(mnemonic, &[DEST, LHS, RHS]);
        self.store(DEST, dst);
    }
}

impl AssemblyEmitter for Arm64DarwinEmitter {
    fn name(&self) -> &'static str {
        TARGET_NAME
    }

    fn begin_procedure(&mut self, name: &str) {
        self.slots.clear();
        self.body.clear();
        self.procedure = name.to_string();
    }

    fn emit_const(&mut self, value: i64, dst: Temp) {
        self.body.extend(load_immediate(DEST, value));
        self.store(DEST, dst);
    }

    fn emit_copy(&mut self, src: Temp, dst: Temp) {
        self.load(DEST, src);
        self.store(DEST, dst);
    }

    fn emit_neg(&mut self, src: Temp, dst: Temp) {
        self.emit_unop("neg", src, dst);
    }

    fn emit_not(&mut self, src: Temp, dst: Temp) {
        self.emit_unop("mvn", src, dst);
    }

    fn emit_add(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_binop("add", lhs, rhs, dst);
    }

    fn emit_sub(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_binop("sub", lhs, rhs, dst);
    }

    fn emit_mul(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_binop("mul", lhs, rhs, dst);
    }

    fn emit_div(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_binop("sdiv", lhs, rhs, dst);
    }

    // remainder = lhs - (lhs / rhs) * rhs
    fn emit_mod(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.load(LHS, lhs);
        self.load(RHS, rhs);
        self.push("sdiv", &[DEST, LHS, RHS]);
        self.push("msub", &[DEST, DEST, RHS, LHS]);
        self.store(DEST, dst);
    }

    fn emit_and(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_binop("and", lhs, rhs, dst);
    }

    fn emit_or(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_binop("orr", lhs, rhs, dst);
    }

    fn emit_xor(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_binop("eor", lhs, rhs, dst);
    }

    fn emit_shl(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_binop("lsl", lhs, rhs, dst);
    }

    fn emit_shr(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_binop("asr", lhs, rhs, dst);
    }

    // Darwin passes variadic arguments on the stack.
    fn emit_print(&mut self, arg: Temp) {
        let page = format!("{}@PAGE", PRINT_FORMAT_LABEL);
        let page_offset = format!("{}@PAGEOFF", PRINT_FORMAT_LABEL);
        self.load(DEST, arg);
        self.push("stp", &[FRAME_POINTER, LINK_REGISTER, PUSH_PAIR]);
        self.push("str", &[DEST, PUSH_PAIR]);
        self.push("adrp", &[RETURN_REG, &page]);
        self.push("add", &[RETURN_REG, RETURN_REG, &page_offset]);
        self.push("bl", &[PRINTF]);
        self.push("add", &[STACK_POINTER, STACK_POINTER, "#16"]);
        self.push("ldp", &[FRAME_POINTER, LINK_REGISTER, POP_PAIR]);
    }

    fn end_procedure(&mut self) -> Vec<String> {
        let symbol = format!("{}{}", SYMBOL_PREFIX, symbol_name(&self.procedure));
        let frame = self.slots.frame_size() as u64;
        debug!(
            "{}: {} slot(s), frame of {} bytes",
            self.procedure,
            self.slots.len(),
            self.slots.frame_size()
        );

        let mut lines = Vec::with_capacity(self.body.len() + 16);
        lines.push(asm_line(".global", &[&symbol]));
        lines.push(asm_line(".align", &["4"]));
        lines.push(String::new());
        lines.push(label_line(&symbol));
        lines.push(asm_line(".cfi_startproc", &[]));
        lines.push(asm_line("stp", &[FRAME_POINTER, LINK_REGISTER, PUSH_PAIR]));
        lines.push(asm_line("mov", &[FRAME_POINTER, STACK_POINTER]));
        lines.extend(add_immediate("sub", STACK_POINTER, STACK_POINTER, frame));
        lines.append(&mut self.body);
        lines.extend(add_immediate("add", STACK_POINTER, STACK_POINTER, frame));
        lines.push(asm_line("ldp", &[FRAME_POINTER, LINK_REGISTER, POP_PAIR]));
        lines.push(asm_line("mov", &[RETURN_REG, "#0"]));
        lines.push(asm_line("ret", &[]));
        lines.push(asm_line(".cfi_endproc", &[]));
        lines.push(String::new());
        lines
    }

    fn program_text(&self, procedures: &[Vec<String>]) -> String {
        let mut lines = vec![asm_line(".text", &[])];
        for procedure in procedures {
            lines.extend(procedure.iter().cloned());
        }
        lines.push(asm_line(".data", &[]));
        lines.push(label_line(PRINT_FORMAT_LABEL));
        lines.push(asm_line(".asciz", &[PRINT_FORMAT]));
        join_lines(&lines)
    }
}
