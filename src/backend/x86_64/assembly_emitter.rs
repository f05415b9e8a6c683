use crate::backend::common::{SlotAllocator, SlotDirection};
use crate::backend::AssemblyEmitter;
use crate::ir::tac::Temp;
use crate::utils::config::bit_ops::fits_in_i32;
use crate::utils::config::procedures::symbol_name;
use crate::utils::config::x86_64::*;
use crate::utils::string_utils::{asm_line, join_lines, label_line};
use log::debug;

/// x86-64 System V backend (AT&T syntax). Every temporary lives in its own
/// slot below `%rbp`; values pass through `%r11` between slots.
pub struct X64LinuxEmitter {
    slots: SlotAllocator,
    procedure: String,
    body: Vec<String>,
}

impl Default for X64LinuxEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl X64LinuxEmitter {
    pub fn new() -> Self {
        Self {
            slots: SlotAllocator::new(SlotDirection::BelowFramePointer),
            procedure: String::new(),
            body: Vec::new(),
        }
    }

    fn slot(&mut self, temp: Temp) -> String {
        format!("{}({})", self.slots.offset(temp), FRAME_POINTER)
    }

    fn push(&mut self, mnemonic: &str, operands: &[&str]) {
        self.body.push(asm_line(mnemonic, operands));
    }

    // lhs -> %r11, `<op> rhs, %r11`, %r11 -> dst
    fn emit_scratch_binop(&mut self, mnemonic: &str, lhs: Temp, rhs: Temp, dst: Temp) {
        let (lhs, rhs) = (self.slot(lhs), self.slot(rhs));
        let dst = self.slot(dst);
        self.push("movq", &[&lhs, SCRATCH]);
        self.push(mnemonic, &[&rhs, SCRATCH]);
        self.push("movq", &[SCRATCH, &dst]);
    }

    fn emit_scratch_unop(&mut self, mnemonic: &str, src: Temp, dst: Temp) {
        let src = self.slot(src);
        let dst = self.slot(dst);
        self.push("movq", &[&src, SCRATCH]);
        self.push(mnemonic, &[SCRATCH]);
        self.push("movq", &[SCRATCH, &dst]);
    }

    // cqto sign-extends %rax into %rdx:%rax; idivq leaves the quotient in
    // %rax and the remainder in %rdx.
    fn emit_division(&mut self, lhs: Temp, rhs: Temp, dst: Temp, result_reg: &str) {
        let (lhs, rhs) = (self.slot(lhs), self.slot(rhs));
        let dst = self.slot(dst);
        self.push("movq", &[&lhs, ACCUMULATOR]);
        self.push("cqto", &[]);
        self.push("idivq", &[&rhs]);
        self.push("movq", &[result_reg, &dst]);
    }

    fn emit_shift(&mut self, mnemonic: &str, lhs: Temp, rhs: Temp, dst: Temp) {
        let (lhs, rhs) = (self.slot(lhs), self.slot(rhs));
        let dst = self.slot(dst);
        self.push("movq", &[&lhs, SCRATCH]);
        self.push("movq", &[&rhs, SHIFT_COUNT]);
        self.push(mnemonic, &[SHIFT_COUNT_BYTE, SCRATCH]);
        self.push("movq", &[SCRATCH, &dst]);
    }
}

impl AssemblyEmitter for X64LinuxEmitter {
    fn name(&self) -> &'static str {
        TARGET_NAME
    }

    fn begin_procedure(&mut self, name: &str) {
        self.slots.clear();
        self.body.clear();
        self.procedure = name.to_string();
    }

    fn emit_const(&mut self, value: i64, dst: Temp) {
        let dst = self.slot(dst);
        let imm = format!("${}", value);
        if fits_in_i32(value) {
            self.push("movq", &[&imm, &dst]);
        } else {
            self.push("movabsq", &[&imm, SCRATCH]);
            self.push("movq", &[SCRATCH, &dst]);
        }
    }

    fn emit_copy(&mut self, src: Temp, dst: Temp) {
        let src = self.slot(src);
        let dst = self.slot(dst);
        self.push("movq", &[&src, SCRATCH]);
        self.push("movq", &[SCRATCH, &dst]);
    }

    fn emit_neg(&mut self, src: Temp, dst: Temp) {
        self.emit_scratch_unop("negq", src, dst);
    }

    fn emit_not(&mut self, src: Temp, dst: Temp) {
        self.emit_scratch_unop("notq", src, dst);
    }

    fn emit_add(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_scratch_binop("addq", lhs, rhs, dst);
    }

    fn emit_sub(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_scratch_binop("subq", lhs, rhs, dst);
    }

    fn emit_mul(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        let (lhs, rhs) = (self.slot(lhs), self.slot(rhs));
        let dst = self.slot(dst);
        self.push("movq", &[&lhs, ACCUMULATOR]);
        self.push("imulq", &[&rhs]);
        self.push("movq", &[ACCUMULATOR, &dst]);
    }

    fn emit_div(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_division(lhs, rhs, dst, ACCUMULATOR);
    }

    fn emit_mod(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_division(lhs, rhs, dst, REMAINDER);
    }

    fn emit_and(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_scratch_binop("andq", lhs, rhs, dst);
    }

    fn emit_or(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_scratch_binop("orq", lhs, rhs, dst);
    }

    fn emit_xor(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_scratch_binop("xorq", lhs, rhs, dst);
    }

    fn emit_shl(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_shift("salq", lhs, rhs, dst);
    }

    fn emit_shr(&mut self, lhs: Temp, rhs: Temp, dst: Temp) {
        self.emit_shift("sarq", lhs, rhs, dst);
    }

    fn emit_print(&mut self, arg: Temp) {
        let arg = self.slot(arg);
        let format = format!("{}(%rip)", PRINT_FORMAT_LABEL);
        self.push("leaq", &[&format, FIRST_ARG]);
        self.push("movq", &[&arg, SECOND_ARG]);
        self.push("xorq", &[ACCUMULATOR, ACCUMULATOR]);
        self.push("callq", &[PRINTF]);
    }

    fn end_procedure(&mut self) -> Vec<String> {
        let symbol = symbol_name(&self.procedure).to_string();
        let frame = format!("${}", self.slots.frame_size());
        debug!(
            "{}: {} slot(s), frame of {} bytes",
            self.procedure,
            self.slots.len(),
            self.slots.frame_size()
        );

        let mut lines = Vec::with_capacity(self.body.len() + 10);
        lines.push(asm_line(".globl", &[&symbol]));
        lines.push(label_line(&symbol));
        lines.push(asm_line("pushq", &[FRAME_POINTER]));
        lines.push(asm_line("movq", &[STACK_POINTER, FRAME_POINTER]));
        lines.push(asm_line("subq", &[&frame, STACK_POINTER]));
        lines.append(&mut self.body);
        lines.push(asm_line("movq", &[FRAME_POINTER, STACK_POINTER]));
        lines.push(asm_line("popq", &[FRAME_POINTER]));
        lines.push(asm_line("xorq", &[ACCUMULATOR, ACCUMULATOR]));
        lines.push(asm_line("retq", &[]));
        lines
    }

    fn program_text(&self, procedures: &[Vec<String>]) -> String {
        let mut lines = vec![
            asm_line(".section", &[".rodata"]),
            label_line(PRINT_FORMAT_LABEL),
            asm_line(".string", &[PRINT_FORMAT]),
            String::new(),
            asm_line(".text", &[]),
        ];
        for procedure in procedures {
            lines.extend(procedure.iter().cloned());
        }
        lines.push(asm_line(".section", &[".note.GNU-stack", "\"\"", "@progbits"]));
        join_lines(&lines)
    }
}
