use crate::utils::config::arm64::{
    ADDRESS_SCRATCH, ADD_IMM_MAX, ADD_IMM_SHIFTED_MAX, LOAD_OFFSET_MAX, STACK_POINTER,
};
use crate::utils::config::bit_ops::{chunk, remaining, CHUNK_BITS, MAX_CHUNKS};
use crate::utils::string_utils::asm_line;

/// Load a 64-bit literal into `reg` with move-wide instructions: `movz` for
/// the low 16 bits, then `movk` for each higher non-zero group until the
/// remaining high bits are all zero. Negative values are loaded by their
/// two's-complement bits.
pub fn load_immediate(reg: &str, value: i64) -> Vec<String> {
    let bits = value as u64;
    let mut lines = vec![asm_line("movz", &[reg, &format!("#{}", chunk(bits, 0))])];
    for index in 1..MAX_CHUNKS {
        if remaining(bits, index) == 0 {
            break;
        }
        let group = chunk(bits, index);
        if group == 0 {
            continue;
        }
        lines.push(asm_line(
            "movk",
            &[
                reg,
                &format!("#{}", group),
                &format!("lsl #{}", CHUNK_BITS * index),
            ],
        ));
    }
    lines
}

/// `dst = src <add|sub> value` for any unsigned value. Up to 12 bits is one
/// instruction, up to 24 bits is a shifted and an unshifted immediate, and
/// anything wider goes through the scratch register.
pub fn add_immediate(mnemonic: &str, dst: &str, src: &str, value: u64) -> Vec<String> {
    if value <= ADD_IMM_MAX {
        return vec![asm_line(mnemonic, &[dst, src, &format!("#{}", value)])];
    }
    if value <= ADD_IMM_SHIFTED_MAX {
        let (high, low) = (value >> 12, value & ADD_IMM_MAX);
        let mut lines = vec![asm_line(
            mnemonic,
            &[dst, src, &format!("#{}", high), "lsl #12"],
        )];
        if low != 0 {
            lines.push(asm_line(mnemonic, &[dst, dst, &format!("#{}", low)]));
        }
        return lines;
    }
    let mut lines = load_immediate(ADDRESS_SCRATCH, value as i64);
    lines.push(asm_line(mnemonic, &[dst, src, ADDRESS_SCRATCH]));
    lines
}

/// Memory operand for the slot `offset` bytes above SP, with the lines that
/// must run first to form its address in the scratch register.
pub fn stack_operand(offset: u64) -> (Vec<String>, String) {
    if offset <= LOAD_OFFSET_MAX {
        return (Vec::new(), format!("[{}, #{}]", STACK_POINTER, offset));
    }
    if offset <= ADD_IMM_SHIFTED_MAX {
        let high = offset & !ADD_IMM_MAX;
        let setup = add_immediate("add", ADDRESS_SCRATCH, STACK_POINTER, high);
        let operand = format!("[{}, #{}]", ADDRESS_SCRATCH, offset & ADD_IMM_MAX);
        return (setup, operand);
    }
    let setup = add_immediate("add", ADDRESS_SCRATCH, STACK_POINTER, offset);
    (setup, format!("[{}]", ADDRESS_SCRATCH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_value_single_instruction() {
        assert_eq!(load_immediate("X2", 5), vec!["\tmovz\tX2, #5".to_string()]);
        assert_eq!(load_immediate("X2", 0), vec!["\tmovz\tX2, #0".to_string()]);
    }

    #[test]
    fn test_zero_groups_are_skipped() {
        let lines = load_immediate("X2", 0x1_0000_0001);
        assert_eq!(
            lines,
            vec![
                "\tmovz\tX2, #1".to_string(),
                "\tmovk\tX2, #1, lsl #32".to_string(),
            ]
        );
    }

    #[test]
    fn test_full_width_values() {
        assert_eq!(load_immediate("X2", i64::MAX).len(), 4);
        let minus_one = load_immediate("X2", -1);
        assert_eq!(minus_one.len(), 4);
        assert_eq!(minus_one[3], "\tmovk\tX2, #65535, lsl #48");
    }

    #[test]
    fn test_add_immediate_splits() {
        assert_eq!(add_immediate("sub", "SP", "SP", 4080), vec!["\tsub\tSP, SP, #4080"]);
        assert_eq!(
            add_immediate("sub", "SP", "SP", 4816),
            vec!["\tsub\tSP, SP, #1, lsl #12", "\tsub\tSP, SP, #720"]
        );
        assert_eq!(add_immediate("add", "SP", "SP", 8192), vec!["\tadd\tSP, SP, #2, lsl #12"]);

        let wide = add_immediate("sub", "SP", "SP", 0x100_0000);
        assert_eq!(wide.last().map(String::as_str), Some("\tsub\tSP, SP, X9"));
        assert!(wide[0].starts_with("\tmovz\tX9, "));
    }

    #[test]
    fn test_stack_operand_ranges() {
        assert_eq!(stack_operand(32760), (Vec::new(), "[SP, #32760]".to_string()));
        assert_eq!(
            stack_operand(32768),
            (vec!["\tadd\tX9, SP, #8, lsl #12".to_string()], "[X9, #0]".to_string())
        );
        assert_eq!(
            stack_operand(40968),
            (vec!["\tadd\tX9, SP, #10, lsl #12".to_string()], "[X9, #8]".to_string())
        );
        let (setup, operand) = stack_operand(0x100_0000);
        assert_eq!(operand, "[X9]");
        assert_eq!(setup.last().map(String::as_str), Some("\tadd\tX9, SP, X9"));
    }
}
