// Stack frame layout shared by every backend
pub mod frame {
    // Every temporary occupies one 64-bit slot
    pub const SLOT_SIZE: usize = 8;

    // Round the slot count up to an even number so the frame stays 16-byte aligned
    pub fn round_up_to_even(slots: usize) -> usize {
        slots + (slots & 1)
    }

    pub fn frame_size(slots: usize) -> usize {
        round_up_to_even(slots) * SLOT_SIZE
    }
}

// x86-64 System V (Linux) constants
pub mod x86_64 {
    pub const TARGET_NAME: &str = "x64-linux";

    pub const FRAME_POINTER: &str = "%rbp";
    pub const STACK_POINTER: &str = "%rsp";
    pub const SCRATCH: &str = "%r11";
    pub const ACCUMULATOR: &str = "%rax";
    pub const REMAINDER: &str = "%rdx";
    pub const SHIFT_COUNT: &str = "%rcx";
    pub const SHIFT_COUNT_BYTE: &str = "%cl";
    pub const FIRST_ARG: &str = "%rdi";
    pub const SECOND_ARG: &str = "%rsi";

    pub const PRINT_FORMAT_LABEL: &str = ".lprintfmt";
    pub const PRINT_FORMAT: &str = "\"%ld\\n\"";
    pub const PRINTF: &str = "printf@PLT";
}

// ARM64 Darwin (Apple) constants
pub mod arm64 {
    pub const TARGET_NAME: &str = "arm64-apple-darwin";

    pub const STACK_POINTER: &str = "SP";
    pub const FRAME_POINTER: &str = "X29";
    pub const LINK_REGISTER: &str = "X30";
    pub const RETURN_REG: &str = "X0";

    // Operand registers: two sources and one destination
    pub const LHS: &str = "X0";
    pub const RHS: &str = "X1";
    pub const DEST: &str = "X2";

    pub const PRINT_FORMAT_LABEL: &str = "l._dformat";
    pub const PRINT_FORMAT: &str = "\"%d\\n\"";
    pub const PRINTF: &str = "_printf";

    // Darwin prefixes every C-visible symbol with an underscore
    pub const SYMBOL_PREFIX: &str = "_";
    pub const PUSH_PAIR: &str = "[SP, #-16]!";
    pub const POP_PAIR: &str = "[SP], #16";

    // Holds slot addresses and frame sizes too large for an immediate
    pub const ADDRESS_SCRATCH: &str = "X9";
    // add/sub encode a 12-bit unsigned immediate, optionally shifted left by 12
    pub const ADD_IMM_MAX: u64 = 0xFFF;
    pub const ADD_IMM_SHIFTED_MAX: u64 = 0xFFF_FFF;
    // 64-bit ldr/str encode a 12-bit unsigned offset scaled by 8
    pub const LOAD_OFFSET_MAX: u64 = 0xFFF * 8;
}

// Bit manipulation helpers for 16-bit move-wide immediates
pub mod bit_ops {
    pub const CHUNK_BITS: u32 = 16;
    pub const CHUNK_MASK: u64 = 0xFFFF;
    pub const MAX_CHUNKS: u32 = 4;

    // Extract the 16-bit group `index` (0 = bits 0..15)
    pub fn chunk(value: u64, index: u32) -> u64 {
        (value >> (CHUNK_BITS * index)) & CHUNK_MASK
    }

    // Bits at or above the 16-bit group `index`
    pub fn remaining(value: u64, index: u32) -> u64 {
        if index >= MAX_CHUNKS {
            0
        } else {
            value >> (CHUNK_BITS * index)
        }
    }

    // Check if a value fits in a sign-extended 32-bit immediate
    pub fn fits_in_i32(value: i64) -> bool {
        i32::try_from(value).is_ok()
    }
}

// Target selection
pub mod targets {
    use super::{arm64, x86_64};

    pub const KNOWN_TARGETS: &[&str] = &[x86_64::TARGET_NAME, arm64::TARGET_NAME];

    // Default target for the machine running the compiler
    pub fn host_target() -> &'static str {
        if cfg!(all(target_arch = "aarch64", target_os = "macos")) {
            arm64::TARGET_NAME
        } else {
            x86_64::TARGET_NAME
        }
    }
}

// Procedure naming
pub mod procedures {
    pub const PREFIX: char = '@';

    // Assembly symbol for a TAC procedure name (`@main` -> `main`)
    pub fn symbol_name(procedure: &str) -> &str {
        procedure.strip_prefix(PREFIX).unwrap_or(procedure)
    }
}
