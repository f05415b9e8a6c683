use crate::ir::tac::Temp;
use crate::utils::config::frame::{self, SLOT_SIZE};
use std::collections::HashMap;

/// Which way slot offsets grow from the frame base register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotDirection {
    /// Negative offsets from the frame pointer, starting at -8.
    BelowFramePointer,
    /// Non-negative offsets from the stack pointer, starting at 0.
    AboveStackPointer,
}

/// Maps temporaries to 8-byte stack slots in the order they are first seen.
#[derive(Debug)]
pub struct SlotAllocator {
    direction: SlotDirection,
    slots: HashMap<Temp, usize>,
}

impl SlotAllocator {
    pub fn new(direction: SlotDirection) -> Self {
        Self {
            direction,
            slots: HashMap::new(),
        }
    }

    /// Slot index of `temp`, assigning the next free one on first sight.
    pub fn slot(&mut self, temp: Temp) -> usize {
        let next = self.slots.len();
        *self.slots.entry(temp).or_insert(next)
    }

    /// Byte offset of `temp`'s slot relative to the frame base register.
    pub fn offset(&mut self, temp: Temp) -> i64 {
        let slot = self.slot(temp) as i64;
        let size = SLOT_SIZE as i64;
        match self.direction {
            SlotDirection::BelowFramePointer => -size * (slot + 1),
            SlotDirection::AboveStackPointer => size * slot,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bytes to reserve for every slot assigned so far, kept 16-byte aligned.
    pub fn frame_size(&self) -> usize {
        frame::frame_size(self.slots.len())
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
