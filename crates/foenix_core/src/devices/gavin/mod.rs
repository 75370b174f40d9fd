/*
    FoenixEmu
    Foenix A2560K emulator core

    Copyright 2022-2025 The FoenixEmu contributors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    devices::gavin::mod.rs

    Implements the Gavin system controller of the A2560K.
    
    Gavin is memory mapped. The CPU core forwards every access inside the
    Gavin window to read() / write(); registers Gavin manages itself are
    handled here and everything else falls back to plain memory.

*/

pub mod interrupt;
pub mod rtc;
pub mod timer;

pub use interrupt::{InterruptGroup, InterruptVector, INTERRUPT_GROUPS};
pub use timer::{TimerSource, TIMER_COUNT};

/// Physical base address of the Gavin register window.
pub const GAVIN_BASE: u32 = 0xFEC0_0000;

pub const MAU_DATA: usize = 0x040; // Head of the MAU keyboard queue. Reading clears it.

pub const RTC_START: usize = 0x080;
pub const RTC_END: usize = 0x09F;

pub const ICR_START: usize = 0x100;
pub const ICR_END: usize = 0x11F;
pub const ICR_SIZE: usize = ICR_END - ICR_START + 1;
pub const ICR_PENDING_START: usize = 0x100; // Pending bank, one byte per group. Write 1 to clear.
pub const ICR_PENDING_END: usize = 0x105;
pub const ICR_MASK_START: usize = 0x118; // Mask bank, one byte per group. Set bit disables the line.
pub const ICR_MASK_END: usize = 0x11D;

/// Distance between a group's pending byte and its mask byte within the ICR.
pub const ICR_MASK_OFFSET: usize = ICR_MASK_START - ICR_PENDING_START;
/// Number of interrupt registers in each bank.
pub const ICR_REGISTER_COUNT: usize = ICR_PENDING_END - ICR_PENDING_START + 1;

pub const TIMER_CONTROL0: usize = 0x200;
pub const TIMER_CONTROL1: usize = 0x204;
pub const TIMER_START: usize = 0x208;
pub const TIMER_END: usize = TIMER_START + (TIMER_COUNT << 3) - 1;

// The legacy PS/2 port is not emulated. It always reads back as zero.
pub const PS2_START: usize = 0x2060;
pub const PS2_END: usize = 0x2067;

const OPEN_BUS: u32 = 0xFF;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessSize {
    Byte,
    Word,
    Long,
}

/// Gavin register state. One instance per emulated machine.
pub struct Gavin {
    icr: [u8; ICR_SIZE],        // Interrupt control registers (pending + mask banks)
    mau_queue: u8,              // Single slot keyboard queue. 0 when empty.
    timers: [u32; TIMER_COUNT], // Free running counters
}

impl Default for Gavin {
    fn default() -> Self {
        Self {
            icr: [0; ICR_SIZE],
            mau_queue: 0,
            timers: [0; TIMER_COUNT],
        }
    }
}

impl Gavin {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn reset(&mut self) {
        log::info!("Gavin: Reset");
        *self = Default::default();
    }

    /// Handle a read from the Gavin window. `offset` is relative to GAVIN_BASE and `memory` is
    /// the backing store for the window.
    pub fn read(&mut self, offset: usize, memory: &mut [u8], size: AccessSize) -> u32 {
        log::trace!("Gavin: Read {:04X} ({:?})", offset, size);
        match offset {
            ICR_START..=ICR_END => self.icr[offset - ICR_START] as u32,
            PS2_START..=PS2_END => 0,
            MAU_DATA => self.read_mau() as u32,
            TIMER_START..=TIMER_END if offset & 7 == 0 => self.timers[(offset - TIMER_START) >> 3],
            RTC_START..=RTC_END => {
                // The RTC isn't clocked. Sample the host clock into the window before the read.
                rtc::snapshot(memory, &chrono::Local::now());
                Gavin::read_memory(memory, offset)
            }
            _ => Gavin::read_memory(memory, offset),
        }
    }

    /// Handle a write to the Gavin window. Returns false if Gavin does not manage the register,
    /// in which case the caller should perform a plain memory store.
    pub fn write(&mut self, offset: usize, value: u32, size: AccessSize) -> bool {
        log::trace!("Gavin: Write {:04X} <- {:08X} ({:?})", offset, value, size);
        match offset {
            ICR_PENDING_START..=ICR_PENDING_END => {
                self.icr[offset - ICR_START] &= !(value as u8);
                true
            }
            ICR_MASK_START..=ICR_MASK_END => {
                self.icr[offset - ICR_START] = value as u8;
                true
            }
            TIMER_START..=TIMER_END if offset & 7 == 0 => {
                self.timers[(offset - TIMER_START) >> 3] = value;
                true
            }
            _ => false,
        }
    }

    #[inline]
    fn read_memory(memory: &[u8], offset: usize) -> u32 {
        memory.get(offset).map_or(OPEN_BUS, |b| *b as u32)
    }

    /// Set bits in a group's pending byte.
    pub fn flag_interrupt(&mut self, register: usize, bits: u8) {
        if register < ICR_REGISTER_COUNT {
            self.icr[register] |= bits;
        }
        else {
            log::warn!("Gavin: Interrupt flagged on bad register {}", register);
        }
    }

    /// Place a keyboard event in the MAU queue. Any unread event is overwritten.
    pub fn insert_mau(&mut self, event: u8) {
        if self.mau_queue != 0 {
            log::trace!("Gavin: MAU event {:02X} dropped, replaced by {:02X}", self.mau_queue, event);
        }
        self.mau_queue = event;
    }

    /// Read and clear the head of the MAU queue.
    pub fn read_mau(&mut self) -> u8 {
        std::mem::take(&mut self.mau_queue)
    }

    pub fn peek_mau(&self) -> u8 {
        self.mau_queue
    }

    /// A group's pending byte. Registers outside the bank read as 0.
    pub fn pending(&self, register: usize) -> u8 {
        self.icr_byte(register, 0)
    }

    /// A group's mask byte. Registers outside the bank read as 0.
    pub fn mask(&self, register: usize) -> u8 {
        self.icr_byte(register, ICR_MASK_OFFSET)
    }

    fn icr_byte(&self, register: usize, bank: usize) -> u8 {
        if register < ICR_REGISTER_COUNT {
            self.icr[register + bank]
        }
        else {
            log::warn!("Gavin: Read of bad interrupt register {}", register);
            0
        }
    }

    pub fn icr(&self) -> &[u8; ICR_SIZE] {
        &self.icr
    }

    /// Current count of a timer. Timers that don't exist read as 0.
    pub fn timer(&self, index: usize) -> u32 {
        self.timers.get(index).copied().unwrap_or_else(|| {
            log::warn!("Gavin: Read of bad timer {}", index);
            0
        })
    }

    pub fn timers(&self) -> &[u32; TIMER_COUNT] {
        &self.timers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: usize = 0x4000;

    #[test]
    fn pending_write_clears_set_bits() {
        let mut gavin = Gavin::new();
        for register in 0..=(ICR_PENDING_END - ICR_PENDING_START) {
            gavin.flag_interrupt(register, 0b1011_0110);
            assert!(gavin.write(ICR_PENDING_START + register, 0b0010_0100, AccessSize::Byte));
            assert_eq!(gavin.pending(register), 0b1001_0010);
            // Writing zero leaves the byte alone.
            assert!(gavin.write(ICR_PENDING_START + register, 0, AccessSize::Byte));
            assert_eq!(gavin.pending(register), 0b1001_0010);
        }
    }

    #[test]
    fn mask_write_replaces_byte() {
        let mut gavin = Gavin::new();
        let mut memory = vec![0u8; WINDOW];

        assert!(gavin.write(ICR_MASK_START + 2, 0xF0, AccessSize::Byte));
        assert!(gavin.write(ICR_MASK_START + 2, 0x0C, AccessSize::Byte));
        assert_eq!(gavin.mask(2), 0x0C);
        assert_eq!(gavin.read(ICR_MASK_START + 2, &mut memory, AccessSize::Byte), 0x0C);
    }

    #[test]
    fn icr_reads_do_not_touch_memory() {
        let mut gavin = Gavin::new();
        let mut memory = vec![0xAAu8; WINDOW];
        gavin.flag_interrupt(3, 0x02);

        assert_eq!(gavin.read(ICR_PENDING_START + 3, &mut memory, AccessSize::Byte), 0x02);
        assert_eq!(gavin.read(ICR_START + 0x10, &mut memory, AccessSize::Byte), 0);
        assert!(memory.iter().all(|b| *b == 0xAA));
    }

    #[test]
    fn unmanaged_writes_fall_through() {
        let mut gavin = Gavin::new();
        // Between the pending and mask banks
        assert!(!gavin.write(ICR_START + 0x10, 0xFF, AccessSize::Byte));
        assert!(!gavin.write(TIMER_CONTROL0, 0x0001, AccessSize::Long));
        assert!(!gavin.write(TIMER_START + 1, 0x1234, AccessSize::Byte));
        assert!(!gavin.write(0x0010, 0x55, AccessSize::Byte));
        assert!(!gavin.write(MAU_DATA, 0x55, AccessSize::Byte));
    }

    #[test]
    fn plain_reads_come_from_memory() {
        let mut gavin = Gavin::new();
        let mut memory = vec![0u8; WINDOW];
        memory[0x0010] = 0x5A;
        memory[TIMER_START + 1] = 0x33;

        assert_eq!(gavin.read(0x0010, &mut memory, AccessSize::Byte), 0x5A);
        assert_eq!(gavin.read(TIMER_START + 1, &mut memory, AccessSize::Byte), 0x33);
        assert_eq!(gavin.read(WINDOW + 4, &mut memory, AccessSize::Byte), OPEN_BUS);
    }

    #[test]
    fn timer_registers_are_aligned() {
        let mut gavin = Gavin::new();
        let mut memory = vec![0u8; WINDOW];

        for i in 0..TIMER_COUNT {
            assert!(gavin.write(TIMER_START + (i << 3), 0x1000 + i as u32, AccessSize::Long));
        }
        for i in 0..TIMER_COUNT {
            assert_eq!(gavin.timer(i), 0x1000 + i as u32);
            assert_eq!(gavin.read(TIMER_START + (i << 3), &mut memory, AccessSize::Long), 0x1000 + i as u32);
        }
    }

    #[test]
    fn ps2_port_reads_zero() {
        let mut gavin = Gavin::new();
        let mut memory = vec![0xFFu8; WINDOW * 4];
        assert_eq!(gavin.read(PS2_START, &mut memory, AccessSize::Byte), 0);
        assert_eq!(gavin.read(PS2_END, &mut memory, AccessSize::Byte), 0);
    }

    #[test]
    fn mau_read_clears_slot() {
        let mut gavin = Gavin::new();
        let mut memory = vec![0u8; WINDOW];
        gavin.insert_mau(0x1E);

        assert_eq!(gavin.read(MAU_DATA, &mut memory, AccessSize::Byte), 0x1E);
        assert_eq!(gavin.read(MAU_DATA, &mut memory, AccessSize::Byte), 0);
    }

    #[test]
    fn mau_slot_keeps_latest_event() {
        let mut gavin = Gavin::new();
        gavin.insert_mau(0x1E);
        gavin.insert_mau(0x30);
        assert_eq!(gavin.read_mau(), 0x30);
        assert_eq!(gavin.read_mau(), 0);
    }

    #[test]
    fn bad_register_accessors_read_zero() {
        let mut gavin = Gavin::new();
        gavin.write(ICR_MASK_START + 5, 0x81, AccessSize::Byte);
        gavin.flag_interrupt(ICR_REGISTER_COUNT, 0xFF);

        assert_eq!(gavin.mask(5), 0x81);
        assert_eq!(gavin.mask(ICR_REGISTER_COUNT), 0);
        assert_eq!(gavin.mask(8), 0);
        assert_eq!(gavin.pending(ICR_REGISTER_COUNT), 0);
        assert_eq!(gavin.pending(usize::MAX), 0);
        assert_eq!(gavin.timer(TIMER_COUNT), 0);
        // The out of range flag landed nowhere.
        assert!(gavin.icr()[..ICR_MASK_OFFSET].iter().all(|b| *b == 0));
    }

    #[test]
    fn reset_clears_state() {
        let mut gavin = Gavin::new();
        gavin.flag_interrupt(0, 0xFF);
        gavin.write(ICR_MASK_START, 0xFF, AccessSize::Byte);
        gavin.write(TIMER_START, 99, AccessSize::Long);
        gavin.insert_mau(0x10);

        gavin.reset();
        assert!(gavin.icr().iter().all(|b| *b == 0));
        assert!(gavin.timers().iter().all(|t| *t == 0));
        assert_eq!(gavin.peek_mau(), 0);
    }
}
