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

    devices::gavin::interrupt.rs

    Interrupt priority resolution and vector identification for Gavin's
    interrupt control registers.

*/

use super::Gavin;

/// Value returned to the CPU core when an acknowledged interrupt can't be matched to a
/// pending line. The CPU core should treat it as an autovectored (effectively ignored) interrupt.
pub const AUTOVECTOR_ACK: u32 = 0xFFFF_FFFF;

const USER_VECTOR_BASE: i32 = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InterruptGroup {
    VickyB,
    VickyA,
    SuperIo,
    Timer,
}

#[derive(Copy, Clone, Debug)]
pub struct InterruptGroupDesc {
    pub group: InterruptGroup,
    pub register: usize, // Index of the group's pending byte; the mask byte follows at ICR_MASK_OFFSET
    pub level: u8,       // 68000 interrupt level the group is wired to
}

/// Interrupt groups in descending priority order.
pub const INTERRUPT_GROUPS: [InterruptGroupDesc; 4] = [
    InterruptGroupDesc {
        group: InterruptGroup::VickyB,
        register: 0,
        level: 6,
    },
    InterruptGroupDesc {
        group: InterruptGroup::VickyA,
        register: 1,
        level: 5,
    },
    InterruptGroupDesc {
        group: InterruptGroup::SuperIo,
        register: 3,
        level: 4,
    },
    InterruptGroupDesc {
        group: InterruptGroup::Timer,
        register: 2,
        level: 3,
    },
];

impl InterruptGroup {
    pub fn desc(&self) -> &'static InterruptGroupDesc {
        match self {
            InterruptGroup::VickyB => &INTERRUPT_GROUPS[0],
            InterruptGroup::VickyA => &INTERRUPT_GROUPS[1],
            InterruptGroup::SuperIo => &INTERRUPT_GROUPS[2],
            InterruptGroup::Timer => &INTERRUPT_GROUPS[3],
        }
    }

    pub fn register(&self) -> usize {
        self.desc().register
    }

    pub fn level(&self) -> u8 {
        self.desc().level
    }

    pub fn from_level(level: u8) -> Option<InterruptGroup> {
        INTERRUPT_GROUPS.iter().find(|d| d.level == level).map(|d| d.group)
    }

    /// First vector of the group's block of eight user vectors.
    pub fn vector_base(&self) -> u8 {
        (USER_VECTOR_BASE + (4 - self.level() as i32) * 8) as u8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InterruptVector {
    Vector(u8),
    Autovector,
}

impl InterruptVector {
    /// The value handed back to the CPU core's interrupt acknowledge callback.
    pub fn ack_value(&self) -> u32 {
        match self {
            InterruptVector::Vector(v) => *v as u32,
            InterruptVector::Autovector => AUTOVECTOR_ACK,
        }
    }
}

impl Gavin {
    /// Return the highest priority group with a line that is both pending and not masked.
    pub fn highest_pending_interrupt(&self) -> Option<InterruptGroup> {
        INTERRUPT_GROUPS
            .iter()
            .find(|d| self.pending(d.register) & !self.mask(d.register) != 0)
            .map(|d| d.group)
    }

    /// The 68000 interrupt level Gavin is currently requesting, if any.
    pub fn interrupt_level(&self) -> Option<u8> {
        self.highest_pending_interrupt().map(|g| g.level())
    }

    /// Resolve the vector for an acknowledged interrupt level. The lowest numbered line of the
    /// level's group that is pending and not masked selects a vector within the group's block.
    pub fn identify_vector(&self, level: u8) -> InterruptVector {
        let Some(group) = InterruptGroup::from_level(level)
        else {
            log::warn!("Gavin: IRQ {} has no interrupt register", level);
            return InterruptVector::Autovector;
        };

        let register = group.register();
        let active = self.pending(register) & !self.mask(register);
        if active == 0 {
            log::warn!("Gavin: IRQ {} register {} has no active line", level, register);
            return InterruptVector::Autovector;
        }

        InterruptVector::Vector(group.vector_base() + active.trailing_zeros() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::gavin::{AccessSize, ICR_MASK_START};

    fn expected_highest(pending: [u8; 4], mask: [u8; 4]) -> Option<InterruptGroup> {
        // Registers 0, 1, 3, 2 in priority order.
        [
            (0, InterruptGroup::VickyB),
            (1, InterruptGroup::VickyA),
            (3, InterruptGroup::SuperIo),
            (2, InterruptGroup::Timer),
        ]
        .iter()
        .find(|(r, _)| pending[*r] & !mask[*r] != 0)
        .map(|(_, g)| *g)
    }

    #[test]
    fn no_interrupt_when_idle() {
        let gavin = Gavin::new();
        assert_eq!(gavin.highest_pending_interrupt(), None);
        assert_eq!(gavin.interrupt_level(), None);
    }

    #[test]
    fn priority_order_holds_for_all_combinations() {
        let patterns = [0x00u8, 0x01, 0x80, 0x24, 0xFF];
        for active in 0u8..16 {
            for mask_pattern in patterns {
                let mut gavin = Gavin::new();
                let mut pending = [0u8; 4];
                let mut mask = [0u8; 4];
                for r in 0..4 {
                    if active & (1 << r) != 0 {
                        pending[r] = 0x81;
                        gavin.flag_interrupt(r, 0x81);
                    }
                    // Vary the mask per register so some groups are fully masked.
                    mask[r] = mask_pattern.rotate_left(r as u32);
                    gavin.write(ICR_MASK_START + r, mask[r] as u32, AccessSize::Byte);
                }
                assert_eq!(
                    gavin.highest_pending_interrupt(),
                    expected_highest(pending, mask),
                    "pending {:?} mask {:?}",
                    pending,
                    mask
                );
            }
        }
    }

    #[test]
    fn superio_beats_timer() {
        let mut gavin = Gavin::new();
        gavin.flag_interrupt(InterruptGroup::Timer.register(), 0x01);
        assert_eq!(gavin.interrupt_level(), Some(3));
        gavin.flag_interrupt(InterruptGroup::SuperIo.register(), 0x02);
        assert_eq!(gavin.interrupt_level(), Some(4));
        gavin.write(ICR_MASK_START + InterruptGroup::SuperIo.register(), 0x02, AccessSize::Byte);
        assert_eq!(gavin.interrupt_level(), Some(3));
    }

    #[test]
    fn vector_uses_lowest_pending_bit() {
        let mut gavin = Gavin::new();
        gavin.flag_interrupt(InterruptGroup::SuperIo.register(), 0b0000_0110);
        assert_eq!(gavin.identify_vector(4), InterruptVector::Vector(65));

        gavin.flag_interrupt(InterruptGroup::Timer.register(), 0b1000_0000);
        assert_eq!(gavin.identify_vector(3), InterruptVector::Vector(72 + 7));
        assert_eq!(gavin.identify_vector(3).ack_value(), 79);
    }

    #[test]
    fn vector_skips_masked_lines() {
        let mut gavin = Gavin::new();
        let register = InterruptGroup::SuperIo.register();
        gavin.flag_interrupt(register, 0b011);
        gavin.write(ICR_MASK_START + register, 0b001, AccessSize::Byte);

        assert_eq!(gavin.interrupt_level(), Some(4));
        assert_eq!(gavin.identify_vector(4), InterruptVector::Vector(65));

        // Masking the remaining line leaves nothing to acknowledge.
        gavin.write(ICR_MASK_START + register, 0b011, AccessSize::Byte);
        assert_eq!(gavin.interrupt_level(), None);
        assert_eq!(gavin.identify_vector(4), InterruptVector::Autovector);
    }

    #[test]
    fn vector_bases() {
        assert_eq!(InterruptGroup::VickyB.vector_base(), 48);
        assert_eq!(InterruptGroup::VickyA.vector_base(), 56);
        assert_eq!(InterruptGroup::SuperIo.vector_base(), 64);
        assert_eq!(InterruptGroup::Timer.vector_base(), 72);
    }

    #[test]
    fn unmatched_level_autovectors() {
        let mut gavin = Gavin::new();
        // Level without a group
        assert_eq!(gavin.identify_vector(7), InterruptVector::Autovector);
        assert_eq!(gavin.identify_vector(0).ack_value(), AUTOVECTOR_ACK);
        // Level with a group but nothing pending
        assert_eq!(gavin.identify_vector(4), InterruptVector::Autovector);
        gavin.flag_interrupt(InterruptGroup::VickyA.register(), 0x10);
        assert_eq!(gavin.identify_vector(5), InterruptVector::Vector(56 + 4));
    }
}
