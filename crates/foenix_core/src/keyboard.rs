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

    keyboard.rs

    Routes host key transitions into Gavin's MAU queue.
    
    Host scancodes (USB HID usage IDs) are translated to PS/2 set 1 make
    codes, which is what the A2560K firmware expects to find in the queue.

*/

use std::collections::HashSet;

use crate::{
    cpu::CpuExecutor,
    devices::gavin::{Gavin, InterruptGroup},
};

/// Set on a MAU event when the key was released.
pub const MAU_RELEASE_BIT: u8 = 0x80;

/// SuperIO line used by the keyboard.
pub const KEYBOARD_INTERRUPT_BIT: u8 = 0x02;

/// Host scancode for each PS/2 set 1 make code. The index is the value placed in the MAU queue.
pub const MAU_SCANCODE_TABLE: [Option<u16>; 0x59] = [
    None,       // 00
    Some(0x29), // 01 Escape
    Some(0x1E), // 02 1
    Some(0x1F), // 03 2
    Some(0x20), // 04 3
    Some(0x21), // 05 4
    Some(0x22), // 06 5
    Some(0x23), // 07 6
    Some(0x24), // 08 7
    Some(0x25), // 09 8
    Some(0x26), // 0A 9
    Some(0x27), // 0B 0
    Some(0x2D), // 0C -
    Some(0x2E), // 0D =
    Some(0x2A), // 0E Backspace
    Some(0x2B), // 0F Tab
    Some(0x14), // 10 Q
    Some(0x1A), // 11 W
    Some(0x08), // 12 E
    Some(0x15), // 13 R
    Some(0x17), // 14 T
    Some(0x1C), // 15 Y
    Some(0x18), // 16 U
    Some(0x0C), // 17 I
    Some(0x12), // 18 O
    Some(0x13), // 19 P
    Some(0x2F), // 1A [
    Some(0x30), // 1B ]
    Some(0x28), // 1C Return
    Some(0xE0), // 1D Left control
    Some(0x04), // 1E A
    Some(0x16), // 1F S
    Some(0x07), // 20 D
    Some(0x09), // 21 F
    Some(0x0A), // 22 G
    Some(0x0B), // 23 H
    Some(0x0D), // 24 J
    Some(0x0E), // 25 K
    Some(0x0F), // 26 L
    Some(0x33), // 27 ;
    Some(0x34), // 28 '
    Some(0x35), // 29 `
    Some(0xE1), // 2A Left shift
    Some(0x31), // 2B Backslash
    Some(0x1D), // 2C Z
    Some(0x1B), // 2D X
    Some(0x06), // 2E C
    Some(0x19), // 2F V
    Some(0x05), // 30 B
    Some(0x11), // 31 N
    Some(0x10), // 32 M
    Some(0x36), // 33 ,
    Some(0x37), // 34 .
    Some(0x38), // 35 /
    Some(0xE5), // 36 Right shift
    Some(0x55), // 37 Keypad *
    Some(0xE2), // 38 Left alt
    Some(0x2C), // 39 Space
    Some(0x39), // 3A Caps lock
    Some(0x3A), // 3B F1
    Some(0x3B), // 3C F2
    Some(0x3C), // 3D F3
    Some(0x3D), // 3E F4
    Some(0x3E), // 3F F5
    Some(0x3F), // 40 F6
    Some(0x40), // 41 F7
    Some(0x41), // 42 F8
    Some(0x42), // 43 F9
    Some(0x43), // 44 F10
    Some(0x53), // 45 Num lock
    Some(0x47), // 46 Scroll lock
    Some(0x5F), // 47 Keypad 7
    Some(0x60), // 48 Keypad 8
    Some(0x61), // 49 Keypad 9
    Some(0x56), // 4A Keypad -
    Some(0x5C), // 4B Keypad 4
    Some(0x5D), // 4C Keypad 5
    Some(0x5E), // 4D Keypad 6
    Some(0x57), // 4E Keypad +
    Some(0x59), // 4F Keypad 1
    Some(0x5A), // 50 Keypad 2
    Some(0x5B), // 51 Keypad 3
    Some(0x62), // 52 Keypad 0
    Some(0x63), // 53 Keypad .
    None,       // 54
    None,       // 55
    Some(0x64), // 56 Non-US backslash
    Some(0x44), // 57 F11
    Some(0x45), // 58 F12
];

/// Host scancodes of F1 to F10. The debugger owns these keys by default.
pub const DEFAULT_RESERVED_SCANCODES: [u16; 10] = [0x3A, 0x3B, 0x3C, 0x3D, 0x3E, 0x3F, 0x40, 0x41, 0x42, 0x43];

/// Translate a host scancode to a MAU event index.
pub fn mau_index(scancode: u16) -> Option<u8> {
    MAU_SCANCODE_TABLE
        .iter()
        .position(|entry| *entry == Some(scancode))
        .map(|index| index as u8)
}

pub struct KeyboardRouter {
    reserved: HashSet<u16>,
}

impl Default for KeyboardRouter {
    fn default() -> Self {
        Self::with_reserved(DEFAULT_RESERVED_SCANCODES)
    }
}

impl KeyboardRouter {
    pub fn new() -> Self {
        Default::default()
    }

    /// Build a router that withholds the given host scancodes from the emulated machine.
    pub fn with_reserved(reserved: impl IntoIterator<Item = u16>) -> Self {
        Self {
            reserved: reserved.into_iter().collect(),
        }
    }

    pub fn is_reserved(&self, scancode: u16) -> bool {
        self.reserved.contains(&scancode)
    }

    /// Deliver a host key transition to the emulated machine. Returns the MAU event queued, or None
    /// if the key is reserved or has no PS/2 equivalent.
    pub fn on_scan_code<C: CpuExecutor + ?Sized>(
        &self,
        gavin: &mut Gavin,
        cpu: &mut C,
        scancode: u16,
        key_down: bool,
    ) -> Option<u8> {
        if self.is_reserved(scancode) {
            return None;
        }

        let Some(index) = mau_index(scancode)
        else {
            log::trace!("Keyboard: No MAU mapping for scancode {:02X}", scancode);
            return None;
        };

        let event = if key_down { index } else { index | MAU_RELEASE_BIT };
        log::trace!("Keyboard: scancode {:02X} -> MAU event {:02X}", scancode, event);

        gavin.insert_mau(event);
        gavin.flag_interrupt(InterruptGroup::SuperIo.register(), KEYBOARD_INTERRUPT_BIT);
        cpu.signal_interrupt(InterruptGroup::SuperIo.level());
        Some(event)
    }
}
