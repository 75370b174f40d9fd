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

    keys.rs

    Host key definitions.
    
    HostKey names the keys a display surface can report as held. Scancodes
    are USB HID usage IDs, which is what SDL and most host layers deliver.

*/

use serde::Deserialize;
use strum_macros::EnumIter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Deserialize)]
pub enum HostKey {
    Up,
    Down,
    Left,
    Right,
    Return,
    Backspace,
    Tab,
    Delete,
    Insert,
    LShift,
    RShift,
    Shift, // Either shift key
    Control,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Minus,
    Backslash,
    Quote,
    LeftBracket,
    RightBracket,
    Semicolon,
    Period,
    Comma,
    Slash,
    Hash,
    Equals,
    Space,
}

impl HostKey {
    pub fn is_modifier(&self) -> bool {
        matches!(self, HostKey::LShift | HostKey::RShift | HostKey::Shift | HostKey::Control)
    }

    /// Value of the key as a hexadecimal digit, if it is one.
    pub fn hex_digit(&self) -> Option<u8> {
        use HostKey::*;
        let digit = match self {
            Key0 => 0,
            Key1 => 1,
            Key2 => 2,
            Key3 => 3,
            Key4 => 4,
            Key5 => 5,
            Key6 => 6,
            Key7 => 7,
            Key8 => 8,
            Key9 => 9,
            A => 0xA,
            B => 0xB,
            C => 0xC,
            D => 0xD,
            E => 0xE,
            F => 0xF,
            _ => return None,
        };
        Some(digit)
    }

    /// USB HID usage ID of the physical key. `Shift` is virtual and has none.
    pub fn scancode(&self) -> Option<u16> {
        use HostKey::*;
        let code = match self {
            Up => 0x52,
            Down => 0x51,
            Left => 0x50,
            Right => 0x4F,
            Return => 0x28,
            Backspace => 0x2A,
            Tab => 0x2B,
            Delete => 0x4C,
            Insert => 0x49,
            LShift => 0xE1,
            RShift => 0xE5,
            Shift => return None,
            Control => 0xE0,
            F1 => 0x3A,
            F2 => 0x3B,
            F3 => 0x3C,
            F4 => 0x3D,
            F5 => 0x3E,
            F6 => 0x3F,
            F7 => 0x40,
            F8 => 0x41,
            F9 => 0x42,
            F10 => 0x43,
            F11 => 0x44,
            F12 => 0x45,
            A => 0x04,
            B => 0x05,
            C => 0x06,
            D => 0x07,
            E => 0x08,
            F => 0x09,
            G => 0x0A,
            H => 0x0B,
            I => 0x0C,
            J => 0x0D,
            K => 0x0E,
            L => 0x0F,
            M => 0x10,
            N => 0x11,
            O => 0x12,
            P => 0x13,
            Q => 0x14,
            R => 0x15,
            S => 0x16,
            T => 0x17,
            U => 0x18,
            V => 0x19,
            W => 0x1A,
            X => 0x1B,
            Y => 0x1C,
            Z => 0x1D,
            Key1 => 0x1E,
            Key2 => 0x1F,
            Key3 => 0x20,
            Key4 => 0x21,
            Key5 => 0x22,
            Key6 => 0x23,
            Key7 => 0x24,
            Key8 => 0x25,
            Key9 => 0x26,
            Key0 => 0x27,
            Minus => 0x2D,
            Equals => 0x2E,
            LeftBracket => 0x2F,
            RightBracket => 0x30,
            Backslash => 0x31,
            Hash => 0x32,
            Semicolon => 0x33,
            Quote => 0x34,
            Comma => 0x36,
            Period => 0x37,
            Slash => 0x38,
            Space => 0x2C,
        };
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn hex_digits() {
        let digits: Vec<u8> = HostKey::iter().filter_map(|k| k.hex_digit()).collect();
        assert_eq!(digits.len(), 16);
        assert_eq!(HostKey::Key7.hex_digit(), Some(7));
        assert_eq!(HostKey::F.hex_digit(), Some(0xF));
        assert_eq!(HostKey::G.hex_digit(), None);
        assert_eq!(HostKey::F5.hex_digit(), None);
    }

    #[test]
    fn scancodes_are_unique() {
        let mut seen = HashSet::new();
        for key in HostKey::iter() {
            if let Some(code) = key.scancode() {
                assert!(seen.insert(code), "{:?} reuses scancode {:02X}", key, code);
            }
        }
    }

    #[test]
    fn modifiers() {
        assert!(HostKey::Shift.is_modifier());
        assert!(HostKey::Control.is_modifier());
        assert!(!HostKey::Tab.is_modifier());
    }
}
