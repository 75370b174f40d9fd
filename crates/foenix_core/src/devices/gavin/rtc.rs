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

    devices::gavin::rtc.rs

    Real time clock read side.
    
    The RTC has no state of its own. Whenever software reads the RTC window
    the host's local time is written into the clock registers as BCD.

*/

use chrono::{Datelike, Timelike};

pub const RTC_SECONDS: usize = 0x80;
pub const RTC_MINUTES: usize = 0x82;
pub const RTC_HOURS: usize = 0x84;
pub const RTC_DAY: usize = 0x86;
pub const RTC_WEEKDAY: usize = 0x88; // 0 = Sunday
pub const RTC_MONTH: usize = 0x89; // 1-12, as the bq4802 clock chip counts months
pub const RTC_YEAR: usize = 0x8A; // Year modulo 100

/// Convert 0-99 to packed BCD.
#[inline]
pub fn to_bcd(n: u32) -> u8 {
    (((n / 10) << 4) | (n % 10)) as u8
}

#[inline]
pub fn from_bcd(bcd: u8) -> u32 {
    ((bcd >> 4) as u32) * 10 + (bcd & 0x0F) as u32
}

/// Write the clock fields of `now` into the RTC registers of the Gavin window.
pub fn snapshot<T: Datelike + Timelike>(memory: &mut [u8], now: &T) {
    let fields = [
        (RTC_SECONDS, now.second()),
        (RTC_MINUTES, now.minute()),
        (RTC_HOURS, now.hour()),
        (RTC_DAY, now.day()),
        (RTC_WEEKDAY, now.weekday().num_days_from_sunday()),
        (RTC_MONTH, now.month()),
        (RTC_YEAR, now.year().rem_euclid(100) as u32),
    ];

    for (offset, value) in fields {
        if let Some(byte) = memory.get_mut(offset) {
            *byte = to_bcd(value % 100);
        }
    }
}
