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

    devices::gavin::timer.rs

    Gavin's free running timers.
    
    Each timer counts either CPU cycles or video frames while its enable bit
    is set in one of the two timer control words. There is no compare or
    reload logic; the counters simply wrap.

*/

use super::{Gavin, GAVIN_BASE, TIMER_CONTROL0, TIMER_CONTROL1};
use crate::cpu::MemoryBus;

pub const TIMER_COUNT: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerSource {
    Cycles,
    Frames,
}

#[derive(Copy, Clone, Debug)]
struct TimerDesc {
    control: usize,   // Which control word holds the enable bit (0 or 1)
    enable_mask: u32, // Any set bit enables the timer
    source: TimerSource,
}

const TIMERS: [TimerDesc; TIMER_COUNT] = [
    TimerDesc {
        control: 0,
        enable_mask: 0x0000_0001,
        source: TimerSource::Cycles,
    },
    TimerDesc {
        control: 0,
        enable_mask: 0x0000_0100,
        source: TimerSource::Cycles,
    },
    // Timer 2 also runs when bit 16 is set.
    TimerDesc {
        control: 0,
        enable_mask: 0x0001_0001,
        source: TimerSource::Cycles,
    },
    TimerDesc {
        control: 1,
        enable_mask: 0x0000_0001,
        source: TimerSource::Frames,
    },
    TimerDesc {
        control: 1,
        enable_mask: 0x0000_0100,
        source: TimerSource::Frames,
    },
];

impl Gavin {
    /// Advance the timers by one execution slice. The control words are fetched through the
    /// CPU's view of memory, as the CPU core owns the backing store for them.
    pub fn update_timers<B: MemoryBus + ?Sized>(&mut self, bus: &mut B, cycles: u32, frames: u32) {
        let control = [
            bus.read_u32(GAVIN_BASE + TIMER_CONTROL0 as u32),
            bus.read_u32(GAVIN_BASE + TIMER_CONTROL1 as u32),
        ];

        for (timer, desc) in self.timers.iter_mut().zip(TIMERS.iter()) {
            if control[desc.control] & desc.enable_mask != 0 {
                let delta = match desc.source {
                    TimerSource::Cycles => cycles,
                    TimerSource::Frames => frames,
                };
                *timer = timer.wrapping_add(delta);
            }
        }
    }

    pub fn timer_source(index: usize) -> TimerSource {
        TIMERS[index].source
    }
}
