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

    debugger::pacing.rs

    Caps emulation speed to the frame rate reported by the CPU core.

*/

use std::thread;
use web_time::{Duration, Instant};

const WAIT_SLICE: Duration = Duration::from_millis(1);

#[derive(Default)]
pub struct FramePacer {
    next_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Block until the previously scheduled deadline, then schedule the next one `1000 / rate`
    /// milliseconds from now. A rate of zero disables pacing for the next frame.
    pub fn pace(&mut self, rate: u32) {
        if let Some(deadline) = self.next_frame {
            while Instant::now() < deadline {
                thread::sleep(WAIT_SLICE);
            }
        }

        self.next_frame = match rate {
            0 => None,
            rate => Some(Instant::now() + Duration::from_millis(1000 / rate as u64)),
        };
    }

    pub fn next_frame(&self) -> Option<Instant> {
        self.next_frame
    }

    pub fn reset(&mut self) {
        self.next_frame = None;
    }
}
