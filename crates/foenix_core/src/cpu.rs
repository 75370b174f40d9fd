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

    cpu.rs

    Interface to the CPU core.
    
    The instruction set emulation lives outside this crate. The debugger and
    Gavin only need the small set of operations defined here.

*/

/// 32-bit reads through the CPU's view of the address space.
pub trait MemoryBus {
    fn read_u32(&mut self, address: u32) -> u32;
}

/// Result of running the CPU for a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Execution stopped at a breakpoint or on an external halt request.
    BreakpointHit,
    /// A frame's worth of instructions was executed. `rate` is the frame rate
    /// the machine should be paced to.
    Frame { rate: u32 },
}

impl RunOutcome {
    /// Build an outcome from a raw frame rate, where 0 signals a breakpoint.
    pub fn from_rate(rate: u32) -> RunOutcome {
        match rate {
            0 => RunOutcome::BreakpointHit,
            rate => RunOutcome::Frame { rate },
        }
    }
}

pub trait CpuExecutor: MemoryBus {
    /// Reset the CPU to its power on state.
    fn reset(&mut self);

    /// The current program counter.
    fn program_counter(&self) -> u32;

    /// Default location for the data cursor.
    fn data_start(&self) -> u32 {
        0
    }

    /// Execute exactly one instruction.
    fn single_step(&mut self);

    /// Run a frame, stopping early if execution reaches `breakpoint` or `step_breakpoint`.
    fn run_until(&mut self, breakpoint: u32, step_breakpoint: u32) -> RunOutcome;

    /// If the instruction at `address` is a subroutine call, return the address of the
    /// instruction following it.
    fn address_after_call(&mut self, address: u32) -> Option<u32>;

    /// Assert the given interrupt level on the CPU.
    fn signal_interrupt(&mut self, level: u8);
}
