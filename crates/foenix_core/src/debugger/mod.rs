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

    debugger::mod.rs

    Implements the frame driven debugger.
    
    The frontend calls Debugger::frame() once per host frame. The debugger
    draws one of its two views, turns key edges into events, resolves them
    through the transition table and, while running, executes a frame of
    CPU time paced to the rate the CPU core reports.

*/

pub mod bindings;
pub mod pacing;
pub mod transitions;

pub use bindings::{DebugCommand, KeyBindings};
pub use pacing::FramePacer;
pub use transitions::{DebugAction, DebugEvent, DebuggerState};

use strum::IntoEnumIterator;

use crate::{
    cpu::{CpuExecutor, RunOutcome},
    display::{DebugCursors, DebugSurface},
    keys::HostKey,
};

/// Breakpoint address that execution can never reach.
pub const NO_BREAKPOINT: u32 = 0xFFFF_FFFE;

pub const DEFAULT_RADIX: u32 = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CursorSelect {
    Code,
    Data,
    Other,
}

/// Data an event carries into its action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Operand {
    Empty,
    Key(HostKey),
    Address(u32),
}

pub struct Debugger {
    initialised: bool,
    state: DebuggerState,
    cursors: DebugCursors,
    step_breakpoint: u32, // Transient breakpoint used by step over
    last_key: Option<HostKey>,
    frame_rate: u32, // Rate reported by the last completed frame
    bindings: KeyBindings,
    radix: u32,
    pacer: FramePacer,
}

impl Default for Debugger {
    fn default() -> Self {
        Self {
            initialised: false,
            state: DebuggerState::Halted,
            cursors: DebugCursors {
                code: 0,
                data: 0,
                other: 0,
                breakpoint: NO_BREAKPOINT,
            },
            step_breakpoint: NO_BREAKPOINT,
            last_key: None,
            frame_rate: 0,
            bindings: KeyBindings::default(),
            radix: DEFAULT_RADIX,
            pacer: FramePacer::default(),
        }
    }
}

impl Debugger {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Set the radix digits are shifted into the cursors with. Values outside 2..=16 are ignored.
    pub fn set_radix(&mut self, radix: u32) {
        if (2..=16).contains(&radix) {
            self.radix = radix;
        }
        else {
            log::warn!("Debugger: Ignoring unsupported cursor radix {}", radix);
        }
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn state(&self) -> DebuggerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DebuggerState::Running
    }

    pub fn cursors(&self) -> &DebugCursors {
        &self.cursors
    }

    pub fn step_breakpoint(&self) -> u32 {
        self.step_breakpoint
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Shift a digit into the low end of a cursor value.
    pub fn shift_in(&self, value: u32, digit: u8) -> u32 {
        shift_digit(value, digit, self.radix)
    }

    /// Run one host frame of the debugger.
    pub fn frame<C, S>(&mut self, cpu: &mut C, surface: &mut S, auto_start: bool, scale: u32)
    where
        C: CpuExecutor + ?Sized,
        S: DebugSurface + ?Sized,
    {
        if !self.initialised {
            self.initialise(cpu, auto_start);
        }

        if self.is_running() || self.command_held(surface, DebugCommand::Show) {
            surface.render_system_view(&self.cursors, scale);
        }
        else {
            surface.render_cpu_view(&self.cursors, scale);
        }

        // Modifiers only qualify other keys, they never count as a press of their own.
        let current_key = HostKey::iter()
            .filter(|key| !key.is_modifier() && surface.is_key_pressed(*key))
            .last();

        if current_key != self.last_key {
            self.last_key = current_key;
            if let Some(key) = current_key {
                self.handle_key_edge(key, cpu, surface);
            }
        }

        if self.is_running() {
            let event = match cpu.run_until(self.cursors.breakpoint, self.step_breakpoint) {
                RunOutcome::BreakpointHit => DebugEvent::BreakpointHit,
                RunOutcome::Frame { rate } => {
                    self.frame_rate = rate;
                    DebugEvent::FrameComplete
                }
            };
            self.dispatch(DebuggerState::Running, event, Operand::Empty, cpu, surface);
            self.cursors.code = cpu.program_counter();
        }
    }

    fn initialise<C: CpuExecutor + ?Sized>(&mut self, cpu: &mut C, auto_start: bool) {
        self.initialised = true;
        self.state = if auto_start {
            DebuggerState::Running
        }
        else {
            DebuggerState::Halted
        };
        self.cursors = DebugCursors {
            code: cpu.program_counter(),
            data: cpu.data_start(),
            other: 0,
            breakpoint: NO_BREAKPOINT,
        };
        self.step_breakpoint = NO_BREAKPOINT;
        self.last_key = None;
        log::debug!(
            "Debugger: Initialised in {:?}, pc: {:08X}",
            self.state,
            self.cursors.code
        );
    }

    fn command_held<S: DebugSurface + ?Sized>(&self, surface: &S, command: DebugCommand) -> bool {
        surface.is_key_pressed(self.bindings.key(command))
    }

    /// Every held command key is resolved against the state the debugger was in when the key
    /// edge arrived.
    fn handle_key_edge<C, S>(&mut self, key: HostKey, cpu: &mut C, surface: &mut S)
    where
        C: CpuExecutor + ?Sized,
        S: DebugSurface + ?Sized,
    {
        let entry = self.state;

        if self.command_held(surface, DebugCommand::Reset) {
            self.dispatch(entry, DebugEvent::Reset, Operand::Key(key), cpu, surface);
        }

        match entry {
            DebuggerState::Halted => {
                surface.set_frequency(0);

                if key.hex_digit().is_some_and(|digit| (digit as u32) < self.radix) {
                    self.dispatch(entry, DebugEvent::HexDigit, Operand::Key(key), cpu, surface);
                }
                if self.command_held(surface, DebugCommand::Home) {
                    self.dispatch(entry, DebugEvent::Home, Operand::Key(key), cpu, surface);
                }
                if self.command_held(surface, DebugCommand::Run) {
                    self.dispatch(entry, DebugEvent::Run, Operand::Key(key), cpu, surface);
                }
                if self.command_held(surface, DebugCommand::Step) {
                    self.dispatch(entry, DebugEvent::Step, Operand::Key(key), cpu, surface);
                }
                if self.command_held(surface, DebugCommand::StepOver) {
                    let (event, operand) = match cpu.address_after_call(self.cursors.code) {
                        Some(address) => (DebugEvent::StepOverCall, Operand::Address(address)),
                        None => (DebugEvent::StepOverInstruction, Operand::Key(key)),
                    };
                    self.dispatch(entry, event, operand, cpu, surface);
                }
                if self.command_held(surface, DebugCommand::SetBreakpoint) {
                    self.dispatch(entry, DebugEvent::SetBreakpoint, Operand::Key(key), cpu, surface);
                }
            }
            DebuggerState::Running => {
                if self.command_held(surface, DebugCommand::Break) {
                    self.dispatch(entry, DebugEvent::Break, Operand::Key(key), cpu, surface);
                }
            }
        }
    }

    fn dispatch<C, S>(
        &mut self,
        from: DebuggerState,
        event: DebugEvent,
        operand: Operand,
        cpu: &mut C,
        surface: &mut S,
    ) where
        C: CpuExecutor + ?Sized,
        S: DebugSurface + ?Sized,
    {
        let Some(transition) = transitions::lookup(from, event)
        else {
            return;
        };

        self.perform(transition.action, operand, cpu, surface);

        if let Some(next) = transition.next {
            if next != self.state {
                log::debug!("Debugger: {:?} -> {:?} on {:?}", self.state, next, event);
            }
            self.state = next;
        }
    }

    fn perform<C, S>(&mut self, action: DebugAction, operand: Operand, cpu: &mut C, surface: &mut S)
    where
        C: CpuExecutor + ?Sized,
        S: DebugSurface + ?Sized,
    {
        match action {
            DebugAction::ResetCpu => {
                log::debug!("Debugger: Resetting CPU");
                cpu.reset();
                self.cursors.code = cpu.program_counter();
                surface.set_frequency(0);
            }
            DebugAction::EditCursor => {
                if let Some(digit) = operand_digit(operand) {
                    let radix = self.radix;
                    let cursor = match Debugger::selected_cursor(surface) {
                        CursorSelect::Code => &mut self.cursors.code,
                        CursorSelect::Data => &mut self.cursors.data,
                        CursorSelect::Other => &mut self.cursors.other,
                    };
                    *cursor = shift_digit(*cursor, digit, radix);
                }
            }
            DebugAction::HomeCursor | DebugAction::SyncCursor => {
                self.cursors.code = cpu.program_counter();
            }
            DebugAction::ClearStepBreakpoint => {
                self.step_breakpoint = NO_BREAKPOINT;
            }
            DebugAction::SingleStep => {
                cpu.single_step();
                self.cursors.code = cpu.program_counter();
            }
            DebugAction::ResumeToStepBreakpoint => {
                if let Operand::Address(address) = operand {
                    log::debug!("Debugger: Stepping over call, breaking at {:08X}", address);
                    self.step_breakpoint = address;
                }
            }
            DebugAction::SetBreakpoint => {
                log::debug!("Debugger: Breakpoint set at {:08X}", self.cursors.code);
                self.cursors.breakpoint = self.cursors.code;
            }
            DebugAction::PaceFrame => {
                self.pacer.pace(self.frame_rate);
            }
        }
    }

    /// Control selects the other cursor and wins over shift, which selects the data cursor.
    fn selected_cursor<S: DebugSurface + ?Sized>(surface: &S) -> CursorSelect {
        if surface.is_key_pressed(HostKey::Control) {
            CursorSelect::Other
        }
        else if [HostKey::Shift, HostKey::LShift, HostKey::RShift]
            .iter()
            .any(|key| surface.is_key_pressed(*key))
        {
            CursorSelect::Data
        }
        else {
            CursorSelect::Code
        }
    }
}

fn operand_digit(operand: Operand) -> Option<u8> {
    match operand {
        Operand::Key(key) => key.hex_digit(),
        _ => None,
    }
}

#[inline]
fn shift_digit(value: u32, digit: u8, radix: u32) -> u32 {
    value.wrapping_mul(radix).wrapping_add(digit as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_in_hex() {
        let debugger = Debugger::new();
        assert_eq!(debugger.shift_in(0x1234, 0xA), 0x1234A);
        assert_eq!(debugger.shift_in(0xFFFF_FFFF, 0x5), 0xFFFF_FFF5);
    }

    #[test]
    fn shift_in_other_radix() {
        let mut debugger = Debugger::new();
        debugger.set_radix(8);
        assert_eq!(debugger.shift_in(0o17, 3), 0o173);
        debugger.set_radix(1);
        assert_eq!(debugger.radix(), 8);
        debugger.set_radix(10);
        assert_eq!(debugger.shift_in(12, 7), 127);
    }

    struct Idle;

    impl crate::cpu::MemoryBus for Idle {
        fn read_u32(&mut self, _address: u32) -> u32 {
            0
        }
    }

    impl CpuExecutor for Idle {
        fn reset(&mut self) {}
        fn program_counter(&self) -> u32 {
            0x1000
        }
        fn single_step(&mut self) {}
        fn run_until(&mut self, _breakpoint: u32, _step_breakpoint: u32) -> RunOutcome {
            RunOutcome::BreakpointHit
        }
        fn address_after_call(&mut self, _address: u32) -> Option<u32> {
            None
        }
        fn signal_interrupt(&mut self, _level: u8) {}
    }

    impl DebugSurface for Idle {
        fn is_key_pressed(&self, _key: HostKey) -> bool {
            false
        }
        fn render_system_view(&mut self, _cursors: &DebugCursors, _scale: u32) {}
        fn render_cpu_view(&mut self, _cursors: &DebugCursors, _scale: u32) {}
        fn set_frequency(&mut self, _hz: u32) {}
    }

    #[test]
    fn step_breakpoint_only_changes_through_table() {
        let mut debugger = Debugger::new();
        let (mut cpu, mut surface) = (Idle, Idle);

        // No transition for a step over call while running.
        debugger.state = DebuggerState::Running;
        let from = debugger.state;
        debugger.dispatch(from, DebugEvent::StepOverCall, Operand::Address(0x2000), &mut cpu, &mut surface);
        assert_eq!(debugger.step_breakpoint(), NO_BREAKPOINT);

        debugger.state = DebuggerState::Halted;
        let from = debugger.state;
        debugger.dispatch(from, DebugEvent::StepOverCall, Operand::Address(0x2000), &mut cpu, &mut surface);
        assert_eq!(debugger.step_breakpoint(), 0x2000);
        assert!(debugger.is_running());

        // A plain instruction single steps and leaves the transient breakpoint alone.
        debugger.state = DebuggerState::Halted;
        let from = debugger.state;
        debugger.dispatch(from, DebugEvent::StepOverInstruction, Operand::Key(HostKey::F8), &mut cpu, &mut surface);
        assert_eq!(debugger.step_breakpoint(), 0x2000);
        assert_eq!(debugger.state(), DebuggerState::Halted);
    }

    #[test]
    fn starts_halted_with_no_breakpoints() {
        let debugger = Debugger::new();
        assert_eq!(debugger.state(), DebuggerState::Halted);
        assert_eq!(debugger.cursors().breakpoint, NO_BREAKPOINT);
        assert_eq!(debugger.step_breakpoint(), NO_BREAKPOINT);
    }
}
