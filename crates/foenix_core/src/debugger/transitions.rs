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

    debugger::transitions.rs

    Debugger state/event table.
    
    Every mode change the debugger makes is looked up here. An event with
    no entry for the current state is ignored.

*/

use self::DebugAction as A;
use self::DebugEvent as E;
use self::DebuggerState::{Halted, Running};
use self::StateMatch::{Any, Only};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DebuggerState {
    Halted,
    Running,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DebugEvent {
    Reset,
    HexDigit,
    Home,
    Run,
    Step,
    StepOverCall,        // Instruction under the cursor is a call
    StepOverInstruction, // Anything else
    SetBreakpoint,
    Break,
    BreakpointHit,
    FrameComplete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DebugAction {
    ResetCpu,
    EditCursor,
    HomeCursor,
    ClearStepBreakpoint,
    SingleStep,
    ResumeToStepBreakpoint,
    SetBreakpoint,
    SyncCursor,
    PaceFrame,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StateMatch {
    Any,
    Only(DebuggerState),
}

impl StateMatch {
    fn matches(&self, state: DebuggerState) -> bool {
        match self {
            StateMatch::Any => true,
            StateMatch::Only(s) => *s == state,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Transition {
    pub from: StateMatch,
    pub event: DebugEvent,
    pub action: DebugAction,
    pub next: Option<DebuggerState>, // None keeps the current state
}

const fn t(from: StateMatch, event: DebugEvent, action: DebugAction, next: Option<DebuggerState>) -> Transition {
    Transition {
        from,
        event,
        action,
        next,
    }
}

pub const TRANSITIONS: [Transition; 11] = [
    t(Any, E::Reset, A::ResetCpu, None),
    t(Only(Halted), E::HexDigit, A::EditCursor, None),
    t(Only(Halted), E::Home, A::HomeCursor, None),
    t(Only(Halted), E::Run, A::ClearStepBreakpoint, Some(Running)),
    t(Only(Halted), E::Step, A::SingleStep, None),
    t(Only(Halted), E::StepOverCall, A::ResumeToStepBreakpoint, Some(Running)),
    t(Only(Halted), E::StepOverInstruction, A::SingleStep, None),
    t(Only(Halted), E::SetBreakpoint, A::SetBreakpoint, None),
    t(Only(Running), E::Break, A::SyncCursor, Some(Halted)),
    t(Only(Running), E::BreakpointHit, A::SyncCursor, Some(Halted)),
    t(Only(Running), E::FrameComplete, A::PaceFrame, None),
];

/// Find the transition for `event` in `state`, if there is one.
pub fn lookup(state: DebuggerState, event: DebugEvent) -> Option<&'static Transition> {
    TRANSITIONS
        .iter()
        .find(|tr| tr.event == event && tr.from.matches(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_EVENTS: [DebugEvent; 11] = [
        E::Reset,
        E::HexDigit,
        E::Home,
        E::Run,
        E::Step,
        E::StepOverCall,
        E::StepOverInstruction,
        E::SetBreakpoint,
        E::Break,
        E::BreakpointHit,
        E::FrameComplete,
    ];

    #[test]
    fn halted_transitions() {
        let expect = |event: DebugEvent, action: DebugAction, next: Option<DebuggerState>| {
            let tr = lookup(Halted, event).unwrap();
            assert_eq!(tr.action, action, "{:?}", event);
            assert_eq!(tr.next, next, "{:?}", event);
        };
        expect(E::Reset, A::ResetCpu, None);
        expect(E::HexDigit, A::EditCursor, None);
        expect(E::Home, A::HomeCursor, None);
        expect(E::Run, A::ClearStepBreakpoint, Some(Running));
        expect(E::Step, A::SingleStep, None);
        expect(E::StepOverCall, A::ResumeToStepBreakpoint, Some(Running));
        expect(E::StepOverInstruction, A::SingleStep, None);
        expect(E::SetBreakpoint, A::SetBreakpoint, None);

        for event in [E::Break, E::BreakpointHit, E::FrameComplete] {
            assert!(lookup(Halted, event).is_none(), "{:?}", event);
        }
    }

    #[test]
    fn running_transitions() {
        assert_eq!(lookup(Running, E::Reset).unwrap().action, A::ResetCpu);
        assert_eq!(lookup(Running, E::Reset).unwrap().next, None);
        assert_eq!(lookup(Running, E::Break).unwrap().next, Some(Halted));
        assert_eq!(lookup(Running, E::BreakpointHit).unwrap().next, Some(Halted));
        assert_eq!(lookup(Running, E::BreakpointHit).unwrap().action, A::SyncCursor);
        assert_eq!(lookup(Running, E::FrameComplete).unwrap().action, A::PaceFrame);

        for event in [
            E::HexDigit,
            E::Home,
            E::Run,
            E::Step,
            E::StepOverCall,
            E::StepOverInstruction,
            E::SetBreakpoint,
        ] {
            assert!(lookup(Running, event).is_none(), "{:?}", event);
        }
    }

    #[test]
    fn at_most_one_transition_per_pair() {
        for state in [Halted, Running] {
            for event in ALL_EVENTS {
                let count = TRANSITIONS
                    .iter()
                    .filter(|tr| tr.event == event && tr.from.matches(state))
                    .count();
                assert!(count <= 1, "{:?} {:?}", state, event);
            }
        }
    }
}
