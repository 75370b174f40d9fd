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

    debugger::bindings.rs

    Debugger command key bindings.

*/

use std::collections::HashMap;

use serde::Deserialize;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::keys::HostKey;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Deserialize)]
pub enum DebugCommand {
    Reset,
    Show,
    Step,
    StepOver,
    Run,
    Break,
    Home,
    SetBreakpoint,
}

impl DebugCommand {
    pub fn default_key(&self) -> HostKey {
        match self {
            DebugCommand::Reset => HostKey::F1,
            DebugCommand::Show => HostKey::Tab,
            DebugCommand::Step => HostKey::F7,
            DebugCommand::StepOver => HostKey::F8,
            DebugCommand::Run => HostKey::F5,
            DebugCommand::Break => HostKey::F6,
            DebugCommand::Home => HostKey::F2,
            DebugCommand::SetBreakpoint => HostKey::F9,
        }
    }
}

/// Maps each debugger command to the host key that triggers it.
#[derive(Clone, Debug)]
pub struct KeyBindings {
    keys: HashMap<DebugCommand, HostKey>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = HashMap::new();
        for command in DebugCommand::iter() {
            keys.insert(command, command.default_key());
        }
        KeyBindings { keys }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        KeyBindings::default()
    }

    pub fn bind(&mut self, command: DebugCommand, key: HostKey) {
        log::debug!("Binding {:?} to {:?}", command, key);
        self.keys.insert(command, key);
    }

    pub fn key(&self, command: DebugCommand) -> HostKey {
        self.keys.get(&command).copied().unwrap_or_else(|| command.default_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_command() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.key(DebugCommand::Reset), HostKey::F1);
        assert_eq!(bindings.key(DebugCommand::Show), HostKey::Tab);
        assert_eq!(bindings.key(DebugCommand::Home), HostKey::F2);
        assert_eq!(bindings.key(DebugCommand::Run), HostKey::F5);
        assert_eq!(bindings.key(DebugCommand::Break), HostKey::F6);
        assert_eq!(bindings.key(DebugCommand::Step), HostKey::F7);
        assert_eq!(bindings.key(DebugCommand::StepOver), HostKey::F8);
        assert_eq!(bindings.key(DebugCommand::SetBreakpoint), HostKey::F9);
    }

    #[test]
    fn bind_replaces_default() {
        let mut bindings = KeyBindings::new();
        bindings.bind(DebugCommand::Run, HostKey::R);
        assert_eq!(bindings.key(DebugCommand::Run), HostKey::R);
        assert_eq!(bindings.key(DebugCommand::Break), HostKey::F6);
    }
}
