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

    display.rs

    Debugger display surface.
    
    The debugger never draws or polls input directly. A frontend implements
    DebugSurface and hands it to Debugger::frame() once per host frame.

*/

use crate::keys::HostKey;

/// Addresses the debugger views are centred on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugCursors {
    pub code: u32,
    pub data: u32,
    pub other: u32,
    pub breakpoint: u32,
}

pub trait DebugSurface {
    fn is_key_pressed(&self, key: HostKey) -> bool;
    /// Draw the full emulated system display.
    fn render_system_view(&mut self, cursors: &DebugCursors, scale: u32);
    /// Draw the CPU state, disassembly and memory views.
    fn render_cpu_view(&mut self, cursors: &DebugCursors, scale: u32);
    /// Target frame rate for the host loop. Zero means unpaced.
    fn set_frequency(&mut self, hz: u32);
}
