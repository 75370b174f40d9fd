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
*/

//! The `foenix_config` crate reads the debugger section of FoenixEmu's configuration file and
//! builds the debugger, key bindings and keyboard router it describes.
//!
//! ```toml
//! [debugger]
//! autostart = false
//! scale = 2
//! cursor_radix = 16
//! reserved_keys = [0x3A, 0x3B]
//!
//! [[debugger.keys]]
//! command = "Run"
//! key = "F5"
//! ```

use std::path::Path;

use anyhow::Context;
use serde_derive::Deserialize;
use thiserror::Error;

use foenix_core::{
    debugger::{DebugCommand, Debugger, KeyBindings},
    keyboard::{KeyboardRouter, DEFAULT_RESERVED_SCANCODES},
    keys::HostKey,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Couldn't read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Couldn't parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

const fn _default_scale() -> u32 {
    2
}

const fn _default_radix() -> u32 {
    16
}

fn _default_reserved_keys() -> Vec<u16> {
    DEFAULT_RESERVED_SCANCODES.to_vec()
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
pub struct KeyBindingEntry {
    pub command: DebugCommand,
    pub key: HostKey,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DebuggerConfig {
    #[serde(default)]
    pub autostart: bool,
    #[serde(default = "_default_scale")]
    pub scale: u32,
    #[serde(default = "_default_radix")]
    pub cursor_radix: u32,
    #[serde(default = "_default_reserved_keys")]
    pub reserved_keys: Vec<u16>,
    #[serde(default)]
    pub keys: Vec<KeyBindingEntry>,
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        Self {
            autostart: false,
            scale: _default_scale(),
            cursor_radix: _default_radix(),
            reserved_keys: _default_reserved_keys(),
            keys: Vec::new(),
        }
    }
}

impl DebuggerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=16).contains(&self.cursor_radix) {
            return Err(ConfigError::InvalidValue {
                field: "cursor_radix",
                reason: format!("{} is not between 2 and 16", self.cursor_radix),
            });
        }
        if self.scale == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scale",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The default bindings with any configured overrides applied, in file order.
    pub fn key_bindings(&self) -> KeyBindings {
        let mut bindings = KeyBindings::new();
        for entry in &self.keys {
            bindings.bind(entry.command, entry.key);
        }
        bindings
    }

    pub fn keyboard_router(&self) -> KeyboardRouter {
        KeyboardRouter::with_reserved(self.reserved_keys.iter().copied())
    }

    pub fn build_debugger(&self) -> Debugger {
        let mut debugger = Debugger::with_bindings(self.key_bindings());
        debugger.set_radix(self.cursor_radix);
        debugger
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ConfigFileParams {
    #[serde(default)]
    pub debugger: DebuggerConfig,
}

impl ConfigFileParams {
    pub fn from_toml_str(toml_string: &str) -> Result<Self, ConfigError> {
        let params: ConfigFileParams = toml::from_str(toml_string)?;
        params.debugger.validate()?;
        log::debug!("Debugger configuration: {:?}", params.debugger);
        Ok(params)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let toml_string = std::fs::read_to_string(path)?;
        Self::from_toml_str(&toml_string)
    }
}

/// Read the TOML configuration from a file path.
pub fn read_config_file<P>(path: P) -> Result<ConfigFileParams, anyhow::Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    log::debug!("Reading configuration file {}", path.display());
    ConfigFileParams::from_file(path).with_context(|| format!("Loading configuration from {}", path.display()))
}

/// Read the TOML configuration from a file path, falling back to the defaults if the file
/// doesn't exist. A file that exists but can't be parsed is still an error.
pub fn load_or_default<P>(path: P) -> Result<ConfigFileParams, anyhow::Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("No configuration file at {}, using defaults", path.display());
        return Ok(ConfigFileParams::default());
    }
    read_config_file(path)
}
