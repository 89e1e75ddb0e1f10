// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration surface for the `harness` binary.
//!
//! The library core itself takes no configuration beyond the debug
//! level and sink set directly on a [`crate::cpu::Cpu`]; this module
//! only exists so a harness can load trace level and a step budget from
//! a TOML file instead of wiring them up by hand.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CpuError;

/// Settings a CLI harness reads before constructing and driving a [`crate::cpu::Cpu`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Forwarded to [`crate::cpu::Cpu::set_debug_level`] (0 silent .. 3 full trace).
    #[serde(default)]
    pub trace_level: u8,
    /// Stops stepping after this many instructions. `None` runs until
    /// the program itself raises an error (`SYSCALL`, `BREAK`, a fault).
    #[serde(default)]
    pub max_steps: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            trace_level: 0,
            max_steps: None,
        }
    }
}

impl SimulatorConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, CpuError> {
        let text = fs::read_to_string(path.as_ref())
            .map_err(|e| CpuError::FileReadError(e.to_string()))?;
        toml::from_str(&text).map_err(|e| CpuError::FileReadError(e.to_string()))
    }
}
