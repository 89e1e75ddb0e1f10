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

//! `SYSCALL`, `BREAK`.
//!
//! Both report their architectural exception without advancing `pc`;
//! the caller observes the trap at the instruction that raised it and
//! decides whether and how to resume.

use crate::bus::MemoryBus;
use crate::cpu::Cpu;
use crate::error::{CpuError, CpuResult};

pub(crate) fn op_syscall(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _instr: u32) -> CpuResult<()> {
    Err(CpuError::SystemCall { pc: cpu.pc() })
}

pub(crate) fn op_break(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _instr: u32) -> CpuResult<()> {
    Err(CpuError::Break { pc: cpu.pc() })
}
