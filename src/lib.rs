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

//! A deterministic MIPS-I instruction set simulator core.
//!
//! [`cpu::Cpu`] advances a single-hart MIPS-I architectural state one
//! instruction at a time against an externally supplied [`bus::MemoryBus`].
//! The core owns no memory of its own and performs no I/O beyond an
//! optional debug trace sink; embedding is either direct, through the
//! safe Rust API, or through the [`ffi`] module's C-compatible surface.
//!
//! # Example
//!
//! ```
//! use mips_core::cpu::Cpu;
//! use mips_core::bus::VecBus;
//!
//! let mut cpu = Cpu::new();
//! let mut bus = VecBus::new(0, 64);
//! bus.write(0, &0x0000_0000u32.to_be_bytes()).unwrap(); // NOP
//! cpu.step(&mut bus).unwrap();
//! assert_eq!(cpu.pc(), 4);
//! ```

pub mod bus;
pub mod byteorder;
pub mod config;
pub mod cpu;
pub mod error;
pub mod ffi;
