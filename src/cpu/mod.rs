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

//! A single-hart MIPS-I interpreter.
//!
//! A [`Cpu`] owns nothing but architectural state: registers, `HI`/`LO`,
//! the `(pc, pc_next)` pair, and the four coprocessor dispatch slots.
//! The memory it executes against is borrowed per [`Cpu::step`] call, so
//! the same `Cpu` can be stepped against different buses without
//! re-creating it.
//!
//! # Example
//! ```
//! use mips_core::cpu::Cpu;
//! use mips_core::bus::VecBus;
//!
//! let mut cpu = Cpu::new();
//! let mut bus = VecBus::new(0, 16);
//! // SLL $zero, $zero, 0 -- the canonical MIPS NOP encoding.
//! bus.write(0, &0x0000_0000u32.to_be_bytes()).unwrap();
//! cpu.step(&mut bus).unwrap();
//! assert_eq!(cpu.pc(), 4);
//! ```

pub(crate) mod access;
pub(crate) mod decode;
mod dispatch;
mod instructions;

use std::fmt;
use std::io::{self, Write};

use crate::bus::MemoryBus;
use crate::error::{CpuError, CpuResult, MemoryError};

/// A 64-bit `HI`/`LO` composite, as used by `MULT`/`MULTU`/`DIV`/`DIVU`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HiLo {
    hi: u32,
    lo: u32,
}

impl HiLo {
    pub fn hi(&self) -> u32 {
        self.hi
    }

    pub fn lo(&self) -> u32 {
        self.lo
    }

    pub fn set_hi(&mut self, value: u32) {
        self.hi = value;
    }

    pub fn set_lo(&mut self, value: u32) {
        self.lo = value;
    }

    pub fn full(&self) -> u64 {
        ((self.hi as u64) << 32) | self.lo as u64
    }

    pub fn set_full(&mut self, value: u64) {
        self.hi = (value >> 32) as u32;
        self.lo = value as u32;
    }
}

/// A dispatch hook installed for one of the four coprocessor slots.
///
/// None of `op`, `load_word`, or `store_word` are required to be
/// present; `Cpu::set_coprocessor` installs all three at once, matching
/// the original embedding API's `coprocessor` struct.
pub struct Coprocessor {
    /// Handles a COPz main opcode (`MTCz`/`MFCz`/vendor-specific ops).
    pub op: Box<dyn FnMut(&mut Cpu, u32) -> CpuResult<()>>,
    /// Hands an `LWCz`-loaded word to the coprocessor, along with the
    /// unit register index (`rt`) the instruction named.
    pub load_word: Box<dyn FnMut(&mut Cpu, u32, u32) -> CpuResult<()>>,
    /// Asks the coprocessor for the word an `SWCz` should store to
    /// memory, given the unit register index (`rt`) the instruction
    /// named.
    pub store_word: Box<dyn FnMut(&mut Cpu, u32) -> CpuResult<u32>>,
}

/// Where debug output goes, in priority order: an installed byte-writer
/// callback, then an installed `Write` sink, then the platform default
/// (stdout). Neither is ever closed by the core.
enum DebugSink {
    None,
    Handler(Box<dyn FnMut(&[u8])>),
    Writer(Box<dyn Write>),
}

impl Default for DebugSink {
    fn default() -> Self {
        DebugSink::None
    }
}

/// Architectural state for one MIPS-I hart.
pub struct Cpu {
    regs: [u32; 32],
    pc: u32,
    pc_next: u32,
    hi_lo: HiLo,
    coprocessors: [Option<Coprocessor>; 4],
    debug_level: u8,
    debug_sink: DebugSink,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// All registers, `HI`/`LO`, and `pc` start at zero; `pc_next`
    /// starts at 4, one instruction ahead, as branch-free execution
    /// expects.
    pub fn new() -> Self {
        Self {
            regs: [0u32; 32],
            pc: 0,
            pc_next: 4,
            hi_lo: HiLo::default(),
            coprocessors: [None, None, None, None],
            debug_level: 0,
            debug_sink: DebugSink::None,
        }
    }

    /// Restores architectural state to power-on values. The installed
    /// debug level and sink survive a reset; installed coprocessors do
    /// not, matching the embedding API's handle lifecycle.
    pub fn reset(&mut self) {
        self.regs = [0u32; 32];
        self.pc = 0;
        self.pc_next = 4;
        self.hi_lo = HiLo::default();
        self.coprocessors = [None, None, None, None];
    }

    /// Reads general-purpose register `index`. `$zero` always reads 0.
    #[inline(always)]
    pub fn reg(&self, index: u8) -> u32 {
        if index == 0 {
            0
        } else {
            self.regs[index as usize]
        }
    }

    /// Writes general-purpose register `index`. Writes to `$zero` are
    /// silently discarded.
    #[inline(always)]
    pub fn set_reg(&mut self, index: u8, value: u32) {
        if index != 0 {
            self.regs[index as usize] = value;
        }
    }

    /// Sets register `index`, returning `InvalidArgument` for an
    /// out-of-range index. Used by the embedding-facing accessor; the
    /// internal instruction handlers use [`Cpu::set_reg`] directly
    /// since decode already guarantees a 5-bit index.
    pub fn set_register(&mut self, index: u32, value: u32) -> CpuResult<()> {
        if index >= 32 {
            return Err(CpuError::InvalidArgument("register index out of range"));
        }
        self.set_reg(index as u8, value);
        Ok(())
    }

    /// Gets register `index`, returning `InvalidArgument` for an
    /// out-of-range index.
    pub fn get_register(&self, index: u32) -> CpuResult<u32> {
        if index >= 32 {
            return Err(CpuError::InvalidArgument("register index out of range"));
        }
        Ok(self.reg(index as u8))
    }

    pub fn hi_lo(&self) -> HiLo {
        self.hi_lo
    }

    pub(crate) fn hi_lo_mut(&mut self) -> &mut HiLo {
        &mut self.hi_lo
    }

    /// The currently executing instruction's address.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Sets the program counter directly. Per the embedding API's
    /// documented contract, this does not execute anything; it only
    /// repositions fetch for the next `step`. `pc_next` is updated to
    /// `pc + 4`, discarding any pending branch-delay target.
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
        self.pc_next = pc.wrapping_add(4);
    }

    /// Installs the coprocessor handlers for slot `index` (0-3).
    pub fn set_coprocessor(&mut self, index: u32, coprocessor: Coprocessor) -> CpuResult<()> {
        if index >= 4 {
            return Err(CpuError::InvalidArgument("coprocessor index out of range"));
        }
        self.coprocessors[index as usize] = Some(coprocessor);
        Ok(())
    }

    /// Temporarily removes the coprocessor in `idx` so its callbacks
    /// can be invoked with a free `&mut self`; pair with
    /// [`Cpu::put_coprocessor`].
    pub(crate) fn take_coprocessor(&mut self, idx: usize) -> Option<Coprocessor> {
        self.coprocessors[idx].take()
    }

    pub(crate) fn put_coprocessor(&mut self, idx: usize, coprocessor: Option<Coprocessor>) {
        self.coprocessors[idx] = coprocessor;
    }

    /// Sets the debug verbosity (0 silent .. 3 full trace) and installs
    /// a `Write` sink for it. Passing `level` greater than 0 without
    /// ever installing a sink (here or via [`Cpu::set_debug_handler`])
    /// falls back to stdout.
    pub fn set_debug_level(&mut self, level: u8, sink: Option<Box<dyn Write>>) {
        self.debug_level = level;
        if let Some(sink) = sink {
            self.debug_sink = DebugSink::Writer(sink);
        }
    }

    /// Installs a byte-writer callback, taking priority over any
    /// `Write` sink installed via [`Cpu::set_debug_level`].
    pub fn set_debug_handler(&mut self, handler: Box<dyn FnMut(&[u8])>) {
        self.debug_sink = DebugSink::Handler(handler);
    }

    fn debug(&mut self, level: u8, args: fmt::Arguments) {
        if self.debug_level < level {
            return;
        }
        let text = fmt::format(args);
        match &mut self.debug_sink {
            DebugSink::Handler(handler) => handler(text.as_bytes()),
            DebugSink::Writer(writer) => {
                let _ = writer.write_all(text.as_bytes());
            }
            DebugSink::None => {
                let _ = io::stdout().write_all(text.as_bytes());
            }
        }
    }

    /// `pc <- pc_next; pc_next <- pc + 4`. Used by every instruction
    /// that does not branch.
    fn advance(&mut self) {
        self.pc = self.pc_next;
        self.pc_next = self.pc.wrapping_add(4);
    }

    /// `pc <- pc_next; pc_next <- target`. The sole primitive behind
    /// every taken branch and jump: because `pc` still holds the
    /// delay-slot address when a branch instruction runs, the delay
    /// slot always executes exactly once before control reaches
    /// `target`.
    fn set_branch_delay(&mut self, target: u32) {
        self.pc = self.pc_next;
        self.pc_next = target;
    }

    /// Fetches, decodes, and executes exactly one instruction.
    ///
    /// On any error, architectural or host, `pc`, `pc_next`, and every
    /// register are left exactly as they were before the call: each
    /// instruction handler validates (alignment, overflow, decode)
    /// before writing any state.
    pub fn step(&mut self, bus: &mut dyn MemoryBus) -> CpuResult<()> {
        if self.pc % 4 != 0 {
            return Err(CpuError::InvalidAlignment {
                pc: self.pc,
                source: MemoryError::Misaligned {
                    address: self.pc,
                    length: 4,
                },
            });
        }
        let mut word = [0u8; 4];
        access::read(bus, self.pc, self.pc, &mut word, 4)?;
        let instruction = crate::byteorder::read_be_u32(&word);
        let op = decode::opcode(instruction);

        self.debug(3, format_args!("pc={:#010x}\n", self.pc));

        let binding = dispatch::OPCODE_TABLE[op as usize].as_ref();
        let binding = match binding {
            Some(b) => b,
            None => {
                self.debug(1, format_args!("reserved opcode {:#04x}\n", op));
                return Err(CpuError::InvalidInstruction {
                    pc: self.pc,
                    word: instruction,
                });
            }
        };
        self.debug(2, format_args!("{}\n", binding.mnemonic));

        let result = (binding.handler)(self, bus, instruction);
        if let Err(ref e) = result {
            self.debug(1, format_args!("exception: {e}\n"));
        }
        result
    }
}
