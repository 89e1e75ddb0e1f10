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

//! `COPz`, `LWCz`, `SWCz` dispatch to the installed [`Coprocessor`]
//! slots; the slot index is the low two bits of the opcode for all
//! three families.
//!
//! `SWCz` is where this simulator's source carried a bug: it invoked
//! the same "load" path as `LWCz` for both. Here `LWCz` reads memory
//! then hands the word to the coprocessor's `load_word` hook, and
//! `SWCz` asks the coprocessor's `store_word` hook for a word and then
//! writes it to memory -- the two are no longer aliases of each other.
//! Both hooks receive the unit register index (`rt`) the instruction
//! named, not the raw instruction word.

use crate::bus::MemoryBus;
use crate::byteorder::{read_be_u32, sext16};
use crate::cpu::access;
use crate::cpu::decode::{decode_i_type, opcode};
use crate::cpu::Cpu;
use crate::error::{CpuError, CpuResult};

pub(crate) fn op_copz(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let idx = (opcode(instr) & 3) as usize;
    let mut slot = cpu.take_coprocessor(idx);
    let result = match slot.as_mut() {
        Some(cop) => (cop.op)(cpu, instr),
        None => Err(CpuError::NotImplemented("coprocessor op")),
    };
    cpu.put_coprocessor(idx, slot);
    result?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_lwcz(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let idx = (opcode(instr) & 3) as usize;
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    let mut buf = [0u8; 4];
    access::read(bus, cpu.pc(), address, &mut buf, 4)?;
    let word = read_be_u32(&buf);

    let mut slot = cpu.take_coprocessor(idx);
    let result = match slot.as_mut() {
        Some(cop) => (cop.load_word)(cpu, rt as u32, word),
        None => Err(CpuError::NotImplemented("coprocessor load")),
    };
    cpu.put_coprocessor(idx, slot);
    result?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_swcz(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let idx = (opcode(instr) & 3) as usize;
    let (_, rs, rt, imm) = decode_i_type(instr);

    let mut slot = cpu.take_coprocessor(idx);
    let word_result = match slot.as_mut() {
        Some(cop) => (cop.store_word)(cpu, rt as u32),
        None => Err(CpuError::NotImplemented("coprocessor store")),
    };
    cpu.put_coprocessor(idx, slot);
    let word = word_result?;

    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    access::write(bus, cpu.pc(), address, &word.to_be_bytes(), 4)?;
    cpu.advance();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::VecBus;
    use crate::cpu::Coprocessor;

    #[test]
    fn lwcz_reads_memory_before_calling_load_word() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        bus.write(0, &0xAABBCCDDu32.to_be_bytes()).unwrap();
        cpu.set_coprocessor(
            0,
            Coprocessor {
                op: Box::new(|_, _| Ok(())),
                load_word: Box::new(|cpu, _, word| {
                    cpu.set_reg(5, word);
                    Ok(())
                }),
                store_word: Box::new(|_, _| Ok(0)),
            },
        )
        .unwrap();
        // LWC0 $9, 0($0)
        let instr = (0x30u32 << 26) | (9 << 16);
        op_lwcz(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(5), 0xAABBCCDD);
    }

    #[test]
    fn lwcz_passes_the_unit_register_index_not_the_instruction_word() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_coprocessor(
            0,
            Coprocessor {
                op: Box::new(|_, _| Ok(())),
                load_word: Box::new(|cpu, rt, _| {
                    cpu.set_reg(1, rt);
                    Ok(())
                }),
                store_word: Box::new(|_, _| Ok(0)),
            },
        )
        .unwrap();
        // LWC0 $17, 0($0)
        let instr = (0x30u32 << 26) | (17 << 16);
        op_lwcz(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(1), 17);
    }

    #[test]
    fn swcz_calls_store_word_then_writes_memory() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_coprocessor(
            0,
            Coprocessor {
                op: Box::new(|_, _| Ok(())),
                load_word: Box::new(|_, _, _| Ok(())),
                store_word: Box::new(|_, _| Ok(0xDEAD_BEEF)),
            },
        )
        .unwrap();
        let instr = 0x38u32 << 26; // SWC0, base $0, offset 0
        op_swcz(&mut cpu, &mut bus, instr).unwrap();
        let mut buf = [0u8; 4];
        bus.read(0, &mut buf).unwrap();
        assert_eq!(u32::from_be_bytes(buf), 0xDEAD_BEEF);
    }

    #[test]
    fn swcz_passes_the_unit_register_index_not_the_instruction_word() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_coprocessor(
            0,
            Coprocessor {
                op: Box::new(|_, _| Ok(())),
                load_word: Box::new(|_, _, _| Ok(())),
                store_word: Box::new(|cpu, rt| {
                    cpu.set_reg(1, rt);
                    Ok(0)
                }),
            },
        )
        .unwrap();
        // SWC0 $22, 0($0)
        let instr = (0x38u32 << 26) | (22 << 16);
        op_swcz(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(1), 22);
    }

    #[test]
    fn missing_coprocessor_is_not_implemented() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        let instr = 0x10u32 << 26; // COP0, no slot installed
        let err = op_copz(&mut cpu, &mut bus, instr).unwrap_err();
        assert!(matches!(err, CpuError::NotImplemented(_)));
    }
}
