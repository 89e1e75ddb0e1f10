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

//! `SB`, `SH`, `SW`, `SWL`, `SWR`.
//!
//! `SWL`/`SWR` mirror `LWL`/`LWR`'s 16-bit halfword convention: each
//! writes the upper (`SWL`) or lower (`SWR`) half of the source
//! register out as a 2-byte span.

use crate::bus::MemoryBus;
use crate::byteorder::sext16;
use crate::cpu::access;
use crate::cpu::decode::decode_i_type;
use crate::cpu::Cpu;
use crate::error::CpuResult;

pub(crate) fn op_sb(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    access::write(bus, cpu.pc(), address, &[cpu.reg(rt) as u8], 1)?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_sh(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    access::write(bus, cpu.pc(), address, &(cpu.reg(rt) as u16).to_be_bytes(), 2)?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_sw(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    access::write(bus, cpu.pc(), address, &cpu.reg(rt).to_be_bytes(), 4)?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_swl(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    let half = (cpu.reg(rt) >> 16) as u16;
    access::write(bus, cpu.pc(), address, &half.to_be_bytes(), 1)?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_swr(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm)).wrapping_sub(1);
    let half = cpu.reg(rt) as u16;
    access::write(bus, cpu.pc(), address, &half.to_be_bytes(), 1)?;
    cpu.advance();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::VecBus;

    fn i_type(op: u32, rs: u32, rt: u32, imm: u32) -> u32 {
        (op << 26) | (rs << 21) | (rt << 16) | (imm & 0xFFFF)
    }

    #[test]
    fn sw_then_lw_round_trips() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_reg(1, 0xCAFEBABEu32);
        let instr = i_type(0x2B, 0, 1, 8);
        op_sw(&mut cpu, &mut bus, instr).unwrap();
        let mut buf = [0u8; 4];
        bus.read(8, &mut buf).unwrap();
        assert_eq!(u32::from_be_bytes(buf), 0xCAFEBABE);
    }
}
