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

//! `AND`, `OR`, `XOR`, `NOR`, `ANDI`, `ORI`, `XORI`, `LUI`.

use crate::bus::MemoryBus;
use crate::byteorder::zext16;
use crate::cpu::decode::{decode_i_type, decode_r_type};
use crate::cpu::Cpu;
use crate::error::CpuResult;

pub(crate) fn op_and(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, rd, _, _) = decode_r_type(instr);
    cpu.set_reg(rd, cpu.reg(rs) & cpu.reg(rt));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_or(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, rd, _, _) = decode_r_type(instr);
    cpu.set_reg(rd, cpu.reg(rs) | cpu.reg(rt));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_xor(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, rd, _, _) = decode_r_type(instr);
    cpu.set_reg(rd, cpu.reg(rs) ^ cpu.reg(rt));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_nor(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, rd, _, _) = decode_r_type(instr);
    cpu.set_reg(rd, !(cpu.reg(rs) | cpu.reg(rt)));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_andi(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    cpu.set_reg(rt, cpu.reg(rs) & zext16(imm));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_ori(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    cpu.set_reg(rt, cpu.reg(rs) | zext16(imm));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_xori(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    cpu.set_reg(rt, cpu.reg(rs) ^ zext16(imm));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_lui(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, _, rt, imm) = decode_i_type(instr);
    cpu.set_reg(rt, (imm as u32) << 16);
    cpu.advance();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::VecBus;

    #[test]
    fn lui_shifts_immediate_into_upper_half() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        // LUI $1, 0x1234
        let instr = (0x0Fu32 << 26) | (1 << 16) | 0x1234;
        op_lui(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(1), 0x1234_0000);
    }

    #[test]
    fn nor_inverts_the_union() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_reg(1, 0x0F0F_0F0F);
        cpu.set_reg(2, 0xF0F0_F0F0);
        let instr = (1 << 21) | (2 << 16) | (3 << 11) | 0x27;
        op_nor(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(3), 0);
    }
}
