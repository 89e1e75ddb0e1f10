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

//! `LB`, `LBU`, `LH`, `LHU`, `LW`, `LWL`, `LWR`.
//!
//! `LWL`/`LWR` deliberately keep this simulator's source's own
//! non-canonical 16-bit halfword merge convention rather than the real
//! MIPS-I architecture manual's 1-4 byte merge: each reads a 2-byte
//! span and folds it into the upper (`LWL`) or lower (`LWR`) half of
//! the destination register, leaving the other half untouched.

use crate::bus::MemoryBus;
use crate::byteorder::{read_be_u16, read_be_u32, sext16, sext8};
use crate::cpu::access;
use crate::cpu::decode::decode_i_type;
use crate::cpu::Cpu;
use crate::error::CpuResult;

pub(crate) fn op_lb(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    let mut buf = [0u8; 1];
    access::read(bus, cpu.pc(), address, &mut buf, 1)?;
    cpu.set_reg(rt, sext8(buf[0]));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_lbu(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    let mut buf = [0u8; 1];
    access::read(bus, cpu.pc(), address, &mut buf, 1)?;
    cpu.set_reg(rt, buf[0] as u32);
    cpu.advance();
    Ok(())
}

pub(crate) fn op_lh(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    let mut buf = [0u8; 2];
    access::read(bus, cpu.pc(), address, &mut buf, 2)?;
    cpu.set_reg(rt, sext16(read_be_u16(&buf)));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_lhu(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    let mut buf = [0u8; 2];
    access::read(bus, cpu.pc(), address, &mut buf, 2)?;
    cpu.set_reg(rt, read_be_u16(&buf) as u32);
    cpu.advance();
    Ok(())
}

pub(crate) fn op_lw(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    let mut buf = [0u8; 4];
    access::read(bus, cpu.pc(), address, &mut buf, 4)?;
    cpu.set_reg(rt, read_be_u32(&buf));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_lwl(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm));
    let mut buf = [0u8; 2];
    access::read(bus, cpu.pc(), address, &mut buf, 1)?;
    let half = read_be_u16(&buf) as u32;
    cpu.set_reg(rt, (cpu.reg(rt) & 0x0000_FFFF) | (half << 16));
    cpu.advance();
    Ok(())
}

pub(crate) fn op_lwr(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let address = cpu.reg(rs).wrapping_add(sext16(imm)).wrapping_sub(1);
    let mut buf = [0u8; 2];
    access::read(bus, cpu.pc(), address, &mut buf, 1)?;
    let half = read_be_u16(&buf) as u32;
    cpu.set_reg(rt, (cpu.reg(rt) & 0xFFFF_0000) | half);
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
    fn lw_after_sw_round_trips() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        bus.write(4, &0x1234_5678u32.to_be_bytes()).unwrap();
        let instr = i_type(0x23, 0, 1, 4);
        op_lw(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(1), 0x1234_5678);
    }

    #[test]
    fn lb_sign_extends() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        bus.write(0, &[0x80]).unwrap();
        let instr = i_type(0x20, 0, 1, 0);
        op_lb(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(1), 0xFFFF_FF80);
    }
}
