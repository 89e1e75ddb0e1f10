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

//! `BEQ`, `BNE`, `BLEZ`, `BGTZ`, and the `REGIMM` family (`BLTZ`,
//! `BGEZ`, `BLTZAL`, `BGEZAL`).
//!
//! Every branch here bottoms out in [`Cpu::set_branch_delay`] via the
//! crate-private `take_branch`/`fall_through` pair: at the point a
//! branch instruction runs, `pc` already holds the delay slot's address
//! (`pc + 4` relative to the branch itself), so the target is computed
//! as `pc + (sext(imm) << 2)`, matching the original source's
//! `state->pc + 4 + (offset << 2)` exactly.

use crate::bus::MemoryBus;
use crate::cpu::decode::decode_i_type;
use crate::cpu::Cpu;
use crate::error::CpuResult;

fn branch_target(cpu: &Cpu, imm: u16) -> u32 {
    let offset = ((imm as i16) as i32) << 2;
    cpu.pc().wrapping_add(4).wrapping_add(offset as u32)
}

fn take_or_fall_through(cpu: &mut Cpu, taken: bool, imm: u16) {
    if taken {
        let target = branch_target(cpu, imm);
        cpu.set_branch_delay(target);
    } else {
        cpu.advance();
    }
}

pub(crate) fn op_beq(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let taken = cpu.reg(rs) == cpu.reg(rt);
    take_or_fall_through(cpu, taken, imm);
    Ok(())
}

pub(crate) fn op_bne(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let taken = cpu.reg(rs) != cpu.reg(rt);
    take_or_fall_through(cpu, taken, imm);
    Ok(())
}

pub(crate) fn op_blez(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, _, imm) = decode_i_type(instr);
    let taken = (cpu.reg(rs) as i32) <= 0;
    take_or_fall_through(cpu, taken, imm);
    Ok(())
}

pub(crate) fn op_bgtz(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, _, imm) = decode_i_type(instr);
    let taken = (cpu.reg(rs) as i32) > 0;
    take_or_fall_through(cpu, taken, imm);
    Ok(())
}

/// `BLTZ`/`BGEZ`/`BLTZAL`/`BGEZAL` share opcode `0x01`; the `rt` field
/// selects among them. Bit 0 selects the comparison (`BGEZ` vs `BLTZ`),
/// bit 4 requests linking `$ra`. Linking happens unconditionally before
/// the branch condition is tested, matching the original's `link`
/// call preceding the conditional `set_branch_delay`.
pub(crate) fn op_regimm(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let is_bgez = rt & 0x01 != 0;
    let is_link = rt & 0x10 != 0;
    let value = cpu.reg(rs) as i32;
    let taken = if is_bgez { value >= 0 } else { value < 0 };
    if is_link {
        let link_pc = cpu.pc().wrapping_add(8);
        cpu.set_reg(31, link_pc);
    }
    take_or_fall_through(cpu, taken, imm);
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
    fn beq_enters_branch_delay_then_reaches_target() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 64);
        cpu.set_pc(0);
        cpu.set_reg(1, 5);
        cpu.set_reg(2, 5);
        // BEQ $1, $2, 2 at pc=0 -> delay slot at 4, target = 4 + (2<<2) = 12
        let instr = i_type(0x04, 1, 2, 2);
        op_beq(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.pc(), 4, "delay slot executes first");
        cpu.step(&mut bus).unwrap(); // delay slot: NOP
        assert_eq!(cpu.pc(), 12);
    }

    #[test]
    fn bgezal_links_even_when_not_taken() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_pc(0);
        cpu.set_reg(1, u32::MAX); // negative, BGEZ condition false
        let instr = i_type(0x01, 1, 0x11, 4); // rt=0x11 => BGEZAL
        op_regimm(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(31), 8);
        assert_eq!(cpu.pc(), 4, "not taken, falls through to next instruction");
    }
}
