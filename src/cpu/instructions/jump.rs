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

//! `J`, `JAL`, `JR`, `JALR`.

use crate::bus::MemoryBus;
use crate::cpu::decode::{decode_j_type, decode_r_type};
use crate::cpu::Cpu;
use crate::error::{CpuError, CpuResult, MemoryError};

pub(crate) fn op_j(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, target) = decode_j_type(instr);
    let base = cpu.pc().wrapping_add(4);
    let destination = (base & 0xF000_0000) | (target << 2);
    cpu.set_branch_delay(destination);
    Ok(())
}

pub(crate) fn op_jal(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, target) = decode_j_type(instr);
    let base = cpu.pc().wrapping_add(4);
    let destination = (base & 0xF000_0000) | (target << 2);
    cpu.set_reg(31, cpu.pc().wrapping_add(8));
    cpu.set_branch_delay(destination);
    Ok(())
}

/// Register-indirect jump. Raises `InvalidAlignment` when the target is
/// not 4-byte aligned, leaving `pc` untouched, rather than letting a
/// misaligned fetch fail one step later.
pub(crate) fn op_jr(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, _, _, _, _) = decode_r_type(instr);
    let target = cpu.reg(rs);
    if target % 4 != 0 {
        return Err(CpuError::InvalidAlignment {
            pc: cpu.pc(),
            source: MemoryError::Misaligned {
                address: target,
                length: 4,
            },
        });
    }
    cpu.set_branch_delay(target);
    Ok(())
}

pub(crate) fn op_jalr(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, _, rd, _, _) = decode_r_type(instr);
    let target = cpu.reg(rs);
    if target % 4 != 0 {
        return Err(CpuError::InvalidAlignment {
            pc: cpu.pc(),
            source: MemoryError::Misaligned {
                address: target,
                length: 4,
            },
        });
    }
    cpu.set_reg(rd, cpu.pc().wrapping_add(8));
    cpu.set_branch_delay(target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::VecBus;

    #[test]
    fn jal_links_return_address_and_enters_delay_slot() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 64);
        cpu.set_pc(0);
        // JAL target=2 (word index) -> byte target 8
        let instr = (0x03u32 << 26) | 2;
        op_jal(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(31), 8, "link points past the delay slot");
        assert_eq!(cpu.pc(), 4, "delay slot executes before the jump lands");
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.pc(), 8);
    }

    #[test]
    fn jr_rejects_misaligned_target() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_reg(1, 3);
        let instr = 1 << 21; // JR $1
        let err = op_jr(&mut cpu, &mut bus, instr).unwrap_err();
        assert!(matches!(err, CpuError::InvalidAlignment { .. }));
        assert_eq!(cpu.pc(), 0);
    }
}
