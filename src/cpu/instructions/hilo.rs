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

//! `MFHI`, `MTHI`, `MFLO`, `MTLO`.

use crate::bus::MemoryBus;
use crate::cpu::decode::decode_r_type;
use crate::cpu::Cpu;
use crate::error::CpuResult;

pub(crate) fn op_mfhi(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, _, rd, _, _) = decode_r_type(instr);
    cpu.set_reg(rd, cpu.hi_lo().hi());
    cpu.advance();
    Ok(())
}

pub(crate) fn op_mthi(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, _, _, _, _) = decode_r_type(instr);
    let value = cpu.reg(rs);
    cpu.hi_lo_mut().set_hi(value);
    cpu.advance();
    Ok(())
}

pub(crate) fn op_mflo(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, _, rd, _, _) = decode_r_type(instr);
    cpu.set_reg(rd, cpu.hi_lo().lo());
    cpu.advance();
    Ok(())
}

pub(crate) fn op_mtlo(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, _, _, _, _) = decode_r_type(instr);
    let value = cpu.reg(rs);
    cpu.hi_lo_mut().set_lo(value);
    cpu.advance();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::VecBus;

    #[test]
    fn mfhi_and_mflo_read_back_hi_lo() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.hi_lo_mut().set_full(0x1111_2222_3333_4444);
        op_mfhi(&mut cpu, &mut bus, 1 << 11).unwrap();
        assert_eq!(cpu.reg(1), 0x1111_2222);
        op_mflo(&mut cpu, &mut bus, 2 << 11).unwrap();
        assert_eq!(cpu.reg(2), 0x3333_4444);
    }
}
