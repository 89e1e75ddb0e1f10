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

//! `SLT`, `SLTU`, `SLTI`, `SLTIU`.
//!
//! `SLTIU` sign-extends its immediate before comparing, exactly like
//! `SLTI` does, but then compares the two 32-bit patterns unsigned.

use crate::bus::MemoryBus;
use crate::byteorder::sext16;
use crate::cpu::decode::{decode_i_type, decode_r_type};
use crate::cpu::Cpu;
use crate::error::CpuResult;

pub(crate) fn op_slt(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, rd, _, _) = decode_r_type(instr);
    let result = (cpu.reg(rs) as i32) < (cpu.reg(rt) as i32);
    cpu.set_reg(rd, result as u32);
    cpu.advance();
    Ok(())
}

pub(crate) fn op_sltu(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, rd, _, _) = decode_r_type(instr);
    let result = cpu.reg(rs) < cpu.reg(rt);
    cpu.set_reg(rd, result as u32);
    cpu.advance();
    Ok(())
}

pub(crate) fn op_slti(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let result = (cpu.reg(rs) as i32) < (sext16(imm) as i32);
    cpu.set_reg(rt, result as u32);
    cpu.advance();
    Ok(())
}

pub(crate) fn op_sltiu(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    let result = cpu.reg(rs) < sext16(imm);
    cpu.set_reg(rt, result as u32);
    cpu.advance();
    Ok(())
}
