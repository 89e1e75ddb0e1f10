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

//! `MULT`, `MULTU`, `DIV`, `DIVU`.
//!
//! Division by zero and signed `INT_MIN / -1` both zero `HI` and `LO`
//! rather than trapping or leaving either register undefined.

use crate::bus::MemoryBus;
use crate::cpu::decode::decode_r_type;
use crate::cpu::Cpu;
use crate::error::CpuResult;

pub(crate) fn op_mult(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, _, _, _) = decode_r_type(instr);
    let product = (cpu.reg(rs) as i32 as i64).wrapping_mul(cpu.reg(rt) as i32 as i64);
    cpu.hi_lo_mut().set_full(product as u64);
    cpu.advance();
    Ok(())
}

pub(crate) fn op_multu(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, _, _, _) = decode_r_type(instr);
    let product = (cpu.reg(rs) as u64).wrapping_mul(cpu.reg(rt) as u64);
    cpu.hi_lo_mut().set_full(product);
    cpu.advance();
    Ok(())
}

pub(crate) fn op_div(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, _, _, _) = decode_r_type(instr);
    let dividend = cpu.reg(rs) as i32;
    let divisor = cpu.reg(rt) as i32;
    if divisor == 0 || (dividend == i32::MIN && divisor == -1) {
        cpu.hi_lo_mut().set_full(0);
    } else {
        cpu.hi_lo_mut().set_lo((dividend / divisor) as u32);
        cpu.hi_lo_mut().set_hi((dividend % divisor) as u32);
    }
    cpu.advance();
    Ok(())
}

pub(crate) fn op_divu(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, _, _, _) = decode_r_type(instr);
    let dividend = cpu.reg(rs);
    let divisor = cpu.reg(rt);
    if divisor == 0 {
        cpu.hi_lo_mut().set_full(0);
    } else {
        cpu.hi_lo_mut().set_lo(dividend / divisor);
        cpu.hi_lo_mut().set_hi(dividend % divisor);
    }
    cpu.advance();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::VecBus;

    fn r_type(rs: u32, rt: u32) -> u32 {
        (rs << 21) | (rt << 16)
    }

    #[test]
    fn div_by_zero_zeroes_hi_and_lo() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_reg(1, 10);
        cpu.set_reg(2, 0);
        op_div(&mut cpu, &mut bus, r_type(1, 2)).unwrap();
        assert_eq!(cpu.hi_lo().full(), 0);
    }

    #[test]
    fn div_int_min_by_minus_one_zeroes_hi_and_lo() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_reg(1, i32::MIN as u32);
        cpu.set_reg(2, 0xFFFF_FFFF); // -1
        op_div(&mut cpu, &mut bus, r_type(1, 2)).unwrap();
        assert_eq!(cpu.hi_lo().full(), 0);
    }

    #[test]
    fn mult_produces_64_bit_signed_product() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_reg(1, 0xFFFF_FFFF); // -1
        cpu.set_reg(2, 0xFFFF_FFFF); // -1
        op_mult(&mut cpu, &mut bus, r_type(1, 2)).unwrap();
        assert_eq!(cpu.hi_lo().full(), 1);
    }
}
