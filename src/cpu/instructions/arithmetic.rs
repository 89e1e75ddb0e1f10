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

//! `ADD`, `ADDU`, `SUB`, `SUBU`, `ADDI`, `ADDIU`.
//!
//! Subtraction is addition of the negated operand: the same overflow
//! check that guards `ADD`/`ADDI` covers `SUB` once the right-hand side
//! is negated first, so one helper serves both signed forms.

use crate::bus::MemoryBus;
use crate::byteorder::sext16;
use crate::cpu::decode::{decode_i_type, decode_r_type};
use crate::cpu::Cpu;
use crate::error::{CpuError, CpuResult};

fn checked_add(cpu: &mut Cpu, pc: u32, rd: u8, lhs: u32, rhs: u32, trap_on_overflow: bool) -> CpuResult<()> {
    if trap_on_overflow {
        match (lhs as i32).checked_add(rhs as i32) {
            Some(sum) => {
                cpu.set_reg(rd, sum as u32);
                Ok(())
            }
            None => Err(CpuError::ArithmeticOverflow { pc }),
        }
    } else {
        cpu.set_reg(rd, lhs.wrapping_add(rhs));
        Ok(())
    }
}

pub(crate) fn op_add(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, rd, _, _) = decode_r_type(instr);
    checked_add(cpu, cpu.pc(), rd, cpu.reg(rs), cpu.reg(rt), true)?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_addu(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, rd, _, _) = decode_r_type(instr);
    checked_add(cpu, cpu.pc(), rd, cpu.reg(rs), cpu.reg(rt), false)?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_sub(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, rd, _, _) = decode_r_type(instr);
    checked_add(cpu, cpu.pc(), rd, cpu.reg(rs), cpu.reg(rt).wrapping_neg(), true)?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_subu(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (rs, rt, rd, _, _) = decode_r_type(instr);
    checked_add(cpu, cpu.pc(), rd, cpu.reg(rs), cpu.reg(rt).wrapping_neg(), false)?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_addi(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    checked_add(cpu, cpu.pc(), rt, cpu.reg(rs), sext16(imm), true)?;
    cpu.advance();
    Ok(())
}

pub(crate) fn op_addiu(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let (_, rs, rt, imm) = decode_i_type(instr);
    checked_add(cpu, cpu.pc(), rt, cpu.reg(rs), sext16(imm), false)?;
    cpu.advance();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::VecBus;
    use proptest::prelude::*;

    fn r_type(funct: u32, rs: u32, rt: u32, rd: u32) -> u32 {
        (rs << 21) | (rt << 16) | (rd << 11) | funct
    }

    #[test]
    fn add_traps_on_signed_overflow() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_reg(1, i32::MAX as u32);
        cpu.set_reg(2, 1);
        let instr = r_type(0x20, 1, 2, 3);
        let err = op_add(&mut cpu, &mut bus, instr).unwrap_err();
        assert!(matches!(err, CpuError::ArithmeticOverflow { .. }));
        assert_eq!(cpu.reg(3), 0);
    }

    #[test]
    fn addu_wraps_without_trapping() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_reg(1, u32::MAX);
        cpu.set_reg(2, 1);
        let instr = r_type(0x21, 1, 2, 3);
        op_addu(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(3), 0);
    }

    #[test]
    fn sub_is_add_of_negated_operand() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_reg(1, 10);
        cpu.set_reg(2, 3);
        let instr = r_type(0x22, 1, 2, 3);
        op_sub(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(3), 7);
    }

    #[test]
    fn addi_sign_extends_immediate() {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);
        cpu.set_reg(1, 10);
        // ADDI $2, $1, -1
        let instr = (0x08u32 << 26) | (1 << 21) | (2 << 16) | 0xFFFF;
        op_addi(&mut cpu, &mut bus, instr).unwrap();
        assert_eq!(cpu.reg(2), 9);
    }

    proptest! {
        /// `ADDI $2, $1, imm` agrees with `rs + sign_extend_32(imm)` modulo
        /// 2^32 whenever no signed overflow occurs, and raises
        /// `ArithmeticOverflow` exactly when signed overflow would occur,
        /// for every 16-bit immediate and a sample of `rs` values.
        #[test]
        fn addi_agrees_with_checked_signed_addition(rs_value in any::<i32>(), imm in any::<u16>()) {
            let mut cpu = Cpu::new();
            let mut bus = VecBus::new(0, 16);
            cpu.set_reg(1, rs_value as u32);
            let instr = (0x08u32 << 26) | (1 << 21) | (2 << 16) | (imm as u32);

            let expected = rs_value.checked_add(imm as i16 as i32);
            let result = op_addi(&mut cpu, &mut bus, instr);

            match expected {
                Some(sum) => {
                    result.unwrap();
                    prop_assert_eq!(cpu.reg(2), sum as u32);
                }
                None => {
                    prop_assert!(matches!(result.unwrap_err(), CpuError::ArithmeticOverflow { .. }));
                    prop_assert_eq!(cpu.reg(2), 0, "overflow must leave the destination register untouched");
                }
            }
        }
    }
}
