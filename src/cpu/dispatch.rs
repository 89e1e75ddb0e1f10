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

//! The two fixed 64-entry dispatch tables: [`OPCODE_TABLE`] indexed by
//! the top-level opcode field, and [`FUNCT_TABLE`] indexed by the
//! funct field of a SPECIAL (opcode 0) instruction. Every entry binds a
//! mnemonic, used only for debug tracing, to a handler function with
//! the same signature, so every slot is a plain `fn` pointer.

use crate::bus::MemoryBus;
use crate::cpu::decode::funct;
use crate::cpu::instructions::{
    arithmetic, branch, coprocessor, hilo, jump, load, logical, muldiv, setlt, shift, store, trap,
};
use crate::cpu::Cpu;
use crate::error::{CpuError, CpuResult};

pub(crate) type OpcodeHandler = fn(&mut Cpu, &mut dyn MemoryBus, u32) -> CpuResult<()>;

pub(crate) struct OpBinding {
    pub(crate) mnemonic: &'static str,
    pub(crate) handler: OpcodeHandler,
}

const fn bind(mnemonic: &'static str, handler: OpcodeHandler) -> Option<OpBinding> {
    Some(OpBinding { mnemonic, handler })
}

/// Opcode `0x00`, SPECIAL: looks up [`FUNCT_TABLE`] instead of naming a
/// single handler directly.
fn dispatch_special(cpu: &mut Cpu, bus: &mut dyn MemoryBus, instr: u32) -> CpuResult<()> {
    let f = funct(instr);
    match FUNCT_TABLE[f as usize].as_ref() {
        Some(binding) => (binding.handler)(cpu, bus, instr),
        None => Err(CpuError::InvalidInstruction {
            pc: cpu.pc(),
            word: instr,
        }),
    }
}

pub(crate) static OPCODE_TABLE: [Option<OpBinding>; 64] = [
    /* 0x00 */ bind("SPECIAL", dispatch_special),
    /* 0x01 */ bind("REGIMM", branch::op_regimm),
    /* 0x02 */ bind("J", jump::op_j),
    /* 0x03 */ bind("JAL", jump::op_jal),
    /* 0x04 */ bind("BEQ", branch::op_beq),
    /* 0x05 */ bind("BNE", branch::op_bne),
    /* 0x06 */ bind("BLEZ", branch::op_blez),
    /* 0x07 */ bind("BGTZ", branch::op_bgtz),
    /* 0x08 */ bind("ADDI", arithmetic::op_addi),
    /* 0x09 */ bind("ADDIU", arithmetic::op_addiu),
    /* 0x0A */ bind("SLTI", setlt::op_slti),
    /* 0x0B */ bind("SLTIU", setlt::op_sltiu),
    /* 0x0C */ bind("ANDI", logical::op_andi),
    /* 0x0D */ bind("ORI", logical::op_ori),
    /* 0x0E */ bind("XORI", logical::op_xori),
    /* 0x0F */ bind("LUI", logical::op_lui),
    /* 0x10 */ bind("COP0", coprocessor::op_copz),
    /* 0x11 */ bind("COP1", coprocessor::op_copz),
    /* 0x12 */ bind("COP2", coprocessor::op_copz),
    /* 0x13 */ bind("COP3", coprocessor::op_copz),
    /* 0x14 */ None,
    /* 0x15 */ None,
    /* 0x16 */ None,
    /* 0x17 */ None,
    /* 0x18 */ None,
    /* 0x19 */ None,
    /* 0x1A */ None,
    /* 0x1B */ None,
    /* 0x1C */ None,
    /* 0x1D */ None,
    /* 0x1E */ None,
    /* 0x1F */ None,
    /* 0x20 */ bind("LB", load::op_lb),
    /* 0x21 */ bind("LH", load::op_lh),
    /* 0x22 */ bind("LWL", load::op_lwl),
    /* 0x23 */ bind("LW", load::op_lw),
    /* 0x24 */ bind("LBU", load::op_lbu),
    /* 0x25 */ bind("LHU", load::op_lhu),
    /* 0x26 */ bind("LWR", load::op_lwr),
    /* 0x27 */ None,
    /* 0x28 */ bind("SB", store::op_sb),
    /* 0x29 */ bind("SH", store::op_sh),
    /* 0x2A */ bind("SWL", store::op_swl),
    /* 0x2B */ bind("SW", store::op_sw),
    /* 0x2C */ None,
    /* 0x2D */ None,
    /* 0x2E */ bind("SWR", store::op_swr),
    /* 0x2F */ None,
    /* 0x30 */ bind("LWC0", coprocessor::op_lwcz),
    /* 0x31 */ bind("LWC1", coprocessor::op_lwcz),
    /* 0x32 */ bind("LWC2", coprocessor::op_lwcz),
    /* 0x33 */ bind("LWC3", coprocessor::op_lwcz),
    /* 0x34 */ None,
    /* 0x35 */ None,
    /* 0x36 */ None,
    /* 0x37 */ None,
    /* 0x38 */ bind("SWC0", coprocessor::op_swcz),
    /* 0x39 */ bind("SWC1", coprocessor::op_swcz),
    /* 0x3A */ bind("SWC2", coprocessor::op_swcz),
    /* 0x3B */ bind("SWC3", coprocessor::op_swcz),
    /* 0x3C */ None,
    /* 0x3D */ None,
    /* 0x3E */ None,
    /* 0x3F */ None,
];

pub(crate) static FUNCT_TABLE: [Option<OpBinding>; 64] = [
    /* 0x00 */ bind("SLL", shift::op_sll),
    /* 0x01 */ None,
    /* 0x02 */ bind("SRL", shift::op_srl),
    /* 0x03 */ bind("SRA", shift::op_sra),
    /* 0x04 */ bind("SLLV", shift::op_sllv),
    /* 0x05 */ None,
    /* 0x06 */ bind("SRLV", shift::op_srlv),
    /* 0x07 */ bind("SRAV", shift::op_srav),
    /* 0x08 */ bind("JR", jump::op_jr),
    /* 0x09 */ bind("JALR", jump::op_jalr),
    /* 0x0A */ None,
    /* 0x0B */ None,
    /* 0x0C */ bind("SYSCALL", trap::op_syscall),
    /* 0x0D */ bind("BREAK", trap::op_break),
    /* 0x0E */ None,
    /* 0x0F */ None,
    /* 0x10 */ bind("MFHI", hilo::op_mfhi),
    /* 0x11 */ bind("MTHI", hilo::op_mthi),
    /* 0x12 */ bind("MFLO", hilo::op_mflo),
    /* 0x13 */ bind("MTLO", hilo::op_mtlo),
    /* 0x14 */ None,
    /* 0x15 */ None,
    /* 0x16 */ None,
    /* 0x17 */ None,
    /* 0x18 */ bind("MULT", muldiv::op_mult),
    /* 0x19 */ bind("MULTU", muldiv::op_multu),
    /* 0x1A */ bind("DIV", muldiv::op_div),
    /* 0x1B */ bind("DIVU", muldiv::op_divu),
    /* 0x1C */ None,
    /* 0x1D */ None,
    /* 0x1E */ None,
    /* 0x1F */ None,
    /* 0x20 */ bind("ADD", arithmetic::op_add),
    /* 0x21 */ bind("ADDU", arithmetic::op_addu),
    /* 0x22 */ bind("SUB", arithmetic::op_sub),
    /* 0x23 */ bind("SUBU", arithmetic::op_subu),
    /* 0x24 */ bind("AND", logical::op_and),
    /* 0x25 */ bind("OR", logical::op_or),
    /* 0x26 */ bind("XOR", logical::op_xor),
    /* 0x27 */ bind("NOR", logical::op_nor),
    /* 0x28 */ None,
    /* 0x29 */ None,
    /* 0x2A */ bind("SLT", setlt::op_slt),
    /* 0x2B */ bind("SLTU", setlt::op_sltu),
    /* 0x2C */ None,
    /* 0x2D */ None,
    /* 0x2E */ None,
    /* 0x2F */ None,
    /* 0x30 */ None,
    /* 0x31 */ None,
    /* 0x32 */ None,
    /* 0x33 */ None,
    /* 0x34 */ None,
    /* 0x35 */ None,
    /* 0x36 */ None,
    /* 0x37 */ None,
    /* 0x38 */ None,
    /* 0x39 */ None,
    /* 0x3A */ None,
    /* 0x3B */ None,
    /* 0x3C */ None,
    /* 0x3D */ None,
    /* 0x3E */ None,
    /* 0x3F */ None,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_table_resolves_lw_to_its_handler() {
        let binding = OPCODE_TABLE[0x23].as_ref().unwrap();
        assert_eq!(binding.mnemonic, "LW");
    }

    #[test]
    fn funct_table_resolves_add_to_its_handler() {
        let binding = FUNCT_TABLE[0x20].as_ref().unwrap();
        assert_eq!(binding.mnemonic, "ADD");
    }

    #[test]
    fn reserved_opcode_slot_is_empty() {
        assert!(OPCODE_TABLE[0x14].is_none());
        assert!(FUNCT_TABLE[0x01].is_none());
    }
}
