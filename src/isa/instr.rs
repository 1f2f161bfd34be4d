// LS-8: minimal 8-bit register virtual machine.
//
// SPDX-License-Identifier: Apache-2.0
//
// Written in 2024 by
//     LS-8 contributors
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

use core::str::FromStr;

use super::opcodes::*;

/// LS-8 instruction set.
///
/// Instructions carry no operands: each handler reads its operand bytes from memory following
/// the opcode.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
pub enum Instr {
    /// Load immediate: `LDI reg, value`.
    #[display("LDI")]
    Ldi,

    /// Print decimal register value: `PRN reg`.
    #[display("PRN")]
    Prn,

    /// Halt execution.
    #[display("HLT")]
    Hlt,

    /// Multiply two registers, storing the result in the first one: `MUL reg_a, reg_b`.
    #[display("MUL")]
    Mul,

    /// Add two registers, storing the result in the first one: `ADD reg_a, reg_b`.
    #[display("ADD")]
    Add,

    /// Push register value to the stack: `PUSH reg`.
    #[display("PUSH")]
    Push,

    /// Pop stack top into a register: `POP reg`.
    #[display("POP")]
    Pop,

    /// Compare two registers, setting flags: `CMP reg_a, reg_b`.
    #[display("CMP")]
    Cmp,

    /// Jump to the address stored in a register if the equal flag is set: `JEQ reg`.
    #[display("JEQ")]
    Jeq,

    /// Jump to the address stored in a register if the equal flag is not set: `JNE reg`.
    #[display("JNE")]
    Jne,

    /// Jump to the address stored in a register: `JMP reg`.
    #[display("JMP")]
    Jmp,
}

impl Instr {
    /// All instructions of the set.
    pub const ALL: [Instr; 11] = [
        Instr::Ldi,
        Instr::Prn,
        Instr::Hlt,
        Instr::Mul,
        Instr::Add,
        Instr::Push,
        Instr::Pop,
        Instr::Cmp,
        Instr::Jeq,
        Instr::Jne,
        Instr::Jmp,
    ];

    /// Byte representing instruction code.
    pub const fn opcode(self) -> u8 {
        match self {
            Instr::Ldi => INSTR_LDI,
            Instr::Prn => INSTR_PRN,
            Instr::Hlt => INSTR_HLT,
            Instr::Mul => INSTR_MUL,
            Instr::Add => INSTR_ADD,
            Instr::Push => INSTR_PUSH,
            Instr::Pop => INSTR_POP,
            Instr::Cmp => INSTR_CMP,
            Instr::Jeq => INSTR_JEQ,
            Instr::Jne => INSTR_JNE,
            Instr::Jmp => INSTR_JMP,
        }
    }

    /// Number of operand bytes following the opcode, as encoded in its two most significant bits.
    #[inline]
    pub const fn operand_count(self) -> u8 { (self.opcode() & OPERANDS_MASK) >> 6 }

    /// Full instruction width in bytes, i.e. the distance the program counter moves when the
    /// instruction does not jump.
    #[inline]
    pub const fn width(self) -> u16 { self.operand_count() as u16 + 1 }

    /// Whether the instruction is executed by the ALU.
    #[inline]
    pub const fn is_alu(self) -> bool { self.opcode() & ALU_MASK != 0 }

    /// Whether the instruction may set the program counter directly.
    #[inline]
    pub const fn sets_pc(self) -> bool { self.opcode() & SETS_PC_MASK != 0 }

    /// Lower-case mnemonic, as used by the `ls8asm!` macro.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Instr::Ldi => "ldi",
            Instr::Prn => "prn",
            Instr::Hlt => "hlt",
            Instr::Mul => "mul",
            Instr::Add => "add",
            Instr::Push => "push",
            Instr::Pop => "pop",
            Instr::Cmp => "cmp",
            Instr::Jeq => "jeq",
            Instr::Jne => "jne",
            Instr::Jmp => "jmp",
        }
    }
}

/// Unknown instruction mnemonic.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Display, Error)]
#[display("unknown instruction mnemonic `{0}`")]
pub struct UnknownMnemonic(pub String);

impl FromStr for Instr {
    type Err = UnknownMnemonic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instr::ALL
            .into_iter()
            .find(|instr| instr.mnemonic().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMnemonic(s.to_owned()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn operand_counts() {
        for instr in Instr::ALL {
            let count = match instr {
                Instr::Hlt => 0,
                Instr::Prn | Instr::Push | Instr::Pop | Instr::Jeq | Instr::Jne | Instr::Jmp => 1,
                Instr::Ldi | Instr::Mul | Instr::Add | Instr::Cmp => 2,
            };
            assert_eq!(instr.operand_count(), count, "{instr}");
        }
    }

    #[test]
    fn alu_bit() {
        for instr in Instr::ALL {
            let alu = matches!(instr, Instr::Add | Instr::Mul | Instr::Cmp);
            assert_eq!(instr.is_alu(), alu, "{instr}");
        }
    }

    #[test]
    fn sets_pc_bit() {
        for instr in Instr::ALL {
            let jump = matches!(instr, Instr::Jmp | Instr::Jeq | Instr::Jne);
            assert_eq!(instr.sets_pc(), jump, "{instr}");
        }
    }

    #[test]
    fn widths() {
        assert_eq!(Instr::Hlt.width(), 1);
        assert_eq!(Instr::Prn.width(), 2);
        assert_eq!(Instr::Jmp.width(), 2);
        assert_eq!(Instr::Ldi.width(), 3);
        assert_eq!(Instr::Cmp.width(), 3);
    }

    #[test]
    fn mnemonics() {
        for instr in Instr::ALL {
            assert_eq!(instr.to_string().to_lowercase(), instr.mnemonic());
            assert_eq!(instr.mnemonic().parse::<Instr>(), Ok(instr));
            assert_eq!(instr.to_string().parse::<Instr>(), Ok(instr));
        }
        assert_eq!("div".parse::<Instr>(), Err(UnknownMnemonic(s!("div"))));
    }
}
