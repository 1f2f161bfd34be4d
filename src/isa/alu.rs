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

//! Arithmetic logic unit.

use core::str::FromStr;

use super::opcodes::{INSTR_ADD, INSTR_CMP, INSTR_MUL};
use crate::core::{Core, Flags, RegOutOfBounds};

/// Operations supported by the ALU.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
pub enum AluOp {
    /// Wrapping 8-bit addition.
    #[display("ADD")]
    Add,

    /// Wrapping 8-bit multiplication.
    #[display("MUL")]
    Mul,

    /// Comparison setting the flags register.
    #[display("CMP")]
    Cmp,
}

/// Errors produced by the ALU.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum AluError {
    /// unsupported ALU operation with opcode {0:#010b}
    UnsupportedOpcode(u8),

    /// unsupported ALU operation `{0}`
    UnsupportedMnemonic(String),

    /// Operand register access failure.
    #[display(inner)]
    #[from]
    Register(RegOutOfBounds),
}

impl TryFrom<u8> for AluOp {
    type Error = AluError;

    fn try_from(opcode: u8) -> Result<Self, Self::Error> {
        match opcode {
            INSTR_ADD => Ok(AluOp::Add),
            INSTR_MUL => Ok(AluOp::Mul),
            INSTR_CMP => Ok(AluOp::Cmp),
            other => Err(AluError::UnsupportedOpcode(other)),
        }
    }
}

impl FromStr for AluOp {
    type Err = AluError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADD" => Ok(AluOp::Add),
            "MUL" => Ok(AluOp::Mul),
            "CMP" => Ok(AluOp::Cmp),
            _ => Err(AluError::UnsupportedMnemonic(s.to_owned())),
        }
    }
}

/// Microcode for the arithmetic logic unit.
impl Core {
    /// Applies ALU operation to registers `reg_a` and `reg_b`.
    ///
    /// `ADD` and `MUL` store their result in `reg_a`; `CMP` modifies only the flags register.
    pub fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), AluError> {
        let a = self.regs.get(reg_a)?;
        let b = self.regs.get(reg_b)?;
        match op {
            AluOp::Add => self.regs.set(reg_a, a.wrapping_add(b))?,
            AluOp::Mul => self.regs.set(reg_a, a.wrapping_mul(b))?,
            AluOp::Cmp => self.fl = Flags::with_ordering(a.cmp(&b)),
        }
        Ok(())
    }

    /// Applies ALU operation given by its tag (instruction opcode).
    ///
    /// # Errors
    ///
    /// With [`AluError::UnsupportedOpcode`] if the tag is none of `ADD`, `MUL` or `CMP`; registers
    /// and flags are not modified in this case.
    pub fn alu_tagged(&mut self, tag: u8, reg_a: u8, reg_b: u8) -> Result<(), AluError> {
        self.alu(AluOp::try_from(tag)?, reg_a, reg_b)
    }
}
