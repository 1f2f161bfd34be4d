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

use std::io::{self, Write};

use amplify::IoError;

use super::{AluError, Instr};
use crate::core::{Core, MemOutOfBounds, OperandMode, RegOutOfBounds, Status, R0, R1};

/// Program counter movement after instruction execution
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ExecStep {
    /// Move to the next instruction
    Next,

    /// Jump to the absolute memory address
    Jump(u8),

    /// Stop program execution
    Stop,
}

/// Errors terminating program execution.
#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum ExecError {
    /// Wrong instruction {opcode} at address {pc}
    InvalidOpcode { opcode: u8, pc: u16 },

    /// Memory access error.
    #[display(inner)]
    #[from]
    Memory(MemOutOfBounds),

    /// Register access error.
    #[display(inner)]
    #[from]
    Register(RegOutOfBounds),

    /// ALU failure.
    #[display(inner)]
    #[from]
    Alu(AluError),

    /// stack overflow: stack pointer {0:#04X} can't be moved below address 0x00
    StackOverflow(u8),

    /// stack underflow: stack pointer {0:#04X} can't be moved above address 0xFF
    StackUnderflow(u8),

    /// unable to write to the output channel ({0})
    #[from]
    #[from(io::Error)]
    Output(IoError),
}

impl Instr {
    /// Executes the instruction located at the current program counter, and moves the program
    /// counter to the next instruction or to the jump target.
    ///
    /// `PRN` writes to the provided `output`.
    pub fn exec(self, core: &mut Core, output: &mut impl Write) -> Result<ExecStep, ExecError> {
        let step = self.exec_op(core, output)?;
        debug_assert!(self.sets_pc() || !matches!(step, ExecStep::Jump(_)), "{self} can't jump");
        match step {
            ExecStep::Next => core.pc += self.width(),
            ExecStep::Jump(pos) => core.pc = pos as u16,
            ExecStep::Stop => {
                core.pc += self.width();
                core.status = Status::Halted;
            }
        }
        Ok(step)
    }

    fn exec_op(self, core: &mut Core, output: &mut impl Write) -> Result<ExecStep, ExecError> {
        match self {
            Instr::Ldi => {
                let reg = core.operand(1)?;
                let val = core.operand(2)?;
                core.regs.set(reg, val)?;
            }
            Instr::Prn => {
                let reg = core.operand(1)?;
                writeln!(output, "{}", core.regs.get(reg)?)?;
            }
            Instr::Hlt => return Ok(ExecStep::Stop),
            Instr::Add | Instr::Mul | Instr::Cmp => {
                let (reg_a, reg_b) = self.alu_operands(core)?;
                core.alu_tagged(self.opcode(), reg_a, reg_b)?;
            }
            Instr::Push => {
                let sp = core.regs.sp();
                let sp = sp.checked_sub(1).ok_or(ExecError::StackOverflow(sp))?;
                core.regs.set_sp(sp);
                let reg = core.operand(1)?;
                let val = core.regs.get(reg)?;
                core.memory.write(sp as u16, val)?;
            }
            Instr::Pop => {
                let reg = core.operand(1)?;
                let val = core.memory.read(core.regs.sp() as u16)?;
                core.regs.set(reg, val)?;
                // the destination may be the stack pointer itself
                let sp = core.regs.sp();
                core.regs.set_sp(sp.checked_add(1).ok_or(ExecError::StackUnderflow(sp))?);
            }
            Instr::Jmp => return core.jump_target().map(ExecStep::Jump),
            Instr::Jeq => {
                if core.fl.is_equal() {
                    return core.jump_target().map(ExecStep::Jump);
                }
            }
            Instr::Jne => {
                if !core.fl.is_equal() {
                    return core.jump_target().map(ExecStep::Jump);
                }
            }
        }
        Ok(ExecStep::Next)
    }

    fn alu_operands(self, core: &Core) -> Result<(u8, u8), MemOutOfBounds> {
        Ok(match core.config().operands {
            OperandMode::Decoded => (core.operand(1)?, core.operand(2)?),
            OperandMode::Fixed if self == Instr::Add => (R0, R0),
            OperandMode::Fixed => (R0, R1),
        })
    }
}

impl Core {
    /// Address stored in the register given by the first operand.
    fn jump_target(&self) -> Result<u8, ExecError> {
        let reg = self.operand(1)?;
        Ok(self.regs.get(reg)?)
    }
}
