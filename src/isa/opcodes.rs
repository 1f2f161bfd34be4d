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

//! Opcode bytes. The two most significant bits hold the number of operand bytes following the
//! opcode; bit 5 marks ALU instructions and bit 4 marks instructions setting the program counter.

#![allow(missing_docs)]
#![allow(clippy::unusual_byte_groupings)]

// Control
pub const INSTR_HLT: u8 = 0b00_0_0_0001;

// Data movement and output
pub const INSTR_LDI: u8 = 0b10_0_0_0010;
pub const INSTR_PRN: u8 = 0b01_0_0_0111;

// Stack
pub const INSTR_PUSH: u8 = 0b01_0_0_0101;
pub const INSTR_POP: u8 = 0b01_0_0_0110;

// Arithmetic and comparison
pub const INSTR_ADD: u8 = 0b10_1_0_0000;
pub const INSTR_MUL: u8 = 0b10_1_0_0010;
pub const INSTR_CMP: u8 = 0b10_1_0_0111;

// Jumps
pub const INSTR_JMP: u8 = 0b01_0_1_0100;
pub const INSTR_JEQ: u8 = 0b01_0_1_0101;
pub const INSTR_JNE: u8 = 0b01_0_1_0110;

/// Mask selecting the operand count bits of an opcode.
pub const OPERANDS_MASK: u8 = 0b11_0_0_0000;
/// Mask selecting the ALU bit of an opcode.
pub const ALU_MASK: u8 = 0b00_1_0_0000;
/// Mask selecting the PC-setting bit of an opcode.
pub const SETS_PC_MASK: u8 = 0b00_0_1_0000;
