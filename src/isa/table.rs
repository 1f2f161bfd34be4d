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

//! Opcode dispatch table.

use super::Instr;

/// Immutable mapping from an opcode byte to the instruction it encodes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DispatchTable([Option<Instr>; 256]);

/// Dispatch table covering the complete LS-8 instruction set.
pub static DISPATCH_TABLE: DispatchTable = DispatchTable::build();

impl DispatchTable {
    /// Builds the table from opcodes of [`Instr::ALL`]; bytes not matching any opcode are left
    /// empty.
    pub const fn build() -> Self {
        let mut table = [None; 256];
        let mut idx = 0;
        while idx < Instr::ALL.len() {
            let instr = Instr::ALL[idx];
            table[instr.opcode() as usize] = Some(instr);
            idx += 1;
        }
        DispatchTable(table)
    }

    /// Looks up the instruction for the given opcode byte.
    #[inline]
    pub fn get(&self, opcode: u8) -> Option<Instr> { self.0[opcode as usize] }

    /// Number of opcodes with an instruction assigned.
    pub fn len(&self) -> usize { self.0.iter().filter(|entry| entry.is_some()).count() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Instr {
    /// Decodes an opcode byte using [`DISPATCH_TABLE`].
    #[inline]
    pub fn decode(opcode: u8) -> Option<Instr> { DISPATCH_TABLE.get(opcode) }
}
