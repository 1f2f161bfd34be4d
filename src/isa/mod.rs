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

//! LS-8 instruction set architecture.

mod alu;
mod exec;
mod instr;
pub mod opcodes;
mod table;

pub use alu::{AluError, AluOp};
pub use exec::{ExecError, ExecStep};
pub use instr::{Instr, UnknownMnemonic};
pub use table::{DispatchTable, DISPATCH_TABLE};
