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

//! LS-8: a minimal 8-bit register virtual machine.
//!
//! The machine has 256 bytes of memory shared by code, data and the stack, eight 8-bit
//! registers (`R7` being the stack pointer), a program counter and a flags register. Programs are
//! byte sequences loaded at address 0 and executed by a fetch-decode-execute loop until `HLT` or
//! a fault.
//!
//! ```
//! use ls8::{Program, Vm};
//!
//! let program: Program = "
//!     10000010 # LDI R0,8
//!     00000000
//!     00001000
//!     01000111 # PRN R0
//!     00000000
//!     00000001 # HLT
//! "
//! .parse()
//! .unwrap();
//!
//! let mut vm = Vm::new();
//! vm.load(&program).unwrap();
//! let mut out = Vec::new();
//! vm.run(&mut out).unwrap();
//! assert_eq!(out, b"8\n");
//! ```

#[macro_use]
extern crate amplify;

pub mod core;
pub mod isa;
mod masm;
mod program;
mod vm;

#[doc(hidden)]
pub use paste;

pub use self::core::{Core, CoreConfig, OperandMode, Status};
pub use self::isa::{ExecError, ExecStep, Instr};
pub use self::program::{DisasmLine, LoadError, Program};
pub use self::vm::Vm;
