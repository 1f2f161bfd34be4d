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

//! LS-8 machine state: memory, registers and control registers.

#[allow(clippy::module_inception)]
mod core;
mod memory;
mod regs;

pub use self::core::{Core, CoreConfig, OperandMode, Status};
pub use self::memory::{MemOutOfBounds, Memory, MEMORY_SIZE};
pub use self::regs::{
    Flags, RegOutOfBounds, Registers, R0, R1, R2, R3, R4, R5, R6, R7, REG_COUNT, SP, SP_INIT,
};
