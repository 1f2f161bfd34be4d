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

use core::fmt::{self, Debug, Formatter, Write};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::{Flags, MemOutOfBounds, Memory, Registers, REG_COUNT, SP_INIT};

/// Execution status of a core.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(crate = "serde_crate"))]
pub enum Status {
    /// Core fetches and executes instructions.
    #[default]
    #[display("running")]
    Running,

    /// `HLT` instruction was executed.
    #[display("halted")]
    Halted,

    /// Execution was aborted by an error.
    #[display("faulted")]
    Faulted,
}

impl Status {
    #[inline]
    pub fn is_running(self) -> bool { self == Status::Running }
}

/// Source of the register operands for `ADD`, `MUL` and `CMP` instructions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(crate = "serde_crate"))]
pub enum OperandMode {
    /// Register indexes are read from the two bytes following the opcode.
    #[default]
    #[display("decoded")]
    Decoded,

    /// Operand bytes are skipped and hard-wired registers are used: `ADD` works on `R0, R0`,
    /// `MUL` and `CMP` on `R0, R1`.
    #[display("fixed")]
    Fixed,
}

/// Configuration for [`Core`] initialization.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(crate = "serde_crate"))]
pub struct CoreConfig {
    /// How ALU instructions pick their register operands.
    pub operands: OperandMode,
}

/// Machine state of a single LS-8 core.
#[derive(Clone, Eq, PartialEq)]
pub struct Core {
    pub(crate) memory: Memory,
    pub(crate) regs: Registers,
    /// Program counter.
    pub(crate) pc: u16,
    pub(crate) fl: Flags,
    pub(crate) status: Status,
    config: CoreConfig,
}

impl Default for Core {
    fn default() -> Self { Core::with(default!()) }
}

impl Core {
    /// Initializes zero-filled core using the default configuration.
    ///
    /// An alias for [`Core::with`]`(`[`CoreConfig::default()`]`)`.
    #[inline]
    pub fn new() -> Self { Core::default() }

    /// Initializes zero-filled core using a configuration object [`CoreConfig`].
    pub fn with(config: CoreConfig) -> Self {
        Core {
            memory: Memory::new(),
            regs: Registers::new(),
            pc: 0,
            fl: Flags::empty(),
            status: Status::Running,
            config,
        }
    }

    /// Prepares the core for running a program: the stack pointer is set to [`SP_INIT`] and the
    /// status to [`Status::Running`]. Memory, other registers and the program counter are kept.
    pub fn boot(&mut self) {
        self.regs.set_sp(SP_INIT);
        self.status = Status::Running;
    }

    #[inline]
    pub fn config(&self) -> CoreConfig { self.config }

    #[inline]
    pub fn memory(&self) -> &Memory { &self.memory }

    #[inline]
    pub fn memory_mut(&mut self) -> &mut Memory { &mut self.memory }

    #[inline]
    pub fn registers(&self) -> &Registers { &self.regs }

    #[inline]
    pub fn registers_mut(&mut self) -> &mut Registers { &mut self.regs }

    #[inline]
    pub fn pc(&self) -> u16 { self.pc }

    #[inline]
    pub fn set_pc(&mut self, pc: u16) { self.pc = pc }

    #[inline]
    pub fn flags(&self) -> Flags { self.fl }

    #[inline]
    pub fn status(&self) -> Status { self.status }

    #[inline]
    pub fn is_halted(&self) -> bool { self.status == Status::Halted }

    /// Reads memory at the given address.
    #[inline]
    pub fn ram_read(&self, addr: u16) -> Result<u8, MemOutOfBounds> { self.memory.read(addr) }

    /// Writes memory at the given address.
    #[inline]
    pub fn ram_write(&mut self, addr: u16, value: u8) -> Result<(), MemOutOfBounds> {
        self.memory.write(addr, value)
    }

    /// Reads the operand byte located `offset` bytes after the current instruction opcode.
    #[inline]
    pub(crate) fn operand(&self, offset: u16) -> Result<u8, MemOutOfBounds> {
        self.memory.read(self.pc + offset)
    }

    /// Single-line dump of the program counter, the three bytes starting at it and all register
    /// values, in hexadecimal.
    ///
    /// Bytes lying past the end of memory are shown as `00`.
    pub fn trace(&self) -> String {
        let byte = |offset: u16| self.memory.get(self.pc + offset).unwrap_or_default();
        let mut line = format!("TRACE: {:02X} | {:02X} {:02X} {:02X} |", self.pc, byte(0), byte(1), byte(2));
        for val in self.regs.as_array() {
            write!(line, " {val:02X}").expect("writing to string");
        }
        line
    }
}

impl Debug for Core {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (sect, reg, val, reset) =
            if f.alternate() { ("\x1B[0;4;1m", "\x1B[0;1m", "\x1B[0;32m", "\x1B[0m") } else { ("", "", "", "") };

        writeln!(f, "{sect}C-regs:{reset}")?;
        write!(f, "{reg}pc{reset} {val}{:02X}{reset}h, ", self.pc)?;
        write!(f, "{reg}fl{reset} {val}{}{reset}, ", self.fl)?;
        write!(f, "{reg}st{reset} {val}{}{reset}, ", self.status)?;
        writeln!(f, "{reg}op{reset} {val}{}{reset}", self.config.operands)?;

        writeln!(f, "{sect}R-regs:{reset}")?;
        for (idx, v) in self.regs.iter() {
            write!(f, "{reg}R{idx}{reset} {val}{v:02X}{reset}h")?;
            if idx + 1 < REG_COUNT {
                write!(f, ", ")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "{sect}Memory:{reset}")?;
        Debug::fmt(&self.memory, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{R0, R7, SP};

    #[test]
    fn construction_is_zeroed() {
        let core = Core::new();
        assert_eq!(core.pc(), 0);
        assert_eq!(core.flags(), Flags::empty());
        assert_eq!(core.status(), Status::Running);
        assert_eq!(core.registers(), &Registers::new());
        assert_eq!(core.memory(), &Memory::new());
        assert_eq!(core.config().operands, OperandMode::Decoded);
    }

    #[test]
    fn boot_sets_stack_pointer() {
        let mut core = Core::new();
        assert_eq!(core.registers().get(SP), Ok(0));
        core.registers_mut().set(R0, 5).unwrap();
        core.set_pc(3);
        core.boot();
        assert_eq!(core.registers().get(R7), Ok(0xF4));
        assert_eq!(core.registers().get(R0), Ok(5));
        assert_eq!(core.pc(), 3);
        assert!(core.status().is_running());
    }

    #[test]
    fn trace_line() {
        let mut core = Core::new();
        core.memory_mut().load(0, &[0b1000_0010, 0x00, 0x08]).unwrap();
        core.boot();
        assert_eq!(core.trace(), "TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4");
    }

    #[test]
    fn trace_past_memory_end() {
        let mut core = Core::new();
        core.ram_write(0xFF, 0x01).unwrap();
        core.set_pc(0xFF);
        assert_eq!(core.trace(), "TRACE: FF | 01 00 00 | 00 00 00 00 00 00 00 00");
    }

    #[test]
    fn debug_dump() {
        let mut core = Core::with(CoreConfig { operands: OperandMode::Fixed });
        core.boot();
        let plain = format!("{core:?}");
        assert!(plain.contains("R7 F4h"));
        assert!(plain.contains("op fixed"));
        assert!(!plain.contains('\x1B'));
        assert!(format!("{core:#?}").contains('\x1B'));
    }
}
