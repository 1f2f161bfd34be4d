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

//! LS-8 virtual machine

use std::io::Write;

use crate::core::{Core, CoreConfig, MemOutOfBounds, Status};
use crate::isa::{ExecError, ExecStep, DISPATCH_TABLE};
use crate::Program;

/// LS-8 virtual machine providing single-core execution environment
#[derive(Getters, Clone, Debug, Default)]
pub struct Vm {
    /// Machine state
    core: Core,
}

/// Runtime for program execution.
impl Vm {
    /// Constructs new virtual machine instance with default core configuration.
    #[inline]
    pub fn new() -> Self { Vm::default() }

    /// Constructs new virtual machine instance with the provided core configuration.
    #[inline]
    pub fn with(config: CoreConfig) -> Self { Vm { core: Core::with(config) } }

    #[inline]
    pub fn core_mut(&mut self) -> &mut Core { &mut self.core }

    /// Copies program bytes into memory starting from address 0.
    pub fn load(&mut self, program: &Program) -> Result<(), MemOutOfBounds> {
        self.core.memory_mut().load(0, program.as_bytes())
    }

    /// Initializes the stack pointer and puts the machine into running state.
    #[inline]
    pub fn boot(&mut self) { self.core.boot() }

    /// Fetches, decodes and executes a single instruction at the current program counter.
    ///
    /// Stepping a machine which is not running does nothing.
    ///
    /// # Returns
    ///
    /// Machine status after the step.
    ///
    /// # Errors
    ///
    /// Any execution error; the machine is put into [`Status::Faulted`] state in this case.
    pub fn step(&mut self, output: &mut impl Write) -> Result<Status, ExecError> {
        if !self.core.status().is_running() {
            return Ok(self.core.status());
        }

        #[cfg(feature = "log")]
        let (g, r, y, z) = ("\x1B[0;32m", "\x1B[0;31m", "\x1B[0;33m", "\x1B[0m");

        match self.exec_next(output) {
            Ok(_step) => {
                #[cfg(feature = "log")]
                match _step {
                    ExecStep::Next => eprintln!("-> {g}{:02X}{z}", self.core.pc()),
                    ExecStep::Jump(pos) => eprintln!("-> {y}{pos:02X}{z}"),
                    ExecStep::Stop => eprintln!("-> {g}halted{z}"),
                }
                Ok(self.core.status())
            }
            Err(err) => {
                self.core.status = Status::Faulted;
                #[cfg(feature = "log")]
                eprintln!("-> {r}{err}{z}");
                Err(err)
            }
        }
    }

    fn exec_next(&mut self, output: &mut impl Write) -> Result<ExecStep, ExecError> {
        #[cfg(feature = "log")]
        let (m, w, d, z) = ("\x1B[0;35m", "\x1B[1;1m", "\x1B[0;37;2m", "\x1B[0m");

        let pc = self.core.pc();
        #[cfg(feature = "log")]
        eprint!("{d}{}{z} {m}@x{pc:02X}:{z} ", self.core.trace());

        let opcode = self.core.ram_read(pc)?;
        let instr = DISPATCH_TABLE
            .get(opcode)
            .ok_or(ExecError::InvalidOpcode { opcode, pc })?;

        #[cfg(feature = "log")]
        eprint!("{w}{: <4}{z} ", instr.to_string());

        instr.exec(&mut self.core, output)
    }

    /// Boots the machine and executes instructions until it halts or faults.
    ///
    /// `PRN` output goes to `output`.
    pub fn run(&mut self, output: &mut impl Write) -> Result<(), ExecError> {
        self.boot();
        while self.core.status().is_running() {
            self.step(output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{R0, SP, SP_INIT};
    use crate::isa::opcodes::*;

    fn vm(code: &[u8]) -> Vm {
        let mut vm = Vm::new();
        vm.load(&Program::new(code).unwrap()).unwrap();
        vm
    }

    #[test]
    fn boot_is_not_construction() {
        let mut vm = Vm::new();
        assert_eq!(vm.core().registers().get(SP), Ok(0));
        vm.boot();
        assert_eq!(vm.core().registers().get(SP), Ok(SP_INIT));
    }

    #[test]
    fn step_by_step() {
        let mut vm = vm(&[INSTR_LDI, R0, 8, INSTR_PRN, R0, INSTR_HLT]);
        vm.boot();
        let mut out = Vec::new();
        assert_eq!(vm.step(&mut out), Ok(Status::Running));
        assert_eq!(vm.core().pc(), 3);
        assert_eq!(vm.step(&mut out), Ok(Status::Running));
        assert_eq!(out, b"8\n");
        assert_eq!(vm.step(&mut out), Ok(Status::Halted));
        assert_eq!(vm.core().pc(), 6);

        // terminal state
        assert_eq!(vm.step(&mut out), Ok(Status::Halted));
        assert_eq!(vm.core().pc(), 6);
        assert_eq!(out, b"8\n");
    }

    #[test]
    fn invalid_opcode_faults() {
        let mut vm = vm(&[INSTR_LDI, R0, 8, 0xFF]);
        let mut out = Vec::new();
        let err = vm.run(&mut out).unwrap_err();
        assert_eq!(err, ExecError::InvalidOpcode { opcode: 0xFF, pc: 3 });
        assert_eq!(err.to_string(), "Wrong instruction 255 at address 3");
        assert_eq!(vm.core().status(), Status::Faulted);
        assert_eq!(vm.core().registers().get(R0), Ok(8));
        assert_eq!(vm.step(&mut out), Ok(Status::Faulted));
    }

    #[test]
    fn handler_error_faults() {
        let mut vm = vm(&[INSTR_LDI, 8, 1]);
        let mut out = Vec::new();
        assert!(matches!(vm.run(&mut out), Err(ExecError::Register(_))));
        assert_eq!(vm.core().status(), Status::Faulted);
        assert_eq!(vm.core().pc(), 0);
    }

    #[test]
    fn fetch_past_memory_end() {
        let mut vm = Vm::new();
        vm.core_mut().ram_write(0xFE, INSTR_PRN).unwrap();
        vm.core_mut().set_pc(0xFE);
        let mut out = Vec::new();
        assert_eq!(vm.run(&mut out), Err(ExecError::Memory(MemOutOfBounds(0x100))));
        assert_eq!(out, b"0\n");
        assert_eq!(vm.core().pc(), 0x100);
    }

    #[test]
    fn reboot_after_halt() {
        let mut vm = vm(&[INSTR_HLT]);
        let mut out = Vec::new();
        vm.run(&mut out).unwrap();
        assert!(vm.core().is_halted());
        vm.core_mut().set_pc(0);
        vm.run(&mut out).unwrap();
        assert_eq!(vm.core().pc(), 1);
    }
}
