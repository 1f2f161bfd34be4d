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

//! Command-line runner for LS-8 programs.
//!
//! Usage: `ls8 <program-file>`

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ls8::{ExecError, Program, Vm};

#[derive(Parser, Debug)]
#[command(name = "ls8", version)]
#[command(about = "Run a program on the LS-8 virtual machine")]
struct Args {
    /// Path to the program file in the LS-8 text format
    program: PathBuf,
}

/// Runs the loaded program, writing its output and the invalid opcode diagnostic to `output`.
///
/// The output is flushed in all cases; a failed flush is reported unless the run already failed.
fn execute(vm: &mut Vm, output: &mut impl Write) -> Result<(), ExecError> {
    let res = match vm.run(output) {
        Err(err @ ExecError::InvalidOpcode { .. }) => {
            writeln!(output, "{err}")?;
            Err(err)
        }
        res => res,
    };
    let flushed = output.flush();
    res?;
    flushed?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let program = match Program::load(&args.program) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{}: {err}", args.program.display());
            return ExitCode::FAILURE;
        }
    };

    let mut vm = Vm::new();
    if let Err(err) = vm.load(&program) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();
    match execute(&mut vm, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ExecError::InvalidOpcode { .. }) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
