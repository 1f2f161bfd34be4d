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

//! Program images and their text encoding.

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use amplify::IoError;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::core::MEMORY_SIZE;
use crate::isa::{Instr, DISPATCH_TABLE};

/// Errors happening during program loading.
#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum LoadError {
    /// unable to read the program file: {0}
    #[from]
    #[from(io::Error)]
    Io(IoError),

    /// line {line} contains `{token}`, which is not a valid 8-bit binary literal
    InvalidLiteral { line: usize, token: String },

    /// program of {0} bytes does not fit into the 256-byte memory
    TooLarge(usize),
}

/// Program image: the bytes loaded into memory from address 0 upwards.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct Program {
    code: Vec<u8>,
}

impl Program {
    /// Constructs a program from raw bytes.
    ///
    /// # Errors
    ///
    /// With [`LoadError::TooLarge`] if the code does not fit into memory.
    pub fn new(code: impl Into<Vec<u8>>) -> Result<Self, LoadError> {
        let code = code.into();
        if code.len() > MEMORY_SIZE as usize {
            return Err(LoadError::TooLarge(code.len()));
        }
        Ok(Program { code })
    }

    /// Parses the text encoding of a program.
    ///
    /// Each line holds at most one byte written as a base-2 literal. Everything after `#` is a
    /// comment; blank lines and lines holding only a comment are skipped. Literals may carry a
    /// `0b` prefix and `_` digit separators.
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        let mut code = Vec::new();
        for (no, line) in source.lines().enumerate() {
            let token = line.split('#').next().unwrap_or_default().trim();
            if token.is_empty() {
                continue;
            }
            let byte = parse_literal(token)
                .ok_or_else(|| LoadError::InvalidLiteral { line: no + 1, token: token.to_owned() })?;
            code.push(byte);
        }
        Program::new(code)
    }

    /// Reads and parses a program file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let source = fs::read_to_string(path)?;
        Program::parse(&source)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] { &self.code }

    #[inline]
    pub fn len(&self) -> usize { self.code.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.code.is_empty() }

    /// Decodes the program into instructions, in address order.
    ///
    /// Disassembly is linear: bytes that do not start a known instruction, or an instruction
    /// truncated by the end of the program, are reported as raw data.
    pub fn disassemble(&self) -> Vec<DisasmLine> {
        let mut lines = Vec::new();
        let mut pos = 0usize;
        while let Some(&opcode) = self.code.get(pos) {
            let line = match DISPATCH_TABLE.get(opcode) {
                Some(instr) if pos + instr.width() as usize <= self.code.len() => {
                    let operands = self.code[pos + 1..pos + instr.width() as usize].to_vec();
                    DisasmLine { addr: pos as u16, instr: Some(instr), operands }
                }
                _ => DisasmLine { addr: pos as u16, instr: None, operands: vec![opcode] },
            };
            pos += line.width();
            lines.push(line);
        }
        lines
    }

    /// Writes the disassembly, one instruction per line.
    pub fn print_disassemble(&self, mut writer: impl Write) -> io::Result<()> {
        for line in self.disassemble() {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}

fn parse_literal(token: &str) -> Option<u8> {
    let unsigned = token.strip_prefix('+').unwrap_or(token);
    let digits = unsigned
        .strip_prefix("0b")
        .or_else(|| unsigned.strip_prefix("0B"))
        .unwrap_or(unsigned);
    // separators go between digits only, or right after the prefix
    let prefixed = digits.len() < unsigned.len();
    if (digits.starts_with('_') && !prefixed) || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    let digits = digits.replace('_', "");
    if digits.is_empty() || !digits.bytes().all(|c| c == b'0' || c == b'1') {
        return None;
    }
    u8::from_str_radix(&digits, 2).ok()
}

impl FromStr for Program {
    type Err = LoadError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> { Program::parse(s) }
}

impl TryFrom<Vec<u8>> for Program {
    type Error = LoadError;

    #[inline]
    fn try_from(code: Vec<u8>) -> Result<Self, Self::Error> { Program::new(code) }
}

impl From<Program> for Vec<u8> {
    #[inline]
    fn from(program: Program) -> Self { program.code }
}

/// Writes the program in its text encoding, which [`Program::parse`] reads back.
impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in &self.code {
            writeln!(f, "{byte:08b}")?;
        }
        Ok(())
    }
}

/// Single line of a program disassembly.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DisasmLine {
    /// Memory address of the first byte.
    pub addr: u16,

    /// Decoded instruction, or `None` for a data byte.
    pub instr: Option<Instr>,

    /// Operand bytes following the opcode; for a data byte, the byte itself.
    pub operands: Vec<u8>,
}

impl DisasmLine {
    /// Number of program bytes the line covers.
    pub fn width(&self) -> usize {
        match self.instr {
            Some(instr) => instr.width() as usize,
            None => 1,
        }
    }
}

impl Display for DisasmLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}: ", self.addr)?;
        let Some(instr) = self.instr else {
            return write!(f, ".byte {:#010b}", self.operands.first().copied().unwrap_or_default());
        };
        write!(f, "{instr}")?;
        match (instr, self.operands.as_slice()) {
            (_, [reg_a, reg_b]) if instr.is_alu() => write!(f, " R{reg_a}, R{reg_b}"),
            (_, [reg, val]) => write!(f, " R{reg}, {val}"),
            (_, [reg]) => write!(f, " R{reg}"),
            _ => Ok(()),
        }
    }
}
