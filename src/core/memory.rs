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

use core::fmt::{self, Debug, Formatter};

/// Number of addressable memory cells.
pub const MEMORY_SIZE: u16 = 256;

/// Error indicating an attempt to access a memory cell outside of `0x00..=0xFF`.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display, Error)]
#[display("memory address {0:#06X} is outside of the 256-byte address space")]
pub struct MemOutOfBounds(pub u16);

/// Flat byte-addressable memory shared by program code, data and the stack.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Memory {
    cells: Box<[u8; MEMORY_SIZE as usize]>,
}

impl Default for Memory {
    fn default() -> Self { Memory::new() }
}

impl Memory {
    /// Constructs zero-filled memory.
    pub fn new() -> Self { Memory { cells: Box::new([0u8; MEMORY_SIZE as usize]) } }

    /// Reads a single cell.
    #[inline]
    pub fn read(&self, addr: u16) -> Result<u8, MemOutOfBounds> {
        self.get(addr).ok_or(MemOutOfBounds(addr))
    }

    /// Writes a single cell. Out-of-bounds writes leave memory untouched.
    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), MemOutOfBounds> {
        let cell = self.cells.get_mut(addr as usize).ok_or(MemOutOfBounds(addr))?;
        *cell = value;
        Ok(())
    }

    /// Non-failing read, returning `None` for addresses outside of memory.
    #[inline]
    pub fn get(&self, addr: u16) -> Option<u8> { self.cells.get(addr as usize).copied() }

    /// Copies `data` into memory starting at `offset`.
    ///
    /// # Errors
    ///
    /// Fails with the first address which does not fit memory; in this case nothing is written.
    pub fn load(&mut self, offset: u16, data: &[u8]) -> Result<(), MemOutOfBounds> {
        let end = offset as usize + data.len();
        if end > MEMORY_SIZE as usize {
            return Err(MemOutOfBounds(end.min(u16::MAX as usize) as u16));
        }
        self.cells[offset as usize..end].copy_from_slice(data);
        Ok(())
    }

    /// Returns all memory cells.
    #[inline]
    pub fn as_slice(&self) -> &[u8] { self.cells.as_slice() }
}

impl Debug for Memory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(16).enumerate() {
            write!(f, "{:02X}:", row * 16)?;
            for byte in chunk {
                write!(f, " {byte:02X}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zeroed() {
        let mem = Memory::new();
        assert_eq!(mem.as_slice(), &[0u8; 256][..]);
    }

    #[test]
    fn read_write() {
        let mut mem = Memory::new();
        mem.write(0xF3, 42).unwrap();
        assert_eq!(mem.read(0xF3), Ok(42));
        assert_eq!(mem.read(0xF2), Ok(0));
        mem.write(0xFF, 1).unwrap();
        assert_eq!(mem.read(0xFF), Ok(1));
    }

    #[test]
    fn out_of_bounds() {
        let mut mem = Memory::new();
        assert_eq!(mem.read(0x100), Err(MemOutOfBounds(0x100)));
        assert_eq!(mem.write(0x100, 7), Err(MemOutOfBounds(0x100)));
        assert_eq!(mem.get(0x1FF), None);
        assert_eq!(mem, Memory::new());
    }

    #[test]
    fn load_fits() {
        let mut mem = Memory::new();
        mem.load(8, &[1, 2, 3]).unwrap();
        assert_eq!(&mem.as_slice()[..12], &[0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 0]);
        mem.load(0, &[0xAA; 256]).unwrap();
        assert_eq!(mem.read(0xFF), Ok(0xAA));
    }

    #[test]
    fn load_overflow() {
        let mut mem = Memory::new();
        assert_eq!(mem.load(0xFE, &[1, 2, 3]), Err(MemOutOfBounds(0x101)));
        assert_eq!(mem, Memory::new());
    }

    #[test]
    fn debug_dump() {
        let mut mem = Memory::new();
        mem.write(0x11, 0xAB).unwrap();
        let dump = format!("{mem:?}");
        assert_eq!(dump.lines().count(), 16);
        assert!(dump.lines().nth(1).unwrap().starts_with("10: 00 AB 00"));
    }
}
