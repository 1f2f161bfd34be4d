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

use core::cmp::Ordering;
use core::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Number of general-purpose registers.
pub const REG_COUNT: u8 = 8;

pub const R0: u8 = 0;
pub const R1: u8 = 1;
pub const R2: u8 = 2;
pub const R3: u8 = 3;
pub const R4: u8 = 4;
pub const R5: u8 = 5;
pub const R6: u8 = 6;
pub const R7: u8 = 7;

/// Register reserved as a stack pointer.
pub const SP: u8 = R7;

/// Value of the stack pointer at the start of program execution.
///
/// The stack grows downwards from this address.
pub const SP_INIT: u8 = 0xF4;

/// Error indicating an attempt to access a register with index outside of `0..8`.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display, Error)]
#[display("register index {0} is out of bounds, only R0..R7 are present")]
pub struct RegOutOfBounds(pub u8);

/// General-purpose register file.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(crate = "serde_crate", transparent))]
pub struct Registers([u8; REG_COUNT as usize]);

impl Registers {
    /// Constructs zero-filled register file.
    #[inline]
    pub fn new() -> Self { Self::default() }

    /// Reads value of a register.
    #[inline]
    pub fn get(&self, index: u8) -> Result<u8, RegOutOfBounds> {
        self.0.get(index as usize).copied().ok_or(RegOutOfBounds(index))
    }

    /// Assigns value to a register.
    #[inline]
    pub fn set(&mut self, index: u8, value: u8) -> Result<(), RegOutOfBounds> {
        let reg = self.0.get_mut(index as usize).ok_or(RegOutOfBounds(index))?;
        *reg = value;
        Ok(())
    }

    /// Value of the stack pointer register.
    #[inline]
    pub fn sp(&self) -> u8 { self.0[SP as usize] }

    /// Assigns value to the stack pointer register.
    #[inline]
    pub fn set_sp(&mut self, value: u8) { self.0[SP as usize] = value }

    /// Returns all register values ordered by index.
    #[inline]
    pub fn as_array(&self) -> &[u8; REG_COUNT as usize] { &self.0 }

    /// Iterates over `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.0.iter().enumerate().map(|(idx, val)| (idx as u8, *val))
    }
}

/// Flags register, holding the result of the last comparison.
///
/// Only a single bit is set after a comparison; before the first comparison the register is
/// empty.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(crate = "serde_crate", transparent))]
pub struct Flags(u8);

impl Flags {
    pub const EQUAL: u8 = 0b0000_0001;
    pub const GREATER: u8 = 0b0000_0010;
    pub const LESS: u8 = 0b0000_0100;

    /// Empty flags register.
    #[inline]
    pub const fn empty() -> Self { Flags(0) }

    /// Flags representing the outcome of comparing the first operand with the second one.
    pub const fn with_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Flags(Self::LESS),
            Ordering::Equal => Flags(Self::EQUAL),
            Ordering::Greater => Flags(Self::GREATER),
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 { self.0 }

    #[inline]
    pub const fn is_equal(self) -> bool { self.0 & Self::EQUAL != 0 }

    #[inline]
    pub const fn is_greater(self) -> bool { self.0 & Self::GREATER != 0 }

    #[inline]
    pub const fn is_less(self) -> bool { self.0 & Self::LESS != 0 }
}

impl Display for Flags {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mark = |set: bool, c: char| if set { c } else { '-' };
        write!(f, "{}{}{}", mark(self.is_less(), 'L'), mark(self.is_greater(), 'G'), mark(self.is_equal(), 'E'))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn access() {
        let mut regs = Registers::new();
        for idx in 0..REG_COUNT {
            assert_eq!(regs.get(idx), Ok(0));
        }
        regs.set(R3, 99).unwrap();
        assert_eq!(regs.get(R3), Ok(99));
        assert_eq!(regs.as_array(), &[0, 0, 0, 99, 0, 0, 0, 0]);
    }

    #[test]
    fn out_of_bounds() {
        let mut regs = Registers::new();
        assert_eq!(regs.get(8), Err(RegOutOfBounds(8)));
        assert_eq!(regs.set(0xFF, 1), Err(RegOutOfBounds(0xFF)));
        assert_eq!(regs, Registers::new());
    }

    #[test]
    fn stack_pointer_is_r7() {
        let mut regs = Registers::new();
        assert_eq!(regs.sp(), 0);
        regs.set_sp(SP_INIT);
        assert_eq!(regs.get(R7), Ok(0xF4));
        regs.set(R7, 0x10).unwrap();
        assert_eq!(regs.sp(), 0x10);
    }

    #[test]
    fn flags_exclusive() {
        for ordering in [Ordering::Less, Ordering::Equal, Ordering::Greater] {
            let flags = Flags::with_ordering(ordering);
            let set = [flags.is_less(), flags.is_equal(), flags.is_greater()];
            assert_eq!(set.iter().filter(|f| **f).count(), 1);
        }
        assert_eq!(Flags::with_ordering(Ordering::Equal).bits(), 0b001);
        assert_eq!(Flags::with_ordering(Ordering::Greater).bits(), 0b010);
        assert_eq!(Flags::with_ordering(Ordering::Less).bits(), 0b100);
        assert!(!Flags::empty().is_equal());
    }

    #[test]
    fn flags_display() {
        assert_eq!(Flags::empty().to_string(), "---");
        assert_eq!(Flags::with_ordering(Ordering::Equal).to_string(), "--E");
        assert_eq!(Flags::with_ordering(Ordering::Less).to_string(), "L--");
    }
}
