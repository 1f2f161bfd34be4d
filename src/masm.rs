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

/// Macro compiler for LS-8 assembler, producing program bytes.
///
/// Instructions are separated with `;`, operands with `,`. Register operands are written as
/// `R0`..`R7` (or `SP`), immediate values as integer literals.
///
/// # Example
///
/// ```
/// use ls8::{ls8asm, Program, Vm};
///
/// let code = ls8asm! {
///     ldi     R0, 8   ;
///     ldi     R1, 9   ;
///     mul     R0, R1  ;
///     prn     R0      ;
///     hlt             ;
/// };
///
/// let mut vm = Vm::new();
/// vm.load(&Program::new(code).unwrap()).unwrap();
/// let mut out = Vec::new();
/// vm.run(&mut out).unwrap();
/// assert_eq!(out, b"72\n");
/// ```
#[macro_export]
macro_rules! ls8asm {
    ($( $tt:tt )+) => {{
        let mut code: Vec<u8> = vec![];
        $crate::ls8asm_inner! { code => $( $tt )+ }
        code
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! ls8asm_inner {
    // end of program
    { $code:ident => } => { };
    // no operands
    { $code:ident => $op:ident ; $($tt:tt)* } => {
        $code.push($crate::ls8asm_opcode!($op));
        $crate::ls8asm_inner! { $code => $( $tt )* }
    };
    // registers and literals
    { $code:ident => $op:ident $( $arg:tt ),+ ; $($tt:tt)* } => {
        $code.push($crate::ls8asm_opcode!($op));
        $( $code.push($crate::ls8asm_operand!($arg)); )+
        $crate::ls8asm_inner! { $code => $( $tt )* }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! ls8asm_opcode {
    ($op:ident) => {
        $crate::paste::paste! { $crate::isa::opcodes::[<INSTR_ $op:upper>] }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! ls8asm_operand {
    ($reg:ident) => {
        $crate::core::$reg
    };
    ($val:literal) => {
        $val
    };
}
