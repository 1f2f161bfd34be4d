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

#![cfg(feature = "cli")]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

fn ls8(program: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ls8"))
        .arg(program)
        .output()
        .expect("failed to run ls8 binary")
}

fn demo(name: &str) -> Output { ls8(&Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)) }

fn temp_program(name: &str, source: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("ls8-cli-{}-{name}", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(source.as_bytes()).unwrap();
    path
}

#[test]
fn runs_demos() {
    for (name, expected) in
        [("print8.ls8", "8\n"), ("mult.ls8", "72\n"), ("stack.ls8", "2\n4\n1\n"), ("cmp.ls8", "1\n4\n")]
    {
        let output = demo(name);
        assert!(output.status.success(), "{name}");
        assert_eq!(String::from_utf8_lossy(&output.stdout), expected, "{name}");
    }
}

#[test]
fn invalid_opcode_exits_with_failure() {
    let path = temp_program("bad.ls8", "10000010 # LDI R0,8\n00000000\n00001000\n11111111\n");
    let output = ls8(&path);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Wrong instruction 255 at address 3\n");
    assert!(output.stderr.is_empty());
    std::fs::remove_file(path).unwrap();
}

#[test]
fn invalid_literal_exits_with_failure() {
    let path = temp_program("literal.ls8", "10000010\n0000000x\n");
    let output = ls8(&path);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2 contains `0000000x`"));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn missing_file_exits_with_failure() {
    let output = ls8(Path::new("/nonexistent/program.ls8"));
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn requires_program_argument() {
    let output = Command::new(env!("CARGO_BIN_EXE_ls8")).output().unwrap();
    assert!(!output.status.success());
}
