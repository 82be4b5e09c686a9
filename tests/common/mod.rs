//! Shared helpers for CLI tests: a fake generator and a command builder.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Stand-in for `solana-keygen`.
///
/// Every invocation touches `$FAKE_MARKER` when set. `--version` succeeds.
/// A search writes its arguments to `args.log` and one keypair file per
/// `FAKE_KEYS` (default 1), then exits with `FAKE_EXIT` (default 0). With
/// `FAKE_MODE=interrupt` it writes a partial keypair, sends SIGINT to its
/// parent and keeps running for a moment. `FAKE_MODE=group-interrupt` traps
/// SIGINT, sends it to its whole process group and exits 0, like a terminal
/// Ctrl-C the generator handles. `FAKE_MODE=read-stdin` saves one line of its
/// stdin to `stdin.log` before searching.
const FAKE_GENERATOR: &str = r#"#!/bin/sh
if [ -n "$FAKE_MARKER" ]; then
    echo "$@" >> "$FAKE_MARKER"
fi
if [ "$1" = "--version" ]; then
    echo "fake-keygen 1.0.0"
    exit 0
fi
printf '%s\n' "$@" > args.log
if [ "$FAKE_MODE" = "interrupt" ]; then
    echo '[0]' > PartialKey.json
    kill -INT "$PPID"
    sleep 2
    exit 0
fi
if [ "$FAKE_MODE" = "group-interrupt" ]; then
    trap 'exit 0' INT
    echo '[0]' > PartialKey.json
    kill -INT 0
    sleep 2
    exit 0
fi
if [ "$FAKE_MODE" = "read-stdin" ]; then
    read -r line
    printf '%s\n' "$line" > stdin.log
fi
i=0
while [ "$i" -lt "${FAKE_KEYS:-1}" ]; do
    i=$((i + 1))
    echo '[1,2,3]' > "FakeKey$i.json"
done
exit "${FAKE_EXIT:-0}"
"#;

/// Writes the fake generator into `dir` and returns its path.
pub fn fake_generator(dir: &Path) -> PathBuf {
    let path = dir.join("fake-keygen");
    fs::write(&path, FAKE_GENERATOR).expect("write fake generator");
    let mut permissions = fs::metadata(&path).expect("stat fake generator").permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).expect("chmod fake generator");
    path
}

/// The binary under test, run in `work_dir` with `generator`.
pub fn vanity_grind(work_dir: &Path, generator: &Path) -> Command {
    Command::from_std(std_command(work_dir, generator))
}

/// Same as [`vanity_grind`], but in a process group of its own so a signal
/// sent to the group does not reach the test harness.
pub fn vanity_grind_own_group(work_dir: &Path, generator: &Path) -> Command {
    use std::os::unix::process::CommandExt;

    let mut cmd = std_command(work_dir, generator);
    cmd.process_group(0);
    Command::from_std(cmd)
}

fn std_command(work_dir: &Path, generator: &Path) -> std::process::Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_vanity_grind"));
    cmd.current_dir(work_dir)
        .env_remove("VANITY_GRIND_CONFIRM_THRESHOLD")
        .env_remove("RUST_LOG")
        .env("VANITY_GRIND_GENERATOR", generator);
    cmd
}

/// Sorted file names in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
