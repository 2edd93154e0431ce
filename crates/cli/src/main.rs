// Copyright 2025 gwbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! gwbench CLI entry point.

fn main() {
    if let Err(e) = gwbench_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
