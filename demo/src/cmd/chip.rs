// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{Context, Result};
use clap::Parser;
use gpiocdev::chip::{chips, Chip};
use std::path::Path;

#[derive(Debug, Parser)]
#[command(aliases(["c", "detect"]))]
pub struct Opts {}

pub fn cmd(verbose: bool, _opts: &Opts) -> Result<()> {
    let mut success = true;
    for p in chips().context("unable to find any chips")? {
        if !print_chip_info(&p, verbose) {
            success = false;
        }
    }
    if !success {
        anyhow::bail!("unable to open all chips");
    }
    Ok(())
}

fn print_chip_info(p: &Path, verbose: bool) -> bool {
    match Chip::from_path(p).and_then(|c| c.info()) {
        Ok(ci) => {
            println!("{} [{}] ({} lines)", ci.name, ci.label, ci.num_lines);
            return true;
        }
        Err(e) if verbose => eprintln!("unable to open '{}': {:#}", p.display(), e),
        Err(_) => eprintln!("unable to open '{}'", p.display()),
    }
    false
}
