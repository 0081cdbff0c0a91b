// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common;
use anyhow::{Context, Result};
use clap::Parser;
use gpiocdev::chip::Chip;
use gpiocdev::line::{Direction, Info};

#[derive(Debug, Parser)]
#[command(aliases(["l", "info"]))]
pub struct Opts {}

pub fn cmd(chip: &str, _opts: &Opts) -> Result<()> {
    let path = common::chip_lookup_from_id(chip)?;
    let c = Chip::from_path(&path)
        .with_context(|| format!("unable to open chip '{}'", path.display()))?;
    let ci = c
        .info()
        .with_context(|| format!("unable to read info for chip '{}'", path.display()))?;
    println!("{} - {} lines:", ci.name, ci.num_lines);
    for li in c
        .line_info_iter()
        .with_context(|| format!("unable to read lines from chip '{}'", ci.name))?
    {
        let li = li.with_context(|| format!("unable to read line info from chip '{}'", ci.name))?;
        println!("{}", format_line(&li));
    }
    Ok(())
}

fn format_line(li: &Info) -> String {
    let name = if li.name.is_empty() {
        "unnamed".to_string()
    } else {
        format!("\"{}\"", li.name)
    };
    let consumer = if li.used {
        if li.consumer.is_empty() {
            "kernel".to_string()
        } else {
            format!("\"{}\"", li.consumer)
        }
    } else {
        "unused".to_string()
    };
    let direction = match li.direction {
        Direction::Input => "input",
        Direction::Output => "output",
    };
    let polarity = if li.active_low {
        "active-low"
    } else {
        "active-high"
    };
    format!("\tline {:>3}:\t{name}\t{consumer}\t{direction}\t{polarity}", li.offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_line() {
        let li = Info {
            offset: 16,
            name: "GPIO16".into(),
            ..Default::default()
        };
        assert_eq!(
            format_line(&li),
            "\tline  16:\t\"GPIO16\"\tunused\tinput\tactive-high"
        );
    }

    #[test]
    fn used_line() {
        let li = Info {
            offset: 17,
            consumer: "green".into(),
            used: true,
            direction: Direction::Output,
            ..Default::default()
        };
        assert_eq!(
            format_line(&li),
            "\tline  17:\tunnamed\t\"green\"\toutput\tactive-high"
        );
    }
}
