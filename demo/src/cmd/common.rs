// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{Context, Result};
use gpiocdev::chip::is_chip;
use gpiocdev::line::Offset;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// common helper functions

fn chip_path_from_id(id: &str) -> PathBuf {
    if id.chars().all(char::is_numeric) {
        // from number
        return format!("/dev/gpiochip{id}").into();
    }
    if !id.chars().any(|x| x == '/') {
        // from name
        let mut p: PathBuf = "/dev".into();
        p.push(id);
        return p;
    }
    // from raw path
    id.into()
}

pub fn chip_lookup_from_id(id: &str) -> Result<PathBuf> {
    is_chip(chip_path_from_id(id))
        .with_context(|| format!("cannot find GPIO chip character device '{id}'"))
}

/// Fail unless every line is distinct, as each worker must own its lines.
pub fn ensure_disjoint(lines: &[(&str, Offset)]) -> Result<()> {
    for (i, (name, offset)) in lines.iter().enumerate() {
        if let Some((other, _)) = lines[i + 1..].iter().find(|(_, o)| o == offset) {
            anyhow::bail!("the {name} and the {other} cannot share line {offset}");
        }
    }
    Ok(())
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("'{0}' unknown units - use 's', 'ms', 'us' or 'ns'.")]
    Units(String),
    #[error("'{0}' must start with a digit")]
    NoDigits(String),
    #[error("'{0}' {1}")]
    ParseDigits(String, std::num::ParseIntError),
    #[error("'{0}' is too long")]
    Overflow(String),
}

/// Parse a period, taken as milliseconds unless suffixed with units.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, ParseDurationError> {
    let (num, scale) = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => return Err(ParseDurationError::NoDigits(s.into())),
        Some(n) => {
            let (num, units) = s.split_at(n);
            let scale: u64 = match units {
                "ns" => 1,
                "us" => 1000,
                "ms" => 1000000,
                "s" => 1000000000,
                _ => return Err(ParseDurationError::Units(s.into())),
            };
            (num, scale)
        }
        None => (s, 1000000),
    };
    let t = num
        .parse::<u64>()
        .map_err(|e| ParseDurationError::ParseDigits(num.into(), e))?;
    let nanos = t
        .checked_mul(scale)
        .ok_or_else(|| ParseDurationError::Overflow(s.into()))?;
    Ok(Duration::from_nanos(nanos))
}

/// Log to stderr, filtered by `RUST_LOG` if set.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // only fails if a subscriber is already installed
    _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .try_init();
}

pub fn emit_error(verbose: bool, e: &anyhow::Error) {
    eprintln!("ERROR: {}", format_error(verbose, e));
}

pub fn format_error(verbose: bool, e: &anyhow::Error) -> String {
    if verbose {
        format!("{e:#}")
    } else {
        format!("{e}")
    }
}
