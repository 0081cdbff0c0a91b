// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common;
use anyhow::Result;
use clap::Parser;
use gpiocdev::line::Offset;
use gpiocdev_demo::toggle::{self, Blink};
use gpiocdev_demo::Session;
use std::time::Duration;

const GREEN_LED_LINE: Offset = 17;
const RED_LED_LINE: Offset = 16;

#[derive(Debug, Parser)]
#[command(aliases(["b"]))]
pub struct Opts {
    /// The line controlling the green LED
    #[arg(long, value_name = "offset", default_value_t = GREEN_LED_LINE)]
    pub green: Offset,

    /// The line controlling the red LED
    #[arg(long, value_name = "offset", default_value_t = RED_LED_LINE)]
    pub red: Offset,

    /// How long the green LED holds each level
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(long, value_name = "period", value_parser = common::parse_duration, default_value = "499999999ns")]
    pub green_period: Duration,

    /// How long the red LED holds each level
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(long, value_name = "period", value_parser = common::parse_duration, default_value = "333333333ns")]
    pub red_period: Duration,

    /// The number of changes of state of each LED
    #[arg(short = 'n', long, value_name = "num", default_value_t = 50)]
    pub count: u64,
}

pub fn cmd(chip: &str, opts: &Opts) -> Result<()> {
    common::ensure_disjoint(&[("green LED", opts.green), ("red LED", opts.red)])?;
    let path = common::chip_lookup_from_id(chip)?;
    let mut session = Session::open(path)?;

    let leds = [
        Blink {
            name: "green".into(),
            tag: 'G',
            offset: session.claim(opts.green, "green")?,
            period: opts.green_period.into(),
            count: opts.count,
        },
        Blink {
            name: "red".into(),
            tag: 'R',
            offset: session.claim(opts.red, "red")?,
            period: opts.red_period.into(),
            count: opts.count,
        },
    ];

    toggle::blink_all(&mut session, leds)?;
    Ok(())
}
