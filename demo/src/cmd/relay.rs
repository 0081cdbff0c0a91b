// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common;
use anyhow::Result;
use clap::Parser;
use gpiocdev::line::Offset;
use gpiocdev_demo::relay::{self, Relay};
use gpiocdev_demo::toggle::Blink;
use gpiocdev_demo::Session;
use std::time::Duration;

const ISSUER_LINE: Offset = 16;
const CONTROLLER_LINE: Offset = 17;
const RECEIVER_LINE: Offset = 21;

#[derive(Debug, Parser)]
#[command(aliases(["r"]))]
pub struct Opts {
    /// The line toggled by the issuer
    #[arg(long, value_name = "offset", default_value_t = ISSUER_LINE)]
    pub issuer: Offset,

    /// The line receiving edges from the issuer
    #[arg(long, value_name = "offset", default_value_t = RECEIVER_LINE)]
    pub receiver: Offset,

    /// The line toggled for each edge received, e.g. to drive a LED
    #[arg(long, value_name = "offset", default_value_t = CONTROLLER_LINE)]
    pub controller: Offset,

    /// How long the issuer holds each level
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(short, long, value_name = "period", value_parser = common::parse_duration, default_value = "1s")]
    pub period: Duration,

    /// The number of changes of state of the issuer
    #[arg(long, value_name = "num", default_value_t = 20)]
    pub issues: u64,

    /// The number of edge events relayed before the receiver exits
    #[arg(short = 'n', long, value_name = "num", default_value_t = 10)]
    pub events: u64,
}

pub fn cmd(chip: &str, opts: &Opts) -> Result<()> {
    common::ensure_disjoint(&[
        ("issuer", opts.issuer),
        ("receiver", opts.receiver),
        ("controller", opts.controller),
    ])?;
    let path = common::chip_lookup_from_id(chip)?;
    let mut session = Session::open(path)?;

    let issuer = Blink {
        name: "issuer".into(),
        tag: 'I',
        offset: session.claim(opts.issuer, "issuer")?,
        period: opts.period.into(),
        count: opts.issues,
    };
    let receiver = Relay {
        count: opts.events,
        receiver_name: "receiver".into(),
        receiver: session.claim(opts.receiver, "receiver")?,
        controller_name: "controller".into(),
        controller: session.claim(opts.controller, "controller")?,
    };

    relay::issue_and_relay(&mut session, issuer, receiver)?;
    Ok(())
}
