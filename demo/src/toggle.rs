// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::line::{Drive, Output};
use crate::session::{Crew, Session};
use crate::timer::{self, Clock, Nanosleep, Period};
use crate::{Error, Result};
use gpiocdev::line::{Offset, Value};
use std::io::Write;
use std::path::Path;

/// The parameters for a line toggled on a timer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Blink {
    /// The consumer label for the line, also used in diagnostics.
    pub name: String,

    /// Prefix for the transition lines written by [`run`].
    pub tag: char,

    /// The line to toggle.
    pub offset: Offset,

    /// How long each level is held.
    pub period: Period,

    /// The number of transitions.
    pub count: u64,
}

/// Toggle the line `count` times, starting low and holding each level for
/// the period, then leave it low.
///
/// Each transition is reported to `out` as `"<tag> [<cycle>] Set <up|down>"`.
pub fn run<D, C, W>(line: &mut D, clock: &mut C, out: &mut W, blink: &Blink) -> Result<()>
where
    D: Drive + ?Sized,
    C: Clock + ?Sized,
    W: Write + ?Sized,
{
    for cycle in 0..blink.count {
        let value = Value::from(cycle & 0x1 != 0);
        // stdout going away is no reason to stop driving the line
        _ = writeln!(
            out,
            "{} [{:4}] Set {}",
            blink.tag,
            cycle,
            if value == Value::Active { "up" } else { "down" }
        );
        line.drive(value)?;
        timer::hold(clock, blink.period).map_err(|kind| Error::Sleep {
            name: blink.name.clone(),
            kind,
        })?;
    }
    // avoid useless current drain
    line.drive(Value::Inactive)
}

/// Request the line on the chip, toggle it on the real clock, and release it.
pub fn blink<P: AsRef<Path>>(chip: P, blink: &Blink) -> Result<()> {
    let mut line = Output::request(chip, blink.offset, &blink.name)?;
    run(&mut line, &mut Nanosleep, &mut std::io::stdout(), blink)?;
    tracing::debug!(name = %blink.name, count = blink.count, "toggling done");
    Ok(())
}

/// Blink each of `leds` on its own worker, on the session's chip, then reset
/// the lines claimed by the session.
///
/// Returns the number of lines reset.
pub fn blink_all<I>(session: &mut Session, leds: I) -> Result<usize>
where
    I: IntoIterator<Item = Blink>,
{
    let mut crew = Crew::new();
    for led in leds {
        let chip = session.path().to_path_buf();
        let worker = format!("{} LED", led.name);
        crew.spawn(&worker, move || blink(chip, &led))?;
    }
    session.finish(crew)
}
