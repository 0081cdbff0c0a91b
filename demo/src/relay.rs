// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::line::{Drive, EdgeInput, EdgeSource, Output};
use crate::session::{Crew, Session};
use crate::toggle::{self, Blink};
use crate::Result;
use gpiocdev::line::{Offset, Value};
use std::io::Write;
use std::path::Path;

/// The parameters for relaying edges on one line to toggles of another.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Relay {
    /// The number of edge events to relay before finishing.
    pub count: u64,

    /// The consumer label for the line receiving edges.
    pub receiver_name: String,

    /// The line receiving edges.
    pub receiver: Offset,

    /// The consumer label for the line being toggled.
    pub controller_name: String,

    /// The line being toggled.
    pub controller: Offset,
}

/// Toggle `output` once for each edge on `input`, `count` times, then leave
/// `output` low.
///
/// Waits for edges indefinitely.
pub fn run<S, D, W>(input: &mut S, output: &mut D, out: &mut W, count: u64) -> Result<()>
where
    S: EdgeSource + ?Sized,
    D: Drive + ?Sized,
    W: Write + ?Sized,
{
    for _ in 0..count {
        input.next_edge()?;
        _ = writeln!(out, "Get an event!");
        output.toggle()?;
    }
    // avoid useless current drain
    output.drive(Value::Inactive)
}

/// Request both lines on the chip, relay edges, and release them.
///
/// Both lines are released before any error is returned.
pub fn relay<P: AsRef<Path>>(chip: P, relay: &Relay) -> Result<()> {
    let chip = chip.as_ref();
    let mut output = Output::request(chip, relay.controller, &relay.controller_name)?;
    let mut input = EdgeInput::request(chip, relay.receiver, &relay.receiver_name)?;
    run(&mut input, &mut output, &mut std::io::stdout(), relay.count)?;
    tracing::debug!(
        receiver = relay.receiver,
        controller = relay.controller,
        count = relay.count,
        "relaying done"
    );
    Ok(())
}

/// Run the issuer and the receiver on their own workers, on the session's
/// chip, then reset the lines claimed by the session.
///
/// Returns the number of lines reset.
pub fn issue_and_relay(session: &mut Session, issuer: Blink, receiver: Relay) -> Result<usize> {
    let mut crew = Crew::new();
    let chip = session.path().to_path_buf();
    crew.spawn("issuer", move || toggle::blink(chip, &issuer))?;
    let chip = session.path().to_path_buf();
    crew.spawn("receiver", move || relay(chip, &receiver))?;
    session.finish(crew)
}
