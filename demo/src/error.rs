// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::timer::SleepError;
use gpiocdev::line::Offset;
use std::path::PathBuf;

/// Errors returned by [`gpiocdev_demo`](crate) functions.
///
/// Every variant is fatal to the program.
/// Line handles held by the failing worker are released before the error
/// is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The chip could not be opened.
    #[error("cannot open the chip '{}'", .0.display())]
    OpenChip(PathBuf, #[source] gpiocdev::Error),

    /// The chip does not provide the line.
    #[error("cannot get line {offset}: chip '{chip}' has {num_lines} lines")]
    UnknownLine {
        chip: String,
        offset: Offset,
        num_lines: u32,
    },

    /// The line could not be requested as an output.
    #[error("{name}: cannot set line {offset} to output")]
    RequestOutput {
        name: String,
        offset: Offset,
        #[source]
        source: gpiocdev::Error,
    },

    /// The line could not be requested as an input.
    #[error("{name}: cannot set line {offset} to input")]
    RequestInput {
        name: String,
        offset: Offset,
        #[source]
        source: gpiocdev::Error,
    },

    /// Edge detection could not be enabled on the line.
    #[error("{name}: cannot request edge events on line {offset}")]
    RequestEdges {
        name: String,
        offset: Offset,
        #[source]
        source: gpiocdev::Error,
    },

    /// The value of an output line could not be changed.
    #[error("{name}: cannot change the value of line {offset}")]
    SetValue {
        name: String,
        offset: Offset,
        #[source]
        source: gpiocdev::Error,
    },

    /// Waiting for, or reading, an edge event failed.
    #[error("{name}: error while reading an event from line {offset}")]
    ReadEvent {
        name: String,
        offset: Offset,
        #[source]
        source: gpiocdev::Error,
    },

    /// Holding a level for the period failed.
    #[error("{name}: {kind}")]
    Sleep { name: String, kind: SleepError },

    /// A worker thread could not be started.
    #[error("cannot create the thread for the {0}")]
    Spawn(String, #[source] std::io::Error),

    /// A worker thread ended without reporting a result.
    #[error("the {0} terminated unexpectedly")]
    WorkerLost(String),
}

/// The result for [`gpiocdev_demo`](crate) functions.
pub type Result<T> = std::result::Result<T, Error>;
