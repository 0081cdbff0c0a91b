// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Error, Result};
use gpiocdev::line::{EdgeDetection, EdgeKind, Offset, Value};
use gpiocdev::Request;
use std::path::Path;

/// An output line that can be driven to a logical level.
pub trait Drive {
    /// Drive the line to `value`.
    fn drive(&mut self, value: Value) -> Result<()>;

    /// The value the line was last driven to.
    fn value(&self) -> Value;

    /// Drive the line to the opposite of its current value.
    ///
    /// Returns the new value.
    fn toggle(&mut self) -> Result<Value> {
        let value = self.value().not();
        self.drive(value)?;
        Ok(value)
    }
}

/// An input line reporting edge events.
pub trait EdgeSource {
    /// Block until the next edge event and return its kind.
    fn next_edge(&mut self) -> Result<EdgeKind>;
}

/// A single line requested as an output.
///
/// The line is requested initially low (inactive).
/// Holding the [`Output`] grants exclusive access to the line, and dropping
/// it releases the line.
#[derive(Debug)]
pub struct Output {
    req: Request,
    name: String,
    offset: Offset,
    value: Value,
}

impl Output {
    /// Request the line at `offset` on `chip` as an output, labelled with `name`.
    pub fn request<P: AsRef<Path>>(chip: P, offset: Offset, name: &str) -> Result<Output> {
        let value = Value::Inactive;
        let req = Request::builder()
            .on_chip(chip.as_ref())
            .with_consumer(name)
            .with_line(offset)
            .as_output(value)
            .request()
            .map_err(|source| Error::RequestOutput {
                name: name.into(),
                offset,
                source,
            })?;
        tracing::debug!(name, offset, "requested output");
        Ok(Output {
            req,
            name: name.into(),
            offset,
            value,
        })
    }
}

impl Drive for Output {
    fn drive(&mut self, value: Value) -> Result<()> {
        self.req
            .set_value(self.offset, value)
            .map_err(|source| Error::SetValue {
                name: self.name.clone(),
                offset: self.offset,
                source,
            })?;
        self.value = value;
        Ok(())
    }

    fn value(&self) -> Value {
        self.value
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        tracing::debug!(name = %self.name, offset = self.offset, "released output");
    }
}

/// A single line requested as an input with detection of both edges.
///
/// Dropping the [`EdgeInput`] releases the line.
#[derive(Debug)]
pub struct EdgeInput {
    req: Request,
    name: String,
    offset: Offset,
}

impl EdgeInput {
    /// Request the line at `offset` on `chip` for edge events, labelled with `name`.
    ///
    /// Edge detection implies input, so there is no separate input request.
    pub fn request<P: AsRef<Path>>(chip: P, offset: Offset, name: &str) -> Result<EdgeInput> {
        let req = Request::builder()
            .on_chip(chip.as_ref())
            .with_consumer(name)
            .with_line(offset)
            .with_edge_detection(EdgeDetection::BothEdges)
            .request()
            .map_err(|source| Error::RequestEdges {
                name: name.into(),
                offset,
                source,
            })?;
        tracing::debug!(name, offset, "requested edge events");
        Ok(EdgeInput {
            req,
            name: name.into(),
            offset,
        })
    }
}

impl EdgeSource for EdgeInput {
    fn next_edge(&mut self) -> Result<EdgeKind> {
        let event = self
            .req
            .read_edge_event()
            .map_err(|source| Error::ReadEvent {
                name: self.name.clone(),
                offset: self.offset,
                source,
            })?;
        tracing::trace!(name = %self.name, ?event, "edge");
        Ok(event.kind)
    }
}

impl Drop for EdgeInput {
    fn drop(&mut self) {
        tracing::debug!(name = %self.name, offset = self.offset, "released edge input");
    }
}

/// Request the line as a plain input and release it again.
///
/// This leaves the line driven nowhere.
pub fn reset_to_input<P: AsRef<Path>>(chip: P, offset: Offset, name: &str) -> Result<()> {
    let req = Request::builder()
        .on_chip(chip.as_ref())
        .with_consumer(name)
        .with_line(offset)
        .as_input()
        .request()
        .map_err(|source| Error::RequestInput {
            name: name.into(),
            offset,
            source,
        })?;
    drop(req);
    tracing::debug!(name, offset, "reset to input");
    Ok(())
}
