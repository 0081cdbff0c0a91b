// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blink LEDs and relay edges between GPIO lines on Linux using the GPIO
//! character device.
//!
//! Each loop runs on its own thread and exclusively owns the lines it
//! requests for the duration of the loop:
//!
//! * [`toggle`] drives an output line on a fixed period, resuming sleeps
//!   interrupted by signals for the remaining time only.
//! * [`relay`] waits for edges on an input line and toggles an output line
//!   for each.
//!
//! The [`Session`] holds the chip open while the loops run and resets the
//! lines they used to inputs when the run ends.
//!
//! Blinking a LED on line 17:
//!
//! ```no_run
//! # fn example() -> gpiocdev_demo::Result<()> {
//! use gpiocdev_demo::timer::Period;
//! use gpiocdev_demo::toggle::{self, Blink};
//! use gpiocdev_demo::Session;
//!
//! let mut session = Session::open("/dev/gpiochip0")?;
//! let blink = Blink {
//!     name: "green".into(),
//!     tag: 'G',
//!     offset: session.claim(17, "green")?,
//!     period: Period::from_nanos(500_000_000),
//!     count: 10,
//! };
//! toggle::blink(session.path(), &blink)?;
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::{Error, Result};

/// Scoped handles for requested lines.
pub mod line;

/// Relaying edges from an input line to toggles of an output line.
pub mod relay;

/// The chip held for a run, and the worker threads driving its lines.
pub mod session;
pub use session::{Crew, Session};

/// Periods and interruptible sleeps.
pub mod timer;

/// Toggling a line on a timer.
pub mod toggle;
