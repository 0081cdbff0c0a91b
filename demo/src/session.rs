// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::line;
use crate::{Error, Result};
use gpiocdev::chip::{self, Chip};
use gpiocdev::line::Offset;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// The chip held open for the lifetime of a run, and the lines to reset
/// when the run ends.
///
/// Lines claimed through the session are re-requested as plain inputs, and
/// released, by [`reset`](Session::reset) or when the session is dropped,
/// whichever comes first.
/// The reset is best effort - lines still held by a worker cannot be reset.
#[derive(Debug)]
pub struct Session {
    chip: Chip,
    info: chip::Info,
    claimed: Vec<(Offset, String)>,
}

impl Session {
    /// Open the chip at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Session> {
        let path = path.as_ref();
        let chip = Chip::from_path(path).map_err(|e| Error::OpenChip(path.into(), e))?;
        let info = chip.info().map_err(|e| Error::OpenChip(path.into(), e))?;
        tracing::debug!(
            chip = %info.name,
            label = %info.label,
            num_lines = info.num_lines,
            "opened chip"
        );
        Ok(Session {
            chip,
            info,
            claimed: Vec::new(),
        })
    }

    /// The path of the chip, for requesting lines.
    pub fn path(&self) -> &Path {
        self.chip.path()
    }

    /// The chip info read when the session was opened.
    pub fn info(&self) -> &chip::Info {
        &self.info
    }

    /// Check the chip provides the line and add it to the lines reset at exit.
    ///
    /// `name` is the consumer label used when resetting the line.
    pub fn claim(&mut self, offset: Offset, name: &str) -> Result<Offset> {
        if offset >= self.info.num_lines {
            return Err(Error::UnknownLine {
                chip: self.info.name.clone(),
                offset,
                num_lines: self.info.num_lines,
            });
        }
        if !self.claimed.iter().any(|(o, _)| *o == offset) {
            self.claimed.push((offset, name.into()));
        }
        Ok(offset)
    }

    /// Reset all claimed lines to inputs.
    ///
    /// Each line is reset at most once.
    /// Returns the number of lines successfully reset.
    pub fn reset(&mut self) -> usize {
        let mut count = 0;
        for (offset, name) in self.claimed.drain(..) {
            match line::reset_to_input(self.chip.path(), offset, &name) {
                Ok(()) => count += 1,
                Err(e) => tracing::warn!(offset, "{e}"),
            }
        }
        count
    }

    /// Wait for the crew to finish, then reset all claimed lines to inputs.
    ///
    /// On error the claimed lines are left for the reset on drop.
    /// Returns the number of lines reset.
    pub fn finish(&mut self, crew: Crew) -> Result<usize> {
        crew.join()?;
        let reset = self.reset();
        tracing::debug!(lines = reset, "reset lines to input");
        Ok(reset)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.reset();
        tracing::debug!(chip = %self.info.name, "closed chip");
    }
}

type Report = (String, Result<()>);

/// A set of named worker threads joined as one.
#[derive(Debug)]
pub struct Crew {
    tx: Sender<Report>,
    rx: Receiver<Report>,
    workers: Vec<(String, JoinHandle<()>)>,
}

impl Default for Crew {
    fn default() -> Self {
        let (tx, rx) = channel();
        Crew {
            tx,
            rx,
            workers: Vec::new(),
        }
    }
}

impl Crew {
    /// An empty crew.
    pub fn new() -> Crew {
        Crew::default()
    }

    /// Start a worker running `f`.
    pub fn spawn<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let tx = self.tx.clone();
        let worker = name.to_string();
        let handle = thread::Builder::new()
            .name(name.into())
            .spawn(move || {
                let res = f();
                _ = tx.send((worker, res));
            })
            .map_err(|e| Error::Spawn(name.into(), e))?;
        tracing::debug!(worker = name, "started");
        self.workers.push((name.into(), handle));
        Ok(())
    }

    /// Wait for all workers to finish.
    ///
    /// Returns the first worker error as soon as it is reported, without
    /// waiting for the remaining workers.
    pub fn join(self) -> Result<()> {
        let Crew { tx, rx, workers } = self;
        drop(tx);
        let mut finished = Vec::new();
        for (name, res) in rx.iter() {
            res?;
            tracing::debug!(worker = %name, "finished");
            finished.push(name);
        }
        for (name, handle) in workers {
            if handle.join().is_err() || !finished.contains(&name) {
                return Err(Error::WorkerLost(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn open_missing_chip() {
        match Session::open("/dev/nonexistent-gpiochip") {
            Err(Error::OpenChip(p, _)) => assert_eq!(p, Path::new("/dev/nonexistent-gpiochip")),
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn crew_joins_all() {
        let done = Arc::new(AtomicU32::new(0));
        let mut crew = Crew::new();
        for name in ["green", "red"] {
            let done = done.clone();
            crew.spawn(name, move || {
                std::thread::sleep(Duration::from_millis(10));
                done.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();
        }

        crew.join().unwrap();
        assert_eq!(done.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn crew_without_workers() {
        assert!(Crew::new().join().is_ok());
    }

    #[test]
    fn crew_reports_first_error_without_waiting() {
        let (_hold, blocked) = channel::<()>();
        let mut crew = Crew::new();
        crew.spawn("receiver", move || {
            // blocks until the test ends
            _ = blocked.recv();
            Ok(())
        })
        .unwrap();
        crew.spawn("issuer", || {
            Err(Error::WorkerLost("forced".into()))
        })
        .unwrap();

        match crew.join() {
            Err(Error::WorkerLost(name)) => assert_eq!(name, "forced"),
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn crew_reports_panicked_worker() {
        let mut crew = Crew::new();
        crew.spawn("red", || Ok(())).unwrap();
        crew.spawn("green", || panic!("worker exploded")).unwrap();

        match crew.join() {
            Err(Error::WorkerLost(name)) => assert_eq!(name, "green"),
            r => panic!("unexpected result {:?}", r),
        }
    }
}
