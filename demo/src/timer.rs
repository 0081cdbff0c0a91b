// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use libc::{c_long, time_t, timespec};
use std::fmt;
use std::io::Error as IoError;
use std::time::Duration;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// The time a level is held before the next transition.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Period {
    secs: u64,
    nanos: u32,
}

impl Period {
    /// Create a period from whole seconds and nanoseconds.
    ///
    /// `nanos` must be in the range [0, 999999999].
    pub fn new(secs: u64, nanos: u32) -> Result<Period, SleepError> {
        if nanos >= NANOS_PER_SEC {
            return Err(SleepError::InvalidPeriod);
        }
        Ok(Period { secs, nanos })
    }

    /// Create a period from a number of nanoseconds.
    pub const fn from_nanos(nanos: u64) -> Period {
        Period {
            secs: nanos / NANOS_PER_SEC as u64,
            nanos: (nanos % NANOS_PER_SEC as u64) as u32,
        }
    }

    /// The period as a [`Duration`].
    pub fn as_duration(&self) -> Duration {
        Duration::new(self.secs, self.nanos)
    }
}

impl From<Duration> for Period {
    fn from(d: Duration) -> Self {
        Period {
            secs: d.as_secs(),
            nanos: d.subsec_nanos(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_duration())
    }
}

/// The outcome of a single sleep.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slumber {
    /// The full duration elapsed.
    Complete,

    /// The sleep was cut short by a signal.
    Interrupted {
        /// The part of the requested duration that did not elapse.
        remaining: Duration,
    },
}

/// A source of interruptible sleeps.
pub trait Clock {
    /// Sleep for up to `d`.
    fn sleep(&mut self, d: Duration) -> Result<Slumber, SleepError>;
}

/// A [`Clock`] backed by `nanosleep(2)`.
///
/// Signal delivery to the sleeping thread returns [`Slumber::Interrupted`]
/// with the unslept remainder.
#[derive(Clone, Copy, Debug, Default)]
pub struct Nanosleep;

impl Clock for Nanosleep {
    fn sleep(&mut self, d: Duration) -> Result<Slumber, SleepError> {
        let req = timespec {
            tv_sec: d.as_secs() as time_t,
            tv_nsec: d.subsec_nanos() as c_long,
        };
        let mut rem = timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        unsafe {
            match libc::nanosleep(std::ptr::addr_of!(req), std::ptr::addr_of_mut!(rem)) {
                0 => Ok(Slumber::Complete),
                _ => {
                    let err = IoError::last_os_error();
                    match err.raw_os_error() {
                        Some(libc::EINTR) => Ok(Slumber::Interrupted {
                            remaining: Duration::new(rem.tv_sec as u64, rem.tv_nsec as u32),
                        }),
                        Some(libc::EINVAL) => Err(SleepError::InvalidPeriod),
                        Some(libc::EFAULT) => Err(SleepError::Fault),
                        _ => Err(SleepError::Os(err)),
                    }
                }
            }
        }
    }
}

/// Sleep for the whole period.
///
/// A sleep interrupted by a signal is resumed for the remaining duration only,
/// so the total time slept is never less than the period.
///
/// Returns the number of interruptions.
pub fn hold<C: Clock + ?Sized>(clock: &mut C, period: Period) -> Result<u32, SleepError> {
    let mut d = period.as_duration();
    let mut interruptions = 0;
    loop {
        match clock.sleep(d)? {
            Slumber::Complete => return Ok(interruptions),
            Slumber::Interrupted { remaining } => {
                interruptions += 1;
                tracing::trace!(?remaining, interruptions, "sleep interrupted");
                d = remaining;
            }
        }
    }
}

/// Reasons a level could not be held for its period.
#[derive(Debug, thiserror::Error)]
pub enum SleepError {
    /// The period is out of range.
    #[error("unexpected period duration")]
    InvalidPeriod,

    /// The kernel could not copy the period from user space.
    #[error("problem with copying information from user space")]
    Fault,

    /// Any other failure reported by the OS.
    #[error("unexpected sleep failure: {0}")]
    Os(IoError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Records requested sleeps and replays scripted interruptions.
    #[derive(Default)]
    struct FakeClock {
        requests: Vec<Duration>,
        slept: Duration,
        // time into each request at which it is interrupted
        interrupts: VecDeque<Duration>,
    }

    impl Clock for FakeClock {
        fn sleep(&mut self, d: Duration) -> Result<Slumber, SleepError> {
            self.requests.push(d);
            match self.interrupts.pop_front() {
                Some(after) if after < d => {
                    self.slept += after;
                    Ok(Slumber::Interrupted {
                        remaining: d - after,
                    })
                }
                _ => {
                    self.slept += d;
                    Ok(Slumber::Complete)
                }
            }
        }
    }

    #[test]
    fn period_bounds() {
        assert_eq!(
            Period::new(1, 999_999_999).unwrap().as_duration(),
            Duration::new(1, 999_999_999)
        );
        assert!(matches!(
            Period::new(0, 1_000_000_000),
            Err(SleepError::InvalidPeriod)
        ));
        assert_eq!(
            Period::from_nanos(1_500_000_000),
            Period::new(1, 500_000_000).unwrap()
        );
        assert_eq!(
            Period::from(Duration::from_millis(250)),
            Period::new(0, 250_000_000).unwrap()
        );
    }

    #[test]
    fn hold_uninterrupted() {
        let mut clock = FakeClock::default();
        let period = Period::from_nanos(499_999_999);

        assert_eq!(hold(&mut clock, period).unwrap(), 0);
        assert_eq!(clock.requests, vec![period.as_duration()]);
        assert_eq!(clock.slept, period.as_duration());
    }

    #[test]
    fn hold_resumes_with_remainder() {
        let mut clock = FakeClock::default();
        clock.interrupts.push_back(Duration::from_millis(300));
        clock.interrupts.push_back(Duration::from_millis(100));
        let period = Period::new(1, 0).unwrap();

        assert_eq!(hold(&mut clock, period).unwrap(), 2);
        assert_eq!(
            clock.requests,
            vec![
                Duration::from_secs(1),
                Duration::from_millis(700),
                Duration::from_millis(600),
            ]
        );
        // never restarts the full period, never stops short of it
        assert_eq!(clock.slept, period.as_duration());
    }

    #[test]
    fn hold_propagates_errors() {
        struct Broken;
        impl Clock for Broken {
            fn sleep(&mut self, _d: Duration) -> Result<Slumber, SleepError> {
                Err(SleepError::Fault)
            }
        }

        assert!(matches!(
            hold(&mut Broken, Period::from_nanos(10)),
            Err(SleepError::Fault)
        ));
    }

    #[test]
    fn nanosleep_zero() {
        let mut clock = Nanosleep;
        assert_eq!(clock.sleep(Duration::ZERO).unwrap(), Slumber::Complete);
    }

    #[test]
    fn nanosleep_resumes_after_signals() {
        use std::os::unix::thread::JoinHandleExt;
        use std::time::Instant;

        extern "C" fn ignore(_: libc::c_int) {}

        unsafe {
            libc::signal(libc::SIGUSR1, ignore as libc::sighandler_t);
        }
        let period = Period::from_nanos(200_000_000);
        let sleeper = std::thread::spawn(move || {
            let start = Instant::now();
            let interruptions = hold(&mut Nanosleep, period).unwrap();
            (start.elapsed(), interruptions)
        });
        for _ in 0..4 {
            std::thread::sleep(Duration::from_millis(20));
            unsafe {
                libc::pthread_kill(sleeper.as_pthread_t(), libc::SIGUSR1);
            }
        }
        let (elapsed, interruptions) = sleeper.join().unwrap();

        assert!(interruptions > 0);
        assert!(elapsed >= period.as_duration());
    }
}
