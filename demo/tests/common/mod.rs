// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(dead_code)]

use gpiocdev::chip::Chip;
use gpiocdev::line::Offset;
use std::path::Path;
use std::time::{Duration, Instant};

// max time to allow events to propagate from the sim to cdev
const PROPAGATION_DELAY: Duration = Duration::from_millis(10);

pub fn wait_propagation_delay() {
    std::thread::sleep(PROPAGATION_DELAY);
}

/// Wait until the line is requested by someone, failing after a second.
pub fn wait_until_used<P: AsRef<Path>>(chip: P, offset: Offset) {
    let chip = Chip::from_path(chip).unwrap();
    let start = Instant::now();
    while !chip.line_info(offset).unwrap().used {
        assert!(
            start.elapsed() < Duration::from_secs(1),
            "line {offset} was never requested"
        );
        std::thread::sleep(Duration::from_millis(1));
    }
}
