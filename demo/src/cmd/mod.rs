// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

pub mod blink;
pub mod chip;
pub mod common;
pub mod line;
pub mod relay;
