// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blink LEDs and relay edges between GPIO lines.

use clap::Parser;
use std::process::ExitCode;

mod cmd;
use cmd::{blink, chip, common, line, relay};

fn main() -> ExitCode {
    match Opts::try_parse() {
        Ok(opt) => {
            common::init_logging(opt.verbose);
            let res = match &opt.cmd {
                Command::Blink(cfg) => blink::cmd(&opt.chip, cfg),
                Command::Chip(cfg) => chip::cmd(opt.verbose, cfg),
                Command::Line(cfg) => line::cmd(&opt.chip, cfg),
                Command::Relay(cfg) => relay::cmd(&opt.chip, cfg),
            };
            match res {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    common::emit_error(opt.verbose, &e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            _ = e.print();
            if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "gpiocdev-demo",
    about = "Blink LEDs and relay edges between GPIO lines using GPIO character devices.",
    version,
    propagate_version = true
)]
struct Opts {
    /// The chip providing the lines
    ///
    /// The chip may be identified by number, name, or path.
    /// e.g. the following all select the same chip:
    ///     --chip 0
    ///     --chip gpiochip0
    ///     --chip /dev/gpiochip0
    #[arg(
        short,
        long,
        global = true,
        value_name = "chip",
        default_value = "gpiochip0",
        verbatim_doc_comment
    )]
    chip: String,

    /// Provide more detailed error messages and debug logging.
    #[arg(short = 'v', long, global = true, display_order = 800)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
enum Command {
    /// Blink a green and a red LED on their own periods.
    Blink(blink::Opts),

    /// List the available GPIO chips.
    Chip(chip::Opts),

    /// List the lines of the chip.
    Line(line::Opts),

    /// Toggle an issuer line and relay its edges to a controlled line.
    Relay(relay::Opts),
}
