//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `kondate_core` linkage without starting the web host.
//! - Print the week window for an optional `YYYY-MM-DD` argument.

use kondate_core::{core_version, resolve_week, CalendarDate};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("kondate_core version={}", core_version());

    let Some(raw) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match CalendarDate::parse_key(&raw) {
        Ok(date) => {
            let window = resolve_week(date);
            for day in window.days() {
                let marker = if *day == date { "*" } else { " " };
                println!("{marker} {} {}", day.key(), day.display_label());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("kondate_cli: {err}");
            ExitCode::FAILURE
        }
    }
}
