//! CLI smoke entry point.
//!
//! # Responsibility
//! - Start the core from environment configuration.
//! - Optionally record one visit (`eventlist_cli <referrer-domain>`).
//! - Print the event listing as JSON and the ranked visit counts.

use eventlist_core::{init_logging, CoreConfig, EventList, EventListCore};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CoreConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let core = match EventListCore::start(&config) {
        Ok(core) => core,
        Err(err) => {
            eprintln!("eventlist startup failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(referrer) = std::env::args().nth(1) {
        core.visits.record_visit(&referrer);
    }

    match serde_json::to_string_pretty(&EventList::from(core.events.list_all())) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("cannot encode events: {err}");
            return ExitCode::FAILURE;
        }
    }

    match core.visits.ranked_visits() {
        Ok(visitors) => {
            for visitor in visitors {
                println!("{:>6} {}", visitor.count, visitor.domain);
            }
        }
        Err(err) => {
            log::warn!("event=visits_list module=cli status=error error={err}");
            eprintln!("visitor counts unavailable: {err}");
        }
    }

    ExitCode::SUCCESS
}
