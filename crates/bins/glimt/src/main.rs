#![warn(clippy::all, rust_2021_compatibility)]

mod app;
mod args;
mod error;

use crate::{args::CliArgs, error::RuntimeError};
use clap::Parser;
use log::LevelFilter;

fn main() -> Result<(), RuntimeError> {
    let launch_time = std::time::SystemTime::now();
    let args = CliArgs::parse();
    setup_logging(&args, launch_time)?;
    log::info!(
        "glimt v{} launched on {}.",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );
    app::run(&args)
}

/// Initialises logging with the level filters derived from the arguments.
fn setup_logging(args: &CliArgs, launch_time: std::time::SystemTime) -> Result<(), RuntimeError> {
    use std::io::Write;
    let log_level = if args.verbose { 4 } else { args.log_level };
    // Quieten wgpu and naga unless explicitly asked for.
    let wgpu_level = if args.debug_wgpu || log_level > 2 {
        LevelFilter::Info
    } else {
        LevelFilter::Error
    };
    let timestamp = args.log_timestamp;
    env_logger::builder()
        .format(move |buf, record| {
            if timestamp {
                let duration = launch_time.elapsed().unwrap();
                let millis = duration.as_millis() % 1000;
                let seconds = duration.as_secs() % 60;
                let minutes = (duration.as_secs() / 60) % 60;
                let hours = (duration.as_secs() / 60) / 60;
                // Show the log level only for warnings and errors.
                if record.level() <= log::Level::Warn {
                    writeln!(
                        buf,
                        "{}:{}:{}.{:03} {}: {}",
                        hours,
                        minutes,
                        seconds,
                        millis,
                        record.level(),
                        record.args()
                    )
                } else {
                    writeln!(
                        buf,
                        "{}:{}:{}.{:03}: {}",
                        hours,
                        minutes,
                        seconds,
                        millis,
                        record.args()
                    )
                }
            } else if record.level() <= log::Level::Warn {
                writeln!(buf, "{}: {}", record.level(), record.args())
            } else {
                writeln!(buf, "{}", record.args())
            }
        })
        .filter(Some("wgpu"), wgpu_level)
        .filter(Some("naga"), wgpu_level)
        .filter_level(log_filter_from_level(log_level))
        .try_init()?;
    Ok(())
}

/// Converts a numeric log level to a log filter.
fn log_filter_from_level(level: u8) -> LevelFilter {
    match level {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
