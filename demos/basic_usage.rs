//! Basic logger usage example
//!
//! Demonstrates the process-wide logger in its default development mode,
//! the three call styles, and typed fields.
//!
//! Run with: cargo run --example basic_usage

use rust_logger_facade::prelude::*;
use rust_logger_facade::{debug, info};
use std::time::{Duration, SystemTime};

#[derive(Debug)]
struct Config {
    workers: usize,
    listen: &'static str,
}

impl ObjectMarshaler for Config {
    fn marshal_log_object(&self, enc: &mut ObjectEncoder) {
        enc.add_int64("workers", self.workers as i64);
        enc.add_string("listen", self.listen);
    }
}

fn main() -> Result<()> {
    println!("=== Rust Logger Facade - Basic Usage Example ===\n");

    // The process-wide logger starts in development mode
    let log = get_logger();

    println!("1. Plain messages at different levels:");
    log.debug("This is a debug message");
    log.info("This is an info message");
    log.error("This is an error message");

    println!("\n2. Formatted messages:");
    let port = 8080;
    log.infof(format_args!("listening on port {}", port));
    info!("{} workers ready", 4);
    debug!(log, "config reloaded in {:?}", Duration::from_millis(12));

    println!("\n3. Structured fields:");
    let config = Config {
        workers: 4,
        listen: "0.0.0.0:8080",
    };
    log.info_with(
        "server configured",
        &[
            Field::object("config", &config),
            Field::time("started", SystemTime::now()),
            Field::duration("boot", Duration::from_millis(1500)),
            Field::float64("load", 0.25),
        ],
    );

    println!("\n4. Child loggers carry context:");
    let request_log = log.with([Field::string("request_id", "r-42")]);
    request_log.info_with("request served", &[Field::int64("status", 200)]);

    println!("\n5. Standalone loggers:");
    let standalone = new_development()?.named("jobs");
    standalone.info("runs independently of the process-wide logger");
    new_nop().info("this never appears");

    sync()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
