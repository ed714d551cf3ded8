//! Production mode example
//!
//! Switches the process-wide logger to JSON output, shows error fields and
//! what happens when an unknown mode is requested.
//!
//! Run with: cargo run --example production_mode

use rust_logger_facade::prelude::*;
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
struct UpstreamError {
    service: &'static str,
    cause: std::io::Error,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upstream {} unavailable", self.service)
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

fn main() -> Result<()> {
    println!("=== Rust Logger Facade - Production Mode Example ===\n");

    let mode = std::env::var("APP_LOG_MODE").unwrap_or_else(|_| "production".to_string());
    if let Err(e) = set_mode_str(&mode) {
        eprintln!("keeping current mode: {}", e);
    }
    println!("Active mode: {:?}\n", current_mode());

    let log = get_logger().with([Field::string("service", "checkout")]);

    log.debug("not emitted at info level");
    log.info_with(
        "order placed",
        &[
            Field::int64("order_id", 9_223_372_036_854_775_807),
            Field::float32("discount", 0.1),
            Field::duration("latency", Duration::from_micros(2300)),
        ],
    );

    let err = UpstreamError {
        service: "payments",
        cause: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
    };
    log.error_with(
        "charge failed",
        &[Field::error(&err), Field::any("retry_in_ms", &[100, 200, 400])],
    );

    println!("\nRequesting an unknown mode:");
    match set_mode_str("staging") {
        Ok(()) => println!("unexpected success"),
        Err(e) => println!("rejected: {}", e),
    }
    get_logger().info("still JSON after the rejected change");

    sync()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
