//! Binary entrypoint: read JSON-lines requests from stdin, write JSON-lines responses to stdout.
//!
//! Each input line is a `Request` tagged by `"kind"`. Output lines are either:
//! - A `Response` with the same `kind`
//! - An ErrorOutput (when the line is not valid JSON or the request is rejected)
//!
//! Diagnostics go to stderr through `tracing` (`RUST_LOG` controls the level).

use std::io::{self, BufRead, Write};

use neo_engine::types::ErrorOutput;
use neo_engine::{Config, Engine, Request};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
  tracing_subscriber::registry()
    .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .init();

  if let Err(e) = run() {
    tracing::error!(error = %e, "neo-engine stopped");
    std::process::exit(1);
  }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  let engine = Engine::new(Config::from_env());

  for (n, line) in stdin.lock().lines().enumerate() {
    let line = line?;

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let request: Request = match serde_json::from_str(trimmed) {
      Ok(v) => v,
      Err(e) => {
        tracing::warn!(line = n + 1, error = %e, "unparsable request");
        serde_json::to_writer(&mut out, &ErrorOutput::new(format!("json parse: {}", e)))?;
        writeln!(out)?;
        continue;
      }
    };

    match engine.process(&request) {
      Ok(response) => serde_json::to_writer(&mut out, &response)?,
      Err(e) => {
        tracing::warn!(line = n + 1, error = %e, "request rejected");
        serde_json::to_writer(&mut out, &ErrorOutput::from(&e))?;
      }
    }
    writeln!(out)?;
  }

  out.flush()?;
  Ok(())
}
