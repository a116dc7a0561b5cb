// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sample host for the Firebase destination.
//!
//! Builds a pipeline holding a [`FirebaseDestination`] over a backend that
//! prints each Firebase call as a JSON line on stdout. Logs go to stderr.

mod backend;
mod sample;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use relay_destination_core::{Event, Pipeline, Settings};
use relay_firebase::{load_config, load_config_with_file, FirebaseDestination};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backend::StdoutBackend;
use sample::sample_events;

#[derive(Parser, Debug)]
#[command(name = "relay-firebase-demo", version, about, long_about = None)]
struct Args {
	/// JSON settings document delivered to the pipeline before any event.
	#[arg(long, env = "RELAY_SETTINGS")]
	settings: Option<PathBuf>,

	/// TOML destination config file.
	#[arg(long, env = "RELAY_FIREBASE_CONFIG")]
	config: Option<PathBuf>,

	#[arg(long, value_enum, default_value_t = LogFormat::Compact)]
	log_format: LogFormat,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Fire the built-in sample events.
	Sample,
	/// Replay events from a JSON-lines file.
	Replay {
		/// One JSON event per line; blank lines are skipped.
		file: PathBuf,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
	Compact,
	Json,
	Pretty,
}

fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(args.log_format);

	let config = match &args.config {
		Some(path) => load_config_with_file(path),
		None => load_config(),
	}
	.context("failed to load destination config")?;

	let destination = FirebaseDestination::builder()
		.backend(Arc::new(StdoutBackend::stdout()))
		.config(config)
		.build()?;

	let mut pipeline = Pipeline::new();
	pipeline.add(Arc::new(destination));

	let settings = match &args.settings {
		Some(path) => read_settings(path)?,
		None => Settings::new(),
	};
	pipeline.apply_settings(&settings);

	let events = match &args.command {
		Command::Sample => sample_events(),
		Command::Replay { file } => read_events(file)?,
	};

	info!(count = events.len(), "processing events");
	for event in events {
		let kind = event.kind();
		if pipeline.process(event).is_none() {
			debug!(%kind, "event dropped by pipeline");
		}
	}

	Ok(())
}

fn init_tracing(format: LogFormat) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	match format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn read_settings(path: &Path) -> Result<Settings> {
	let file =
		File::open(path).with_context(|| format!("failed to open settings {}", path.display()))?;
	serde_json::from_reader(BufReader::new(file))
		.with_context(|| format!("failed to parse settings {}", path.display()))
}

/// Reads JSON-lines events. Malformed lines are logged and skipped.
fn read_events(path: &Path) -> Result<Vec<Event>> {
	let file =
		File::open(path).with_context(|| format!("failed to open events {}", path.display()))?;

	let mut events = Vec::new();
	for (index, line) in BufReader::new(file).lines().enumerate() {
		let line = line.with_context(|| format!("failed to read {}", path.display()))?;
		if line.trim().is_empty() {
			continue;
		}
		match Event::from_json_str(&line) {
			Ok(event) => events.push(event),
			Err(error) => warn!(line = index + 1, error = %error, "skipping malformed event"),
		}
	}
	Ok(events)
}
