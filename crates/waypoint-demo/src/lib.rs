//! Terminal stand-in for a three-screen app.
//!
//! The main screen holds a text field and two buttons. "To detail screen"
//! opens `detail-screen/<text>`, which greets the name; "To detail (works
//! with deepLink)" opens a screen showing an id that external links such as
//! `https://example.com/12666` also reach.

pub mod app;
pub mod command;
pub mod screen;

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use waypoint_conf::{Settings, SettingsError};

pub use app::{App, Flow};
pub use command::{Command, CommandError};

/// Route table used when no `--config` is given.
pub const DEFAULT_ROUTES: &str = include_str!("../routes.toml");

/// Loads settings from `path`, or the built-in table, then applies
/// `WAYPOINT_*` overrides.
///
/// # Errors
///
/// Any [`SettingsError`] from reading, parsing or overriding.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
	let settings = match path {
		Some(path) => Settings::from_path(path)?,
		None => Settings::from_toml_str(DEFAULT_ROUTES)?,
	};
	settings.with_env_overrides()
}

/// Filter directive for the given settings filter and `-v` count.
pub fn log_directive(configured: &str, verbosity: u8) -> String {
	match verbosity {
		0 => configured.to_string(),
		1 => "debug".to_string(),
		_ => "trace".to_string(),
	}
}

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` wins over everything else when set.
pub fn init_tracing(configured: &str, verbosity: u8) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(log_directive(configured, verbosity)));
	let installed = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.try_init();
	if installed.is_err() {
		tracing::debug!("tracing subscriber already installed");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, "warn,waypoint=info")]
	#[case(1, "debug")]
	#[case(3, "trace")]
	fn test_log_directive(#[case] verbosity: u8, #[case] expected: &str) {
		assert_eq!(log_directive("warn,waypoint=info", verbosity), expected);
	}

	#[rstest]
	fn test_builtin_routes_parse() {
		let settings = Settings::from_toml_str(DEFAULT_ROUTES).unwrap();
		assert_eq!(settings.start_route, "main-screen");
		assert_eq!(settings.routes.len(), 3);
		assert!(settings.build_registry().is_ok());
	}
}
