//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;
use waypoint_navigator::NavigationError;
use waypoint_routes::{ParamType, RegistrationError};

/// Errors raised while loading settings or building from them.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("failed to read settings file {}: {source}", path.display())]
	Io {
		/// File that was being read.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// The document is not valid TOML or does not fit the schema.
	#[error("TOML error: {0}")]
	Parse(#[from] toml::de::Error),

	/// A parameter default does not fit its declaration.
	#[error("invalid default for parameter '{param}' of route '{route}': {reason}")]
	InvalidDefault {
		/// Route key.
		route: String,
		/// Parameter name.
		param: String,
		/// Human readable explanation.
		reason: String,
	},

	/// An environment override has an unusable value.
	#[error("invalid value for {variable}: {reason}")]
	InvalidOverride {
		/// Full variable name.
		variable: String,
		/// Human readable explanation.
		reason: String,
	},

	/// `start_route` names no configured route.
	#[error("start route '{0}' is not defined")]
	UnknownStartRoute(String),

	/// A route entry was rejected by the registry.
	#[error(transparent)]
	Registration(#[from] RegistrationError),

	/// The navigator could not start on the start route.
	#[error("cannot start navigator: {0}")]
	Start(#[from] NavigationError),
}

impl SettingsError {
	pub(crate) fn default_mismatch(
		route: &str,
		param: &str,
		expected: ParamType,
		found: &str,
	) -> Self {
		Self::InvalidDefault {
			route: route.to_string(),
			param: param.to_string(),
			reason: format!("expected {}, found {}", expected, found),
		}
	}
}

/// Result type for settings operations.
pub type Result<T, E = SettingsError> = std::result::Result<T, E>;
