//! Error types for route registration, resolution and reverse building.

use std::fmt;

use thiserror::Error;

use crate::params::ParamType;

/// Why a definition was rejected as a duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateReason {
	/// Another route already uses the same key.
	Key,
	/// The template accepts a concrete path that an existing route accepts too.
	Template {
		/// Key of the route that already claims the path.
		existing: String,
	},
}

impl fmt::Display for DuplicateReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Key => write!(f, "key is already registered"),
			Self::Template { existing } => {
				write!(f, "template collides with route '{}'", existing)
			}
		}
	}
}

/// Errors raised while building or registering a route definition.
///
/// These are programming errors in the route table and are meant to abort
/// startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
	/// The route key is empty.
	#[error("route key must not be empty")]
	EmptyKey,

	/// The key or the path template is already taken.
	#[error("duplicate route '{key}': {reason}")]
	DuplicateRoute {
		/// Key of the rejected definition.
		key: String,
		/// What it collided with.
		reason: DuplicateReason,
	},

	/// A path template or an external URI pattern could not be parsed.
	#[error("invalid template '{template}': {reason}")]
	InvalidTemplate {
		/// The offending template text.
		template: String,
		/// Human readable explanation.
		reason: String,
	},

	/// A parameter declaration is inconsistent.
	#[error("invalid parameter '{param}' on route '{key}': {reason}")]
	InvalidParameter {
		/// Route key.
		key: String,
		/// Parameter name.
		param: String,
		/// Human readable explanation.
		reason: String,
	},
}

impl RegistrationError {
	pub(crate) fn template(template: &str, reason: impl Into<String>) -> Self {
		Self::InvalidTemplate {
			template: template.to_string(),
			reason: reason.into(),
		}
	}

	/// Returns `true` for key or template collisions.
	pub fn is_duplicate(&self) -> bool {
		matches!(self, Self::DuplicateRoute { .. })
	}
}

/// Errors raised while turning raw argument strings into typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
	/// A raw value could not be converted to the declared type.
	#[error(
		"cannot convert argument '{param}' of route '{route}' from '{raw}' to {expected}: {reason}"
	)]
	TypeCoercion {
		/// Route key.
		route: String,
		/// Parameter name.
		param: String,
		/// Declared type.
		expected: ParamType,
		/// The raw input.
		raw: String,
		/// Parser message.
		reason: String,
	},

	/// A required parameter had no raw value.
	#[error("missing required argument '{param}' for route '{route}'")]
	MissingRequiredArgument {
		/// Route key.
		route: String,
		/// Parameter name.
		param: String,
	},
}

/// Errors raised while building a concrete path from a route key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
	/// No route is registered under the key.
	#[error("unknown route: {0}")]
	UnknownRoute(String),

	/// A path slot that cannot be omitted had no value.
	#[error("missing parameter '{param}' to build a path for route '{route}'")]
	MissingParameter {
		/// Route key.
		route: String,
		/// Parameter name.
		param: String,
	},
}

/// Errors raised when reading a resolved argument as a Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
	/// The route declares no such parameter.
	#[error("no argument named '{0}'")]
	Missing(String),

	/// The stored value has a different type.
	#[error("argument '{name}' holds {actual}, expected {expected}")]
	TypeMismatch {
		/// Parameter name.
		name: String,
		/// Requested Rust type.
		expected: &'static str,
		/// Description of the stored value.
		actual: String,
	},
}

/// Result type for route registration.
pub type RegistrationResult<T> = Result<T, RegistrationError>;
