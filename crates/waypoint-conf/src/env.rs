//! Environment variable overrides.
//!
//! Variables are looked up under the `WAYPOINT_` prefix:
//!
//! - `WAYPOINT_START_ROUTE` - replaces `start_route`
//! - `WAYPOINT_BACK_POLICY` - replaces `back_policy` (`reject` or `ignore`)
//! - `WAYPOINT_LOG` - replaces `log_filter`

use std::env;

/// Default prefix for all variables.
pub const ENV_PREFIX: &str = "WAYPOINT_";

/// Prefixed variable reader.
///
/// Reads the process environment by default; [`Env::from_lookup`] swaps in
/// any other source.
pub struct Env {
	prefix: String,
	lookup: Box<dyn Fn(&str) -> Option<String>>,
}

impl Env {
	/// Reads the process environment under [`ENV_PREFIX`].
	pub fn new() -> Self {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Reads variables through `lookup`, which receives full names.
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String> + 'static,
	{
		Self {
			prefix: ENV_PREFIX.to_string(),
			lookup: Box::new(lookup),
		}
	}

	/// Replaces the prefix.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	/// Full variable name for `key`.
	pub fn key_name(&self, key: &str) -> String {
		format!("{}{}", self.prefix, key)
	}

	/// Trimmed, non-empty value of `key`, if set.
	pub fn str(&self, key: &str) -> Option<String> {
		(self.lookup)(&self.key_name(key))
			.map(|value| value.trim().to_string())
			.filter(|value| !value.is_empty())
	}
}

impl Default for Env {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Env {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Env").field("prefix", &self.prefix).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashMap;

	fn env(vars: &[(&str, &str)]) -> Env {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		Env::from_lookup(move |name| vars.get(name).cloned())
	}

	#[rstest]
	fn test_str_uses_prefix() {
		let env = env(&[("WAYPOINT_LOG", "debug"), ("LOG", "trace")]);
		assert_eq!(env.str("LOG"), Some("debug".to_string()));
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	fn test_blank_values_are_unset(#[case] value: &str) {
		let env = env(&[("WAYPOINT_LOG", value)]);
		assert_eq!(env.str("LOG"), None);
	}

	#[rstest]
	fn test_custom_prefix() {
		let env = env(&[("APP_LOG", "warn")]).with_prefix("APP_");
		assert_eq!(env.key_name("LOG"), "APP_LOG");
		assert_eq!(env.str("LOG"), Some("warn".to_string()));
	}
}
