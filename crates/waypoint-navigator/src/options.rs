//! Navigator configuration and per-call navigation options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What `go_back` does when only the root entry is left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackPolicy {
	/// Fail with [`NavigationError::EmptyStack`](crate::NavigationError::EmptyStack).
	#[default]
	Reject,
	/// Do nothing and report that nothing was popped.
	Ignore,
}

impl BackPolicy {
	/// Lowercase name as used in configuration files.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Reject => "reject",
			Self::Ignore => "ignore",
		}
	}
}

impl fmt::Display for BackPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown back policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown back policy '{0}', expected 'reject' or 'ignore'")]
pub struct ParseBackPolicyError(pub String);

impl FromStr for BackPolicy {
	type Err = ParseBackPolicyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"reject" => Ok(Self::Reject),
			"ignore" => Ok(Self::Ignore),
			_ => Err(ParseBackPolicyError(s.to_string())),
		}
	}
}

/// Navigator-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigatorConfig {
	/// Behaviour of `go_back` on the root entry.
	pub back_policy: BackPolicy,
}

impl NavigatorConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the back policy.
	pub fn with_back_policy(mut self, back_policy: BackPolicy) -> Self {
		self.back_policy = back_policy;
		self
	}
}

/// Pops entries before a push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopUpTo {
	/// Key of the entry to pop up to. The most recent entry wins.
	pub key: String,
	/// Whether that entry is popped as well. The root entry is never popped.
	pub inclusive: bool,
}

/// Options for [`Navigator::navigate_with`](crate::Navigator::navigate_with).
///
/// ```
/// use waypoint_navigator::NavOptions;
///
/// let options = NavOptions::new()
///     .pop_up_to("main-screen", false)
///     .launch_single_top(true);
/// assert!(options.launch_single_top);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavOptions {
	/// Replace the top entry instead of pushing when it already shows the
	/// destination route.
	pub launch_single_top: bool,
	/// Entries to pop before the destination is added.
	pub pop_up_to: Option<PopUpTo>,
}

impl NavOptions {
	/// Options that behave like a plain push.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets [`NavOptions::launch_single_top`].
	pub fn launch_single_top(mut self, enabled: bool) -> Self {
		self.launch_single_top = enabled;
		self
	}

	/// Sets [`NavOptions::pop_up_to`].
	pub fn pop_up_to(mut self, key: impl Into<String>, inclusive: bool) -> Self {
		self.pop_up_to = Some(PopUpTo {
			key: key.into(),
			inclusive,
		});
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("reject", BackPolicy::Reject)]
	#[case("IGNORE", BackPolicy::Ignore)]
	#[case(" ignore ", BackPolicy::Ignore)]
	fn test_back_policy_from_str(#[case] input: &str, #[case] expected: BackPolicy) {
		assert_eq!(input.parse::<BackPolicy>(), Ok(expected));
	}

	#[rstest]
	fn test_back_policy_from_str_rejects_unknown() {
		let err = "exit".parse::<BackPolicy>().unwrap_err();
		assert!(err.to_string().contains("'exit'"));
	}

	#[rstest]
	fn test_back_policy_defaults_to_reject() {
		assert_eq!(NavigatorConfig::new().back_policy, BackPolicy::Reject);
		assert_eq!(BackPolicy::default().to_string(), "reject");
	}

	#[rstest]
	fn test_nav_options_builder() {
		let options = NavOptions::new().pop_up_to("main-screen", true);
		assert_eq!(
			options.pop_up_to,
			Some(PopUpTo {
				key: "main-screen".to_string(),
				inclusive: true,
			})
		);
		assert!(!options.launch_single_top);
	}
}
