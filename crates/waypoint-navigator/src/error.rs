//! Navigation error types.

use thiserror::Error;
use waypoint_routes::{ResolveError, ReverseError};

/// Errors returned by navigator operations.
///
/// Every variant is recoverable: a failed operation leaves the back stack
/// exactly as it was and notifies no listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
	/// No route is registered under the key, or no entry on the stack has it.
	#[error("unknown route: {0}")]
	UnknownRoute(String),

	/// No route's deep-link pattern matches the URI.
	#[error("no route handles deep link: {0}")]
	UnresolvedDeepLink(String),

	/// No route's path template matches the path.
	#[error("no route matches path: {0}")]
	UnmatchedPath(String),

	/// Back was requested while only the root entry is on the stack.
	#[error("cannot go back from the root entry")]
	EmptyStack,

	/// The arguments could not be resolved against the route.
	#[error(transparent)]
	Resolve(#[from] ResolveError),

	/// A concrete path could not be built for the route.
	#[error(transparent)]
	Reverse(#[from] ReverseError),
}

impl NavigationError {
	/// Whether the error came from a lookup that matched nothing.
	pub fn is_not_found(&self) -> bool {
		matches!(
			self,
			Self::UnknownRoute(_) | Self::UnresolvedDeepLink(_) | Self::UnmatchedPath(_)
		)
	}
}

/// Result type for navigator operations.
pub type Result<T, E = NavigationError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(NavigationError::UnknownRoute("settings".into()), "unknown route: settings")]
	#[case(
		NavigationError::UnresolvedDeepLink("https://example.org/1".into()),
		"no route handles deep link: https://example.org/1"
	)]
	#[case(NavigationError::EmptyStack, "cannot go back from the root entry")]
	fn test_display(#[case] err: NavigationError, #[case] expected: &str) {
		assert_eq!(err.to_string(), expected);
	}

	#[rstest]
	fn test_resolve_error_is_transparent() {
		let inner = ResolveError::MissingRequiredArgument {
			route: "order".to_string(),
			param: "number".to_string(),
		};
		let err = NavigationError::from(inner.clone());
		assert_eq!(err.to_string(), inner.to_string());
		assert!(!err.is_not_found());
	}
}
