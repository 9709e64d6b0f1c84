//! External URI patterns for deep links.
//!
//! A pattern is written as `scheme://authority/path?query`, for example
//! `https://example.com/{id}` or `myapp://detail/{id}`. The scheme and the
//! authority are compared case-insensitively after URL normalization, so
//! `https://example.com:443` and `https://example.com` are the same
//! authority; the path and the query follow [`PathTemplate`] rules.

use std::fmt;

use url::Url;

use crate::error::RegistrationError;
use crate::template::{PathInput, PathTemplate, RawParams};

/// A parsed deep-link pattern.
#[derive(Debug, Clone)]
pub struct UriPattern {
	pattern: String,
	scheme: String,
	authority: String,
	path: PathTemplate,
}

impl UriPattern {
	/// Parses a URI pattern.
	///
	/// # Errors
	///
	/// Returns [`RegistrationError::InvalidTemplate`] if the scheme is missing
	/// or malformed, the authority contains a placeholder, or the path part is
	/// not a valid template.
	pub fn parse(pattern: &str) -> Result<Self, RegistrationError> {
		let Some((scheme, rest)) = pattern.split_once("://") else {
			return Err(RegistrationError::template(
				pattern,
				"URI pattern must start with scheme://",
			));
		};

		let valid_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
			&& scheme
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
		if !valid_scheme {
			return Err(RegistrationError::template(
				pattern,
				format!("invalid scheme '{}'", scheme),
			));
		}

		let split_at = rest.find(['/', '?']).unwrap_or(rest.len());
		let (authority, path_and_query) = rest.split_at(split_at);
		if authority.contains(['{', '}']) || authority.starts_with(':') {
			return Err(RegistrationError::template(
				pattern,
				"placeholders are only supported in the path and query",
			));
		}

		// Normalized the same way as incoming links.
		let authority = Url::parse(&format!("{}://{}/", scheme, authority))
			.map(|base| authority_of(&base))
			.map_err(|err| {
				RegistrationError::template(pattern, format!("invalid authority: {}", err))
			})?;

		let path = PathTemplate::parse(path_and_query).map_err(|err| match err {
			RegistrationError::InvalidTemplate { reason, .. } => {
				RegistrationError::template(pattern, reason)
			}
			other => other,
		})?;

		Ok(Self {
			pattern: pattern.to_string(),
			scheme: scheme.to_ascii_lowercase(),
			authority: authority.to_ascii_lowercase(),
			path,
		})
	}

	/// Returns the pattern as written.
	pub fn as_str(&self) -> &str {
		&self.pattern
	}

	/// Lowercased scheme.
	pub fn scheme(&self) -> &str {
		&self.scheme
	}

	/// Lowercased, normalized authority (`host` or `host:port`). A default
	/// port for the scheme is dropped.
	pub fn authority(&self) -> &str {
		&self.authority
	}

	/// The path and query part as a template.
	pub fn path(&self) -> &PathTemplate {
		&self.path
	}

	pub(crate) fn capture<F>(&self, uri: &Url, can_omit: F) -> Option<RawParams>
	where
		F: Fn(&str) -> bool,
	{
		if !uri.scheme().eq_ignore_ascii_case(&self.scheme) {
			return None;
		}
		if !authority_of(uri).eq_ignore_ascii_case(&self.authority) {
			return None;
		}
		self.path.capture(&PathInput::from_url(uri), can_omit)
	}
}

impl PartialEq for UriPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for UriPattern {}

impl fmt::Display for UriPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.pattern)
	}
}

fn authority_of(url: &Url) -> String {
	match (url.host_str(), url.port()) {
		(Some(host), Some(port)) => format!("{}:{}", host, port),
		(Some(host), None) => host.to_string(),
		(None, _) => String::new(),
	}
}
