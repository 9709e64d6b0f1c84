//! Segment-based path templates.
//!
//! Templates are written as `/`-separated segments where each segment is
//! either literal text or a whole-segment placeholder:
//!
//! - `main-screen` - literal only
//! - `detail-screen/:name` - colon placeholder
//! - `detail-screen/{name}` - brace placeholder
//! - `search?q={query}&page={page}` - query arguments bound to parameters
//!
//! Matching works on decoded segments, so `%2F` inside a segment never
//! splits it.

use std::collections::HashMap;
use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use url::Url;

use crate::error::RegistrationError;

/// Raw argument strings keyed by parameter name.
pub type RawParams = HashMap<String, String>;

/// Maximum allowed length for a template string in bytes.
const MAX_TEMPLATE_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a template.
const MAX_TEMPLATE_SEGMENTS: usize = 32;

/// Characters escaped when a value is written into a path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'/')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'`')
	.add(b'{')
	.add(b'}');

/// One segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Must equal the input segment exactly.
	Literal(String),
	/// Captures one non-empty input segment under the given name.
	Param(String),
}

/// A query argument bound to a parameter, as in `?q={query}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBinding {
	/// Key in the query string.
	pub key: String,
	/// Parameter receiving the value.
	pub param: String,
}

/// A parsed path template.
#[derive(Debug, Clone)]
pub struct PathTemplate {
	template: String,
	leading_slash: bool,
	segments: Vec<Segment>,
	query: Vec<QueryBinding>,
}

impl PathTemplate {
	/// Parses a template string.
	///
	/// # Errors
	///
	/// Returns [`RegistrationError::InvalidTemplate`] if the template is too
	/// long, has too many or empty segments, a malformed placeholder, or the
	/// same placeholder twice.
	pub fn parse(template: &str) -> Result<Self, RegistrationError> {
		if template.len() > MAX_TEMPLATE_LENGTH {
			return Err(RegistrationError::template(
				template,
				format!(
					"length {} exceeds maximum allowed length of {} bytes",
					template.len(),
					MAX_TEMPLATE_LENGTH
				),
			));
		}

		let (path, query) = match template.split_once('?') {
			Some((path, query)) => (path, Some(query)),
			None => (template, None),
		};
		let leading_slash = path.starts_with('/');
		let trimmed = path.strip_prefix('/').unwrap_or(path);
		let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

		let mut segments = Vec::new();
		if !trimmed.is_empty() {
			for raw in trimmed.split('/') {
				if raw.is_empty() {
					return Err(RegistrationError::template(template, "empty path segment"));
				}
				segments.push(parse_segment(template, raw)?);
			}
		}
		if segments.len() > MAX_TEMPLATE_SEGMENTS {
			return Err(RegistrationError::template(
				template,
				format!(
					"{} path segments exceed the maximum of {}",
					segments.len(),
					MAX_TEMPLATE_SEGMENTS
				),
			));
		}

		let mut bindings = Vec::new();
		if let Some(query) = query.filter(|q| !q.is_empty()) {
			for item in query.split('&') {
				let Some((key, value)) = item.split_once('=') else {
					return Err(RegistrationError::template(
						template,
						format!("query item '{}' must look like key={{param}}", item),
					));
				};
				if key.is_empty() {
					return Err(RegistrationError::template(template, "empty query key"));
				}
				match parse_segment(template, value)? {
					Segment::Param(param) => bindings.push(QueryBinding {
						key: key.to_string(),
						param,
					}),
					Segment::Literal(_) => {
						return Err(RegistrationError::template(
							template,
							format!("query item '{}' must bind a placeholder", item),
						));
					}
				}
			}
		}

		let parsed = Self {
			template: template.to_string(),
			leading_slash,
			segments,
			query: bindings,
		};

		let mut seen = Vec::new();
		for name in parsed.param_names() {
			if seen.contains(&name) {
				return Err(RegistrationError::template(
					template,
					format!("placeholder '{}' appears more than once", name),
				));
			}
			seen.push(name);
		}

		Ok(parsed)
	}

	/// Returns the original template string.
	pub fn as_str(&self) -> &str {
		&self.template
	}

	/// Path segments in order.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Query bindings in order.
	pub fn query(&self) -> &[QueryBinding] {
		&self.query
	}

	/// Placeholder names, path slots first, then query bindings.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.segments
			.iter()
			.filter_map(|segment| match segment {
				Segment::Param(name) => Some(name.as_str()),
				Segment::Literal(_) => None,
			})
			.chain(self.query.iter().map(|binding| binding.param.as_str()))
	}

	/// Matches decoded input against the template.
	///
	/// A slot whose parameter `can_omit` may be missing or empty, provided
	/// every template segment after it is an omittable slot as well and the
	/// input has no further non-empty segments.
	pub(crate) fn capture<F>(&self, input: &PathInput, can_omit: F) -> Option<RawParams>
	where
		F: Fn(&str) -> bool,
	{
		if input.segments.len() > self.segments.len() {
			return None;
		}

		let mut params = RawParams::new();
		let mut omitted = false;
		for (index, segment) in self.segments.iter().enumerate() {
			let value = input
				.segments
				.get(index)
				.filter(|value| !value.is_empty());
			match (segment, value) {
				(Segment::Literal(literal), Some(value)) if !omitted && literal == value => {}
				(Segment::Literal(_), _) => return None,
				(Segment::Param(_), Some(_)) if omitted => return None,
				(Segment::Param(name), Some(value)) => {
					params.insert(name.clone(), value.clone());
				}
				(Segment::Param(name), None) => {
					if !can_omit(name) {
						return None;
					}
					omitted = true;
				}
			}
		}

		for binding in &self.query {
			let value = input
				.query
				.iter()
				.find(|(key, _)| key == &binding.key)
				.map(|(_, value)| value)
				.filter(|value| !value.is_empty());
			if let Some(value) = value {
				params.insert(binding.param.clone(), value.clone());
			}
		}

		Some(params)
	}

	/// Whether some concrete path is accepted by both templates.
	pub(crate) fn overlaps<F, G>(&self, can_omit: F, other: &PathTemplate, other_can_omit: G) -> bool
	where
		F: Fn(&str) -> bool,
		G: Fn(&str) -> bool,
	{
		let (min_a, max_a) = self.accepted_lengths(can_omit);
		let (min_b, max_b) = other.accepted_lengths(other_can_omit);
		let low = min_a.max(min_b);
		let high = max_a.min(max_b);

		(low..=high).any(|len| {
			self.segments[..len]
				.iter()
				.zip(&other.segments[..len])
				.all(|pair| match pair {
					(Segment::Literal(a), Segment::Literal(b)) => a == b,
					_ => true,
				})
		})
	}

	fn accepted_lengths<F>(&self, can_omit: F) -> (usize, usize)
	where
		F: Fn(&str) -> bool,
	{
		let omittable = self
			.segments
			.iter()
			.rev()
			.take_while(|segment| matches!(segment, Segment::Param(name) if can_omit(name)))
			.count();
		(self.segments.len() - omittable, self.segments.len())
	}

	/// Builds a concrete path from argument strings.
	///
	/// Trailing omittable slots without a value are left out; query bindings
	/// without a value are skipped.
	///
	/// # Errors
	///
	/// Returns the name of the first slot that has no value and cannot be
	/// omitted.
	pub(crate) fn reverse<F>(&self, args: &RawParams, can_omit: F) -> Result<String, String>
	where
		F: Fn(&str) -> bool,
	{
		let mut parts: Vec<String> = Vec::with_capacity(self.segments.len());
		for (index, segment) in self.segments.iter().enumerate() {
			match segment {
				Segment::Literal(literal) => parts.push(literal.clone()),
				Segment::Param(name) => match args.get(name).filter(|v| !v.is_empty()) {
					Some(value) => {
						parts.push(utf8_percent_encode(value, SEGMENT_ENCODE_SET).to_string());
					}
					None => {
						let rest_omittable = self.segments[index..].iter().all(|segment| {
							matches!(segment, Segment::Param(n) if can_omit(n) && args.get(n).is_none_or(|v| v.is_empty()))
						});
						if rest_omittable {
							break;
						}
						return Err(name.clone());
					}
				},
			}
		}

		let mut path = parts.join("/");
		if self.leading_slash {
			path.insert(0, '/');
		}

		let mut serializer = url::form_urlencoded::Serializer::new(String::new());
		let mut has_query = false;
		for binding in &self.query {
			if let Some(value) = args.get(&binding.param) {
				serializer.append_pair(&binding.key, value);
				has_query = true;
			}
		}
		if has_query {
			path.push('?');
			path.push_str(&serializer.finish());
		}

		Ok(path)
	}
}

impl PartialEq for PathTemplate {
	fn eq(&self, other: &Self) -> bool {
		self.template == other.template
	}
}

impl Eq for PathTemplate {}

impl fmt::Display for PathTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.template)
	}
}

fn parse_segment(template: &str, raw: &str) -> Result<Segment, RegistrationError> {
	let name = if let Some(name) = raw.strip_prefix(':') {
		Some(name)
	} else if let Some(inner) = raw.strip_prefix('{') {
		match inner.strip_suffix('}') {
			Some(name) => Some(name),
			None => {
				return Err(RegistrationError::template(
					template,
					format!("unclosed placeholder '{}'", raw),
				));
			}
		}
	} else {
		None
	};

	match name {
		Some(name) => {
			if name.is_empty()
				|| !name
					.chars()
					.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
			{
				return Err(RegistrationError::template(
					template,
					format!("invalid placeholder name '{}'", name),
				));
			}
			Ok(Segment::Param(name.to_string()))
		}
		None if raw.contains(['{', '}']) => Err(RegistrationError::template(
			template,
			format!("placeholder must span the whole segment in '{}'", raw),
		)),
		None => Ok(Segment::Literal(raw.to_string())),
	}
}

/// Decoded path segments and query pairs of a concrete location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PathInput {
	segments: Vec<String>,
	query: Vec<(String, String)>,
}

impl PathInput {
	/// Splits an application path such as `detail-screen/Alice?x=1`.
	pub(crate) fn from_path(path: &str) -> Self {
		let (path, query) = match path.split_once('?') {
			Some((path, query)) => (path, query),
			None => (path, ""),
		};
		Self {
			segments: split_segments(path),
			query: url::form_urlencoded::parse(query.as_bytes())
				.into_owned()
				.collect(),
		}
	}

	/// Takes the path and query of a parsed URL.
	pub(crate) fn from_url(url: &Url) -> Self {
		Self {
			segments: split_segments(url.path()),
			query: url.query_pairs().into_owned().collect(),
		}
	}
}

fn split_segments(path: &str) -> Vec<String> {
	let path = path.strip_prefix('/').unwrap_or(path);
	if path.is_empty() {
		return Vec::new();
	}
	let mut segments: Vec<String> = path
		.split('/')
		.map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
		.collect();
	if segments.last().is_some_and(String::is_empty) {
		segments.pop();
	}
	segments
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn never(_: &str) -> bool {
		false
	}

	fn always(_: &str) -> bool {
		true
	}

	#[rstest]
	#[case("main-screen", 1)]
	#[case("/detail-screen/:name", 2)]
	#[case("detail-screen/{name}/", 2)]
	#[case("", 0)]
	fn test_parse_segment_count(#[case] template: &str, #[case] expected: usize) {
		let parsed = PathTemplate::parse(template).unwrap();
		assert_eq!(parsed.segments().len(), expected);
	}

	#[rstest]
	fn test_colon_and_brace_placeholders_are_equivalent() {
		let colon = PathTemplate::parse("detail-screen/:name").unwrap();
		let brace = PathTemplate::parse("detail-screen/{name}").unwrap();
		assert_eq!(colon.segments(), brace.segments());
	}

	#[rstest]
	#[case("a//b", "empty path segment")]
	#[case("a/{name", "unclosed placeholder")]
	#[case("a/pre{name}", "whole segment")]
	#[case("a/:", "invalid placeholder name")]
	#[case("a/:x/b/{x}", "more than once")]
	#[case("a?q", "key={param}")]
	#[case("a?q=literal", "must bind a placeholder")]
	fn test_parse_rejects(#[case] template: &str, #[case] message: &str) {
		let err = PathTemplate::parse(template).unwrap_err();
		assert!(err.to_string().contains(message), "{}", err);
	}

	#[rstest]
	fn test_parse_rejects_excessive_length() {
		// Arrange
		let template = "a".repeat(MAX_TEMPLATE_LENGTH + 1);

		// Act
		let result = PathTemplate::parse(&template);

		// Assert
		assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
	}

	#[rstest]
	fn test_parse_rejects_excessive_segments() {
		let segments: Vec<&str> = (0..35).map(|_| "seg").collect();
		let result = PathTemplate::parse(&segments.join("/"));
		assert!(result.unwrap_err().to_string().contains("exceed the maximum"));
	}

	#[rstest]
	fn test_capture_decodes_segments() {
		let template = PathTemplate::parse("detail-screen/:name").unwrap();
		let params = template
			.capture(&PathInput::from_path("detail-screen/Jane%20Doe"), never)
			.unwrap();
		assert_eq!(params.get("name"), Some(&"Jane Doe".to_string()));
	}

	#[rstest]
	fn test_capture_keeps_encoded_slash_inside_segment() {
		let template = PathTemplate::parse("files/:path").unwrap();
		let params = template
			.capture(&PathInput::from_path("files/a%2Fb"), never)
			.unwrap();
		assert_eq!(params.get("path"), Some(&"a/b".to_string()));
	}

	#[rstest]
	#[case("detail-screen")]
	#[case("detail-screen/")]
	fn test_capture_omits_trailing_optional_slot(#[case] path: &str) {
		let template = PathTemplate::parse("detail-screen/:name").unwrap();

		assert_eq!(
			template.capture(&PathInput::from_path(path), always),
			Some(RawParams::new())
		);
		assert_eq!(template.capture(&PathInput::from_path(path), never), None);
	}

	#[rstest]
	fn test_capture_does_not_omit_inner_slot() {
		let template = PathTemplate::parse("users/:id/posts").unwrap();
		assert_eq!(
			template.capture(&PathInput::from_path("users//posts"), always),
			None
		);
	}

	#[rstest]
	fn test_capture_rejects_extra_segments() {
		let template = PathTemplate::parse("main-screen").unwrap();
		assert!(template
			.capture(&PathInput::from_path("main-screen/extra"), always)
			.is_none());
	}

	#[rstest]
	fn test_capture_query_bindings() {
		let template = PathTemplate::parse("search?q={query}&page={page}").unwrap();
		let params = template
			.capture(&PathInput::from_path("search?page=2&q=rust+nav&other=x"), never)
			.unwrap();
		assert_eq!(params.get("query"), Some(&"rust nav".to_string()));
		assert_eq!(params.get("page"), Some(&"2".to_string()));
		assert_eq!(params.len(), 2);
	}

	#[rstest]
	#[case("detail-screen/:name", "detail-screen/:id", true)]
	#[case("detail-screen/:name", "detail-screen/fixed", true)]
	#[case("detail-screen/:name", "detail-screen-deeplink", false)]
	#[case("a/b", "a/c", false)]
	#[case("a/:x", "a/:x/b", false)]
	fn test_overlaps_without_omission(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
		let a = PathTemplate::parse(a).unwrap();
		let b = PathTemplate::parse(b).unwrap();
		assert_eq!(a.overlaps(never, &b, never), expected);
	}

	#[rstest]
	fn test_overlaps_with_omittable_trailing_slot() {
		let optional = PathTemplate::parse("detail-screen/:name").unwrap();
		let literal = PathTemplate::parse("detail-screen").unwrap();

		assert!(optional.overlaps(always, &literal, never));
		assert!(!optional.overlaps(never, &literal, never));
	}

	#[rstest]
	fn test_reverse_encodes_values() {
		let template = PathTemplate::parse("detail-screen/:name").unwrap();
		let args = RawParams::from([("name".to_string(), "Jane Doe/2".to_string())]);
		assert_eq!(
			template.reverse(&args, never),
			Ok("detail-screen/Jane%20Doe%2F2".to_string())
		);
	}

	#[rstest]
	fn test_reverse_skips_omittable_trailing_slot() {
		let template = PathTemplate::parse("/detail-screen/:name").unwrap();
		assert_eq!(
			template.reverse(&RawParams::new(), always),
			Ok("/detail-screen".to_string())
		);
		assert_eq!(
			template.reverse(&RawParams::new(), never),
			Err("name".to_string())
		);
	}

	#[rstest]
	fn test_reverse_appends_query() {
		let template = PathTemplate::parse("search?q={query}").unwrap();
		let args = RawParams::from([("query".to_string(), "a b".to_string())]);
		assert_eq!(template.reverse(&args, always), Ok("search?q=a+b".to_string()));
	}
}
