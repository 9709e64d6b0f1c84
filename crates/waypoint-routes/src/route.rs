//! Route definitions and resolved route instances.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{ArgumentError, RegistrationError, ResolveError};
use crate::params::{FromArgument, ParamSpec, ParamType, ParamValue, describe_value};
use crate::template::{PathInput, PathTemplate, RawParams};
use crate::uri::UriPattern;

/// A named, parameterized destination.
///
/// Build one with [`RouteDefinition::builder`]:
///
/// ```
/// use waypoint_routes::{ParamSpec, ParamType, RouteDefinition};
///
/// let detail = RouteDefinition::builder("detail-screen", "detail-screen/:name")
///     .param("name", ParamSpec::new(ParamType::String).default_value("Test").nullable())
///     .build()
///     .unwrap();
/// assert_eq!(detail.key(), "detail-screen");
/// ```
#[derive(Debug, Clone)]
pub struct RouteDefinition {
	key: String,
	template: PathTemplate,
	params: IndexMap<String, ParamSpec>,
	deep_links: Vec<UriPattern>,
}

impl RouteDefinition {
	/// Starts a definition for `key` matching `template`.
	pub fn builder(key: impl Into<String>, template: impl Into<String>) -> RouteDefinitionBuilder {
		RouteDefinitionBuilder {
			key: key.into(),
			template: template.into(),
			params: IndexMap::new(),
			deep_links: Vec::new(),
		}
	}

	/// Unique route key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Path template.
	pub fn template(&self) -> &PathTemplate {
		&self.template
	}

	/// Declared parameters in declaration order.
	pub fn params(&self) -> &IndexMap<String, ParamSpec> {
		&self.params
	}

	/// Declaration of one parameter.
	pub fn param(&self, name: &str) -> Option<&ParamSpec> {
		self.params.get(name)
	}

	/// External URI patterns that also lead to this route.
	pub fn deep_links(&self) -> &[UriPattern] {
		&self.deep_links
	}

	/// Whether input may leave `name` out.
	pub(crate) fn can_omit(&self, name: &str) -> bool {
		self.params
			.get(name)
			.is_some_and(|spec| !spec.is_required())
	}

	pub(crate) fn capture_path(&self, input: &PathInput) -> Option<RawParams> {
		self.template
			.capture(input, |name| self.can_omit(name))
			.filter(|raw| self.accepts(raw))
	}

	// Captured values for optional parameters must coerce, otherwise the
	// path or link belongs to some other route.
	pub(crate) fn accepts(&self, raw: &RawParams) -> bool {
		self.params
			.iter()
			.filter(|(_, spec)| !spec.is_required())
			.all(|(name, spec)| raw.get(name).is_none_or(|value| spec.accepts(value)))
	}

	pub(crate) fn overlaps(&self, other: &RouteDefinition) -> bool {
		self.template.overlaps(
			|name| self.can_omit(name),
			&other.template,
			|name| other.can_omit(name),
		)
	}

	pub(crate) fn reverse(&self, args: &RawParams) -> Result<String, String> {
		self.template.reverse(args, |name| self.can_omit(name))
	}

	/// Resolves raw argument strings into a [`ResolvedRoute`].
	///
	/// Every declared parameter ends up with a value; raw entries that match
	/// no declared parameter are dropped. An optional parameter whose raw
	/// value does not parse falls back to its default.
	///
	/// # Errors
	///
	/// Returns [`ResolveError::TypeCoercion`] when a raw value for a required
	/// parameter does not parse as the declared type and [`ResolveError::MissingRequiredArgument`] when
	/// a required parameter has no raw value.
	pub fn resolve(&self, raw: &RawParams) -> Result<ResolvedRoute, ResolveError> {
		let mut arguments = RouteArguments::default();
		for (name, spec) in &self.params {
			let value = spec.resolve(&self.key, name, raw.get(name).map(String::as_str))?;
			arguments.values.insert(name.clone(), value);
		}

		for ignored in raw.keys().filter(|name| !self.params.contains_key(*name)) {
			tracing::trace!(route = %self.key, argument = %ignored, "dropping undeclared argument");
		}

		Ok(ResolvedRoute {
			key: self.key.clone(),
			arguments,
		})
	}
}

/// Builder for [`RouteDefinition`].
#[derive(Debug, Clone)]
pub struct RouteDefinitionBuilder {
	key: String,
	template: String,
	params: IndexMap<String, ParamSpec>,
	deep_links: Vec<String>,
}

impl RouteDefinitionBuilder {
	/// Declares a parameter. Declaring the same name again replaces it.
	pub fn param(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
		self.params.insert(name.into(), spec);
		self
	}

	/// Adds an external URI pattern.
	pub fn deep_link(mut self, pattern: impl Into<String>) -> Self {
		self.deep_links.push(pattern.into());
		self
	}

	/// Parses the template and patterns and validates the declarations.
	///
	/// Placeholders without a declaration become required string
	/// parameters.
	///
	/// # Errors
	///
	/// Returns [`RegistrationError::EmptyKey`],
	/// [`RegistrationError::InvalidTemplate`] or
	/// [`RegistrationError::InvalidParameter`].
	pub fn build(self) -> Result<RouteDefinition, RegistrationError> {
		if self.key.trim().is_empty() {
			return Err(RegistrationError::EmptyKey);
		}

		let template = PathTemplate::parse(&self.template)?;
		let deep_links = self
			.deep_links
			.iter()
			.map(|pattern| UriPattern::parse(pattern))
			.collect::<Result<Vec<_>, _>>()?;

		let mut params = self.params;
		let placeholders = template
			.param_names()
			.chain(deep_links.iter().flat_map(|link| link.path().param_names()));
		for name in placeholders {
			if !params.contains_key(name) {
				params.insert(name.to_string(), ParamSpec::new(ParamType::String));
			}
		}

		for (name, spec) in &params {
			spec.validate()
				.map_err(|reason| RegistrationError::InvalidParameter {
					key: self.key.clone(),
					param: name.clone(),
					reason,
				})?;
		}

		Ok(RouteDefinition {
			key: self.key,
			template,
			params,
			deep_links,
		})
	}
}

/// Resolved argument values of one route instance, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteArguments {
	values: IndexMap<String, ParamValue>,
}

impl RouteArguments {
	/// Value of one argument.
	pub fn get(&self, name: &str) -> Option<&ParamValue> {
		self.values.get(name)
	}

	/// Reads an argument as a Rust type.
	///
	/// # Errors
	///
	/// Returns [`ArgumentError::Missing`] for an undeclared name and
	/// [`ArgumentError::TypeMismatch`] when the stored kind does not fit `T`.
	pub fn get_as<T: FromArgument>(&self, name: &str) -> Result<T, ArgumentError> {
		let value = self
			.values
			.get(name)
			.ok_or_else(|| ArgumentError::Missing(name.to_string()))?;
		T::from_argument(value).ok_or_else(|| ArgumentError::TypeMismatch {
			name: name.to_string(),
			expected: T::TYPE_NAME,
			actual: describe_value(value),
		})
	}

	/// Whether an argument with this name exists.
	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	/// Number of arguments.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether there are no arguments.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates over `(name, value)` pairs in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.values.iter().map(|(name, value)| (name.as_str(), value))
	}

	/// Renders the values back to raw strings that resolve to the same
	/// arguments. `Null` becomes the literal `null`.
	pub fn to_raw(&self) -> RawParams {
		self.values
			.iter()
			.map(|(name, value)| (name.clone(), value.to_string()))
			.collect()
	}
}

impl<K, V> FromIterator<(K, V)> for RouteArguments
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(name, value)| (name.into(), value.into()))
				.collect(),
		}
	}
}

impl fmt::Display for RouteArguments {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("{")?;
		for (index, (name, value)) in self.values.iter().enumerate() {
			if index > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}: {}", name, value)?;
		}
		f.write_str("}")
	}
}

/// A route together with its resolved arguments, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
	key: String,
	arguments: RouteArguments,
}

impl ResolvedRoute {
	/// Key of the definition this instance was resolved from.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Resolved arguments.
	pub fn arguments(&self) -> &RouteArguments {
		&self.arguments
	}

	/// Shorthand for `arguments().get_as(name)`.
	///
	/// # Errors
	///
	/// See [`RouteArguments::get_as`].
	pub fn arg<T: FromArgument>(&self, name: &str) -> Result<T, ArgumentError> {
		self.arguments.get_as(name)
	}
}

impl fmt::Display for ResolvedRoute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.key, self.arguments)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn detail() -> RouteDefinition {
		RouteDefinition::builder("detail-screen", "detail-screen/:name")
			.param(
				"name",
				ParamSpec::new(ParamType::String)
					.default_value("Test")
					.nullable(),
			)
			.build()
			.unwrap()
	}

	#[rstest]
	fn test_resolve_applies_default(detail: RouteDefinition) {
		let resolved = detail.resolve(&RawParams::new()).unwrap();
		assert_eq!(resolved.key(), "detail-screen");
		assert_eq!(resolved.arg::<String>("name"), Ok("Test".to_string()));
	}

	#[rstest]
	fn test_resolve_drops_undeclared_arguments(detail: RouteDefinition) {
		// Arrange
		let raw = RawParams::from([
			("name".to_string(), "Alice".to_string()),
			("age".to_string(), "30".to_string()),
		]);

		// Act
		let resolved = detail.resolve(&raw).unwrap();

		// Assert
		assert_eq!(resolved.arguments().len(), 1);
		assert!(!resolved.arguments().contains("age"));
	}

	#[rstest]
	fn test_undeclared_placeholder_becomes_required_string() {
		let route = RouteDefinition::builder("user", "users/{id}")
			.build()
			.unwrap();
		let spec = route.param("id").unwrap();
		assert!(spec.is_required());
		assert_eq!(spec.param_type(), ParamType::String);
	}

	#[rstest]
	fn test_deep_link_placeholder_is_declared() {
		let route = RouteDefinition::builder("link", "link")
			.deep_link("https://example.com/{id}")
			.build()
			.unwrap();
		assert!(route.param("id").is_some());
	}

	#[rstest]
	fn test_build_rejects_empty_key() {
		let err = RouteDefinition::builder(" ", "x").build().unwrap_err();
		assert_eq!(err, RegistrationError::EmptyKey);
	}

	#[rstest]
	fn test_build_rejects_invalid_parameter() {
		let err = RouteDefinition::builder("link", "link/:id")
			.param("id", ParamSpec::new(ParamType::Int).default_value("abc"))
			.build()
			.unwrap_err();
		assert!(matches!(
			err,
			RegistrationError::InvalidParameter { ref param, .. } if param == "id"
		));
	}

	#[rstest]
	fn test_arguments_type_mismatch(detail: RouteDefinition) {
		let resolved = detail.resolve(&RawParams::new()).unwrap();
		let err = resolved.arg::<i32>("name").unwrap_err();
		assert_eq!(
			err,
			ArgumentError::TypeMismatch {
				name: "name".to_string(),
				expected: "i32",
				actual: "string Test".to_string(),
			}
		);
		assert_eq!(
			resolved.arg::<i32>("missing"),
			Err(ArgumentError::Missing("missing".to_string()))
		);
	}

	#[rstest]
	fn test_arguments_display_and_raw() {
		let arguments: RouteArguments = [("id", ParamValue::Int(5)), ("note", ParamValue::Null)]
			.into_iter()
			.collect();
		assert_eq!(arguments.to_string(), "{id: 5, note: null}");
		assert_eq!(
			arguments.to_raw(),
			RawParams::from([
				("id".to_string(), "5".to_string()),
				("note".to_string(), "null".to_string()),
			])
		);
	}
}
