//! The route registry.
//!
//! An ordered, append-only catalogue of [`RouteDefinition`]s built once at
//! startup. Lookups try definitions in registration order and the first
//! match wins, so registration order doubles as match priority.

use std::collections::HashMap;

use url::Url;

use crate::error::{DuplicateReason, RegistrationError, ResolveError, ReverseError};
use crate::route::{ResolvedRoute, RouteDefinition};
use crate::template::{PathInput, RawParams};

/// A definition matched against a path or URI, with the captured raw
/// argument strings.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
	/// The matched definition.
	pub definition: &'a RouteDefinition,
	/// Captured raw values by parameter name.
	pub params: RawParams,
}

impl RouteMatch<'_> {
	/// Resolves the captured values against the matched definition.
	///
	/// # Errors
	///
	/// See [`RouteDefinition::resolve`].
	pub fn resolve(&self) -> Result<ResolvedRoute, ResolveError> {
		self.definition.resolve(&self.params)
	}
}

/// Catalogue of all routes of an application.
#[derive(Debug, Default)]
pub struct RouteRegistry {
	routes: Vec<RouteDefinition>,
	by_key: HashMap<String, usize>,
}

impl RouteRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers every definition in order.
	///
	/// # Errors
	///
	/// Stops at the first definition [`RouteRegistry::register`] rejects.
	pub fn from_definitions<I>(definitions: I) -> Result<Self, RegistrationError>
	where
		I: IntoIterator<Item = RouteDefinition>,
	{
		let mut registry = Self::new();
		for definition in definitions {
			registry.register(definition)?;
		}
		Ok(registry)
	}

	/// Adds a definition.
	///
	/// # Errors
	///
	/// Returns [`RegistrationError::DuplicateRoute`] if the key is taken or
	/// the template accepts a path that a registered template accepts too.
	pub fn register(&mut self, definition: RouteDefinition) -> Result<(), RegistrationError> {
		if self.by_key.contains_key(definition.key()) {
			return Err(RegistrationError::DuplicateRoute {
				key: definition.key().to_string(),
				reason: DuplicateReason::Key,
			});
		}

		if let Some(existing) = self.routes.iter().find(|route| route.overlaps(&definition)) {
			return Err(RegistrationError::DuplicateRoute {
				key: definition.key().to_string(),
				reason: DuplicateReason::Template {
					existing: existing.key().to_string(),
				},
			});
		}

		tracing::debug!(
			route = %definition.key(),
			template = %definition.template(),
			deep_links = definition.deep_links().len(),
			"registered route"
		);
		self.by_key
			.insert(definition.key().to_string(), self.routes.len());
		self.routes.push(definition);
		Ok(())
	}

	/// Looks up a definition by key.
	pub fn get(&self, key: &str) -> Option<&RouteDefinition> {
		self.by_key.get(key).map(|&index| &self.routes[index])
	}

	/// Whether a route with this key exists.
	pub fn contains(&self, key: &str) -> bool {
		self.by_key.contains_key(key)
	}

	/// Number of registered routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Whether no route is registered.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Definitions in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &RouteDefinition> {
		self.routes.iter()
	}

	/// Matches an application path such as `detail-screen/Alice`.
	///
	/// A captured value that does not parse as its optional parameter's
	/// type rules the route out, so later routes are still tried.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
		let input = PathInput::from_path(path);
		let matched = self.routes.iter().find_map(|definition| {
			definition
				.capture_path(&input)
				.map(|params| RouteMatch { definition, params })
		});
		tracing::trace!(path, matched = ?matched.as_ref().map(|m| m.definition.key()), "matched path");
		matched
	}

	/// Matches an external URI against the routes' deep-link patterns.
	///
	/// Routes are tried in registration order and each route's patterns in
	/// declaration order. A string that does not parse as a URI matches
	/// nothing, and neither does a pattern whose captured value does not
	/// parse as its optional parameter's type.
	pub fn match_external_uri(&self, uri: &str) -> Option<RouteMatch<'_>> {
		let parsed = match Url::parse(uri) {
			Ok(parsed) => parsed,
			Err(err) => {
				tracing::trace!(uri, error = %err, "deep link is not a valid URI");
				return None;
			}
		};

		let matched = self.routes.iter().find_map(|definition| {
			definition.deep_links().iter().find_map(|pattern| {
				pattern
					.capture(&parsed, |name| definition.can_omit(name))
					.filter(|params| definition.accepts(params))
					.map(|params| RouteMatch { definition, params })
			})
		});
		tracing::trace!(uri, matched = ?matched.as_ref().map(|m| m.definition.key()), "matched deep link");
		matched
	}

	/// Resolves raw values against a definition.
	///
	/// # Errors
	///
	/// See [`RouteDefinition::resolve`].
	pub fn resolve(
		&self,
		definition: &RouteDefinition,
		raw: &RawParams,
	) -> Result<ResolvedRoute, ResolveError> {
		definition.resolve(raw)
	}

	/// Builds a concrete path for a route, e.g. `detail-screen/Alice`.
	///
	/// # Errors
	///
	/// Returns [`ReverseError::UnknownRoute`] for an unregistered key and
	/// [`ReverseError::MissingParameter`] when a slot that cannot be omitted
	/// has no value.
	pub fn reverse(&self, key: &str, args: &RawParams) -> Result<String, ReverseError> {
		let definition = self
			.get(key)
			.ok_or_else(|| ReverseError::UnknownRoute(key.to_string()))?;
		definition
			.reverse(args)
			.map_err(|param| ReverseError::MissingParameter {
				route: key.to_string(),
				param,
			})
	}
}
