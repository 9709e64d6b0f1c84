//! The settings document.
//!
//! ```toml
//! start_route = "main-screen"
//! back_policy = "reject"
//! log_filter = "info"
//!
//! [[routes]]
//! key = "detail-screen"
//! path = "detail-screen/:name"
//!
//! [routes.params.name]
//! type = "string"
//! default = "Test"
//! nullable = true
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use waypoint_navigator::{BackPolicy, Navigator, NavigatorBuilder, NavigatorConfig};
use waypoint_routes::{ParamSpec, ParamType, ParamValue, RouteDefinition, RouteRegistry};

use crate::env::Env;
use crate::error::{Result, SettingsError};

/// Route key the navigator starts on when none is configured.
pub const DEFAULT_START_ROUTE: &str = "main-screen";

/// Log filter used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

fn default_start_route() -> String {
	DEFAULT_START_ROUTE.to_string()
}

fn default_log_filter() -> String {
	DEFAULT_LOG_FILTER.to_string()
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
	/// Key of the root route.
	#[serde(default = "default_start_route")]
	pub start_route: String,
	/// Behaviour of back on the root entry.
	#[serde(default)]
	pub back_policy: BackPolicy,
	/// `tracing` filter directive for the demo binary.
	#[serde(default = "default_log_filter")]
	pub log_filter: String,
	/// Route table in registration order.
	#[serde(default)]
	pub routes: Vec<RouteSettings>,
}

/// One `[[routes]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteSettings {
	/// Unique route key.
	pub key: String,
	/// Path template.
	pub path: String,
	/// External URI patterns.
	#[serde(default)]
	pub deep_links: Vec<String>,
	/// Parameter declarations by name.
	#[serde(default)]
	pub params: IndexMap<String, ParamSettings>,
}

/// One `[routes.params.<name>]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamSettings {
	/// Declared type.
	#[serde(rename = "type")]
	pub ty: ParamType,
	/// Value used when the argument is absent.
	#[serde(default)]
	pub default: Option<toml::Value>,
	/// Whether the argument may be null.
	#[serde(default)]
	pub nullable: bool,
	/// Explicit requiredness. Derived from `default` and `nullable` when
	/// left out.
	#[serde(default)]
	pub required: Option<bool>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			start_route: default_start_route(),
			back_policy: BackPolicy::default(),
			log_filter: default_log_filter(),
			routes: Vec::new(),
		}
	}
}

impl Settings {
	/// Parses a TOML document.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Parse`] for malformed TOML, unknown keys or
	/// unknown parameter types.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Reads and parses a TOML file.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Io`] if the file cannot be read and
	/// [`SettingsError::Parse`] if it does not parse.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let settings = Self::from_toml_str(&source)?;
		tracing::debug!(path = %path.display(), routes = settings.routes.len(), "loaded settings");
		Ok(settings)
	}

	/// Applies `WAYPOINT_*` variables from the process environment.
	///
	/// # Errors
	///
	/// See [`Settings::with_overrides_from`].
	pub fn with_env_overrides(self) -> Result<Self> {
		self.with_overrides_from(&Env::new())
	}

	/// Applies overrides read through `env`.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::InvalidOverride`] when the back policy
	/// variable holds an unknown name.
	pub fn with_overrides_from(mut self, env: &Env) -> Result<Self> {
		if let Some(start_route) = env.str("START_ROUTE") {
			tracing::debug!(start_route = %start_route, "start route overridden from environment");
			self.start_route = start_route;
		}
		if let Some(policy) = env.str("BACK_POLICY") {
			self.back_policy = policy
				.parse()
				.map_err(|err: waypoint_navigator::ParseBackPolicyError| {
					SettingsError::InvalidOverride {
						variable: env.key_name("BACK_POLICY"),
						reason: err.to_string(),
					}
				})?;
		}
		if let Some(filter) = env.str("LOG") {
			self.log_filter = filter;
		}
		Ok(self)
	}

	/// Builds the route registry from `routes`, in order.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::InvalidDefault`] for a default that does not
	/// fit its type or contradicts `required`, and
	/// [`SettingsError::Registration`] for anything the registry rejects.
	pub fn build_registry(&self) -> Result<RouteRegistry> {
		let mut registry = RouteRegistry::new();
		for route in &self.routes {
			registry.register(route.definition()?)?;
		}
		Ok(registry)
	}

	/// Navigator configuration part of the settings.
	pub fn navigator_config(&self) -> NavigatorConfig {
		NavigatorConfig::new().with_back_policy(self.back_policy)
	}

	/// A builder over the configured registry, ready to start on
	/// `start_route`.
	///
	/// # Errors
	///
	/// Errors of [`Settings::build_registry`], and
	/// [`SettingsError::UnknownStartRoute`] when `start_route` is not in the
	/// table.
	pub fn navigator_builder(&self) -> Result<NavigatorBuilder> {
		let registry = self.build_registry()?;
		if !registry.contains(&self.start_route) {
			return Err(SettingsError::UnknownStartRoute(self.start_route.clone()));
		}
		Ok(NavigatorBuilder::new(registry).config(self.navigator_config()))
	}

	/// Builds everything and starts a navigator on `start_route`.
	///
	/// # Errors
	///
	/// Errors of [`Settings::navigator_builder`], and
	/// [`SettingsError::Start`] when the start route cannot be resolved
	/// without arguments.
	pub fn start_navigator(&self) -> Result<Navigator> {
		Ok(self.navigator_builder()?.start(&self.start_route)?)
	}
}

impl RouteSettings {
	/// Converts the entry into a route definition.
	///
	/// # Errors
	///
	/// See [`Settings::build_registry`].
	pub fn definition(&self) -> Result<RouteDefinition> {
		let mut builder = RouteDefinition::builder(&self.key, &self.path);
		for pattern in &self.deep_links {
			builder = builder.deep_link(pattern);
		}
		for (name, param) in &self.params {
			builder = builder.param(name, param.spec(&self.key, name)?);
		}
		Ok(builder.build()?)
	}
}

impl ParamSettings {
	/// Converts the table into a parameter declaration.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::InvalidDefault`] when the default does not
	/// fit the type, or when `required` contradicts `default`/`nullable`.
	pub fn spec(&self, route: &str, name: &str) -> Result<ParamSpec> {
		let mut spec = ParamSpec::new(self.ty);
		if let Some(default) = &self.default {
			spec = spec.default_value(convert_default(route, name, self.ty, default)?);
		}
		if self.nullable {
			spec = spec.nullable();
		}

		match self.required {
			Some(true) if !spec.is_required() => Err(SettingsError::InvalidDefault {
				route: route.to_string(),
				param: name.to_string(),
				reason: "a required parameter cannot have a default or be nullable".to_string(),
			}),
			Some(false) if spec.is_required() => Err(SettingsError::InvalidDefault {
				route: route.to_string(),
				param: name.to_string(),
				reason: "an optional parameter needs a default or must be nullable".to_string(),
			}),
			_ => Ok(spec),
		}
	}
}

fn convert_default(
	route: &str,
	param: &str,
	ty: ParamType,
	value: &toml::Value,
) -> Result<ParamValue> {
	let mismatch = || SettingsError::default_mismatch(route, param, ty, value.type_str());
	match (ty, value) {
		(ParamType::String, toml::Value::String(s)) => Ok(ParamValue::String(s.clone())),
		(ParamType::Int, toml::Value::Integer(i)) => i32::try_from(*i)
			.map(ParamValue::Int)
			.map_err(|_| SettingsError::InvalidDefault {
				route: route.to_string(),
				param: param.to_string(),
				reason: format!("{} does not fit in int", i),
			}),
		(ParamType::Long, toml::Value::Integer(i)) => Ok(ParamValue::Long(*i)),
		(ParamType::Float, toml::Value::Float(f)) => Ok(ParamValue::Float(*f)),
		(ParamType::Float, toml::Value::Integer(i)) => Ok(ParamValue::Float(*i as f64)),
		(ParamType::Bool, toml::Value::Boolean(b)) => Ok(ParamValue::Bool(*b)),
		_ => Err(mismatch()),
	}
}
