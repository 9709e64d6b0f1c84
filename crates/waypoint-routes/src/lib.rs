//! Route registry for screen navigation.
//!
//! This crate provides the static half of the navigation model:
//!
//! - **Definitions**: named routes with a path template, typed parameters and
//!   optional deep-link patterns ([`RouteDefinition`])
//! - **Matching**: segment-by-segment path matching and external URI matching
//!   in registration order ([`RouteRegistry`])
//! - **Resolution**: typed coercion of raw argument strings with defaults and
//!   nullability ([`ResolvedRoute`])
//! - **Reverse building**: concrete paths from a key and arguments
//!
//! # Quick Start
//!
//! ```rust
//! use waypoint_routes::{ParamSpec, ParamType, ParamValue, RouteDefinition, RouteRegistry};
//!
//! let registry = RouteRegistry::from_definitions([
//!     RouteDefinition::builder("main-screen", "main-screen").build().unwrap(),
//!     RouteDefinition::builder("detail-screen-deeplink", "detail-screen-deeplink")
//!         .deep_link("https://example.com/{id}")
//!         .param("id", ParamSpec::new(ParamType::Int).default_value(-1))
//!         .build()
//!         .unwrap(),
//! ])
//! .unwrap();
//!
//! let matched = registry.match_external_uri("https://example.com/12666").unwrap();
//! let resolved = matched.resolve().unwrap();
//! assert_eq!(resolved.arguments().get("id"), Some(&ParamValue::Int(12666)));
//! ```

pub mod error;
pub mod params;
pub mod registry;
pub mod route;
pub mod template;
pub mod uri;

pub use error::{
	ArgumentError, DuplicateReason, RegistrationError, RegistrationResult, ResolveError,
	ReverseError,
};
pub use params::{FromArgument, ParamSpec, ParamType, ParamValue};
pub use registry::{RouteMatch, RouteRegistry};
pub use route::{ResolvedRoute, RouteArguments, RouteDefinition, RouteDefinitionBuilder};
pub use template::{PathTemplate, QueryBinding, RawParams, Segment};
pub use uri::UriPattern;
