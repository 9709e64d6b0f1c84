//! # Waypoint
//!
//! Route-based screen navigation with typed arguments, a back stack and
//! deep links.
//!
//! An application declares its screens once as named routes. Each route has
//! a path template such as `detail-screen/:name`, typed parameters with
//! defaults and nullability, and optionally external URI patterns such as
//! `https://example.com/{id}`. A navigator then keeps the stack of visited
//! screens, each entry carrying its resolved arguments, and reports every
//! change to its listeners.
//!
//! ## Feature Flags
//!
//! - `minimal` - route registry only (the `routes` feature)
//! - `navigator` - back-stack navigator and listeners
//! - `conf` - TOML route tables and `WAYPOINT_*` environment overrides
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```rust
//! use waypoint::prelude::*;
//!
//! let registry = RouteRegistry::from_definitions([
//!     RouteDefinition::builder("main-screen", "main-screen").build()?,
//!     RouteDefinition::builder("detail-screen", "detail-screen/:name")
//!         .param("name", ParamSpec::new(ParamType::String).default_value("Test").nullable())
//!         .build()?,
//!     RouteDefinition::builder("detail-screen-deeplink", "detail-screen-deeplink")
//!         .deep_link("https://example.com/{id}")
//!         .param("id", ParamSpec::new(ParamType::Int).default_value(-1))
//!         .build()?,
//! ])?;
//!
//! let mut navigator = NavigatorBuilder::new(registry).start("main-screen")?;
//!
//! navigator.navigate("detail-screen", &RawParams::from([("name".into(), "Alice".into())]))?;
//! assert_eq!(navigator.current().arg::<String>("name").as_deref(), Some("Alice"));
//!
//! navigator.navigate_uri("https://example.com/12666")?;
//! assert_eq!(navigator.current().arg::<i32>("id"), Some(12666));
//!
//! navigator.go_back()?;
//! assert_eq!(navigator.current().key(), "detail-screen");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[cfg(feature = "routes")]
pub use waypoint_routes as routes;

#[cfg(feature = "navigator")]
pub use waypoint_navigator as navigator;

#[cfg(feature = "conf")]
pub use waypoint_conf as conf;

// Re-export route types
#[cfg(feature = "routes")]
pub use waypoint_routes::{
	ArgumentError, FromArgument, ParamSpec, ParamType, ParamValue, RawParams, RegistrationError,
	ResolveError, ResolvedRoute, ReverseError, RouteArguments, RouteDefinition, RouteMatch,
	RouteRegistry, UriPattern,
};

// Re-export navigator types
#[cfg(feature = "navigator")]
pub use waypoint_navigator::{
	BackPolicy, BackStackEntry, NavOptions, NavigationAction, NavigationError, NavigationEvent,
	NavigationListener, NavigationSignal, Navigator, NavigatorBuilder, NavigatorConfig,
	SharedNavigator,
};

// Re-export settings types
#[cfg(feature = "conf")]
pub use waypoint_conf::{Settings, SettingsError};

pub mod prelude {
	// Routes feature
	#[cfg(feature = "routes")]
	pub use crate::{
		FromArgument, ParamSpec, ParamType, ParamValue, RawParams, ResolvedRoute, RouteArguments,
		RouteDefinition, RouteRegistry,
	};

	// Navigator feature
	#[cfg(feature = "navigator")]
	pub use crate::{
		BackPolicy, BackStackEntry, NavOptions, NavigationAction, NavigationError,
		NavigationEvent, Navigator, NavigatorBuilder, SharedNavigator,
	};

	// Settings feature
	#[cfg(feature = "conf")]
	pub use crate::Settings;
}
