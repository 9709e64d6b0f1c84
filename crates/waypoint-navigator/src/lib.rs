//! Back-stack navigation over a [`waypoint_routes::RouteRegistry`].
//!
//! A [`Navigator`] keeps the stack of visited routes, each entry carrying
//! its resolved, typed arguments. It is entered by route key, by application
//! path or by an external deep-link URI, and reports every change to the
//! connected [`NavigationListener`]s.
//!
//! ```
//! use waypoint_navigator::{NavigationError, NavigatorBuilder};
//! use waypoint_routes::{ParamSpec, ParamType, RawParams, RouteDefinition, RouteRegistry};
//!
//! let registry = RouteRegistry::from_definitions([
//!     RouteDefinition::builder("main-screen", "main-screen").build().unwrap(),
//!     RouteDefinition::builder("detail-screen", "detail-screen/:name")
//!         .param("name", ParamSpec::new(ParamType::String).default_value("Test"))
//!         .build()
//!         .unwrap(),
//! ])
//! .unwrap();
//!
//! let mut navigator = NavigatorBuilder::new(registry).start("main-screen").unwrap();
//! navigator.navigate("detail-screen", &RawParams::new()).unwrap();
//! assert_eq!(navigator.current().arg::<String>("name").as_deref(), Some("Test"));
//!
//! navigator.go_back().unwrap();
//! assert_eq!(navigator.go_back(), Err(NavigationError::EmptyStack));
//! ```

pub mod error;
pub mod event;
pub mod navigator;
pub mod options;
pub mod shared;
pub mod signal;

pub use error::{NavigationError, Result};
pub use event::{BackStackEntry, NavigationAction, NavigationEvent};
pub use navigator::{Navigator, NavigatorBuilder};
pub use options::{BackPolicy, NavOptions, NavigatorConfig, ParseBackPolicyError, PopUpTo};
pub use shared::SharedNavigator;
pub use signal::{NavigationListener, NavigationSignal};
