//! Settings for Waypoint applications.
//!
//! Route tables and navigator options live in a TOML document. [`Settings`]
//! parses it, applies `WAYPOINT_*` environment overrides and builds the
//! [`RouteRegistry`](waypoint_routes::RouteRegistry) and a started
//! [`Navigator`](waypoint_navigator::Navigator) from it.
//!
//! ```
//! use waypoint_conf::Settings;
//!
//! let settings = Settings::from_toml_str(r#"
//!     start_route = "main-screen"
//!
//!     [[routes]]
//!     key = "main-screen"
//!     path = "main-screen"
//!
//!     [[routes]]
//!     key = "detail-screen-deeplink"
//!     path = "detail-screen-deeplink"
//!     deep_links = ["https://example.com/{id}"]
//!
//!     [routes.params.id]
//!     type = "int"
//!     default = -1
//! "#).unwrap();
//!
//! let mut navigator = settings.start_navigator().unwrap();
//! navigator.navigate_uri("https://example.com/").unwrap();
//! assert_eq!(navigator.current().arg::<i32>("id"), Some(-1));
//! ```

pub mod env;
pub mod error;
pub mod settings;

pub use env::{ENV_PREFIX, Env};
pub use error::{Result, SettingsError};
pub use settings::{
	DEFAULT_LOG_FILTER, DEFAULT_START_ROUTE, ParamSettings, RouteSettings, Settings,
};
