//! Maps an HTTP method and uri path to a declared route handler.
//!
//! Routes are declared with path templates whose segments may be named
//! parameters, optionally restricted by a regular expression:
//! `/user/{id:\d+}/edit`. Templates are grouped by their literal prefix
//! once, then every request walks its own prefixes from the root down until
//! a group yields a route with the right number of segments, an accepted
//! method and matching parameter patterns.
//!
//! # Example usage
//!
//! ```
//! use router::RouterBuilder;
//!
//! let router = RouterBuilder::new()
//!     .add_route("GET", r"/user/{id:\d+}", "user.show")
//!     .add_route(["POST", "PUT"], r"/user/{id:\d+}/", "user.update")
//!     .build()
//!     .unwrap();
//!
//! let matched = router.route("HEAD", "/user/42?tab=info").unwrap();
//! assert_eq!(matched.handler(), "user.show");
//! assert_eq!(matched.param("id"), Some("42"));
//!
//! let matched = router.route("PUT", "/user//%34%32").unwrap();
//! assert_eq!(matched.canonical_path(), "/user/42/");
//!
//! assert!(router.route("GET", "/user/abc").is_none());
//! ```
pub mod error;
pub mod provider;
pub mod router;
pub(crate) mod utils;

pub use error::DefinitionError;
#[cfg(feature = "file")]
pub use provider::FileProvider;
pub use provider::{Declaration, RouteProvider, RouterBuilder};
pub use router::{MatchedRoute, MethodDeclaration, Methods, RouteDefinition, RouteTable, Router};
