pub mod definition;
pub mod matched;
pub mod methods;
#[allow(clippy::module_inception)]
pub mod router;
pub mod table;

pub use definition::{PathTemplate, RouteDefinition, Slot};
pub use matched::MatchedRoute;
pub use methods::{MethodDeclaration, Methods, KNOWN_METHODS};
pub use router::Router;
pub use table::RouteTable;
