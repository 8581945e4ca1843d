#[cfg(feature = "file")]
mod cache;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::router::{MethodDeclaration, RouteTable};

#[cfg(feature = "file")]
pub use file::FileProvider;
pub use memory::RouterBuilder;

/// Source of the routes a [crate::Router] is built from.
pub trait RouteProvider {
    /// Parsed routes grouped by base path, in declaration order.
    fn grouped_routes(&self) -> anyhow::Result<RouteTable>;
}

/// A route as declared by the user, before its path template is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDeclaration")]
pub struct Declaration {
    pub methods: MethodDeclaration,
    pub path: String,
    pub handler: String,
}

impl Declaration {
    pub fn new(
        methods: impl Into<MethodDeclaration>,
        path: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        Self {
            methods: methods.into(),
            path: path.into(),
            handler: handler.into(),
        }
    }
}

/// Declarations are accepted both as objects and as `[methods, path, handler]` triples.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDeclaration {
    Named {
        methods: MethodDeclaration,
        path: String,
        handler: String,
    },
    Positional(MethodDeclaration, String, String),
}

impl From<RawDeclaration> for Declaration {
    fn from(raw: RawDeclaration) -> Self {
        match raw {
            RawDeclaration::Named {
                methods,
                path,
                handler,
            }
            | RawDeclaration::Positional(methods, path, handler) => Self {
                methods,
                path,
                handler,
            },
        }
    }
}

impl RouteProvider for [Declaration] {
    fn grouped_routes(&self) -> anyhow::Result<RouteTable> {
        Ok(RouteTable::from_declarations(self.iter().cloned())?)
    }
}

impl RouteProvider for Vec<Declaration> {
    fn grouped_routes(&self) -> anyhow::Result<RouteTable> {
        self.as_slice().grouped_routes()
    }
}

impl RouteProvider for RouteTable {
    fn grouped_routes(&self) -> anyhow::Result<RouteTable> {
        Ok(self.clone())
    }
}
