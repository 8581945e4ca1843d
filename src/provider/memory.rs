use crate::{
    error::Result,
    router::{MethodDeclaration, RouteTable, Router},
};

use super::{Declaration, RouteProvider};

/// Collects route declarations in memory.
#[derive(Debug, Default, Clone)]
pub struct RouterBuilder {
    routes: Vec<Declaration>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route(
        mut self,
        methods: impl Into<MethodDeclaration>,
        path: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        self.routes.push(Declaration::new(methods, path, handler));
        self
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.routes
    }

    pub fn build(self) -> Result<Router> {
        Ok(Router::new(RouteTable::from_declarations(self.routes)?))
    }
}

impl RouteProvider for RouterBuilder {
    fn grouped_routes(&self) -> anyhow::Result<RouteTable> {
        self.routes.grouped_routes()
    }
}

impl From<Vec<Declaration>> for RouterBuilder {
    fn from(routes: Vec<Declaration>) -> Self {
        Self { routes }
    }
}

impl FromIterator<Declaration> for RouterBuilder {
    fn from_iter<T: IntoIterator<Item = Declaration>>(iter: T) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}
