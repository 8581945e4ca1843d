use std::collections::HashMap;

use essentials::debug;

use crate::{error::Result, provider::Declaration, utils::encoding::decode};

use super::definition::RouteDefinition;

/// Parsed routes grouped by their decoded base path.
/// Within a group routes keep declaration order, which is also their match priority.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    groups: HashMap<String, Vec<RouteDefinition>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every declaration in order. The first malformed one aborts the whole table.
    pub fn from_declarations<I>(declarations: I) -> Result<Self>
    where
        I: IntoIterator<Item = Declaration>,
    {
        declarations
            .into_iter()
            .map(|declaration| {
                RouteDefinition::new(
                    &declaration.path,
                    &declaration.methods,
                    declaration.handler,
                )
            })
            .collect()
    }

    pub fn push(&mut self, route: RouteDefinition) {
        debug!(
            base_path = route.base_path.as_str(),
            handler = route.handler.as_str(),
            slots = route.slots.len(),
            "Registered route"
        );
        self.groups
            .entry(decode(&route.base_path).into_owned())
            .or_default()
            .push(route);
    }

    /// Routes sharing the given decoded base path.
    pub fn group(&self, base_path: &str) -> Option<&[RouteDefinition]> {
        self.groups.get(base_path).map(Vec::as_slice)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[RouteDefinition])> {
        self.groups
            .iter()
            .map(|(base_path, routes)| (base_path.as_str(), routes.as_slice()))
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.groups.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<RouteDefinition> for RouteTable {
    fn from_iter<T: IntoIterator<Item = RouteDefinition>>(routes: T) -> Self {
        let mut table = Self::new();
        for route in routes {
            table.push(route);
        }
        table
    }
}

impl Extend<RouteDefinition> for RouteTable {
    fn extend<T: IntoIterator<Item = RouteDefinition>>(&mut self, routes: T) {
        for route in routes {
            self.push(route);
        }
    }
}
