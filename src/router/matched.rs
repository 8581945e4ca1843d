use http::Method;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::utils::encoding::encode_segment;

use super::definition::RouteDefinition;

/// Result of a successful routing call.
#[derive(Debug, Clone)]
pub struct MatchedRoute<'a> {
    route: &'a RouteDefinition,
    method: Option<Method>,
    values: Vec<String>,
}

impl<'a> MatchedRoute<'a> {
    /// `values` holds one decoded segment per slot of `route`.
    pub(crate) fn new(
        route: &'a RouteDefinition,
        method: Option<Method>,
        values: Vec<String>,
    ) -> Self {
        Self {
            route,
            method,
            values,
        }
    }

    pub fn definition(&self) -> &'a RouteDefinition {
        self.route
    }

    pub fn handler(&self) -> &'a str {
        &self.route.handler
    }

    /// Method the route was matched with, `None` when any method was accepted.
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    /// Named parameters and their values in template order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.route
            .slots
            .iter()
            .zip(&self.values)
            .filter_map(|(slot, value)| slot.name().map(|name| (name, value.as_str())))
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| value)
    }

    /// Normalized path of this route with the matched values, independent of
    /// how the request spelled it.
    pub fn canonical_path(&self) -> String {
        let mut path = self.route.base_path.clone();
        let segments = self
            .values
            .iter()
            .map(|value| encode_segment(value))
            .collect::<Vec<_>>();
        path.push_str(&segments.join("/"));
        if path.len() > 1 {
            if self.route.has_trailing_slash {
                if !path.ends_with('/') {
                    path.push('/');
                }
            } else if segments.is_empty() {
                path.pop();
            }
        }
        path
    }
}

struct Params<'r, 'a>(&'r MatchedRoute<'a>);

impl Serialize for Params<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self.0.params() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for MatchedRoute<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("handler", self.handler())?;
        map.serialize_entry("method", &self.method.as_ref().map(Method::as_str))?;
        map.serialize_entry("canonical_path", &self.canonical_path())?;
        map.serialize_entry("params", &Params(self))?;
        map.end()
    }
}
