use essentials::debug;
use http::{Method, Uri};

use crate::{
    provider::RouteProvider,
    utils::encoding::{decode, segments},
};

use super::{definition::RouteDefinition, matched::MatchedRoute, table::RouteTable};

/// Resolves requests against an immutable [RouteTable].
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: RouteTable,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// Builds the table once from the provider's grouped routes.
    pub fn from_provider<P: RouteProvider + ?Sized>(provider: &P) -> anyhow::Result<Self> {
        Ok(Self::new(provider.grouped_routes()?))
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Routes the request to the first matching route.
    /// An empty `method` matches routes regardless of the methods they accept.
    pub fn route(&self, method: &str, uri: &str) -> Option<MatchedRoute<'_>> {
        let method = match method {
            "" => None,
            method => match Method::from_bytes(method.to_uppercase().as_bytes()) {
                Ok(method) => Some(method),
                Err(_) => {
                    debug!(method, "Invalid request method");
                    return None;
                }
            },
        };
        let Some(path) = request_path(uri) else {
            debug!(uri, "No path in request uri");
            return None;
        };
        self.matches(method.as_ref(), &path)
    }

    /// Walks the literal prefixes of `path` from the root down, trying the
    /// route group of each prefix against the segments that remain.
    pub fn matches(&self, method: Option<&Method>, path: &str) -> Option<MatchedRoute<'_>> {
        let decoded = decode(path);
        let segments = segments(&decoded).collect::<Vec<_>>();
        let mut base_path = String::from("/");
        for consumed in 0..=segments.len() {
            if consumed > 0 {
                base_path.push_str(segments[consumed - 1]);
                base_path.push('/');
            }
            let Some(routes) = self.table.group(&base_path) else {
                continue;
            };
            if let Some(matched) = match_group(routes, method, &segments[consumed..]) {
                debug!(
                    path,
                    base_path = base_path.as_str(),
                    handler = matched.handler(),
                    "Route matched"
                );
                return Some(matched);
            }
        }
        debug!(path, "No route matched");
        None
    }
}

impl From<RouteTable> for Router {
    fn from(table: RouteTable) -> Self {
        Self::new(table)
    }
}

fn match_group<'a>(
    routes: &'a [RouteDefinition],
    method: Option<&Method>,
    segments: &[&str],
) -> Option<MatchedRoute<'a>> {
    routes
        .iter()
        .find(|route| match_route(route, method, segments))
        .map(|route| {
            MatchedRoute::new(
                route,
                method.cloned(),
                segments.iter().map(|segment| segment.to_string()).collect(),
            )
        })
}

fn match_route(route: &RouteDefinition, method: Option<&Method>, segments: &[&str]) -> bool {
    if segments.len() != route.slots.len() {
        return false;
    }
    if method.is_some_and(|method| !route.methods.contains(method)) {
        return false;
    }
    route
        .slots
        .iter()
        .zip(segments)
        .all(|(slot, segment)| slot.is_match(segment))
}

/// Path component of an absolute or relative uri, still percent-encoded.
fn request_path(uri: &str) -> Option<String> {
    if uri.contains("://") {
        return uri.parse::<Uri>().ok().map(|uri| uri.path().to_string());
    }
    let end = uri.find(|c| c == '?' || c == '#').unwrap_or(uri.len());
    let path = &uri[..end];
    // `//host/path` starts with an authority, which is not part of the path.
    let path = match path.strip_prefix("//") {
        Some(rest) => rest.find('/').map_or("", |start| &rest[start..]),
        None => path,
    };
    Some(path.to_string())
}
