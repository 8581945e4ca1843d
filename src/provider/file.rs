use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, Result};
use essentials::{debug, info, warn};

use crate::router::RouteTable;

use super::{cache::Cache, Declaration, RouteProvider};

/// Reads route declarations from a JSON file.
///
/// The file holds an array of declarations, each either an object
/// `{"methods": "GET", "path": "/user/{id:\\d+}", "handler": "user"}` or a
/// `["GET", "/user/{id:\\d+}", "user"]` triple. `methods` may be a single
/// token or a list; `*`, `ANY` or an empty string accept every method.
///
/// With a cache file configured the parsed routes are stored next to the
/// declarations and reused for as long as the cache is newer than the route file.
#[derive(Debug, Clone)]
pub struct FileProvider {
    route_file: PathBuf,
    cache_file: Option<PathBuf>,
}

impl FileProvider {
    pub fn new(route_file: impl Into<PathBuf>) -> Self {
        Self {
            route_file: route_file.into(),
            cache_file: None,
        }
    }

    /// Set the file used to cache parsed routes.
    /// No cache is used by default.
    pub fn with_cache(mut self, cache_file: impl Into<PathBuf>) -> Self {
        self.cache_file = Some(cache_file.into());
        self
    }

    pub fn route_file(&self) -> &Path {
        &self.route_file
    }

    pub fn cache_file(&self) -> Option<&Path> {
        self.cache_file.as_deref()
    }

    pub fn declarations(&self) -> Result<Vec<Declaration>> {
        let content = fs::read(&self.route_file).with_context(|| {
            format!("Failed to read route file {}", self.route_file.display())
        })?;
        serde_json::from_slice(&content).with_context(|| {
            format!("Failed to parse route file {}", self.route_file.display())
        })
    }

    fn parse(&self) -> Result<RouteTable> {
        let declarations = self.declarations()?;
        RouteTable::from_declarations(declarations).with_context(|| {
            format!("Invalid route in {}", self.route_file.display())
        })
    }

    fn is_fresh(&self, cache_file: &Path) -> Result<bool> {
        let modified = |path: &Path| -> Result<SystemTime> {
            Ok(fs::metadata(path)?.modified()?)
        };
        let routes = modified(&self.route_file).with_context(|| {
            format!("Failed to stat route file {}", self.route_file.display())
        })?;
        Ok(match modified(cache_file) {
            Ok(cache) => cache > routes,
            Err(_) => false,
        })
    }
}

impl RouteProvider for FileProvider {
    fn grouped_routes(&self) -> Result<RouteTable> {
        let Some(cache_file) = self.cache_file() else {
            return self.parse();
        };
        if self.is_fresh(cache_file)? {
            match Cache::load(cache_file) {
                Ok(table) => {
                    debug!(cache = %cache_file.display(), "Loaded routes from cache");
                    return Ok(table);
                }
                Err(error) => {
                    warn!(cache = %cache_file.display(), "Ignoring route cache: {error:?}")
                }
            }
        }
        let table = self.parse()?;
        match Cache::new(&table).save(cache_file) {
            Ok(()) => info!(
                cache = %cache_file.display(),
                routes = table.len(),
                "Route cache written"
            ),
            Err(error) => {
                warn!(cache = %cache_file.display(), "Could not write route cache: {error:?}")
            }
        }
        Ok(table)
    }
}
