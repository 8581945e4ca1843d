use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use http::Method;
use serde::{Deserialize, Serialize};

use crate::router::{RouteDefinition, RouteTable, Slot};

const VERSION: u32 = 1;

/// On-disk form of a parsed route table.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct Cache {
    version: u32,
    routes: Vec<CachedRoute>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedRoute {
    base_path: String,
    has_trailing_slash: bool,
    slots: Vec<CachedSlot>,
    methods: Vec<String>,
    handler: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum CachedSlot {
    Literal { value: String },
    Parameter { name: String, pattern: String },
}

impl From<&RouteDefinition> for CachedRoute {
    fn from(route: &RouteDefinition) -> Self {
        Self {
            base_path: route.base_path.clone(),
            has_trailing_slash: route.has_trailing_slash,
            slots: route
                .slots
                .iter()
                .map(|slot| match slot {
                    Slot::Literal { value, .. } => CachedSlot::Literal {
                        value: value.clone(),
                    },
                    Slot::Parameter { name, .. } => CachedSlot::Parameter {
                        name: name.clone(),
                        pattern: slot.source().to_string(),
                    },
                })
                .collect(),
            methods: route
                .methods
                .iter()
                .map(|method| method.as_str().to_string())
                .collect(),
            handler: route.handler.clone(),
        }
    }
}

impl TryFrom<CachedRoute> for RouteDefinition {
    type Error = anyhow::Error;

    fn try_from(route: CachedRoute) -> Result<Self> {
        let slots = route
            .slots
            .into_iter()
            .map(|slot| match slot {
                CachedSlot::Literal { value } => Ok(Slot::literal(&value)),
                CachedSlot::Parameter { name, pattern } => Slot::parameter(&name, &pattern)
                    .with_context(|| format!("Invalid cached pattern for '{name}'")),
            })
            .collect::<Result<Vec<_>>>()?;
        let methods = route
            .methods
            .iter()
            .map(|method| {
                Method::from_bytes(method.as_bytes())
                    .with_context(|| format!("Invalid cached method '{method}'"))
            })
            .collect::<Result<_>>()?;
        Ok(Self {
            base_path: route.base_path,
            has_trailing_slash: route.has_trailing_slash,
            slots,
            methods,
            handler: route.handler,
        })
    }
}

impl Cache {
    /// Routes are stored group by group, each group in declaration order.
    pub fn new(table: &RouteTable) -> Self {
        Self {
            version: VERSION,
            routes: table
                .groups()
                .flat_map(|(_, routes)| routes.iter().map(CachedRoute::from))
                .collect(),
        }
    }

    pub fn load(path: &Path) -> Result<RouteTable> {
        let content = fs::read(path).context("Failed to read route cache")?;
        let cache: Cache =
            serde_json::from_slice(&content).context("Failed to parse route cache")?;
        if cache.version != VERSION {
            return Err(anyhow!("Unsupported route cache version {}", cache.version));
        }
        cache
            .routes
            .into_iter()
            .map(RouteDefinition::try_from)
            .collect()
    }

    /// Writes through a temporary sibling file so readers never see a partial cache.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_vec(self)?;
        let temporary = path.with_extension("tmp");
        fs::write(&temporary, content).context("Failed to write route cache")?;
        fs::rename(&temporary, path).context("Failed to replace route cache")?;
        Ok(())
    }
}
