use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Module configuration (the `entities` section of the server config).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntitiesConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "max_page_size")]
    pub max_page_size: u64,
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: max_page_size(),
        }
    }
}

impl From<&EntitiesConfig> for ServiceConfig {
    fn from(cfg: &EntitiesConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
        }
    }
}

fn default_page_size() -> u64 {
    20
}

fn max_page_size() -> u64 {
    2000
}
