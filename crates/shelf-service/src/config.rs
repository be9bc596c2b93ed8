//! Engine configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a full update does when its key resolves to no product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    /// Fail with NotFound.
    #[default]
    Strict,
    /// Insert the payload as a new product.
    Upsert,
}

impl FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(UpdatePolicy::Strict),
            "upsert" => Ok(UpdatePolicy::Upsert),
            other => Err(format!("unknown update policy '{other}', expected strict or upsert")),
        }
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdatePolicy::Strict => f.write_str("strict"),
            UpdatePolicy::Upsert => f.write_str("upsert"),
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Default: Strict
    pub update_policy: UpdatePolicy,
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }
}
