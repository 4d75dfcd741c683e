//! Alignment strictness configuration.

use std::fs;
use std::path::Path;

use crate::{AlignError, AlignResult};

/// How loosely a system span may match a reference annotation.
///
/// Both switches default to `false`, which allows exact matches plus
/// containment of the system span in the reference extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Fall back to the head found by an auxiliary parse when exact and
    /// containment matching fail. Requires an auxiliary document.
    pub use_auxiliary_relaxation: bool,
    /// Require exact equality wherever a looser rule would accept
    /// containment: disables containment matching and, for the auxiliary
    /// head, enclosure matching.
    pub exact_head_only_for_auxiliary: bool,
}

impl MatchPolicy {
    /// Extent or head equality only.
    pub fn exact() -> Self {
        Self {
            use_auxiliary_relaxation: false,
            exact_head_only_for_auxiliary: true,
        }
    }

    /// Exact matches plus containment in the reference extent.
    pub fn contained() -> Self {
        Self::default()
    }

    /// Everything: containment and auxiliary-head enclosure.
    pub fn relaxed() -> Self {
        Self {
            use_auxiliary_relaxation: true,
            exact_head_only_for_auxiliary: false,
        }
    }

    /// Exact matches, or exact equality with the auxiliary head.
    pub fn auxiliary_exact() -> Self {
        Self {
            use_auxiliary_relaxation: true,
            exact_head_only_for_auxiliary: true,
        }
    }

    /// Parse a policy from TOML.
    ///
    /// The fields may sit at the top level or inside an `[alignment]` table.
    pub fn from_toml_str(s: &str) -> AlignResult<Self> {
        let mut table: toml::Table = s.parse().map_err(|e: toml::de::Error| AlignError::Config {
            message: e.to_string(),
        })?;
        let value = match table.remove("alignment") {
            Some(section) => section,
            None => toml::Value::Table(table),
        };
        value.try_into().map_err(|e: toml::de::Error| AlignError::Config {
            message: e.to_string(),
        })
    }

    /// Load a policy file.
    pub fn load(path: &Path) -> AlignResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| AlignError::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AlignError::Config { message } => AlignError::Config {
                message: format!("failed to parse {}: {}", path.display(), message),
            },
            other => other,
        })
    }
}
