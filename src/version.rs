//! Version metadata reported by mesh control-plane components

use serde::{Deserialize, Serialize};
use std::fmt;

/// Build metadata reported by a single control-plane binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub version: String,
    pub git_revision: String,
    pub build_status: String,
    pub git_tag: String,
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.version, self.git_revision)
    }
}

/// Version of one control-plane component, as that component reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentVersion {
    pub component: String,
    #[serde(flatten)]
    pub info: BuildInfo,
}

/// Version report covering every reachable control-plane component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshInfo(pub Vec<ComponentVersion>);
