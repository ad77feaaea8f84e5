use serde::{Deserialize, Serialize};

/// The locally authoritative zone.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// Domain suffix under local authority, without leading dot
    /// (e.g. `internal.example`).
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// TTL in seconds stamped on every locally synthesized answer.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            ttl: default_ttl(),
        }
    }
}

fn default_suffix() -> String {
    "lan".to_string()
}

fn default_ttl() -> u32 {
    300
}
