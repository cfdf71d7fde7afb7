//! Global configuration settings shared across profiles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Default log level for the CLI (`silent`, `error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default)]
    pub log_level: Option<String>,
}
