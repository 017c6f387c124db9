use crate::config::Config;
use crate::host::HostContext;
use crate::version;
use anyhow::{Result, bail};
use serde::Serialize;
use serde_json::Value;

/// Key the host files this plugin under.
pub const PLUGIN_KEY: &str = "tag";
/// Name shown on the host's plugin screen.
pub const PLUGIN_NAME: &str = "Tag Management";
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Oldest host release the plugin supports (inclusive).
pub const MIN_HOST_VERSION: &str = "9.4";
/// First host release the plugin does not support (exclusive).
pub const MAX_HOST_VERSION: &str = "9.5";

/// Host version range the plugin declares. `dev` tells the host's own
/// checker that dev builds inside the range are acceptable.
#[derive(Debug, Clone, Serialize)]
pub struct HostRequirements {
    pub min: String,
    pub max: String,
    pub dev: bool,
}

/// The identity block the host's plugin screen displays.
#[derive(Debug, Clone, Serialize)]
pub struct PluginManifest {
    pub name: String,
    pub version: String,
    pub author: String,
    pub homepage: String,
    pub license: String,
    pub requirements: HostRequirements,
}

impl PluginManifest {
    pub fn current() -> Self {
        PluginManifest {
            name: PLUGIN_NAME.to_string(),
            version: PLUGIN_VERSION.to_string(),
            author: "Benoit Brummer (Trougnouf)".to_string(),
            homepage: "https://codeberg.org/trougnouf/etiquette".to_string(),
            license: "GPL-3.0".to_string(),
            requirements: HostRequirements {
                min: MIN_HOST_VERSION.to_string(),
                max: MAX_HOST_VERSION.to_string(),
                dev: true,
            },
        }
    }

    /// Plain key-value form for the host.
    pub fn to_host_map(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Pre-install gate. Hosts that gate plugin versions themselves from the
/// declared requirements pass straight through; older ones get the local
/// bounds check against the numeric prefix of their version string.
pub fn check_prerequisites(host: &HostContext) -> Result<()> {
    if host.handles_version_check {
        return Ok(());
    }
    if !version::within_bounds(&host.version, MIN_HOST_VERSION, MAX_HOST_VERSION) {
        bail!(
            "This plugin requires host version >= {MIN_HOST_VERSION} and < {MAX_HOST_VERSION} (found {})",
            host.version
        );
    }
    Ok(())
}

/// Config sanity check the host runs before activation.
pub fn check_config(config: &Config, verbose: bool) -> bool {
    match config.validate() {
        Ok(()) => true,
        Err(err) => {
            if verbose {
                tracing::warn!("plugin configuration rejected: {err}");
            }
            false
        }
    }
}
