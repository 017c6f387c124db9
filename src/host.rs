use std::collections::HashSet;

/// Snapshot of the host-application state the bootstrap consults.
///
/// The host fills this in before calling into the plugin; nothing here is
/// read from globals. `version` is the raw host version string and may carry
/// a release suffix like `"9.4.3-dev"`.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    pub version: String,
    /// Recent hosts gate plugin versions themselves from the declared
    /// requirements; when set, the plugin skips its own bounds check.
    pub handles_version_check: bool,
    /// Keys of plugins the host reports as installed and activated,
    /// including this one.
    pub active_plugins: HashSet<String>,
    /// Whether the current session spans multiple entities.
    pub multi_entity_session: bool,
    /// Itemtype of the record the current request is rendering, if any.
    pub current_itemtype: Option<String>,
    /// Itemtypes the `uninstall` peer plugin manages, supplied by the host.
    pub uninstall_types: Vec<String>,
}

impl HostContext {
    pub fn new(version: &str) -> Self {
        HostContext {
            version: version.to_string(),
            ..Default::default()
        }
    }

    pub fn plugin_active(&self, key: &str) -> bool {
        self.active_plugins.contains(key)
    }

    pub fn activate(&mut self, key: &str) {
        self.active_plugins.insert(key.to_string());
    }
}
