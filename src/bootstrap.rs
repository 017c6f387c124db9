use crate::config::Config;
use crate::hooks::{Callback, Hook, HookBinding, HookRegistry};
use crate::host::HostContext;
use crate::itemtypes::{Category, ItemtypeMap};
use crate::manifest::PLUGIN_KEY;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Everything the plugin asks the host to wire up, produced by a single
/// `init` call and handed over by value.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub plugin: String,
    pub hooks: HookRegistry,
    /// None while the plugin is installed but not activated.
    pub itemtype_map: Option<ItemtypeMap>,
    /// Dropdowns that need a host-side widget: the tag dropdown wants the
    /// colorpicker.
    pub dropdown_widgets: BTreeMap<String, Vec<String>>,
}

impl Registration {
    fn new(plugin: &str) -> Self {
        Registration {
            plugin: plugin.to_string(),
            ..Default::default()
        }
    }

    /// The full bundle in the plain form the host consumes.
    pub fn to_host_map(&self) -> Value {
        let mut config = Map::new();
        if let Some(map) = &self.itemtype_map {
            let mut sections = Map::new();
            for (category, itemtypes) in map.iter() {
                sections.insert(category.as_str().to_string(), json!(itemtypes));
            }
            config.insert("plugin_tag_itemtypes".to_string(), Value::Object(sections));
        }
        if !self.dropdown_widgets.is_empty() {
            config.insert("dropdown_widgets".to_string(), json!(self.dropdown_widgets));
        }
        json!({
            "plugin": self.plugin,
            "hooks": self.hooks.to_host_map(),
            "config": config,
        })
    }
}

/// Builds the registration bundle. The csrf flag is declared even while the
/// plugin is inactive; everything else waits for activation.
pub fn init(host: &HostContext, config: &Config) -> Registration {
    let mut reg = Registration::new(PLUGIN_KEY);
    reg.hooks.add(Hook::CsrfCompliant, HookBinding::Enabled);

    if !host.plugin_active(PLUGIN_KEY) {
        tracing::debug!("plugin '{PLUGIN_KEY}' not active, declaring the csrf flag only");
        return reg;
    }

    let itemtype_map = build_itemtype_map(host, config);
    tracing::debug!("{} itemtypes accept tags", itemtype_map.len());

    // Link on the plugin name under the host's plugin configuration screen.
    reg.hooks
        .add(Hook::ConfigPage, HookBinding::Page("front/tag.php".to_string()));

    reg.dropdown_widgets
        .insert("Tag".to_string(), vec!["colorpicker".to_string()]);

    reg.hooks.add(Hook::UseMassiveAction, HookBinding::Enabled);

    // After the uninstall peer wipes an item, its tags go too.
    if host.plugin_active("uninstall") {
        for itemtype in &host.uninstall_types {
            reg.hooks.add(
                Hook::UninstallAfter,
                HookBinding::ItemHandler {
                    itemtype: itemtype.clone(),
                    callback: Callback::function("tag_uninstall_after"),
                },
            );
        }
    }

    // Tag dropdown goes into every taggable form.
    reg.hooks.add(
        Hook::PreItemForm,
        HookBinding::Handler(Callback::method("Tag", "pre_item_form")),
    );

    reg.hooks.add(
        Hook::DatainjectionPopulate,
        HookBinding::Handler(Callback::function("tag_datainjection_populate")),
    );

    reg.hooks
        .add(Hook::AddJavascript, HookBinding::Asset("js/common.js".to_string()));
    reg.hooks
        .add(Hook::AddCss, HookBinding::Asset("css/tag.css".to_string()));
    if host.multi_entity_session {
        reg.hooks
            .add(Hook::AddJavascript, HookBinding::Asset("js/entity.js".to_string()));
    }

    // Lifecycle hooks only bind for the itemtype the current request is
    // rendering, and only when that itemtype accepts tags.
    if let Some(itemtype) = &host.current_itemtype
        && itemtype_map.can_tag(itemtype)
    {
        tracing::debug!("binding item lifecycle hooks for {itemtype}");
        for (hook, method) in [
            (Hook::ItemAdd, "update_item"),
            (Hook::PreItemUpdate, "update_item"),
            (Hook::PreItemPurge, "purge_item"),
        ] {
            reg.hooks.add(
                hook,
                HookBinding::ItemHandler {
                    itemtype: itemtype.clone(),
                    callback: Callback::method("TagItem", method),
                },
            );
        }
    }

    reg.itemtype_map = Some(itemtype_map);
    reg
}

fn build_itemtype_map(host: &HostContext, config: &Config) -> ItemtypeMap {
    let mut map = ItemtypeMap::builtin();

    if host.plugin_active("appliances") {
        map.append(Category::Assets, "Appliance");
    }

    for (label, itemtypes) in &config.extra_itemtypes {
        match Category::from_label(label) {
            Some(category) => {
                for itemtype in itemtypes {
                    map.append(category, itemtype);
                }
            }
            None => tracing::warn!("skipping extra itemtypes for unknown section {label:?}"),
        }
    }

    for itemtype in &config.excluded_itemtypes {
        map.remove(itemtype);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_plugin_only_declares_the_csrf_flag() {
        let host = HostContext::new("9.4.6");
        let reg = init(&host, &Config::default());

        assert!(reg.hooks.contains(Hook::CsrfCompliant));
        assert_eq!(reg.hooks.len(), 1);
        assert!(reg.itemtype_map.is_none());
        assert!(reg.dropdown_widgets.is_empty());
    }

    #[test]
    fn plain_activation_skips_the_conditional_bindings() {
        let mut host = HostContext::new("9.4.6");
        host.activate(PLUGIN_KEY);
        let reg = init(&host, &Config::default());

        assert!(reg.hooks.contains(Hook::ConfigPage));
        assert!(reg.hooks.contains(Hook::UseMassiveAction));
        assert!(!reg.hooks.contains(Hook::UninstallAfter));
        assert!(!reg.hooks.contains(Hook::ItemAdd));
        assert_eq!(
            reg.hooks.bindings(Hook::AddJavascript),
            [HookBinding::Asset("js/common.js".to_string())]
        );

        let map = reg.itemtype_map.expect("catalog is published on activation");
        assert_eq!(map.len(), 30);
        assert!(!map.can_tag("Appliance"));
    }

    #[test]
    fn excluded_current_itemtype_gets_no_lifecycle_hooks() {
        let mut host = HostContext::new("9.4.6");
        host.activate(PLUGIN_KEY);
        host.current_itemtype = Some("Ticket".to_string());

        let mut config = Config::default();
        config.excluded_itemtypes.push("Ticket".to_string());

        let reg = init(&host, &config);
        assert!(!reg.hooks.contains(Hook::ItemAdd));
        assert!(!reg.hooks.contains(Hook::PreItemUpdate));
        assert!(!reg.hooks.contains(Hook::PreItemPurge));
    }
}
