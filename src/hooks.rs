// File: src/hooks.rs
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fmt;

/// Hook points the host exposes to plugins. `as_str` yields the key the
/// host uses in its dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Hook {
    CsrfCompliant,
    ConfigPage,
    UseMassiveAction,
    AddJavascript,
    AddCss,
    PreItemForm,
    ItemAdd,
    PreItemUpdate,
    PreItemPurge,
    UninstallAfter,
    DatainjectionPopulate,
}

impl Hook {
    pub fn as_str(self) -> &'static str {
        match self {
            Hook::CsrfCompliant => "csrf_compliant",
            Hook::ConfigPage => "config_page",
            Hook::UseMassiveAction => "use_massive_action",
            Hook::AddJavascript => "add_javascript",
            Hook::AddCss => "add_css",
            Hook::PreItemForm => "pre_item_form",
            Hook::ItemAdd => "item_add",
            Hook::PreItemUpdate => "pre_item_update",
            Hook::PreItemPurge => "pre_item_purge",
            Hook::UninstallAfter => "plugin_uninstall_after",
            Hook::DatainjectionPopulate => "plugin_datainjection_populate",
        }
    }
}

/// Reference to a handler owned by the plugin's handler layer. The host only
/// ever sees the name; the callable itself lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Function(String),
    Method { receiver: String, method: String },
}

impl Callback {
    pub fn function(name: &str) -> Self {
        Callback::Function(name.to_string())
    }

    pub fn method(receiver: &str, method: &str) -> Self {
        Callback::Method {
            receiver: receiver.to_string(),
            method: method.to_string(),
        }
    }

    /// The host expects bare functions as strings and methods as
    /// `[receiver, method]` pairs.
    fn to_value(&self) -> Value {
        match self {
            Callback::Function(name) => Value::String(name.clone()),
            Callback::Method { receiver, method } => json!([receiver, method]),
        }
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Function(name) => write!(f, "{name}"),
            Callback::Method { receiver, method } => write!(f, "{receiver}::{method}"),
        }
    }
}

/// One registered binding under a hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookBinding {
    /// Boolean capability hooks (`csrf_compliant`, `use_massive_action`).
    Enabled,
    /// Host-relative page behind the plugin's configure button.
    Page(String),
    /// A js/css file the host should load, relative to the plugin directory.
    Asset(String),
    /// Plain handler call.
    Handler(Callback),
    /// Handler scoped to one itemtype's lifecycle.
    ItemHandler { itemtype: String, callback: Callback },
}

/// Hook bindings collected during init.
///
/// This replaces mutation of a host-global table: the registry is built once
/// by `bootstrap::init`, handed to the host by value, and per-hook order is
/// exactly registration order.
#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    entries: BTreeMap<Hook, Vec<HookBinding>>,
}

impl HookRegistry {
    pub fn add(&mut self, hook: Hook, binding: HookBinding) {
        self.entries.entry(hook).or_default().push(binding);
    }

    /// Bindings registered under `hook`, in registration order.
    pub fn bindings(&self, hook: Hook) -> &[HookBinding] {
        self.entries.get(&hook).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, hook: Hook) -> bool {
        !self.bindings(hook).is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Folds the registry into the plain structure the host consumes: flag
    /// hooks become booleans, asset hooks ordered path arrays, itemtype
    /// handlers a map of itemtype to callback, single handlers a bare
    /// callback value.
    pub fn to_host_map(&self) -> Value {
        let mut out = Map::new();
        for (hook, bindings) in &self.entries {
            out.insert(hook.as_str().to_string(), fold_bindings(bindings));
        }
        Value::Object(out)
    }
}

// Binding kinds never mix under one hook; Enabled and Page are only ever
// registered alone.
fn fold_bindings(bindings: &[HookBinding]) -> Value {
    let mut assets = Vec::new();
    let mut handlers = Vec::new();
    let mut items = Map::new();
    for binding in bindings {
        match binding {
            HookBinding::Enabled => return Value::Bool(true),
            HookBinding::Page(path) => return Value::String(path.clone()),
            HookBinding::Asset(path) => assets.push(Value::String(path.clone())),
            HookBinding::Handler(callback) => handlers.push(callback.to_value()),
            HookBinding::ItemHandler { itemtype, callback } => {
                items.insert(itemtype.clone(), callback.to_value());
            }
        }
    }
    if !assets.is_empty() {
        Value::Array(assets)
    } else if !items.is_empty() {
        Value::Object(items)
    } else {
        match handlers.len() {
            1 => handlers.remove(0),
            _ => Value::Array(handlers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_keep_registration_order() {
        let mut registry = HookRegistry::default();
        registry.add(Hook::AddJavascript, HookBinding::Asset("js/common.js".into()));
        registry.add(Hook::AddJavascript, HookBinding::Asset("js/entity.js".into()));

        let paths: Vec<_> = registry
            .bindings(Hook::AddJavascript)
            .iter()
            .map(|b| match b {
                HookBinding::Asset(p) => p.as_str(),
                other => panic!("unexpected binding {other:?}"),
            })
            .collect();
        assert_eq!(paths, ["js/common.js", "js/entity.js"]);

        let map = registry.to_host_map();
        assert_eq!(map["add_javascript"], json!(["js/common.js", "js/entity.js"]));
    }

    #[test]
    fn flags_and_pages_fold_to_scalars() {
        let mut registry = HookRegistry::default();
        registry.add(Hook::CsrfCompliant, HookBinding::Enabled);
        registry.add(Hook::ConfigPage, HookBinding::Page("front/tag.php".into()));

        let map = registry.to_host_map();
        assert_eq!(map["csrf_compliant"], json!(true));
        assert_eq!(map["config_page"], json!("front/tag.php"));
    }

    #[test]
    fn handlers_fold_by_shape() {
        let mut registry = HookRegistry::default();
        registry.add(
            Hook::PreItemForm,
            HookBinding::Handler(Callback::method("Tag", "pre_item_form")),
        );
        registry.add(
            Hook::ItemAdd,
            HookBinding::ItemHandler {
                itemtype: "Ticket".into(),
                callback: Callback::method("TagItem", "update_item"),
            },
        );
        registry.add(
            Hook::UninstallAfter,
            HookBinding::ItemHandler {
                itemtype: "Computer".into(),
                callback: Callback::function("tag_uninstall_after"),
            },
        );

        let map = registry.to_host_map();
        assert_eq!(map["pre_item_form"], json!(["Tag", "pre_item_form"]));
        assert_eq!(map["item_add"], json!({ "Ticket": ["TagItem", "update_item"] }));
        assert_eq!(
            map["plugin_uninstall_after"],
            json!({ "Computer": "tag_uninstall_after" })
        );
    }

    #[test]
    fn callbacks_print_like_their_host_names() {
        assert_eq!(Callback::function("tag_uninstall_after").to_string(), "tag_uninstall_after");
        assert_eq!(Callback::method("TagItem", "purge_item").to_string(), "TagItem::purge_item");
    }
}
