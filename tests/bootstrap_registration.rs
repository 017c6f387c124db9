use etiquette::bootstrap;
use etiquette::config::Config;
use etiquette::hooks::{Hook, HookBinding};
use etiquette::host::HostContext;
use serde_json::json;

#[test]
fn full_activation_builds_the_complete_bundle() {
    // 1. Host with the plugin active alongside both peer plugins
    let mut host = HostContext::new("9.4.6");
    host.activate("tag");
    host.activate("appliances");
    host.activate("uninstall");
    host.multi_entity_session = true;
    host.current_itemtype = Some("Ticket".to_string());
    host.uninstall_types = vec!["Computer".to_string(), "Printer".to_string()];

    // 2. Admin config adds one itemtype and hides another
    let mut config = Config::default();
    config
        .extra_itemtypes
        .insert("Management".to_string(), vec!["Certificate".to_string()]);
    config.excluded_itemtypes.push("Reminder".to_string());

    // 3. Init
    let reg = bootstrap::init(&host, &config);

    // 4. Catalog: built-ins plus Appliance plus Certificate minus Reminder
    let map = reg.itemtype_map.as_ref().expect("catalog published");
    assert_eq!(map.len(), 31);
    assert!(map.can_tag("Appliance"));
    assert!(map.can_tag("Certificate"));
    assert!(!map.can_tag("Reminder"));

    // 5. Hook registry: every conditional binding present
    assert!(reg.hooks.contains(Hook::CsrfCompliant));
    assert_eq!(reg.hooks.bindings(Hook::UninstallAfter).len(), 2);
    assert_eq!(
        reg.hooks.bindings(Hook::AddJavascript),
        [
            HookBinding::Asset("js/common.js".to_string()),
            HookBinding::Asset("js/entity.js".to_string()),
        ]
    );
    assert_eq!(reg.hooks.bindings(Hook::ItemAdd).len(), 1);
    assert_eq!(reg.hooks.bindings(Hook::PreItemPurge).len(), 1);

    // 6. Host-facing bundle shape
    let bundle = reg.to_host_map();
    assert_eq!(bundle["plugin"], "tag");
    assert_eq!(bundle["hooks"]["csrf_compliant"], json!(true));
    assert_eq!(bundle["hooks"]["config_page"], json!("front/tag.php"));
    assert_eq!(bundle["hooks"]["use_massive_action"], json!(true));
    assert_eq!(
        bundle["hooks"]["pre_item_form"],
        json!(["Tag", "pre_item_form"])
    );
    assert_eq!(
        bundle["hooks"]["item_add"],
        json!({ "Ticket": ["TagItem", "update_item"] })
    );
    assert_eq!(
        bundle["hooks"]["pre_item_update"],
        json!({ "Ticket": ["TagItem", "update_item"] })
    );
    assert_eq!(
        bundle["hooks"]["pre_item_purge"],
        json!({ "Ticket": ["TagItem", "purge_item"] })
    );
    assert_eq!(
        bundle["hooks"]["plugin_uninstall_after"],
        json!({ "Computer": "tag_uninstall_after", "Printer": "tag_uninstall_after" })
    );
    assert_eq!(
        bundle["hooks"]["plugin_datainjection_populate"],
        json!("tag_datainjection_populate")
    );
    assert_eq!(
        bundle["hooks"]["add_javascript"],
        json!(["js/common.js", "js/entity.js"])
    );
    assert_eq!(bundle["hooks"]["add_css"], json!(["css/tag.css"]));

    let sections = &bundle["config"]["plugin_tag_itemtypes"];
    assert_eq!(sections["Assets"].as_array().map(Vec::len), Some(10));
    assert_eq!(sections["Management"].as_array().map(Vec::len), Some(6));
    assert_eq!(sections["Tools"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        bundle["config"]["dropdown_widgets"]["Tag"],
        json!(["colorpicker"])
    );
}
