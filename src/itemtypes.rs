use std::collections::BTreeMap;

/// Host menu sections a taggable itemtype can live under.
///
/// Declaration order matches the host's menu order, and `Ord` follows
/// declaration order, so iterating a map keyed by `Category` walks the menu
/// top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Assets,
    Assistance,
    Management,
    Tools,
    Administration,
    Setup,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Assets,
        Category::Assistance,
        Category::Management,
        Category::Tools,
        Category::Administration,
        Category::Setup,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Assets => "Assets",
            Category::Assistance => "Assistance",
            Category::Management => "Management",
            Category::Tools => "Tools",
            Category::Administration => "Administration",
            Category::Setup => "Setup",
        }
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

/// The itemtypes that accept tags, grouped by menu section.
#[derive(Debug, Clone, Default)]
pub struct ItemtypeMap {
    map: BTreeMap<Category, Vec<String>>,
}

impl ItemtypeMap {
    /// The catalog the plugin ships with. Peer plugins and the config file
    /// can extend or prune it during init.
    pub fn builtin() -> Self {
        let mut map = ItemtypeMap::default();
        let seed: [(Category, &[&str]); 6] = [
            (
                Category::Assets,
                &[
                    "Computer",
                    "Monitor",
                    "Software",
                    "NetworkEquipment",
                    "Peripheral",
                    "Printer",
                    "CartridgeItem",
                    "ConsumableItem",
                    "Phone",
                ],
            ),
            (
                Category::Assistance,
                &[
                    "Ticket",
                    "Problem",
                    "Change",
                    "TicketRecurrent",
                    "TicketTemplate",
                ],
            ),
            (
                Category::Management,
                &["Budget", "Supplier", "Contact", "Contract", "Document"],
            ),
            (
                Category::Tools,
                &["Project", "Reminder", "RSSFeed", "KnowbaseItem"],
            ),
            (
                Category::Administration,
                &["User", "Group", "Entity", "Profile"],
            ),
            (Category::Setup, &["SLA", "SlaLevel", "Link"]),
        ];
        for (category, itemtypes) in seed {
            for itemtype in itemtypes {
                map.append(category, itemtype);
            }
        }
        map
    }

    /// Adds an itemtype to a section, keeping the list duplicate-free.
    pub fn append(&mut self, category: Category, itemtype: &str) {
        let list = self.map.entry(category).or_default();
        if !list.iter().any(|t| t == itemtype) {
            list.push(itemtype.to_string());
        }
    }

    /// Drops an itemtype from every section it appears in.
    pub fn remove(&mut self, itemtype: &str) {
        for list in self.map.values_mut() {
            list.retain(|t| t != itemtype);
        }
    }

    pub fn can_tag(&self, itemtype: &str) -> bool {
        self.map.values().any(|list| list.iter().any(|t| t == itemtype))
    }

    /// Sections and their itemtypes, in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.map.iter().map(|(c, list)| (*c, list.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
