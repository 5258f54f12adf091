use std::fmt::{Display, Formatter, Result as FormatResult};

/// Views the dashboard can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Contacts,
    Map,
    Voice,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Overview, Tab::Contacts, Tab::Map, Tab::Voice, Tab::Settings];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Contacts => "contacts",
            Tab::Map => "map",
            Tab::Voice => "voice",
            Tab::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Contacts => "Emergency Contacts",
            Tab::Map => "Safe Locations",
            Tab::Voice => "Voice Settings",
            Tab::Settings => "Settings",
        }
    }

    pub fn from_id(id: &str) -> Option<Tab> {
        let id = id.trim();
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id().eq_ignore_ascii_case(id))
    }
}

impl Display for Tab {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.label())
    }
}
