//! Context menu entries attached to the extension's icon

use serde::{Deserialize, Serialize};

use crate::error::{ExtensionError, Result};

pub const USAGE_URL: &str = "https://github.com/lovasoa/dezoomify-extension/#dezoomify-extension";
pub const ISSUES_URL: &str = "https://github.com/lovasoa/dezoomify-extension/issues/new";
pub const SPONSOR_URL: &str = "https://github.com/sponsors/lovasoa";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuAction {
    UsageInstructions,
    OpenViewer,
    DeactivateAll,
    ReportProblem,
    Sponsor,
}

/// What clicking a menu entry does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEffect {
    /// Open a fixed page in a new, active tab
    OpenLink(&'static str),
    /// Open the current page in the viewer
    OpenPageInViewer,
    /// Stop listening on every tab
    StopAll,
}

impl MenuAction {
    /// Entries in the order they appear in the menu
    pub const ALL: [MenuAction; 5] = [
        MenuAction::UsageInstructions,
        MenuAction::OpenViewer,
        MenuAction::DeactivateAll,
        MenuAction::ReportProblem,
        MenuAction::Sponsor,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            MenuAction::UsageInstructions => "usage-instructions",
            MenuAction::OpenViewer => "open-viewer",
            MenuAction::DeactivateAll => "deactivate-all",
            MenuAction::ReportProblem => "report-problem",
            MenuAction::Sponsor => "sponsor",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MenuAction::UsageInstructions => "Usage instructions and information",
            MenuAction::OpenViewer => "Open the Dezoomify website",
            MenuAction::DeactivateAll => "Deactivate dezoomify on all tabs",
            MenuAction::ReportProblem => "Report a problem with this extension",
            MenuAction::Sponsor => "Support me, the developer !",
        }
    }

    pub fn effect(&self) -> MenuEffect {
        match self {
            MenuAction::UsageInstructions => MenuEffect::OpenLink(USAGE_URL),
            MenuAction::OpenViewer => MenuEffect::OpenPageInViewer,
            MenuAction::DeactivateAll => MenuEffect::StopAll,
            MenuAction::ReportProblem => MenuEffect::OpenLink(ISSUES_URL),
            MenuAction::Sponsor => MenuEffect::OpenLink(SPONSOR_URL),
        }
    }

    pub fn from_id(id: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.id() == id)
            .ok_or_else(|| ExtensionError::UnknownMenuItem(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_ids_round_trip() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_id(action.id()).unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_menu_id() {
        assert!(matches!(
            MenuAction::from_id("nope"),
            Err(ExtensionError::UnknownMenuItem(_))
        ));
    }

    #[test]
    fn test_link_entries() {
        assert_eq!(MenuAction::Sponsor.effect(), MenuEffect::OpenLink(SPONSOR_URL));
        assert_eq!(MenuAction::DeactivateAll.effect(), MenuEffect::StopAll);
    }
}
