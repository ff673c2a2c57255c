use serde::Serialize;

use super::layout::{Layout, Options, Props};

/// A presentation command issued to the host.
///
/// Commands are fire-and-forget: the controller updates its own history
/// before issuing them and never waits for the host to finish.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HostCommand {
    SetRoot { root: Layout },
    Push { from_id: String, layout: Layout },
    Pop { from_id: String },
    PopTo { to_id: String },
    PopToRoot { from_id: String },
    ShowModal { layout: Layout },
    DismissModal { id: String },
    DismissAllModals,
    ShowOverlay { layout: Layout },
    DismissOverlay { id: String },
    MergeOptions { id: String, options: Options },
    UpdateProps { id: String, props: Props },
    SetDefaultOptions { options: Options },
}

impl HostCommand {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::SetRoot { .. } => "setRoot",
            HostCommand::Push { .. } => "push",
            HostCommand::Pop { .. } => "pop",
            HostCommand::PopTo { .. } => "popTo",
            HostCommand::PopToRoot { .. } => "popToRoot",
            HostCommand::ShowModal { .. } => "showModal",
            HostCommand::DismissModal { .. } => "dismissModal",
            HostCommand::DismissAllModals => "dismissAllModals",
            HostCommand::ShowOverlay { .. } => "showOverlay",
            HostCommand::DismissOverlay { .. } => "dismissOverlay",
            HostCommand::MergeOptions { .. } => "mergeOptions",
            HostCommand::UpdateProps { .. } => "updateProps",
            HostCommand::SetDefaultOptions { .. } => "setDefaultOptions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_is_tagged_with_camel_case_fields() {
        let cmd = HostCommand::Push {
            from_id: "main/A".into(),
            layout: Layout::component("main/B", "B", Props::new(), Options::new()),
        };
        assert_eq!(
            serde_json::to_value(&cmd).unwrap(),
            json!({
                "command": "push",
                "fromId": "main/A",
                "layout": {"component": {"id": "main/B", "name": "B"}}
            })
        );
    }

    #[test]
    fn test_unit_command_serializes_tag_only() {
        let value = serde_json::to_value(HostCommand::DismissAllModals).unwrap();
        assert_eq!(value, json!({"command": "dismissAllModals"}));
        assert_eq!(HostCommand::DismissAllModals.name(), "dismissAllModals");
    }
}
