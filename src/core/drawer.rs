//! # Drawer Navigator
//!
//! A stack in the center plus a side panel that is always mounted but
//! only sometimes visible.
//!
//! ```text
//! ┌────────┬──────────────────┐
//! │ drawer │  center stack    │
//! │ (menu) │  [Inbox, ...]    │
//! └────────┴──────────────────┘
//! ```
//!
//! Open/close requests are sent to the host, but the `visible` flag only
//! changes when the host reports the drawer screen appeared or
//! disappeared. The host may ignore or delay a request; the flag tracks
//! what it actually did.

use log::{debug, info};
use serde_json::json;

use crate::core::error::NavigationError;
use crate::core::navigator::{self, Cx};
use crate::core::path;
use crate::core::stack;
use crate::core::tree::{DrawerState, Kind, NodeId, Tree};
use crate::host::HostCommand;
use crate::host::layout::{Layout, Options, Props, Side, SideMenuLayout};

/// True if `key` names the drawer content, by local key or full id.
pub fn is_content(state: &DrawerState, key: &str) -> bool {
    key == state.content.key || key == state.content.id
}

fn state(tree: &Tree, node: NodeId) -> Result<&DrawerState, NavigationError> {
    match &tree.node(node).kind {
        Kind::Drawer(state) => Ok(state),
        _ => Err(NavigationError::InvalidConfiguration(format!(
            "{}: not a drawer",
            tree.node(node).label()
        ))),
    }
}

pub fn is_visible(tree: &Tree, node: NodeId) -> bool {
    state(tree, node).is_ok_and(|state| state.visible)
}

pub fn mount(cx: &mut Cx, node: NodeId, props: &Props) -> Result<(), NavigationError> {
    let mut center = stack::initialize(cx, node, props)?;
    if let Layout::Stack(stack) = &mut center {
        stack.options.clear();
    }

    let n = cx.tree.node(node);
    let state = state(cx.tree, node)?;
    let content = Box::new(state.content.layout(&Props::new(), &Options::new()));
    let (left, right) = match state.side {
        Side::Left => (Some(content), None),
        Side::Right => (None, Some(content)),
    };
    let root = Layout::SideMenu(SideMenuLayout {
        left,
        right,
        center: Box::new(center),
        options: n.options.clone(),
    });

    if let Kind::Drawer(state) = &mut cx.tree.node_mut(node).kind {
        state.visible = false;
    }
    cx.execute(HostCommand::SetRoot { root });
    Ok(())
}

fn request_visibility(cx: &mut Cx, node: NodeId, visible: bool) -> Result<(), NavigationError> {
    let state = state(cx.tree, node)?;
    let id = state.content.id.clone();
    let mut options = Options::new();
    options.insert("sideMenu".into(), json!({ (state.side.key()): { "visible": visible } }));
    info!("Request drawer '{}' visible={}", cx.tree.node(node).label(), visible);
    cx.execute(HostCommand::MergeOptions { id, options });
    Ok(())
}

pub fn open(cx: &mut Cx, node: NodeId) -> Result<(), NavigationError> {
    request_visibility(cx, node, true)
}

pub fn close(cx: &mut Cx, node: NodeId) -> Result<(), NavigationError> {
    request_visibility(cx, node, false)
}

/// Requests the opposite of the last observed visibility.
pub fn toggle(cx: &mut Cx, node: NodeId) -> Result<(), NavigationError> {
    let visible = is_visible(cx.tree, node);
    request_visibility(cx, node, !visible)
}

/// Opens the drawer for its own content. Any other screen is pushed on
/// top of the stack's initial screen, closing the drawer first.
pub fn go(cx: &mut Cx, node: NodeId, to: &str, props: &Props) -> Result<(), NavigationError> {
    if is_content(state(cx.tree, node)?, to) {
        return open(cx, node);
    }
    let n = cx.tree.node(node);
    let key = path::child_key(&n.id, to).unwrap_or(to);
    stack::screen(cx.tree, node, key)?;
    let initial = n.initial.clone();
    let anchor = path::join(&n.id, &initial);

    if is_visible(cx.tree, node) {
        close(cx, node)?;
    }
    if cx.tree.node(node).history.len() > 1 {
        stack::pop_to_root(cx, node, Some(&anchor))?;
    }
    if key == initial {
        debug!("'{}' is the root of drawer '{}'", key, cx.tree.node(node).label());
        return Ok(());
    }
    stack::push(cx, node, key, props, Some(&anchor))
}

pub fn navigate(cx: &mut Cx, node: NodeId, path: &str, props: &Props) -> Result<(), NavigationError> {
    navigator::validate_path(cx.tree, node, path)?;
    go(cx, node, path, props)
}

/// Closes the drawer if it is showing, otherwise pops the stack.
pub fn go_back(cx: &mut Cx, node: NodeId, from_id: Option<&str>) -> Result<(), NavigationError> {
    if is_visible(cx.tree, node) {
        return close(cx, node);
    }
    stack::pop(cx, node, from_id)
}

pub fn on_appear(tree: &mut Tree, node: NodeId, component_id: &str) {
    if let Kind::Drawer(state) = &mut tree.node_mut(node).kind {
        if state.content.id == component_id {
            state.visible = true;
            debug!("Drawer '{}' is now visible", component_id);
            return;
        }
    }
    stack::resync(tree, node, component_id);
}

pub fn on_disappear(tree: &mut Tree, node: NodeId, component_id: &str) {
    if let Kind::Drawer(state) = &mut tree.node_mut(node).kind {
        if state.content.id == component_id {
            state.visible = false;
            debug!("Drawer '{}' is now hidden", component_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::test_support::mounted;

    fn merge(visible: bool) -> HostCommand {
        let mut options = Options::new();
        options.insert("sideMenu".into(), json!({ "left": { "visible": visible } }));
        HostCommand::MergeOptions { id: "app/menu".into(), options }
    }

    fn drawer() -> (Tree, RecordingHost, NodeId) {
        let (tree, mut host, app) = mounted("app");
        host.take();
        (tree, host, app)
    }

    #[test]
    fn test_mount_emits_side_menu_layout() {
        let (_, host, _) = mounted("app");
        let Some(HostCommand::SetRoot { root }) = host.last() else {
            panic!("expected setRoot");
        };
        let value = serde_json::to_value(root).unwrap();
        assert_eq!(value["sideMenu"]["left"]["component"]["name"], "Menu");
        assert_eq!(value["sideMenu"]["center"]["stack"]["children"][0]["component"]["id"], "app/Inbox");
    }

    #[test]
    fn test_visibility_is_observed_not_requested() {
        let (mut tree, mut host, app) = drawer();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        open(&mut cx, app).unwrap();
        assert!(!is_visible(cx.tree, app));
        assert_eq!(host.last(), Some(&merge(true)));

        on_appear(&mut tree, app, "app/menu");
        assert!(is_visible(&tree, app));
        on_disappear(&mut tree, app, "app/menu");
        assert!(!is_visible(&tree, app));
    }

    #[test]
    fn test_toggle_uses_observed_state() {
        let (mut tree, mut host, app) = drawer();
        on_appear(&mut tree, app, "app/menu");
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        toggle(&mut cx, app).unwrap();
        assert_eq!(host.last(), Some(&merge(false)));
    }

    #[test]
    fn test_go_to_content_opens() {
        let (mut tree, mut host, app) = drawer();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        go(&mut cx, app, "menu", &Props::new()).unwrap();
        assert_eq!(host.commands, [merge(true)]);
    }

    #[test]
    fn test_go_closes_and_pushes_from_initial() {
        let (mut tree, mut host, app) = drawer();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        stack::push(&mut cx, app, "Message", &Props::new(), None).unwrap();
        on_appear(cx.tree, app, "app/menu");
        host.take();

        let mut cx = Cx { tree: &mut tree, host: &mut host };
        go(&mut cx, app, "Message", &Props::new()).unwrap();
        assert_eq!(host.commands[0], merge(false));
        assert_eq!(host.commands[1], HostCommand::PopToRoot { from_id: "app/Inbox".into() });
        assert!(matches!(host.commands[2], HostCommand::Push { ref from_id, .. } if from_id == "app/Inbox"));
        assert_eq!(tree.node(app).history.entries(), ["Inbox", "Message"]);
    }

    #[test]
    fn test_go_back_closes_before_popping() {
        let (mut tree, mut host, app) = drawer();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        stack::push(&mut cx, app, "Message", &Props::new(), None).unwrap();
        on_appear(cx.tree, app, "app/menu");

        let mut cx = Cx { tree: &mut tree, host: &mut host };
        go_back(&mut cx, app, None).unwrap();
        assert_eq!(host.last(), Some(&merge(false)));
        assert_eq!(tree.node(app).history.len(), 2);

        on_disappear(&mut tree, app, "app/menu");
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        go_back(&mut cx, app, None).unwrap();
        assert_eq!(tree.node(app).history.entries(), ["Inbox"]);
    }

    #[test]
    fn test_unknown_screen_is_rejected_before_closing() {
        let (mut tree, mut host, app) = drawer();
        on_appear(&mut tree, app, "app/menu");
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        let err = navigate(&mut cx, app, "Nope", &Props::new()).unwrap_err();
        assert_eq!(err, NavigationError::UnknownRoute("app/Nope".into()));
        assert!(host.commands.is_empty());
    }
}
