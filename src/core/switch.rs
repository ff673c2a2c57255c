//! # Switch Navigator
//!
//! One active child among mutually exclusive routes (onboarding flows,
//! auth vs. app). History records the order sections were visited, which
//! gives one level of back-navigation across them.

use log::{debug, info};

use crate::core::error::NavigationError;
use crate::core::navigator::{self, Cx};
use crate::core::registry::Route;
use crate::core::tree::NodeId;
use crate::host::HostCommand;
use crate::host::layout::Props;

pub fn mount(cx: &mut Cx, node: NodeId, props: &Props) -> Result<(), NavigationError> {
    let n = cx.tree.node_mut(node);
    let initial = n.initial.clone();
    n.history.reset(&initial);
    n.mounted = true;
    navigator::listen(cx.tree, node);
    navigator::mount_route(cx, node, &initial, props)
}

pub fn unmount(cx: &mut Cx, node: NodeId, from_id: Option<&str>) {
    if let Some(active) = cx.tree.node(node).history.top().map(str::to_string) {
        navigator::unmount_route(cx, node, &active, from_id);
    }
    navigator::release_listeners(cx.tree, node);
    cx.tree.node_mut(node).mounted = false;
}

/// Switches to the first segment of `path` and forwards the rest.
pub fn navigate(
    cx: &mut Cx,
    node: NodeId,
    path: &str,
    props: &Props,
    from_id: Option<&str>,
) -> Result<(), NavigationError> {
    navigator::validate_path(cx.tree, node, path)?;
    let (key, rest) = navigator::resolve_path(cx.tree, node, path)?;
    let active = cx.tree.node(node).history.top().map(str::to_string);

    if active.as_deref() != Some(key) {
        if let Some(previous) = &active {
            navigator::unmount_route(cx, node, previous, from_id);
        }
        cx.tree.node_mut(node).history.visit(key);
        info!("Switch '{}' to '{}'", cx.tree.node(node).label(), key);
        navigator::mount_route(cx, node, key, props)?;
    } else if let Some(Route::Screen(screen)) = cx.tree.node(node).routes.get(key) {
        debug!("'{}' already active, updating props", screen.id);
        let id = screen.id.clone();
        cx.execute(HostCommand::UpdateProps { id, props: props.clone() });
    }

    match (rest, cx.tree.child(node, key)) {
        (Some(rest), Some(child)) => navigator::navigate(cx, child, rest, props, from_id),
        _ => Ok(()),
    }
}

/// Delegates to the active child, then falls back to the previously
/// visited section when the child has nothing left.
pub fn go_back(cx: &mut Cx, node: NodeId, from_id: Option<&str>) -> Result<(), NavigationError> {
    let n = cx.tree.node(node);
    let Some(active) = n.history.top().map(str::to_string) else {
        return Err(NavigationError::NoBackRoute { navigator: n.label().to_string() });
    };

    match navigator::route_go_back(cx, node, &active, from_id) {
        Err(err) if err.is_no_back_route() && cx.tree.node(node).history.len() > 1 => {
            navigator::unmount_route(cx, node, &active, from_id);
            let n = cx.tree.node_mut(node);
            n.history.pop();
            let previous = n.history.top().map(str::to_string).unwrap_or_default();
            info!("Switch '{}' back from '{}' to '{}'", n.label(), active, previous);
            navigator::mount_route(cx, node, &previous, &Props::new())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::Tree;
    use crate::host::RecordingHost;
    use crate::test_support::{app_routes, props};

    fn onboarding() -> (Tree, RecordingHost, NodeId) {
        let mut tree = Tree::build(&app_routes()).unwrap();
        let mut host = RecordingHost::new();
        let root = tree.root();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        navigator::navigate(&mut cx, root, "onboarding", &Props::new(), None).unwrap();
        let flow = tree.find("onboarding").unwrap();
        (tree, host, flow)
    }

    #[test]
    fn test_mount_presents_initial_screen() {
        let (tree, host, flow) = onboarding();
        assert_eq!(tree.node(flow).history.entries(), ["Welcome"]);
        let Some(HostCommand::SetRoot { root }) = host.last() else {
            panic!("expected setRoot, got {:?}", host.last());
        };
        let value = serde_json::to_value(root).unwrap();
        assert_eq!(value["component"]["id"], "onboarding/Welcome");
    }

    #[test]
    fn test_switching_mounts_new_child_and_forwards_rest() {
        let (mut tree, mut host, flow) = onboarding();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        navigate(&mut cx, flow, "steps/Step2", &Props::new(), None).unwrap();
        let steps = tree.find("onboarding/steps").unwrap();
        assert_eq!(tree.node(flow).history.entries(), ["Welcome", "steps"]);
        assert_eq!(tree.node(steps).history.entries(), ["Step1", "Step2"]);
        assert!(matches!(host.last(), Some(HostCommand::Push { .. })));
    }

    #[test]
    fn test_active_screen_gets_props_update() {
        let (mut tree, mut host, flow) = onboarding();
        host.take();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        navigate(&mut cx, flow, "Welcome", &props(3), None).unwrap();
        assert_eq!(
            host.commands,
            [HostCommand::UpdateProps { id: "onboarding/Welcome".into(), props: props(3) }]
        );
    }

    #[test]
    fn test_unknown_path_leaves_history_untouched() {
        let (mut tree, mut host, flow) = onboarding();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        let err = navigate(&mut cx, flow, "steps/Nope", &Props::new(), None).unwrap_err();
        assert_eq!(err, NavigationError::UnknownRoute("onboarding/steps/Nope".into()));
        assert_eq!(tree.node(flow).history.entries(), ["Welcome"]);
    }

    #[test]
    fn test_go_back_falls_back_to_previous_section() {
        let (mut tree, mut host, flow) = onboarding();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        navigate(&mut cx, flow, "steps", &Props::new(), None).unwrap();
        go_back(&mut cx, flow, None).unwrap();
        assert_eq!(tree.node(flow).history.entries(), ["Welcome"]);
        let steps = tree.find("onboarding/steps").unwrap();
        assert!(!tree.node(steps).mounted);
        assert!(matches!(host.last(), Some(HostCommand::SetRoot { .. })));
    }

    #[test]
    fn test_go_back_inside_child_first() {
        let (mut tree, mut host, flow) = onboarding();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        navigate(&mut cx, flow, "steps/Step2", &Props::new(), None).unwrap();
        go_back(&mut cx, flow, None).unwrap();
        let steps = tree.find("onboarding/steps").unwrap();
        assert_eq!(tree.node(steps).history.entries(), ["Step1"]);
        assert_eq!(tree.node(flow).history.entries(), ["Welcome", "steps"]);
    }

    #[test]
    fn test_go_back_with_single_entry_propagates() {
        let (mut tree, mut host, flow) = onboarding();
        let mut cx = Cx { tree: &mut tree, host: &mut host };
        let err = go_back(&mut cx, flow, None).unwrap_err();
        assert!(err.is_no_back_route());
    }
}
