//! # Tabs Navigator
//!
//! Bottom tabs over stacks. Every tab stack is presented once, in a single
//! `bottomTabs` root; changing tabs is an options merge, not a remount.
//! Each tab keeps its own back-stack while it is not selected.

use log::{debug, info};
use serde_json::json;

use crate::core::error::NavigationError;
use crate::core::navigator::{self, Cx};
use crate::core::path;
use crate::core::stack;
use crate::core::tree::{NodeId, Tree};
use crate::host::HostCommand;
use crate::host::layout::{BottomTabsLayout, Layout, Options, Props};

fn tab_stacks(tree: &Tree, node: NodeId) -> Vec<(String, NodeId)> {
    tree.node(node)
        .routes
        .iter()
        .filter_map(|(key, _)| tree.child(node, key).map(|child| (key.to_string(), child)))
        .collect()
}

fn select_options(index: usize) -> Options {
    let mut options = Options::new();
    options.insert("bottomTabs".into(), json!({ "currentTabIndex": index }));
    options
}

/// Asks the host to show the tab behind `key`.
fn select(cx: &mut Cx, node: NodeId, key: &str) -> Result<(), NavigationError> {
    let index = cx
        .tree
        .node(node)
        .routes
        .index_of(key)
        .ok_or_else(|| NavigationError::UnknownRoute(path::join(&cx.tree.node(node).id, key)))?;
    let tab = cx
        .tree
        .child(node, key)
        .ok_or_else(|| NavigationError::UnknownRoute(path::join(&cx.tree.node(node).id, key)))?;
    let id = stack::anchor(cx.tree, tab, None);
    cx.execute(HostCommand::MergeOptions { id, options: select_options(index) });
    Ok(())
}

pub fn mount(cx: &mut Cx, node: NodeId, props: &Props) -> Result<(), NavigationError> {
    let n = cx.tree.node_mut(node);
    let initial = n.initial.clone();
    n.history.reset(&initial);
    n.mounted = true;
    navigator::listen(cx.tree, node);

    let mut children = Vec::new();
    for (key, tab) in tab_stacks(cx.tree, node) {
        let tab_props = if key == initial { props.clone() } else { Props::new() };
        children.push(stack::initialize(cx, tab, &tab_props)?);
    }
    let options = cx.tree.node(node).options.clone();
    cx.execute(HostCommand::SetRoot {
        root: Layout::BottomTabs(BottomTabsLayout { children, options }),
    });

    if cx.tree.node(node).routes.index_of(&initial) != Some(0) {
        select(cx, node, &initial)?;
    }
    Ok(())
}

pub fn unmount(cx: &mut Cx, node: NodeId) {
    for (_, tab) in tab_stacks(cx.tree, node) {
        stack::unmount(cx, tab);
    }
    navigator::release_listeners(cx.tree, node);
    cx.tree.node_mut(node).mounted = false;
}

/// Selects the tab named by the first segment and forwards the rest to
/// that tab's stack.
pub fn navigate(
    cx: &mut Cx,
    node: NodeId,
    path: &str,
    props: &Props,
    from_id: Option<&str>,
) -> Result<(), NavigationError> {
    navigator::validate_path(cx.tree, node, path)?;
    let (key, rest) = path::split(path);

    if cx.tree.node(node).history.top() != Some(key) {
        cx.tree.node_mut(node).history.visit(key);
        info!("Select tab '{}' in '{}'", key, cx.tree.node(node).label());
        select(cx, node, key)?;
    }

    match (rest, cx.tree.child(node, key)) {
        (Some(rest), Some(tab)) => stack::navigate(cx, tab, rest, props, from_id),
        _ => Ok(()),
    }
}

/// Back inside the selected tab, else back to the previously selected tab.
pub fn go_back(cx: &mut Cx, node: NodeId, from_id: Option<&str>) -> Result<(), NavigationError> {
    let n = cx.tree.node(node);
    let Some(active) = n.history.top().map(str::to_string) else {
        return Err(NavigationError::NoBackRoute { navigator: n.label().to_string() });
    };

    match navigator::route_go_back(cx, node, &active, from_id) {
        Err(err) if err.is_no_back_route() && cx.tree.node(node).history.len() > 1 => {
            let n = cx.tree.node_mut(node);
            n.history.pop();
            let previous = n.history.top().map(str::to_string).unwrap_or_default();
            info!("Tabs '{}' back from '{}' to '{}'", n.label(), active, previous);
            select(cx, node, &previous)
        }
        other => other,
    }
}

/// Host resync: the user tapped a tab.
pub fn on_tab_selected(tree: &mut Tree, node: NodeId, selected: usize) {
    if !tree.is_active_branch(node) {
        return;
    }
    let Some(key) = tree.node(node).routes.key_at(selected).map(str::to_string) else {
        debug!("Ignoring selection of missing tab #{}", selected);
        return;
    };
    let n = tree.node_mut(node);
    if n.history.top() != Some(key.as_str()) {
        n.history.visit(&key);
        debug!("Tabs '{}' resynced to '{}'", n.label(), key);
    }
}
