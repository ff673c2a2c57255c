//! # Base Navigator
//!
//! Behaviour shared by every navigator kind, and the dispatch functions
//! that route `mount`, `unmount`, `navigate`, `go_back` and host events to
//! the kind-specific modules.
//!
//! ```text
//!            navigate(node, "settings/Profile")
//!                        │
//!           ┌────────────┼────────────┬────────────┐
//!           ▼            ▼            ▼            ▼
//!        stack::      switch::      tabs::      drawer::
//! ```

use log::{debug, info};

use crate::core::error::NavigationError;
use crate::core::listeners::Subscription;
use crate::core::path;
use crate::core::registry::Route;
use crate::core::tree::{Kind, NodeId, Tree};
use crate::core::{drawer, modal, stack, switch, tabs};
use crate::host::event::{EventKind, HostEvent};
use crate::host::layout::Props;
use crate::host::{Host, HostCommand};

/// Everything a navigator operation may touch.
pub struct Cx<'a> {
    pub tree: &'a mut Tree,
    pub host: &'a mut dyn Host,
}

impl Cx<'_> {
    pub fn execute(&mut self, command: HostCommand) {
        debug!("Host command: {}", command.name());
        self.host.execute(command);
    }
}

// ============================================================================
// Listeners
// ============================================================================

/// Event kinds each navigator kind handles.
pub fn subscribed_events(kind: &Kind) -> &'static [EventKind] {
    match kind {
        Kind::Root(_) => &[
            EventKind::AppLaunched,
            EventKind::ComponentDidAppear,
            EventKind::ComponentDidDisappear,
            EventKind::ModalDismissed,
        ],
        Kind::Stack | Kind::Modal => &[EventKind::ComponentDidAppear],
        Kind::Drawer(_) => &[EventKind::ComponentDidAppear, EventKind::ComponentDidDisappear],
        Kind::Tabs => &[EventKind::BottomTabSelected],
        Kind::Switch | Kind::Overlay(_) => &[],
    }
}

pub fn add_listener(tree: &mut Tree, node: NodeId, kind: EventKind) -> Subscription {
    let token = tree.bus.subscribe(kind, node);
    tree.node_mut(node).listeners.entry(kind).or_default().push(token);
    token
}

pub fn remove_listener(tree: &mut Tree, node: NodeId, kind: EventKind, token: Subscription) {
    if let Some(tokens) = tree.node_mut(node).listeners.get_mut(&kind) {
        tokens.retain(|t| *t != token);
    }
    tree.bus.release(token);
}

/// Subscribes `node` to every event kind it declares, once.
pub fn listen(tree: &mut Tree, node: NodeId) {
    for kind in subscribed_events(&tree.node(node).kind) {
        let already = tree.node(node).listeners.get(kind).is_some_and(|t| !t.is_empty());
        if !already {
            add_listener(tree, node, *kind);
        }
    }
}

/// Releases every subscription held by `node`.
pub fn release_listeners(tree: &mut Tree, node: NodeId) {
    let listeners = std::mem::take(&mut tree.node_mut(node).listeners);
    for token in listeners.into_values().flatten() {
        tree.bus.release(token);
    }
}

/// Forgets `node` and every mounted navigator below it without telling
/// the host. Used when the host has already thrown its UI away.
pub fn teardown(tree: &mut Tree, node: NodeId) {
    let children: Vec<NodeId> = tree
        .node(node)
        .routes
        .iter()
        .filter_map(|(key, _)| tree.child(node, key))
        .collect();
    for child in children {
        if tree.node(child).mounted {
            teardown(tree, child);
        }
    }
    release_listeners(tree, node);
    tree.node_mut(node).mounted = false;
}

// ============================================================================
// Paths
// ============================================================================

/// Splits `path` and checks the first segment exists in `node`.
pub fn resolve_path<'p>(
    tree: &Tree,
    node: NodeId,
    path: &'p str,
) -> Result<(&'p str, Option<&'p str>), NavigationError> {
    let (key, rest) = path::split(path);
    tree.node(node).get(key)?;
    Ok((key, rest))
}

/// Walks the whole path without touching any state.
pub fn validate_path(tree: &Tree, node: NodeId, path: &str) -> Result<(), NavigationError> {
    let (key, rest) = path::split(path);
    let n = tree.node(node);
    if let Kind::Drawer(state) = &n.kind {
        if drawer::is_content(state, key) && rest.is_none() {
            return Ok(());
        }
    }
    match (n.get(key)?, rest) {
        (_, None) => Ok(()),
        (Route::Navigator(child), Some(rest)) => validate_path(tree, *child, rest),
        (Route::Screen(_), Some(_)) => Err(NavigationError::UnknownRoute(path::join(&n.id, path))),
    }
}

// ============================================================================
// Dispatch
// ============================================================================

pub fn mount(cx: &mut Cx, node: NodeId, props: &Props) -> Result<(), NavigationError> {
    info!("Mounting {} '{}'", cx.tree.node(node).kind_name(), cx.tree.node(node).label());
    match cx.tree.node(node).kind {
        Kind::Stack => stack::mount(cx, node, props),
        Kind::Modal => modal::mount(cx, node, props),
        Kind::Drawer(_) => drawer::mount(cx, node, props),
        Kind::Tabs => tabs::mount(cx, node, props),
        Kind::Switch | Kind::Root(_) => switch::mount(cx, node, props),
        Kind::Overlay(_) => {
            modal::show_overlay(cx, node, props);
            Ok(())
        }
    }
}

pub fn unmount(cx: &mut Cx, node: NodeId, from_id: Option<&str>) {
    info!("Unmounting {} '{}'", cx.tree.node(node).kind_name(), cx.tree.node(node).label());
    match cx.tree.node(node).kind {
        Kind::Stack | Kind::Drawer(_) => stack::unmount(cx, node),
        Kind::Modal => modal::unmount(cx, node),
        Kind::Tabs => tabs::unmount(cx, node),
        Kind::Switch | Kind::Root(_) => switch::unmount(cx, node, from_id),
        Kind::Overlay(_) => modal::dismiss_overlay(cx, node),
    }
}

pub fn navigate(
    cx: &mut Cx,
    node: NodeId,
    path: &str,
    props: &Props,
    from_id: Option<&str>,
) -> Result<(), NavigationError> {
    match cx.tree.node(node).kind {
        Kind::Stack | Kind::Modal => stack::navigate(cx, node, path, props, from_id),
        Kind::Drawer(_) => drawer::navigate(cx, node, path, props),
        Kind::Tabs => tabs::navigate(cx, node, path, props, from_id),
        Kind::Switch | Kind::Root(_) => switch::navigate(cx, node, path, props, from_id),
        Kind::Overlay(_) => Err(NavigationError::UnknownRoute(path::join(cx.tree.node(node).label(), path))),
    }
}

pub fn go_back(cx: &mut Cx, node: NodeId, from_id: Option<&str>) -> Result<(), NavigationError> {
    match cx.tree.node(node).kind {
        Kind::Stack | Kind::Modal => stack::pop(cx, node, from_id),
        Kind::Drawer(_) => drawer::go_back(cx, node, from_id),
        Kind::Tabs => tabs::go_back(cx, node, from_id),
        Kind::Switch | Kind::Root(_) => switch::go_back(cx, node, from_id),
        Kind::Overlay(_) => {
            modal::dismiss_overlay(cx, node);
            Ok(())
        }
    }
}

/// Delivers a host event to a subscribed non-root navigator.
pub fn handle_event(cx: &mut Cx, node: NodeId, event: &HostEvent) {
    match (&cx.tree.node(node).kind, event) {
        (Kind::Stack | Kind::Modal, HostEvent::ComponentDidAppear { component_id }) => {
            stack::resync(cx.tree, node, component_id);
        }
        (Kind::Drawer(_), HostEvent::ComponentDidAppear { component_id }) => {
            drawer::on_appear(cx.tree, node, component_id);
        }
        (Kind::Drawer(_), HostEvent::ComponentDidDisappear { component_id }) => {
            drawer::on_disappear(cx.tree, node, component_id);
        }
        (Kind::Tabs, HostEvent::BottomTabSelected { selected, .. }) => {
            tabs::on_tab_selected(cx.tree, node, *selected);
        }
        _ => {}
    }
}

// ============================================================================
// Child routes
// ============================================================================

/// Presents the child behind `key`. A bare screen becomes the host root.
pub fn mount_route(cx: &mut Cx, parent: NodeId, key: &str, props: &Props) -> Result<(), NavigationError> {
    let node = cx.tree.node(parent);
    match node.get(key)? {
        Route::Navigator(child) => {
            let child = *child;
            mount(cx, child, props)
        }
        Route::Screen(screen) => {
            let root = screen.layout(props, &node.screen_options);
            cx.execute(HostCommand::SetRoot { root });
            Ok(())
        }
    }
}

/// Tears down the child behind `key`. Screens have nothing to release.
pub fn unmount_route(cx: &mut Cx, parent: NodeId, key: &str, from_id: Option<&str>) {
    if let Some(child) = cx.tree.child(parent, key) {
        unmount(cx, child, from_id);
    }
}

pub fn route_go_back(cx: &mut Cx, parent: NodeId, key: &str, from_id: Option<&str>) -> Result<(), NavigationError> {
    match cx.tree.child(parent, key) {
        Some(child) => go_back(cx, child, from_id),
        None => Err(NavigationError::NoBackRoute {
            navigator: path::join(&cx.tree.node(parent).id, key),
        }),
    }
}
