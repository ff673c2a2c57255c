//! # Stack Navigator
//!
//! Linear push/pop history over leaf screens. Modal and drawer navigators
//! reuse everything here and only change how the stack is presented.
//!
//! ```text
//! history: [A]  ──push(B)──▶  [A, B]  ──push(C)──▶  [A, B, C]
//!                                                      │
//!               [A]  ◀── navigate(A) / popTo ──────────┘
//! ```
//!
//! The host can remove screens on its own (hardware back skipping several
//! frames, a native pop-to). When it reports that a screen lower in our
//! history appeared, [`resync`] truncates history to match.

use log::{debug, info};

use crate::core::error::NavigationError;
use crate::core::navigator::{self, Cx};
use crate::core::path;
use crate::core::registry::{Route, Screen};
use crate::core::tree::{NodeId, Tree};
use crate::host::HostCommand;
use crate::host::layout::{Layout, Props};

/// Resets history to the initial route, subscribes and marks mounted.
/// Returns the stack layout without presenting it.
pub fn initialize(cx: &mut Cx, node: NodeId, props: &Props) -> Result<Layout, NavigationError> {
    let n = cx.tree.node_mut(node);
    let initial = n.initial.clone();
    n.history.reset(&initial);
    n.mounted = true;
    navigator::listen(cx.tree, node);
    layout(cx.tree, node, props)
}

/// Stack layout for the current history. The top screen receives `props`.
pub fn layout(tree: &Tree, node: NodeId, props: &Props) -> Result<Layout, NavigationError> {
    let n = tree.node(node);
    let last = n.history.len().saturating_sub(1);
    let mut children = Vec::with_capacity(n.history.len());
    for (i, key) in n.history.entries().iter().enumerate() {
        let screen = screen(tree, node, key)?;
        let screen_props = if i == last { props.clone() } else { Props::new() };
        children.push(screen.layout(&screen_props, &n.screen_options));
    }
    Ok(Layout::stack(children, n.options.clone()))
}

/// Mounting is always a hard reset of the subtree.
pub fn mount(cx: &mut Cx, node: NodeId, props: &Props) -> Result<(), NavigationError> {
    let root = initialize(cx, node, props)?;
    cx.execute(HostCommand::SetRoot { root });
    Ok(())
}

/// Releases subscriptions. The next `setRoot` replaces the presentation.
pub fn unmount(cx: &mut Cx, node: NodeId) {
    navigator::release_listeners(cx.tree, node);
    cx.tree.node_mut(node).mounted = false;
}

pub fn push(
    cx: &mut Cx,
    node: NodeId,
    key: &str,
    props: &Props,
    from_id: Option<&str>,
) -> Result<(), NavigationError> {
    let n = cx.tree.node(node);
    let layout = screen(cx.tree, node, key)?.layout(props, &n.screen_options);
    let from_id = anchor(cx.tree, node, from_id);

    cx.tree.node_mut(node).history.push(key);
    info!("Push '{}' onto '{}'", key, cx.tree.node(node).label());
    cx.execute(HostCommand::Push { from_id, layout });
    Ok(())
}

pub fn pop(cx: &mut Cx, node: NodeId, from_id: Option<&str>) -> Result<(), NavigationError> {
    let n = cx.tree.node(node);
    if n.history.len() <= 1 {
        return Err(NavigationError::NoBackRoute { navigator: n.label().to_string() });
    }
    let from_id = anchor(cx.tree, node, from_id);

    let popped = cx.tree.node_mut(node).history.pop();
    info!("Pop {:?} from '{}'", popped, cx.tree.node(node).label());
    cx.execute(HostCommand::Pop { from_id });
    Ok(())
}

/// Pushes `key` if it is not in history, otherwise pops back to it.
pub fn navigate(
    cx: &mut Cx,
    node: NodeId,
    path: &str,
    props: &Props,
    from_id: Option<&str>,
) -> Result<(), NavigationError> {
    let (key, rest) = path::split(path);
    let to = screen(cx.tree, node, key)?;
    if rest.is_some() {
        return Err(NavigationError::UnknownRoute(to.id.clone()));
    }
    let to_id = to.id.clone();

    let history = &cx.tree.node(node).history;
    match history.position(key) {
        None => push(cx, node, key, props, from_id),
        Some(index) if index + 1 == history.len() => {
            debug!("'{}' is already on top of '{}'", key, cx.tree.node(node).label());
            Ok(())
        }
        Some(index) => {
            cx.tree.node_mut(node).history.truncate_after(index);
            info!("Pop '{}' back to '{}'", cx.tree.node(node).label(), key);
            cx.execute(HostCommand::PopTo { to_id });
            Ok(())
        }
    }
}

pub fn pop_to_root(cx: &mut Cx, node: NodeId, from_id: Option<&str>) -> Result<(), NavigationError> {
    let from_id = anchor(cx.tree, node, from_id);
    let n = cx.tree.node_mut(node);
    let initial = n.initial.clone();
    n.history.reset(&initial);
    info!("Pop '{}' to root", n.label());
    cx.execute(HostCommand::PopToRoot { from_id });
    Ok(())
}

/// Host resync on `ComponentDidAppear`. Returns true if history changed.
///
/// Only acts when the stack is on the active branch and `component_id` is
/// one of its own screens below the top of history.
pub fn resync(tree: &mut Tree, node: NodeId, component_id: &str) -> bool {
    let n = tree.node(node);
    if n.history.len() <= 1 || !tree.is_active_branch(node) {
        return false;
    }
    let Some(key) = path::child_key(&n.id, component_id) else {
        return false;
    };
    if n.history.top() == Some(key) {
        return false;
    }
    let Some(index) = n.history.position_below_top(key) else {
        return false;
    };

    let n = tree.node_mut(node);
    n.history.truncate_after(index);
    debug!("Resynced '{}' to {:?} after '{}' appeared", n.label(), n.history.entries(), component_id);
    true
}

pub fn screen<'t>(tree: &'t Tree, node: NodeId, key: &str) -> Result<&'t Screen, NavigationError> {
    match tree.node(node).get(key)? {
        Route::Screen(screen) => Ok(screen),
        Route::Navigator(_) => Err(NavigationError::UnknownRoute(path::join(&tree.node(node).id, key))),
    }
}

pub fn top_screen_id(tree: &Tree, node: NodeId) -> Option<String> {
    let key = tree.node(node).history.top()?;
    screen(tree, node, key).ok().map(|s| s.id.clone())
}

/// `from_id` if it is one of this stack's screens, otherwise the current
/// top screen. Host stack commands act on the stack containing the anchor.
pub fn anchor(tree: &Tree, node: NodeId, from_id: Option<&str>) -> String {
    let n = tree.node(node);
    match from_id {
        Some(id) if path::child_key(&n.id, id).is_some_and(|key| n.history.contains(key)) => id.to_string(),
        _ => top_screen_id(tree, node).unwrap_or_else(|| path::join(&n.id, &n.initial)),
    }
}
