//! # Modal and Overlay Presentation
//!
//! A modal is a stack presented full-screen above the root route; only its
//! presentation differs from [`stack`](crate::core::stack). An overlay is a
//! single floating screen. Both live directly under the root.
//!
//! ```text
//!   mount modal    ──▶ showModal({stack})
//!   unmount modal  ──▶ dismissModal(top screen id)
//!   mount overlay  ──▶ showOverlay({component})
//!   dismiss        ──▶ dismissOverlay(overlay id)
//! ```

use log::debug;

use crate::core::error::NavigationError;
use crate::core::navigator::{self, Cx};
use crate::core::stack;
use crate::core::tree::{Kind, NodeId, Tree};
use crate::host::HostCommand;
use crate::host::layout::{Options, Props};

pub fn mount(cx: &mut Cx, node: NodeId, props: &Props) -> Result<(), NavigationError> {
    let layout = stack::initialize(cx, node, props)?;
    cx.execute(HostCommand::ShowModal { layout });
    Ok(())
}

/// Dismisses the modal through the host, anchored at its own top screen.
pub fn unmount(cx: &mut Cx, node: NodeId) {
    if let Some(id) = stack::top_screen_id(cx.tree, node) {
        cx.execute(HostCommand::DismissModal { id });
    }
    release(cx.tree, node);
}

/// Forgets a modal the host already closed. No command is issued.
pub fn release(tree: &mut Tree, node: NodeId) {
    navigator::release_listeners(tree, node);
    tree.node_mut(node).mounted = false;
    debug!("Released modal '{}'", tree.node(node).label());
}

pub fn show_overlay(cx: &mut Cx, node: NodeId, props: &Props) {
    let Kind::Overlay(screen) = &cx.tree.node(node).kind else {
        return;
    };
    let layout = screen.layout(props, &Options::new());
    cx.tree.node_mut(node).mounted = true;
    cx.execute(HostCommand::ShowOverlay { layout });
}

pub fn dismiss_overlay(cx: &mut Cx, node: NodeId) {
    let Kind::Overlay(screen) = &cx.tree.node(node).kind else {
        return;
    };
    let id = screen.id.clone();
    cx.tree.node_mut(node).mounted = false;
    cx.execute(HostCommand::DismissOverlay { id });
}
