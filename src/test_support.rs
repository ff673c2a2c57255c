//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use serde_json::json;

use crate::core::navigator::{self, Cx};
use crate::core::routes::{RootDef, RouteDef};
use crate::core::tree::{NodeId, Tree};
use crate::core::{Navigation, Settings};
use crate::host::layout::Props;
use crate::host::{HostEvent, RecordingHost};

/// The route tree most tests run against:
///
/// ```text
/// main        stack   A, B, C
/// tabs        tabs    home: stack Feed, Post | settings: stack Settings, Profile
/// auth        modal   Login, Signup
/// app         drawer  Inbox, Message (content "menu")
/// onboarding  switch  Welcome | steps: stack Step1, Step2
/// toast       overlay
/// banner      overlay
/// ```
pub fn app_routes() -> RootDef {
    RootDef::new(vec![
        RouteDef::stack(
            "main",
            vec![RouteDef::screen("A"), RouteDef::screen("B"), RouteDef::screen("C")],
        ),
        RouteDef::tabs(
            "tabs",
            vec![
                RouteDef::stack("home", vec![RouteDef::screen("Feed"), RouteDef::screen("Post")]),
                RouteDef::stack(
                    "settings",
                    vec![RouteDef::screen("Settings"), RouteDef::screen("Profile")],
                ),
            ],
        ),
        RouteDef::modal("auth", vec![RouteDef::screen("Login"), RouteDef::screen("Signup")]),
        RouteDef::drawer("app", vec![RouteDef::screen("Inbox"), RouteDef::screen("Message")], "menu")
            .named("Menu"),
        RouteDef::switch(
            "onboarding",
            vec![
                RouteDef::screen("Welcome"),
                RouteDef::stack("steps", vec![RouteDef::screen("Step1"), RouteDef::screen("Step2")]),
            ],
        ),
        RouteDef::overlay("toast").named("Toast"),
        RouteDef::overlay("banner").named("Banner"),
    ])
    .initial("main")
}

/// Builds the app tree and mounts the root route `key` through the root,
/// so the returned navigator is on the active branch.
pub fn mounted(key: &str) -> (Tree, RecordingHost, NodeId) {
    let mut tree = Tree::build(&app_routes()).unwrap();
    let mut host = RecordingHost::new();
    let root = tree.root();
    let mut cx = Cx { tree: &mut tree, host: &mut host };
    navigator::navigate(&mut cx, root, key, &Props::new(), None).unwrap();
    let node = tree.find(key).unwrap();
    (tree, host, node)
}

pub fn props(id: i64) -> Props {
    json!({ "id": id }).as_object().cloned().unwrap()
}

/// A launched and mounted `Navigation` over [`app_routes`].
pub fn launched() -> Navigation<RecordingHost> {
    let mut nav = Navigation::with_settings(&app_routes(), RecordingHost::new(), Settings::default()).unwrap();
    nav.notify(&HostEvent::AppLaunched);
    nav.mount(&Props::new()).unwrap();
    nav
}
