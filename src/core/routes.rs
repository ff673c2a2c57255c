//! # Route Definitions
//!
//! The declarative description a navigation tree is built from. Routes are
//! kept in `Vec`s so their order survives TOML and JSON round trips.
//!
//! ```toml
//! initial_route = "main"
//!
//! [[routes]]
//! key = "main"
//! type = "stack"
//!
//! [[routes.routes]]
//! key = "Home"
//! type = "screen"
//!
//! [[routes]]
//! key = "toast"
//! type = "overlay"
//! name = "Toast"
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::host::layout::{Options, Side};

/// Top-level definition: the root navigator's routes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RootDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_route: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteDef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteDef {
    pub key: String,
    #[serde(flatten)]
    pub kind: RouteKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteKind {
    Screen(ScreenDef),
    /// Floating layer, only valid directly under the root.
    Overlay(ScreenDef),
    Stack(NavigatorDef),
    /// Stack presented above the root, at most one at a time.
    Modal(NavigatorDef),
    Switch(NavigatorDef),
    /// Bottom tabs; every child must be a stack.
    Tabs(NavigatorDef),
    Drawer(DrawerDef),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScreenDef {
    /// Registered component name. Defaults to the route key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Options::is_empty")]
    pub options: Options,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NavigatorDef {
    #[serde(default)]
    pub routes: Vec<RouteDef>,
    /// Options of the navigator's own layout node.
    #[serde(default, skip_serializing_if = "Options::is_empty")]
    pub options: Options,
    /// Defaults merged under every child screen's options.
    #[serde(default, skip_serializing_if = "Options::is_empty")]
    pub screen_options: Options,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_route: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DrawerDef {
    #[serde(default)]
    pub routes: Vec<RouteDef>,
    #[serde(default, skip_serializing_if = "Options::is_empty")]
    pub options: Options,
    #[serde(default, skip_serializing_if = "Options::is_empty")]
    pub screen_options: Options,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_route: Option<String>,
    /// Side panel content. Required; checked when the tree is built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawer: Option<DrawerContent>,
    #[serde(default)]
    pub position: Side,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DrawerContent {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Options::is_empty")]
    pub options: Options,
}

// ============================================================================
// Builders
// ============================================================================

impl RootDef {
    pub fn new(routes: Vec<RouteDef>) -> Self {
        Self { initial_route: None, routes }
    }

    pub fn initial(mut self, key: &str) -> Self {
        self.initial_route = Some(key.to_string());
        self
    }
}

impl RouteDef {
    pub fn screen(key: &str) -> Self {
        Self { key: key.to_string(), kind: RouteKind::Screen(ScreenDef::default()) }
    }

    pub fn overlay(key: &str) -> Self {
        Self { key: key.to_string(), kind: RouteKind::Overlay(ScreenDef::default()) }
    }

    pub fn stack(key: &str, routes: Vec<RouteDef>) -> Self {
        Self::navigator(key, RouteKind::Stack(NavigatorDef { routes, ..Default::default() }))
    }

    pub fn modal(key: &str, routes: Vec<RouteDef>) -> Self {
        Self::navigator(key, RouteKind::Modal(NavigatorDef { routes, ..Default::default() }))
    }

    pub fn switch(key: &str, routes: Vec<RouteDef>) -> Self {
        Self::navigator(key, RouteKind::Switch(NavigatorDef { routes, ..Default::default() }))
    }

    pub fn tabs(key: &str, routes: Vec<RouteDef>) -> Self {
        Self::navigator(key, RouteKind::Tabs(NavigatorDef { routes, ..Default::default() }))
    }

    pub fn drawer(key: &str, routes: Vec<RouteDef>, content: &str) -> Self {
        Self::navigator(
            key,
            RouteKind::Drawer(DrawerDef {
                routes,
                drawer: Some(DrawerContent {
                    key: content.to_string(),
                    name: None,
                    options: Options::new(),
                }),
                ..Default::default()
            }),
        )
    }

    fn navigator(key: &str, kind: RouteKind) -> Self {
        Self { key: key.to_string(), kind }
    }

    /// Sets the component name of a screen or overlay. On a drawer it
    /// names the side panel content.
    pub fn named(mut self, name: &str) -> Self {
        match &mut self.kind {
            RouteKind::Screen(def) | RouteKind::Overlay(def) => def.name = Some(name.to_string()),
            RouteKind::Drawer(DrawerDef { drawer: Some(content), .. }) => {
                content.name = Some(name.to_string())
            }
            _ => {}
        }
        self
    }

    pub fn initial(mut self, key: &str) -> Self {
        match &mut self.kind {
            RouteKind::Stack(def)
            | RouteKind::Modal(def)
            | RouteKind::Switch(def)
            | RouteKind::Tabs(def) => def.initial_route = Some(key.to_string()),
            RouteKind::Drawer(def) => def.initial_route = Some(key.to_string()),
            RouteKind::Screen(_) | RouteKind::Overlay(_) => {}
        }
        self
    }

    /// Options of this route's own layout node. `value` must be a JSON object.
    pub fn options(mut self, value: Value) -> Self {
        let options = value.as_object().cloned().unwrap_or_default();
        match &mut self.kind {
            RouteKind::Screen(def) | RouteKind::Overlay(def) => def.options = options,
            RouteKind::Stack(def)
            | RouteKind::Modal(def)
            | RouteKind::Switch(def)
            | RouteKind::Tabs(def) => def.options = options,
            RouteKind::Drawer(def) => def.options = options,
        }
        self
    }

    /// Default options for child screens. Ignored on screens.
    pub fn screen_options(mut self, value: Value) -> Self {
        let options = value.as_object().cloned().unwrap_or_default();
        match &mut self.kind {
            RouteKind::Stack(def)
            | RouteKind::Modal(def)
            | RouteKind::Switch(def)
            | RouteKind::Tabs(def) => def.screen_options = options,
            RouteKind::Drawer(def) => def.screen_options = options,
            RouteKind::Screen(_) | RouteKind::Overlay(_) => {}
        }
        self
    }

    pub fn position(mut self, side: Side) -> Self {
        if let RouteKind::Drawer(def) = &mut self.kind {
            def.position = side;
        }
        self
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            RouteKind::Screen(_) => "screen",
            RouteKind::Overlay(_) => "overlay",
            RouteKind::Stack(_) => "stack",
            RouteKind::Modal(_) => "modal",
            RouteKind::Switch(_) => "switch",
            RouteKind::Tabs(_) => "tabs",
            RouteKind::Drawer(_) => "drawer",
        }
    }
}
