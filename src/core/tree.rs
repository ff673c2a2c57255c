//! # Navigator Tree
//!
//! Navigators live in an arena and refer to each other by [`NodeId`].
//! Parent links are indices, so "is this the active branch" is answered by
//! walking upwards instead of through back-references.
//!
//! ```text
//! Tree
//! ├── nodes[0]  root      (Kind::Root)
//! ├── nodes[1]  "main"    (Kind::Stack)   parent 0
//! ├── nodes[2]  "tabs"    (Kind::Tabs)    parent 0
//! ├── nodes[3]  "tabs/a"  (Kind::Stack)   parent 2
//! └── bus                 (event subscriptions)
//! ```
//!
//! The shape is fixed after [`Tree::build`]; only histories, mount flags,
//! drawer visibility and root overlay state change at runtime.

use std::collections::HashMap;

use log::debug;

use crate::core::error::NavigationError;
use crate::core::history::History;
use crate::core::listeners::{Listeners, Subscription};
use crate::core::path;
use crate::core::registry::{Route, RouteTable, Screen};
use crate::core::routes::{DrawerDef, NavigatorDef, RootDef, RouteDef, RouteKind, ScreenDef};
use crate::host::event::EventKind;
use crate::host::layout::{Options, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug)]
pub struct Node {
    /// Namespaced id (`"tabs/settings"`). Empty for the root.
    pub id: String,
    pub key: String,
    pub parent: Option<NodeId>,
    pub routes: RouteTable,
    pub history: History,
    pub initial: String,
    pub options: Options,
    pub screen_options: Options,
    pub listeners: HashMap<EventKind, Vec<Subscription>>,
    pub mounted: bool,
    pub kind: Kind,
}

#[derive(Debug)]
pub enum Kind {
    Root(RootState),
    Stack,
    Modal,
    Switch,
    Tabs,
    Drawer(DrawerState),
    Overlay(Screen),
}

#[derive(Debug, Default)]
pub struct RootState {
    /// Presented overlays, in presentation order, without duplicates.
    pub overlays: Vec<NodeId>,
    /// Last appeared scene; the anchor for host commands.
    pub last_visible: Option<String>,
}

#[derive(Debug)]
pub struct DrawerState {
    pub content: Screen,
    pub side: Side,
    /// Observed host state. Never set by open/close requests.
    pub visible: bool,
}

impl Node {
    /// Looks up a child route, namespacing the key in the error.
    pub fn get(&self, key: &str) -> Result<&Route, NavigationError> {
        self.routes
            .get(key)
            .ok_or_else(|| NavigationError::UnknownRoute(path::join(&self.id, key)))
    }

    /// The route at the top of history.
    pub fn active(&self) -> Option<&Route> {
        self.history.top().and_then(|key| self.routes.get(key))
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            Kind::Root(_) => "root",
            Kind::Stack => "stack",
            Kind::Modal => "modal",
            Kind::Switch => "switch",
            Kind::Tabs => "tabs",
            Kind::Drawer(_) => "drawer",
            Kind::Overlay(_) => "overlay",
        }
    }

    /// Display name for logs and errors.
    pub fn label(&self) -> &str {
        if self.id.is_empty() { "<root>" } else { &self.id }
    }
}

#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    pub(crate) bus: Listeners,
}

impl Tree {
    /// Builds and validates the tree. Every structural problem is reported
    /// here, so nothing fails for shape reasons at runtime.
    pub fn build(def: &RootDef) -> Result<Tree, NavigationError> {
        let mut tree = Tree { nodes: Vec::new(), bus: Listeners::default() };
        let root = tree.alloc(Node {
            id: String::new(),
            key: String::new(),
            parent: None,
            routes: RouteTable::new(),
            history: History::new(),
            initial: String::new(),
            options: Options::new(),
            screen_options: Options::new(),
            listeners: HashMap::new(),
            mounted: true,
            kind: Kind::Root(RootState::default()),
        });

        for route in &def.routes {
            if let RouteKind::Screen(screen) = &route.kind {
                tree.insert_screen(root, route, screen)?;
                continue;
            }
            let child = tree.build_navigator(root, route)?;
            tree.nodes[root.0].routes.insert(&route.key, Route::Navigator(child))?;
        }

        let initial = match &def.initial_route {
            Some(key) => key.clone(),
            None => tree
                .nodes[root.0]
                .routes
                .iter()
                .find(|(_, route)| !tree.is_overlay_route(route))
                .map(|(key, _)| key.to_string())
                .ok_or_else(|| {
                    NavigationError::InvalidConfiguration("root has no presentable route".into())
                })?,
        };
        match tree.nodes[root.0].routes.get(&initial) {
            None => {
                return Err(NavigationError::InvalidConfiguration(format!(
                    "initial route '{initial}' is not a root route"
                )));
            }
            Some(route) if tree.is_overlay_route(route) => {
                return Err(NavigationError::InvalidConfiguration(format!(
                    "initial route '{initial}' is an overlay"
                )));
            }
            Some(_) => {}
        }
        tree.nodes[root.0].initial = initial;

        debug!("Built navigation tree with {} navigators", tree.nodes.len());
        Ok(tree)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn build_navigator(&mut self, parent: NodeId, def: &RouteDef) -> Result<NodeId, NavigationError> {
        validate_key(&def.key)?;
        let parent_id = self.nodes[parent.0].id.clone();
        let parent_is_root = matches!(self.nodes[parent.0].kind, Kind::Root(_));
        let id = path::join(&parent_id, &def.key);

        let (kind, nav) = match &def.kind {
            RouteKind::Screen(_) => return Err(invalid(&id, "a screen is not a navigator")),
            RouteKind::Overlay(screen) => {
                if !parent_is_root {
                    return Err(invalid(&id, "overlays are only allowed under the root"));
                }
                let screen = Screen {
                    id: id.clone(),
                    key: def.key.clone(),
                    name: screen.name.clone().unwrap_or_else(|| def.key.clone()),
                    options: screen.options.clone(),
                };
                return Ok(self.alloc(bare_node(id, &def.key, parent, Kind::Overlay(screen))));
            }
            RouteKind::Modal(nav) => {
                if !parent_is_root {
                    return Err(invalid(&id, "modals are only allowed under the root"));
                }
                (Kind::Modal, nav.clone())
            }
            RouteKind::Stack(nav) => (Kind::Stack, nav.clone()),
            RouteKind::Switch(nav) => (Kind::Switch, nav.clone()),
            RouteKind::Tabs(nav) => (Kind::Tabs, nav.clone()),
            RouteKind::Drawer(drawer) => {
                let content = drawer_content(&id, drawer)?;
                let state = DrawerState { content, side: drawer.position, visible: false };
                let nav = NavigatorDef {
                    routes: drawer.routes.clone(),
                    options: drawer.options.clone(),
                    screen_options: drawer.screen_options.clone(),
                    initial_route: drawer.initial_route.clone(),
                };
                (Kind::Drawer(state), nav)
            }
        };

        if nav.routes.is_empty() {
            return Err(invalid(&id, "no routes"));
        }

        let mut node = bare_node(id.clone(), &def.key, parent, kind);
        node.options = nav.options.clone();
        node.screen_options = nav.screen_options.clone();
        let node_id = self.alloc(node);

        for child in &nav.routes {
            self.check_child(node_id, child)?;
            match &child.kind {
                RouteKind::Screen(screen) => self.insert_screen(node_id, child, screen)?,
                _ => {
                    let child_id = self.build_navigator(node_id, child)?;
                    self.nodes[node_id.0].routes.insert(&child.key, Route::Navigator(child_id))?;
                }
            }
        }

        let initial = nav
            .initial_route
            .clone()
            .or_else(|| self.nodes[node_id.0].routes.first_key().map(str::to_string))
            .unwrap_or_default();
        if !self.nodes[node_id.0].routes.contains(&initial) {
            return Err(invalid(&id, &format!("initial route '{initial}' does not exist")));
        }
        if let Kind::Drawer(state) = &self.nodes[node_id.0].kind {
            if self.nodes[node_id.0].routes.contains(&state.content.key) {
                return Err(invalid(&id, "drawer content key collides with a route key"));
            }
        }
        self.nodes[node_id.0].initial = initial;
        Ok(node_id)
    }

    /// Structural constraints between a navigator and one child definition.
    fn check_child(&self, parent: NodeId, child: &RouteDef) -> Result<(), NavigationError> {
        let node = &self.nodes[parent.0];
        let is_screen = matches!(child.kind, RouteKind::Screen(_));
        let ok = match node.kind {
            Kind::Stack | Kind::Modal | Kind::Drawer(_) => is_screen,
            Kind::Tabs => matches!(child.kind, RouteKind::Stack(_)),
            Kind::Switch => !matches!(child.kind, RouteKind::Modal(_) | RouteKind::Overlay(_)),
            Kind::Root(_) | Kind::Overlay(_) => true,
        };
        if ok {
            Ok(())
        } else {
            Err(invalid(
                &node.id,
                &format!("a {} cannot contain {} '{}'", node.kind_name(), child.kind_name(), child.key),
            ))
        }
    }

    fn insert_screen(&mut self, parent: NodeId, def: &RouteDef, screen: &ScreenDef) -> Result<(), NavigationError> {
        validate_key(&def.key)?;
        let node = &mut self.nodes[parent.0];
        let screen = Screen {
            id: path::join(&node.id, &def.key),
            key: def.key.clone(),
            name: screen.name.clone().unwrap_or_else(|| def.key.clone()),
            options: screen.options.clone(),
        };
        node.routes.insert(&def.key, Route::Screen(screen))
    }

    fn is_overlay_route(&self, route: &Route) -> bool {
        matches!(route, Route::Navigator(id) if matches!(self.nodes[id.0].kind, Kind::Overlay(_)))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Finds a navigator by its namespaced id.
    pub fn find(&self, navigator_id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.id == navigator_id)
            .map(NodeId)
    }

    /// The navigator behind `key` in `parent`, if the route is a navigator.
    pub fn child(&self, parent: NodeId, key: &str) -> Option<NodeId> {
        match self.nodes[parent.0].routes.get(key) {
            Some(Route::Navigator(id)) => Some(*id),
            _ => None,
        }
    }

    /// A node is on the active branch when it is mounted and every ancestor
    /// has it (or its ancestor) at the top of history.
    pub fn is_active_branch(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let node = &self.nodes[current.0];
            if !node.mounted {
                return false;
            }
            let Some(parent) = node.parent else {
                return true;
            };
            match self.nodes[parent.0].active() {
                Some(Route::Navigator(child)) if *child == current => current = parent,
                _ => return false,
            }
        }
    }

    /// Deepest navigator on the active branch.
    pub fn active_leaf(&self) -> NodeId {
        let mut current = self.root();
        while let Some(Route::Navigator(child)) = self.nodes[current.0].active() {
            current = *child;
        }
        current
    }

    /// Ids of every overlay route, presented or not.
    pub fn overlay_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match &node.kind {
            Kind::Overlay(screen) => Some(screen.id.as_str()),
            _ => None,
        })
    }

    /// Every screen descriptor in the tree, including drawer content and
    /// overlays, in construction order.
    pub fn screens(&self) -> Vec<&Screen> {
        let mut screens = Vec::new();
        for node in &self.nodes {
            match &node.kind {
                Kind::Overlay(screen) => screens.push(screen),
                Kind::Drawer(state) => screens.push(&state.content),
                _ => {}
            }
            for (_, route) in node.routes.iter() {
                if let Route::Screen(screen) = route {
                    screens.push(screen);
                }
            }
        }
        screens
    }
}

fn bare_node(id: String, key: &str, parent: NodeId, kind: Kind) -> Node {
    Node {
        id,
        key: key.to_string(),
        parent: Some(parent),
        routes: RouteTable::new(),
        history: History::new(),
        initial: String::new(),
        options: Options::new(),
        screen_options: Options::new(),
        listeners: HashMap::new(),
        mounted: false,
        kind,
    }
}

fn drawer_content(id: &str, def: &DrawerDef) -> Result<Screen, NavigationError> {
    let content = def
        .drawer
        .as_ref()
        .ok_or_else(|| invalid(id, "drawer content is required"))?;
    validate_key(&content.key)?;
    Ok(Screen {
        id: path::join(id, &content.key),
        key: content.key.clone(),
        name: content.name.clone().unwrap_or_else(|| content.key.clone()),
        options: content.options.clone(),
    })
}

fn validate_key(key: &str) -> Result<(), NavigationError> {
    if key.is_empty() || key.contains(path::SEPARATOR) {
        return Err(NavigationError::InvalidConfiguration(format!(
            "route key '{key}' must be non-empty and must not contain '{}'",
            path::SEPARATOR
        )));
    }
    Ok(())
}

fn invalid(id: &str, msg: &str) -> NavigationError {
    NavigationError::InvalidConfiguration(format!("{id}: {msg}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::app_routes;

    #[test]
    fn test_ids_are_namespaced() {
        let tree = Tree::build(&app_routes()).unwrap();
        let tabs = tree.find("tabs").unwrap();
        let settings = tree.child(tabs, "settings").unwrap();
        assert_eq!(tree.node(settings).id, "tabs/settings");
        let Some(Route::Screen(profile)) = tree.node(settings).routes.get("Profile") else {
            panic!("expected Profile screen");
        };
        assert_eq!(profile.id, "tabs/settings/Profile");
        assert_eq!(tree.node(tree.root()).initial, "main");
    }

    #[test]
    fn test_stack_rejects_nested_navigator() {
        let def = RootDef::new(vec![RouteDef::stack(
            "main",
            vec![RouteDef::screen("A"), RouteDef::stack("inner", vec![RouteDef::screen("B")])],
        )]);
        let err = Tree::build(&def).unwrap_err();
        assert_eq!(
            err,
            NavigationError::InvalidConfiguration("main: a stack cannot contain stack 'inner'".into())
        );
    }

    #[test]
    fn test_drawer_requires_content() {
        let mut drawer = RouteDef::drawer("app", vec![RouteDef::screen("Feed")], "menu");
        if let RouteKind::Drawer(def) = &mut drawer.kind {
            def.drawer = None;
        }
        let err = Tree::build(&RootDef::new(vec![drawer])).unwrap_err();
        assert!(err.to_string().contains("drawer content is required"));
    }

    #[test]
    fn test_tabs_children_must_be_stacks() {
        let def = RootDef::new(vec![RouteDef::tabs("tabs", vec![RouteDef::screen("A")])]);
        assert!(matches!(Tree::build(&def), Err(NavigationError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_switch_rejects_modal_child() {
        let def = RootDef::new(vec![RouteDef::switch(
            "flow",
            vec![RouteDef::screen("A"), RouteDef::modal("m", vec![RouteDef::screen("B")])],
        )]);
        assert!(matches!(Tree::build(&def), Err(NavigationError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_invalid_keys_and_initial_route() {
        let slash = RootDef::new(vec![RouteDef::stack("main", vec![RouteDef::screen("a/b")])]);
        assert!(Tree::build(&slash).is_err());

        let missing = RootDef::new(vec![RouteDef::stack("main", vec![RouteDef::screen("A")]).initial("Z")]);
        assert!(Tree::build(&missing).unwrap_err().to_string().contains("initial route 'Z'"));

        let only_overlay = RootDef::new(vec![RouteDef::overlay("toast")]);
        assert!(Tree::build(&only_overlay).is_err());

        let empty = RootDef::new(vec![RouteDef::stack("main", vec![])]);
        assert!(Tree::build(&empty).unwrap_err().to_string().contains("no routes"));
    }

    #[test]
    fn test_overlay_only_under_root() {
        let def = RootDef::new(vec![RouteDef::switch(
            "flow",
            vec![RouteDef::screen("A"), RouteDef::overlay("toast")],
        )]);
        assert!(Tree::build(&def).is_err());
    }

    #[test]
    fn test_screens_include_drawer_and_overlays() {
        let tree = Tree::build(&app_routes()).unwrap();
        let names: Vec<&str> = tree.screens().iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Menu"));
        assert!(names.contains(&"Toast"));
        assert!(names.contains(&"Login"));
        let overlays: Vec<&str> = tree.overlay_ids().collect();
        assert_eq!(overlays, ["toast", "banner"]);
    }

    #[test]
    fn test_nothing_active_before_mount() {
        let tree = Tree::build(&app_routes()).unwrap();
        let main = tree.find("main").unwrap();
        assert!(!tree.is_active_branch(main));
        assert!(tree.is_active_branch(tree.root()));
        assert_eq!(tree.active_leaf(), tree.root());
    }
}
