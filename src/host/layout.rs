//! # Layout Tree
//!
//! The declarative structure handed to the host on every mount. The shape
//! mirrors the navigator kind and the key names are a wire contract with
//! the host: `stack`, `component`, `sideMenu`, `bottomTabs`, `children`,
//! `center`, `left`/`right`, `passProps`, `options`.
//!
//! ```text
//! {"sideMenu": {
//!     "left":   {"component": {"id": "app/menu", "name": "Menu"}},
//!     "center": {"stack": {"children": [{"component": {...}}]}},
//!     "options": {...}
//! }}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat map of presentation options, merged in at each layout level.
pub type Options = Map<String, Value>;

/// Params passed to a screen when it is mounted or updated.
pub type Props = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Layout {
    Component(ComponentLayout),
    Stack(StackLayout),
    SideMenu(SideMenuLayout),
    BottomTabs(BottomTabsLayout),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentLayout {
    pub id: String,
    pub name: String,
    #[serde(rename = "passProps", skip_serializing_if = "Map::is_empty")]
    pub pass_props: Props,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub options: Options,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackLayout {
    pub children: Vec<Layout>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub options: Options,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideMenuLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<Layout>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<Layout>>,
    pub center: Box<Layout>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub options: Options,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottomTabsLayout {
    pub children: Vec<Layout>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub options: Options,
}

/// Which edge a side panel is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn key(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Shallow merge: keys in `over` win over keys in `base`.
pub fn merge_options(base: &Options, over: &Options) -> Options {
    let mut merged = base.clone();
    for (key, value) in over {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

impl Layout {
    pub fn component(id: &str, name: &str, pass_props: Props, options: Options) -> Self {
        Layout::Component(ComponentLayout {
            id: id.to_string(),
            name: name.to_string(),
            pass_props,
            options,
        })
    }

    pub fn stack(children: Vec<Layout>, options: Options) -> Self {
        Layout::Stack(StackLayout { children, options })
    }
}
