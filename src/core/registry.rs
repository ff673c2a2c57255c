//! # Route Registry
//!
//! Ordered mapping from a navigator's local keys to its children. Built
//! once when the tree is constructed and never mutated afterwards.

use crate::core::error::NavigationError;
use crate::core::tree::NodeId;
use crate::host::layout::{Layout, Options, Props, merge_options};

/// A registered renderable leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    /// Namespaced id, e.g. `main/Profile`. Reported back by the host.
    pub id: String,
    pub key: String,
    /// Component name registered with the rendering framework.
    pub name: String,
    pub options: Options,
}

impl Screen {
    /// Component layout. The screen's own options win over `defaults`.
    pub fn layout(&self, props: &Props, defaults: &Options) -> Layout {
        Layout::component(&self.id, &self.name, props.clone(), merge_options(defaults, &self.options))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Screen(Screen),
    Navigator(NodeId),
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<(String, Route)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, route: Route) -> Result<(), NavigationError> {
        if self.contains(key) {
            return Err(NavigationError::InvalidConfiguration(format!(
                "duplicate route key '{key}'"
            )));
        }
        self.entries.push((key.to_string(), route));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Route> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, route)| route)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(k, _)| k.as_str())
    }

    pub fn first_key(&self) -> Option<&str> {
        self.key_at(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.entries.iter().map(|(k, route)| (k.as_str(), route))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
