//! # Core Navigation Logic
//!
//! The navigation state machine. It knows nothing about how screens are
//! drawn; everything it wants from the host goes out as a `HostCommand`,
//! and everything the host reports comes back as a `HostEvent`.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │       Navigation        │
//!                    │        (root.rs)        │
//!                    └───────────┬─────────────┘
//!                                │ navigate / go_back / dispatch
//!                    ┌───────────▼─────────────┐
//!                    │   Tree of navigators    │
//!                    │  (tree.rs, navigator.rs)│
//!                    └───────────┬─────────────┘
//!            ┌──────────┬────────┼─────────┬──────────┐
//!            ▼          ▼        ▼         ▼          ▼
//!         stack      switch    tabs     drawer   modal/overlay
//! ```
//!
//! ## Modules
//!
//! - [`routes`]: declarative route definitions (TOML / JSON)
//! - [`tree`]: the navigator arena built from them
//! - [`history`], [`registry`], [`path`]: per-navigator building blocks
//! - [`navigator`]: dispatch over navigator kinds, listeners
//! - [`root`]: `Navigation`, the public entry point
//! - [`config`]: settings and route file loading

pub mod config;
pub mod drawer;
pub mod error;
pub mod history;
pub mod listeners;
pub mod modal;
pub mod navigator;
pub mod path;
pub mod registry;
pub mod root;
pub mod routes;
pub mod stack;
pub mod switch;
pub mod tabs;
pub mod tree;
pub mod widget;

pub use error::NavigationError;
pub use root::{Navigation, Settings};
pub use routes::{RootDef, RouteDef};
