//! Wayfinder library exports

pub mod core;
pub mod host;
pub mod replay;

#[cfg(test)]
pub mod test_support;

pub use crate::core::{Navigation, NavigationError, RootDef, RouteDef, Settings};
pub use crate::host::{Host, HostCommand, HostEvent};
