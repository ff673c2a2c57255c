//! # Host Boundary
//!
//! Everything the controller exchanges with the presentation host:
//!
//! ```text
//!              commands (fire-and-forget)
//!   Navigation ──────────────────────────────▶ Host
//!       ▲                                       │
//!       │   HostEvent + sequence number         │
//!       └──────────── event channel ◀───────────┘
//! ```
//!
//! The host itself (how pixels are drawn, how gestures are recognized) is an
//! external collaborator. Only the logical contract lives here.
//!
//! ## Modules
//!
//! - [`layout`]: the declarative layout tree sent on mount
//! - [`command`]: the `HostCommand` enum
//! - [`event`]: lifecycle events and the sequenced event channel
//! - [`recording`]: an in-memory host that records commands
//! - [`writer`]: a host that writes commands as JSON lines

pub mod command;
pub mod event;
pub mod layout;
pub mod recording;
pub mod writer;

pub use command::HostCommand;
pub use event::{
    EventEnvelope, EventKind, EventSource, HostEvent, HostEventReceiver, HostEventSender, channel,
};
pub use layout::{Layout, Options, Props, Side};
pub use recording::RecordingHost;
pub use writer::JsonLinesHost;

/// The presentation host, as seen by the controller.
pub trait Host {
    /// Executes a presentation command. Must not block on animations.
    fn execute(&mut self, command: HostCommand);
}

/// Registers renderable leaf units with the rendering framework.
pub trait Registrar {
    /// Registers `name`. `wrapped` asks for ambient context/state-provider
    /// injection around the screen.
    fn register(&mut self, name: &str, wrapped: bool);
}
