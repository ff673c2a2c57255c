use std::fmt;

/// Errors raised by navigation operations.
///
/// None of these are retried. `NoBackRoute` is the only one absorbed
/// internally (by switch, tabs and root navigators trying one level up);
/// everything else reaches the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// A path segment or key is not in a navigator's route table.
    UnknownRoute(String),
    /// Nothing left to go back to in the named navigator.
    NoBackRoute { navigator: String },
    /// `dismiss_modal` with no modal presented.
    NoModalToDismiss,
    /// The route definition violates a navigator's structural constraints.
    InvalidConfiguration(String),
    /// An event arrived with a sequence number at or below one already processed.
    StaleEvent { seq: u64, last: u64 },
    /// The event channel's other half is gone.
    ChannelClosed,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::UnknownRoute(key) => write!(f, "unknown route: {key}"),
            NavigationError::NoBackRoute { navigator } => {
                write!(f, "no route to navigate back to in '{navigator}'")
            }
            NavigationError::NoModalToDismiss => write!(f, "no modal to dismiss"),
            NavigationError::InvalidConfiguration(msg) => {
                write!(f, "invalid route configuration: {msg}")
            }
            NavigationError::StaleEvent { seq, last } => {
                write!(f, "stale event #{seq} (already processed #{last})")
            }
            NavigationError::ChannelClosed => write!(f, "event channel closed"),
        }
    }
}

impl std::error::Error for NavigationError {}

impl NavigationError {
    pub fn is_no_back_route(&self) -> bool {
        matches!(self, NavigationError::NoBackRoute { .. })
    }
}
