//! # Script Replay
//!
//! Drives a [`Navigation`] from a plain-text script, one step per line.
//! Navigation calls go straight to the controller; host events go through
//! the sequenced event channel and are dispatched right away, so a script
//! reads as the interleaving a real host would produce.
//!
//! ```text
//! launched
//! navigate main/B {"id": 7}
//! appear main/B
//! back
//! drawer open
//! modal-dismissed auth/Login 1
//! # comments and blank lines are skipped
//! ```

use std::fmt;
use std::str::FromStr;

use log::{debug, info, warn};

use crate::core::{Navigation, NavigationError};
use crate::host::event::{HostEvent, HostEventReceiver, HostEventSender};
use crate::host::layout::Props;
use crate::host::Host;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerAction {
    Open,
    Close,
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Navigate { path: String, props: Props },
    Back,
    DismissModal,
    DismissAllModals,
    DismissOverlay(String),
    PopToRoot,
    Drawer(DrawerAction),
    Event(HostEvent),
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    UnknownStep(String),
    MissingArgument { step: &'static str, argument: &'static str },
    InvalidArgument { step: &'static str, value: String },
    /// A parse error, tagged with its 1-based script line.
    Line { line: usize, error: Box<ReplayError> },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::UnknownStep(step) => write!(f, "unknown step '{step}'"),
            ReplayError::MissingArgument { step, argument } => {
                write!(f, "'{step}' needs a {argument}")
            }
            ReplayError::InvalidArgument { step, value } => {
                write!(f, "invalid argument '{value}' for '{step}'")
            }
            ReplayError::Line { line, error } => write!(f, "line {line}: {error}"),
        }
    }
}

impl std::error::Error for ReplayError {}

// ============================================================================
// Parsing
// ============================================================================

fn required<'a>(
    value: Option<&'a str>,
    step: &'static str,
    argument: &'static str,
) -> Result<&'a str, ReplayError> {
    value.ok_or(ReplayError::MissingArgument { step, argument })
}

fn number<T: FromStr>(value: &str, step: &'static str) -> Result<T, ReplayError> {
    value
        .parse()
        .map_err(|_| ReplayError::InvalidArgument { step, value: value.to_string() })
}

impl FromStr for Step {
    type Err = ReplayError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };

        let step = match word {
            "navigate" => {
                let rest = required(rest, "navigate", "path")?;
                let (path, props) = match rest.split_once(char::is_whitespace) {
                    Some((path, json)) => {
                        let props = serde_json::from_str::<Props>(json.trim()).map_err(|_| {
                            ReplayError::InvalidArgument { step: "navigate", value: json.trim().to_string() }
                        })?;
                        (path, props)
                    }
                    None => (rest, Props::new()),
                };
                Step::Navigate { path: path.to_string(), props }
            }
            "back" => Step::Back,
            "dismiss-modal" => Step::DismissModal,
            "dismiss-all-modals" => Step::DismissAllModals,
            "dismiss-overlay" => Step::DismissOverlay(required(rest, "dismiss-overlay", "key")?.to_string()),
            "pop-to-root" => Step::PopToRoot,
            "drawer" => match required(rest, "drawer", "action")? {
                "open" => Step::Drawer(DrawerAction::Open),
                "close" => Step::Drawer(DrawerAction::Close),
                "toggle" => Step::Drawer(DrawerAction::Toggle),
                other => {
                    return Err(ReplayError::InvalidArgument { step: "drawer", value: other.to_string() });
                }
            },
            "launched" => Step::Event(HostEvent::AppLaunched),
            "appear" => Step::Event(HostEvent::appeared(required(rest, "appear", "component id")?)),
            "disappear" => Step::Event(HostEvent::disappeared(required(rest, "disappear", "component id")?)),
            "modal-dismissed" => {
                let rest = required(rest, "modal-dismissed", "component id")?;
                let mut parts = rest.split_whitespace();
                let component_id = parts.next().unwrap_or_default().to_string();
                let modals_dismissed = match parts.next() {
                    Some(n) => number(n, "modal-dismissed")?,
                    None => 1,
                };
                Step::Event(HostEvent::ModalDismissed { component_id, modals_dismissed })
            }
            "tab-selected" => {
                let rest = required(rest, "tab-selected", "tab index")?;
                let mut parts = rest.split_whitespace();
                let selected = number(parts.next().unwrap_or_default(), "tab-selected")?;
                let unselected = match parts.next() {
                    Some(n) => number(n, "tab-selected")?,
                    None => selected,
                };
                Step::Event(HostEvent::BottomTabSelected { selected, unselected })
            }
            other => return Err(ReplayError::UnknownStep(other.to_string())),
        };
        Ok(step)
    }
}

/// Parses a whole script, skipping blank lines and `#` comments.
pub fn parse_script(script: &str) -> Result<Vec<Step>, ReplayError> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            line.parse()
                .map_err(|error| ReplayError::Line { line: i + 1, error: Box::new(error) })
        })
        .collect()
}

// ============================================================================
// Running
// ============================================================================

/// What happened over a replay.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub events: usize,
    /// Navigation errors, by step index. Replay keeps going after them.
    pub failures: Vec<(usize, NavigationError)>,
}

/// Runs one step. Events are sent through `tx` and drained from `rx`.
pub fn apply<H: Host>(
    nav: &mut Navigation<H>,
    step: &Step,
    tx: &HostEventSender,
    rx: &mut HostEventReceiver,
) -> Result<usize, NavigationError> {
    debug!("Replay step {:?}", step);
    match step {
        Step::Navigate { path, props } => nav.navigate(path, props)?,
        Step::Back => {
            if !nav.go_back() {
                info!("Back had nothing to go back to");
            }
        }
        Step::DismissModal => nav.dismiss_modal()?,
        Step::DismissAllModals => nav.dismiss_all_modals(),
        Step::DismissOverlay(key) => nav.dismiss_overlay(key)?,
        Step::PopToRoot => nav.pop_to_root()?,
        Step::Drawer(DrawerAction::Open) => nav.open_drawer()?,
        Step::Drawer(DrawerAction::Close) => nav.close_drawer()?,
        Step::Drawer(DrawerAction::Toggle) => nav.toggle_drawer()?,
        Step::Event(event) => {
            tx.send(event.clone())?;
            return Ok(nav.drain(rx));
        }
    }
    Ok(0)
}

/// Runs every step in order. Mounts the root on the first launch event,
/// the way an app mounts once the host is ready.
pub fn run<H: Host>(
    nav: &mut Navigation<H>,
    steps: &[Step],
    tx: &HostEventSender,
    rx: &mut HostEventReceiver,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    let mut mounted = false;
    for (index, step) in steps.iter().enumerate() {
        summary.steps += 1;
        match apply(nav, step, tx, rx) {
            Ok(events) => summary.events += events,
            Err(err) => {
                warn!("Step {} failed: {}", index + 1, err);
                summary.failures.push((index, err));
            }
        }
        if !mounted && nav.is_launched() {
            mounted = true;
            if let Err(err) = nav.mount(&Props::new()) {
                warn!("Initial mount failed: {}", err);
                summary.failures.push((index, err));
            }
        }
    }
    info!(
        "Replayed {} steps, {} events, {} failures",
        summary.steps,
        summary.events,
        summary.failures.len()
    );
    summary
}
