//! # Host Events
//!
//! Lifecycle notifications flowing from the host back to the controller.
//!
//! Events travel through a typed channel. The sending side stamps each
//! event with a monotonically increasing sequence number, so the receiving
//! controller can detect and reject anything delivered out of order: the
//! history resync logic is only correct when events are processed in
//! emission order.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::error::NavigationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    /// The host finished its launch sequence. Fires once per (re)launch.
    AppLaunched,
    ComponentDidAppear { component_id: String },
    ComponentDidDisappear { component_id: String },
    /// A modal was closed by the platform (hardware back, swipe), not by us.
    ModalDismissed { component_id: String, modals_dismissed: u32 },
    /// The user tapped a bottom tab.
    BottomTabSelected { selected: usize, unselected: usize },
}

/// Discriminant of [`HostEvent`], used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AppLaunched,
    ComponentDidAppear,
    ComponentDidDisappear,
    ModalDismissed,
    BottomTabSelected,
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::AppLaunched => EventKind::AppLaunched,
            HostEvent::ComponentDidAppear { .. } => EventKind::ComponentDidAppear,
            HostEvent::ComponentDidDisappear { .. } => EventKind::ComponentDidDisappear,
            HostEvent::ModalDismissed { .. } => EventKind::ModalDismissed,
            HostEvent::BottomTabSelected { .. } => EventKind::BottomTabSelected,
        }
    }

    pub fn appeared(id: &str) -> Self {
        HostEvent::ComponentDidAppear { component_id: id.to_string() }
    }

    pub fn disappeared(id: &str) -> Self {
        HostEvent::ComponentDidDisappear { component_id: id.to_string() }
    }
}

/// A host event plus its position in the emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEnvelope {
    pub seq: u64,
    pub event: HostEvent,
}

/// Creates a sequenced event channel. Sequence numbers start at 1.
pub fn channel() -> (HostEventSender, HostEventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        HostEventSender { tx, next_seq: Arc::new(AtomicU64::new(0)) },
        HostEventReceiver { rx },
    )
}

/// Host-side handle. Cloning shares the sequence counter.
#[derive(Debug, Clone)]
pub struct HostEventSender {
    tx: UnboundedSender<EventEnvelope>,
    next_seq: Arc<AtomicU64>,
}

impl HostEventSender {
    /// Stamps and sends an event, returning its sequence number.
    pub fn send(&self, event: HostEvent) -> Result<u64, NavigationError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx
            .send(EventEnvelope { seq, event })
            .map_err(|_| NavigationError::ChannelClosed)?;
        Ok(seq)
    }
}

#[derive(Debug)]
pub struct HostEventReceiver {
    rx: UnboundedReceiver<EventEnvelope>,
}

impl HostEventReceiver {
    /// Returns the next pending envelope without waiting.
    pub fn try_recv(&mut self) -> Option<EventEnvelope> {
        self.rx.try_recv().ok()
    }
}

/// Anything that yields host events in emission order.
#[async_trait]
pub trait EventSource: Send {
    /// Waits for the next event. `None` once the source is exhausted.
    async fn next_event(&mut self) -> Option<EventEnvelope>;
}

#[async_trait]
impl EventSource for HostEventReceiver {
    async fn next_event(&mut self) -> Option<EventEnvelope> {
        self.rx.recv().await
    }
}

/// A pre-recorded sequence of envelopes, replayed as-is.
#[async_trait]
impl EventSource for VecDeque<EventEnvelope> {
    async fn next_event(&mut self) -> Option<EventEnvelope> {
        self.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_are_monotonic_across_clones() {
        let (tx, mut rx) = channel();
        let tx2 = tx.clone();
        assert_eq!(tx.send(HostEvent::AppLaunched).unwrap(), 1);
        assert_eq!(tx2.send(HostEvent::appeared("main/A")).unwrap(), 2);
        assert_eq!(rx.try_recv().unwrap().seq, 1);
        let second = rx.try_recv().unwrap();
        assert_eq!(second.seq, 2);
        assert_eq!(second.event.kind(), EventKind::ComponentDidAppear);
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (tx, rx) = channel();
        drop(rx);
        assert_eq!(tx.send(HostEvent::AppLaunched), Err(NavigationError::ChannelClosed));
    }

    #[tokio::test]
    async fn test_receiver_as_event_source() {
        let (tx, mut rx) = channel();
        tx.send(HostEvent::disappeared("main/B")).unwrap();
        drop(tx);
        let envelope = rx.next_event().await.unwrap();
        assert_eq!(envelope.event, HostEvent::disappeared("main/B"));
        assert!(rx.next_event().await.is_none());
    }
}
