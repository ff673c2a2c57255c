//! Typed subscriptions to host events.
//!
//! Each navigator declares the event kinds it handles. Subscriptions are
//! created when it mounts and released when it unmounts; a token that is
//! not released keeps delivering events to a torn-down navigator.

use crate::core::tree::NodeId;
use crate::host::event::EventKind;

/// Opaque subscription token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Debug, Default)]
pub struct Listeners {
    next: u64,
    entries: Vec<(Subscription, EventKind, NodeId)>,
}

impl Listeners {
    pub fn subscribe(&mut self, kind: EventKind, node: NodeId) -> Subscription {
        self.next += 1;
        let token = Subscription(self.next);
        self.entries.push((token, kind, node));
        token
    }

    /// Returns false if the token was already released.
    pub fn release(&mut self, token: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(t, _, _)| *t != token);
        self.entries.len() != before
    }

    /// Subscribed nodes for `kind`, in subscription order.
    pub fn subscribers(&self, kind: EventKind) -> Vec<NodeId> {
        self.entries
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, node)| *node)
            .collect()
    }

    pub fn is_subscribed(&self, kind: EventKind, node: NodeId) -> bool {
        self.entries.iter().any(|(_, k, n)| *k == kind && *n == node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_release() {
        let mut bus = Listeners::default();
        let a = bus.subscribe(EventKind::ComponentDidAppear, NodeId(1));
        let b = bus.subscribe(EventKind::ComponentDidAppear, NodeId(2));
        bus.subscribe(EventKind::ModalDismissed, NodeId(0));
        assert_eq!(bus.subscribers(EventKind::ComponentDidAppear), [NodeId(1), NodeId(2)]);

        assert!(bus.release(a));
        assert!(!bus.release(a));
        assert_eq!(bus.subscribers(EventKind::ComponentDidAppear), [NodeId(2)]);
        assert!(bus.is_subscribed(EventKind::ComponentDidAppear, NodeId(2)));
        bus.release(b);
        assert_eq!(bus.len(), 1);
    }
}
