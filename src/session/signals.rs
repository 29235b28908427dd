//! Subscription registry for external signals.
//!
//! Collaborators publish [`Event`]s into a [`SignalHub`]; subscribers register
//! a handler per [`Topic`] and get a [`Subscription`] back. Dropping the
//! registry entry requires handing that subscription back to
//! [`SignalHub::unsubscribe`], so whoever subscribed is the one who releases.

use super::events::{Event, Topic};

type Handler = Box<dyn FnMut(&Event) + Send>;

/// Handle returned by [`SignalHub::subscribe`].
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping a subscription leaks its handler until the hub is dropped"]
pub struct Subscription {
    id: u64,
    topic: Topic,
}

impl Subscription {
    #[must_use]
    pub const fn topic(&self) -> Topic {
        self.topic
    }
}

#[derive(Default)]
pub struct SignalHub {
    next_id: u64,
    handlers: Vec<(u64, Topic, Handler)>,
}

impl SignalHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every event published under `topic`.
    pub fn subscribe<F>(&mut self, topic: Topic, handler: F) -> Subscription
    where
        F: FnMut(&Event) + Send + 'static,
    {
        self.next_id += 1;
        let id = self.next_id;
        self.handlers.push((id, topic, Box::new(handler)));
        tracing::trace!(id, ?topic, "subscribed");
        Subscription { id, topic }
    }

    /// Releases `subscription`. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(id, _, _)| *id != subscription.id);
        let removed = self.handlers.len() != before;
        tracing::trace!(id = subscription.id, removed, "unsubscribed");
        removed
    }

    /// Delivers `event` to the handlers of its topic, in subscription order.
    ///
    /// Returns the number of handlers that saw it.
    pub fn publish(&mut self, event: &Event) -> usize {
        let topic = event.topic();
        let mut delivered = 0;
        for (_, _, handler) in self.handlers.iter_mut().filter(|(_, t, _)| *t == topic) {
            handler(event);
            delivered += 1;
        }
        if delivered == 0 {
            tracing::debug!(?topic, "signal dropped, no subscribers");
        }
        delivered
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for SignalHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalHub")
            .field("subscribers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn publish_routes_by_topic() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut hub = SignalHub::new();

        let sink = Arc::clone(&seen);
        let focus = hub.subscribe(Topic::Window, move |event| {
            sink.lock().unwrap().push(event.clone());
        });

        assert_eq!(hub.publish(&Event::FocusChanged { focused: false }), 1);
        assert_eq!(hub.publish(&Event::Summon), 0);
        assert_eq!(*seen.lock().unwrap(), [Event::FocusChanged { focused: false }]);

        assert!(hub.unsubscribe(focus));
        assert_eq!(hub.publish(&Event::FocusChanged { focused: true }), 0);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
