// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ChangeEvent;
use tokio::sync::broadcast;
use tracing::debug;

/// Maximum number of events to buffer in the broadcast channel.
/// If subscribers cannot keep up, older events will be dropped.
pub const EVENT_BUFFER_SIZE: usize = 100;

/// Publish/subscribe channel for change events.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast`. Publishing
/// never blocks and never fails; events sent while nobody is subscribed are
/// dropped.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    /// The broadcast channel sender.
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    /// Creates a new notifier with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(EVENT_BUFFER_SIZE)
    }

    /// Creates a new notifier buffering up to `capacity` events per subscriber.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current subscribers.
    pub fn notify(&self, event: &ChangeEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Published change event");
            }
            Err(_) => {
                debug!(?event, "No subscribers for change event");
            }
        }
    }

    /// Subscribes to the event stream.
    ///
    /// Returns a receiver that will receive all future events.
    /// Events sent before subscription are not received.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
