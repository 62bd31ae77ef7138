//! Broadcast-backed change-notification feed.

use async_trait::async_trait;
use taleweaver_interface::{ChangeFeed, EventFilter, StoryEvent, Subscription};
use tokio::sync::broadcast;
use tracing::{debug, warn};

const FEED_CAPACITY: usize = 256;

/// In-process publish/subscribe channel keyed by record identity.
///
/// The feed carries forward deltas only; it is not a replay log.
/// Subscribers must fetch current state after subscribing.
#[derive(Debug, Clone)]
pub struct BroadcastChangeFeed {
    tx: broadcast::Sender<StoryEvent>,
}

impl BroadcastChangeFeed {
    /// Create a new feed with the default buffer capacity.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }
}

impl Default for BroadcastChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed for BroadcastChangeFeed {
    fn subscribe(&self, filter: EventFilter) -> Box<dyn Subscription> {
        debug!(?filter, "Registering feed subscription");
        Box::new(BroadcastSubscription {
            rx: self.tx.subscribe(),
            filter,
        })
    }

    fn publish(&self, event: StoryEvent) {
        // A send error only means there are no live subscribers.
        let receivers = self.tx.send(event).unwrap_or(0);
        debug!(receivers, "Published story event");
    }
}

/// A live registration on the broadcast feed.
///
/// Dropping the subscription releases the registration; `unsubscribe`
/// simply makes that release explicit.
struct BroadcastSubscription {
    rx: broadcast::Receiver<StoryEvent>,
    filter: EventFilter,
}

#[async_trait]
impl Subscription for BroadcastSubscription {
    async fn next_event(&mut self) -> Option<StoryEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Overrun events are dropped, never replayed; the
                    // subscriber's view stays stale until the next
                    // matching event arrives.
                    warn!(skipped, "Subscription lagged behind the feed");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    fn unsubscribe(self: Box<Self>) {
        debug!(filter = ?self.filter, "Releasing feed subscription");
    }
}
