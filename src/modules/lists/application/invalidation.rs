use crate::log_debug;
use crate::modules::lists::domain::ListEvent;
use tokio::sync::broadcast;

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Fan-out of list mutations to whatever renders list views.
///
/// Publishing never fails: with no subscribers the event is simply dropped,
/// and lagging subscribers lose the oldest events rather than blocking writers.
#[derive(Debug, Clone)]
pub struct ViewInvalidator {
    sender: broadcast::Sender<ListEvent>,
}

impl ViewInvalidator {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: ListEvent) {
        match self.sender.send(event) {
            Ok(receivers) => log_debug!("List event delivered to {} subscriber(s)", receivers),
            Err(broadcast::error::SendError(event)) => {
                log_debug!("No subscribers for list event on list {}", event.list_id())
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ListEvent> {
        self.sender.subscribe()
    }
}

impl Default for ViewInvalidator {
    fn default() -> Self {
        Self::new()
    }
}
