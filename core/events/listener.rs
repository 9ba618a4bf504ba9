use super::event::{TransferEvent, TransferEventType};
use super::EventChannel;
use std::fmt::Debug;
use std::sync::Mutex;
use tracing::{debug, trace};

/// Anything that wants to hear about the progress of transfers.
pub trait TransferListener: Send + Sync + Debug {
    fn on_event(&self, event: TransferEvent);
}

impl TransferListener for EventChannel {
    fn on_event(&self, event: TransferEvent) {
        self.send(event)
    }
}

/// Logs transfer events and keeps nothing. This is where transfer events go unless a session
/// asks for something else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTransferListener;

impl TransferListener for LoggingTransferListener {
    fn on_event(&self, event: TransferEvent) {
        match &event.event_type {
            TransferEventType::Progressed { .. } => trace!(
                "{} {}: {} bytes",
                event.request_type,
                event.resource,
                event.transferred_bytes
            ),
            TransferEventType::Corrupted { error } | TransferEventType::Failed { error } => {
                debug!("{} {}: {}", event.request_type, event.resource, error)
            }
            other => debug!("{} {}: {:?}", event.request_type, event.resource, other),
        }
    }
}

/// Keeps every event it hears about, in order.
#[derive(Debug, Default)]
pub struct RecordingTransferListener {
    events: Mutex<Vec<TransferEvent>>,
}

impl RecordingTransferListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TransferEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl TransferListener for RecordingTransferListener {
    fn on_event(&self, event: TransferEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
