use super::event::{Event, WorkflowEvent};
use super::EventConsumer;
use crate::sync::Arc;
use crossbeam::deque::{Injector, Worker};

/// A multi-producer queue of [Event]s. Cloning a channel gives another handle on the same
/// queue.
#[derive(Clone, Debug, Default)]
pub struct EventChannel {
    bus: Arc<Injector<Event>>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bus.is_empty()
    }

    pub fn send<E>(&self, event: E)
    where
        E: Into<Event>,
    {
        self.bus.push(event.into())
    }

    /// Tell consumers no more events will follow.
    pub fn shutdown(&self) {
        self.send(WorkflowEvent::Shutdown)
    }

    pub fn consumer(&self) -> EventConsumer {
        EventConsumer::new(self.bus.clone(), Worker::new_fifo())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_channel_is_empty() {
        let ec = EventChannel::new();
        assert!(ec.is_empty());
        assert!(ec.consumer().is_empty());
    }

    #[quickcheck]
    fn consumers_see_sent_events(event: Event) {
        let ec = EventChannel::new();
        let c = ec.consumer();
        ec.send(event);
        assert!(!c.is_empty());
    }

    #[quickcheck]
    fn consumers_fetch_before_popping(event: Event) {
        let ec = EventChannel::new();
        let c = ec.consumer();
        ec.send(event.clone());
        assert!(c.pop().is_none());
        c.fetch();
        assert_matches!(c.pop(), Some(e) if e == event);
        assert!(c.pop().is_none());
    }

    #[quickcheck]
    fn events_arrive_in_the_order_they_were_sent(events: Vec<Event>) {
        let ec = EventChannel::new();
        let c = ec.consumer();

        for event in &events {
            ec.send(event.clone());
        }

        assert_eq!(c.drain(), events);
        assert!(ec.is_empty());
        assert!(c.pop().is_none());
    }

    #[test]
    fn shutdown_is_the_last_event() {
        let ec = EventChannel::new();
        let c = ec.consumer();
        ec.send(Event::Noop);
        ec.shutdown();
        assert_eq!(
            c.drain().last(),
            Some(&Event::WorkflowEvent(WorkflowEvent::Shutdown))
        );
    }
}
