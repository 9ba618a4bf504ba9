use super::event::Event;
use crate::sync::Arc;
use crossbeam::deque::{Injector, Steal, Worker};

/// The receiving end of an [super::EventChannel]. Events are moved in batches from the shared
/// queue into a local one with [EventConsumer::fetch], and then popped from there.
pub struct EventConsumer {
    channel: Arc<Injector<Event>>,
    queue: Worker<Event>,
}

impl EventConsumer {
    pub fn new(channel: Arc<Injector<Event>>, queue: Worker<Event>) -> Self {
        Self { channel, queue }
    }

    pub fn fetch(&self) {
        let _steal = self.channel.steal_batch(&self.queue);
    }

    pub fn pop(&self) -> Option<Event> {
        self.queue.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.fetch();
        self.queue.is_empty()
    }

    /// Take every event currently queued.
    pub fn drain(&self) -> Vec<Event> {
        let mut events = vec![];
        loop {
            while let Some(event) = self.queue.pop() {
                events.push(event);
            }
            match self.channel.steal_batch(&self.queue) {
                Steal::Retry => continue,
                Steal::Success(()) => continue,
                Steal::Empty => break,
            }
        }
        events
    }
}

impl Iterator for &EventConsumer {
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        self.pop()
    }
}
