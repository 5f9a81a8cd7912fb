//! State every component of one engine shares

use clipper_events::{EventEmitter, EventSender};

use crate::store::StateStore;

#[derive(Debug)]
pub(crate) struct Shared<B> {
    pub(crate) backend: B,
    pub(crate) store: StateStore,
    events: Option<EventSender>,
}

impl<B> Shared<B> {
    pub(crate) fn new(backend: B, events: Option<EventSender>) -> Self {
        Self {
            backend,
            store: StateStore::default(),
            events,
        }
    }
}

impl<B> EventEmitter for Shared<B> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }
}
