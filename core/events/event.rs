use crate::connector::TransferErrorKind;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RequestType {
    Get,
    Put,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// What is being transferred, and where to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransferResource {
    pub repository_url: Url,
    pub resource_name: String,
    pub file: PathBuf,
}

impl fmt::Display for TransferResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.repository_url, self.resource_name)
    }
}

/// A self-contained copy of a transfer error, so events can be cloned and sent across threads
/// freely.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventError {
    pub kind: TransferErrorKind,
    pub message: String,
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransferEventType {
    Initiated,
    Started,
    Progressed { data: Arc<[u8]>, offset: u64 },
    Corrupted { error: EventError },
    Succeeded,
    Failed { error: EventError },
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransferEvent {
    pub request_type: RequestType,
    pub event_type: TransferEventType,
    pub resource: TransferResource,

    /// Bytes transferred so far, including the data carried by this event.
    pub transferred_bytes: u64,
}

impl TransferEvent {
    pub fn new(
        request_type: RequestType,
        event_type: TransferEventType,
        resource: TransferResource,
        transferred_bytes: u64,
    ) -> Self {
        Self {
            request_type,
            event_type,
            resource,
            transferred_bytes,
        }
    }

    pub fn data_length(&self) -> usize {
        match &self.event_type {
            TransferEventType::Progressed { data, .. } => data.len(),
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkflowEvent {
    Shutdown,
}

#[derive(Default, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Event {
    /// The "nothing happened" event.
    #[default]
    Noop,
    TransferEvent(TransferEvent),
    WorkflowEvent(WorkflowEvent),
}

impl From<TransferEvent> for Event {
    fn from(value: TransferEvent) -> Self {
        Event::TransferEvent(value)
    }
}

impl From<WorkflowEvent> for Event {
    fn from(value: WorkflowEvent) -> Self {
        Event::WorkflowEvent(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl quickcheck::Arbitrary for Event {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let resource = TransferResource {
                repository_url: Url::parse("file:///tmp/repo/").unwrap(),
                resource_name: String::arbitrary(g),
                file: PathBuf::from(String::arbitrary(g)),
            };
            let data: Vec<u8> = Vec::arbitrary(g);
            let progressed = TransferEvent::new(
                RequestType::Get,
                TransferEventType::Progressed {
                    offset: u64::arbitrary(g),
                    data: data.into(),
                },
                resource.clone(),
                u64::arbitrary(g),
            );
            let started =
                TransferEvent::new(RequestType::Put, TransferEventType::Started, resource, 0);

            g.choose(&[
                Self::Noop,
                progressed.into(),
                started.into(),
                WorkflowEvent::Shutdown.into(),
            ])
            .unwrap()
            .clone()
        }
    }

    #[test]
    fn only_progress_carries_data() {
        let resource = TransferResource {
            repository_url: Url::parse("file:///tmp/repo/").unwrap(),
            resource_name: "g:a:1.0".to_string(),
            file: PathBuf::from("/tmp/a.jar"),
        };
        let progressed = TransferEvent::new(
            RequestType::Get,
            TransferEventType::Progressed {
                data: vec![1, 2, 3].into(),
                offset: 0,
            },
            resource.clone(),
            3,
        );
        assert_eq!(progressed.data_length(), 3);

        let done = TransferEvent::new(RequestType::Get, TransferEventType::Succeeded, resource, 3);
        assert_eq!(done.data_length(), 0);
        assert_eq!(done.resource.to_string(), "file:///tmp/repo/g:a:1.0");
    }
}
