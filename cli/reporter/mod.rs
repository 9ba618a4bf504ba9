use depot_core::events::event::*;
use depot_core::events::{EventChannel, EventConsumer};
use human_bytes::human_bytes;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::debug;

trait Reporter {
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Noop => (),
            Event::TransferEvent(e) => self.on_transfer_event(e),
            Event::WorkflowEvent(e) => self.on_workflow_event(e),
        }
    }

    fn on_transfer_event(&mut self, _event: TransferEvent) {}
    fn on_workflow_event(&mut self, _event: WorkflowEvent) {}
}

pub struct StatusReporter {
    should_stop: bool,
    started: std::time::Instant,
    event_consumer: EventConsumer,
    pb: ProgressBar,
    uploaded: usize,
    downloaded: usize,
    failed: usize,
    corrupted: usize,
}

impl StatusReporter {
    pub fn new(event_channel: Arc<EventChannel>) -> StatusReporter {
        let style = ProgressStyle::default_spinner().template("{prefix:>12.cyan.bold} {wide_msg}");

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.set_prefix("Transferring");

        StatusReporter {
            should_stop: false,
            started: std::time::Instant::now(),
            event_consumer: event_channel.consumer(),
            pb,
            uploaded: 0,
            downloaded: 0,
            failed: 0,
            corrupted: 0,
        }
    }

    pub async fn run(mut self) {
        let handle = std::thread::spawn(move || loop {
            self.event_consumer.fetch();
            if let Some(event) = self.event_consumer.pop() {
                debug!("{:?}", event);
                self.handle_event(event)
            }
            if self.should_stop {
                break;
            }
        });
        while !handle.is_finished() {
            tokio::time::sleep(std::time::Duration::from_micros(10)).await;
        }
    }
}

impl Reporter for StatusReporter {
    fn on_transfer_event(&mut self, event: TransferEvent) {
        let green_bold = console::Style::new().green().bold();
        let purple = console::Style::new().magenta().bright();
        let yellow = console::Style::new().yellow();
        let red_bold = console::Style::new().red().bold();

        let upload = event.request_type == RequestType::Put;

        match event.event_type {
            TransferEventType::Initiated => {
                let line = format!(
                    "{:>12} {}",
                    purple.apply_to(if upload { "Uploading" } else { "Downloading" }),
                    event.resource,
                );
                self.pb.println(line);
            }
            TransferEventType::Started => {
                self.pb.set_message(event.resource.to_string());
            }
            TransferEventType::Progressed { .. } => {
                self.pb.set_message(format!(
                    "{} ({})",
                    event.resource,
                    human_bytes(event.transferred_bytes as f64)
                ));
                self.pb.tick();
            }
            TransferEventType::Corrupted { error } => {
                self.corrupted += 1;
                let line = format!(
                    "{:>12} {} for {}",
                    yellow.apply_to("Warning"),
                    error,
                    event.resource,
                );
                self.pb.println(line);
            }
            TransferEventType::Succeeded => {
                if upload {
                    self.uploaded += 1;
                } else {
                    self.downloaded += 1;
                }
                let line = format!(
                    "{:>12} {} ({})",
                    green_bold.apply_to(if upload { "Uploaded" } else { "Downloaded" }),
                    event.resource,
                    human_bytes(event.transferred_bytes as f64),
                );
                self.pb.println(line);
            }
            TransferEventType::Failed { error } => {
                self.failed += 1;
                let line = format!(
                    "{:>12} to {} {}: {}",
                    red_bold.apply_to("Failed"),
                    if upload { "upload" } else { "download" },
                    event.resource,
                    error,
                );
                self.pb.println(line);
            }
        }
    }

    fn on_workflow_event(&mut self, event: WorkflowEvent) {
        let green_bold = console::Style::new().green().bold();
        let red_bold = console::Style::new().red().bold();

        match event {
            WorkflowEvent::Shutdown => {
                let line = format!(
                    "{:>12} in {}ms ({} uploaded, {} downloaded{}{})",
                    if self.failed > 0 {
                        red_bold.apply_to("Finished with errors")
                    } else {
                        green_bold.apply_to("Finished")
                    },
                    self.started.elapsed().as_millis(),
                    self.uploaded,
                    self.downloaded,
                    if self.corrupted > 0 {
                        format!(", {} corrupted", self.corrupted)
                    } else {
                        "".into()
                    },
                    if self.failed > 0 {
                        format!(", {} failed", self.failed)
                    } else {
                        "".into()
                    }
                );
                self.pb.println(line);
                self.pb.finish_and_clear();
                self.should_stop = true;
            }
        }
    }
}
