use tokio::sync::mpsc::UnboundedSender;

use crate::app_event::AppEvent;

#[derive(Clone, Debug)]
pub(crate) struct AppEventSender {
    tx: UnboundedSender<AppEvent>,
}

impl AppEventSender {
    pub(crate) fn new(tx: UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }

    /// Send an event, logging instead of panicking if the receiver is gone
    /// (which happens normally during shutdown).
    pub(crate) fn send(&self, event: AppEvent) {
        if let Err(err) = self.tx.send(event) {
            tracing::error!("failed to send AppEvent: {err}");
        }
    }
}
