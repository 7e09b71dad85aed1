use crate::domain::Alert;

/// Where blocking startup messages go.
pub trait AlertSink: Send + Sync {
    fn alert(&self, alert: Alert);
}

/// Writes alerts to the log. The session also keeps the last one for API consumers.
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn alert(&self, alert: Alert) {
        tracing::warn!(alert = ?alert, "{}", alert.message());
    }
}
