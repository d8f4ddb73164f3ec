use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// Transient user-facing feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Success)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Info)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Error)
    }

    fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }
}

/// Fire-and-forget notification target.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Logs notifications through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Success | Severity::Info => {
                tracing::info!(title = %n.title, "{}", n.description)
            }
            Severity::Error => tracing::error!(title = %n.title, "{}", n.description),
        }
    }
}

/// Prints notifications to stderr for the terminal front end.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, n: Notification) {
        let marker = match n.severity {
            Severity::Success => "ok",
            Severity::Info => "note",
            Severity::Error => "error",
        };
        tracing::debug!(title = %n.title, severity = ?n.severity, "notification");
        eprintln!("[{marker}] {}: {}", n.title, n.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_severity() {
        assert_eq!(Notification::success("a", "b").severity, Severity::Success);
        assert_eq!(Notification::info("a", "b").severity, Severity::Info);
        assert_eq!(Notification::error("a", "b").severity, Severity::Error);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Notification::error("Save failed", "disk full")).unwrap();
        assert!(json.contains(r#""severity":"error""#));
    }

    #[test]
    fn sinks_are_object_safe() {
        let sinks: Vec<Box<dyn NotificationSink>> = vec![Box::new(TracingSink), Box::new(ConsoleSink)];
        for sink in &sinks {
            sink.notify(Notification::info("Heads up", "nothing to see"));
        }
    }
}
