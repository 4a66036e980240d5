//! Log Capture Utilities for Testing
//!
//! Provides tracing log capture and assertion utilities

use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

/// Captured log record
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Log capture layer for testing
#[derive(Clone, Default)]
pub struct LogCapture {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.records().iter().any(|r| r.message.contains(pattern))
    }

    /// Records at `level` whose message contains `pattern`
    pub fn matching_at(&self, level: Level, pattern: &str) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level && r.message.contains(pattern))
            .map(|r| r.message)
            .collect()
    }

    pub fn assert_contains(&self, pattern: &str) {
        assert!(
            self.contains(pattern),
            "Expected log matching '{}', but none found. All logs:\n{}",
            pattern,
            self.records()
                .iter()
                .map(|r| r.message.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    pub fn assert_no_match(&self, pattern: &str) {
        let matches: Vec<String> = self
            .records()
            .into_iter()
            .filter(|r| r.message.contains(pattern))
            .map(|r| r.message)
            .collect();
        assert!(
            matches.is_empty(),
            "Expected no logs matching '{}', but found {} matches:\n{}",
            pattern,
            matches.len(),
            matches.join("\n")
        );
    }
}

impl<S> tracing_subscriber::Layer<S> for LogCapture
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        use tracing::field::Visit;

        struct MessageVisitor {
            message: String,
        }

        impl Visit for MessageVisitor {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = format!("{:?}", value);
                }
            }
        }

        let mut visitor = MessageVisitor {
            message: String::new(),
        };
        event.record(&mut visitor);

        self.records.lock().unwrap().push(LogRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
        });
    }
}

/// Run `f` with a capturing subscriber installed on the current thread
///
/// The subscriber is thread-scoped, so code under test should not hand work
/// to other threads (build integrators with `with_parallel(false)`).
pub fn with_log_capture<T>(f: impl FnOnce() -> T) -> (T, LogCapture) {
    let capture = LogCapture::new();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("signblend_engine=debug"))
        .with(capture.clone());

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture)
}
