//! In-memory `tracing` layer for instrumentation assertions.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span,
};
use tracing_subscriber::{
    Layer, Registry,
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
};

/// Layer that keeps every closed span and every event it sees.
///
/// Clones share one log, so a test can keep a handle while the subscriber
/// owns another.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    log: Arc<Mutex<Log>>,
}

#[derive(Default)]
struct Log {
    spans: Vec<SpanRecord>,
    events: Vec<EventRecord>,
}

/// A span captured when it closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from its metadata.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: HashMap<String, String>,
}

/// An emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Event level.
    pub level: Level,
    /// Event target, usually the emitting module path.
    pub target: String,
    /// Event fields; the formatted message is stored under `message`.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the formatted event message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

impl RecordingLayer {
    /// Closed spans in completion order.
    ///
    /// # Examples
    /// ```
    /// use geosurr_test_support::recording::RecordingLayer;
    ///
    /// assert!(RecordingLayer::default().spans().is_empty());
    /// ```
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.log().spans.clone()
    }

    /// Events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.log().events.clone()
    }

    /// First closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<SpanRecord> {
        self.log().spans.iter().find(|span| span.name == name).cloned()
    }

    /// Events emitted at `level`.
    #[must_use]
    pub fn events_at(&self, level: Level) -> Vec<EventRecord> {
        self.log()
            .events
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }

    /// Returns `true` when an event at `level` carried exactly `message`.
    #[must_use]
    pub fn has_event(&self, level: Level, message: &str) -> bool {
        self.log()
            .events
            .iter()
            .any(|event| event.level == level && event.message() == Some(message))
    }

    fn log(&self) -> MutexGuard<'_, Log> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs `body` with a fresh recording subscriber as the thread default and
/// returns its value together with the captured log.
///
/// # Examples
/// ```
/// use geosurr_test_support::recording::capture;
///
/// let (value, log) = capture(|| {
///     tracing::info!(answer = 42, "computed");
///     42
/// });
/// assert_eq!(value, 42);
/// assert_eq!(log.events()[0].fields["answer"], "42");
/// ```
pub fn capture<T>(body: impl FnOnce() -> T) -> (T, RecordingLayer) {
    let layer = RecordingLayer::default();
    let subscriber = Registry::default().with(layer.clone());
    let value = tracing::subscriber::with_default(subscriber, body);
    (value, layer)
}

/// Span state held in registry extensions until the span closes.
struct OpenSpan(SpanRecord);

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = HashMap::new();
        attrs.record(&mut FieldMap(&mut fields));
        span.extensions_mut().insert(OpenSpan(SpanRecord {
            name: attrs.metadata().name().to_owned(),
            fields,
        }));
    }

    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if let Some(open) = span.extensions_mut().get_mut::<OpenSpan>() {
                values.record(&mut FieldMap(&mut open.0.fields));
            }
        }
    }

    fn on_close(&self, id: span::Id, ctx: Context<'_, S>) {
        let closed = ctx
            .span(&id)
            .and_then(|span| span.extensions_mut().remove::<OpenSpan>());
        if let Some(OpenSpan(record)) = closed {
            self.log().spans.push(record);
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldMap(&mut fields));
        self.log().events.push(EventRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            fields,
        });
    }
}

struct FieldMap<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldMap<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_span_fields_after_close() {
        let ((), log) = capture(|| {
            let span = tracing::info_span!(
                "core.generate",
                nodes = 4_u64,
                rule = tracing::field::Empty,
            );
            span.record("rule", "distance");
            drop(span);
        });
        let span = log.span("core.generate").expect("span closed inside capture");
        assert_eq!(span.fields["nodes"], "4");
        assert_eq!(span.fields["rule"], "distance");
    }

    #[test]
    fn filters_events_by_level() {
        let ((), log) = capture(|| {
            tracing::warn!(edges = 1_u64, "degenerate");
            tracing::debug!("summary");
        });
        assert_eq!(log.events_at(Level::WARN).len(), 1);
        assert!(log.has_event(Level::DEBUG, "summary"));
        assert!(!log.has_event(Level::WARN, "summary"));
    }

    #[test]
    fn clones_share_one_log() {
        let layer = RecordingLayer::default();
        let handle = layer.clone();
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::with_default(subscriber, || tracing::info!("shared"));
        assert_eq!(handle.events().len(), 1);
    }
}
