//! `tracing` subscriber setup.
//!
//! In the browser every event is forwarded to `console.{log,warn,error}`;
//! elsewhere a plain `fmt` layer writes to stderr. [`init`] may be called
//! more than once; only the first call installs anything.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber. Returns false if one was already set.
pub fn init(max_level: Level) -> bool {
    let registry = tracing_subscriber::registry().with(LevelFilter::from_level(max_level));

    #[cfg(target_arch = "wasm32")]
    let registry = registry.with(ConsoleLayer::new(write_to_console));

    #[cfg(not(target_arch = "wasm32"))]
    let registry = registry.with(tracing_subscriber::fmt::layer().with_target(false));

    registry.try_init().is_ok()
}

#[cfg(target_arch = "wasm32")]
fn write_to_console(level: Level, line: &str) {
    let msg = js_sys::JsString::from(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&msg),
        Level::WARN => web_sys::console::warn_1(&msg),
        _ => web_sys::console::log_1(&msg),
    }
}

/// Forwards each event as one formatted line to `write`.
pub struct ConsoleLayer<W> {
    write: W,
}

impl<W> ConsoleLayer<W>
where
    W: Fn(Level, &str) + Send + Sync + 'static,
{
    pub fn new(write: W) -> Self {
        Self { write }
    }
}

impl<S, W> Layer<S> for ConsoleLayer<W>
where
    S: Subscriber,
    W: Fn(Level, &str) + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        let mut line = LineVisitor::default();
        event.record(&mut line);
        (self.write)(level, &format!("[{}] {}{}", level, line.message, line.fields));
    }
}

/// Collects `message` separately from the structured fields.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn capture() -> (Arc<Mutex<Vec<(Level, String)>>>, impl Fn(Level, &str) + Send + Sync + 'static) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = lines.clone();
        let write = move |level: Level, line: &str| {
            sink.lock().unwrap().push((level, line.to_string()));
        };
        (lines, write)
    }

    #[test]
    fn console_layer_formats_message_and_fields() {
        let (lines, write) = capture();
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new(write));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(event = "save_failed", level = 3, "could not save");
        });
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        let (level, line) = &lines[0];
        assert_eq!(*level, Level::WARN);
        assert!(line.starts_with("[WARN] could not save"));
        assert!(line.contains("event=save_failed"));
        assert!(line.contains("level=3"));
    }

    #[test]
    fn level_filter_drops_verbose_events() {
        let (lines, write) = capture();
        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::from_level(Level::INFO))
            .with(ConsoleLayer::new(write));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden");
            tracing::info!("shown");
        });
        assert_eq!(lines.lock().unwrap().len(), 1);
    }

    #[test]
    fn init_is_idempotent() {
        init(Level::DEBUG);
        assert!(!init(Level::DEBUG));
    }
}
