use crate::events::model::{
    CommandEvent, CommandOutcome, EventMeta, LogEvent, LogLevel, SessionEvent, SystemEvent,
};
use crate::events::sink::LogSink;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::mpsc;
use uuid::Uuid;

static DISPATCHER: OnceCell<EventDispatcher> = OnceCell::new();

pub struct EventDispatcher {
    pub tx: mpsc::Sender<LogEvent>,
    pub run_id: String,
    sinks: RwLock<Vec<Arc<dyn LogSink>>>,
}

impl EventDispatcher {
    pub fn global() -> Option<&'static EventDispatcher> {
        DISPATCHER.get()
    }
    pub fn register_sink(&self, sink: Arc<dyn LogSink>) {
        self.sinks.write().push(sink);
    }
}

/// Install the process-wide dispatcher. Only the first call wins; later calls
/// register their sinks on the existing dispatcher.
pub async fn init_events(sinks: Vec<Arc<dyn LogSink>>, capacity: usize) {
    if let Some(existing) = EventDispatcher::global() {
        for sink in sinks {
            existing.register_sink(sink);
        }
        return;
    }
    let (tx, mut rx) = mpsc::channel::<LogEvent>(capacity);
    let dispatcher = EventDispatcher {
        tx,
        run_id: Uuid::new_v4().to_string(),
        sinks: RwLock::new(sinks),
    };
    let _ = DISPATCHER.set(dispatcher);
    tokio::spawn(async move {
        while let Some(evt) = rx.recv().await {
            if let Some(d) = EventDispatcher::global() {
                let sinks = d.sinks.read().clone();
                for sink in sinks {
                    sink.handle(&evt).await;
                }
            }
        }
    });
}

pub fn correlation_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

pub fn meta(component: &'static str, level: LogLevel) -> EventMeta {
    let run_id = EventDispatcher::global()
        .map(|d| d.run_id.clone())
        .unwrap_or_else(|| "unknown".into());
    EventMeta {
        ts: SystemTime::now(),
        level,
        corr_id: None,
        run_id,
        component,
        suppress_console: false,
    }
}

pub fn emit(event: LogEvent) {
    if let Some(d) = EventDispatcher::global() {
        let _ = d.tx.try_send(event);
    }
}

pub fn emit_session(
    level: LogLevel,
    action: &str,
    peer: Option<String>,
    detail: Option<String>,
) {
    let mut meta = meta("session", level);
    meta.corr_id = Some(correlation_id());
    emit(LogEvent::Session(SessionEvent {
        meta,
        action: action.to_string(),
        peer,
        detail,
    }));
}

pub fn emit_command(
    level: LogLevel,
    command: &str,
    peer: Option<String>,
    outcome: CommandOutcome,
    detail: Option<String>,
) {
    let mut meta = meta("console", level);
    meta.corr_id = Some(correlation_id());
    emit(LogEvent::Command(CommandEvent {
        meta,
        command: command.to_string(),
        peer,
        outcome,
        detail,
    }));
}

pub fn emit_system(component: &'static str, level: LogLevel, action: &str, detail: Option<String>) {
    let mut meta = meta(component, level);
    meta.corr_id = Some(correlation_id());
    emit(LogEvent::System(SystemEvent {
        meta,
        action: action.to_string(),
        detail,
    }));
}
