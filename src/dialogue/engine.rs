//! Dialogue engine: per-session event processing and action execution.
//!
//! The engine owns the session store, runs the pure state machine under
//! the per-user session lock, then executes the resulting actions in
//! order through the outbound [`ReplyPort`]. All failures are absorbed at
//! the boundary of the event being processed; nothing propagates across
//! events or users.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::events::{Action, InboundEvent, TextOptions};
use super::machine::{self, retry_exit_buttons};
use super::session::SessionStore;
use crate::numerology::BirthDate;
use crate::report::{ReportData, ReportError, ReportRenderer};

const REPORT_FILE_NAME: &str = "informe-numerologico.pdf";

const REPORT_FOLLOW_UP: &str = "Aquí tienes tu informe. ¿Deseas consultar algo más?";

const REPORT_APOLOGY: &str = "Lo sentimos, no pudimos generar tu informe en este momento. \
     Por favor, inténtalo de nuevo más tarde.";

/// Outbound delivery failure, abstracted from the transport.
#[derive(Debug, Error)]
#[error("Delivery failed: {0}")]
pub struct TransportError(pub String);

/// Outbound side of the conversation, implemented by the transport
/// adapter (and by a recording mock in tests).
#[async_trait]
pub trait ReplyPort: Send + Sync {
    /// Sends a text message, optionally with formatting and inline buttons.
    async fn send_text(
        &self,
        chat_id: i64,
        body: &str,
        options: &TextOptions,
    ) -> Result<(), TransportError>;

    /// Sends a file attachment with a display name and caption.
    async fn send_document(
        &self,
        chat_id: i64,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> Result<(), TransportError>;

    /// Shows a typing indicator. Best-effort UX hint.
    async fn send_typing(&self, chat_id: i64) -> Result<(), TransportError>;
}

/// Drives conversations: one state transition per inbound event, replies
/// delivered in generation order.
pub struct DialogueEngine {
    port: Arc<dyn ReplyPort>,
    sessions: SessionStore,
    renderer: ReportRenderer,
    report_timeout: Duration,
}

impl DialogueEngine {
    /// Creates an engine over the given outbound port.
    #[must_use]
    pub fn new(port: Arc<dyn ReplyPort>, renderer: ReportRenderer, report_timeout: Duration) -> Self {
        Self {
            port,
            sessions: SessionStore::new(),
            renderer,
            report_timeout,
        }
    }

    /// Processes one inbound event for a user.
    ///
    /// Never fails: user errors are answered in-band and everything else
    /// is logged and dropped so one bad event cannot take other sessions
    /// down with it.
    pub async fn process_event(&self, user_id: u64, chat_id: i64, event: InboundEvent) {
        self.process_event_on(user_id, chat_id, event, Local::now().date_naive())
            .await;
    }

    /// Like [`Self::process_event`] with an explicit "today", so the
    /// day-number flow is deterministic under test.
    pub async fn process_event_on(
        &self,
        user_id: u64,
        chat_id: i64,
        event: InboundEvent,
        today: NaiveDate,
    ) {
        debug!("Processing event for user {}: {:?}", user_id, event);

        // The transition runs under the per-user session lock; the lock is
        // released before any I/O so slow deliveries never serialize other
        // users.
        let actions = {
            let entry = self.sessions.entry(user_id).await;
            let mut session = entry.lock().await;
            machine::handle_event(&mut session, event, today)
        };

        for action in actions {
            if let Err(e) = self.perform(chat_id, action).await {
                error!("Failed to deliver reply to chat {}: {}", chat_id, e);
            }
        }
    }

    /// Session count, for liveness logging.
    pub async fn session_count(&self) -> usize {
        self.sessions.len().await
    }

    async fn perform(&self, chat_id: i64, action: Action) -> Result<(), TransportError> {
        match action {
            Action::SendText { body, options } => {
                self.port.send_text(chat_id, &body, &options).await
            }
            Action::SendTyping => {
                // A missing typing indicator is not worth a retry or an
                // error reply.
                if let Err(e) = self.port.send_typing(chat_id).await {
                    warn!("Typing indicator failed for chat {}: {}", chat_id, e);
                }
                Ok(())
            }
            Action::RenderReport { name, birth_date } => {
                self.deliver_report(chat_id, name, birth_date).await
            }
        }
    }

    /// Renders the report off the dispatch path and sends it. The temp
    /// file is dropped (deleted) on every exit: render failure, send
    /// failure or success. The session is already idle by the time this
    /// runs, so a failure only costs the user one apology.
    async fn deliver_report(
        &self,
        chat_id: i64,
        name: String,
        birth_date: BirthDate,
    ) -> Result<(), TransportError> {
        match self.render_report(name.clone(), birth_date).await {
            Ok(file) => {
                let caption = format!("Informe numerológico de {name}");
                let sent = self
                    .port
                    .send_document(chat_id, file.path(), REPORT_FILE_NAME, &caption)
                    .await;
                drop(file);

                match sent {
                    Ok(()) => {
                        self.port
                            .send_text(
                                chat_id,
                                REPORT_FOLLOW_UP,
                                &TextOptions::with_buttons(retry_exit_buttons()),
                            )
                            .await
                    }
                    Err(e) => {
                        error!("Report delivery failed for chat {}: {}", chat_id, e);
                        self.send_report_apology(chat_id).await
                    }
                }
            }
            Err(e) => {
                error!("Report rendering failed for chat {}: {}", chat_id, e);
                self.send_report_apology(chat_id).await
            }
        }
    }

    async fn render_report(
        &self,
        name: String,
        birth_date: BirthDate,
    ) -> Result<NamedTempFile, ReportError> {
        let renderer = self.renderer;
        let render = tokio::task::spawn_blocking(move || {
            renderer.render(&ReportData::compose(&name, birth_date))
        });

        match tokio::time::timeout(self.report_timeout, render).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ReportError::Interrupted(join_error.to_string())),
            Err(_) => Err(ReportError::Timeout),
        }
    }

    async fn send_report_apology(&self, chat_id: i64) -> Result<(), TransportError> {
        self.port
            .send_text(
                chat_id,
                REPORT_APOLOGY,
                &TextOptions::with_buttons(retry_exit_buttons()),
            )
            .await
    }
}

impl std::fmt::Debug for DialogueEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogueEngine")
            .field("report_timeout", &self.report_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::*;
    use crate::dialogue::events::{ButtonToken, Command};

    const USER: u64 = 7;
    const CHAT: i64 = 7;

    /// Recording mock of the outbound port.
    #[derive(Default)]
    struct RecordingPort {
        texts: Mutex<Vec<String>>,
        documents: Mutex<Vec<(PathBuf, String, bool)>>,
        fail_documents: bool,
    }

    impl RecordingPort {
        fn failing_documents() -> Self {
            Self {
                fail_documents: true,
                ..Self::default()
            }
        }

        fn texts(&self) -> Vec<String> {
            self.texts.lock().unwrap().clone()
        }

        fn documents(&self) -> Vec<(PathBuf, String, bool)> {
            self.documents.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReplyPort for RecordingPort {
        async fn send_text(
            &self,
            _chat_id: i64,
            body: &str,
            _options: &TextOptions,
        ) -> Result<(), TransportError> {
            self.texts.lock().unwrap().push(body.to_owned());
            Ok(())
        }

        async fn send_document(
            &self,
            _chat_id: i64,
            path: &Path,
            file_name: &str,
            _caption: &str,
        ) -> Result<(), TransportError> {
            self.documents.lock().unwrap().push((
                path.to_path_buf(),
                file_name.to_owned(),
                path.exists(),
            ));

            if self.fail_documents {
                Err(TransportError("simulated outage".to_owned()))
            } else {
                Ok(())
            }
        }

        async fn send_typing(&self, _chat_id: i64) -> Result<(), TransportError> {
            Ok(())
        }
    }

    fn engine(port: Arc<RecordingPort>) -> DialogueEngine {
        DialogueEngine::new(port, ReportRenderer::new(), Duration::from_secs(30))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    async fn drive(engine: &DialogueEngine, events: Vec<InboundEvent>) {
        for event in events {
            engine.process_event_on(USER, CHAT, event, today()).await;
        }
    }

    #[tokio::test]
    async fn test_profile_scenario_end_to_end() {
        let port = Arc::new(RecordingPort::default());
        let engine = engine(Arc::clone(&port));

        drive(
            &engine,
            vec![
                InboundEvent::Command(Command::Start),
                InboundEvent::Button(ButtonToken::ProfileNumber),
                InboundEvent::Text("23/08/1995".to_owned()),
            ],
        )
        .await;

        let texts = port.texts();
        assert_eq!(texts.len(), 3);

        let result = &texts[2];
        assert!(result.contains("número mágico es: 1"));
        assert!(result.contains("Virgo"));
        assert!(result.contains("Cerdo"));
    }

    #[tokio::test]
    async fn test_report_scenario_end_to_end() {
        let port = Arc::new(RecordingPort::default());
        let engine = engine(Arc::clone(&port));

        drive(
            &engine,
            vec![
                InboundEvent::Command(Command::Start),
                InboundEvent::Button(ButtonToken::FullReport),
                InboundEvent::Text("Ana Lopez".to_owned()),
                // Invalid month: format error, state must survive.
                InboundEvent::Text("15/13/2000".to_owned()),
                InboundEvent::Text("15/12/2000".to_owned()),
            ],
        )
        .await;

        let documents = port.documents();
        assert_eq!(documents.len(), 1);

        let (path, file_name, existed_during_send) = &documents[0];
        assert_eq!(file_name, REPORT_FILE_NAME);
        assert!(*existed_during_send);
        // Scoped acquisition: the scratch file is gone after delivery.
        assert!(!path.exists());

        let texts = port.texts();
        assert!(texts.iter().any(|t| t.contains("fecha válida")));
        assert_eq!(texts.last().map(String::as_str), Some(REPORT_FOLLOW_UP));
    }

    #[tokio::test]
    async fn test_report_delivery_failure_apologizes_and_cleans_up() {
        let port = Arc::new(RecordingPort::failing_documents());
        let engine = engine(Arc::clone(&port));

        drive(
            &engine,
            vec![
                InboundEvent::Button(ButtonToken::FullReport),
                InboundEvent::Text("Ana Lopez".to_owned()),
                InboundEvent::Text("15/12/2000".to_owned()),
            ],
        )
        .await;

        let documents = port.documents();
        let (path, _, _) = &documents[0];
        assert!(!path.exists());

        let texts = port.texts();
        assert_eq!(texts.last().map(String::as_str), Some(REPORT_APOLOGY));

        // The session came back idle: the next text gets the idle hint,
        // not a date prompt.
        engine
            .process_event_on(USER, CHAT, InboundEvent::Text("hola".to_owned()), today())
            .await;
        assert!(port.texts().last().unwrap().contains("/start"));
    }

    #[tokio::test]
    async fn test_sessions_created_on_demand() {
        let port = Arc::new(RecordingPort::default());
        let engine = engine(Arc::clone(&port));

        assert_eq!(engine.session_count().await, 0);

        engine
            .process_event_on(1, 1, InboundEvent::Command(Command::Start), today())
            .await;
        engine
            .process_event_on(2, 2, InboundEvent::Command(Command::Start), today())
            .await;

        assert_eq!(engine.session_count().await, 2);
    }
}
