//! Turn driver
//!
//! Owns the [`Session`], feeds events through [`transition`] and carries out
//! the resulting effects. Each request races a response deadline; both report
//! back over one channel tagged with the request generation, so whichever
//! loses is dropped by the state machine as stale.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use medassist_api::DialogueRequest;
use medassist_ui::{FollowUpComponent, Interaction};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::context::ConversationContext;
use crate::error::{Result, TurnFailure};
use crate::presenter::{Gallery, Presenter};
use crate::state_machine::{Effect, Event, Phase, Session, transition};
use crate::transport::Transport;

/// Default wait for a dialogue response
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(20);

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// How long to wait for a response before giving up on the turn
    pub response_timeout: Duration,
    /// Whether to search gallery images when the backend names a term
    pub show_images: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            show_images: true,
        }
    }
}

/// Runs the conversation against a transport and a presentation layer
pub struct Orchestrator<P: Presenter> {
    config: OrchestratorConfig,
    session: Session,
    session_id: Uuid,
    transport: Arc<dyn Transport>,
    presenter: P,
    gallery: Arc<dyn Gallery>,
    event_tx: mpsc::UnboundedSender<Event>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    /// Bumped on every image search and gallery clear
    gallery_generation: Arc<AtomicU64>,
    deadline: Option<JoinHandle<()>>,
}

impl<P: Presenter> Orchestrator<P> {
    pub fn new(
        config: OrchestratorConfig,
        transport: Arc<dyn Transport>,
        presenter: P,
        gallery: Arc<dyn Gallery>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let session_id = Uuid::new_v4();
        tracing::debug!(session = %session_id, "Starting session");
        Self {
            config,
            session: Session::new(),
            session_id,
            transport,
            presenter,
            gallery,
            event_tx,
            event_rx,
            gallery_generation: Arc::new(AtomicU64::new(0)),
            deadline: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn context(&self) -> &ConversationContext {
        &self.session.context
    }

    /// Identifier of the current conversation; changes on every restart
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The follow-up or rating component awaiting an answer, if any
    pub fn active_component(&self) -> Option<&FollowUpComponent> {
        self.session.component.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Send a typed message and wait for the turn to finish
    pub async fn submit(&mut self, message: impl Into<String>) -> Result<()> {
        self.dispatch(Event::Submit {
            message: message.into(),
        })?;
        self.settle().await;
        Ok(())
    }

    /// Act on the active component; waits for the turn if this answered it
    pub async fn interact(&mut self, interaction: Interaction) -> Result<()> {
        self.dispatch(Event::Interact(interaction))?;
        self.settle().await;
        Ok(())
    }

    /// Drop the conversation and ask the backend to start over
    pub async fn restart(&mut self) -> Result<()> {
        self.dispatch(Event::Restart)?;
        self.settle().await;
        Ok(())
    }

    fn dispatch(&mut self, event: Event) -> Result<()> {
        match transition(&self.session, event) {
            Ok(result) => {
                self.session = result.new_session;
                for effect in result.effects {
                    self.execute(effect);
                }
                Ok(())
            }
            Err(error) => {
                tracing::debug!(session = %self.session_id, error = %error, "Input rejected");
                self.presenter.notice(&error.to_string());
                Err(error)
            }
        }
    }

    /// Pump network events until no request is outstanding
    async fn settle(&mut self) {
        while let Phase::AwaitingResponse { generation } = self.session.phase {
            let Some(event) = self.event_rx.recv().await else {
                break;
            };
            self.log_network_event(generation, &event);
            if let Err(error) = self.dispatch(event) {
                tracing::warn!(session = %self.session_id, error = %error, "Unexpected transition error");
            }
        }
        if let Some(deadline) = self.deadline.take() {
            deadline.abort();
        }
    }

    fn log_network_event(&self, current: u64, event: &Event) {
        match event {
            Event::Response { generation, .. } | Event::DeadlineElapsed { generation }
                if *generation != current =>
            {
                tracing::debug!(session = %self.session_id, generation, current, "Dropping stale event");
            }
            Event::Response {
                outcome: Err(failure),
                ..
            } => {
                tracing::warn!(session = %self.session_id, failure = %failure, "Turn failed");
            }
            Event::DeadlineElapsed { .. } => {
                tracing::warn!(
                    session = %self.session_id,
                    failure = %TurnFailure::Timeout,
                    timeout = ?self.config.response_timeout,
                    "Turn failed"
                );
            }
            _ => {}
        }
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::ShowUserMessage(text) => self.presenter.append_user_message(&text),
            Effect::ShowAssistantMessage(markup) => self.presenter.append_assistant_message(&markup),
            Effect::ShowThinking => self.presenter.set_thinking(true),
            Effect::HideThinking => self.presenter.set_thinking(false),
            Effect::SetInputEnabled(enabled) => self.presenter.set_input_enabled(enabled),
            Effect::ShowStructured(markup) => self.presenter.show_structured(&markup),
            Effect::ShowFollowUp {
                component,
                progress,
            } => self.presenter.show_follow_up(&component, progress),
            Effect::RefreshFollowUp(component) => self.presenter.update_follow_up(&component),
            Effect::ClearFollowUp => self.presenter.clear_follow_up(),
            Effect::FetchImages(term) => self.fetch_images(term),
            Effect::ClearGallery => {
                self.gallery_generation.fetch_add(1, Ordering::SeqCst);
                self.presenter.clear_gallery();
            }
            Effect::OfferRestart => self.presenter.set_restart_offered(true),
            Effect::WithdrawRestart => self.presenter.set_restart_offered(false),
            Effect::ClearConversation => {
                self.presenter.clear_conversation();
                self.session_id = Uuid::new_v4();
                tracing::debug!(session = %self.session_id, "Starting session");
            }
            Effect::SendRequest {
                generation,
                request,
            } => self.send_request(generation, request),
        }
    }

    fn send_request(&mut self, generation: u64, request: DialogueRequest) {
        tracing::debug!(
            session = %self.session_id,
            generation,
            restart = request.is_restart(),
            "Sending turn"
        );

        let transport = Arc::clone(&self.transport);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let outcome = transport.converse(&request).await.map_err(TurnFailure::from);
            let _ = tx.send(Event::Response {
                generation,
                outcome,
            });
        });

        if let Some(previous) = self.deadline.take() {
            previous.abort();
        }
        let tx = self.event_tx.clone();
        let timeout = self.config.response_timeout;
        self.deadline = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let _ = tx.send(Event::DeadlineElapsed { generation });
        }));
    }

    /// Search images in the background; results arriving after a newer
    /// search or a clear are dropped
    fn fetch_images(&mut self, term: String) {
        if !self.config.show_images {
            return;
        }
        let generation = self.gallery_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.gallery_generation);
        let transport = Arc::clone(&self.transport);
        let gallery = Arc::clone(&self.gallery);

        tokio::spawn(async move {
            match transport.search_images(&term).await {
                Ok(urls) if current.load(Ordering::SeqCst) == generation => {
                    gallery.show_images(&term, &urls);
                }
                Ok(_) => tracing::debug!(term = %term, "Dropping stale image results"),
                Err(e) => tracing::warn!(term = %term, error = %e, "Image search failed"),
            }
        });
    }
}
