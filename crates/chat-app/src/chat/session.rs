use std::sync::Arc;

use argo_assistant::{
    GREETING_TEMPLATE, IMAGE_CAPTION_TEMPLATE, ImagePlaceholder, QUICK_PROMPTS, Responder,
    create_responder,
};
use argo_storage::{
    ConversationId, ConversationStore, MemoryStorage, MessageId, MessageRecord, MessageStore,
    NewMessage,
};
use snafu::{OptionExt, ResultExt, ensure};
use tokio::sync::mpsc;

use crate::chat::events::ChatEvent;
use crate::chat::image_panel::ImagePanel;
use crate::chat::message::{ImageTarget, ReplyState, ReplyTarget, ReplyTransition, RequestSeq};
use crate::error::{
    AssistantSnafu, ChatError, ChatResult, ImageGenerationInProgressSnafu, ImagePanelClosedSnafu,
    NoGeneratedImageSnafu, QuickPromptOutOfRangeSnafu, StorageSnafu,
};
use crate::settings::ChatSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was stored and no reply was requested.
    Ignored,
    /// A reply is still pending, input is locked until it lands.
    Busy { active: ReplyTarget },
    Accepted {
        message_id: MessageId,
        target: ReplyTarget,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    MessageAppended(MessageRecord),
    ReplyFailed { message: String },
    ImageGenerated { url: String },
    ImageFailed { message: String },
    /// The event answered a request that is no longer current.
    Stale,
}

/// Owner of one conversation and the only writer of its state.
///
/// Timer tasks spawned here report back through [`ChatEvent`]s, which the caller
/// feeds into [`ChatSession::handle_event`] from the same loop that submits input.
pub struct ChatSession {
    settings: Arc<ChatSettings>,
    responder: Arc<dyn Responder>,
    images: ImagePlaceholder,
    storage: MemoryStorage,
    reply_state: ReplyState,
    image_panel: ImagePanel,
    next_request_seq: u64,
    events_tx: mpsc::UnboundedSender<ChatEvent>,
}

impl ChatSession {
    pub fn new(
        settings: Arc<ChatSettings>,
        responder: Arc<dyn Responder>,
        events_tx: mpsc::UnboundedSender<ChatEvent>,
    ) -> ChatResult<Self> {
        let images = settings.image_placeholder();
        let mut session = Self {
            settings,
            responder,
            images,
            storage: MemoryStorage::default(),
            reply_state: ReplyState::Idle,
            image_panel: ImagePanel::default(),
            next_request_seq: 1,
            events_tx,
        };
        session.seed_greeting()?;
        Ok(session)
    }

    /// Builds the responder named in `settings`.
    pub fn from_settings(
        settings: Arc<ChatSettings>,
        events_tx: mpsc::UnboundedSender<ChatEvent>,
    ) -> ChatResult<Self> {
        let responder = create_responder(settings.responder_config()).context(AssistantSnafu {
            stage: "session-create-responder",
        })?;
        tracing::info!(responder_id = responder.id(), "initialized responder");
        Self::new(settings, responder, events_tx)
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn responder_name(&self) -> &str {
        self.responder.name()
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.storage.conversation().id
    }

    pub fn reply_state(&self) -> &ReplyState {
        &self.reply_state
    }

    pub fn is_loading(&self) -> bool {
        self.reply_state.is_pending()
    }

    pub fn image_panel(&self) -> &ImagePanel {
        &self.image_panel
    }

    pub fn messages(&self) -> ChatResult<Vec<MessageRecord>> {
        self.storage.list_messages().context(StorageSnafu {
            stage: "session-list-messages",
        })
    }

    pub fn submit(&mut self, text: &str) -> ChatResult<SubmitOutcome> {
        if text.trim().is_empty() {
            tracing::debug!("ignoring blank submission");
            return Ok(SubmitOutcome::Ignored);
        }

        if let Some(active) = self.reply_state.pending_target() {
            tracing::debug!(seq = active.seq.0, "submission rejected while reply is pending");
            return Ok(SubmitOutcome::Busy { active });
        }

        let record = self
            .storage
            .append_message(NewMessage::user(text))
            .context(StorageSnafu {
                stage: "session-append-user-message",
            })?;

        let target = ReplyTarget::new(self.conversation_id(), self.alloc_request_seq());
        self.apply_reply_transition(ReplyTransition::Start(target), "session-submit-start")?;

        self.spawn_reply(target, text.to_string());
        tracing::info!(
            message_id = %record.id,
            seq = target.seq.0,
            "accepted user message"
        );

        Ok(SubmitOutcome::Accepted {
            message_id: record.id,
            target,
        })
    }

    pub fn handle_event(&mut self, event: ChatEvent) -> ChatResult<EventOutcome> {
        let kind = event.kind();
        match event {
            ChatEvent::ReplyReady { target, reply } => {
                if !self.reply_state.accepts_reply(target) {
                    tracing::warn!(kind, seq = target.seq.0, "dropping stale reply");
                    return Ok(EventOutcome::Stale);
                }

                let record = self
                    .storage
                    .append_message(NewMessage::assistant(reply.content))
                    .context(StorageSnafu {
                        stage: "session-append-assistant-reply",
                    })?;
                self.apply_reply_transition(
                    ReplyTransition::Complete(target),
                    "session-reply-complete",
                )?;
                tracing::info!(
                    message_id = %record.id,
                    topic = reply.topic.as_str(),
                    "stored assistant reply"
                );
                Ok(EventOutcome::MessageAppended(record))
            }
            ChatEvent::ReplyFailed { target, message } => {
                if !self.reply_state.accepts_reply(target) {
                    tracing::warn!(kind, seq = target.seq.0, "dropping stale reply failure");
                    return Ok(EventOutcome::Stale);
                }

                tracing::error!(seq = target.seq.0, "assistant reply failed: {message}");
                self.apply_reply_transition(
                    ReplyTransition::Fail {
                        target,
                        message: message.clone(),
                    },
                    "session-reply-fail",
                )?;
                Ok(EventOutcome::ReplyFailed { message })
            }
            ChatEvent::ImageReady { target, image } => {
                let url = image.url.clone();
                if !self.image_panel.finish(target, image) {
                    tracing::warn!(kind, seq = target.seq.0, "dropping stale image");
                    return Ok(EventOutcome::Stale);
                }
                Ok(EventOutcome::ImageGenerated { url })
            }
            ChatEvent::ImageFailed { target, message } => {
                if !self.image_panel.fail(target) {
                    return Ok(EventOutcome::Stale);
                }
                tracing::error!(seq = target.seq.0, "image generation failed: {message}");
                Ok(EventOutcome::ImageFailed { message })
            }
        }
    }

    pub fn toggle_image_panel(&mut self) -> bool {
        self.image_panel.toggle()
    }

    pub fn open_image_panel(&mut self) {
        self.image_panel.open();
    }

    pub fn close_image_panel(&mut self) {
        self.image_panel.close();
    }

    pub fn set_image_prompt(&mut self, prompt: impl Into<String>) {
        self.image_panel.set_prompt(prompt);
    }

    /// Copies suggestion `index` (zero-based) into the prompt.
    pub fn apply_quick_prompt(&mut self, index: usize) -> ChatResult<&'static str> {
        let prompt = QUICK_PROMPTS
            .get(index)
            .copied()
            .context(QuickPromptOutOfRangeSnafu {
                stage: "session-apply-quick-prompt",
                number: index.saturating_add(1),
                available: QUICK_PROMPTS.len(),
            })?;
        self.image_panel.set_prompt(prompt);
        Ok(prompt)
    }

    pub fn generate_image(&mut self) -> ChatResult<ImageTarget> {
        ensure!(
            self.image_panel.is_open(),
            ImagePanelClosedSnafu {
                stage: "session-generate-image"
            }
        );
        ensure!(
            !self.image_panel.is_generating(),
            ImageGenerationInProgressSnafu {
                stage: "session-generate-image"
            }
        );
        let prompt = self.image_panel.prompt().to_string();
        ImagePlaceholder::validate_prompt(&prompt).context(AssistantSnafu {
            stage: "session-generate-image",
        })?;

        let target = ImageTarget::new(self.conversation_id(), self.alloc_request_seq());
        self.image_panel.begin(target);

        let images = self.images.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match images.generate(prompt).await {
                Ok(image) => ChatEvent::ImageReady { target, image },
                Err(error) => ChatEvent::ImageFailed {
                    target,
                    message: error.to_string(),
                },
            };
            if events_tx.send(event).is_err() {
                tracing::debug!("chat event receiver dropped before image delivery");
            }
        });

        Ok(target)
    }

    /// Posts the generated image into the thread and closes the panel.
    pub fn use_generated_image(&mut self) -> ChatResult<MessageRecord> {
        ensure!(
            self.image_panel.is_open(),
            ImagePanelClosedSnafu {
                stage: "session-use-generated-image"
            }
        );
        let image = self
            .image_panel
            .generated()
            .cloned()
            .context(NoGeneratedImageSnafu {
                stage: "session-use-generated-image",
            })?;

        let record = self
            .storage
            .append_message(NewMessage::assistant(IMAGE_CAPTION_TEMPLATE).with_image_url(image.url))
            .context(StorageSnafu {
                stage: "session-append-image-message",
            })?;
        self.image_panel.close();
        Ok(record)
    }

    /// Starts over with a fresh conversation. Pending timers for the old one go stale.
    pub fn reset(&mut self) -> ChatResult<ConversationId> {
        let previous = self.conversation_id();
        self.storage = MemoryStorage::default();
        self.image_panel = ImagePanel::default();
        self.apply_reply_transition(ReplyTransition::ResetToIdle, "session-reset")?;
        self.next_request_seq = 1;
        self.seed_greeting()?;

        let current = self.conversation_id();
        tracing::info!(%previous, %current, "started new conversation");
        Ok(current)
    }

    fn seed_greeting(&mut self) -> ChatResult<()> {
        self.storage
            .append_message(NewMessage::assistant(GREETING_TEMPLATE))
            .context(StorageSnafu {
                stage: "session-seed-greeting",
            })?;
        Ok(())
    }

    fn spawn_reply(&self, target: ReplyTarget, input: String) {
        let responder = Arc::clone(&self.responder);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match responder.respond(input).await {
                Ok(reply) => ChatEvent::ReplyReady { target, reply },
                Err(error) => ChatEvent::ReplyFailed {
                    target,
                    message: error.to_string(),
                },
            };
            if events_tx.send(event).is_err() {
                tracing::debug!("chat event receiver dropped before reply delivery");
            }
        });
    }

    fn alloc_request_seq(&mut self) -> RequestSeq {
        let seq = RequestSeq::new(self.next_request_seq);
        self.next_request_seq = self.next_request_seq.saturating_add(1);
        seq
    }

    fn apply_reply_transition(
        &mut self,
        transition: ReplyTransition,
        stage: &'static str,
    ) -> ChatResult<()> {
        self.reply_state = self
            .reply_state
            .apply(transition)
            .map_err(|rejection| ChatError::ReplyTransition { stage, rejection })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use argo_assistant::{
        AssistantError, AssistantResult, BoxFuture, CannedResponder, DEFAULT_TEMPLATE,
        PACIFIC_TEMPLATE, PLACEHOLDER_IMAGE_URL, Reply, TEMPERATURE_TEMPLATE,
    };
    use argo_storage::MessageRole;

    use super::*;

    fn session_with_delays(
        reply_delay_ms: u64,
        image_delay_ms: u64,
    ) -> (ChatSession, mpsc::UnboundedReceiver<ChatEvent>) {
        let settings = Arc::new(ChatSettings {
            reply_delay_ms,
            image_delay_ms,
            ..ChatSettings::default()
        });
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let session = ChatSession::from_settings(settings, events_tx).unwrap();
        (session, events_rx)
    }

    async fn pump_one(
        session: &mut ChatSession,
        events_rx: &mut mpsc::UnboundedReceiver<ChatEvent>,
    ) -> EventOutcome {
        let event = events_rx.recv().await.unwrap();
        session.handle_event(event).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn new_session_starts_with_greeting() {
        let (session, _events_rx) = session_with_delays(1_500, 3_000);
        let messages = session.messages().unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::Assistant);
        assert_eq!(messages[0].content, GREETING_TEMPLATE);
        assert!(!session.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn whitespace_submission_appends_nothing() {
        let (mut session, mut events_rx) = session_with_delays(1_500, 3_000);

        assert_eq!(session.submit("   \t\n").unwrap(), SubmitOutcome::Ignored);
        assert_eq!(session.submit("").unwrap(), SubmitOutcome::Ignored);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(events_rx.try_recv().is_err());
        assert_eq!(session.messages().unwrap().len(), 1);
        assert!(!session.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn submission_is_answered_after_the_reply_delay() {
        let (mut session, mut events_rx) = session_with_delays(1_500, 3_000);

        let outcome = session.submit("What is the temperature?").unwrap();
        let SubmitOutcome::Accepted { message_id, target } = outcome else {
            panic!("expected accepted submission, got {outcome:?}");
        };
        assert!(session.is_loading());
        assert_eq!(session.reply_state(), &ReplyState::Pending(target));

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert!(events_rx.try_recv().is_err());

        let outcome = pump_one(&mut session, &mut events_rx).await;
        let EventOutcome::MessageAppended(reply) = outcome else {
            panic!("expected appended reply, got {outcome:?}");
        };
        assert_eq!(reply.role, MessageRole::Assistant);
        assert_eq!(reply.content, TEMPERATURE_TEMPLATE);
        assert!(!session.is_loading());

        let messages = session.messages().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].id, message_id);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "What is the temperature?");
        assert_eq!(messages[2], reply);
    }

    #[tokio::test(start_paused = true)]
    async fn second_submission_is_refused_while_pending() {
        let (mut session, mut events_rx) = session_with_delays(1_500, 3_000);

        let SubmitOutcome::Accepted { target, .. } = session.submit("pacific").unwrap() else {
            panic!("first submission should be accepted");
        };
        assert_eq!(
            session.submit("atlantic").unwrap(),
            SubmitOutcome::Busy { active: target }
        );

        pump_one(&mut session, &mut events_rx).await;
        let messages = session.messages().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].content, PACIFIC_TEMPLATE);

        assert!(matches!(
            session.submit("hello").unwrap(),
            SubmitOutcome::Accepted { .. }
        ));
        pump_one(&mut session, &mut events_rx).await;
        assert_eq!(session.messages().unwrap()[4].content, DEFAULT_TEMPLATE);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_for_a_reset_conversation_is_dropped() {
        let (mut session, mut events_rx) = session_with_delays(1_500, 3_000);

        session.submit("salinity").unwrap();
        let old_conversation = session.conversation_id();
        let new_conversation = session.reset().unwrap();
        assert_ne!(old_conversation, new_conversation);
        assert!(!session.is_loading());

        assert_eq!(pump_one(&mut session, &mut events_rx).await, EventOutcome::Stale);
        let messages = session.messages().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, GREETING_TEMPLATE);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_responder_unlocks_input_without_storing_anything() {
        struct FailingResponder;

        impl Responder for FailingResponder {
            fn id(&self) -> &str {
                "failing"
            }

            fn name(&self) -> &str {
                "Failing"
            }

            fn respond(&self, _input: String) -> BoxFuture<'static, AssistantResult<Reply>> {
                Box::pin(async {
                    Err(AssistantError::UnsupportedResponder {
                        stage: "test",
                        responder_id: "failing".to_string(),
                    })
                })
            }
        }

        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let mut session = ChatSession::new(
            Arc::new(ChatSettings::default()),
            Arc::new(FailingResponder),
            events_tx,
        )
        .unwrap();

        session.submit("argo").unwrap();
        let outcome = pump_one(&mut session, &mut events_rx).await;
        assert!(matches!(outcome, EventOutcome::ReplyFailed { .. }));
        assert!(!session.is_loading());
        assert_eq!(session.messages().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn image_flow_posts_placeholder_into_thread() {
        let (mut session, mut events_rx) = session_with_delays(1_500, 3_000);

        assert!(matches!(
            session.generate_image(),
            Err(ChatError::ImagePanelClosed { .. })
        ));

        assert!(session.toggle_image_panel());
        assert!(matches!(
            session.generate_image(),
            Err(ChatError::Assistant { .. })
        ));

        assert_eq!(
            session.apply_quick_prompt(1).unwrap(),
            "Argo float data visualization"
        );
        session.generate_image().unwrap();
        assert!(session.image_panel().is_generating());
        assert!(matches!(
            session.generate_image(),
            Err(ChatError::ImageGenerationInProgress { .. })
        ));
        assert!(matches!(
            session.use_generated_image(),
            Err(ChatError::NoGeneratedImage { .. })
        ));

        tokio::time::sleep(Duration::from_millis(2_000)).await;
        assert!(events_rx.try_recv().is_err());

        assert_eq!(
            pump_one(&mut session, &mut events_rx).await,
            EventOutcome::ImageGenerated {
                url: PLACEHOLDER_IMAGE_URL.to_string()
            }
        );

        let record = session.use_generated_image().unwrap();
        assert_eq!(record.content, IMAGE_CAPTION_TEMPLATE);
        assert_eq!(record.image_url.as_deref(), Some(PLACEHOLDER_IMAGE_URL));
        assert!(!session.image_panel().is_open());
        assert_eq!(session.messages().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn quick_prompt_index_is_bounded() {
        let (mut session, _events_rx) = session_with_delays(0, 0);
        assert!(matches!(
            session.apply_quick_prompt(QUICK_PROMPTS.len()),
            Err(ChatError::QuickPromptOutOfRange { number: 5, available: 4, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn closing_the_panel_discards_a_pending_image() {
        let (mut session, mut events_rx) = session_with_delays(1_500, 3_000);

        session.open_image_panel();
        session.set_image_prompt("reef");
        session.generate_image().unwrap();
        session.close_image_panel();

        assert_eq!(pump_one(&mut session, &mut events_rx).await, EventOutcome::Stale);
        assert!(session.image_panel().generated().is_none());
        assert_eq!(session.image_panel().prompt(), "");
        assert!(matches!(
            session.use_generated_image(),
            Err(ChatError::ImagePanelClosed { .. })
        ));
        assert_eq!(session.messages().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn canned_responder_is_used_by_default() {
        let settings = Arc::new(ChatSettings::default());
        let (events_tx, _events_rx) = mpsc::unbounded_channel();
        let session = ChatSession::new(
            settings,
            Arc::new(CannedResponder::default()),
            events_tx,
        )
        .unwrap();
        assert_eq!(session.responder_name(), "Argo Ocean Intelligence");
    }
}
