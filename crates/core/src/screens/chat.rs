use crate::services::ChatService;
use crate::state::{ListSource, RemoteList, RemoteMutation};
use crate::validation::message_text;
use crate::ClientResult;
use api_shared::{ChatMessage, Envelope};
use async_trait::async_trait;
use momcare_types::UserId;

pub struct ChatSource(ChatService);

#[async_trait]
impl ListSource for ChatSource {
    type Item = ChatMessage;

    async fn fetch(&self, user_id: &UserId) -> ClientResult<Vec<ChatMessage>> {
        self.0.messages(user_id).await
    }
}

/// Conversation with the care provider.
pub struct ChatScreen {
    user_id: UserId,
    messages: RemoteList<ChatSource>,
    sending: RemoteMutation<Envelope>,
}

impl ChatScreen {
    pub fn new(service: ChatService, user_id: UserId) -> Self {
        Self {
            user_id,
            messages: RemoteList::new(ChatSource(service)),
            sending: RemoteMutation::new(),
        }
    }

    pub fn messages(&self) -> &RemoteList<ChatSource> {
        &self.messages
    }

    pub fn sending(&self) -> &RemoteMutation<Envelope> {
        &self.sending
    }

    pub async fn reload(&self) -> ClientResult<()> {
        self.messages.reload(&self.user_id).await
    }

    /// Send a message and reload the conversation so it appears with the backend's timestamp.
    pub async fn send(&self, text: &str) -> ClientResult<Envelope> {
        let text = message_text(text).map_err(|e| self.sending.reject(e))?;
        let envelope = self
            .sending
            .submit(self.messages.source().0.send(&self.user_id, &text))
            .await?;
        // A failed reload is published on the list state; the message was sent.
        let _ = self.reload().await;
        Ok(envelope)
    }
}

/// Whether a message was written by the mother rather than the care provider.
pub fn is_from_patient(message: &ChatMessage) -> bool {
    message.sender == crate::constants::PATIENT_SENDER
}
