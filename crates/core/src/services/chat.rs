use crate::client::{confirm, ApiClient};
use crate::constants::{CARE_PROVIDER_DOCTOR_ID, PATIENT_SENDER};
use crate::{ClientError, ClientResult};
use api_shared::endpoints;
use api_shared::forms::{ChatQuery, SendMessageForm};
use api_shared::{ChatMessage, Envelope, MessagesResponse};
use momcare_types::{NonEmptyText, UserId};

/// Conversation with the care provider.
///
/// There is exactly one provider per user, so the doctor identifier is fixed.
#[derive(Clone, Debug)]
pub struct ChatService {
    client: ApiClient,
}

impl ChatService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn messages(&self, user_id: &UserId) -> ClientResult<Vec<ChatMessage>> {
        let query = ChatQuery {
            user_id: user_id.to_string(),
            doctor_id: CARE_PROVIDER_DOCTOR_ID,
        };
        let response: MessagesResponse = self
            .client
            .get_json_with(endpoints::CHAT_MESSAGES, &query)
            .await?;

        if !response.success {
            return Err(ClientError::Rejected(response.message));
        }
        Ok(response.messages.unwrap_or_default())
    }

    pub async fn send(&self, user_id: &UserId, text: &NonEmptyText) -> ClientResult<Envelope> {
        let form = SendMessageForm {
            user_id: user_id.to_string(),
            doctor_id: CARE_PROVIDER_DOCTOR_ID,
            sender: PATIENT_SENDER.to_string(),
            message: text.to_string(),
        };
        let envelope = self.client.post_form(endpoints::CHAT_SEND, &form).await?;
        confirm(envelope)
    }
}
