//! Contact message actor. Messages list newest first.

use crate::error::RecordError;
use crate::model::{ContactMessage, ContactMessageCreate, ContactMessageUpdate, MessageId};
use async_trait::async_trait;
use chrono::Utc;
use resource_store::{NoAction, NoFilter, Record, ResourceActor, ResourceClient};
use std::cmp::Ordering;

/// Creates a new ContactMessage actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<ContactMessage>, ResourceClient<ContactMessage>) {
    ResourceActor::new(buffer_size)
}

#[async_trait]
impl Record for ContactMessage {
    type Id = MessageId;
    type Create = ContactMessageCreate;
    type Update = ContactMessageUpdate;
    type Filter = NoFilter;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ();
    type Error = RecordError;

    fn from_create_params(id: MessageId, params: ContactMessageCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            sender_name: params.sender_name,
            sender_email: params.sender_email,
            subject: params.subject,
            message_content: params.message_content,
            received_date: Utc::now(),
            is_read: params.is_read,
            response_status: params.response_status,
            response_text: params.response_text,
            ip_address: params.ip_address,
        })
    }

    fn ordering(&self, other: &Self) -> Ordering {
        other
            .received_date
            .cmp(&self.received_date)
            .then_with(|| other.id.cmp(&self.id))
    }

    async fn on_update(&mut self, update: ContactMessageUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(sender_name) = update.sender_name {
            self.sender_name = sender_name;
        }
        if let Some(sender_email) = update.sender_email {
            self.sender_email = sender_email;
        }
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(message_content) = update.message_content {
            self.message_content = message_content;
        }
        if let Some(is_read) = update.is_read {
            self.is_read = is_read;
        }
        if let Some(status) = update.response_status {
            self.response_status = status;
        }
        if let Some(response_text) = update.response_text {
            self.response_text = response_text;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResponseStatus;

    fn message(subject: &str) -> ContactMessageCreate {
        ContactMessageCreate {
            sender_name: "Grace".into(),
            sender_email: "grace@example.com".into(),
            subject: subject.into(),
            message_content: "Hello".into(),
            is_read: false,
            response_status: ResponseStatus::New,
            response_text: String::new(),
            ip_address: None,
        }
    }

    #[tokio::test]
    async fn test_messages_list_newest_first() {
        let (actor, client) = new(10);
        tokio::spawn(actor.run(()));

        for subject in ["first", "second", "third"] {
            client.create(message(subject)).await.unwrap();
        }

        let subjects: Vec<String> = client
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.subject)
            .collect();
        assert_eq!(subjects, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_same_received_date_orders_newer_id_first() {
        let older = ContactMessage::from_create_params(MessageId(1), message("a")).unwrap();
        let newer = ContactMessage {
            id: MessageId(2),
            received_date: older.received_date,
            ..older.clone()
        };

        assert_eq!(newer.ordering(&older), Ordering::Less);
        assert_eq!(older.ordering(&newer), Ordering::Greater);

        let earlier = ContactMessage {
            id: MessageId(3),
            received_date: older.received_date - chrono::Duration::seconds(5),
            ..older.clone()
        };
        // An earlier timestamp sorts after, whatever the id.
        assert_eq!(earlier.ordering(&older), Ordering::Greater);
    }
}
