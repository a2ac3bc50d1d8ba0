use crate::model::MessageId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Follow-up state of a contact message. No transition rules apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[default]
    #[serde(rename = "new")]
    New,
    #[serde(rename = "progress")]
    InProgress,
    #[serde(rename = "responded")]
    Responded,
}

impl ResponseStatus {
    pub const ALL: [ResponseStatus; 3] = [
        ResponseStatus::New,
        ResponseStatus::InProgress,
        ResponseStatus::Responded,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ResponseStatus::New => "new",
            ResponseStatus::InProgress => "progress",
            ResponseStatus::Responded => "responded",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub id: MessageId,
    pub sender_name: String,
    pub sender_email: String,
    pub subject: String,
    pub message_content: String,
    pub received_date: DateTime<Utc>,
    pub is_read: bool,
    pub response_status: ResponseStatus,
    pub response_text: String,
    /// Address the message was submitted from, recorded by the server.
    pub ip_address: Option<IpAddr>,
}

#[derive(Debug, Clone)]
pub struct ContactMessageCreate {
    pub sender_name: String,
    pub sender_email: String,
    pub subject: String,
    pub message_content: String,
    pub is_read: bool,
    pub response_status: ResponseStatus,
    pub response_text: String,
    pub ip_address: Option<IpAddr>,
}

#[derive(Debug, Clone, Default)]
pub struct ContactMessageUpdate {
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub subject: Option<String>,
    pub message_content: Option<String>,
    pub is_read: Option<bool>,
    pub response_status: Option<ResponseStatus>,
    pub response_text: Option<String>,
}
