use crate::error::FieldErrors;
use crate::model::{
    ContactMessage, ContactMessageCreate, ContactMessageUpdate, MessageId, ResponseStatus,
};
use crate::transfer::fields::{present, Field, FieldReader, Mode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::net::IpAddr;

const SENDER_NAME: Field = Field::required("sender_name").max_length(100);
const SENDER_EMAIL: Field = Field::required("sender_email");
const SUBJECT: Field = Field::required("subject").max_length(200);
const MESSAGE_CONTENT: Field = Field::required("message_content");
const IS_READ: Field = Field::optional("is_read");
const RESPONSE_STATUS: Field = Field::optional("response_status");
const RESPONSE_TEXT: Field = Field::optional("response_text").blank();

/// Reads a submitted message. `ip_address` comes from the connection, not the body.
pub fn read_create(body: &Value, ip_address: Option<IpAddr>) -> Result<ContactMessageCreate, FieldErrors> {
    let mut reader = FieldReader::new(body, Mode::Create)?;
    let sender_name = reader.text(&SENDER_NAME);
    let sender_email = reader.email(&SENDER_EMAIL);
    let subject = reader.text(&SUBJECT);
    let message_content = reader.text(&MESSAGE_CONTENT);
    let is_read = reader.boolean(&IS_READ);
    let response_status = reader.choice(&RESPONSE_STATUS, ResponseStatus::from_code);
    let response_text = reader.text(&RESPONSE_TEXT);
    reader.finish()?;

    Ok(ContactMessageCreate {
        sender_name: present(&SENDER_NAME, sender_name)?,
        sender_email: present(&SENDER_EMAIL, sender_email)?,
        subject: present(&SUBJECT, subject)?,
        message_content: present(&MESSAGE_CONTENT, message_content)?,
        is_read: is_read.unwrap_or(false),
        response_status: response_status.unwrap_or_default(),
        response_text: response_text.unwrap_or_default(),
        ip_address,
    })
}

pub fn read_update(body: &Value, mode: Mode) -> Result<ContactMessageUpdate, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let update = ContactMessageUpdate {
        sender_name: reader.text(&SENDER_NAME),
        sender_email: reader.email(&SENDER_EMAIL),
        subject: reader.text(&SUBJECT),
        message_content: reader.text(&MESSAGE_CONTENT),
        is_read: reader.boolean(&IS_READ),
        response_status: reader.choice(&RESPONSE_STATUS, ResponseStatus::from_code),
        response_text: reader.text(&RESPONSE_TEXT),
    };
    reader.finish()?;
    Ok(update)
}

#[derive(Debug, Serialize)]
pub struct MessageRepr<'a> {
    pub id: MessageId,
    pub sender_name: &'a str,
    pub sender_email: &'a str,
    pub subject: &'a str,
    pub message_content: &'a str,
    pub received_date: DateTime<Utc>,
    pub is_read: bool,
    pub response_status: ResponseStatus,
    pub response_text: &'a str,
    pub ip_address: Option<IpAddr>,
}

impl<'a> MessageRepr<'a> {
    pub fn new(message: &'a ContactMessage) -> Self {
        Self {
            id: message.id,
            sender_name: &message.sender_name,
            sender_email: &message.sender_email,
            subject: &message.subject,
            message_content: &message.message_content,
            received_date: message.received_date,
            is_read: message.is_read,
            response_status: message.response_status,
            response_text: &message.response_text,
            ip_address: message.ip_address,
        }
    }
}
