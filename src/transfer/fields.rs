//! Field-level reading and validation of JSON request bodies.
//!
//! A [`FieldReader`] walks one JSON object, reads the declared fields one at a time and
//! collects every failure into a single [`FieldErrors`] so a client sees all offending
//! fields at once. Fields not read are ignored, which is how read-only and unknown
//! fields are dropped.

use crate::error::{FieldErrors, NON_FIELD_ERRORS};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const INVALID_INTEGER: &str = "A valid integer is required.";
pub const INVALID_BOOLEAN: &str = "Must be a valid boolean.";
pub const INVALID_URL: &str = "Enter a valid URL.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const INVALID_DATE: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// Largest value accepted for unsigned integer fields.
pub const MAX_UNSIGNED: u64 = 2_147_483_647;
/// Default maximum length of URL fields.
pub const URL_MAX_LENGTH: usize = 200;
/// Maximum length of e-mail fields.
pub const EMAIL_MAX_LENGTH: usize = 254;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:https?|ftps?)://(?:[^\s:@/]+(?::[^\s:@/]*)?@)?(?:localhost|(?:\d{1,3}\.){3}\d{1,3}|\[[0-9a-f:.]+\]|(?:[a-z0-9\x{a1}-\x{ffff}](?:[a-z0-9\x{a1}-\x{ffff}-]{0,61}[a-z0-9\x{a1}-\x{ffff}])?\.)+[a-z\x{a1}-\x{ffff}]{2,63}\.?)(?::\d{1,5})?(?:[/?#]\S*)?$",
    )
    .expect("URL pattern is valid")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9-]{2,63}$",
    )
    .expect("email pattern is valid")
});

/// How a body is applied to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// POST: required fields must be present, absent optional fields take defaults.
    Create,
    /// PUT: required fields must be present, absent optional fields stay unchanged.
    Replace,
    /// PATCH: nothing is required.
    Partial,
}

/// Declared constraints of one input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    required: bool,
    nullable: bool,
    allow_blank: bool,
    max_length: Option<usize>,
}

impl Field {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            nullable: false,
            allow_blank: false,
            max_length: None,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name)
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub const fn blank(self) -> Self {
        Self {
            allow_blank: true,
            ..self
        }
    }

    pub const fn max_length(self, max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
            ..self
        }
    }
}

/// Takes a value that `FieldReader` reported as required.
///
/// Only fails when the reader already recorded the field as missing or invalid, so the
/// caller's `finish()` has returned those errors first.
pub fn present<T>(field: &Field, value: Option<T>) -> Result<T, FieldErrors> {
    value.ok_or_else(|| FieldErrors::single(field.name, REQUIRED))
}

pub struct FieldReader<'a> {
    body: &'a Map<String, Value>,
    mode: Mode,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(body: &'a Value, mode: Mode) -> Result<Self, FieldErrors> {
        match body {
            Value::Object(map) => Ok(Self {
                body: map,
                mode,
                errors: FieldErrors::new(),
            }),
            other => Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type(other)
                ),
            )),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns every error recorded so far.
    pub fn finish(self) -> Result<(), FieldErrors> {
        self.errors.into_result()
    }

    /// Text field that may not be null.
    pub fn text(&mut self, field: &Field) -> Option<String> {
        self.read(field, |v| parse_text(field, v)).flatten()
    }

    /// Text field that may be null. `Some(None)` is an explicit null.
    pub fn nullable_text(&mut self, field: &Field) -> Option<Option<String>> {
        self.read(field, |v| parse_text(field, v))
    }

    pub fn url(&mut self, field: &Field) -> Option<String> {
        self.read(field, |v| parse_url(field, v)).flatten()
    }

    pub fn nullable_url(&mut self, field: &Field) -> Option<Option<String>> {
        self.read(field, |v| parse_url(field, v))
    }

    pub fn email(&mut self, field: &Field) -> Option<String> {
        self.read(field, |v| parse_email(field, v)).flatten()
    }

    pub fn date(&mut self, field: &Field) -> Option<NaiveDate> {
        self.read(field, parse_date).flatten()
    }

    pub fn nullable_date(&mut self, field: &Field) -> Option<Option<NaiveDate>> {
        self.read(field, parse_date)
    }

    /// Non-negative integer up to [`MAX_UNSIGNED`].
    pub fn unsigned(&mut self, field: &Field) -> Option<u32> {
        self.read(field, parse_unsigned).flatten()
    }

    pub fn boolean(&mut self, field: &Field) -> Option<bool> {
        self.read(field, parse_boolean).flatten()
    }

    /// One of a fixed set of codes, decoded by `from_code`.
    pub fn choice<C>(&mut self, field: &Field, from_code: fn(&str) -> Option<C>) -> Option<C> {
        self.read(field, |v| {
            let code = scalar_text(v).ok_or_else(|| invalid_choice(&v.to_string()))?;
            from_code(&code).ok_or_else(|| invalid_choice(&code))
        })
        .flatten()
    }

    /// Id of a related record. Existence is checked by the clients.
    pub fn primary_key(&mut self, field: &Field) -> Option<u32> {
        self.read(field, parse_primary_key).flatten()
    }

    /// List of related record ids.
    pub fn primary_keys(&mut self, field: &Field) -> Option<Vec<u32>> {
        self.read(field, |v| match v {
            Value::Array(items) => items.iter().map(parse_primary_key).collect(),
            other => Err(format!(
                "Expected a list of items but got type \"{}\".",
                json_type(other)
            )),
        })
        .flatten()
    }

    /// Applies the presence and null rules, then `parse`. `None` means absent or invalid
    /// (already recorded), `Some(None)` an accepted null.
    fn read<T>(
        &mut self,
        field: &Field,
        parse: impl FnOnce(&Value) -> Result<T, String>,
    ) -> Option<Option<T>> {
        match self.body.get(field.name) {
            None => {
                if field.required && self.mode != Mode::Partial {
                    self.errors.add(field.name, REQUIRED);
                }
                None
            }
            Some(Value::Null) if field.nullable => Some(None),
            Some(Value::Null) => {
                self.errors.add(field.name, NOT_NULL);
                None
            }
            Some(value) => match parse(value) {
                Ok(parsed) => Some(Some(parsed)),
                Err(message) => {
                    self.errors.add(field.name, message);
                    None
                }
            },
        }
    }
}

/// Type name used in error messages.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Strings and numbers as text. Booleans and containers are not text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn invalid_choice(code: &str) -> String {
    format!("\"{code}\" is not a valid choice.")
}

fn parse_text(field: &Field, value: &Value) -> Result<String, String> {
    let text = scalar_text(value).ok_or_else(|| INVALID_STRING.to_string())?;
    let text = text.trim();
    if text.is_empty() && !field.allow_blank {
        return Err(NOT_BLANK.to_string());
    }
    if let Some(max) = field.max_length {
        if text.chars().count() > max {
            return Err(format!("Ensure this field has no more than {max} characters."));
        }
    }
    Ok(text.to_string())
}

fn parse_url(field: &Field, value: &Value) -> Result<String, String> {
    let field = Field {
        max_length: field.max_length.or(Some(URL_MAX_LENGTH)),
        ..*field
    };
    let url = parse_text(&field, value)?;
    if url.is_empty() || URL_PATTERN.is_match(&url) {
        Ok(url)
    } else {
        Err(INVALID_URL.to_string())
    }
}

fn parse_email(field: &Field, value: &Value) -> Result<String, String> {
    let field = Field {
        max_length: field.max_length.or(Some(EMAIL_MAX_LENGTH)),
        ..*field
    };
    let email = parse_text(&field, value)?;
    if email.is_empty() || EMAIL_PATTERN.is_match(&email) {
        Ok(email)
    } else {
        Err(INVALID_EMAIL.to_string())
    }
}

fn parse_date(value: &Value) -> Result<NaiveDate, String> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| INVALID_DATE.to_string())
}

fn parse_unsigned(value: &Value) -> Result<u32, String> {
    let parsed: i64 = match value {
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i,
            (None, Some(_), _) => i64::MAX,
            (None, None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e18 => f as i64,
            _ => return Err(INVALID_INTEGER.to_string()),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| INVALID_INTEGER.to_string())?,
        _ => return Err(INVALID_INTEGER.to_string()),
    };
    if parsed < 0 {
        return Err("Ensure this value is greater than or equal to 0.".to_string());
    }
    if parsed as u64 > MAX_UNSIGNED {
        return Err(format!(
            "Ensure this value is less than or equal to {MAX_UNSIGNED}."
        ));
    }
    u32::try_from(parsed).map_err(|_| INVALID_INTEGER.to_string())
}

fn parse_boolean(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(INVALID_BOOLEAN.to_string()),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
            _ => Err(INVALID_BOOLEAN.to_string()),
        },
        _ => Err(INVALID_BOOLEAN.to_string()),
    }
}

fn parse_primary_key(value: &Value) -> Result<u32, String> {
    let incorrect = || format!("Incorrect type. Expected pk value, received {}.", json_type(value));
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .ok_or_else(incorrect),
        Value::String(s) => s.trim().parse::<u32>().map_err(|_| incorrect()),
        _ => Err(incorrect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TITLE: Field = Field::required("title").max_length(5);
    const NOTE: Field = Field::optional("note").blank();
    const LINK: Field = Field::optional("link").blank();
    const PHOTO: Field = Field::optional("photo").nullable().blank();

    #[test]
    fn test_non_object_body_is_rejected() {
        let err = FieldReader::new(&json!([1, 2]), Mode::Create).err().unwrap();
        assert_eq!(
            err.get(NON_FIELD_ERRORS).unwrap(),
            ["Invalid data. Expected a dictionary, but got list."]
        );
    }

    #[test]
    fn test_required_depends_on_mode() {
        let body = json!({});
        let mut create = FieldReader::new(&body, Mode::Create).unwrap();
        assert_eq!(create.text(&TITLE), None);
        assert_eq!(create.finish().unwrap_err().get("title").unwrap(), [REQUIRED]);

        let mut replace = FieldReader::new(&body, Mode::Replace).unwrap();
        replace.text(&TITLE);
        assert!(replace.finish().is_err());

        let mut partial = FieldReader::new(&body, Mode::Partial).unwrap();
        assert_eq!(partial.text(&TITLE), None);
        assert!(partial.finish().is_ok());
    }

    #[test]
    fn test_text_rules() {
        let body = json!({"title": "  toolong  ", "note": "   ", "link": 42});
        let mut reader = FieldReader::new(&body, Mode::Create).unwrap();
        assert_eq!(reader.text(&TITLE), None);
        assert_eq!(reader.text(&NOTE), Some(String::new()));
        assert_eq!(reader.text(&LINK), Some("42".to_string()));
        let errors = reader.finish().unwrap_err();
        assert_eq!(
            errors.get("title").unwrap(),
            ["Ensure this field has no more than 5 characters."]
        );

        let body = json!({"title": "", "note": true});
        let mut reader = FieldReader::new(&body, Mode::Create).unwrap();
        reader.text(&TITLE);
        reader.text(&NOTE);
        let errors = reader.finish().unwrap_err();
        assert_eq!(errors.get("title").unwrap(), [NOT_BLANK]);
        assert_eq!(errors.get("note").unwrap(), [INVALID_STRING]);
    }

    #[test]
    fn test_null_handling() {
        let body = json!({"title": null, "photo": null});
        let mut reader = FieldReader::new(&body, Mode::Partial).unwrap();
        assert_eq!(reader.text(&TITLE), None);
        assert_eq!(reader.nullable_url(&PHOTO), Some(None));
        assert_eq!(reader.finish().unwrap_err().get("title").unwrap(), [NOT_NULL]);
    }

    #[test]
    fn test_url_and_email_formats() {
        let body = json!({
            "a": "https://example.com/me.jpg",
            "b": "http://localhost:8000/media/x.png",
            "c": "not a url",
            "d": "",
            "e": "javascript:alert(1)",
            "ok": "visitor@example.org",
            "bad": "visitor@",
        });
        let mut reader = FieldReader::new(&body, Mode::Partial).unwrap();
        assert!(reader.url(&Field::optional("a")).is_some());
        assert!(reader.url(&Field::optional("b")).is_some());
        assert!(reader.url(&Field::optional("c")).is_none());
        assert_eq!(reader.url(&Field::optional("d").blank()), Some(String::new()));
        assert!(reader.url(&Field::optional("e")).is_none());
        assert!(reader.email(&Field::optional("ok")).is_some());
        assert!(reader.email(&Field::optional("bad")).is_none());

        let errors = reader.finish().unwrap_err();
        assert_eq!(errors.get("c").unwrap(), [INVALID_URL]);
        assert_eq!(errors.get("e").unwrap(), [INVALID_URL]);
        assert_eq!(errors.get("bad").unwrap(), [INVALID_EMAIL]);
    }

    #[test]
    fn test_scalar_parsers() {
        let body = json!({
            "order": "3",
            "negative": -1,
            "huge": 3_000_000_000u64,
            "fraction": 1.5,
            "flag": "yes",
            "not_flag": "maybe",
            "date": "2024-02-29",
            "bad_date": "29/02/2024",
        });
        let mut reader = FieldReader::new(&body, Mode::Partial).unwrap();
        assert_eq!(reader.unsigned(&Field::optional("order")), Some(3));
        assert_eq!(reader.unsigned(&Field::optional("negative")), None);
        assert_eq!(reader.unsigned(&Field::optional("huge")), None);
        assert_eq!(reader.unsigned(&Field::optional("fraction")), None);
        assert_eq!(reader.boolean(&Field::optional("flag")), Some(true));
        assert_eq!(reader.boolean(&Field::optional("not_flag")), None);
        assert_eq!(
            reader.date(&Field::optional("date")),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(reader.date(&Field::optional("bad_date")), None);

        let errors = reader.finish().unwrap_err();
        assert_eq!(
            errors.get("negative").unwrap(),
            ["Ensure this value is greater than or equal to 0."]
        );
        assert_eq!(
            errors.get("huge").unwrap(),
            ["Ensure this value is less than or equal to 2147483647."]
        );
        assert_eq!(errors.get("fraction").unwrap(), [INVALID_INTEGER]);
        assert_eq!(errors.get("not_flag").unwrap(), [INVALID_BOOLEAN]);
        assert_eq!(errors.get("bad_date").unwrap(), [INVALID_DATE]);
    }

    #[test]
    fn test_choices_and_keys() {
        fn level(code: &str) -> Option<u8> {
            match code {
                "beg" => Some(1),
                "adv" => Some(3),
                _ => None,
            }
        }

        let body = json!({
            "level": "adv",
            "bad_level": "expert",
            "owner": 4,
            "bad_owner": "four",
            "tags": [1, "2"],
            "bad_tags": "1,2",
        });
        let mut reader = FieldReader::new(&body, Mode::Partial).unwrap();
        assert_eq!(reader.choice(&Field::optional("level"), level), Some(3));
        assert_eq!(reader.choice(&Field::optional("bad_level"), level), None);
        assert_eq!(reader.primary_key(&Field::optional("owner")), Some(4));
        assert_eq!(reader.primary_key(&Field::optional("bad_owner")), None);
        assert_eq!(reader.primary_keys(&Field::optional("tags")), Some(vec![1, 2]));
        assert_eq!(reader.primary_keys(&Field::optional("bad_tags")), None);

        let errors = reader.finish().unwrap_err();
        assert_eq!(
            errors.get("bad_level").unwrap(),
            ["\"expert\" is not a valid choice."]
        );
        assert_eq!(
            errors.get("bad_owner").unwrap(),
            ["Incorrect type. Expected pk value, received str."]
        );
        assert_eq!(
            errors.get("bad_tags").unwrap(),
            ["Expected a list of items but got type \"str\"."]
        );
    }
}
