pub mod assignment;
pub mod auth;
pub mod competency;
pub mod enrollment;
pub mod lap;
pub mod progress;
pub mod supervision;
pub mod training;
pub mod user;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use serde::Serialize;
use serde_json::{Map, Value, json};

use dti_core::error::FieldErrors;
use dti_core::serde::parse_date;
use dti_domain::WireEnum;
use dti_domain::competency::Rating;

use crate::error::TrainingServiceError;

// ── Envelope ─────────────────────────────────────────────────────────────────

/// `{"success": true, "<key>": value}` with 200.
pub fn success<T: Serialize>(key: &str, value: T) -> Json<Value> {
    Json(json!({ "success": true, key: value }))
}

/// Same envelope with 201.
pub fn created<T: Serialize>(key: &str, value: T) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, success(key, value))
}

/// `{"success": true, "message": ...}` for deletes.
pub fn deleted(message: &str) -> Json<Value> {
    Json(json!({ "success": true, "message": message }))
}

// ── Path id ──────────────────────────────────────────────────────────────────

/// Numeric `{id}` path segment. Anything else is a 404 rather than a 400.
pub struct EntityId(pub i32);

impl<S: Send + Sync> FromRequestParts<S> for EntityId {
    type Rejection = TrainingServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| TrainingServiceError::UnknownId(e.body_text()))?;
        raw.parse()
            .map(EntityId)
            .map_err(|_| TrainingServiceError::UnknownId(raw))
    }
}

// ── JSON body ────────────────────────────────────────────────────────────────

/// A JSON object body. Fields are read and validated through [`FieldReader`].
pub struct Payload(pub Map<String, Value>);

impl<S: Send + Sync> FromRequest<S> for Payload {
    type Rejection = TrainingServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| TrainingServiceError::MalformedBody(e.body_text()))?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(TrainingServiceError::MalformedBody(
                "expected a JSON object".to_owned(),
            )),
        }
    }
}

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_STRING: &str = "Not a valid string.";
const NOT_INTEGER: &str = "A valid integer is required.";
const BAD_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
const BAD_EMAIL: &str = "Enter a valid email address.";

/// Reads typed fields out of a request body, collecting one message list per bad
/// field. Call [`FieldReader::finish`] once every field has been read.
pub struct FieldReader<'a> {
    body: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(body: &'a Map<String, Value>) -> Self {
        Self {
            body,
            errors: FieldErrors::new(),
        }
    }

    /// `None` when absent or null.
    fn present(&self, name: &str) -> Option<&'a Value> {
        self.body.get(name).filter(|v| !v.is_null())
    }

    fn require(&mut self, name: &str) -> Option<&'a Value> {
        match self.body.get(name) {
            None => {
                self.errors.add(name, REQUIRED);
                None
            }
            Some(Value::Null) => {
                self.errors.add(name, NOT_NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn as_text(&mut self, name: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => {
                self.errors.add(name, NOT_STRING);
                None
            }
        }
    }

    fn as_id(&mut self, name: &str, value: &Value) -> Option<i32> {
        let parsed = match value {
            Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(name, NOT_INTEGER);
        }
        parsed
    }

    fn as_enum<T: WireEnum>(&mut self, name: &str, value: &Value) -> Option<T> {
        let text = self.as_text(name, value)?;
        match T::parse_wire(&text) {
            Ok(v) => Some(v),
            Err(e) => {
                self.errors.add(name, e.to_string());
                None
            }
        }
    }

    fn as_date(&mut self, name: &str, value: &Value) -> Option<chrono::NaiveDate> {
        let date = value.as_str().and_then(parse_date);
        if date.is_none() {
            self.errors.add(name, BAD_DATE);
        }
        date
    }

    /// Non-blank string.
    pub fn text(&mut self, name: &str) -> Option<String> {
        let value = self.require(name)?;
        let text = self.as_text(name, value)?;
        if text.trim().is_empty() {
            self.errors.add(name, NOT_BLANK);
            return None;
        }
        Some(text)
    }

    /// Optional string. Blank is allowed and returned as-is.
    pub fn opt_text(&mut self, name: &str) -> Option<String> {
        let value = self.present(name)?;
        self.as_text(name, value)
    }

    /// Optional string that, when supplied, may not be blank.
    pub fn opt_nonblank(&mut self, name: &str) -> Option<String> {
        let text = self.opt_text(name)?;
        if text.trim().is_empty() {
            self.errors.add(name, NOT_BLANK);
            return None;
        }
        Some(text)
    }

    pub fn email(&mut self, name: &str) -> Option<String> {
        let email = self.text(name)?;
        self.check_email(name, email)
    }

    pub fn opt_email(&mut self, name: &str) -> Option<String> {
        let email = self.opt_nonblank(name)?;
        self.check_email(name, email)
    }

    fn check_email(&mut self, name: &str, email: String) -> Option<String> {
        let valid = email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        });
        if !valid {
            self.errors.add(name, BAD_EMAIL);
            return None;
        }
        Some(email)
    }

    pub fn id(&mut self, name: &str) -> Option<i32> {
        let value = self.require(name)?;
        self.as_id(name, value)
    }

    pub fn opt_id(&mut self, name: &str) -> Option<i32> {
        let value = self.present(name)?;
        self.as_id(name, value)
    }

    pub fn choice<T: WireEnum>(&mut self, name: &str) -> Option<T> {
        let value = self.require(name)?;
        self.as_enum(name, value)
    }

    pub fn opt_choice<T: WireEnum>(&mut self, name: &str) -> Option<T> {
        let value = self.present(name)?;
        self.as_enum(name, value)
    }

    pub fn date(&mut self, name: &str) -> Option<chrono::NaiveDate> {
        let value = self.require(name)?;
        self.as_date(name, value)
    }

    pub fn opt_rating(&mut self, name: &str) -> Option<Rating> {
        let value = self.present(name)?;
        let rating = value
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| format!("rating must be 1, 2 or 3 (got {value})"))
            .and_then(Rating::try_from);
        match rating {
            Ok(rating) => Some(rating),
            Err(message) => {
                self.errors.add(name, message);
                None
            }
        }
    }

    /// Turn the collected messages into a `Validation` error, if any.
    pub fn finish(self) -> Result<(), TrainingServiceError> {
        self.errors.into_result().map_err(Into::into)
    }
}

/// Raised when a value the reader reported as valid is missing afterwards.
pub(crate) fn unreadable() -> TrainingServiceError {
    anyhow::anyhow!("validated request field was not captured").into()
}
