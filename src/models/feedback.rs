use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A contributor's note attached to a retrospective.
///
/// Feedback items have no lifecycle of their own: they are created, changed,
/// and stored only through the retrospective that owns them. The `id` is
/// `None` until the item is first persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub id: Option<Uuid>,
    /// Display name of the contributor.
    pub name: String,
    pub body: Option<String>,
    pub feedback_type: FeedbackType,
}

impl FeedbackItem {
    /// Whether this item's canonical identity string equals `id` exactly.
    ///
    /// Unpersisted items never match, and neither does a malformed `id`.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.is_some_and(|own| own.to_string() == id)
    }
}

/// Classification of a feedback item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackType {
    Positive,
    Negative,
    Neutral,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "POSITIVE" => Some(Self::Positive),
            "NEGATIVE" => Some(Self::Negative),
            "NEUTRAL" => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// Input for adding a feedback item to a retrospective.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFeedbackItemInput {
    /// Display name of the contributor.
    #[validate(
        length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"),
        custom(function = "not_blank", message = "Name of the person providing feedback is required")
    )]
    pub name: String,
    #[validate(length(min = 1, max = 1000, message = "Body length must not exceed 1000 characters"))]
    pub body: Option<String>,
    pub feedback_type: FeedbackType,
}

/// Input for amending a feedback item. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_update_name"))]
pub struct UpdateFeedbackItemInput {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 1000, message = "Body length must not exceed 1000 characters"))]
    pub body: Option<String>,
    pub feedback_type: Option<FeedbackType>,
}

/// A persisted feedback item as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItemResponse {
    pub id: Option<Uuid>,
    pub name: String,
    pub body: Option<String>,
    pub feedback_type: FeedbackType,
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_update_name(input: &UpdateFeedbackItemInput) -> Result<(), ValidationError> {
    match input.name.as_deref() {
        Some(name) => not_blank(name).map_err(|mut err| {
            err.message = Some("Name of the person providing feedback must not be blank".into());
            err
        }),
        None => Ok(()),
    }
}
