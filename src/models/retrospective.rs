use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::feedback::{not_blank, CreateFeedbackItemInput, FeedbackItem, FeedbackItemResponse};

/// A named, dated record of a team retrospective.
///
/// The `name` is the business key: it is unique across all retrospectives and
/// fixed once created. The `id` is assigned by the store on first save and is
/// never used for lookups by callers.
///
/// Feedback items are kept in insertion order. New items are always appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retrospective {
    pub id: Option<Uuid>,
    pub name: String,
    pub summary: Option<String>,
    pub date: NaiveDate,
    pub participants: Vec<String>,
    pub feedback_items: Vec<FeedbackItem>,
}

/// Input for creating a new retrospective.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRetrospectiveInput {
    #[validate(
        length(min = 1, max = 255, message = "Name length must be between 1 and 255 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,
    #[validate(length(max = 1000, message = "Summary length must not exceed 1000 characters"))]
    pub summary: Option<String>,
    pub date: NaiveDate,
    /// Display names of everyone who took part. Must not be empty.
    #[validate(length(min = 1, message = "Participants list is required"))]
    pub participants: Vec<String>,
    /// Feedback recorded at creation time, in order.
    #[serde(default)]
    #[validate(nested)]
    pub feedback_items: Vec<CreateFeedbackItemInput>,
}

/// A retrospective as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrospectiveResponse {
    pub name: String,
    pub summary: Option<String>,
    pub date: NaiveDate,
    pub participants: Vec<String>,
    pub feedback_items: Vec<FeedbackItemResponse>,
}
