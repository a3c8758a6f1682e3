//! Field-wise conversion between input records, entities, and responses.
//!
//! Every copyable field is listed explicitly. Identity fields are never
//! written from input: new entities start with `id: None` and merges leave
//! the target's `id` alone.

use super::{
    CreateFeedbackItemInput, CreateRetrospectiveInput, FeedbackItem, FeedbackItemResponse,
    Retrospective, RetrospectiveResponse, UpdateFeedbackItemInput,
};

/// Overlay the present fields of `source` onto `self` in place.
pub trait Merge<Source: ?Sized> {
    fn merge(&mut self, source: &Source);
}

impl Merge<UpdateFeedbackItemInput> for FeedbackItem {
    fn merge(&mut self, source: &UpdateFeedbackItemInput) {
        if let Some(name) = &source.name {
            self.name.clone_from(name);
        }
        if let Some(body) = &source.body {
            self.body = Some(body.clone());
        }
        if let Some(feedback_type) = source.feedback_type {
            self.feedback_type = feedback_type;
        }
    }
}

impl From<CreateFeedbackItemInput> for FeedbackItem {
    fn from(input: CreateFeedbackItemInput) -> Self {
        Self {
            id: None,
            name: input.name,
            body: input.body,
            feedback_type: input.feedback_type,
        }
    }
}

impl From<CreateRetrospectiveInput> for Retrospective {
    fn from(input: CreateRetrospectiveInput) -> Self {
        Self {
            id: None,
            name: input.name,
            summary: input.summary,
            date: input.date,
            participants: input.participants,
            feedback_items: input.feedback_items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<FeedbackItem> for FeedbackItemResponse {
    fn from(item: FeedbackItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            body: item.body,
            feedback_type: item.feedback_type,
        }
    }
}

impl From<Retrospective> for RetrospectiveResponse {
    fn from(retrospective: Retrospective) -> Self {
        Self {
            name: retrospective.name,
            summary: retrospective.summary,
            date: retrospective.date,
            participants: retrospective.participants,
            feedback_items: retrospective
                .feedback_items
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}
