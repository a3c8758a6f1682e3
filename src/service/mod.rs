//! Business rules for retrospectives and their feedback items.
//!
//! [`RetrospectiveService`] is stateless: every call reads from and writes to
//! the injected [`RetrospectiveStore`], and each successful write is a single
//! terminal `save`. Concurrent writers to the same retrospective are not
//! coordinated here; the last save wins.

mod error;

pub use error::ServiceError;

use std::sync::Arc;

use chrono::NaiveDate;
use validator::Validate;

use crate::db::RetrospectiveStore;
use crate::models::*;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Clone)]
pub struct RetrospectiveService {
    store: Arc<dyn RetrospectiveStore>,
}

impl RetrospectiveService {
    pub fn new(store: Arc<dyn RetrospectiveStore>) -> Self {
        Self { store }
    }

    /// Create a retrospective with a name no other retrospective uses.
    ///
    /// Fails with [`ServiceError::AlreadyExists`] without writing anything if
    /// the name is taken.
    pub fn create_retrospective(
        &self,
        input: CreateRetrospectiveInput,
    ) -> ServiceResult<RetrospectiveResponse> {
        input.validate()?;
        tracing::info!(name = %input.name, "Creating retrospective");

        if self.store.find_by_name(&input.name)?.is_some() {
            tracing::warn!(name = %input.name, "Retrospective already exists");
            return Err(ServiceError::AlreadyExists(input.name));
        }

        let saved = self.store.save(Retrospective::from(input))?;
        tracing::info!(name = %saved.name, "Retrospective created");
        Ok(saved.into())
    }

    /// Append a feedback item to the named retrospective.
    pub fn add_feedback_item(
        &self,
        retrospective_name: &str,
        input: CreateFeedbackItemInput,
    ) -> ServiceResult<RetrospectiveResponse> {
        input.validate()?;
        tracing::info!(retrospective = retrospective_name, "Adding feedback item");

        let mut retrospective = self.get_by_name(retrospective_name)?;
        retrospective.feedback_items.push(FeedbackItem::from(input));

        let saved = self.store.save(retrospective)?;
        Ok(saved.into())
    }

    /// Amend the feedback item whose id renders as `feedback_item_id`.
    ///
    /// Only the fields present in `input` change. On a miss nothing is saved
    /// and [`ServiceError::FeedbackItemNotFound`] is returned.
    pub fn update_feedback_item(
        &self,
        retrospective_name: &str,
        feedback_item_id: &str,
        input: UpdateFeedbackItemInput,
    ) -> ServiceResult<RetrospectiveResponse> {
        input.validate()?;
        tracing::info!(
            retrospective = retrospective_name,
            feedback_item = feedback_item_id,
            "Updating feedback item"
        );

        let mut retrospective = self.get_by_name(retrospective_name)?;

        let Some(index) = retrospective
            .feedback_items
            .iter()
            .position(|item| item.has_id(feedback_item_id))
        else {
            tracing::warn!(
                retrospective = retrospective_name,
                feedback_item = feedback_item_id,
                "Feedback item not found"
            );
            return Err(ServiceError::FeedbackItemNotFound {
                retrospective: retrospective_name.to_string(),
                id: feedback_item_id.to_string(),
            });
        };

        retrospective.feedback_items[index].merge(&input);

        let saved = self.store.save(retrospective)?;
        Ok(saved.into())
    }

    pub fn get_all_retrospectives(
        &self,
        page: u32,
        page_size: u32,
    ) -> ServiceResult<Page<RetrospectiveResponse>> {
        let request = page_request(page, page_size)?;
        tracing::debug!(page, page_size, "Fetching all retrospectives");

        let result = self.store.find_all(request)?;
        tracing::debug!(total = result.total_elements, "Retrieved retrospectives");
        Ok(result.map(Into::into))
    }

    pub fn search_retrospectives_by_date(
        &self,
        date: NaiveDate,
        page: u32,
        page_size: u32,
    ) -> ServiceResult<Page<RetrospectiveResponse>> {
        let request = page_request(page, page_size)?;
        tracing::debug!(%date, page, page_size, "Searching retrospectives by date");

        let result = self.store.find_by_date(date, request)?;
        tracing::debug!(%date, total = result.total_elements, "Retrieved retrospectives");
        Ok(result.map(Into::into))
    }

    fn get_by_name(&self, name: &str) -> ServiceResult<Retrospective> {
        self.store.find_by_name(name)?.ok_or_else(|| {
            tracing::warn!(retrospective = name, "Retrospective not found");
            ServiceError::NotFound(name.to_string())
        })
    }
}

fn page_request(page: u32, page_size: u32) -> ServiceResult<PageRequest> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ServiceError::Validation(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(PageRequest::new(page, page_size))
}
