//! Domain models for the retrospective service.
//!
//! # Core Concepts
//!
//! - [`Retrospective`]: A named, dated record aggregating participants and
//!   feedback. The name is the business key and never changes after creation.
//! - [`FeedbackItem`]: A contributor's note, owned by exactly one retrospective.
//!   Items are appended or amended in place, never shared or deleted.
//! - [`Page`]: A bounded slice of an ordered result set with total-count metadata.
//!
//! Input records (`Create*Input`, `Update*Input`) are converted into entities
//! and merged onto existing ones through the explicit functions in [`merge`].
//! Entities leave the service as `*Response` records.

mod feedback;
pub mod merge;
mod page;
mod retrospective;

pub use feedback::*;
pub use merge::Merge;
pub use page::*;
pub use retrospective::*;
