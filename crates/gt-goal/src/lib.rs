//! # gt-goal
//!
//! Goal records, their persistence, and the service that validates and
//! queries them.
//!
//! ## Key components
//!
//! - [`Goal`] — an immutable goal record with a [`Recurrence`] and a [`Tag`]
//! - [`OptionSet`] — ordered option lists with clamped position lookup
//! - [`GoalStore`] — persistence trait, with [`MemoryGoalStore`] and
//!   [`JsonlGoalStore`] implementations
//! - [`GoalService`] — create/list/search/get; the single source of
//!   validation and search semantics

pub mod error;
pub mod goal;
pub mod service;
pub mod store;

pub use error::GoalError;
pub use goal::{option_entries, Goal, GoalDraft, NewGoal, OptionEntry, OptionSet, Recurrence, Tag};
pub use service::GoalService;
pub use store::{GoalStore, JsonlGoalStore, MemoryGoalStore};
