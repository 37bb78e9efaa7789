// service.rs — GoalService: validation and query semantics over a GoalStore.
//
// All input checking and search matching lives here. Callers (the HTTP
// API, the CLI) pass raw client input through untouched.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::GoalError;
use crate::goal::{Goal, GoalDraft, NewGoal, OptionSet, Recurrence, Tag};
use crate::store::GoalStore;

/// Create, list, and search goals.
pub struct GoalService {
    store: Arc<dyn GoalStore>,
}

impl GoalService {
    pub fn new(store: Arc<dyn GoalStore>) -> Self {
        Self { store }
    }

    /// Validate `input` and insert it.
    ///
    /// Fails with [`GoalError::Validation`] before touching the store when
    /// the title is blank or recurrence/tag is missing or unrecognized.
    pub fn create(&self, input: NewGoal) -> Result<Goal, GoalError> {
        let draft = validate(input)?;
        let goal = self.store.insert(draft)?;
        tracing::info!(
            goal_id = %goal.id,
            recurrence = %goal.recurrence,
            tag = %goal.tag,
            "goal created"
        );
        Ok(goal)
    }

    /// Every goal, in creation order.
    pub fn list(&self) -> Result<Vec<Goal>, GoalError> {
        self.store.list()
    }

    /// Goals whose title contains `term`, ignoring case, in creation order.
    ///
    /// The term is matched as given, whitespace included. An empty term
    /// matches everything.
    pub fn search(&self, term: &str) -> Result<Vec<Goal>, GoalError> {
        if term.is_empty() {
            return self.list();
        }
        let needle = term.to_lowercase();
        self.store
            .find_matching(&|g: &Goal| g.title.to_lowercase().contains(&needle))
    }

    pub fn get(&self, id: Uuid) -> Result<Goal, GoalError> {
        self.store.get(id)?.ok_or(GoalError::NotFound(id))
    }
}

fn validate(input: NewGoal) -> Result<GoalDraft, GoalError> {
    if input.title.trim().is_empty() {
        return Err(GoalError::validation("title", "must not be empty"));
    }
    let recurrence: Recurrence = select(input.recurrence.as_deref(), input.recurrence_index)?;
    let tag: Tag = select(input.tag.as_deref(), input.tag_index)?;

    Ok(GoalDraft {
        title: input.title,
        description: input.description,
        recurrence,
        tag,
    })
}

/// Resolve a field chosen either by name or by (clamped) position.
fn select<T: OptionSet>(name: Option<&str>, position: Option<usize>) -> Result<T, GoalError> {
    match (name, position) {
        (Some(_), Some(_)) => Err(GoalError::validation(
            T::FIELD,
            "give either a name or an index, not both",
        )),
        (Some(name), None) => T::parse(name).ok_or_else(|| {
            let known: Vec<&str> = T::options().iter().map(|o| o.name()).collect();
            GoalError::validation(
                T::FIELD,
                format!("unknown value '{}' (expected one of: {})", name, known.join(", ")),
            )
        }),
        (None, Some(position)) => Ok(T::from_position(position)),
        (None, None) => Err(GoalError::validation(T::FIELD, "is required")),
    }
}
