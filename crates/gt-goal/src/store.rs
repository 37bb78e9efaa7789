// store.rs — GoalStore trait plus in-memory and JSONL implementations.
//
// The store is the only shared mutable state in the system. It assigns
// identity and creation time on insert and always returns records in
// insertion order. Inserts serialize on the store's lock; reads may run
// alongside them and may or may not observe an in-flight insert.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use uuid::Uuid;

use crate::error::GoalError;
use crate::goal::{Goal, GoalDraft};

/// Persistence for goal records.
///
/// Implementations are shared across request handlers behind an `Arc`,
/// so every method takes `&self` and handles its own locking.
pub trait GoalStore: Send + Sync {
    /// Assign `id` and `created_at`, persist, and return the stored record.
    fn insert(&self, draft: GoalDraft) -> Result<Goal, GoalError>;

    /// All records in insertion order. Each call re-reads current state.
    fn list(&self) -> Result<Vec<Goal>, GoalError>;

    /// Records satisfying `predicate`, in insertion order.
    fn find_matching(&self, predicate: &dyn Fn(&Goal) -> bool) -> Result<Vec<Goal>, GoalError> {
        Ok(self.list()?.into_iter().filter(|g| predicate(g)).collect())
    }

    /// Look up a record by identity.
    fn get(&self, id: Uuid) -> Result<Option<Goal>, GoalError> {
        Ok(self.list()?.into_iter().find(|g| g.id == id))
    }
}

/// Volatile store; contents are dropped with the process.
#[derive(Default)]
pub struct MemoryGoalStore {
    goals: RwLock<Vec<Goal>>,
}

impl MemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GoalStore for MemoryGoalStore {
    fn insert(&self, draft: GoalDraft) -> Result<Goal, GoalError> {
        let mut goals = self.goals.write().map_err(|_| GoalError::LockPoisoned)?;
        let goal = Goal::from_draft(draft);
        goals.push(goal.clone());
        Ok(goal)
    }

    fn list(&self) -> Result<Vec<Goal>, GoalError> {
        let goals = self.goals.read().map_err(|_| GoalError::LockPoisoned)?;
        Ok(goals.clone())
    }

    fn find_matching(&self, predicate: &dyn Fn(&Goal) -> bool) -> Result<Vec<Goal>, GoalError> {
        let goals = self.goals.read().map_err(|_| GoalError::LockPoisoned)?;
        Ok(goals.iter().filter(|g| predicate(g)).cloned().collect())
    }

    fn get(&self, id: Uuid) -> Result<Option<Goal>, GoalError> {
        let goals = self.goals.read().map_err(|_| GoalError::LockPoisoned)?;
        Ok(goals.iter().find(|g| g.id == id).cloned())
    }
}

/// Append-only JSON Lines store: one goal per line, in insertion order.
///
/// A trailing line without its newline is an insert still being written
/// and is not yet visible to readers.
pub struct JsonlGoalStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlGoalStore {
    /// Open a store at `path`. Creates the parent directory if needed;
    /// the file itself is created on first insert.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, GoalError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> GoalError {
        GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Cut the file back to its last newline and return the new length.
    ///
    /// Only called under the write lock, so a fragment here is left over
    /// from an insert that died mid-write.
    fn truncate_to_last_line(&self, file: &mut File) -> std::io::Result<u64> {
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(0);
        }
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        if last[0] == b'\n' {
            return Ok(len);
        }

        let mut content = Vec::with_capacity(len as usize);
        file.seek(SeekFrom::Start(0))?;
        file.read_to_end(&mut content)?;
        let keep = content
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |end| end as u64 + 1);
        file.set_len(keep)?;
        tracing::warn!(
            path = %self.path.display(),
            dropped_bytes = len - keep,
            "dropped unterminated trailing line"
        );
        Ok(keep)
    }
}

impl GoalStore for JsonlGoalStore {
    fn insert(&self, draft: GoalDraft) -> Result<Goal, GoalError> {
        let _guard = self.write_lock.lock().map_err(|_| GoalError::LockPoisoned)?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        let len_before = self
            .truncate_to_last_line(&mut file)
            .map_err(|e| self.io_error(e))?;

        let goal = Goal::from_draft(draft);
        let mut line = serde_json::to_string(&goal)?;
        line.push('\n');

        // Single write so a line lands whole.
        if let Err(e) = file.write_all(line.as_bytes()).and_then(|()| file.flush()) {
            if let Err(rollback) = file.set_len(len_before) {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %rollback,
                    "could not roll back partial append"
                );
            }
            return Err(self.io_error(e));
        }

        tracing::debug!(goal_id = %goal.id, path = %self.path.display(), "goal appended");
        Ok(goal)
    }

    fn list(&self) -> Result<Vec<Goal>, GoalError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let complete = match content.rfind('\n') {
            Some(end) => &content[..=end],
            None => "",
        };

        let mut goals = Vec::new();
        for (i, line) in complete.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let goal: Goal =
                serde_json::from_str(line).map_err(|source| GoalError::CorruptRecord {
                    path: self.path.display().to_string(),
                    line: i + 1,
                    source,
                })?;
            goals.push(goal);
        }
        Ok(goals)
    }
}
