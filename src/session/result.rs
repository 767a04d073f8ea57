use crate::task::{outcome_path, ErrorKind, Outcome};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Outcomes of all files of one session, keyed by path. Each input path has exactly one outcome.
/// Iteration follows the order in which paths were given, regardless of the order of completion.
#[derive(Debug)]
pub struct BatchResult {
    order: Vec<PathBuf>,
    outcomes: HashMap<PathBuf, Outcome>,
}

impl BatchResult {
    pub(crate) fn new(order: Vec<PathBuf>, outcomes: Vec<Outcome>) -> Self {
        Self {
            order,
            outcomes: outcomes
                .into_iter()
                .map(|outcome| (outcome_path(&outcome).to_path_buf(), outcome))
                .collect(),
        }
    }

    /// Returns the outcome of the given file.
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&Outcome> {
        self.outcomes.get(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of files which haven't been hashed.
    pub fn failed(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_err()).count()
    }

    /// Number of files failed with the given kind of error.
    pub fn failed_with(&self, kind: ErrorKind) -> usize {
        self.outcomes
            .values()
            .filter(|o| matches!(o, Err(err) if err.kind() == kind))
            .count()
    }

    /// Iterates over outcomes in the order of input paths.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Outcome)> {
        self.order.iter().filter_map(|path| {
            self.outcomes
                .get(path)
                .map(|outcome| (path.as_path(), outcome))
        })
    }
}
