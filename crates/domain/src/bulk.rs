use serde::{Deserialize, Serialize};

/// Summary of an operation applied to a set of reminders.
///
/// Failing items never abort the batch, they are counted in `failed`
/// and, when a reason is known, described in `errors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkResult {
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl BulkResult {
    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.failed += 1;
        self.errors.push(error.into());
    }

    /// Result of a natively batched write where only the number of
    /// matched documents is known
    pub fn from_matched(submitted: usize, matched: u64) -> Self {
        let successful = usize::try_from(matched).unwrap_or(usize::MAX).min(submitted);
        Self {
            successful,
            failed: submitted - successful,
            errors: Vec::new(),
        }
    }

    /// The whole batch failed with a single cause
    pub fn from_batch_error(submitted: usize, error: impl Into<String>) -> Self {
        Self {
            successful: 0,
            failed: submitted,
            errors: vec![error.into()],
        }
    }

    pub fn total(&self) -> usize {
        self.successful + self.failed
    }
}
