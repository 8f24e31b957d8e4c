use super::result_set::ResultSet;

/// The result of one executed statement.
///
/// Store-level failures are absorbed into [`QueryOutcome::Failed`] rather than
/// raised, so one bad statement in a concurrent batch cannot take down its
/// siblings. Check the outcome, not a `Result`, to detect them.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum QueryOutcome {
    /// The statement ran and returned these rows (possibly none).
    Rows(ResultSet),
    /// The statement ran and its transaction committed.
    Ack,
    /// The statement failed; the error was logged and absorbed.
    Failed,
}

impl QueryOutcome {
    /// True unless the statement failed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !matches!(self, QueryOutcome::Failed)
    }

    /// The returned rows, if this outcome carries any.
    #[must_use]
    pub fn rows(&self) -> Option<&ResultSet> {
        if let QueryOutcome::Rows(set) = self {
            Some(set)
        } else {
            None
        }
    }

    /// Consume the outcome, yielding its rows if it carries any.
    #[must_use]
    pub fn into_rows(self) -> Option<ResultSet> {
        if let QueryOutcome::Rows(set) = self {
            Some(set)
        } else {
            None
        }
    }
}
