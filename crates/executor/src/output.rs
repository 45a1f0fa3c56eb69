//! Output of a handled request.

/// Successful protocol results.
///
/// `Execute` yields `Table` when the statement produced a result set and
/// `Empty` when it did not; `Save` always yields `Empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// CSV text of a result set
    Table(String),
    /// Nothing to send back
    Empty,
}

impl Output {
    /// Response body for this output.
    pub fn into_body(self) -> String {
        match self {
            Output::Table(csv) => csv,
            Output::Empty => String::new(),
        }
    }

    /// True for [`Output::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Output::Empty)
    }
}
