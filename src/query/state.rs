use serde::Serialize;

/// Tri-state result owned by a query.
///
/// `data` keeps its last successful value across later failures and while a
/// new fetch is in flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> QueryState<T> {
    /// Initial state: `loading` is true until the first fetch resolves.
    pub fn new(initial: T) -> Self {
        Self {
            data: initial,
            loading: true,
            error: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}
