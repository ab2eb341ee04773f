//! Load state emitted by the pipeline streams

use apptoolkit_api_client::LoadErrorKind;
use serde::Serialize;

/// State of a value that is loaded asynchronously
///
/// `Loading` may carry partial data so a screen can keep showing what it has
/// while a refresh is running. Cancellation is not a state: dropping the
/// stream simply stops it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum DataState<T> {
    /// Work in progress, with partial data if any
    Loading(Option<T>),
    /// Loaded successfully
    Success(T),
    /// Loading failed
    Error(LoadErrorKind),
}

impl<T> DataState<T> {
    /// Transform the carried data, keeping the state
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DataState<U> {
        match self {
            Self::Loading(partial) => DataState::Loading(partial.map(f)),
            Self::Success(data) => DataState::Success(f(data)),
            Self::Error(kind) => DataState::Error(kind),
        }
    }

    /// Borrow the carried data
    pub fn as_ref(&self) -> DataState<&T> {
        match self {
            Self::Loading(partial) => DataState::Loading(partial.as_ref()),
            Self::Success(data) => DataState::Success(data),
            Self::Error(kind) => DataState::Error(*kind),
        }
    }

    /// Still loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }
}
