//! CLI command implementations

pub mod apps;
pub mod favorites;
pub mod open;
pub mod prefs;
pub mod toggle;

use apptoolkit_catalog::DataState;
use futures::stream::{BoxStream, StreamExt};

/// First state that is not `Loading`
///
/// Favorites streams never end, so commands stop at the first settled state.
pub(crate) async fn first_settled<T>(mut states: BoxStream<'static, DataState<T>>) -> Option<DataState<T>> {
    while let Some(state) = states.next().await {
        if !state.is_loading() {
            return Some(state);
        }
    }
    None
}
