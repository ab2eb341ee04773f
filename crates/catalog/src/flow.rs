//! Stream combinators used by the pipeline

use async_stream::stream;
use futures::future::ready;
use futures::stream::{BoxStream, Stream, StreamExt};
use tokio::sync::watch;

/// Stream the current value of a watch channel, then every change
///
/// Ends when the sender is dropped.
pub fn watch_stream<T>(mut receiver: watch::Receiver<T>) -> BoxStream<'static, T>
where
    T: Clone + Send + Sync + 'static,
{
    Box::pin(stream! {
        loop {
            let value = receiver.borrow_and_update().clone();
            yield value;
            if receiver.changed().await.is_err() {
                break;
            }
        }
    })
}

/// Combine the latest values of two streams
///
/// Emits once both sides have produced a value, then again whenever either
/// side produces a new one. Ends when both inputs have ended.
pub fn combine_latest<A, B, T, F>(
    left: impl Stream<Item = A> + Send + 'static,
    right: impl Stream<Item = B> + Send + 'static,
    combine: F,
) -> impl Stream<Item = T> + Send + 'static
where
    A: Send + 'static,
    B: Send + 'static,
    T: Send + 'static,
    F: Fn(&A, &B) -> T + Send + 'static,
{
    stream! {
        let mut left = Box::pin(left.fuse());
        let mut right = Box::pin(right.fuse());
        let mut latest_left: Option<A> = None;
        let mut latest_right: Option<B> = None;

        loop {
            tokio::select! {
                Some(value) = left.next() => latest_left = Some(value),
                Some(value) = right.next() => latest_right = Some(value),
                else => break,
            }

            let combined = match (&latest_left, &latest_right) {
                (Some(a), Some(b)) => Some(combine(a, b)),
                _ => None,
            };
            if let Some(value) = combined {
                yield value;
            }
        }
    }
}

/// Drop items equal to the one emitted just before them
pub fn distinct_until_changed<T>(
    input: impl Stream<Item = T> + Send + 'static,
) -> impl Stream<Item = T> + Send + 'static
where
    T: PartialEq + Clone + Send + 'static,
{
    let mut last: Option<T> = None;
    input.filter(move |item| {
        let repeated = last.as_ref() == Some(item);
        if !repeated {
            last = Some(item.clone());
        }
        ready(!repeated)
    })
}
