//! Strictly sequential async runner.

use std::future::Future;

/// What a [`series`] run produced before it stopped.
#[derive(Debug)]
pub struct Series<R, E> {
    /// Results of the steps that succeeded, in order.
    pub completed: Vec<R>,
    /// The error that stopped the run, if any.
    pub error: Option<E>,
}

/// Run `step` over `items` one at a time, in order.
///
/// Each step is awaited to completion before the next starts. The first
/// error stops the run; remaining items are never started.
pub async fn series<T, R, E, F, Fut>(items: impl IntoIterator<Item = T>, mut step: F) -> Series<R, E>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let mut completed = Vec::new();
    for item in items {
        match step(item).await {
            Ok(result) => completed.push(result),
            Err(err) => {
                return Series {
                    completed,
                    error: Some(err),
                };
            }
        }
    }
    Series {
        completed,
        error: None,
    }
}
