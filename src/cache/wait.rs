//! Bounded wait on a refresh completing.

use std::time::Duration;

use tokio::sync::Notify;

/// Suspends until `done()` holds or `timeout` elapses.
///
/// Wakes on every `notify` signal and additionally re-checks `done()` every
/// `poll_interval`, so a missed notification costs at most one interval.
/// Returns true if the predicate held before the deadline.
pub async fn wait_until<F>(notify: &Notify, mut done: F, timeout: Duration, poll_interval: Duration) -> bool
where
    F: FnMut() -> bool,
{
    let wait = async {
        loop {
            let notified = notify.notified();
            tokio::pin!(notified);
            // Register before checking so a signal between the check and the
            // await is not lost.
            notified.as_mut().enable();

            if done() {
                return;
            }

            tokio::select! {
                _ = &mut notified => {}
                _ = tokio::time::sleep(poll_interval) => {}
            }
        }
    };

    tokio::time::timeout(timeout, wait).await.is_ok()
}
