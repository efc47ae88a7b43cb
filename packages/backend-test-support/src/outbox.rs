//! Helpers for connection outboxes (`tokio::sync::mpsc` receivers).

use tokio::sync::mpsc::UnboundedReceiver;

/// Take every message currently queued, without waiting.
pub fn drain<T>(rx: &mut UnboundedReceiver<T>) -> Vec<T> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

/// Take every queued message and keep only the last one matching `pick`.
pub fn last_matching<T, U>(
    rx: &mut UnboundedReceiver<T>,
    mut pick: impl FnMut(T) -> Option<U>,
) -> Option<U> {
    drain(rx).into_iter().filter_map(&mut pick).last()
}
