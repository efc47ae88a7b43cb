//! Deferred removal of matches nobody is connected to.
//!
//! A timer is a spawned sleep tagged with a generation number. Cancelling
//! aborts the task; a timer that already woke up is recognised as stale by
//! its generation when it reaches the match mutex.

use std::sync::Weak;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{info, warn};

use crate::services::registry::{MatchId, MatchRegistry};

pub struct AbandonTimer {
    pub generation: u64,
    handle: AbortHandle,
}

impl AbandonTimer {
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

/// Schedule `expire_abandoned(id, generation)` after `grace`.
///
/// Returns `None` outside a tokio runtime; the match then simply stays.
pub fn arm(
    registry: Weak<MatchRegistry>,
    id: MatchId,
    generation: u64,
    grace: Duration,
) -> Option<AbandonTimer> {
    let Ok(runtime) = Handle::try_current() else {
        warn!(match_id = %id, "[REGISTRY] no runtime, abandonment timer not armed");
        return None;
    };
    let task = runtime.spawn(async move {
        tokio::time::sleep(grace).await;
        let Some(registry) = registry.upgrade() else {
            return;
        };
        if registry.expire_abandoned(&id, generation) {
            info!(match_id = %id, generation, "[REGISTRY] abandoned match expired");
        }
    });
    Some(AbandonTimer {
        generation,
        handle: task.abort_handle(),
    })
}
