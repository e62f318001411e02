use std::{sync::Arc, time::Duration};

use log::{debug, info};
use smart_wallet_utils::sdk::SocialLoginSdk;
use tokio::{
    sync::watch,
    time::{interval, MissedTickBehavior},
};

/// cancels an in-flight wait for the wallet provider. clones share the same signal.
#[derive(Debug, Clone)]
pub struct LoginCancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for LoginCancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginCancelHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum WaitOutcome<P> {
    Ready(P),
    Cancelled,
    Exhausted(u32),
}

/// polls `sdk` every `period` until it exposes a provider.
///
/// returns early once `cancel` fires, or after `max_attempts` polls when bounded.
pub async fn wait_for_provider<S: SocialLoginSdk>(
    sdk: &S,
    period: Duration,
    max_attempts: Option<u32>,
    cancel: &LoginCancelHandle,
) -> WaitOutcome<S::Provider> {
    let mut cancelled = cancel.subscribe();
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempt: u32 = 0;

    loop {
        if *cancelled.borrow() {
            info!("provider wait cancelled after {attempt} attempts");
            return WaitOutcome::Cancelled;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            changed = cancelled.changed() => {
                if changed.is_err() {
                    return WaitOutcome::Cancelled;
                }
                continue;
            }
        }

        attempt += 1;

        if let Some(provider) = sdk.provider() {
            info!("provider ready after {attempt} attempts");
            return WaitOutcome::Ready(provider);
        }
        debug!("provider attempt {attempt}: not ready");

        if max_attempts.is_some_and(|max| attempt >= max) {
            return WaitOutcome::Exhausted(attempt);
        }
    }
}
