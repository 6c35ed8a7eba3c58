// Cancellable repeating task used for lobby polling and the turn countdown.
//
// Owns at most one tokio task. `start` aborts the running task before
// spawning its replacement, so an owner can never have two tickers alive.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Default)]
pub struct RepeatingTask {
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTask {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Run `tick` immediately, then every `period`, until stopped or until
    /// `tick` returns `false`. Ticks never overlap: the next one waits for
    /// the previous future to finish, and missed ticks are skipped.
    pub fn start<F, Fut>(&mut self, period: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.stop();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if !tick().await {
                    break;
                }
            }
        }));
    }

    /// Abort the task. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.stop();
    }
}
