//! One-shot readiness handshake between the game loop and its host
//!
//! The host (whatever owns the window, the overlay, or in the CLI the trace
//! sink) gets a `ReadySignal` and fires it once its resource exists. The game
//! awaits the paired `Readiness` with a deadline instead of polling.

use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;

/// Fifty checks at 100 ms each
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Error, PartialEq)]
pub enum StartupError {
    #[error("host was not ready after {0:?}")]
    Timeout(Duration),
    #[error("host went away before signalling readiness")]
    Abandoned,
}

/// Held by the host; consumed when it signals
#[derive(Debug)]
pub struct ReadySignal<T> {
    tx: oneshot::Sender<T>,
}

impl<T> ReadySignal<T> {
    pub fn ready(self, value: T) {
        // the waiter may already have timed out
        let _ = self.tx.send(value);
    }
}

/// Held by the game; resolves at most once
#[derive(Debug)]
pub struct Readiness<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Readiness<T> {
    pub async fn wait(self, timeout: Duration) -> Result<T, StartupError> {
        match tokio::time::timeout(timeout, self.rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(StartupError::Abandoned),
            Err(_) => Err(StartupError::Timeout(timeout)),
        }
    }
}

pub fn readiness<T>() -> (ReadySignal<T>, Readiness<T>) {
    let (tx, rx) = oneshot::channel();
    (ReadySignal { tx }, Readiness { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_before_wait() {
        let (signal, ready) = readiness();
        signal.ready(42u32);
        assert_eq!(ready.wait(Duration::from_millis(50)).await, Ok(42));
    }

    #[tokio::test]
    async fn test_ready_from_task() {
        let (signal, ready) = readiness();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            signal.ready("renderer");
        });
        assert_eq!(ready.wait(Duration::from_secs(2)).await, Ok("renderer"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let (_signal, ready) = readiness::<()>();
        let timeout = Duration::from_millis(20);
        assert_eq!(ready.wait(timeout).await, Err(StartupError::Timeout(timeout)));
    }

    #[tokio::test]
    async fn test_dropped_signal() {
        let (signal, ready) = readiness::<()>();
        drop(signal);
        assert_eq!(
            ready.wait(Duration::from_secs(1)).await,
            Err(StartupError::Abandoned)
        );
    }
}
