use hdlscope_api::IndexState;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Progress {
    in_flight: usize,
    completed: u64,
}

/// Tracks running indexing operations.
///
/// Every rebuild or single-file update holds an [`IndexingGuard`]; waiters
/// resume once the in-flight count drops back to zero.
#[derive(Debug)]
pub(crate) struct IndexProgress {
    tx: watch::Sender<Progress>,
}

impl IndexProgress {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(Progress::default());
        Self { tx }
    }

    pub(crate) fn begin(&self) -> IndexingGuard<'_> {
        self.tx.send_modify(|p| p.in_flight += 1);
        IndexingGuard { progress: self }
    }

    pub(crate) fn state(&self) -> IndexState {
        let p = *self.tx.borrow();
        if p.in_flight > 0 {
            IndexState::Indexing
        } else if p.completed > 0 {
            IndexState::Ready
        } else {
            IndexState::Empty
        }
    }

    pub(crate) async fn wait_idle(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so this only ends when idle.
        let _ = rx.wait_for(|p| p.in_flight == 0).await;
    }
}

/// Marks one indexing operation as running until dropped.
pub(crate) struct IndexingGuard<'a> {
    progress: &'a IndexProgress,
}

impl Drop for IndexingGuard<'_> {
    fn drop(&mut self) {
        self.progress.tx.send_modify(|p| {
            p.in_flight = p.in_flight.saturating_sub(1);
            p.completed += 1;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_state_transitions() {
        let progress = IndexProgress::new();
        assert_eq!(progress.state(), IndexState::Empty);
        {
            let _guard = progress.begin();
            assert_eq!(progress.state(), IndexState::Indexing);
            let _nested = progress.begin();
        }
        assert_eq!(progress.state(), IndexState::Ready);
    }

    #[tokio::test]
    async fn test_wait_idle_returns_immediately_when_idle() {
        let progress = IndexProgress::new();
        tokio::time::timeout(Duration::from_secs(1), progress.wait_idle())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_idle_waits_for_all_operations() {
        let progress = Arc::new(IndexProgress::new());
        let (started_tx, started_rx) = tokio::sync::oneshot::channel();

        let worker = {
            let progress = progress.clone();
            tokio::spawn(async move {
                let _guard = progress.begin();
                let _ = started_tx.send(());
                tokio::time::sleep(Duration::from_millis(50)).await;
            })
        };

        started_rx.await.unwrap();
        assert_eq!(progress.state(), IndexState::Indexing);
        progress.wait_idle().await;
        assert_eq!(progress.state(), IndexState::Ready);
        worker.await.unwrap();
    }
}
