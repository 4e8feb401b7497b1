//! Persistence client: timeout enforcement and the single-in-flight save
//! discipline.
//!
//! Saves never interleave partial writes: a layout snapshot is serialized
//! wholesale by the store, and at most one save request is on the wire at
//! a time. A save requested while one is in flight is queued with
//! last-submit-wins semantics — the queued snapshot replaces any earlier
//! unsent one, and is sent when the in-flight request settles.

use crate::store::{LayoutStore, PersistenceError};
use pagecraft_blocks::Layout;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// What happened to a save request.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveReport {
    /// The snapshot (or a newer queued one) reached the store.
    Saved { canvas_id: String, saved_at: i64 },

    /// A save was already in flight; this snapshot is queued and will be
    /// sent when the in-flight request settles. `replaced` is true when
    /// it displaced an older unsent snapshot.
    Queued { replaced: bool },
}

#[derive(Debug, Default)]
struct ClientState {
    in_flight: bool,
    queued: Option<Layout>,
}

/// Client wrapper around a [`LayoutStore`] collaborator.
#[derive(Debug)]
pub struct PersistenceClient<S> {
    store: S,
    timeout: Duration,
    state: Mutex<ClientState>,
}

impl<S: LayoutStore> PersistenceClient<S> {
    pub fn new(store: S, timeout: Duration) -> Self {
        Self {
            store,
            timeout,
            state: Mutex::new(ClientState::default()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load a layout document. Times out as a failure, never a silent
    /// retry.
    #[instrument(skip(self))]
    pub async fn load(&self, canvas_id: &str) -> Result<Layout, PersistenceError> {
        match tokio::time::timeout(self.timeout, self.store.load(canvas_id)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(canvas_id, "load timed out");
                Err(PersistenceError::Timeout(self.timeout))
            }
        }
    }

    /// Save a layout snapshot.
    ///
    /// If a save is already in flight the snapshot is queued
    /// (last-submit-wins) and `Queued` is returned immediately; the task
    /// driving the in-flight save will send it afterwards. The caller's
    /// in-memory store is never touched here — on failure it remains
    /// exactly as it was.
    #[instrument(skip(self, layout), fields(canvas_id = %layout.canvas_id))]
    pub async fn save(&self, layout: Layout) -> Result<SaveReport, PersistenceError> {
        {
            let mut state = self.state.lock().unwrap();
            if state.in_flight {
                let replaced = state.queued.replace(layout).is_some();
                debug!(replaced, "save queued behind in-flight request");
                return Ok(SaveReport::Queued { replaced });
            }
            state.in_flight = true;
        }

        let mut current = layout;
        loop {
            let outcome = self.send(&current).await;

            let next = {
                let mut state = self.state.lock().unwrap();
                let next = state.queued.take();
                if next.is_none() {
                    state.in_flight = false;
                }
                next
            };

            match next {
                // A newer snapshot arrived while we were sending; it
                // supersedes whatever just happened.
                Some(next) => current = next,
                None => {
                    return outcome.map(|_| SaveReport::Saved {
                        canvas_id: current.canvas_id.clone(),
                        saved_at: current.saved_at,
                    })
                }
            }
        }
    }

    async fn send(&self, layout: &Layout) -> Result<(), PersistenceError> {
        match tokio::time::timeout(self.timeout, self.store.save(layout)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(canvas_id = %layout.canvas_id, "save timed out");
                Err(PersistenceError::Timeout(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_save_and_load() {
        let client = PersistenceClient::new(MemoryStore::new(), Duration::from_secs(1));
        let mut layout = Layout::empty("canvas-1");
        layout.saved_at = 42;

        let report = client.save(layout.clone()).await.unwrap();
        assert_eq!(
            report,
            SaveReport::Saved {
                canvas_id: "canvas-1".to_string(),
                saved_at: 42
            }
        );

        let loaded = client.load("canvas-1").await.unwrap();
        assert_eq!(loaded, layout);
    }

    struct SlowStore;

    impl LayoutStore for SlowStore {
        async fn load(&self, _canvas_id: &str) -> Result<Layout, PersistenceError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            unreachable!("the timeout fires first")
        }

        async fn save(&self, _layout: &Layout) -> Result<(), PersistenceError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            unreachable!("the timeout fires first")
        }
    }

    #[tokio::test]
    async fn test_timeout_is_reported_not_retried() {
        let client = PersistenceClient::new(SlowStore, Duration::from_millis(100));

        let err = client.load("canvas-1").await.unwrap_err();
        assert!(matches!(err, PersistenceError::Timeout(_)));

        let err = client.save(Layout::empty("canvas-1")).await.unwrap_err();
        assert!(matches!(err, PersistenceError::Timeout(_)));
    }

    /// Store whose first save parks until released, so a second save can
    /// be issued while one is in flight.
    struct GatedStore {
        inner: MemoryStore,
        gate: tokio::sync::Semaphore,
    }

    impl GatedStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                gate: tokio::sync::Semaphore::new(0),
            }
        }
    }

    impl LayoutStore for GatedStore {
        async fn load(&self, canvas_id: &str) -> Result<Layout, PersistenceError> {
            self.inner.load(canvas_id).await
        }

        async fn save(&self, layout: &Layout) -> Result<(), PersistenceError> {
            let permit = self.gate.acquire().await.unwrap();
            permit.forget();
            self.inner.save(layout).await
        }
    }

    #[tokio::test]
    async fn test_second_save_queues_with_last_submit_wins() {
        let client = std::sync::Arc::new(PersistenceClient::new(
            GatedStore::new(),
            Duration::from_secs(5),
        ));

        let mut v1 = Layout::empty("canvas-1");
        v1.saved_at = 1;
        let mut v2 = Layout::empty("canvas-1");
        v2.saved_at = 2;
        let mut v3 = Layout::empty("canvas-1");
        v3.saved_at = 3;

        let driver = {
            let client = client.clone();
            tokio::spawn(async move { client.save(v1).await })
        };

        // Wait until the first save is actually in flight.
        while !client.state.lock().unwrap().in_flight {
            tokio::task::yield_now().await;
        }

        // Both of these land while v1 is parked; v3 replaces v2.
        assert_eq!(
            client.save(v2).await.unwrap(),
            SaveReport::Queued { replaced: false }
        );
        assert_eq!(
            client.save(v3).await.unwrap(),
            SaveReport::Queued { replaced: true }
        );

        // Release v1 and then v3 (v2 never hits the wire).
        client.store().gate.add_permits(2);

        let report = driver.await.unwrap().unwrap();
        assert_eq!(
            report,
            SaveReport::Saved {
                canvas_id: "canvas-1".to_string(),
                saved_at: 3
            }
        );
        assert_eq!(client.store().inner.get("canvas-1").unwrap().saved_at, 3);
    }
}
