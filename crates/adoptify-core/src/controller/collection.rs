// ── Remote collection controller ──
//
// Owns one backend collection, a detail slot and loading/error/message
// flags. Every mutation re-fetches the authoritative list before it
// settles; the collection is never patched in place.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::state::{CollectionState, Settlement};
use crate::error::CoreError;
use crate::gateway::{Ack, CollectionApi, NestedCollectionApi};
use crate::model::EntityId;
use crate::stream::StateStream;

/// Handle to a remote collection. Cloning is cheap and every clone
/// drives the same state.
pub struct RemoteCollection<A: CollectionApi> {
    inner: Arc<Inner<A>>,
}

struct Inner<A: CollectionApi> {
    api: A,
    state: watch::Sender<CollectionState<A::Item>>,
    /// Actions currently awaiting the network. `loading` mirrors `> 0`.
    in_flight: AtomicUsize,
    list_generation: AtomicU64,
    detail_generation: AtomicU64,
    cancel: CancellationToken,
}

impl<A: CollectionApi> Clone for RemoteCollection<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Marks one action in flight; settles `loading` on drop, including when
/// the action future itself is dropped.
struct PendingGuard<'a, T> {
    state: &'a watch::Sender<CollectionState<T>>,
    in_flight: &'a AtomicUsize,
}

impl<T> Drop for PendingGuard<'_, T> {
    fn drop(&mut self) {
        let in_flight = self.in_flight;
        self.state.send_modify(|s| {
            let remaining = in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
            s.loading = remaining > 0;
        });
    }
}

impl<A: CollectionApi> RemoteCollection<A> {
    pub fn new(api: A) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                state: watch::Sender::new(CollectionState::default()),
                in_flight: AtomicUsize::new(0),
                list_generation: AtomicU64::new(0),
                detail_generation: AtomicU64::new(0),
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// The gateway this controller talks to.
    pub fn api(&self) -> &A {
        &self.inner.api
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Load the whole collection, replacing `items` on success.
    pub async fn fetch_all(&self) -> Settlement {
        if self.is_closed() {
            return Settlement::Cancelled;
        }
        let generation = self.inner.list_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _pending = self.begin();

        match self.request(self.inner.api.list()).await {
            None => Settlement::Cancelled,
            Some(Ok(items)) => {
                let count = items.len();
                let items: Arc<Vec<_>> = Arc::new(items.into_iter().map(Arc::new).collect());
                let outcome = self.apply_current(&self.inner.list_generation, generation, |s| {
                    s.items = items;
                    s.error = None;
                });
                debug!(resource = A::RESOURCE, count, %outcome, "collection loaded");
                outcome
            }
            Some(Err(e)) => {
                let outcome = self.apply_current(&self.inner.list_generation, generation, |s| {
                    s.error = Some(e.display_message());
                });
                if outcome.is_applied() {
                    log_failure(A::RESOURCE, "fetch_all", &e);
                    Settlement::Failed
                } else {
                    outcome
                }
            }
        }
    }

    /// Load one entity into `detail`. Never touches `items`.
    pub async fn get_by_id(&self, id: &EntityId) -> Settlement {
        if self.is_closed() {
            return Settlement::Cancelled;
        }
        let generation = self.inner.detail_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _pending = self.begin();

        match self.request(self.inner.api.get(id)).await {
            None => Settlement::Cancelled,
            Some(Ok(item)) => {
                let item = Arc::new(item);
                self.apply_current(&self.inner.detail_generation, generation, |s| {
                    s.detail = Some(item);
                    s.error = None;
                })
            }
            Some(Err(e)) => {
                let outcome = self.apply_current(&self.inner.detail_generation, generation, |s| {
                    s.error = Some(e.display_message());
                });
                if outcome.is_applied() {
                    log_failure(A::RESOURCE, "get_by_id", &e);
                    Settlement::Failed
                } else {
                    outcome
                }
            }
        }
    }

    pub async fn create(&self, data: &A::Create) -> Settlement {
        self.mutate("create", self.inner.api.create(data)).await
    }

    pub async fn update_by_id(&self, id: &EntityId, data: &A::Update) -> Settlement {
        self.mutate("update_by_id", self.inner.api.update(id, data))
            .await
    }

    pub async fn delete_by_id(&self, id: &EntityId) -> Settlement {
        self.mutate("delete_by_id", self.inner.api.delete(id)).await
    }

    /// Clear `error` and `message`.
    pub fn dismiss(&self) {
        self.inner.state.send_if_modified(|s| {
            let changed = s.error.is_some() || s.message.is_some();
            s.error = None;
            s.message = None;
            changed
        });
    }

    /// Cancel in-flight actions and refuse new ones.
    pub fn close(&self) {
        debug!(resource = A::RESOURCE, "closing controller");
        self.inner.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    // ── Read paths ───────────────────────────────────────────────────

    pub fn state(&self) -> CollectionState<A::Item> {
        self.inner.state.borrow().clone()
    }

    pub fn items(&self) -> Arc<Vec<Arc<A::Item>>> {
        Arc::clone(&self.inner.state.borrow().items)
    }

    pub fn detail(&self) -> Option<Arc<A::Item>> {
        self.inner.state.borrow().detail.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    pub fn message(&self) -> Option<String> {
        self.inner.state.borrow().message.clone()
    }

    pub fn subscribe(&self) -> StateStream<CollectionState<A::Item>> {
        StateStream::new(self.inner.state.subscribe())
    }

    // ── Internals ────────────────────────────────────────────────────

    fn begin(&self) -> PendingGuard<'_, A::Item> {
        let in_flight = &self.inner.in_flight;
        self.inner.state.send_modify(|s| {
            in_flight.fetch_add(1, Ordering::SeqCst);
            s.loading = true;
        });
        PendingGuard {
            state: &self.inner.state,
            in_flight,
        }
    }

    /// Race a request against the controller's cancellation token.
    async fn request<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            () = self.inner.cancel.cancelled() => None,
            result = fut => Some(result),
        }
    }

    /// Apply `f` only if `generation` is still the newest issued on
    /// `counter`. The check runs under the state lock.
    fn apply_current(
        &self,
        counter: &AtomicU64,
        generation: u64,
        f: impl FnOnce(&mut CollectionState<A::Item>),
    ) -> Settlement {
        let applied = self.inner.state.send_if_modified(|s| {
            if counter.load(Ordering::SeqCst) != generation {
                return false;
            }
            f(s);
            true
        });
        if applied {
            Settlement::Applied
        } else {
            debug!(resource = A::RESOURCE, generation, "stale response discarded");
            Settlement::Superseded
        }
    }

    /// Shared tail of every mutation: record the confirmation, then
    /// re-fetch and settle only once the collection reflects the server.
    async fn mutate<F>(&self, action: &'static str, fut: F) -> Settlement
    where
        F: Future<Output = Result<Ack, CoreError>>,
    {
        if self.is_closed() {
            return Settlement::Cancelled;
        }
        let _pending = self.begin();

        match self.request(fut).await {
            None => Settlement::Cancelled,
            Some(Ok(ack)) => {
                debug!(resource = A::RESOURCE, action, message = ?ack.message, "mutation confirmed");
                self.inner.state.send_modify(|s| {
                    s.message = ack.message;
                    s.error = None;
                });
                match self.fetch_all().await {
                    // A newer load already brought the collection up to date.
                    Settlement::Superseded => Settlement::Applied,
                    other => other,
                }
            }
            Some(Err(e)) => {
                log_failure(A::RESOURCE, action, &e);
                self.inner.state.send_modify(|s| {
                    s.error = Some(e.display_message());
                });
                Settlement::Failed
            }
        }
    }
}

impl<A: NestedCollectionApi> RemoteCollection<A> {
    /// Create a sub-resource under `parent`, then re-fetch the collection.
    pub async fn add_child(&self, parent: &EntityId, child: &A::Child) -> Settlement {
        self.mutate("add_child", self.inner.api.add_child(parent, child))
            .await
    }
}

fn log_failure(resource: &str, action: &str, error: &CoreError) {
    warn!(resource, action, error = %error, "remote operation failed");
}
