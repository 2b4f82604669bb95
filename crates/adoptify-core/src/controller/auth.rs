// ── Auth controller ──
//
// The remote-collection pattern specialized to zero-or-one entity: the
// user behind the current session token. Adopted pets are a derived read
// path over that user.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use secrecy::SecretString;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::state::{AuthState, Settlement};
use crate::error::CoreError;
use crate::gateway::SessionApi;
use crate::model::{Pet, User};
use crate::requests::{LoginRequest, SignupRequest};
use crate::stream::StateStream;

pub struct AuthController<A: SessionApi> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    api: A,
    state: watch::Sender<AuthState>,
    in_flight: AtomicUsize,
    /// Bumped by every session action and by logout; a response applies
    /// only while its generation is current.
    generation: AtomicU64,
    cancel: CancellationToken,
}

impl<A: SessionApi> Clone for AuthController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct PendingGuard<'a> {
    state: &'a watch::Sender<AuthState>,
    in_flight: &'a AtomicUsize,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let in_flight = self.in_flight;
        self.state.send_modify(|s| {
            let remaining = in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
            s.loading = remaining > 0;
        });
    }
}

impl<A: SessionApi> AuthController<A> {
    pub fn new(api: A) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                state: watch::Sender::new(AuthState::default()),
                in_flight: AtomicUsize::new(0),
                generation: AtomicU64::new(0),
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Register an account, then log in with the same credentials.
    pub async fn signup(&self, request: &SignupRequest) -> Settlement {
        if self.is_closed() {
            return Settlement::Cancelled;
        }
        let generation = self.next_generation();
        let _pending = self.begin();

        match self.request(self.inner.api.signup(request)).await {
            None => return Settlement::Cancelled,
            Some(Ok(ack)) => {
                info!(username = %request.username, "account created");
                self.inner.state.send_modify(|s| {
                    s.message = ack.message;
                    s.error = None;
                });
            }
            Some(Err(e)) => return self.fail(generation, "signup", &e),
        }

        let credentials = LoginRequest::from(request);
        let outcome = self
            .request(self.authenticate(generation, &credentials))
            .await;
        self.settle_user(generation, "signup", outcome)
    }

    /// Exchange credentials for a session, then load the user.
    pub async fn login(&self, request: &LoginRequest) -> Settlement {
        if self.is_closed() {
            return Settlement::Cancelled;
        }
        let generation = self.next_generation();
        let _pending = self.begin();

        let outcome = self.request(self.authenticate(generation, request)).await;
        let settled = self.settle_user(generation, "login", outcome);
        if settled.is_applied() {
            info!(email = %request.email, "logged in");
        }
        settled
    }

    /// Reload the user from the installed session token. An expired or
    /// rejected token ends the session.
    pub async fn refresh(&self) -> Settlement {
        if self.is_closed() {
            return Settlement::Cancelled;
        }
        let generation = self.next_generation();
        let _pending = self.begin();

        let outcome = self.request(self.inner.api.verify()).await;
        if let Some(Err(CoreError::Unauthorized { .. })) = outcome {
            self.inner.state.send_if_modified(|s| {
                if self.inner.generation.load(Ordering::SeqCst) != generation {
                    return false;
                }
                debug!("session rejected, dropping token");
                self.inner.api.logout();
                s.user = None;
                true
            });
        }
        self.settle_user(generation, "refresh", outcome.map(|r| r.map(Some)))
    }

    /// Install a previously persisted token and load its user.
    pub async fn restore_session(&self, token: SecretString) -> Settlement {
        if self.is_closed() {
            return Settlement::Cancelled;
        }
        self.inner.api.restore(token);
        self.refresh().await
    }

    /// Drop the token and the user. Never fails; pending session actions
    /// are superseded.
    pub fn logout(&self) -> Settlement {
        // Same lock as `install_token`: a login that lost the race never
        // installs its token after this.
        self.inner.state.send_modify(|s| {
            self.next_generation();
            self.inner.api.logout();
            s.user = None;
            s.error = None;
            s.message = None;
        });
        info!("logged out");
        Settlement::Applied
    }

    pub fn dismiss(&self) {
        self.inner.state.send_if_modified(|s| {
            let changed = s.error.is_some() || s.message.is_some();
            s.error = None;
            s.message = None;
            changed
        });
    }

    pub fn close(&self) {
        debug!("closing auth controller");
        self.inner.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    // ── Read paths ───────────────────────────────────────────────────

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn user(&self) -> Option<Arc<User>> {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().user.is_some()
    }

    /// The user's adopted pets; empty when logged out.
    pub fn adopted_pets(&self) -> Vec<Pet> {
        self.inner.state.borrow().adopted_pets()
    }

    /// The current session token, for the caller to persist.
    pub fn session_token(&self) -> Option<SecretString> {
        self.inner.api.token()
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

    pub fn subscribe(&self) -> StateStream<AuthState> {
        StateStream::new(self.inner.state.subscribe())
    }

    // ── Internals ────────────────────────────────────────────────────

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn begin(&self) -> PendingGuard<'_> {
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

    async fn request<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            () = self.inner.cancel.cancelled() => None,
            result = fut => Some(result),
        }
    }

    /// Log in and load the user. `Ok(None)` means the login was
    /// superseded before its token could be installed.
    async fn authenticate(
        &self,
        generation: u64,
        request: &LoginRequest,
    ) -> Result<Option<User>, CoreError> {
        let token = self.inner.api.login(request).await?;
        if !self.install_token(generation, token) {
            return Ok(None);
        }
        self.inner.api.verify().await.map(Some)
    }

    /// Install `token` only while `generation` is current. Runs under the
    /// state lock, serialized with `logout`.
    fn install_token(&self, generation: u64, token: SecretString) -> bool {
        let mut installed = false;
        self.inner.state.send_if_modified(|_| {
            if self.inner.generation.load(Ordering::SeqCst) == generation {
                self.inner.api.restore(token);
                installed = true;
            }
            false
        });
        installed
    }

    fn settle_user(
        &self,
        generation: u64,
        action: &'static str,
        outcome: Option<Result<Option<User>, CoreError>>,
    ) -> Settlement {
        match outcome {
            None => Settlement::Cancelled,
            Some(Ok(None)) => {
                debug!(action, "superseded before the session was installed");
                Settlement::Superseded
            }
            Some(Ok(Some(user))) => {
                let user = Arc::new(user);
                let applied = self.inner.state.send_if_modified(|s| {
                    if self.inner.generation.load(Ordering::SeqCst) != generation {
                        return false;
                    }
                    s.user = Some(user);
                    s.error = None;
                    true
                });
                if applied {
                    Settlement::Applied
                } else {
                    debug!(action, "stale session response discarded");
                    Settlement::Superseded
                }
            }
            Some(Err(e)) => self.fail(generation, action, &e),
        }
    }

    fn fail(&self, generation: u64, action: &'static str, error: &CoreError) -> Settlement {
        let applied = self.inner.state.send_if_modified(|s| {
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            s.error = Some(error.display_message());
            true
        });
        if applied {
            warn!(resource = "auth", action, error = %error, "remote operation failed");
            Settlement::Failed
        } else {
            Settlement::Superseded
        }
    }
}
