//! # Campus UI Runtime
//!
//! Runtime implementation for Campus Events UI components.
//!
//! This crate provides the Store runtime that coordinates reducer execution,
//! effect handling and the component lifecycle.
//!
//! ## Core Components
//!
//! - **Store**: Owns one component's state and executes its effects
//! - **Effect Executor**: Runs effect descriptions on tokio and feeds actions back
//! - **Lifecycle**: `unmount` aborts cancellable effects and discards late results
//!
//! ## Example
//!
//! ```ignore
//! use campus_ui_runtime::Store;
//!
//! let store = Store::new(SidebarState::default(), SidebarReducer::new(), env);
//!
//! // Mount: start polling
//! store.send(SidebarAction::Appeared).await?;
//!
//! // Render
//! let view = store.state(sidebar::view).await;
//!
//! // Teardown: stop timers, ignore in-flight responses
//! store.unmount_with(SidebarAction::Disappeared).await?;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::watch;

pub use store::Store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The component was unmounted and no longer accepts actions
        #[error("Component is unmounted")]
        Unmounted,

        /// Timeout waiting for an action or for effects to finish
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

/// Shared counter of effects spawned by one `send`.
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    fn begin(&self) -> TrackingGuard {
        self.counter.fetch_add(1, Ordering::SeqCst);
        TrackingGuard(self.clone())
    }
}

/// Decrements the effect counter when the effect task finishes or is aborted.
struct TrackingGuard(EffectTracking);

impl Drop for TrackingGuard {
    fn drop(&mut self) {
        self.0.counter.fetch_sub(1, Ordering::SeqCst);
        self.0.notifier.send_replace(());
    }
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`]. Waiting on it resolves once every effect
/// spawned directly by that action has finished and any action it produced
/// has been reduced.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(ManualInputAction::Submit).await?;
/// handle.wait().await;
/// ```
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    #[must_use]
    pub fn completed() -> Self {
        let (handle, _tracking) = Self::new();
        handle
    }

    /// Number of effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`error::StoreError::Timeout`] if the timeout expires first.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), error::StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| error::StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Store module - the runtime for one component instance
pub mod store {
    use super::error::StoreError;
    use super::{EffectHandle, EffectTracking};
    use campus_ui_core::effect::{Effect, EffectId};
    use campus_ui_core::reducer::Reducer;
    use futures::StreamExt;
    use futures::future::BoxFuture;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;
    use tokio::sync::{RwLock, broadcast, watch};
    use tokio::task::AbortHandle;

    type CancelRegistry = Arc<Mutex<HashMap<EffectId, Vec<AbortHandle>>>>;

    /// The Store - runtime for one mounted component
    ///
    /// One store per component instance: there is no global store, so two
    /// sidebars (or two scanners) never share timers or state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        mounted: Arc<AtomicBool>,
        cancellables: CancelRegistry,
        /// Actions produced by effects, for observers (tests, hosts awaiting results)
        action_broadcast: broadcast::Sender<A>,
        /// Bumped after every reduce so hosts know when to re-render
        revision: watch::Sender<u64>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                mounted: Arc::clone(&self.mounted),
                cancellables: Arc::clone(&self.cancellables),
                action_broadcast: self.action_broadcast.clone(),
                revision: self.revision.clone(),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new, mounted store with initial state, reducer, and environment
        ///
        /// Action broadcast capacity defaults to 16.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
        }

        /// Create a new store with a custom action broadcast capacity
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity.max(1));
            let (revision, _) = watch::channel(0);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                mounted: Arc::new(AtomicBool::new(true)),
                cancellables: Arc::new(Mutex::new(HashMap::new())),
                action_broadcast,
                revision,
            }
        }

        /// Whether the component is still mounted
        #[must_use]
        pub fn is_mounted(&self) -> bool {
            self.mounted.load(Ordering::SeqCst)
        }

        /// Send an action to the store
        ///
        /// Runs the reducer under the state lock, then spawns the returned
        /// effects. The returned handle resolves when those effects finish.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Unmounted`] if the component was torn down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if !self.is_mounted() {
                return Err(StoreError::Unmounted);
            }

            let effects = {
                let mut state = self.state.write().await;
                self.reducer.reduce(&mut state, action, &self.environment)
            };
            self.revision.send_modify(|revision| *revision = revision.wrapping_add(1));

            let (handle, tracking) = EffectHandle::new();
            for effect in effects {
                self.execute(effect, &tracking);
            }

            Ok(handle)
        }

        /// Send an action and wait for a matching action produced by its effects
        ///
        /// Subscribes to the action broadcast BEFORE sending to avoid races.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: no matching action before the timeout
        /// - [`StoreError::ChannelClosed`]: the broadcast channel closed
        /// - [`StoreError::Unmounted`]: the component was torn down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to actions produced by effects
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Subscribe to state revisions (one bump per reduced action)
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<u64> {
            self.revision.subscribe()
        }

        /// Read current state via a closure
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Abort every running effect registered under `id`
        pub fn cancel(&self, id: EffectId) {
            let handles = self
                .cancellables
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id);

            if let Some(handles) = handles {
                tracing::debug!(effect_id = %id, count = handles.len(), "Cancelling effects");
                for handle in handles {
                    handle.abort();
                }
            }
        }

        /// Tear the component down
        ///
        /// Aborts all cancellable effects. Futures already in flight keep
        /// running but their results are discarded instead of reduced.
        pub fn unmount(&self) {
            if !self.mounted.swap(false, Ordering::SeqCst) {
                return;
            }

            let registry: Vec<(EffectId, Vec<AbortHandle>)> = self
                .cancellables
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .drain()
                .collect();

            for (id, handles) in registry {
                tracing::debug!(effect_id = %id, "Aborting effect on unmount");
                for handle in handles {
                    handle.abort();
                }
            }

            tracing::debug!("Component unmounted");
        }

        /// Send a teardown action, wait for its effects, then unmount
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Unmounted`] if the component was already torn down.
        pub async fn unmount_with(&self, action: A) -> Result<(), StoreError> {
            let mut handle = self.send(action).await?;
            handle.wait().await;
            self.unmount();
            Ok(())
        }

        fn execute(&self, effect: Effect<A>, tracking: &EffectTracking) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    metrics::counter!("campus_ui.effects.executed", "type" => "none").increment(1);
                },
                Effect::Cancel(id) => {
                    metrics::counter!("campus_ui.effects.executed", "type" => "cancel").increment(1);
                    self.cancel(id);
                },
                Effect::Cancellable { id, effect } => {
                    let handle = self.spawn_tracked(*effect, tracking);
                    self.register(id, handle);
                },
                effect => {
                    let _ = self.spawn_tracked(effect, tracking);
                },
            }
        }

        fn spawn_tracked(&self, effect: Effect<A>, tracking: &EffectTracking) -> AbortHandle {
            let guard = tracking.begin();
            let store = self.clone();

            let task = tokio::spawn(async move {
                let _guard = guard;
                store.run(effect).await;
            });

            task.abort_handle()
        }

        fn register(&self, id: EffectId, handle: AbortHandle) {
            if !self.is_mounted() {
                handle.abort();
                return;
            }

            let mut registry = self
                .cancellables
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let handles = registry.entry(id).or_default();
            handles.retain(|existing| !existing.is_finished());
            handles.push(handle);
        }

        fn run(self, effect: Effect<A>) -> BoxFuture<'static, ()> {
            Box::pin(async move {
                match effect {
                    Effect::None => {},
                    Effect::Future(fut) => {
                        tracing::trace!("Executing Effect::Future");
                        metrics::counter!("campus_ui.effects.executed", "type" => "future")
                            .increment(1);
                        if let Some(action) = fut.await {
                            self.feed_back(action).await;
                        }
                    },
                    Effect::Delay { duration, action } => {
                        tracing::trace!(?duration, "Executing Effect::Delay");
                        metrics::counter!("campus_ui.effects.executed", "type" => "delay")
                            .increment(1);
                        tokio::time::sleep(duration).await;
                        self.feed_back(*action).await;
                    },
                    Effect::Stream(mut stream) => {
                        tracing::trace!("Executing Effect::Stream");
                        metrics::counter!("campus_ui.effects.executed", "type" => "stream")
                            .increment(1);
                        while let Some(action) = stream.next().await {
                            if !self.is_mounted() {
                                break;
                            }
                            self.feed_back(action).await;
                        }
                    },
                    Effect::Parallel(effects) => {
                        tracing::trace!(count = effects.len(), "Executing Effect::Parallel");
                        let runs = effects.into_iter().map(|effect| self.clone().run(effect));
                        futures::future::join_all(runs).await;
                    },
                    Effect::Sequential(effects) => {
                        tracing::trace!(count = effects.len(), "Executing Effect::Sequential");
                        for effect in effects {
                            self.clone().run(effect).await;
                        }
                    },
                    Effect::Cancellable { id, effect } => {
                        let task = tokio::spawn(self.clone().run(*effect));
                        self.register(id, task.abort_handle());
                        // A cancelled task yields a JoinError, which is the expected outcome
                        let _ = task.await;
                    },
                    Effect::Cancel(id) => self.cancel(id),
                }
            })
        }

        async fn feed_back(&self, action: A) {
            if !self.is_mounted() {
                tracing::debug!("Component unmounted, discarding effect result");
                metrics::counter!("campus_ui.actions.dropped").increment(1);
                return;
            }

            let _ = self.action_broadcast.send(action.clone());

            if let Err(error) = self.send(action).await {
                tracing::debug!(%error, "Effect result not reduced");
            }
        }
    }
}
