//! Condition waiting over an externally mutating resource.
//!
//! [`wait_until`] resolves once a predicate over some external resource
//! first yields a value. The resource is reached only through two
//! caller-supplied closures, the predicate itself and a subscription hook
//! that installs a change callback, which keeps this primitive decoupled
//! from any particular resource.

use std::future;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

/// Handle an external change source invokes when the watched resource
/// mutates. Cloneable so a source can hand it to several internal
/// callbacks; every invocation re-evaluates the owning waiter's predicate.
#[derive(Clone)]
pub struct ChangeNotifier {
    inner: Arc<dyn Fn() + Send + Sync>,
}

impl ChangeNotifier {
    fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self { inner: Arc::new(f) }
    }

    /// Signal that the watched resource changed.
    pub fn notify(&self) {
        (self.inner)();
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangeNotifier")
    }
}

/// Capability to tear down a change subscription.
///
/// Held by the waiter for its entire pending lifetime and cancelled
/// exactly once, on first satisfaction. There is deliberately no teardown
/// on drop: a waiter that never resolves keeps its subscription installed.
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wrap the teardown action for a freshly installed subscription.
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    fn cancel(mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Subscription")
    }
}

/// Everything a pending wait owns. Consumed whole on first satisfaction,
/// so later notifications find nothing to act on.
struct Pending<T, P> {
    predicate: P,
    sender: oneshot::Sender<T>,
    subscription: Option<Subscription>,
}

type WaitState<T, P> = Mutex<Option<Pending<T, P>>>;

/// Resolve once `predicate` first yields a value.
///
/// The predicate is evaluated on first poll; if it already yields a value
/// the future resolves with it and `subscribe` is never invoked.
/// Otherwise `subscribe` is called with a [`ChangeNotifier`] to install a
/// change callback on the external source, and every notification
/// re-evaluates the predicate. On first satisfaction the subscription is
/// cancelled, exactly once, and then the future resolves.
///
/// Two races are closed here. A mutation landing between the initial
/// check and the installation of the subscription produces no
/// notification, so the predicate is re-evaluated once right after
/// `subscribe` returns. And a notification that satisfies the predicate
/// while the subscription handle is still in flight resolves the wait
/// immediately; the handle is then cancelled as soon as `subscribe`
/// hands it back.
///
/// There is no timeout: if the predicate never holds, the future stays
/// pending indefinitely, as it does if the source drops its callback
/// without ever notifying. Callers needing bounded waiting wrap the
/// future themselves, e.g. in `tokio::time::timeout`.
pub async fn wait_until<T, P, S>(mut predicate: P, subscribe: S) -> T
where
    T: Send + 'static,
    P: FnMut() -> Option<T> + Send + 'static,
    S: FnOnce(ChangeNotifier) -> Subscription,
{
    if let Some(value) = predicate() {
        return value;
    }

    let (sender, receiver) = oneshot::channel();
    let state = Arc::new(Mutex::new(Some(Pending {
        predicate,
        sender,
        subscription: None,
    })));

    let notifier = ChangeNotifier::new({
        let state = Arc::clone(&state);
        move || check(&state)
    });

    let subscription = subscribe(notifier);
    install(&state, subscription);

    // From here the pending state lives only inside the source's callback;
    // if the source drops it, the sender goes with it.
    drop(state);

    match receiver.await {
        Ok(value) => value,
        // The source dropped its callback without the predicate ever
        // holding; the contract is to stay pending, not to fail.
        Err(_) => future::pending().await,
    }
}

/// Re-evaluate the predicate; on first satisfaction consume the pending
/// state, cancel the subscription, then deliver the value.
fn check<T, P>(state: &WaitState<T, P>)
where
    P: FnMut() -> Option<T>,
{
    let mut slot = state.lock().unwrap();
    let value = match slot.as_mut() {
        Some(pending) => match (pending.predicate)() {
            Some(value) => value,
            None => return,
        },
        // Already resolved; the subscription is long gone.
        None => return,
    };

    if let Some(mut pending) = slot.take() {
        drop(slot);
        if let Some(subscription) = pending.subscription.take() {
            subscription.cancel();
        }
        // Delivery can only fail if the waiter future was dropped; the
        // value has nowhere to go then.
        let _ = pending.sender.send(value);
    }
}

/// Hand the freshly returned subscription to the pending wait, covering
/// both installation races.
fn install<T, P>(state: &WaitState<T, P>, subscription: Subscription)
where
    P: FnMut() -> Option<T>,
{
    let leftover = {
        let mut slot = state.lock().unwrap();
        match slot.as_mut() {
            Some(pending) => {
                pending.subscription = Some(subscription);
                None
            }
            None => Some(subscription),
        }
    };

    match leftover {
        // Mutations between the initial predicate check and this point
        // are not reported; look once more before settling in to wait.
        None => check(state),
        // A notification satisfied the predicate while the handle was
        // still in flight, so the teardown falls to us.
        Some(subscription) => subscription.cancel(),
    }
}
