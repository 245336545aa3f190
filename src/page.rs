//! Abstraction over the page whose controls are being driven.
//!
//! A concrete binding (a browser bridge in production, an in-memory fake
//! in tests) implements [`PageHost`]; everything above works purely in
//! terms of this trait, so the crate never links a browser engine.

use std::sync::Arc;

use crate::wait::{wait_until, ChangeNotifier, Subscription};

/// The surface a page binding must present: control lookup, control
/// manipulation, and a batched mutation-notification subscription.
pub trait PageHost: Send + Sync + 'static {
    /// Opaque handle to a form control on the page.
    type Control: Clone + Send + 'static;

    /// Look up a control by CSS selector.
    fn query(&self, selector: &str) -> Option<Self::Control>;

    /// Current value of a numeric input.
    fn number_value(&self, control: &Self::Control) -> f64;

    /// Write a numeric input's value.
    ///
    /// Framework-managed inputs ignore a bare write until an input event
    /// follows; see [`PageHost::emit_input`].
    fn set_number_value(&self, control: &Self::Control, value: f64);

    /// Dispatch the bubbling input event that makes the page's framework
    /// pick up a value written with [`PageHost::set_number_value`].
    fn emit_input(&self, control: &Self::Control);

    /// Whether a toggle switch is currently on.
    fn is_switch_on(&self, control: &Self::Control) -> bool;

    /// Activate a control (a click, for a toggle switch).
    fn click(&self, control: &Self::Control);

    /// Register a batched mutation callback on the page. The returned
    /// [`Subscription`] unregisters it.
    fn watch_mutations(&self, notifier: ChangeNotifier) -> Subscription;
}

/// Resolve once the control matching `selector` appears on the page.
///
/// Looks the selector up immediately and falls back to watching page
/// mutations, so a control that is slow to render is picked up the moment
/// it lands. Never gives up: waiting on a control the page will never
/// show means waiting forever.
pub async fn wait_for_control<H: PageHost>(host: &Arc<H>, selector: &str) -> H::Control {
    let lookup = {
        let host = Arc::clone(host);
        let selector = selector.to_string();
        move || host.query(&selector)
    };
    wait_until(lookup, |notifier| host.watch_mutations(notifier)).await
}
