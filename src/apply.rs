//! Applying persisted preferences to the page.
//!
//! The entry point is [`apply_settings`]: wait for the controls, load the
//! settings, then run one application step per control through
//! [`run_independent_tasks`] so that every step that went wrong is
//! reported, not just the first.

use std::sync::Arc;

use thiserror::Error;

use crate::config::SELECTORS;
use crate::outcome::{err, ok, Outcome};
use crate::page::{wait_for_control, PageHost};
use crate::settings::{SettingsError, SettingsStore};
use crate::tasks::run_independent_tasks;

/// Failure while applying preferences to the page.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// No control on the page matches the selector.
    #[error("no control matches selector `{0}`")]
    ControlNotFound(String),

    /// The settings record could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Look up a control, failing if it is not present right now.
pub fn find_control<H: PageHost>(host: &H, selector: &str) -> Outcome<H::Control, ApplyError> {
    match host.query(selector) {
        Some(control) => ok(control),
        None => err(ApplyError::ControlNotFound(selector.to_string())),
    }
}

/// Write `value` into a numeric input.
///
/// The write is followed by an input event so the page's framework picks
/// up the new value; a bare property write is not enough on
/// framework-managed inputs.
pub fn apply_number_value<H: PageHost>(
    host: &H,
    control: &H::Control,
    value: f64,
) -> Outcome<H::Control, ApplyError> {
    host.set_number_value(control, value);
    host.emit_input(control);
    ok(control.clone())
}

/// Drive a toggle switch to `desired`.
///
/// Clicks only when the current state differs; a switch already in the
/// desired state is left untouched.
pub fn apply_switch_state<H: PageHost>(
    host: &H,
    control: &H::Control,
    desired: bool,
) -> Outcome<H::Control, ApplyError> {
    if host.is_switch_on(control) != desired {
        host.click(control);
    }
    ok(control.clone())
}

/// Apply the persisted settings to the page.
///
/// Waits, without timeout, for the temperature input and the two tool
/// switches, loads the settings, then applies every step regardless of
/// earlier failures and reports the full set of errors. The success
/// payload is the list of controls touched, in application order. A
/// settings-load failure surfaces as a single-element failure list so the
/// aggregate's error payload stays uniform.
pub async fn apply_settings<H: PageHost>(
    host: &Arc<H>,
    store: &SettingsStore,
) -> Outcome<Vec<H::Control>, Vec<ApplyError>> {
    tracing::info!("Waiting for page controls");

    // All three waiters are started before any is awaited; a control that
    // renders late only delays its own step.
    let (temperature_input, web_search_switch, url_context_switch) = tokio::join!(
        wait_for_control(host, SELECTORS.temperature_input),
        wait_for_control(host, SELECTORS.web_search_switch),
        wait_for_control(host, SELECTORS.url_context_switch),
    );

    store
        .load()
        .await
        .map_err(|e| vec![ApplyError::Settings(e)])
        .and_then(|settings| {
            let tasks: Vec<Box<dyn FnOnce() -> Outcome<H::Control, ApplyError> + '_>> = vec![
                Box::new(|| {
                    apply_number_value(host.as_ref(), &temperature_input, settings.temperature)
                }),
                Box::new(|| {
                    apply_switch_state(host.as_ref(), &web_search_switch, settings.enable_web_search)
                }),
                Box::new(|| {
                    apply_switch_state(
                        host.as_ref(),
                        &url_context_switch,
                        settings.enable_url_context,
                    )
                }),
            ];
            run_independent_tasks(tasks)
        })
        .tap(|controls| tracing::info!("Applied all {} settings", controls.len()))
        .tap_err(|errors| {
            tracing::warn!("Some settings were not applied:");
            for error in errors {
                tracing::warn!("- {}", error);
            }
        })
}
