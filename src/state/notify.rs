//! Notification State
//!
//! Toast message signals shared across the component tree.

use leptos::*;

/// Error and success toast messages. Signals are `Copy`, so the whole
/// struct can be captured by value in event handlers.
#[derive(Clone, Copy)]
pub struct Notifications {
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

/// Provide notification state to the component tree.
pub fn provide_notifications() {
    provide_context(Notifications {
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    });
}

impl Notifications {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
