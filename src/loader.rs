//! Background report gathering.
//!
//! The worker thread only ever writes into its own slot; the UI thread polls
//! the slot once per frame and owns every screen transition.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use egui::mutex::Mutex;
use log::{error, info};

use crate::error::Result;
use crate::report::SystemReport;

/// Outcome handed from the worker to the UI. Errors are flattened to their
/// message since only the text is shown.
pub type Outcome = std::result::Result<SystemReport, String>;

pub struct Loader {
    slot: Arc<Mutex<Option<Outcome>>>,
}

impl Loader {
    /// Run `gather` on a new thread, then call `notify` so the UI wakes up.
    pub fn spawn<G, N>(gather: G, notify: N) -> Self
    where
        G: FnOnce() -> Result<SystemReport> + Send + 'static,
        N: FnOnce() + Send + 'static,
    {
        let slot = Arc::new(Mutex::new(None));
        let arc_slot = Arc::clone(&slot);

        thread::spawn(move || {
            let started = Instant::now();
            let outcome = match panic::catch_unwind(AssertUnwindSafe(gather)) {
                Ok(result) => result.map_err(|err| {
                    error!("failed to gather system information: {err}");
                    err.to_string()
                }),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!("failed to gather system information: {message}");
                    Err(message)
                }
            };
            info!("report gathering finished in {:?}", started.elapsed());

            *arc_slot.lock() = Some(outcome);
            notify();
        });

        Self { slot }
    }

    /// Take the outcome if the worker has finished. Returns it at most once.
    pub fn poll(&self) -> Option<Outcome> {
        self.slot.lock().take()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_owned()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown cause".to_owned()
    };
    format!("gathering panicked: {detail}")
}
