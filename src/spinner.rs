//! Indeterminate progress indicator shown while a call is in flight.
//!
//! Draws to stderr and disappears on finish, so it never pollutes the
//! rendered output on stdout. indicatif hides it on its own when
//! stderr is not a terminal. Purely cosmetic.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Start spinning with the operation name as the message.
    pub fn start(operation: &'static str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .expect("spinner template is valid")
                .tick_chars("▁▃▄▅▆▇█▇▆▅▄▃"),
        );
        bar.set_message(operation);
        bar.enable_steady_tick(Duration::from_millis(250));
        Self { bar }
    }

    /// Stop spinning and erase the indicator line.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
