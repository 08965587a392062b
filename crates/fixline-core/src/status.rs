// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use std::sync::{Arc, Mutex};

pub const STATUS_LOADING: &str = "Loading route...";
pub const STATUS_FETCH_FAILED: &str = "An error occurred while fetching route data.";
pub const STATUS_CANCELLED: &str = "Route request cancelled.";

pub fn missing_fixes_message(missing: &[String]) -> String {
    format!("⚠️ Missing fixes: {}", missing.join(", "))
}

/// Single line of human-readable progress shown next to the route input.
pub trait StatusSink {
    fn set(&self, message: &str);

    fn clear(&self) {
        self.set("");
    }
}

/// Status line that keeps its latest text. Clones share the same line.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    text: Arc<Mutex<String>>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text
            .lock()
            .map(|t| t.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl StatusSink for StatusLine {
    fn set(&self, message: &str) {
        let mut text = self.text.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *text = message.to_string();
    }
}

impl<T: StatusSink + ?Sized> StatusSink for &T {
    fn set(&self, message: &str) {
        (**self).set(message)
    }

    fn clear(&self) {
        (**self).clear()
    }
}
