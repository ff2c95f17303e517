//! Last commanded color per adapter-local device address.
//!
//! Owned by one adapter worker. Brightness commands that carry no color of
//! their own are dimmed from the value recorded here.

use std::collections::HashMap;

use homerouter_domain::color::Rgb;

#[derive(Debug, Default)]
pub(crate) struct ColorMemory {
    last_color: HashMap<String, Rgb>,
}

impl ColorMemory {
    /// White until a color has been commanded.
    pub(crate) fn last_color(&self, local_id: &str) -> Rgb {
        self.last_color.get(local_id).copied().unwrap_or(Rgb::WHITE)
    }

    pub(crate) fn remember(&mut self, local_id: &str, color: Rgb) {
        self.last_color.insert(local_id.to_string(), color);
    }
}
