// src/console/format.rs
// Text framing shared by every console report. Clients parse these blocks, so
// the rule characters and widths are fixed.

use crate::constants::RULE_WIDTH;
use std::fmt::Display;

#[derive(Debug, Default)]
pub struct Report {
    buf: String,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn double_rule(&mut self) -> &mut Self {
        self.buf.extend(std::iter::repeat('=').take(RULE_WIDTH));
        self.buf.push('\n');
        self
    }

    pub fn single_rule(&mut self) -> &mut Self {
        self.buf.extend(std::iter::repeat('-').take(RULE_WIDTH));
        self.buf.push('\n');
        self
    }

    pub fn line(&mut self, text: impl Display) -> &mut Self {
        self.buf.push_str(&text.to_string());
        self.buf.push('\n');
        self
    }

    /// `label` immediately followed by `value`; labels carry their own separator.
    pub fn field(&mut self, label: &str, value: impl Display) -> &mut Self {
        self.buf.push_str(label);
        self.line(value)
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}
