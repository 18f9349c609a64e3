//! Line-oriented SDL text builder

const INDENT: &str = "  ";

/// Accumulates SDL text line by line
#[derive(Debug, Default)]
pub struct SdlWriter {
    out: String,
}

impl SdlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a line at the top level
    pub fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Write an indented line inside a definition
    pub fn field(&mut self, text: &str) {
        self.out.push_str(INDENT);
        self.line(text);
    }

    /// Write an empty line
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write a whole block of text
    pub fn block(&mut self, text: &str) {
        self.out.push_str(text.trim_start_matches('\n'));
        if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn finish(self) -> String {
        self.out
    }
}
