//! Indented text buffer for emitting generated source.
//!
//! Blocks opened with [`CodeWriter::begin`] are closed with a matching
//! [`CodeWriter::end`]. Dispatch code that conditionally opens blocks routes
//! them through a [`Scope`] token instead: the token counts what was opened
//! and [`CodeWriter::close_scope`] consumes it, so every dispatch closes
//! exactly what it opened regardless of which branches ran.

const INDENT: &str = "    ";

/// Append-only indented source buffer.
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    indent: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indent.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Open a labeled block: `header {`.
    pub fn begin(&mut self, header: &str) {
        let mut opener = String::with_capacity(header.len() + 2);
        opener.push_str(header);
        if !header.is_empty() {
            opener.push(' ');
        }
        opener.push('{');
        self.line(&opener);
        self.indent += 1;
    }

    /// Open an unlabeled block: a bare `{`.
    pub fn begin_block(&mut self) {
        self.begin("");
    }

    /// Close the innermost block.
    pub fn end(&mut self) {
        debug_assert!(self.indent > 0, "end() without a matching begin()");
        self.indent = self.indent.saturating_sub(1);
        self.line("}");
    }

    /// Open a block whose closer is owed to `scope` rather than to the
    /// caller's own `end()` discipline.
    pub fn open_scoped(&mut self, scope: &mut Scope, header: &str) {
        self.begin(header);
        scope.open += 1;
    }

    /// Close everything `scope` opened. Consumes the token, so a scope
    /// cannot be closed twice.
    pub fn close_scope(&mut self, scope: Scope) {
        for _ in 0..scope.open {
            self.end();
        }
    }

    pub fn indent_level(&self) -> usize {
        self.indent
    }

    /// Finish and take the emitted text.
    pub fn finish(self) -> String {
        debug_assert_eq!(self.indent, 0, "unclosed block at finish()");
        self.out
    }
}

/// Counter token for conditionally opened blocks. See module docs.
#[derive(Debug, Default)]
#[must_use = "an unclosed scope leaves its blocks open"]
pub struct Scope {
    open: usize,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open > 0
    }
}
