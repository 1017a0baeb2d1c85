//! Line-oriented text store.
//!
//! A `Document` is an ordered vector of `Line`s. Each line owns its raw bytes
//! (no trailing newline) plus a cached rendered form with tabs expanded. The
//! cache is rebuilt inside every mutator before it returns, so readers never
//! observe a stale rendered line.
//!
//! Index policy: mutators never fail on out-of-range input. An insert position
//! past the end means "end of document", a column past the end of a line means
//! "end of line", and deletes outside the valid range are no-ops. Every
//! mutation that changes content sets the dirty flag; only `mark_clean` clears
//! it.

pub mod render;

pub use render::TAB_STOP;

/// A single line of text and its tab-expanded rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    chars: Vec<u8>,
    render: Vec<u8>,
}

impl Line {
    pub fn new(content: impl Into<Vec<u8>>, tab_stop: usize) -> Self {
        let chars = content.into();
        let render = render::expand_tabs(&chars, tab_stop);
        Self { chars, render }
    }

    /// Raw content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    /// Tab-expanded content.
    pub fn rendered(&self) -> &[u8] {
        &self.render
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn rendered_len(&self) -> usize {
        self.render.len()
    }

    /// Byte offset of the first occurrence of `needle` in the rendered form.
    pub fn find_rendered(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || needle.len() > self.render.len() {
            return None;
        }
        self.render
            .windows(needle.len())
            .position(|window| window == needle)
    }

    fn update(&mut self, tab_stop: usize) {
        self.render = render::expand_tabs(&self.chars, tab_stop);
    }
}

/// Ordered collection of lines with a dirty flag.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    dirty: bool,
    tab_stop: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(TAB_STOP)
    }
}

impl Document {
    /// Empty, clean document.
    pub fn new(tab_stop: usize) -> Self {
        Self {
            lines: Vec::new(),
            dirty: false,
            tab_stop: tab_stop.max(1),
        }
    }

    /// Build a clean document from already split line contents.
    pub fn from_lines<I, L>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let tab_stop = tab_stop.max(1);
        Self {
            lines: lines.into_iter().map(|l| Line::new(l, tab_stop)).collect(),
            dirty: false,
            tab_stop,
        }
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Raw length of line `idx`; 0 for rows past the end.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, Line::len)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Rendered column of buffer column `col` on row `row` (0 past the end).
    pub fn cx_to_rx(&self, row: usize, col: usize) -> usize {
        self.lines.get(row).map_or(0, |l| {
            render::buffer_to_rendered(l.as_bytes(), col, self.tab_stop)
        })
    }

    /// Buffer column on row `row` containing rendered column `rx`.
    pub fn rx_to_cx(&self, row: usize, rx: usize) -> usize {
        self.lines.get(row).map_or(0, |l| {
            render::rendered_to_buffer(l.as_bytes(), rx, self.tab_stop)
        })
    }

    /// Insert a new line before index `at` (`at` past the end appends).
    pub fn insert_line(&mut self, at: usize, content: impl Into<Vec<u8>>) {
        let at = at.min(self.lines.len());
        self.lines.insert(at, Line::new(content, self.tab_stop));
        self.dirty = true;
    }

    /// Remove line `at`. No-op outside `[0, line_count)`.
    pub fn delete_line(&mut self, at: usize) {
        if at >= self.lines.len() {
            return;
        }
        self.lines.remove(at);
        self.dirty = true;
    }

    /// Move everything after `column` on line `at` into a new line directly
    /// below it. `at` past the end appends an empty line instead.
    pub fn split_line(&mut self, at: usize, column: usize) {
        let tab_stop = self.tab_stop;
        let Some(line) = self.lines.get_mut(at) else {
            self.insert_line(at, Vec::new());
            return;
        };
        let column = column.min(line.len());
        let tail = line.chars.split_off(column);
        line.update(tab_stop);
        self.lines.insert(at + 1, Line::new(tail, tab_stop));
        self.dirty = true;
    }

    /// Append `content` to the end of line `at`. No-op past the end.
    pub fn append_to_line(&mut self, at: usize, content: &[u8]) {
        let tab_stop = self.tab_stop;
        if let Some(line) = self.lines.get_mut(at) {
            line.chars.extend_from_slice(content);
            line.update(tab_stop);
            self.dirty = true;
        }
    }

    /// Insert byte `ch` at `column` of line `line_at` (column clamped to the
    /// line end). No-op past the last line.
    pub fn insert_char(&mut self, line_at: usize, column: usize, ch: u8) {
        let tab_stop = self.tab_stop;
        if let Some(line) = self.lines.get_mut(line_at) {
            let column = column.min(line.len());
            line.chars.insert(column, ch);
            line.update(tab_stop);
            self.dirty = true;
        }
    }

    /// Remove the byte at `column` of line `line_at`. No-op when either index
    /// is out of range.
    pub fn delete_char(&mut self, line_at: usize, column: usize) {
        let tab_stop = self.tab_stop;
        if let Some(line) = self.lines.get_mut(line_at)
            && column < line.len()
        {
            line.chars.remove(column);
            line.update(tab_stop);
            self.dirty = true;
        }
    }

    /// Serialize: every line followed by a single `\n`, including the last.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for line in &self.lines {
            out.extend_from_slice(line.as_bytes());
            out.push(b'\n');
        }
        out
    }
}

/// Split persisted file content into line contents.
///
/// Both `\n` and `\r\n` endings are accepted; every trailing `\r` before a
/// line break is stripped. A final line break does not produce an extra empty
/// line.
pub fn split_lines(content: &[u8]) -> Vec<Vec<u8>> {
    if content.is_empty() {
        return Vec::new();
    }
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    body.split(|b| *b == b'\n')
        .map(|raw| {
            let end = raw
                .iter()
                .rposition(|b| *b != b'\r')
                .map_or(0, |idx| idx + 1);
            raw[..end].to_vec()
        })
        .collect()
}
