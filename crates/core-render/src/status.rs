//! Status bar composition.
//!
//! Format: `<name> - <n> lines[ (modified)]` on the left, `<row>/<n>` right
//! aligned. Two stages: `compose_status` produces ordered segments and
//! `format_status` fits them into the screen width. The right-hand position
//! is only drawn when it fits entirely after the left part; the left part is
//! truncated to the width first.

use std::borrow::Cow;

/// Longest file name prefix shown, in bytes.
pub const MAX_NAME_BYTES: usize = 20;

/// Inputs needed to build the status bar.
pub struct StatusContext<'a> {
    /// Display name (`[No Name]` for an unsaved buffer).
    pub name: &'a str,
    pub line_count: usize,
    pub dirty: bool,
    /// 0-based cursor row.
    pub row: usize,
}

/// Ordered status segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    FileName(Cow<'a, str>),
    LineCount(usize),
    Modified,
    /// 1-based cursor row over line count; right aligned.
    Position { row_1: usize, line_count: usize },
}

fn truncate_bytes(s: &str, max: usize) -> Cow<'_, str> {
    if s.len() <= max {
        return Cow::Borrowed(s);
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Borrowed(&s[..end])
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut segs = vec![
        StatusSegment::FileName(truncate_bytes(ctx.name, MAX_NAME_BYTES)),
        StatusSegment::LineCount(ctx.line_count),
    ];
    if ctx.dirty {
        segs.push(StatusSegment::Modified);
    }
    segs.push(StatusSegment::Position {
        row_1: ctx.row + 1,
        line_count: ctx.line_count,
    });
    segs
}

/// Render segments into exactly `width` columns (or fewer when the left part
/// alone is truncated).
pub fn format_status(segments: &[StatusSegment<'_>], width: usize) -> String {
    let mut left = String::new();
    let mut right = String::new();
    for seg in segments {
        match seg {
            StatusSegment::FileName(name) => left.push_str(name),
            StatusSegment::LineCount(n) => left.push_str(&format!(" - {n} lines")),
            StatusSegment::Modified => left.push_str(" (modified)"),
            StatusSegment::Position { row_1, line_count } => {
                right = format!("{row_1}/{line_count}");
            }
        }
    }
    let mut out = truncate_bytes(&left, width).into_owned();
    let used = out.len();
    if used + right.len() <= width {
        out.push_str(&" ".repeat(width - used - right.len()));
        out.push_str(&right);
    } else {
        out.push_str(&" ".repeat(width - used));
    }
    out
}
