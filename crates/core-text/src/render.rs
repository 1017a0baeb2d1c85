//! Tab expansion and buffer/rendered column conversion.
//!
//! All three functions walk the raw bytes with the same advance rule: a tab
//! moves the running rendered column to the next multiple of `tab_stop`,
//! every other byte advances it by one. Keeping the rule in one place is what
//! keeps the buffer column, the rendered column and the cached rendered line
//! in agreement.
//!
//! `rendered_to_buffer` is not an exact inverse of `buffer_to_rendered`: a
//! rendered column that falls inside the padding of a tab resolves to the
//! tab itself (the byte whose rendered span contains the target).

/// Default distance between tab stops.
pub const TAB_STOP: usize = 2;

#[inline]
fn advance(rx: usize, byte: u8, tab_stop: usize) -> usize {
    if byte == b'\t' {
        rx + tab_stop - (rx % tab_stop)
    } else {
        rx + 1
    }
}

/// Expand every tab in `raw` with spaces up to the next tab stop.
pub fn expand_tabs(raw: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = tab_stop.max(1);
    let tabs = raw.iter().filter(|b| **b == b'\t').count();
    let mut out = Vec::with_capacity(raw.len() + tabs * (tab_stop - 1));
    for &b in raw {
        if b == b'\t' {
            out.push(b' ');
            while out.len() % tab_stop != 0 {
                out.push(b' ');
            }
        } else {
            out.push(b);
        }
    }
    out
}

/// Rendered column of buffer column `col` (bytes `[0, col)` are walked).
pub fn buffer_to_rendered(raw: &[u8], col: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    raw.iter()
        .take(col)
        .fold(0, |rx, &b| advance(rx, b, tab_stop))
}

/// Buffer column whose rendered span contains rendered column `rcol`, or the
/// line length when `rcol` lies past the rendered end.
pub fn rendered_to_buffer(raw: &[u8], rcol: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut rx = 0;
    for (cx, &b) in raw.iter().enumerate() {
        rx = advance(rx, b, tab_stop);
        if rx > rcol {
            return cx;
        }
    }
    raw.len()
}
