// src/core/html.rs
//! Tolerant, case-insensitive tag scanning for the hours pages.
//!
//! No DOM is built. Callers walk tags with [`next_tag`], pull balanced element
//! blocks with [`find_all_blocks`], and clean cell text with [`strip_tags`].
//! Omitted `</td>` / `</tr>` closers are implied the way browsers imply them.

use super::sanitize::{decode_entities, normalize_ws};

/// One element tag: `<td class="x">` or `</td>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Byte offset of `<`.
    pub start: usize,
    /// Byte offset just past `>`.
    pub end: usize,
    pub name: &'a str,
    pub attrs: &'a str,
    pub is_close: bool,
    pub self_closing: bool,
}

impl Tag<'_> {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A balanced element: opener attributes plus the inner markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block<'a> {
    pub attrs: &'a str,
    pub inner: &'a str,
    pub start: usize,
    pub end: usize,
}

impl Block<'_> {
    pub fn has_class(&self, class: &str) -> bool {
        has_class(self.attrs, class)
    }
}

/// A `<td>` or `<th>` with its cleaned text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub header: bool,
    pub text: String,
}

/// Index of the `>` closing a tag opened before `from`, ignoring `>` inside quotes.
fn find_tag_end(b: &[u8], from: usize) -> Option<usize> {
    let mut in_s = false; // '
    let mut in_d = false; // "
    let mut i = from;
    while i < b.len() {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Next element tag at or after `from`. Comments, doctypes and processing
/// instructions are skipped; a stray `<` in text is not a tag.
pub fn next_tag(s: &str, from: usize) -> Option<Tag<'_>> {
    let b = s.as_bytes();
    let mut i = from;

    while i < b.len() {
        let lt = i + b[i..].iter().position(|&c| c == b'<')?;

        if b[lt..].starts_with(b"<!--") {
            let close = s[lt + 4..].find("-->")?;
            i = lt + 4 + close + 3;
            continue;
        }
        if matches!(b.get(lt + 1), Some(b'!') | Some(b'?')) {
            i = find_tag_end(b, lt + 1)? + 1;
            continue;
        }

        let (is_close, name_at) = match b.get(lt + 1) {
            Some(b'/') => (true, lt + 2),
            _ => (false, lt + 1),
        };
        if !b.get(name_at).is_some_and(|c| c.is_ascii_alphabetic()) {
            i = lt + 1;
            continue;
        }

        let gt = find_tag_end(b, name_at)?;
        let body = &s[name_at..gt];
        let name_len = body.bytes().take_while(|c| c.is_ascii_alphanumeric()).count();
        let name = &body[..name_len];
        let rest = body[name_len..].trim();
        let self_closing = rest.ends_with('/');
        let attrs = rest.trim_end_matches('/').trim_end();

        return Some(Tag { start: lt, end: gt + 1, name, attrs, is_close, self_closing });
    }
    None
}

/// True when `t` ends an unclosed `open` element without an explicit closer.
fn closes_implicitly(open: &str, t: &Tag) -> bool {
    let name = t.name.to_ascii_lowercase();
    if open.eq_ignore_ascii_case("td") || open.eq_ignore_ascii_case("th") {
        if t.is_close {
            matches!(name.as_str(), "tr" | "tbody" | "thead" | "tfoot" | "table")
        } else {
            matches!(name.as_str(), "td" | "th" | "tr")
        }
    } else if open.eq_ignore_ascii_case("tr") {
        if t.is_close {
            matches!(name.as_str(), "tbody" | "thead" | "tfoot" | "table")
        } else {
            matches!(name.as_str(), "tr" | "tbody" | "thead" | "tfoot")
        }
    } else {
        false
    }
}

/// `(inner_end, outer_end)` for the element opened by `open`.
/// Nested same-name elements are balanced; nested tables shield their rows/cells.
fn block_close(s: &str, open: &Tag) -> (usize, usize) {
    if open.self_closing {
        return (open.end, open.end);
    }

    let mut depth = 1usize;
    let mut tables = 0usize;
    let mut pos = open.end;

    while let Some(t) = next_tag(s, pos) {
        if t.is("table") && !open.is("table") {
            if t.is_close {
                if tables == 0 && closes_implicitly(open.name, &t) {
                    return (t.start, t.start);
                }
                tables = tables.saturating_sub(1);
            } else {
                tables += 1;
            }
        } else if t.name.eq_ignore_ascii_case(open.name) && !t.self_closing {
            if t.is_close {
                depth -= 1;
                if depth == 0 {
                    return (t.start, t.end);
                }
            } else if tables == 0 && closes_implicitly(open.name, &t) {
                return (t.start, t.start);
            } else {
                depth += 1;
            }
        } else if tables == 0 && closes_implicitly(open.name, &t) {
            return (t.start, t.start);
        }
        pos = t.end;
    }
    (s.len(), s.len())
}

/// Every `<tag>` element of `s`, nested ones included, in opener order.
/// Layout tables wrapping the data table do not hide its rows.
pub fn find_all_blocks<'a>(s: &'a str, tag: &str) -> Vec<Block<'a>> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(t) = next_tag(s, pos) {
        if !t.is_close && t.is(tag) {
            let (inner_end, outer_end) = block_close(s, &t);
            out.push(Block {
                attrs: t.attrs,
                inner: &s[t.end..inner_end],
                start: t.start,
                end: outer_end,
            });
        }
        pos = t.end;
    }
    out
}

/// First element of any tag name carrying `class`.
pub fn first_with_class<'a>(s: &'a str, class: &str) -> Option<Block<'a>> {
    let mut pos = 0usize;
    while let Some(t) = next_tag(s, pos) {
        if !t.is_close && has_class(t.attrs, class) {
            let (inner_end, outer_end) = block_close(s, &t);
            return Some(Block {
                attrs: t.attrs,
                inner: &s[t.end..inner_end],
                start: t.start,
                end: outer_end,
            });
        }
        pos = t.end;
    }
    None
}

/// `<td>` / `<th>` cells of one row, text cleaned.
pub fn cells(row_inner: &str) -> Vec<Cell> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(t) = next_tag(row_inner, pos) {
        if !t.is_close && (t.is("td") || t.is("th")) {
            let (inner_end, outer_end) = block_close(row_inner, &t);
            out.push(Cell {
                header: t.is("th"),
                text: strip_tags(&row_inner[t.end..inner_end]),
            });
            pos = outer_end.max(t.end);
        } else {
            pos = t.end;
        }
    }
    out
}

/// Value of attribute `name` (quoted or bare), if present.
pub fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let b = attrs.as_bytes();
    let n = name.len();
    let mut i = 0usize;

    while i + n <= b.len() {
        let at_boundary = i == 0 || b[i - 1].is_ascii_whitespace();
        if at_boundary && b[i..i + n].eq_ignore_ascii_case(name.as_bytes()) {
            let mut j = i + n;
            while j < b.len() && b[j].is_ascii_whitespace() { j += 1; }
            if b.get(j) == Some(&b'=') {
                j += 1;
                while j < b.len() && b[j].is_ascii_whitespace() { j += 1; }
                return Some(match b.get(j) {
                    Some(&q @ (b'"' | b'\'')) => {
                        let val = &attrs[j + 1..];
                        let end = val.bytes().position(|c| c == q).unwrap_or(val.len());
                        &val[..end]
                    }
                    _ => {
                        let val = &attrs[j..];
                        let end = val.find(|c: char| c.is_ascii_whitespace()).unwrap_or(val.len());
                        &val[..end]
                    }
                });
            }
        }
        i += 1;
    }
    None
}

/// Whole-token class match: `has_class(r#"class="a b""#, "b")` is true,
/// `"s-lc-whw-loc"` does not match `"s-lc-whw-locname"`.
pub fn has_class(attrs: &str, class: &str) -> bool {
    attr_value(attrs, "class")
        .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// Text content of a fragment: tags dropped (line-breaking ones become spaces),
/// entities decoded, whitespace collapsed.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut raw = String::with_capacity(s.len());
    let mut pos = 0usize;

    while let Some(t) = next_tag(s, pos) {
        push_text(&mut raw, &s[pos..t.start]);
        let lname = t.name.to_ascii_lowercase();
        if matches!(lname.as_str(), "br" | "p" | "div" | "li" | "tr" | "td" | "th" | "span") {
            raw.push(' ');
        }
        pos = t.end;
    }
    push_text(&mut raw, &s[pos..]);

    normalize_ws(&decode_entities(&raw))
}

/// Text between tags, minus comments and `<!…>` / `<?…>` declarations.
/// An unterminated one swallows the rest of the segment.
fn push_text(out: &mut String, mut seg: &str) {
    while let Some(at) = seg.find("<!").into_iter().chain(seg.find("<?")).min() {
        out.push_str(&seg[..at]);
        let rest = &seg[at..];
        let skip = if rest.starts_with("<!--") {
            rest.find("-->").map(|i| i + 3)
        } else {
            rest.find('>').map(|i| i + 1)
        };
        match skip {
            Some(n) => seg = &rest[n..],
            None => return,
        }
    }
    out.push_str(seg);
}
