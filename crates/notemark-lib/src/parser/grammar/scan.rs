//! Pure text scanners used by the document productions.
//!
//! Document constructs are recognized by looking at source text, not tokens:
//! a production first scans to learn whether its construct completes and where
//! each part ends, and only then emits anything. All offsets are byte offsets
//! relative to the slice passed in. Lines never include their `\n`.

use std::ops::Range;

/// Leading spaces and tabs, in bytes.
pub(super) fn indent(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Indentation width in columns, tabs counting as four.
pub(super) fn indent_width(line: &str) -> usize {
    line[..indent(line)]
        .chars()
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

pub(super) fn is_blank(line: &str) -> bool {
    line.trim_matches([' ', '\t', '\r']).is_empty()
}

fn ends_token(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with([' ', '\t', '\r'])
}

/// Up to three spaces of indentation, as block constructs allow.
fn block_indent(line: &str) -> Option<usize> {
    let n = indent(line);
    (indent_width(line) <= 3).then_some(n)
}

/// `#`..`######` followed by a space or the end of the line.
pub(super) fn heading_level(line: &str) -> Option<usize> {
    let level = line.len() - line.trim_start_matches('#').len();
    ((1..=6).contains(&level) && ends_token(&line[level..])).then_some(level)
}

/// Length of the marker run when `line` is a horizontal rule.
pub(super) fn rule_len(line: &str) -> Option<usize> {
    let body = line.trim_end_matches([' ', '\t', '\r']);
    let first = body.chars().next()?;
    (matches!(first, '-' | '*' | '_') && body.len() >= 3 && body.chars().all(|c| c == first))
        .then_some(body.len())
}

/// Opening code fence: indentation and backtick count.
pub(super) fn fence_open(line: &str) -> Option<(usize, usize)> {
    let at = block_indent(line)?;
    let rest = &line[at..];
    let ticks = rest.len() - rest.trim_start_matches('`').len();
    (ticks >= 3 && !rest[ticks..].contains('`')).then_some((at, ticks))
}

/// Closing fence for an opening run of `ticks`: indentation and run length.
pub(super) fn fence_close(line: &str, ticks: usize) -> Option<(usize, usize)> {
    let at = block_indent(line)?;
    let rest = &line[at..];
    let len = rest.len() - rest.trim_start_matches('`').len();
    (len >= ticks && is_blank(&rest[len..])).then_some((at, len))
}

/// Offset of the `>` that opens a quote line.
pub(super) fn quote_marker(line: &str) -> Option<usize> {
    let at = block_indent(line)?;
    line[at..].starts_with('>').then_some(at)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ListMarker {
    /// Indentation width in columns.
    pub width: usize,
    /// Byte range of the marker itself.
    pub start: usize,
    pub end: usize,
    pub ordered: bool,
}

pub(super) fn list_marker(line: &str) -> Option<ListMarker> {
    let start = indent(line);
    let width = indent_width(line);
    let rest = &line[start..];
    let (len, ordered) = if rest.starts_with(['-', '*', '+']) {
        (1, false)
    } else {
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if !(1..=9).contains(&digits) || !rest[digits..].starts_with(['.', ')']) {
            return None;
        }
        (digits + 1, true)
    };
    ends_token(&rest[len..]).then_some(ListMarker {
        width,
        start,
        end: start + len,
        ordered,
    })
}

/// `[state]` at the start of `rest`; returns the state length.
///
/// The state is any non-empty run without brackets or `:` (which would make it
/// an attribute), and must be followed by whitespace or the end of the line.
pub(super) fn task_state(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix('[')?;
    let len = body.find(']')?;
    let state = &body[..len];
    if state.is_empty() || state.contains(['[', ':', '\n']) {
        return None;
    }
    ends_token(&body[len + 1..]).then_some(len)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct DirectiveMarker {
    pub close: bool,
    /// `#name` or `/name`, sigil included.
    pub name: Range<usize>,
    /// Trimmed argument text; empty when there are none.
    pub args: Range<usize>,
    /// Offset of the closing `-->`.
    pub end_mark: usize,
}

impl DirectiveMarker {
    pub fn name<'s>(&self, line: &'s str) -> &'s str {
        &line[self.name.start + 1..self.name.end]
    }
}

/// `<!-- #name args -->` or `<!-- /name -->` filling the whole line.
pub(super) fn directive_marker(line: &str) -> Option<DirectiveMarker> {
    let body = line.strip_prefix("<!--")?;
    let sigil_at = 4 + indent(body);
    let close = match line[sigil_at..].chars().next()? {
        '#' => false,
        '/' => true,
        _ => return None,
    };
    let name_start = sigil_at + 1;
    let name_len = line[name_start..]
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(line.len() - name_start);
    if name_len == 0 {
        return None;
    }
    let name_end = name_start + name_len;
    let end_mark = name_end + line[name_end..].find("-->")?;
    if !is_blank(&line[end_mark + 3..]) {
        return None;
    }
    let raw_args = &line[name_end..end_mark];
    let args_start = name_end + indent(raw_args);
    let args_end = name_end + raw_args.trim_end().len();
    if close && args_end > args_start {
        return None;
    }
    Some(DirectiveMarker {
        close,
        name: sigil_at..name_end,
        args: args_start..args_end.max(args_start),
        end_mark,
    })
}

/// `|---|:--:|` style delimiter row.
pub(super) fn is_table_delimiter(line: &str) -> bool {
    let body = line.trim().trim_start_matches('|').trim_end_matches('|');
    !body.is_empty()
        && line.contains('|')
        && body.split('|').all(|cell| {
            let cell = cell.trim();
            let dashes = cell.trim_start_matches(':').trim_end_matches(':');
            !dashes.is_empty() && dashes.chars().all(|c| c == '-')
        })
}

/// Offsets of the `|` separating table cells: not escaped, not inside code,
/// and not inside brackets so `[[page|alias]]` stays one cell.
pub(super) fn cell_pipes(line: &str) -> Vec<usize> {
    let mut pipes = Vec::new();
    let mut depth = 0usize;
    let mut in_code = false;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '`' => in_code = !in_code,
            '[' if !in_code => depth += 1,
            ']' if !in_code => depth = depth.saturating_sub(1),
            '|' if !in_code && depth == 0 => pipes.push(i),
            _ => {}
        }
    }
    pipes
}

/// Given `text` starting with `[`, the offset of its matching `]` on the same line.
pub(super) fn matching_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            '\n' => return None,
            _ => {}
        }
    }
    None
}

/// Given `text` just after a `(`, the offset of the closing `)`, skipping
/// quoted strings.
pub(super) fn closing_paren(text: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\n') => return None,
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ')') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

/// Offset in `text` of a run of exactly `delim` that can close emphasis:
/// not preceded by whitespace and not part of a longer run.
pub(super) fn emphasis_close(text: &str, delim: &str) -> Option<usize> {
    let ch = delim.chars().next()?;
    let mut from = 0;
    while let Some(found) = text[from..].find(delim) {
        let at = from + found;
        let run_end = at + text[at..].len() - text[at..].trim_start_matches(ch).len();
        let exact = run_end - at == delim.len();
        let before = text[..at].chars().next_back();
        if exact && at > 0 && before.is_some_and(|c| !c.is_whitespace()) {
            return Some(at);
        }
        from = run_end;
    }
    None
}

pub(super) fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '/')
}

/// Length of a hashtag at the start of `rest` (which begins with `#`).
pub(super) fn hashtag_len(rest: &str) -> Option<usize> {
    let body = &rest[1..];
    let len = body.find(|c: char| !is_tag_char(c)).unwrap_or(body.len());
    let tag = &body[..len];
    (!tag.is_empty() && !tag.chars().all(|c| c.is_ascii_digit())).then_some(len + 1)
}

/// Naked URLs do not keep trailing sentence punctuation.
pub(super) fn trim_url(url: &str) -> usize {
    url.trim_end_matches(['.', ',', ';', ':', '!', '?', '\'', '"'])
        .len()
}

/// Offset in `text` of a backtick run of exactly `ticks`.
pub(super) fn backtick_close(text: &str, ticks: usize) -> Option<usize> {
    let mut from = 0;
    while let Some(found) = text[from..].find('`') {
        let at = from + found;
        let run = text[at..].len() - text[at..].trim_start_matches('`').len();
        if run == ticks {
            return Some(at);
        }
        from = at + run;
    }
    None
}

/// `[text](url)` at the start of `rest`: text and url lengths.
pub(super) fn link_shape(rest: &str) -> Option<(usize, usize)> {
    let close = matching_bracket(rest)?;
    let target = rest[close + 1..].strip_prefix('(')?;
    let url_len = target.find(')')?;
    let url = &target[..url_len];
    (!url.is_empty() && !url.contains(['\n', ' ', '\t'])).then_some((close - 1, url_len))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct CommandLinkShape {
    pub name: usize,
    pub alias: Option<usize>,
    /// Raw argument text length, when an argument list is present.
    pub args: Option<usize>,
}

/// `{[Name|Alias](args)}` at the start of `rest`.
pub(super) fn command_link(rest: &str) -> Option<CommandLinkShape> {
    let body = rest.strip_prefix("{[")?;
    let close = body.find(']')?;
    let label = &body[..close];
    if label.contains(['[', '\n']) {
        return None;
    }
    let (name, alias) = match label.find('|') {
        Some(pipe) => (pipe, Some(label.len() - pipe - 1)),
        None => (label.len(), None),
    };
    if name == 0 || alias == Some(0) {
        return None;
    }
    let after = &body[close + 1..];
    let (args, after) = match after.strip_prefix('(') {
        Some(inner) => {
            let end = closing_paren(inner)?;
            (Some(end), &inner[end + 1..])
        }
        None => (None, after),
    };
    after.starts_with('}').then_some(CommandLinkShape { name, alias, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_marker_open_and_close() {
        let open = directive_marker("<!-- #query task where done -->").unwrap();
        assert!(!open.close);
        assert_eq!(open.name("<!-- #query task where done -->"), "query");
        assert_eq!(&"<!-- #query task where done -->"[open.args.clone()], "task where done");

        let close = directive_marker("<!-- /query -->").unwrap();
        assert!(close.close);
        assert!(close.args.is_empty());

        assert!(directive_marker("<!-- just a comment -->").is_none());
        assert!(directive_marker("<!-- #query").is_none());
        assert!(directive_marker("<!-- /query extra -->").is_none());
    }

    #[test]
    fn list_markers() {
        let m = list_marker("  - item").unwrap();
        assert_eq!((m.width, m.start, m.end, m.ordered), (2, 2, 3, false));
        let m = list_marker("12. item").unwrap();
        assert_eq!((m.end, m.ordered), (3, true));
        assert!(list_marker("-item").is_none());
        assert!(list_marker("1.5 apples").is_none());
    }

    #[test]
    fn task_states() {
        assert_eq!(task_state("[ ] x"), Some(1));
        assert_eq!(task_state("[TODO] x"), Some(4));
        assert_eq!(task_state("[x]"), Some(1));
        assert_eq!(task_state("[] x"), None);
        assert_eq!(task_state("[[page]] x"), None);
        assert_eq!(task_state("[age: 3] x"), None);
        assert_eq!(task_state("[a\nb] x"), None);
        assert_eq!(task_state("[x](url)"), None);
    }

    #[test]
    fn emphasis_closers() {
        assert_eq!(emphasis_close("bold** rest", "**"), Some(4));
        assert_eq!(emphasis_close("a *** b**", "**"), Some(7));
        assert_eq!(emphasis_close(" x*", "*"), Some(2));
        assert_eq!(emphasis_close("x *", "*"), None);
    }

    #[test]
    fn quoted_args() {
        assert_eq!(closing_paren(r#""a)", 'b') rest"#), Some(9));
        assert_eq!(closing_paren("unclosed"), None);
    }

    #[test]
    fn command_link_shapes() {
        let shape = command_link("{[Other: Command|Alias]} tail").unwrap();
        assert_eq!((shape.name, shape.alias, shape.args), (14, Some(5), None));
        let shape = command_link(r#"{[Args: Command]("with", "args")}"#).unwrap();
        assert_eq!(shape.args, Some(14));
        assert!(command_link("{[Open: Command]").is_none());
        assert!(command_link("{[]}").is_none());
    }

    #[test]
    fn link_shapes() {
        assert_eq!(link_shape("[text](http://x)"), Some((4, 8)));
        assert_eq!(link_shape("[](u)"), Some((0, 1)));
        assert_eq!(link_shape("[text] (u)"), None);
        assert_eq!(link_shape("[a [b] c](u) tail"), Some((7, 1)));
        assert_eq!(link_shape("](u)"), None);
    }

    #[test]
    fn table_rows() {
        assert!(is_table_delimiter("|---|:--:|"));
        assert!(is_table_delimiter("--- | ---"));
        assert!(!is_table_delimiter("| a | b |"));
        assert_eq!(cell_pipes("| [[a|b]] | `x|y` |"), vec![0, 10, 18]);
    }
}
