use telnorm_core::MarkerMatch;

pub const BEGIN_MARKER: &str = "BEGIN:VCARD";
pub const END_MARKER: &str = "END:VCARD";

/// Lines that reached an `END:VCARD`, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// 1-based source line number of `lines[0]`.
    pub first_line: usize,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmented {
    pub blocks: Vec<Block>,
    /// Lines thrown away when a `BEGIN:VCARD` restarted the accumulator.
    pub discarded: Vec<String>,
    /// Lines still buffered at end of input, never closed by `END:VCARD`.
    pub dropped: Vec<String>,
}

/// Splits a document on BEGIN/END markers.
///
/// The accumulator restarts at every BEGIN and is emitted at every END, so
/// lines after an END are carried into the next block that closes without
/// an intervening BEGIN, and lines before a BEGIN are discarded.
pub fn segment(text: &str, markers: MarkerMatch) -> Segmented {
    let mut out = Segmented::default();
    let mut current: Vec<String> = Vec::new();
    let mut first_line = 1;

    for (idx, line) in split_lines(text).enumerate() {
        let line_number = idx + 1;
        if current.is_empty() {
            first_line = line_number;
        }

        if markers.matches(line, BEGIN_MARKER) {
            out.discarded.append(&mut current);
            current.push(line.to_string());
            first_line = line_number;
            continue;
        }

        current.push(line.to_string());
        if markers.matches(line, END_MARKER) {
            out.blocks.push(Block {
                first_line,
                lines: std::mem::take(&mut current),
            });
        }
    }

    out.dropped = current;
    out
}

/// Yields the lines of `text`. Besides `\n`, `\r\n` and lone `\r`, the
/// vertical tab, form feed, `\x1c`..=`\x1e`, NEL, U+2028 and U+2029 end a
/// line. A trailing line ending does not produce an empty final line.
pub fn split_lines(text: &str) -> Lines<'_> {
    Lines { rest: Some(text) }
}

#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest.filter(|rest| !rest.is_empty())?;
        match rest.char_indices().find(|(_, ch)| is_line_break(*ch)) {
            Some((idx, ch)) => {
                let ending = if rest[idx..].starts_with("\r\n") {
                    2
                } else {
                    ch.len_utf8()
                };
                self.rest = Some(&rest[idx + ending..]);
                Some(&rest[..idx])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}
