//! YAML 1.1 plain scalars.
//!
//! The server and most YAML 1.1 readers resolve `0755` to the integer 493 and
//! `yes`/`off` to booleans, while serde_yaml follows YAML 1.2 and keeps them
//! as strings. Writing such a string back quotes it, which silently changes
//! the type of a variable nobody touched. Before parsing, plain (unquoted)
//! scalars in value position are rewritten to their YAML 1.2 spelling so they
//! load with the type a YAML 1.1 reader would give them.

use std::borrow::Cow;

#[derive(Default)]
struct Scanner {
    /// Quote character of a quoted scalar continuing from a previous line.
    quote: Option<u8>,
    /// Nesting depth of flow collections.
    flow: usize,
    /// Indentation of the line that opened a block scalar.
    block: Option<usize>,
}

/// Rewrite YAML 1.1 legacy plain scalars in `text` to YAML 1.2 equivalents.
pub(crate) fn normalize(text: &str) -> Cow<'_, str> {
    let mut scanner = Scanner::default();
    let mut out = String::with_capacity(text.len());
    let mut changed = false;
    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        changed |= scanner.line(content, &mut out);
        out.push_str(&line[content.len()..]);
    }
    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}

impl Scanner {
    fn line(&mut self, line: &str, out: &mut String) -> bool {
        let b = line.as_bytes();
        let indent = b.iter().take_while(|&&c| c == b' ').count();

        if let Some(parent) = self.block {
            if line.trim().is_empty() || indent > parent {
                out.push_str(line);
                return false;
            }
            self.block = None;
        }

        let mut changed = false;
        let mut copied = 0;
        let mut i = 0;
        let mut at_value = self.flow > 0;

        if let Some(q) = self.quote.take() {
            i = self.skip_quoted(b, 0, q);
        }

        while i < b.len() {
            match b[i] {
                b' ' | b'\t' => i += 1,
                b'#' if i == 0 || b[i - 1] == b' ' || b[i - 1] == b'\t' => break,
                q @ (b'\'' | b'"') => {
                    i = self.skip_quoted(b, i + 1, q);
                    at_value = false;
                }
                b':' if separated(b, i + 1, self.flow) => {
                    i += 1;
                    at_value = true;
                }
                b'-' if self.flow == 0 && separated(b, i + 1, 0) => {
                    i += 1;
                    at_value = true;
                }
                b'?' if separated(b, i + 1, self.flow) => {
                    i += 1;
                    at_value = false;
                }
                b'[' | b'{' => {
                    self.flow += 1;
                    i += 1;
                    at_value = b[i - 1] == b'[';
                }
                b']' | b'}' => {
                    self.flow = self.flow.saturating_sub(1);
                    i += 1;
                    at_value = false;
                }
                b',' if self.flow > 0 => {
                    i += 1;
                    at_value = true;
                }
                b'|' | b'>' if self.flow == 0 && at_value && block_header(&b[i + 1..]) => {
                    self.block = Some(indent);
                    break;
                }
                b'&' | b'!' | b'*' => {
                    // Anchors leave the value slot open; tagged scalars and
                    // aliases are left as written.
                    let anchor = b[i] == b'&';
                    while i < b.len() && b[i] != b' ' {
                        i += 1;
                    }
                    at_value &= anchor;
                }
                _ => {
                    let (end, is_key) = plain_end(b, i, self.flow);
                    let token = line[i..end].trim_end();
                    if !is_key && at_value {
                        if let Some(replacement) = resolve(token) {
                            out.push_str(&line[copied..i]);
                            out.push_str(&replacement);
                            copied = i + token.len();
                            changed = true;
                        }
                    }
                    at_value = is_key;
                    i = if is_key { end + 1 } else { end };
                }
            }
        }

        out.push_str(&line[copied..]);
        changed
    }

    /// Skip to just past the closing quote, or remember the open quote if the
    /// scalar continues on the next line.
    fn skip_quoted(&mut self, b: &[u8], mut i: usize, q: u8) -> usize {
        while i < b.len() {
            if q == b'"' && b[i] == b'\\' {
                i += 2;
            } else if q == b'\'' && b[i] == b'\'' && b.get(i + 1) == Some(&b'\'') {
                i += 2;
            } else if b[i] == q {
                return i + 1;
            } else {
                i += 1;
            }
        }
        self.quote = Some(q);
        b.len()
    }
}

/// An indicator at `i` is followed by whitespace, end of line, or (in a flow
/// collection) a flow delimiter.
fn separated(b: &[u8], i: usize, flow: usize) -> bool {
    match b.get(i) {
        None | Some(b' ') | Some(b'\t') => true,
        Some(b',' | b']' | b'}') => flow > 0,
        _ => false,
    }
}

/// Rest of a line after `|` or `>` holds only chomping and indentation
/// indicators, optionally followed by a comment.
fn block_header(rest: &[u8]) -> bool {
    let mut i = 0;
    while i < rest.len() && (rest[i].is_ascii_digit() || rest[i] == b'+' || rest[i] == b'-') {
        i += 1;
    }
    let tail = &rest[i..];
    match tail.iter().position(|c| *c != b' ' && *c != b'\t') {
        None => true,
        Some(p) => p > 0 && tail[p] == b'#',
    }
}

/// End of the plain scalar starting at `start`, and whether it is a mapping key.
fn plain_end(b: &[u8], start: usize, flow: usize) -> (usize, bool) {
    let mut j = start;
    while j < b.len() {
        match b[j] {
            b':' if separated(b, j + 1, flow) => return (j, true),
            b'#' if j > start && (b[j - 1] == b' ' || b[j - 1] == b'\t') => return (j, false),
            b',' | b'[' | b']' | b'{' | b'}' if flow > 0 => return (j, false),
            _ => j += 1,
        }
    }
    (j, false)
}

/// YAML 1.2 spelling of a YAML 1.1 plain scalar that YAML 1.2 reads differently.
fn resolve(token: &str) -> Option<String> {
    match token {
        "y" | "Y" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" => return Some("true".into()),
        "n" | "N" | "no" | "No" | "NO" | "off" | "Off" | "OFF" => return Some("false".into()),
        _ => {}
    }

    // Leading-zero octal: 0755 is 0o755.
    if token.len() > 1 && token.starts_with('0') && token.bytes().all(|c| (b'0'..=b'7').contains(&c)) {
        return Some(format!("0o{}", &token[1..]));
    }

    // Digit separators: 1_000 is 1000.
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.contains('_')
        && digits.starts_with(|c: char| c.is_ascii_digit() && c != '0')
        && digits.bytes().all(|c| c.is_ascii_digit() || c == b'_')
    {
        return Some(token.replace('_', ""));
    }
    None
}
