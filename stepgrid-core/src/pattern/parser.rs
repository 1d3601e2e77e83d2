//! Pattern text → grid.
//!
//! Only the subset of the pattern language that maps onto a 16-step drum grid
//! is understood. Anything else is skipped silently and leaves rows empty.

use super::euclidean::euclidean_onsets;
use crate::types::{Grid, STEPS, INSTRUMENTS};
use tracing::warn;

/// A trigger call `s("<body>")` found in the text, with its optional
/// `.struct("<mask>")` modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TriggerCall<'a> {
    body: &'a str,
    mask: Option<&'a str>,
}

/// How one instrument's row is filled from a sub-pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowSource<'a> {
    /// `s("bd").struct("x ~ ...")`
    Struct(&'a str),
    /// `s("bd*4")`, holding the digits
    Repeat(&'a str),
    /// `s("bd(3,8)")`, holding both digit runs
    Euclidean(&'a str, &'a str),
    /// `s("bd sd hh sd")`, holding the whole token list
    Sequence(&'a str),
}

/// Parse pattern text into a grid. Never fails: unrecognized syntax simply
/// contributes no hits.
pub fn parse_pattern(text: &str) -> Grid {
    let mut grid = Grid::new();

    for sub_pattern in sub_patterns(text) {
        let calls = scan_trigger_calls(sub_pattern);
        if calls.is_empty() {
            continue;
        }
        for (index, instrument) in INSTRUMENTS.iter().enumerate() {
            let Some(source) = resolve_row_source(&calls, instrument.id) else {
                continue;
            };
            if let Some(row) = grid.row_mut(index) {
                fill_row(row, instrument.id, source);
            }
        }
    }

    grid
}

/// Split a `stack(a, b, ...)` wrapper into its arguments, or return the whole
/// text as a single sub-pattern.
///
/// Arguments are split on every comma, including commas nested inside an
/// argument's own parentheses, so `s("bd(3,8)")` inside a stack breaks apart
/// and yields nothing.
fn sub_patterns(text: &str) -> Vec<&str> {
    match stack_arguments(text) {
        Some(args) => args.split(',').map(str::trim).collect(),
        None => vec![text.trim()],
    }
}

/// Content between `stack(` and its matching `)`
fn stack_arguments(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find("stack") {
        let after_keyword = search_from + offset + "stack".len();
        if let Some(args) = text[after_keyword..].trim_start().strip_prefix('(') {
            if let Some(end) = matching_paren(args) {
                return Some(&args[..end]);
            }
        }
        search_from = after_keyword;
    }
    None
}

/// Byte index of the `)` closing an already-opened paren
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 1;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Collect every trigger call in a sub-pattern, in order of appearance.
/// A call may start at any `s`, so `sounds("bd")` is read as a trigger too.
fn scan_trigger_calls(text: &str) -> Vec<TriggerCall<'_>> {
    text.char_indices()
        .filter(|&(_, c)| c == 's')
        .filter_map(|(i, _)| {
            let mut scanner = Scanner::new(&text[i + 1..]);
            scanner.trigger_call()
        })
        .collect()
}

/// Pick the first recognizer that applies to `id`:
/// struct, then repeat, then Euclidean, then free sequence.
fn resolve_row_source<'a>(calls: &[TriggerCall<'a>], id: &str) -> Option<RowSource<'a>> {
    if let Some(mask) = calls
        .iter()
        .filter(|call| call.body == id)
        .find_map(|call| call.mask)
    {
        return Some(RowSource::Struct(mask));
    }
    if let Some(count) = calls.iter().find_map(|call| repeat_count(call.body, id)) {
        return Some(RowSource::Repeat(count));
    }
    if let Some((hits, total)) = calls.iter().find_map(|call| euclidean_args(call.body, id)) {
        return Some(RowSource::Euclidean(hits, total));
    }
    calls.first().map(|call| RowSource::Sequence(call.body))
}

/// `bd*4` → `"4"`
fn repeat_count<'a>(body: &'a str, id: &str) -> Option<&'a str> {
    let digits = body.strip_prefix(id)?.strip_prefix('*')?;
    is_digits(digits).then_some(digits)
}

/// `bd( 3 , 8 )` → `("3", "8")`
fn euclidean_args<'a>(body: &'a str, id: &str) -> Option<(&'a str, &'a str)> {
    let mut scanner = Scanner::new(body.strip_prefix(id)?);
    scanner.eat('(')?;
    scanner.skip_whitespace();
    let hits = scanner.digits()?;
    scanner.skip_whitespace();
    scanner.eat(',')?;
    scanner.skip_whitespace();
    let total = scanner.digits()?;
    scanner.skip_whitespace();
    scanner.eat(')')?;
    scanner.is_done().then_some((hits, total))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn fill_row(row: &mut [bool; STEPS], id: &str, source: RowSource<'_>) {
    match source {
        RowSource::Struct(mask) => {
            for (step, symbol) in split_on_whitespace(mask).into_iter().take(STEPS).enumerate() {
                if symbol == "x" {
                    row[step] = true;
                }
            }
        }
        RowSource::Repeat(digits) => {
            let Ok(count) = digits.parse::<usize>() else {
                warn!(instrument = id, count = digits, "Ignoring repeat with malformed count");
                return;
            };
            if count == 0 {
                return;
            }
            let stride = STEPS / count;
            if stride == 0 {
                // every repetition lands on the first column
                row[0] = true;
                return;
            }
            for step in (0..count).map(|k| k * stride).take_while(|&step| step < STEPS) {
                row[step] = true;
            }
        }
        RowSource::Euclidean(hits, total) => {
            let (hits, total) = match (hits.parse::<usize>(), total.parse::<usize>()) {
                (Ok(h), Ok(t)) => (h, t),
                _ => {
                    warn!(
                        instrument = id,
                        hits, total, "Failed to parse euclidean rhythm, leaving row empty"
                    );
                    return;
                }
            };
            if total == 0 {
                return;
            }
            // the cycle repeats across the row, so only its first STEPS slots matter
            let onsets = euclidean_onsets(hits, total, STEPS);
            for (step, cell) in row.iter_mut().enumerate() {
                if onsets.contains(&(step % total)) {
                    *cell = true;
                }
            }
        }
        RowSource::Sequence(body) => {
            let tokens = split_on_whitespace(body);
            for (step, cell) in row.iter_mut().enumerate() {
                if tokens[step % tokens.len()] == id {
                    *cell = true;
                }
            }
        }
    }
}

/// Split on whitespace runs. Leading or trailing whitespace yields an empty
/// token, so `" bd sd"` is `["", "bd", "sd"]` and the first step is a gap.
/// Never returns an empty vector.
fn split_on_whitespace(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_gap = false;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if !in_gap {
                tokens.push(&text[start..i]);
                in_gap = true;
            }
        } else if in_gap {
            start = i;
            in_gap = false;
        }
    }
    tokens.push(if in_gap { "" } else { &text[start..] });
    tokens
}

/// Cursor over a borrowed string
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn is_done(&self) -> bool {
        self.rest.is_empty()
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, expected: char) -> Option<()> {
        self.rest = self.rest.strip_prefix(expected)?;
        Some(())
    }

    fn eat_str(&mut self, expected: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(expected)?;
        Some(())
    }

    fn digits(&mut self) -> Option<&'a str> {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (digits, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(digits)
    }

    /// A non-empty quoted string. Either quote character may open or close it,
    /// and the content cannot contain quotes.
    fn quoted(&mut self) -> Option<&'a str> {
        let inner = self.rest.strip_prefix(['"', '\''])?;
        let end = inner.find(['"', '\''])?;
        if end == 0 {
            return None;
        }
        let (content, rest) = inner.split_at(end);
        self.rest = &rest[1..];
        Some(content)
    }

    /// `(<ws>"body"<ws>)` optionally followed by `.struct(<ws>"mask"<ws>)`,
    /// read just after the `s` of a trigger call
    fn trigger_call(&mut self) -> Option<TriggerCall<'a>> {
        let body = self.parenthesized_string()?;
        let mask = self.struct_modifier();
        Some(TriggerCall { body, mask })
    }

    fn struct_modifier(&mut self) -> Option<&'a str> {
        let saved = self.rest;
        self.eat_str(".struct")?;
        let mask = self.parenthesized_string();
        if mask.is_none() {
            self.rest = saved;
        }
        mask
    }

    fn parenthesized_string(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        self.eat('(')?;
        self.skip_whitespace();
        let content = self.quoted()?;
        self.skip_whitespace();
        self.eat(')')?;
        Some(content)
    }
}
