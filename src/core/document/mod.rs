//! Line-oriented view of a workflow file.
//!
//! `WorkflowText` is not a YAML parser. It finds `steps:` sequences, their
//! list items and each item's top-level fields by indentation, so rewrites can
//! replace or extend a step while every other byte stays as it was.

use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

/// Workflow content split on `\n`. Joining the lines back with `\n`
/// reproduces the original text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowText {
    lines: Vec<String>,
}

/// A list item directly under a `steps:` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpan {
    /// Index of the line holding the `-` marker.
    pub start: usize,
    /// One past the last line that belongs to the step.
    pub end: usize,
    /// Whitespace preceding the `-` marker, as written.
    pub dash_indent: String,
    /// Column at which the step's own keys start.
    pub key_column: usize,
    pub fields: Vec<StepField>,
}

/// A top-level `key: value` entry of a step, with any deeper lines under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepField {
    pub key: String,
    /// Inline value after the colon, empty when the value is a nested block.
    pub value: String,
    pub lines: Range<usize>,
}

impl StepField {
    /// Inline value with surrounding quotes removed.
    pub fn unquoted(&self) -> &str {
        unquote(&self.value)
    }
}

impl StepSpan {
    pub fn field(&self, key: &str) -> Option<&StepField> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Action reference from the step's `uses:` field.
    pub fn uses(&self) -> Option<&str> {
        self.field("uses").map(StepField::unquoted)
    }

    pub fn lines(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl WorkflowText {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> &str {
        &self.lines[index]
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Text of a line range, joined with `\n`.
    pub fn text(&self, range: Range<usize>) -> String {
        self.lines[range].join("\n")
    }

    /// Replace a line range. Callers editing several steps apply splices
    /// from the bottom of the file upwards so earlier ranges stay valid.
    pub fn splice(&mut self, range: Range<usize>, replacement: Vec<String>) {
        self.lines.splice(range, replacement);
    }

    /// Every step of every `steps:` sequence, in document order.
    pub fn steps(&self) -> Vec<StepSpan> {
        let mut steps = Vec::new();
        let mut index = 0;
        while index < self.lines.len() {
            if is_steps_key(&self.lines[index]) {
                index = self.collect_steps(index, &mut steps);
            } else {
                index += 1;
            }
        }
        steps
    }

    fn collect_steps(&self, key_line: usize, steps: &mut Vec<StepSpan>) -> usize {
        let parent = indent_width(&self.lines[key_line]);
        let mut item_indent: Option<usize> = None;
        let mut index = key_line + 1;

        while index < self.lines.len() {
            let line = &self.lines[index];
            if is_blank(line) || is_comment(line) {
                index += 1;
                continue;
            }
            let width = indent_width(line);
            let item = list_item(line).is_some();
            if width < parent || (width == parent && !item) {
                break;
            }
            let expected = *item_indent.get_or_insert(width);
            if width < expected {
                break;
            }
            if width == expected && item {
                let step = self.step_at(index);
                index = step.end;
                steps.push(step);
                continue;
            }
            index += 1;
        }
        index
    }

    fn step_at(&self, start: usize) -> StepSpan {
        let dash_line = &self.lines[start];
        let dash_column = indent_width(dash_line);
        let end = self.block_end(start, dash_column);

        let inline_column = list_item(dash_line).flatten();
        let key_column = inline_column.unwrap_or_else(|| {
            self.lines[start + 1..end]
                .iter()
                .find(|line| !is_blank(line))
                .map(|line| indent_width(line))
                .unwrap_or(dash_column + 2)
        });

        let mut starts: Vec<(usize, String, String)> = Vec::new();
        if inline_column.is_some() {
            if let Some((key, value)) = parse_field(&dash_line[key_column..]) {
                starts.push((start, key, value));
            }
        }
        for index in start + 1..end {
            let line = &self.lines[index];
            if is_blank(line) || indent_width(line) != key_column {
                continue;
            }
            if let Some((key, value)) = parse_field(&line[key_column..]) {
                starts.push((index, key, value));
            }
        }

        let mut fields = Vec::with_capacity(starts.len());
        for (position, (line, key, value)) in starts.iter().enumerate() {
            let limit = starts
                .get(position + 1)
                .map(|(next, _, _)| *next)
                .unwrap_or(end);
            fields.push(StepField {
                key: key.clone(),
                value: value.clone(),
                lines: *line..self.trim_trailing_blank(*line, limit),
            });
        }

        StepSpan {
            start,
            end,
            dash_indent: dash_line[..dash_column].to_string(),
            key_column,
            fields,
        }
    }

    /// End of the block opened at `start`: every following line indented
    /// deeper than `column`. Blank lines count only when deeper lines follow.
    fn block_end(&self, start: usize, column: usize) -> usize {
        let mut last = start;
        for index in start + 1..self.lines.len() {
            let line = &self.lines[index];
            if is_blank(line) {
                continue;
            }
            if indent_width(line) <= column {
                break;
            }
            last = index;
        }
        last + 1
    }

    fn trim_trailing_blank(&self, start: usize, mut end: usize) -> usize {
        while end > start + 1 && is_blank(&self.lines[end - 1]) {
            end -= 1;
        }
        end
    }
}

impl fmt::Display for WorkflowText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

/// Leading whitespace width in bytes.
pub fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn is_steps_key(line: &str) -> bool {
    let content = line.trim_start_matches([' ', '\t']);
    let content = content
        .strip_prefix('-')
        .map(str::trim_start)
        .unwrap_or(content);
    matches!(parse_field(content), Some((key, value)) if key == "steps" && value.is_empty())
}

/// `Some(column)` when the line is a list item; the inner value is the column
/// of inline content after the marker, `None` for a bare `-`.
fn list_item(line: &str) -> Option<Option<usize>> {
    let dash_column = indent_width(line);
    let rest = line[dash_column..].strip_prefix('-')?;
    if rest.trim().is_empty() {
        return Some(None);
    }
    let after = rest.trim_start_matches([' ', '\t']);
    if after.len() == rest.len() {
        return None;
    }
    Some(Some(dash_column + 1 + (rest.len() - after.len())))
}

fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<key>[A-Za-z0-9_.-]+):(?:[ \t]+(?P<value>.*?))?[ \t\r]*$")
            .expect("field pattern is a valid regex")
    })
}

fn parse_field(content: &str) -> Option<(String, String)> {
    let captures = field_pattern().captures(content)?;
    let key = captures.name("key")?.as_str().to_string();
    let value = captures
        .name("value")
        .map(|value| value.as_str().to_string())
        .unwrap_or_default();
    Some((key, value))
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
