//! Nested note text and its reduction to bullet lines.
//!
//! Release-note bodies in the documentation YAML are free-form: a single
//! string, a list of strings, or mappings whose keys act as sub-headings for
//! the nested values. [`TextBlock`] captures that shape as a closed sum type and
//! [`TextBlock::flatten`] walks it depth-first, emitting one `- ` bullet line per
//! string leaf.

use serde::Deserialize;
use serde_yaml::Value;

/// Prefix written in front of every flattened leaf.
pub const BULLET: &str = "- ";

/// Nested text content of a note for one locale.
///
/// Number and boolean scalars are kept as leaves (`42` flattens to `- 42`)
/// rather than dropped; `null` contributes no line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum TextBlock {
    Leaf(String),
    Sequence(Vec<TextBlock>),
    /// Entries keep the order they had in the source document.
    OrderedMap(Vec<(String, TextBlock)>),
}

impl Default for TextBlock {
    fn default() -> Self {
        TextBlock::Sequence(Vec::new())
    }
}

/// Separator placed between flattened lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSeparator {
    #[default]
    Newline,
    /// Newline followed by a tab, for renderers that indent continuation lines.
    NewlineTab,
}

impl LineSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineSeparator::Newline => "\n",
            LineSeparator::NewlineTab => "\n\t",
        }
    }
}

/// How a [`TextBlock`] is rendered into a single string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlattenStyle {
    pub separator: LineSeparator,
    /// Append a trailing space to lines produced from mapping keys.
    pub pad_keys: bool,
}

impl TextBlock {
    /// Ordered bullet lines, one per string leaf reachable from `self`.
    pub fn lines(&self, style: FlattenStyle) -> Vec<String> {
        let mut out = Vec::new();
        visit(self, style, &mut out);
        out
    }

    /// Bullet lines joined with the style's separator.
    pub fn flatten(&self, style: FlattenStyle) -> String {
        self.lines(style).join(style.separator.as_str())
    }
}

fn visit(block: &TextBlock, style: FlattenStyle, out: &mut Vec<String>) {
    match block {
        TextBlock::Leaf(text) => out.push(format!("{BULLET}{text}")),
        TextBlock::Sequence(items) => {
            for item in items {
                visit(item, style, out);
            }
        }
        TextBlock::OrderedMap(entries) => {
            for (key, value) in entries {
                if style.pad_keys {
                    out.push(format!("{BULLET}{key} "));
                } else {
                    out.push(format!("{BULLET}{key}"));
                }
                visit(value, style, out);
            }
        }
    }
}

impl From<Value> for TextBlock {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => TextBlock::Leaf(s),
            Value::Number(n) => TextBlock::Leaf(n.to_string()),
            Value::Bool(b) => TextBlock::Leaf(b.to_string()),
            Value::Null => TextBlock::default(),
            Value::Sequence(items) => {
                TextBlock::Sequence(items.into_iter().map(TextBlock::from).collect())
            }
            Value::Mapping(map) => TextBlock::OrderedMap(
                map.into_iter()
                    .map(|(k, v)| (key_text(k), TextBlock::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => TextBlock::from(tagged.value),
        }
    }
}

impl From<&str> for TextBlock {
    fn from(s: &str) -> Self {
        TextBlock::Leaf(s.to_string())
    }
}

fn key_text(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => key_text(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
