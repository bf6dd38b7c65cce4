//! `{name}` placeholder templates with explicit formatting errors.

use std::collections::HashMap;

use thiserror::Error;

/// Template parse or formatting error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// The template references a variable absent from the provided map.
    #[error("missing template variable: {0}")]
    MissingVariable(String),

    /// A `{` opened a placeholder that never closes.
    #[error("unclosed placeholder starting at byte {0}")]
    UnclosedPlaceholder(usize),
}

/// One parsed piece of a template.
enum Segment {
    Literal(String),
    Variable(String),
}

/// Text template with `{name}` placeholders.
///
/// `{{` and `}}` render as literal braces. Formatting fails when a referenced
/// variable is absent; variables in the map that the template never mentions
/// are ignored.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Wraps the template text. Parsing happens on use, so a malformed
    /// template surfaces the error from `format` or `input_variables`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The raw template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder names in first-appearance order, deduplicated.
    pub fn input_variables(&self) -> Result<Vec<String>, PromptError> {
        let mut vars = Vec::new();
        for segment in parse(&self.template)? {
            if let Segment::Variable(name) = segment {
                if !vars.contains(&name) {
                    vars.push(name);
                }
            }
        }
        Ok(vars)
    }

    /// Renders the template with the given variables.
    pub fn format(&self, vars: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut out = String::with_capacity(self.template.len());
        for segment in parse(&self.template)? {
            match segment {
                Segment::Literal(text) => out.push_str(&text),
                Segment::Variable(name) => match vars.get(&name) {
                    Some(value) => out.push_str(value),
                    None => return Err(PromptError::MissingVariable(name)),
                },
            }
        }
        Ok(out)
    }
}

/// Splits a template into literal and variable segments.
///
/// A lone `}` is a literal; `{{` / `}}` escape to single braces.
fn parse(template: &str) -> Result<Vec<Segment>, PromptError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    literal.push('{');
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for (_, c2) in chars.by_ref() {
                    if c2 == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c2);
                }
                if !closed {
                    return Err(PromptError::UnclosedPlaceholder(i));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(name.trim().to_string()));
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                literal.push('}');
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}
