// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip/annotation template expansion.
//!
//! Users may supply a template like `"{name}: {value}%"`; the formatter
//! substitutes each `{token}` from the hovered data point's fields.
//! Unmatched tokens stay verbatim, and the function is pure — it reads only
//! its arguments. Election-style charts register dynamic per-series tokens
//! (`{<partyName>}`), so fields are an open set rather than a fixed struct.

use hashbrown::HashMap;

/// The default annotation template used when no custom template is set.
pub const DEFAULT_TEMPLATE: &str = "{name}: {value}";

/// The fields available to a template for one data point.
#[derive(Clone, Debug, Default)]
pub struct AnnotationContext {
    fields: HashMap<String, String>,
}

impl AnnotationContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field; later values replace earlier ones for the same token.
    pub fn field(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(token.into(), value.into());
        self
    }

    fn get(&self, token: &str) -> Option<&str> {
        self.fields.get(token).map(String::as_str)
    }
}

/// Expands `{token}` placeholders in `template` from the context.
///
/// Empty templates fall back to [`DEFAULT_TEMPLATE`]. Tokens without a
/// matching field are left verbatim (including the braces); there is no
/// escaping syntax and no error path.
pub fn format_annotation(template: &str, ctx: &AnnotationContext) -> String {
    let template = if template.trim().is_empty() {
        DEFAULT_TEMPLATE
    } else {
        template
    };

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find('}') {
            Some(close) => {
                let token = &after_open[..close];
                match ctx.get(token) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(token);
                        out.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                // Unclosed brace: keep the rest verbatim.
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_tokens() {
        let ctx = AnnotationContext::new().field("name", "Alma").field("value", "42");
        assert_eq!(format_annotation("{name}: {value}%", &ctx), "Alma: 42%");
    }

    #[test]
    fn unmatched_tokens_stay_verbatim() {
        let ctx = AnnotationContext::new().field("name", "Alma");
        assert_eq!(format_annotation("{name} {missing}", &ctx), "Alma {missing}");
    }

    #[test]
    fn empty_template_uses_default() {
        let ctx = AnnotationContext::new().field("name", "x").field("value", "1");
        assert_eq!(format_annotation("", &ctx), "x: 1");
        assert_eq!(format_annotation("   ", &ctx), "x: 1");
    }

    #[test]
    fn dynamic_series_tokens_resolve() {
        let ctx = AnnotationContext::new()
            .field("region", "Pest")
            .field("Party A", "51");
        assert_eq!(
            format_annotation("{region}: {Party A} / {Party B}", &ctx),
            "Pest: 51 / {Party B}"
        );
    }

    #[test]
    fn unclosed_brace_is_left_alone() {
        let ctx = AnnotationContext::new().field("name", "x");
        assert_eq!(format_annotation("{name} {oops", &ctx), "x {oops");
    }
}
