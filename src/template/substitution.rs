//! Placeholder substitution for plain-text templates

use super::types::{TemplateError, TemplateParams, TemplateResult};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replace every `{{variable}}` in `template` with its value from `params`.
///
/// A single left-to-right pass: substituted values are never re-scanned, so
/// values containing braces are emitted verbatim. Every placeholder must have
/// a value; unused params are ignored.
pub fn substitute_placeholders(
    name: &str,
    template: &str,
    params: &TemplateParams,
) -> TemplateResult<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        rendered.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let end = after_open
            .find(CLOSE)
            .ok_or_else(|| TemplateError::Unterminated {
                name: name.to_string(),
            })?;

        let placeholder = after_open[..end].trim();
        let value = params
            .get(placeholder)
            .ok_or_else(|| TemplateError::MissingValue {
                name: name.to_string(),
                placeholder: placeholder.to_string(),
            })?;

        rendered.push_str(value);
        rest = &after_open[end + CLOSE.len()..];
    }

    rendered.push_str(rest);
    Ok(rendered)
}
