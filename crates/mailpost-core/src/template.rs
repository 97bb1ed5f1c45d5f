//! Mail body template rendering.

use std::collections::HashMap;

/// Replaces `${key}` placeholders with values from `vars`.
///
/// Placeholders whose key is not in the map are left verbatim, wrapper
/// included, so a typo shows up in the delivered mail instead of
/// disappearing silently. A `${` without a closing `}` is copied through
/// as literal text.
#[must_use]
pub fn render_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(template.len());

    let mut rest = template;
    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);

        let after_marker = &rest[start + 2..];
        if let Some(close) = after_marker.find('}') {
            let key = &after_marker[..close];
            match vars.get(key) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str("${");
                    result.push_str(key);
                    result.push('}');
                }
            }
            rest = &after_marker[close + 1..];
        } else {
            // No closing brace anywhere; the rest is literal.
            result.push_str(&rest[start..]);
            rest = "";
        }
    }
    result.push_str(rest);

    result
}
