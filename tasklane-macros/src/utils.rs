/// Converts a `CamelCase` identifier to `snake_case`.
///
/// An underscore is inserted before an uppercase letter that follows a
/// lowercase letter or digit, and before the last capital of an acronym
/// that is followed by a lowercase letter, so `HTTPRequest` becomes
/// `http_request`.
pub(crate) fn snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());

            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower)
            {
                out.push('_');
            }
        }

        out.extend(c.to_lowercase());
    }

    out
}

/// Converts a `CamelCase` identifier to `SCREAMING_SNAKE_CASE`.
pub(crate) fn screaming_case(ident: &str) -> String {
    snake_case(ident).to_uppercase()
}
