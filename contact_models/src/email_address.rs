use std::sync::LazyLock;

use regex::Regex;

/// Accepted shape of an email address: an unquoted local part, an `@` and one
/// or more dot separated DNS labels.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .unwrap()
});

pub fn is_valid_email_address(s: &str) -> bool {
    EMAIL_ADDRESS_REGEX.is_match(s)
}
