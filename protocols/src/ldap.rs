//! LDAP query-building and attribute-extraction helpers.
//!
//! No I/O happens here; the connection lives in `adres-core`.

use std::collections::HashMap;

/// Attributes requested for every computer lookup.
pub const COMPUTER_ATTRS: [&str; 5] = [
    "name",
    "dNSHostName",
    "operatingSystem",
    "pwdLastSet",
    "lastLogonTimestamp",
];

/// Search filter matching the computer object for a hostname.
pub fn computer_filter(name: &str) -> String {
    format!("(&(objectClass=computer)(name={}))", escape_filter(name))
}

/// Escapes a value for embedding in a search filter (RFC 4515).
pub fn escape_filter(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\5c"),
            '*' => escaped.push_str("\\2a"),
            '(' => escaped.push_str("\\28"),
            ')' => escaped.push_str("\\29"),
            '\0' => escaped.push_str("\\00"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// First value of a (possibly multi-valued) entry attribute.
pub fn first_value<'a>(attrs: &'a HashMap<String, Vec<String>>, name: &str) -> Option<&'a str> {
    attrs
        .get(name)
        .and_then(|values| values.first())
        .map(String::as_str)
}
