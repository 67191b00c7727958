mod macros;

/// Version of the contact form crates, as reported in user agents and `--version`.
pub fn contact_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
