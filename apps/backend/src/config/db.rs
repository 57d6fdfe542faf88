use std::env;

/// Optional database URL for the match store.
///
/// When unset (or blank) the server keeps finished matches in memory only.
pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
