//! App directory: spoken app names to the URL that opens them.

use std::collections::BTreeMap;

/// Built-in app table, keyed by lower-cased name.
const BUILTIN_APPS: &[(&str, &str)] = &[
    ("maps", "https://maps.google.com"),
    ("youtube", "https://youtube.com"),
    ("spotify", "https://open.spotify.com"),
    ("whatsapp", "https://wa.me"),
    ("gmail", "https://mail.google.com"),
    ("calendar", "https://calendar.google.com"),
    ("twitter", "https://x.com"),
    ("x", "https://x.com"),
    ("reddit", "https://reddit.com"),
    ("weather", "https://weather.com"),
];

fn normalize_app(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Look up a built-in app by name.
///
/// Matching is case-insensitive and ignores surrounding whitespace only;
/// `"You Tube"` does not match `youtube`.
pub fn lookup(app_name: &str) -> Option<&'static str> {
    let key = normalize_app(app_name);
    BUILTIN_APPS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, url)| *url)
}

/// Built-in apps plus user-configured entries.
///
/// Extra entries take precedence over built-ins with the same name.
#[derive(Debug, Clone, Default)]
pub struct AppDirectory {
    extra: BTreeMap<String, String>,
}

impl AppDirectory {
    /// Directory with user entries layered over the built-in table.
    pub fn with_extra<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let extra = entries
            .into_iter()
            .map(|(name, url)| (normalize_app(name.as_ref()), url.into()))
            .collect();
        Self { extra }
    }

    /// URL for `app_name`, if known.
    pub fn lookup(&self, app_name: &str) -> Option<&str> {
        let key = normalize_app(app_name);
        match self.extra.get(&key) {
            Some(url) => Some(url.as_str()),
            None => lookup(&key),
        }
    }

    /// Every app name this directory answers to, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = BUILTIN_APPS
            .iter()
            .map(|(name, _)| *name)
            .chain(self.extra.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
