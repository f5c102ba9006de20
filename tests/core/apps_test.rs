//! App directory lookups.

use parley::apps::{lookup, AppDirectory};

#[test]
fn builtin_lookup_is_case_insensitive() {
    assert_eq!(lookup("YouTube"), Some("https://youtube.com"));
    assert_eq!(lookup("  gmail "), Some("https://mail.google.com"));
}

#[test]
fn twitter_and_x_share_a_url() {
    assert_eq!(lookup("twitter"), lookup("x"));
}

#[test]
fn unknown_app_is_none() {
    assert_eq!(lookup("notarealapp"), None);
}

#[test]
fn internal_whitespace_is_not_stripped() {
    assert_eq!(lookup("you tube"), None);
}

#[test]
fn extra_entries_extend_and_override() {
    let apps = AppDirectory::with_extra([
        ("Jira", "https://jira.example.com"),
        ("maps", "https://openstreetmap.org"),
    ]);
    assert_eq!(apps.lookup("jira"), Some("https://jira.example.com"));
    assert_eq!(apps.lookup("Maps"), Some("https://openstreetmap.org"));
    assert_eq!(apps.lookup("spotify"), Some("https://open.spotify.com"));
    assert_eq!(apps.lookup("notarealapp"), None);
}

#[test]
fn names_are_sorted_and_unique() {
    let apps = AppDirectory::with_extra([("maps", "https://openstreetmap.org")]);
    let names = apps.names();
    assert!(names.windows(2).all(|w| w[0] < w[1]));
    assert!(names.contains(&"youtube"));
    assert_eq!(names.iter().filter(|n| **n == "maps").count(), 1);
}
