//! Contact resolution tests.

use parley::contacts::{resolve, Contact, ContactResolver};

fn book() -> Vec<Contact> {
    vec![
        Contact::new("Mom", "+15551230001"),
        Contact::new("Dad", "+15551230002"),
        Contact::new("Alice", "+15551230003"),
        Contact::new("Bob", "+15551230004"),
    ]
}

fn name_of(found: Option<&Contact>) -> Option<&str> {
    found.map(|c| c.name.as_str())
}

#[test]
fn exact_match_ignores_case() {
    let contacts = vec![Contact::new("Alice", "1")];
    assert_eq!(name_of(resolve(&contacts, "alice")), Some("Alice"));
    assert_eq!(name_of(resolve(&contacts, "ALICE")), Some("Alice"));
}

#[test]
fn exact_match_ignores_internal_whitespace() {
    let contacts = vec![Contact::new("Mary Ann", "1")];
    assert_eq!(name_of(resolve(&contacts, "maryann")), Some("Mary Ann"));
}

#[test]
fn fuzzy_match_above_threshold() {
    let contacts = vec![Contact::new("Alice", "1")];
    assert_eq!(name_of(resolve(&contacts, "alicce")), Some("Alice"));
}

#[test]
fn no_match_below_threshold() {
    let contacts = vec![Contact::new("Bob", "1")];
    assert_eq!(resolve(&contacts, "xyz"), None);
}

#[test]
fn empty_book_never_matches() {
    assert_eq!(resolve(&[], "mom"), None);
}

#[test]
fn exact_match_beats_earlier_fuzzy_candidate() {
    let contacts = vec![Contact::new("Alicia", "1"), Contact::new("Alice", "2")];
    let found = resolve(&contacts, "alice").map(|c| c.number.as_str());
    assert_eq!(found, Some("2"));
}

#[test]
fn first_exact_match_wins() {
    let contacts = vec![Contact::new("Bob", "1"), Contact::new("bob", "2")];
    let found = resolve(&contacts, "BOB").map(|c| c.number.as_str());
    assert_eq!(found, Some("1"));
}

#[test]
fn higher_fuzzy_score_wins_regardless_of_order() {
    // "dan": Dad 2/3, Dana 3/4.
    let contacts = vec![Contact::new("Dad", "1"), Contact::new("Dana", "2")];
    let found = resolve(&contacts, "dan").map(|c| c.number.as_str());
    assert_eq!(found, Some("2"));
}

#[test]
fn fuzzy_ties_keep_first_seen() {
    // "dan": Dad and Dax both 2/3.
    let contacts = vec![Contact::new("Dad", "1"), Contact::new("Dax", "2")];
    let found = resolve(&contacts, "dan").map(|c| c.number.as_str());
    assert_eq!(found, Some("1"));
}

#[test]
fn best_score_wins_across_book() {
    assert_eq!(name_of(resolve(&book(), "mum")), Some("Mom"));
    assert_eq!(name_of(resolve(&book(), "bobby")), Some("Bob"));
}

#[test]
fn threshold_is_configurable() {
    let contacts = vec![Contact::new("Alice", "1")];
    // "al" vs "alice": 2 / 5 = 0.4.
    assert_eq!(resolve(&contacts, "al"), None);

    let lenient = ContactResolver::with_threshold(0.4);
    assert_eq!(name_of(lenient.resolve(&contacts, "al")), Some("Alice"));

    let strict = ContactResolver::with_threshold(0.9);
    assert_eq!(strict.resolve(&contacts, "alicce"), None);
}

#[test]
fn zero_score_is_never_selected() {
    let resolver = ContactResolver::with_threshold(0.0);
    let contacts = vec![Contact::new("Bob", "1")];
    assert_eq!(resolver.resolve(&contacts, "xyz"), None);
}

#[test]
fn overlong_queries_are_capped() {
    let resolver = ContactResolver {
        fuzzy_match_threshold: 0.5,
        max_query_chars: 5,
    };
    let contacts = vec![Contact::new("Alice", "1")];
    let query = format!("alice{}", "z".repeat(10_000));
    assert_eq!(name_of(resolver.resolve(&contacts, &query)), Some("Alice"));
}

#[test]
fn resolver_is_shareable_across_threads() {
    let contacts = std::sync::Arc::new(book());
    let handles: Vec<_> = ["mom", "dad", "alice", "bob"]
        .into_iter()
        .map(|name| {
            let contacts = std::sync::Arc::clone(&contacts);
            std::thread::spawn(move || resolve(&contacts, name).map(|c| c.number.clone()))
        })
        .collect();
    for handle in handles {
        let number = handle.join().expect("thread should not panic");
        assert!(number.is_some());
    }
}
