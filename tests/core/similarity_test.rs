//! Similarity score properties.

use parley::similarity::{normalize_key, score};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn identical_strings_score_one() {
    for s in ["a", "alice", "Mary Ann", "Ünïcödé"] {
        assert!(approx(score(s, s), 1.0), "score({s:?}, {s:?})");
    }
}

#[test]
fn normalization_ignores_case_and_whitespace() {
    assert!(approx(score("Mary Ann", "maryann"), 1.0));
    assert!(approx(score("  BOB ", "bob"), 1.0));
    assert_eq!(normalize_key(" Jo Anne "), "joanne");
}

#[test]
fn empty_inputs_score_zero() {
    assert!(approx(score("", ""), 0.0));
    assert!(approx(score("   ", "\t"), 0.0));
    assert!(approx(score("", "alice"), 0.0));
}

#[test]
fn disjoint_strings_score_zero() {
    assert!(approx(score("bob", "xyz"), 0.0));
}

#[test]
fn score_is_lcs_over_longer_length() {
    // "alice" is a subsequence of "alicce": 5 / 6.
    assert!(approx(score("alice", "alicce"), 5.0 / 6.0));
    // "dad" vs "dan": "da" common, 2 / 3.
    assert!(approx(score("dad", "dan"), 2.0 / 3.0));
}

#[test]
fn score_is_symmetric() {
    let samples = ["", "mom", "Mum", "alice", "alicce", "bob", "Robert", "xyz"];
    for a in samples {
        for b in samples {
            assert!(approx(score(a, b), score(b, a)), "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn score_stays_in_unit_interval() {
    let samples = ["a", "ab", "ba", "abc", "cab", "zzzz"];
    for a in samples {
        for b in samples {
            let s = score(a, b);
            assert!((0.0..=1.0).contains(&s), "{a:?} vs {b:?} = {s}");
        }
    }
}
