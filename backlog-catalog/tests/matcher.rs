use backlog_catalog::matcher::{DEFAULT_THRESHOLD, Matcher, title_distance};

#[test]
fn empty_candidates_yield_none() {
    let matcher = Matcher::default();
    let candidates: Vec<String> = vec![];
    assert!(matcher.best_match("Hades", &candidates).is_none());
}

#[test]
fn exact_match_scores_zero() {
    let matcher = Matcher::default();
    let candidates = ["Celeste", "Hades", "Hollow Knight"];
    let m = matcher.best_match("Hades", &candidates).unwrap();
    assert_eq!(m.candidate, "Hades");
    assert_eq!(m.index, 1);
    assert_eq!(m.score, 0.0);
}

#[test]
fn exact_match_beats_earlier_near_exact() {
    let matcher = Matcher::default();
    let candidates = ["HADES", "Hades"];
    let m = matcher.best_match("Hades", &candidates).unwrap();
    assert_eq!(m.index, 1);
    assert_eq!(m.score, 0.0);
}

#[test]
fn nothing_under_threshold_yields_none() {
    let matcher = Matcher::default();
    let candidates = ["Stardew Valley", "Factorio", "Outer Wilds"];
    assert!(matcher.best_match("Hades", &candidates).is_none());
}

#[test]
fn sequel_is_not_matched_to_original() {
    let matcher = Matcher::default();
    let candidates = ["Hades"];
    assert!(matcher.best_match("Hades II", &candidates).is_none());
}

#[test]
fn punctuation_differences_match() {
    let matcher = Matcher::default();
    let candidates = ["Witcher 3 - Wild Hunt"];
    let m = matcher.best_match("The Witcher® 3: Wild Hunt", &candidates).unwrap();
    assert_eq!(m.index, 0);
    assert!(m.score < 0.01);
}

#[test]
fn small_typos_match() {
    let matcher = Matcher::default();
    let candidates = ["Hollow Knight"];
    let m = matcher.best_match("Hollow Kinght", &candidates).unwrap();
    assert!(m.score > 0.0);
    assert!(m.score < DEFAULT_THRESHOLD);
}

#[test]
fn ties_keep_first_candidate() {
    let matcher = Matcher::default();
    let candidates = ["Celeste!", "Celeste?"];
    let m = matcher.best_match("Celeste", &candidates).unwrap();
    assert_eq!(m.index, 0);
}

#[test]
fn lower_threshold_rejects_typos() {
    let strict = Matcher::new(0.05);
    let candidates = ["Hollow Knight"];
    assert!(strict.best_match("Hollow Kinght", &candidates).is_none());
}

#[test]
fn threshold_is_clamped() {
    assert_eq!(Matcher::new(3.0).threshold(), 1.0);
    assert_eq!(Matcher::new(-1.0).threshold(), 0.0);
}

#[test]
fn non_finite_threshold_falls_back_to_default() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let matcher = Matcher::new(bad);
        assert_eq!(matcher.threshold(), DEFAULT_THRESHOLD);
        assert!(matcher.is_match("Hades", "hades"));
        assert!(!matcher.is_match("Hades", "Celeste"));
    }
}

#[test]
fn distance_is_symmetric() {
    let a = "Ori and the Blind Forest";
    let b = "Ori and the Will of the Wisps";
    assert_eq!(title_distance(a, b), title_distance(b, a));
}

#[test]
fn is_match_uses_threshold() {
    let matcher = Matcher::default();
    assert!(matcher.is_match("Hades", "hades"));
    assert!(!matcher.is_match("Hades", "Hades II"));
}
