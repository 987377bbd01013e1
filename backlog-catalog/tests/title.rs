use backlog_catalog::title::{TitleKind, classify_title, normalize_title, sequel_number};

#[test]
fn normalize_lowercases_and_collapses_whitespace() {
    assert_eq!(normalize_title("  Hollow   Knight "), "hollow knight");
}

#[test]
fn normalize_strips_trademarks() {
    assert_eq!(normalize_title("DOOM® Eternal™"), "doom eternal");
}

#[test]
fn normalize_folds_punctuation() {
    assert_eq!(
        normalize_title("Star Wars: Knights of the Old Republic"),
        "star wars knights of old republic"
    );
    assert_eq!(normalize_title("Half-Life 2"), "half life 2");
}

#[test]
fn normalize_drops_leading_article() {
    assert_eq!(normalize_title("The Talos Principle"), "talos principle");
}

#[test]
fn normalize_keeps_apostrophe_words_together() {
    assert_eq!(normalize_title("Assassin’s Creed"), "assassins creed");
}

#[test]
fn normalize_empty() {
    assert_eq!(normalize_title(""), "");
    assert_eq!(normalize_title("™"), "");
}

#[test]
fn sequel_defaults_to_one() {
    assert_eq!(sequel_number("Hades"), 1);
    assert_eq!(sequel_number("Celeste"), 1);
}

#[test]
fn sequel_roman_and_arabic() {
    assert_eq!(sequel_number("Hades II"), 2);
    assert_eq!(sequel_number("Grand Theft Auto V"), 5);
    assert_eq!(sequel_number("Portal 2"), 2);
}

#[test]
fn sequel_takes_last_marker() {
    assert_eq!(sequel_number("Left 4 Dead 2"), 2);
    assert_eq!(sequel_number("Left 4 Dead"), 4);
}

#[test]
fn sequel_ignores_years() {
    assert_eq!(sequel_number("Cyberpunk 2077"), 1);
    assert_eq!(sequel_number("1942"), 1);
}

#[test]
fn sequel_ignores_first_word() {
    assert_eq!(sequel_number("X Rebirth"), 1);
}

#[test]
fn classify_games() {
    assert_eq!(classify_title("Hades"), TitleKind::Game);
    assert_eq!(classify_title("Test Drive Unlimited"), TitleKind::Game);
    assert_eq!(classify_title("Demon's Souls"), TitleKind::Game);
}

#[test]
fn classify_non_games() {
    assert_eq!(classify_title("Celeste - Original Soundtrack"), TitleKind::Soundtrack);
    assert_eq!(classify_title("Hades OST"), TitleKind::Soundtrack);
    assert_eq!(classify_title("Cyberpunk 2077 Demo"), TitleKind::Demo);
    assert_eq!(classify_title("Borderlands 2 Season Pass"), TitleKind::Dlc);
    assert_eq!(classify_title("Path of Exile - DLC"), TitleKind::Dlc);
    assert_eq!(classify_title("Team Fortress 2 Beta"), TitleKind::TestBuild);
    assert_eq!(classify_title("Rust - Public Test Branch"), TitleKind::TestBuild);
    assert_eq!(classify_title("Source SDK Base 2013"), TitleKind::Tool);
    assert_eq!(classify_title("ARK Dedicated Server"), TitleKind::Tool);
}

#[test]
fn kind_is_game() {
    assert!(TitleKind::Game.is_game());
    assert!(!TitleKind::Demo.is_game());
}
