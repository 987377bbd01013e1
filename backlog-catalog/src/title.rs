//! Game title normalization and classification.
//!
//! Store listings spell the same game many ways:
//! ```text
//! The Witcher® 3: Wild Hunt
//! Witcher 3 - Wild Hunt
//! ```
//!
//! Normalization folds these to one comparable form. Classification spots
//! listings that are not games at all (demos, soundtracks, DLC, test builds,
//! tools) so bulk imports can leave them out.

/// Symbols that never carry meaning in a title.
const STRIPPED_SYMBOLS: &[char] = &[
    '\u{2122}', // ™
    '\u{00A9}', // ©
    '\u{00AE}', // ®
    '\u{0024}', // $
    '\u{20AC}', // €
    '\u{00A3}', // £
    '\u{00A5}', // ¥
    '\u{2022}', // •
    '\u{2026}', // …
    '\'',
    '\u{2019}', // ’
];

/// Highest plain number treated as a sequel marker. Larger numbers are years
/// or model names ("Cyberpunk 2077", "1942").
const MAX_SEQUEL_NUMBER: u32 = 99;

/// What kind of product a store listing is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleKind {
    #[default]
    Game,
    Demo,
    Soundtrack,
    Dlc,
    /// Beta, playtest, or public test build.
    TestBuild,
    /// SDK, editor, or dedicated server.
    Tool,
}

impl TitleKind {
    pub fn is_game(&self) -> bool {
        matches!(self, Self::Game)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Demo => "demo",
            Self::Soundtrack => "soundtrack",
            Self::Dlc => "dlc",
            Self::TestBuild => "test build",
            Self::Tool => "tool",
        }
    }
}

/// Fold a title to its comparable form.
///
/// # Examples
///
/// ```
/// use backlog_catalog::title::normalize_title;
///
/// assert_eq!(normalize_title("The Witcher® 3: Wild Hunt"), "witcher 3 wild hunt");
/// assert_eq!(normalize_title("Baldur's Gate  II"), "baldurs gate ii");
/// ```
pub fn normalize_title(title: &str) -> String {
    let folded: String = title
        .chars()
        .filter(|c| !STRIPPED_SYMBOLS.contains(c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    folded
        .split_whitespace()
        .filter(|word| *word != "the")
        .collect::<Vec<_>>()
        .join(" ")
}

/// The sequel number a title carries, 1 when it has none.
///
/// Looks at every word after the first for a small plain number or a roman
/// numeral and takes the last one, so "Left 4 Dead 2" is 2 and
/// "Half-Life 2: Episode One" is 2.
pub fn sequel_number(title: &str) -> u32 {
    let normalized = normalize_title(title);
    normalized
        .split(' ')
        .skip(1)
        .filter_map(sequel_marker)
        .last()
        .unwrap_or(1)
}

fn sequel_marker(word: &str) -> Option<u32> {
    if word.chars().all(|c| c.is_ascii_digit()) {
        return word.parse::<u32>().ok().filter(|n| (1..=MAX_SEQUEL_NUMBER).contains(n));
    }
    parse_roman(word)
}

/// Parse a small roman numeral (I through XX).
fn parse_roman(word: &str) -> Option<u32> {
    if word.is_empty() || word.len() > 5 {
        return None;
    }

    let values: Vec<u32> = word
        .chars()
        .map(|c| match c {
            'i' => Some(1),
            'v' => Some(5),
            'x' => Some(10),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    let mut total: i64 = 0;
    for (i, &value) in values.iter().enumerate() {
        match values.get(i + 1) {
            Some(&next) if next > value => total -= i64::from(value),
            _ => total += i64::from(value),
        }
    }
    if !(1..=20).contains(&total) {
        return None;
    }
    let total = total as u32;
    // Malformed shapes like "iiv" still sum to something; only canonical spellings count.
    if to_roman(total) != word {
        return None;
    }
    Some(total)
}

fn to_roman(mut n: u32) -> String {
    const TABLE: &[(u32, &str)] = &[(10, "x"), (9, "ix"), (5, "v"), (4, "iv"), (1, "i")];
    let mut out = String::new();
    for &(value, numeral) in TABLE {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

/// Classify a store listing by its title.
pub fn classify_title(title: &str) -> TitleKind {
    let normalized = normalize_title(title);
    let words: Vec<&str> = normalized.split(' ').collect();
    let has = |w: &str| words.contains(&w);
    let has_pair = |a: &str, b: &str| words.windows(2).any(|p| p[0] == a && p[1] == b);

    if has("soundtrack") || has("ost") {
        return TitleKind::Soundtrack;
    }
    if has("dlc") || has_pair("season", "pass") {
        return TitleKind::Dlc;
    }
    if has("demo") {
        return TitleKind::Demo;
    }
    if has("beta") || has("playtest") || has_pair("public", "test") || has_pair("test", "server") {
        return TitleKind::TestBuild;
    }
    if has("sdk") || has_pair("dedicated", "server") {
        return TitleKind::Tool;
    }
    TitleKind::Game
}
