//! Deck name to filename normalization.

use deck2trice::config::FALLBACK_FILENAME;
use deck2trice::normalize::{
    normalize_name, sanitize_filename, strip_emoji, strip_unicode_escapes, MAX_NAME_BYTES,
};
use proptest::prelude::*;
use regex::Regex;

fn has_emoji(s: &str) -> bool {
    let emoji = Regex::new(r"\p{Extended_Pictographic}|[\x{1F1E6}-\x{1F1FF}\x{1F3FB}-\x{1F3FF}\x{200D}\x{FE0F}\x{20E3}]")
        .unwrap();
    emoji.is_match(s)
}

// ---------------------------------------------------------------------------
// Emoji
// ---------------------------------------------------------------------------

#[test]
fn strips_single_emoji() {
    assert_eq!(normalize_name("🔥 Burn 🔥"), "Burn");
    assert_eq!(normalize_name("Elves 🧝 Go Wide"), "Elves  Go Wide");
}

#[test]
fn strips_zwj_sequences_and_modifiers() {
    assert_eq!(normalize_name("👨‍👩‍👧 Family Reunion"), "Family Reunion");
    assert_eq!(normalize_name("👍🏽 Good Stuff"), "Good Stuff");
    assert_eq!(normalize_name("Rainbow 🏳️‍🌈"), "Rainbow");
}

#[test]
fn strips_flags_and_keycaps() {
    assert_eq!(normalize_name("🇸🇪 Swedish Pauper"), "Swedish Pauper");
    assert_eq!(normalize_name("Top 1️⃣0️⃣"), "Top");
    assert_eq!(strip_emoji("#️⃣ Hash"), " Hash");
}

#[test]
fn surrogate_pair_escapes_decode_to_emoji_and_are_stripped() {
    let title: String = serde_json::from_str(r#""\ud83d\ude00 Smile""#).unwrap();
    assert_eq!(title, "😀 Smile");
    assert_eq!(normalize_name(&title), "Smile");
}

#[test]
fn keeps_non_emoji_unicode() {
    assert_eq!(normalize_name("Æther Vial - Tempo"), "Æther Vial - Tempo");
    assert_eq!(normalize_name("Atraxa, Praetors' Voice"), "Atraxa, Praetors' Voice");
    assert_eq!(normalize_name("青の速攻 2"), "青の速攻 2");
}

// ---------------------------------------------------------------------------
// Escape leftovers
// ---------------------------------------------------------------------------

#[test]
fn removes_literal_unicode_escapes() {
    assert_eq!(strip_unicode_escapes(r"Deck \ud83d\udd25 Fire"), "Deck  Fire");
    assert_eq!(normalize_name(r"\u2728Sparkle\u2728"), "Sparkle");
    assert_eq!(normalize_name(r"Short \u12 escape"), "Short u12 escape");
}

// ---------------------------------------------------------------------------
// Filesystem safety
// ---------------------------------------------------------------------------

#[test]
fn removes_separators_and_reserved_characters() {
    assert_eq!(normalize_name("Jund/Sultai: Control?"), "JundSultai Control");
    assert_eq!(normalize_name(r#"a\b<c>d*e|f"g"#), "abcdefg");
    assert_eq!(normalize_name("tab\there\nnewline"), "tabherenewline");
}

#[test]
fn trims_trailing_dots_and_spaces() {
    assert_eq!(normalize_name("Deck... "), "Deck");
    assert_eq!(normalize_name("  Spaced  "), "Spaced");
}

#[test]
fn windows_device_names_get_a_suffix() {
    assert_eq!(normalize_name("CON"), "CON_");
    assert_eq!(normalize_name("nul.txt"), "nul_.txt");
    assert_eq!(normalize_name("CO/N"), "CON_");
    assert_eq!(normalize_name("LPT1 "), "LPT1_");
    assert_eq!(normalize_name("Console"), "Console");
}

#[test]
fn titles_starting_with_a_device_name_keep_their_text() {
    assert_eq!(normalize_name("Con. Artists"), "Con_. Artists");
    assert_eq!(normalize_name("Aux.Control"), "Aux_.Control");
    assert_ne!(normalize_name("Con. Artists"), normalize_name("Aux.Control"));
    assert_eq!(normalize_name("Con_. Artists"), "Con_. Artists");
}

#[test]
fn empty_results_fall_back() {
    assert_eq!(normalize_name(""), FALLBACK_FILENAME);
    assert_eq!(normalize_name("🔥🔥🔥"), FALLBACK_FILENAME);
    assert_eq!(normalize_name("..."), FALLBACK_FILENAME);
    assert_eq!(normalize_name("///"), FALLBACK_FILENAME);
}

#[test]
fn sanitize_may_return_empty() {
    assert_eq!(sanitize_filename("???"), "");
}

#[test]
fn long_names_are_cut_on_a_char_boundary() {
    let title = "é".repeat(300);
    let name = normalize_name(&title);
    assert!(name.len() <= MAX_NAME_BYTES);
    assert!(name.chars().all(|c| c == 'é'));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn title_strategy() -> impl Strategy<Value = String> {
    let pieces = prop_oneof![
        any::<char>().prop_map(|c| c.to_string()),
        prop::sample::select(vec![
            "🔥", "👨‍👩‍👧", "🏳️‍🌈", "🇸🇪", "1️⃣", "👍🏽", "/", "\\", ".", " ", "CON", "\\u00e9", "\u{200D}",
            "Deck", "Æ",
        ])
        .prop_map(str::to_string),
    ];
    prop::collection::vec(pieces, 0..24).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn normalize_is_idempotent(title in title_strategy()) {
        let once = normalize_name(&title);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn normalize_never_returns_separators_or_emoji(title in title_strategy()) {
        let name = normalize_name(&title);
        prop_assert!(!name.is_empty());
        prop_assert!(!name.contains('/') && !name.contains('\\'));
        prop_assert!(!has_emoji(&name), "emoji left in {:?}", name);
    }

    #[test]
    fn normalize_handles_arbitrary_strings(title in any::<String>()) {
        let name = normalize_name(&title);
        prop_assert!(!name.is_empty());
        prop_assert!(!name.contains('/') && !name.contains('\\'));
        prop_assert_eq!(normalize_name(&name), name.clone());
    }
}
