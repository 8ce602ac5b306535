//! Cyrillic ↔ Latin phonetic transliteration.
//!
//! Users type Russian names on a Latin keyboard and the other way around;
//! both directions widen the net for the matcher. Neither direction is an
//! exact inverse of the other.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const CYRILLIC_TO_LATIN: [(char, &str); 33] = [
    ('а', "a"), ('б', "b"), ('в', "v"), ('г', "g"), ('д', "d"),
    ('е', "e"), ('ё', "yo"), ('ж', "zh"), ('з', "z"), ('и', "i"),
    ('й', "y"), ('к', "k"), ('л', "l"), ('м', "m"), ('н', "n"),
    ('о', "o"), ('п', "p"), ('р', "r"), ('с', "s"), ('т', "t"),
    ('у', "u"), ('ф', "f"), ('х', "h"), ('ц', "ts"), ('ч', "ch"),
    ('ш', "sh"), ('щ', "sch"), ('ъ', ""), ('ы', "y"), ('ь', ""),
    ('э', "e"), ('ю', "yu"), ('я', "ya"),
];

/// Applied in order, each over the whole string.
const LATIN_DIGRAPHS: [(&str, &str); 10] = [
    ("sch", "щ"),
    ("sh", "ш"),
    ("ch", "ч"),
    ("ya", "я"),
    ("yu", "ю"),
    ("yo", "ё"),
    ("zh", "ж"),
    ("ts", "ц"),
    ("kh", "х"),
    ("ye", "е"),
];

const LATIN_TO_CYRILLIC: [(char, &str); 25] = [
    ('a', "а"), ('b', "б"), ('v', "в"), ('g', "г"), ('d', "д"),
    ('e', "е"), ('z', "з"), ('i', "и"), ('y', "й"), ('k', "к"),
    ('l', "л"), ('m', "м"), ('n', "н"), ('o', "о"), ('p', "п"),
    ('r', "р"), ('s', "с"), ('t', "т"), ('u', "у"), ('f', "ф"),
    ('h', "х"), ('q', "к"), ('w', "в"), ('x', "кс"), ('j', "дж"),
];

static TO_LATIN: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| CYRILLIC_TO_LATIN.into_iter().collect());

static TO_CYRILLIC: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| LATIN_TO_CYRILLIC.into_iter().collect());

/// Transliterate lowercase Cyrillic into Latin, one character at a time.
///
/// Characters without a mapping pass through unchanged.
///
/// # Example
/// ```
/// use parfum_search::cyrillic_to_latin;
///
/// assert_eq!(cyrillic_to_latin("ладан"), "ladan");
/// assert_eq!(cyrillic_to_latin("шипр 1"), "shipr 1");
/// ```
pub fn cyrillic_to_latin(input: &str) -> String {
    map_chars(input, &TO_LATIN)
}

/// Transliterate lowercase Latin into Cyrillic.
///
/// Digraphs are replaced first with plain substring replacement, so a
/// literal `sh` inside a loanword also becomes `ш`. The matcher downstream
/// is permissive enough that this over-replacement is harmless.
///
/// # Example
/// ```
/// use parfum_search::latin_to_cyrillic;
///
/// assert_eq!(latin_to_cyrillic("shipr"), "шипр");
/// assert_eq!(latin_to_cyrillic("musk"), "муск");
/// ```
pub fn latin_to_cyrillic(input: &str) -> String {
    let mut out = input.to_owned();
    for (from, to) in LATIN_DIGRAPHS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    map_chars(&out, &TO_CYRILLIC)
}

fn map_chars(input: &str, table: &HashMap<char, &'static str>) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match table.get(&ch) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;

    #[test]
    fn test_cyrillic_to_latin_basic() {
        assert_eq!(cyrillic_to_latin("ваниль"), "vanil");
        assert_eq!(cyrillic_to_latin("жасмин"), "zhasmin");
        assert_eq!(cyrillic_to_latin("щавель"), "schavel");
        assert_eq!(cyrillic_to_latin("юдзу"), "yudzu");
    }

    #[test]
    fn test_cyrillic_to_latin_passthrough() {
        assert_eq!(cyrillic_to_latin("oud 540"), "oud 540");
        // tables are lowercase only; callers normalize first
        assert_eq!(cyrillic_to_latin("Ладан"), "Лadan");
    }

    #[test]
    fn test_latin_to_cyrillic_digraphs() {
        assert_eq!(latin_to_cyrillic("schavel"), "щавел");
        assert_eq!(latin_to_cyrillic("zhasmin"), "жасмин");
        assert_eq!(latin_to_cyrillic("yuzu"), "юзу");
        assert_eq!(latin_to_cyrillic("khvoya"), "хвоя");
    }

    #[test]
    fn test_latin_to_cyrillic_multi_char_letters() {
        assert_eq!(latin_to_cyrillic("xeres"), "ксерес");
        assert_eq!(latin_to_cyrillic("jasmine"), "джасмине");
    }

    #[test]
    fn test_latin_to_cyrillic_over_replaces_inside_words() {
        // "sh" in "mushroom" is not a phoneme boundary, it is replaced anyway
        assert_eq!(latin_to_cyrillic("mushroom"), "мушроом");
    }

    #[test]
    fn test_round_trip_short_words() {
        for word in ["дом", "лес", "мох", "кот", "роза", "мята", "шипр", "чай"] {
            let back = latin_to_cyrillic(&cyrillic_to_latin(word));
            assert_eq!(normalize(&back), normalize(word), "round trip failed for {word}");
        }
    }

    #[test]
    fn test_round_trip_known_exceptions() {
        // hard/soft signs vanish, э collapses into е, й before о reads as ё
        assert_eq!(latin_to_cyrillic(&cyrillic_to_latin("съел")), "сел");
        assert_eq!(latin_to_cyrillic(&cyrillic_to_latin("эхо")), "ехо");
        assert_eq!(latin_to_cyrillic(&cyrillic_to_latin("йод")), "ёд");
    }
}
