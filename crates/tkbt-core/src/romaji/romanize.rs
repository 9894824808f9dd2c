use super::trie::KanaTrie;

const SOKUON: char = 'っ';

/// Transliterate hiragana into Latin letters using the global table.
///
/// Longest match wins at every position. A sokuon doubles the first
/// consonant of the following syllable (`っち` becomes "tchi"). Characters
/// the table does not cover are copied through unchanged.
pub fn romanize(hiragana: &str) -> String {
    romanize_with(KanaTrie::global(), hiragana)
}

pub fn romanize_with(trie: &KanaTrie, hiragana: &str) -> String {
    let chars: Vec<char> = hiragana.chars().collect();
    let mut out = String::with_capacity(hiragana.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == SOKUON {
            if let Some(c) = geminate_consonant(trie, &chars[i + 1..]) {
                out.push(c);
                i += 1;
                continue;
            }
        }
        match trie.longest_match(&chars[i..]) {
            Some((consumed, latin)) => {
                out.push_str(latin);
                i += consumed;
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }

    out
}

/// Consonant to emit for a sokuon followed by `rest`, if any.
fn geminate_consonant(trie: &KanaTrie, rest: &[char]) -> Option<char> {
    if rest.first() == Some(&SOKUON) {
        return None;
    }
    let (_, latin) = trie.longest_match(rest)?;
    if latin.starts_with("ch") {
        return Some('t');
    }
    latin
        .chars()
        .next()
        .filter(|c| c.is_ascii_alphabetic() && !matches!(c, 'a' | 'i' | 'u' | 'e' | 'o'))
}
