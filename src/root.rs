use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::arabic::{is_letter, is_mark, Haraka, SHADDA, TATWEEL};
use crate::error::ConjugationError;

/// One root consonant and the short vowel written on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Radical {
    pub letter: char,
    pub vowel: Haraka,
}

/// The three radicals (fa, ayn, lam) of a sound triliteral verb, as read from
/// its past-tense 3rd person masculine singular form. The lam's vowel is the
/// final vowel of that form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Root {
    radicals: [Radical; 3],
}

impl Root {
    pub fn fa(&self) -> Radical {
        self.radicals[0]
    }

    pub fn ayn(&self) -> Radical {
        self.radicals[1]
    }

    pub fn lam(&self) -> Radical {
        self.radicals[2]
    }

    pub fn radicals(&self) -> &[Radical; 3] {
        &self.radicals
    }

    /// The fully voweled past-tense form, e.g. `فَعَلَ`.
    pub fn canonical_form(&self) -> String {
        let mut out = String::with_capacity(12);
        for radical in &self.radicals {
            out.push(radical.letter);
            out.push(radical.vowel.as_char());
        }
        out
    }

    /// Consonants only, e.g. `ف-ع-ل`.
    pub fn skeleton(&self) -> String {
        let letters: Vec<String> = self.radicals.iter().map(|r| r.letter.to_string()).collect();
        letters.join("-")
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_form())
    }
}

// Anything outside the Arabic block: spaces, bidi controls, Latin noise.
fn outside_arabic_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\x{0600}-\x{06FF}]").expect("static pattern"))
}

fn invalid(message: impl Into<String>) -> ConjugationError {
    ConjugationError::InvalidRoot(message.into())
}

/// Splits a voweled past-tense verb into its three radicals.
///
/// The ayn's vowel is mandatory since it decides the past stem. A missing vowel
/// on the fa or the lam is read as fatha, which is the only vowel those
/// positions take in a sound form-I past verb.
pub fn decompose(verb: &str) -> Result<Root, ConjugationError> {
    let cleaned = outside_arabic_block().replace_all(verb, "");
    let mut groups: Vec<(char, Option<Haraka>)> = Vec::with_capacity(3);

    for c in cleaned.chars() {
        if c == TATWEEL {
            continue;
        }
        if is_letter(c) {
            groups.push((c, None));
            continue;
        }
        if let Some(haraka) = Haraka::from_char(c) {
            let Some(group) = groups.last_mut() else {
                return Err(invalid(format!("{} appears before the first letter.", haraka.name())));
            };
            if group.1.is_some() {
                return Err(invalid(format!("Letter {} carries more than one haraka.", group.0)));
            }
            group.1 = Some(haraka);
            continue;
        }
        if c == SHADDA {
            return Err(invalid("Doubled roots (shadda) are not supported."));
        }
        if is_mark(c) {
            return Err(invalid(format!("Unsupported mark U+{:04X}.", c as u32)));
        }
        return Err(invalid(format!("Unexpected character '{}' in verb.", c)));
    }

    if groups.len() != 3 {
        return Err(invalid(format!(
            "Please enter a three-letter verb with harakat (e.g., ذَهَبَ); found {} letters.",
            groups.len()
        )));
    }

    let (fa_letter, fa_vowel) = groups[0];
    let (ayn_letter, ayn_vowel) = groups[1];
    let (lam_letter, lam_vowel) = groups[2];

    let fa_vowel = match fa_vowel {
        None => Haraka::Fatha,
        Some(Haraka::Sukun) => return Err(invalid("The first root letter cannot carry a sukun.")),
        Some(h) => h,
    };
    let ayn_vowel = match ayn_vowel {
        None => return Err(invalid("Could not detect the Haraka on the second root letter.")),
        Some(Haraka::Sukun) => return Err(invalid("The second root letter needs a fatha, damma or kasra.")),
        Some(h) => h,
    };
    let lam_vowel = match lam_vowel {
        None | Some(Haraka::Fatha) => Haraka::Fatha,
        Some(other) => {
            return Err(invalid(format!(
                "A past-tense verb in the هُوَ form ends in fatha, not {}.",
                other.name()
            )))
        }
    };

    let root = Root {
        radicals: [
            Radical { letter: fa_letter, vowel: fa_vowel },
            Radical { letter: ayn_letter, vowel: ayn_vowel },
            Radical { letter: lam_letter, vowel: lam_vowel },
        ],
    };
    debug!(input = verb, root = %root.skeleton(), "decomposed verb");
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reason(result: Result<Root, ConjugationError>) -> String {
        match result {
            Err(ConjugationError::InvalidRoot(reason)) => reason,
            other => panic!("expected InvalidRoot, got {:?}", other),
        }
    }

    #[test]
    fn decomposes_fully_voweled_verb() {
        let root = decompose("فَعَلَ").unwrap();
        assert_eq!(root.fa(), Radical { letter: 'ف', vowel: Haraka::Fatha });
        assert_eq!(root.ayn(), Radical { letter: 'ع', vowel: Haraka::Fatha });
        assert_eq!(root.lam(), Radical { letter: 'ل', vowel: Haraka::Fatha });
        assert_eq!(root.skeleton(), "ف-ع-ل");
    }

    #[test]
    fn round_trips_to_canonical_form() {
        for verb in ["فَعَلَ", "ذَهَبَ", "كَتَبَ", "شَرِبَ", "كَرُمَ", "حَسِبَ", "قَرَأَ", "أَكَلَ"] {
            assert_eq!(decompose(verb).unwrap().canonical_form(), verb);
        }
    }

    #[test]
    fn keeps_lexical_ayn_vowel() {
        assert_eq!(decompose("كَرُمَ").unwrap().ayn().vowel, Haraka::Damma);
        assert_eq!(decompose("شَرِبَ").unwrap().ayn().vowel, Haraka::Kasra);
    }

    #[test]
    fn fills_in_optional_fa_and_lam_vowels() {
        let root = decompose("فعَل").unwrap();
        assert_eq!(root.canonical_form(), "فَعَلَ");
    }

    #[test]
    fn ignores_whitespace_controls_and_tatweel() {
        let root = decompose("  \u{200F}كَـتَبَ\n").unwrap();
        assert_eq!(root.canonical_form(), "كَتَبَ");
    }

    #[test]
    fn rejects_wrong_letter_count() {
        assert!(reason(decompose("فَعَ")).contains("found 2 letters"));
        assert!(reason(decompose("دَحْرَجَ")).contains("found 4 letters"));
        assert!(reason(decompose("")).contains("found 0 letters"));
        assert!(reason(decompose("hello")).contains("found 0 letters"));
    }

    #[test]
    fn rejects_missing_or_invalid_ayn_vowel() {
        assert!(reason(decompose("فَعلَ")).contains("second root letter"));
        assert!(reason(decompose("فَعْلَ")).contains("second root letter"));
    }

    #[test]
    fn rejects_misplaced_harakat() {
        assert!(reason(decompose("َفَعَلَ")).contains("before the first letter"));
        assert!(reason(decompose("فَعَُلَ")).contains("more than one haraka"));
        assert!(reason(decompose("فْعَلَ")).contains("first root letter"));
        assert!(reason(decompose("فَعَلِ")).contains("ends in fatha"));
    }

    #[test]
    fn rejects_unsupported_marks_and_characters() {
        assert!(reason(decompose("مَدَّ")).contains("shadda"));
        assert!(reason(decompose("فَعَلًا")).contains("U+064B"));
        assert!(reason(decompose("فَعَ٣")).contains("Unexpected character"));
    }
}
