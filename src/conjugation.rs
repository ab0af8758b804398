//! The morphological rules: which prefix, stem vowels and suffix each person
//! gets in the past and present tense of a sound form-I verb.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::arabic::{Haraka, ALEF_HAMZA_ABOVE, FATHA, NOON, SUKUN, TAA, YAA};
use crate::error::ConjugationError;
use crate::root::{decompose, Root};
use crate::table::{build_table, ConjugationTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Past,
    Present,
}

impl FromStr for Tense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "past" => Ok(Tense::Past),
            "present" => Ok(Tense::Present),
            other => Err(format!("unknown tense '{}': expected past or present", other)),
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tense::Past => f.write_str("Past (الماضي)"),
            Tense::Present => f.write_str("Present (المضارع)"),
        }
    }
}

/// Present-tense moods. Jussive is listed so it can be asked for and refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Indicative,
    Subjunctive,
    Jussive,
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indicative" | "i" => Ok(Mood::Indicative),
            "subjunctive" | "s" => Ok(Mood::Subjunctive),
            "jussive" | "j" => Ok(Mood::Jussive),
            other => Err(format!(
                "unknown mood '{}': expected indicative (i) or subjunctive (s)",
                other
            )),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Indicative => f.write_str("Indicative (مرفوع)"),
            Mood::Subjunctive => f.write_str("Subjunctive (منصوب)"),
            Mood::Jussive => f.write_str("Jussive (مجزوم)"),
        }
    }
}

/// The six present-tense stem patterns, numbered 1 to 6 in the usual
/// teaching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bab {
    FathaFatha,
    FathaDamma,
    FathaKasra,
    KasraFatha,
    DammaDamma,
    KasraKasra,
}

impl Bab {
    pub const ALL: [Bab; 6] = [
        Bab::FathaFatha,
        Bab::FathaDamma,
        Bab::FathaKasra,
        Bab::KasraFatha,
        Bab::DammaDamma,
        Bab::KasraKasra,
    ];

    pub fn from_number(n: u8) -> Result<Self, ConjugationError> {
        match n {
            1..=6 => Ok(Self::ALL[usize::from(n) - 1]),
            _ => Err(ConjugationError::InvalidPattern(n)),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Bab::FathaFatha => 1,
            Bab::FathaDamma => 2,
            Bab::FathaKasra => 3,
            Bab::KasraFatha => 4,
            Bab::DammaDamma => 5,
            Bab::KasraKasra => 6,
        }
    }

    /// Vowel on the ayn in the past tense.
    pub fn past_vowel(self) -> Haraka {
        match self {
            Bab::FathaFatha | Bab::FathaDamma | Bab::FathaKasra => Haraka::Fatha,
            Bab::KasraFatha | Bab::KasraKasra => Haraka::Kasra,
            Bab::DammaDamma => Haraka::Damma,
        }
    }

    /// Vowel on the ayn in the present tense.
    pub fn present_vowel(self) -> Haraka {
        match self {
            Bab::FathaFatha | Bab::KasraFatha => Haraka::Fatha,
            Bab::FathaDamma | Bab::DammaDamma => Haraka::Damma,
            Bab::FathaKasra | Bab::KasraKasra => Haraka::Kasra,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Bab::FathaFatha => "Fatha/Fatha",
            Bab::FathaDamma => "Fatha/Damma",
            Bab::FathaKasra => "Fatha/Kasra",
            Bab::KasraFatha => "Kasra/Fatha",
            Bab::DammaDamma => "Damma/Damma",
            Bab::KasraKasra => "Kasra/Kasra",
        }
    }

    pub fn shorthand(self) -> &'static str {
        match self {
            Bab::FathaFatha => "f_f",
            Bab::FathaDamma => "f_d",
            Bab::FathaKasra => "f_k",
            Bab::KasraFatha => "k_f",
            Bab::DammaDamma => "d_d",
            Bab::KasraKasra => "k_k",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bab::FathaFatha => "Fatha/Fatha (فَتَحَ / يَفْتَحُ)",
            Bab::FathaDamma => "Fatha/Damma (نَصَرَ / يَنْصُرُ)",
            Bab::FathaKasra => "Fatha/Kasra (ضَرَبَ / يَضْرِبُ)",
            Bab::KasraFatha => "Kasra/Fatha (سَمِعَ / يَسْمَعُ)",
            Bab::DammaDamma => "Damma/Damma (كَرُمَ / يَكْرُمُ)",
            Bab::KasraKasra => "Kasra/Kasra (حَسِبَ / يَحْسِبُ)",
        }
    }

    /// Accepts either the shorthand (`f_d`) or the pattern number (`2`).
    /// Numbers outside 1..=6 fail with [`ConjugationError::InvalidPattern`];
    /// anything else keeps the raw text in [`ConjugationError::UnknownPattern`].
    pub fn parse(s: &str) -> Result<Self, ConjugationError> {
        let s = s.trim();
        if let Some(bab) = Self::ALL.iter().find(|b| b.shorthand().eq_ignore_ascii_case(s)) {
            return Ok(*bab);
        }
        match s.parse::<u8>() {
            Ok(n) => Self::from_number(n),
            Err(_) => Err(ConjugationError::UnknownPattern(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Person {
    First,
    Second,
    Third,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Number {
    Singular,
    Dual,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Masculine,
    Feminine,
}

/// One cell of a conjugation table. The second-person dual has a single form
/// for both genders, so there are thirteen cells rather than fourteen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pronoun {
    FirstSingular,
    SecondSingularMasc,
    SecondSingularFem,
    ThirdSingularMasc,
    ThirdSingularFem,
    SecondDual,
    ThirdDualMasc,
    ThirdDualFem,
    FirstPlural,
    SecondPluralMasc,
    SecondPluralFem,
    ThirdPluralMasc,
    ThirdPluralFem,
}

impl Pronoun {
    /// Canonical table order: singular, dual, plural; first, second, third
    /// person; masculine before feminine.
    pub const ALL: [Pronoun; 13] = [
        Pronoun::FirstSingular,
        Pronoun::SecondSingularMasc,
        Pronoun::SecondSingularFem,
        Pronoun::ThirdSingularMasc,
        Pronoun::ThirdSingularFem,
        Pronoun::SecondDual,
        Pronoun::ThirdDualMasc,
        Pronoun::ThirdDualFem,
        Pronoun::FirstPlural,
        Pronoun::SecondPluralMasc,
        Pronoun::SecondPluralFem,
        Pronoun::ThirdPluralMasc,
        Pronoun::ThirdPluralFem,
    ];

    pub fn person(self) -> Person {
        match self {
            Pronoun::FirstSingular | Pronoun::FirstPlural => Person::First,
            Pronoun::SecondSingularMasc
            | Pronoun::SecondSingularFem
            | Pronoun::SecondDual
            | Pronoun::SecondPluralMasc
            | Pronoun::SecondPluralFem => Person::Second,
            Pronoun::ThirdSingularMasc
            | Pronoun::ThirdSingularFem
            | Pronoun::ThirdDualMasc
            | Pronoun::ThirdDualFem
            | Pronoun::ThirdPluralMasc
            | Pronoun::ThirdPluralFem => Person::Third,
        }
    }

    pub fn number(self) -> Number {
        match self {
            Pronoun::FirstSingular
            | Pronoun::SecondSingularMasc
            | Pronoun::SecondSingularFem
            | Pronoun::ThirdSingularMasc
            | Pronoun::ThirdSingularFem => Number::Singular,
            Pronoun::SecondDual | Pronoun::ThirdDualMasc | Pronoun::ThirdDualFem => Number::Dual,
            Pronoun::FirstPlural
            | Pronoun::SecondPluralMasc
            | Pronoun::SecondPluralFem
            | Pronoun::ThirdPluralMasc
            | Pronoun::ThirdPluralFem => Number::Plural,
        }
    }

    /// `None` for the cells that do not mark gender (first person and the
    /// second-person dual).
    pub fn gender(self) -> Option<Gender> {
        match self {
            Pronoun::FirstSingular | Pronoun::FirstPlural | Pronoun::SecondDual => None,
            Pronoun::SecondSingularMasc
            | Pronoun::ThirdSingularMasc
            | Pronoun::ThirdDualMasc
            | Pronoun::SecondPluralMasc
            | Pronoun::ThirdPluralMasc => Some(Gender::Masculine),
            Pronoun::SecondSingularFem
            | Pronoun::ThirdSingularFem
            | Pronoun::ThirdDualFem
            | Pronoun::SecondPluralFem
            | Pronoun::ThirdPluralFem => Some(Gender::Feminine),
        }
    }
}

/// What to conjugate. Mood and pattern only matter for the present tense and
/// are ignored for the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConjugationRequest {
    pub tense: Tense,
    pub mood: Option<Mood>,
    pub pattern: Option<u8>,
}

impl ConjugationRequest {
    pub fn past() -> Self {
        Self { tense: Tense::Past, mood: None, pattern: None }
    }

    pub fn present(mood: Mood, pattern: u8) -> Self {
        Self { tense: Tense::Present, mood: Some(mood), pattern: Some(pattern) }
    }
}

// Appended to the lam, whose own vowel is part of the suffix.
fn past_suffix(pronoun: Pronoun) -> &'static str {
    match pronoun {
        Pronoun::FirstSingular => "\u{0652}\u{062A}\u{064F}",
        Pronoun::SecondSingularMasc => "\u{0652}\u{062A}\u{064E}",
        Pronoun::SecondSingularFem => "\u{0652}\u{062A}\u{0650}",
        Pronoun::ThirdSingularMasc => "\u{064E}",
        Pronoun::ThirdSingularFem => "\u{064E}\u{062A}\u{0652}",
        Pronoun::SecondDual => "\u{0652}\u{062A}\u{064F}\u{0645}\u{064E}\u{0627}",
        Pronoun::ThirdDualMasc => "\u{064E}\u{0627}",
        Pronoun::ThirdDualFem => "\u{064E}\u{062A}\u{064E}\u{0627}",
        Pronoun::FirstPlural => "\u{0652}\u{0646}\u{064E}\u{0627}",
        Pronoun::SecondPluralMasc => "\u{0652}\u{062A}\u{064F}\u{0645}\u{0652}",
        Pronoun::SecondPluralFem => "\u{0652}\u{062A}\u{064F}\u{0646}\u{0651}\u{064E}",
        Pronoun::ThirdPluralMasc => "\u{064F}\u{0648}\u{0652}\u{0627}",
        Pronoun::ThirdPluralFem => "\u{0652}\u{0646}\u{064E}",
    }
}

fn present_prefix(pronoun: Pronoun) -> char {
    match pronoun {
        Pronoun::FirstSingular => ALEF_HAMZA_ABOVE,
        Pronoun::FirstPlural => NOON,
        Pronoun::ThirdSingularMasc
        | Pronoun::ThirdDualMasc
        | Pronoun::ThirdPluralMasc
        | Pronoun::ThirdPluralFem => YAA,
        Pronoun::SecondSingularMasc
        | Pronoun::SecondSingularFem
        | Pronoun::ThirdSingularFem
        | Pronoun::SecondDual
        | Pronoun::ThirdDualFem
        | Pronoun::SecondPluralMasc
        | Pronoun::SecondPluralFem => TAA,
    }
}

fn present_suffix(mood: Mood, pronoun: Pronoun) -> Result<&'static str, ConjugationError> {
    let suffix = match (mood, pronoun.number(), pronoun) {
        (Mood::Jussive, _, _) => return Err(ConjugationError::UnsupportedMood(mood)),

        (Mood::Indicative, Number::Dual, _) => "\u{064E}\u{0627}\u{0646}\u{0650}",
        (Mood::Indicative, _, Pronoun::SecondSingularFem) => "\u{0650}\u{064A}\u{0652}\u{0646}\u{064E}",
        (Mood::Indicative, _, Pronoun::SecondPluralMasc | Pronoun::ThirdPluralMasc) => {
            "\u{064F}\u{0648}\u{0652}\u{0646}\u{064E}"
        }
        (Mood::Indicative, _, Pronoun::SecondPluralFem | Pronoun::ThirdPluralFem) => "\u{0652}\u{0646}\u{064E}",
        (Mood::Indicative, _, _) => "\u{064F}",

        (Mood::Subjunctive, Number::Dual, _) => "\u{064E}\u{0627}",
        (Mood::Subjunctive, _, Pronoun::SecondSingularFem) => "\u{0650}\u{064A}\u{0652}",
        (Mood::Subjunctive, _, Pronoun::SecondPluralMasc | Pronoun::ThirdPluralMasc) => {
            "\u{064F}\u{0648}\u{0652}\u{0627}"
        }
        (Mood::Subjunctive, _, Pronoun::SecondPluralFem | Pronoun::ThirdPluralFem) => "\u{0652}\u{0646}\u{064E}",
        (Mood::Subjunctive, _, _) => "\u{064E}",
    };
    Ok(suffix)
}

/// Past tense: the root keeps its own vowels in every person; only the
/// suffix on the lam changes.
pub fn conjugate_past(root: &Root) -> Vec<String> {
    let (fa, ayn, lam) = (root.fa(), root.ayn(), root.lam());
    Pronoun::ALL
        .iter()
        .map(|&pronoun| {
            let mut form = String::with_capacity(24);
            form.push(fa.letter);
            form.push(fa.vowel.as_char());
            form.push(ayn.letter);
            form.push(ayn.vowel.as_char());
            form.push(lam.letter);
            form.push_str(past_suffix(pronoun));
            form
        })
        .collect()
}

/// Present tense: prefix with fatha, a sukun on the fa, the bab's vowel on the
/// ayn, then the mood suffix. An empty suffix leaves the bare stem.
pub fn conjugate_present(root: &Root, bab: Bab, mood: Mood) -> Result<Vec<String>, ConjugationError> {
    let (fa, ayn, lam) = (root.fa(), root.ayn(), root.lam());
    let ayn_vowel = bab.present_vowel();

    Pronoun::ALL
        .iter()
        .map(|&pronoun| {
            let suffix = present_suffix(mood, pronoun)?;
            let mut form = String::with_capacity(24);
            form.push(present_prefix(pronoun));
            form.push(FATHA);
            form.push(fa.letter);
            form.push(SUKUN);
            form.push(ayn.letter);
            form.push(ayn_vowel.as_char());
            form.push(lam.letter);
            if !suffix.is_empty() {
                form.push_str(suffix);
            }
            Ok(form)
        })
        .collect()
}

/// Runs the rules for an already decomposed root. Returns the forms in
/// [`Pronoun::ALL`] order plus the table title.
pub fn conjugate_root(
    root: &Root,
    request: &ConjugationRequest,
) -> Result<(String, Vec<String>), ConjugationError> {
    match request.tense {
        Tense::Past => {
            let title = format!("الماضي ({})", root.canonical_form());
            Ok((title, conjugate_past(root)))
        }
        Tense::Present => {
            let mood = request.mood.ok_or(ConjugationError::MissingOption("mood"))?;
            if mood == Mood::Jussive {
                return Err(ConjugationError::UnsupportedMood(mood));
            }
            let pattern = request.pattern.ok_or(ConjugationError::MissingOption("pattern (bab)"))?;
            let bab = Bab::from_number(pattern)?;
            if bab.past_vowel() != root.ayn().vowel {
                warn!(
                    verb = %root,
                    bab = bab.label(),
                    "the verb's past vowel does not match the chosen bab"
                );
            }
            let forms = conjugate_present(root, bab, mood)?;
            let title = format!("المضارع - {} ({})", mood, bab.label());
            Ok((title, forms))
        }
    }
}

/// Decomposes `verb` and builds its conjugation table. No partial table is
/// ever returned.
pub fn conjugate(verb: &str, request: &ConjugationRequest) -> Result<ConjugationTable, ConjugationError> {
    let root = decompose(verb)?;
    let (title, forms) = conjugate_root(&root, request)?;
    debug!(verb = %root, tense = ?request.tense, "conjugated");
    build_table(title, request.tense, forms)
}

/// [`conjugate`], with any panic turned into [`ConjugationError::Internal`] so
/// a bug in the rules is reported instead of taking the caller down.
pub fn conjugate_guarded(verb: &str, request: &ConjugationRequest) -> Result<ConjugationTable, ConjugationError> {
    match std::panic::catch_unwind(|| conjugate(verb, request)) {
        Ok(result) => result,
        Err(_) => {
            error!(verb, "conjugation panicked");
            Err(ConjugationError::Internal("unexpected failure while conjugating".to_string()))
        }
    }
}
