//! Letters and short-vowel marks the engine reads and emits.

use serde::{Deserialize, Serialize};

pub const FATHA: char = '\u{064E}';
pub const DAMMA: char = '\u{064F}';
pub const KASRA: char = '\u{0650}';
pub const SHADDA: char = '\u{0651}';
pub const SUKUN: char = '\u{0652}';

pub const ALEF: char = '\u{0627}';
pub const ALEF_HAMZA_ABOVE: char = '\u{0623}';
pub const ALEF_HAMZA_BELOW: char = '\u{0625}';
pub const ALEF_MADDA: char = '\u{0622}';
pub const LAM: char = '\u{0644}';
pub const TAA: char = '\u{062A}';
pub const NOON: char = '\u{0646}';
pub const YAA: char = '\u{064A}';
pub const TATWEEL: char = '\u{0640}';

/// A short vowel (or its absence) written over or under a consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Haraka {
    Fatha,
    Damma,
    Kasra,
    Sukun,
}

impl Haraka {
    pub fn as_char(self) -> char {
        match self {
            Haraka::Fatha => FATHA,
            Haraka::Damma => DAMMA,
            Haraka::Kasra => KASRA,
            Haraka::Sukun => SUKUN,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            FATHA => Some(Haraka::Fatha),
            DAMMA => Some(Haraka::Damma),
            KASRA => Some(Haraka::Kasra),
            SUKUN => Some(Haraka::Sukun),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Haraka::Fatha => "Fatha",
            Haraka::Damma => "Damma",
            Haraka::Kasra => "Kasra",
            Haraka::Sukun => "Sukun",
        }
    }
}

/// Base letters from hamza to yaa, skipping the unassigned gap and tatweel.
pub fn is_letter(c: char) -> bool {
    matches!(c, '\u{0621}'..='\u{063A}' | '\u{0641}'..='\u{064A}')
}

/// Any combining mark in the Arabic block: harakat, tanween, shadda,
/// superscript alef and the extended marks.
pub fn is_mark(c: char) -> bool {
    matches!(c, '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}')
}
