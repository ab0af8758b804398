use serde::Serialize;

use crate::conjugation::{Pronoun, Tense};
use crate::error::ConjugationError;

impl Pronoun {
    /// The independent pronoun, as printed next to the form.
    pub fn arabic(self) -> &'static str {
        match self {
            Pronoun::FirstSingular => "أنا",
            Pronoun::SecondSingularMasc => "أنتَ",
            Pronoun::SecondSingularFem => "أنتِ",
            Pronoun::ThirdSingularMasc => "هو",
            Pronoun::ThirdSingularFem => "هي",
            Pronoun::SecondDual => "أنتما",
            Pronoun::ThirdDualMasc => "هما (M)",
            Pronoun::ThirdDualFem => "هما (F)",
            Pronoun::FirstPlural => "نحن",
            Pronoun::SecondPluralMasc => "أنتم",
            Pronoun::SecondPluralFem => "أنتن",
            Pronoun::ThirdPluralMasc => "هم",
            Pronoun::ThirdPluralFem => "هن",
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            Pronoun::FirstSingular => "I",
            Pronoun::SecondSingularMasc => "You (M. Sing.)",
            Pronoun::SecondSingularFem => "You (F. Sing.)",
            Pronoun::ThirdSingularMasc => "He (M. Sing.)",
            Pronoun::ThirdSingularFem => "She (F. Sing.)",
            Pronoun::SecondDual => "You (M/F. Dual)",
            Pronoun::ThirdDualMasc => "They (M. Dual)",
            Pronoun::ThirdDualFem => "They (F. Dual)",
            Pronoun::FirstPlural => "We",
            Pronoun::SecondPluralMasc => "You (M. Pl.)",
            Pronoun::SecondPluralFem => "You (F. Pl.)",
            Pronoun::ThirdPluralMasc => "They (M. Pl.)",
            Pronoun::ThirdPluralFem => "They (F. Pl.)",
        }
    }

    /// Short grammatical tag, e.g. `3rd-sg-masc`.
    pub fn tag(self) -> &'static str {
        match self {
            Pronoun::FirstSingular => "1st-sg",
            Pronoun::SecondSingularMasc => "2nd-sg-masc",
            Pronoun::SecondSingularFem => "2nd-sg-fem",
            Pronoun::ThirdSingularMasc => "3rd-sg-masc",
            Pronoun::ThirdSingularFem => "3rd-sg-fem",
            Pronoun::SecondDual => "2nd-du",
            Pronoun::ThirdDualMasc => "3rd-du-masc",
            Pronoun::ThirdDualFem => "3rd-du-fem",
            Pronoun::FirstPlural => "1st-pl",
            Pronoun::SecondPluralMasc => "2nd-pl-masc",
            Pronoun::SecondPluralFem => "2nd-pl-fem",
            Pronoun::ThirdPluralMasc => "3rd-pl-masc",
            Pronoun::ThirdPluralFem => "3rd-pl-fem",
        }
    }
}

/// One labelled cell. Only the logical (reading-order) text is stored; what
/// gets drawn is derived by the display formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InflectedForm {
    pronoun: Pronoun,
    logical_text: String,
}

impl InflectedForm {
    pub fn pronoun(&self) -> Pronoun {
        self.pronoun
    }

    pub fn logical_text(&self) -> &str {
        &self.logical_text
    }

    pub fn label(&self) -> &'static str {
        self.pronoun.english()
    }
}

/// The thirteen forms of one conjugation, in [`Pronoun::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConjugationTable {
    title: String,
    tense: Tense,
    forms: Vec<InflectedForm>,
}

impl ConjugationTable {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tense(&self) -> Tense {
        self.tense
    }

    pub fn forms(&self) -> &[InflectedForm] {
        &self.forms
    }

    pub fn get(&self, pronoun: Pronoun) -> Option<&InflectedForm> {
        self.forms.iter().find(|f| f.pronoun == pronoun)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Pairs each form with its pronoun. The engine hands over forms in canonical
/// order, so anything but exactly one form per pronoun is a bug upstream.
pub fn build_table(title: String, tense: Tense, forms: Vec<String>) -> Result<ConjugationTable, ConjugationError> {
    if forms.len() != Pronoun::ALL.len() {
        return Err(ConjugationError::Internal(format!(
            "expected {} forms, the rules produced {}",
            Pronoun::ALL.len(),
            forms.len()
        )));
    }
    let forms = Pronoun::ALL
        .iter()
        .zip(forms)
        .map(|(&pronoun, logical_text)| InflectedForm { pronoun, logical_text })
        .collect();
    Ok(ConjugationTable { title, tense, forms })
}
