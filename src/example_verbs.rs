use serde::Deserialize;

use crate::conjugation::Bab;
use crate::error::ConjugationError;

const BUNDLED: &str = include_str!("../data/example_verbs.toml");

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExampleVerb {
    /// Logical text, the only form ever fed back into the parser.
    pub text: String,
    pub bab: u8,
}

impl ExampleVerb {
    pub fn bab(&self) -> Result<Bab, ConjugationError> {
        Bab::from_number(self.bab)
    }
}

#[derive(Deserialize, Debug)]
struct ExampleFile {
    verb: Vec<ExampleVerb>,
}

/// The verbs shipped with the binary, in file order.
pub fn bundled_examples() -> Result<Vec<ExampleVerb>, ConjugationError> {
    parse_examples(BUNDLED)
}

pub fn parse_examples(contents: &str) -> Result<Vec<ExampleVerb>, ConjugationError> {
    let file: ExampleFile = toml::from_str(contents)
        .map_err(|e| ConjugationError::Internal(format!("bundled example list is malformed: {}", e)))?;
    Ok(file.verb)
}
