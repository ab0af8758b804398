use thiserror::Error;

use crate::conjugation::Mood;

/// Everything that can stop a conjugation table from being produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConjugationError {
    /// The input is not a voweled triliteral past-tense verb
    #[error("Input Error: {0}")]
    InvalidRoot(String),

    /// The mood exists grammatically but has no rules yet
    #[error("The {0} mood is not supported yet")]
    UnsupportedMood(Mood),

    /// Pattern (bab) number outside 1..=6
    #[error("Unknown pattern (bab) {0}: expected a number from 1 to 6")]
    InvalidPattern(u8),

    /// A pattern given as text that is neither a shorthand nor a small number
    #[error("Unknown pattern (bab) '{0}': expected f_f, f_d, f_k, k_f, d_d, k_k or a number from 1 to 6")]
    UnknownPattern(String),

    /// Present tense was requested without the named option
    #[error("Present tense needs a {0}")]
    MissingOption(&'static str),

    /// A table could not be assembled; this is a bug, not bad input
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}. Please ensure it exists.")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value in {path}: {message}")]
    Invalid { path: String, message: String },
}
