pub mod arabic;
pub mod cli;
pub mod config;
pub mod conjugation;
pub mod display;
pub mod env;
pub mod error;
pub mod example_verbs;
pub mod gui;
pub mod render;
pub mod root;
pub mod shaping;
pub mod table;

pub use config::Config;
pub use conjugation::{conjugate, Bab, ConjugationRequest, Mood, Pronoun, Tense};
pub use display::{FormatMode, Formatter, ModeDefaults, RenderTarget, ShapingCapability, VisualTable};
pub use env::{detect_default_mode, detect_defaults, HostEnvironment};
pub use error::{ConfigError, ConjugationError};
pub use root::{decompose, Root};
pub use table::{ConjugationTable, InflectedForm};
