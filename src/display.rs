//! Turns logical (reading-order) text into what a given surface should be
//! handed so that it ends up looking right.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::conjugation::Pronoun;
#[cfg(feature = "shaping")]
use crate::shaping::{reshape, shift_harakat};
use crate::table::ConjugationTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatMode {
    /// Hand the text over untouched; the surface shapes and orders it.
    LogicalOnly,
    /// Substitute presentation forms and reverse right-to-left runs.
    ReshapedAndReordered,
}

impl FormatMode {
    /// An explicit override always beats the detected default.
    pub fn resolve(override_mode: Option<FormatMode>, detected: FormatMode) -> FormatMode {
        override_mode.unwrap_or(detected)
    }

    pub fn toggled(self) -> FormatMode {
        match self {
            FormatMode::LogicalOnly => FormatMode::ReshapedAndReordered,
            FormatMode::ReshapedAndReordered => FormatMode::LogicalOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTarget {
    GuiPane,
    TerminalStream,
}

/// Whether this build can reshape and reorder at all. Chosen once at start-up
/// and handed to the [`Formatter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapingCapability {
    #[cfg(feature = "shaping")]
    Available,
    Unavailable,
}

impl ShapingCapability {
    #[cfg(feature = "shaping")]
    pub fn detect() -> Self {
        ShapingCapability::Available
    }

    #[cfg(not(feature = "shaping"))]
    pub fn detect() -> Self {
        ShapingCapability::Unavailable
    }
}

/// Default mode per surface, as worked out by the environment detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDefaults {
    pub gui: FormatMode,
    pub terminal: FormatMode,
}

impl ModeDefaults {
    pub fn uniform(mode: FormatMode) -> Self {
        Self { gui: mode, terminal: mode }
    }

    pub fn for_target(&self, target: RenderTarget) -> FormatMode {
        match target {
            RenderTarget::GuiPane => self.gui,
            RenderTarget::TerminalStream => self.terminal,
        }
    }
}

/// One cell as a surface should receive it, next to the reading-order text it
/// was derived from. Only `logical_text` is ever fed back into the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualForm {
    pub pronoun: Pronoun,
    pub logical_text: String,
    pub visual_text: String,
}

/// The display strings for one table on one surface. Thrown away and rebuilt
/// whenever the mode or target changes; the table itself is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualTable {
    pub title: String,
    pub forms: Vec<VisualForm>,
    pub target: RenderTarget,
    pub mode: FormatMode,
    /// Reshaping was asked for but this build can't do it, so the logical
    /// text was passed through.
    pub degraded: bool,
}

impl VisualTable {
    pub fn get(&self, pronoun: Pronoun) -> Option<&str> {
        self.forms
            .iter()
            .find(|f| f.pronoun == pronoun)
            .map(|f| f.visual_text.as_str())
    }
}

/// Visual order for a single line. Characters in right-to-left runs are
/// reversed and replaced by their mirrored glyph, so `(` stays an opening
/// bracket on screen.
#[cfg(feature = "shaping")]
fn reorder(text: &str) -> String {
    use unicode_bidi::BidiInfo;
    use unicode_bidi_mirroring::get_mirrored;

    let info = BidiInfo::new(text, None);
    let mut out = String::with_capacity(text.len());
    for para in &info.paragraphs {
        let (levels, runs) = info.visual_runs(para, para.range.clone());
        for run in runs {
            let slice = &text[run.clone()];
            if levels[run.start].is_rtl() {
                out.extend(slice.chars().rev().map(|c| get_mirrored(c).unwrap_or(c)));
            } else {
                out.push_str(slice);
            }
        }
    }
    out
}

#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    capability: ShapingCapability,
    defaults: ModeDefaults,
}

impl Formatter {
    pub fn new(capability: ShapingCapability, defaults: ModeDefaults) -> Self {
        Self { capability, defaults }
    }

    pub fn capability(&self) -> ShapingCapability {
        self.capability
    }

    pub fn defaults(&self) -> ModeDefaults {
        self.defaults
    }

    pub fn resolve_mode(&self, target: RenderTarget, override_mode: Option<FormatMode>) -> FormatMode {
        FormatMode::resolve(override_mode, self.defaults.for_target(target))
    }

    /// Returns the visual string and whether the transform had to be skipped.
    pub fn format_text(&self, logical: &str, mode: FormatMode) -> (String, bool) {
        match (mode, self.capability) {
            (FormatMode::LogicalOnly, _) => (logical.to_string(), false),
            #[cfg(feature = "shaping")]
            (FormatMode::ReshapedAndReordered, ShapingCapability::Available) => {
                (reorder(&shift_harakat(&reshape(logical))), false)
            }
            (FormatMode::ReshapedAndReordered, ShapingCapability::Unavailable) => (logical.to_string(), true),
        }
    }

    pub fn format_table(
        &self,
        table: &ConjugationTable,
        target: RenderTarget,
        override_mode: Option<FormatMode>,
    ) -> VisualTable {
        let mode = self.resolve_mode(target, override_mode);
        let (title, mut degraded) = self.format_text(table.title(), mode);

        let forms = table
            .forms()
            .iter()
            .map(|form| {
                let (visual_text, cell_degraded) = self.format_text(form.logical_text(), mode);
                degraded |= cell_degraded;
                VisualForm { pronoun: form.pronoun(), logical_text: form.logical_text().to_string(), visual_text }
            })
            .collect();

        if degraded {
            warn!("Arabic reshaping is not available in this build; showing logical text, diacritics may be misplaced");
        }
        debug!(?target, ?mode, degraded, "formatted table");
        VisualTable { title, forms, target, mode, degraded }
    }

    /// Formats free-standing labels (example verbs, pronouns) for `target`.
    pub fn format_labels<'a>(
        &self,
        labels: impl IntoIterator<Item = &'a str>,
        target: RenderTarget,
        override_mode: Option<FormatMode>,
    ) -> Vec<String> {
        let mode = self.resolve_mode(target, override_mode);
        labels.into_iter().map(|l| self.format_text(l, mode).0).collect()
    }
}
