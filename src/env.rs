//! Picks a default [`FormatMode`] from the host environment.
//!
//! Reading the environment happens once, in [`HostEnvironment::capture`]. The
//! decision itself is a pure function of the captured snapshot so it can be
//! tested without touching process state.

use std::env;
use std::io::IsTerminal;

use tracing::debug;

use crate::display::{FormatMode, ModeDefaults, RenderTarget};

/// VTE 0.58 was the first release to shape and reorder Arabic itself.
const VTE_BIDI_VERSION: u32 = 5800;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnvironment {
    pub os: String,
    pub stdout_is_terminal: bool,
    pub term: Option<String>,
    pub term_program: Option<String>,
    pub vte_version: Option<u32>,
    pub konsole: bool,
}

impl HostEnvironment {
    pub fn capture() -> Self {
        let snapshot = Self {
            os: env::consts::OS.to_string(),
            stdout_is_terminal: std::io::stdout().is_terminal(),
            term: env::var("TERM").ok(),
            term_program: env::var("TERM_PROGRAM").ok(),
            vte_version: env::var("VTE_VERSION").ok().and_then(|v| v.trim().parse().ok()),
            konsole: env::var("KONSOLE_VERSION").is_ok(),
        };
        debug!(?snapshot, "captured host environment");
        snapshot
    }

    /// Terminals known to run the bidi algorithm and join Arabic letters on
    /// their own. Feeding them pre-reversed text would flip it back.
    pub fn terminal_handles_bidi(&self) -> bool {
        if self.konsole {
            return true;
        }
        if self.vte_version.is_some_and(|v| v >= VTE_BIDI_VERSION) {
            return true;
        }
        if self.term_program.as_deref() == Some("Apple_Terminal") {
            return true;
        }
        self.term.as_deref().is_some_and(|t| t.starts_with("mlterm"))
    }
}

pub fn detect_default_mode(host: &HostEnvironment, target: RenderTarget) -> FormatMode {
    match target {
        // The GUI toolkit lays glyphs out left to right with no joining.
        RenderTarget::GuiPane => FormatMode::ReshapedAndReordered,
        RenderTarget::TerminalStream => {
            // Piped output stays logical so it can be fed back in.
            if !host.stdout_is_terminal {
                return FormatMode::LogicalOnly;
            }
            if host.term.as_deref() == Some("dumb") || host.terminal_handles_bidi() {
                return FormatMode::LogicalOnly;
            }
            FormatMode::ReshapedAndReordered
        }
    }
}

pub fn detect_defaults(host: &HostEnvironment) -> ModeDefaults {
    ModeDefaults {
        gui: detect_default_mode(host, RenderTarget::GuiPane),
        terminal: detect_default_mode(host, RenderTarget::TerminalStream),
    }
}
