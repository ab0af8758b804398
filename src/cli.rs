//! Headless command line surface.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::config::Config;
use crate::conjugation::{conjugate_guarded, Bab, ConjugationRequest, Mood, Tense};
use crate::display::{FormatMode, Formatter, RenderTarget};
use crate::error::ConjugationError;
use crate::example_verbs::bundled_examples;
use crate::render::{render_json, render_terminal};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "arabic_conjugator",
    about = "Conjugate triliteral Arabic verbs given in the past tense with harakat",
    long_about = "Conjugate triliteral Arabic verbs given in the past tense with harakat.\n\
                  Without --verb or --list-examples a window opens instead."
)]
pub struct Cli {
    /// Past tense verb in the 3rd person masculine singular, fully voweled (e.g. ذَهَبَ)
    #[arg(long)]
    pub verb: Option<String>,

    /// past or present
    #[arg(long)]
    pub tense: Option<Tense>,

    /// Present tense pattern: f_f, f_d, f_k, k_f, d_d, k_k or 1 to 6
    #[arg(long)]
    pub bab: Option<String>,

    /// indicative (i) or subjunctive (s)
    #[arg(long)]
    pub mood: Option<Mood>,

    /// Always reshape and reorder Arabic for the terminal
    #[arg(long, conflicts_with = "no_reverse_terminal")]
    pub force_reverse_terminal: bool,

    /// Print Arabic in logical order, for terminals that shape it themselves
    #[arg(long)]
    pub no_reverse_terminal: bool,

    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,

    /// List the bundled example verbs and exit
    #[arg(long)]
    pub list_examples: bool,

    /// Configuration file (defaults to ./conjugator.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        self.verb.is_some() || self.list_examples
    }

    pub fn terminal_override(&self) -> Option<FormatMode> {
        if self.force_reverse_terminal {
            Some(FormatMode::ReshapedAndReordered)
        } else if self.no_reverse_terminal {
            Some(FormatMode::LogicalOnly)
        } else {
            None
        }
    }

    /// Flags first, then the config file.
    pub fn build_request(&self, config: &Config) -> Result<ConjugationRequest, ConjugationError> {
        match self.tense.unwrap_or(config.default_tense) {
            Tense::Past => Ok(ConjugationRequest::past()),
            Tense::Present => {
                let pattern = match &self.bab {
                    Some(bab) => Bab::parse(bab)?.number(),
                    None => config.default_bab,
                };
                let mood = self.mood.unwrap_or(config.default_mood);
                Ok(ConjugationRequest::present(mood, pattern))
            }
        }
    }
}

fn write_examples(formatter: &Formatter, mode: Option<FormatMode>, out: &mut impl Write) -> anyhow::Result<()> {
    let examples = bundled_examples()?;
    let labels = formatter.format_labels(
        examples.iter().map(|e| e.text.as_str()),
        RenderTarget::TerminalStream,
        mode,
    );
    for (example, label) in examples.iter().zip(labels) {
        let bab = example.bab()?;
        writeln!(out, "{}  {} ({}, {})", label, bab.number(), bab.shorthand(), bab.name())?;
    }
    Ok(())
}

/// Runs one headless invocation, writing only the result to `out`.
pub fn run_headless(cli: &Cli, config: &Config, formatter: &Formatter, out: &mut impl Write) -> anyhow::Result<()> {
    let mode = cli.terminal_override().or(config.format.as_override());

    if cli.list_examples {
        return write_examples(formatter, mode, out);
    }

    let verb = cli.verb.as_deref().context("no verb given")?;
    let request = cli.build_request(config)?;
    info!(verb, ?request, "conjugating");
    let table = conjugate_guarded(verb, &request)?;

    if cli.json {
        // JSON is for programs, so the visual text stays logical unless asked otherwise.
        let visual = formatter.format_table(&table, RenderTarget::TerminalStream, mode.or(Some(FormatMode::LogicalOnly)));
        let json = render_json(&table, &visual).context("could not serialize the table")?;
        writeln!(out, "{}", json)?;
    } else {
        let visual = formatter.format_table(&table, RenderTarget::TerminalStream, mode);
        write!(out, "{}", render_terminal(&visual))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatSetting;
    use crate::display::{ModeDefaults, ShapingCapability};
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("arabic_conjugator").chain(args.iter().copied())).unwrap()
    }

    fn logical_formatter() -> Formatter {
        Formatter::new(ShapingCapability::Unavailable, ModeDefaults::uniform(FormatMode::LogicalOnly))
    }

    fn run(args: &[&str]) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run_headless(&parse(args), &Config::default(), &logical_formatter(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn no_arguments_means_gui() {
        assert!(!parse(&[]).is_headless());
        assert!(parse(&["--verb", "فَعَلَ"]).is_headless());
        assert!(parse(&["--list-examples"]).is_headless());
    }

    #[test]
    fn reverse_flags_conflict() {
        let err = Cli::try_parse_from(["arabic_conjugator", "--force-reverse-terminal", "--no-reverse-terminal"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        assert_eq!(parse(&["--no-reverse-terminal"]).terminal_override(), Some(FormatMode::LogicalOnly));
        assert_eq!(parse(&["--force-reverse-terminal"]).terminal_override(), Some(FormatMode::ReshapedAndReordered));
        assert_eq!(parse(&[]).terminal_override(), None);
    }

    #[test]
    fn unknown_tense_is_a_usage_error() {
        assert!(Cli::try_parse_from(["arabic_conjugator", "--tense", "future"]).is_err());
    }

    #[test]
    fn request_falls_back_to_config() {
        let config = Config { default_tense: Tense::Present, default_bab: 3, ..Config::default() };
        assert_eq!(
            parse(&["--verb", "جَلَسَ"]).build_request(&config).unwrap(),
            ConjugationRequest::present(Mood::Indicative, 3)
        );
        assert_eq!(
            parse(&["--tense", "present", "--bab", "d_d", "--mood", "s"]).build_request(&config).unwrap(),
            ConjugationRequest::present(Mood::Subjunctive, 5)
        );
        assert_eq!(parse(&["--tense", "past", "--bab", "2"]).build_request(&config).unwrap(), ConjugationRequest::past());
    }

    #[test]
    fn bad_bab_is_an_engine_error() {
        let err = parse(&["--tense", "present", "--bab", "9"]).build_request(&Config::default()).unwrap_err();
        assert_eq!(err, ConjugationError::InvalidPattern(9));
        let err = parse(&["--tense", "present", "--bab", "fd"]).build_request(&Config::default()).unwrap_err();
        assert_eq!(err, ConjugationError::UnknownPattern("fd".to_string()));
    }

    #[test]
    fn prints_the_grid() {
        let text = run(&["--verb", "فَعَلَ"]).unwrap();
        assert!(text.starts_with("الماضي (فَعَلَ)\n"));
        assert!(text.contains("فَعَلْتُ"));
        assert!(text.contains("Plural | Dual"));
    }

    #[test]
    fn prints_json() {
        let text = run(&["--verb", "كَتَبَ", "--tense", "present", "--bab", "f_d", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tense"], "present");
        assert_eq!(value["forms"][3]["logical"], "يَكْتُبُ");
        assert_eq!(value["forms"][3]["visual"], "يَكْتُبُ");
    }

    #[test]
    fn jussive_and_bad_verbs_fail() {
        let err = run(&["--verb", "فَعَلَ", "--tense", "present", "--bab", "1", "--mood", "jussive"]).unwrap_err();
        assert_eq!(err.downcast_ref::<ConjugationError>(), Some(&ConjugationError::UnsupportedMood(Mood::Jussive)));

        let err = run(&["--verb", "فعل"]).unwrap_err();
        assert!(matches!(err.downcast_ref::<ConjugationError>(), Some(ConjugationError::InvalidRoot(_))));
    }

    #[test]
    fn lists_examples_in_logical_order() {
        let text = run(&["--list-examples"]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "فَعَلَ  1 (f_f, Fatha/Fatha)");
    }

    #[test]
    fn config_format_applies_when_no_flag() {
        let config = Config { format: FormatSetting::Logical, ..Config::default() };
        let formatter = Formatter::new(ShapingCapability::detect(), ModeDefaults::uniform(FormatMode::ReshapedAndReordered));
        let mut out = Vec::new();
        run_headless(&parse(&["--verb", "فَعَلَ"]), &config, &formatter, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("فَعَلْتُ"));
    }
}
