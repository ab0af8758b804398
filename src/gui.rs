//! The desktop window. Everything it shows comes from the engine and the
//! formatter; the widgets only collect input and lay out cells.

use std::fs;
use std::path::{Path, PathBuf};

use eframe::{App, NativeOptions};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::conjugation::{conjugate_guarded, Bab, ConjugationRequest, Mood, Tense};
use crate::display::{FormatMode, Formatter, RenderTarget, VisualTable};
use crate::example_verbs::{bundled_examples, ExampleVerb};
use crate::render::grid_rows;
use crate::table::ConjugationTable;

const ARABIC_FONT: &str = "arabic";
const GRID_HEADER: [&str; 4] = ["Plural", "Dual", "Singular", ""];

/// Fonts with Arabic presentation forms that commonly ship with the OS, tried
/// in order when no `font_path` is configured.
const SYSTEM_ARABIC_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoNaskhArabic-Regular.ttf",
    "/usr/share/fonts/noto/NotoNaskhArabic-Regular.ttf",
    "/usr/share/fonts/google-noto/NotoNaskhArabic-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\tahoma.ttf",
];

pub struct ConjugatorApp {
    formatter: Formatter,
    examples: Vec<ExampleVerb>,
    example_labels: Vec<String>,
    bab_labels: Vec<String>,
    selected_example: Option<usize>,

    verb_input: String,
    tense: Tense,
    bab: Bab,
    mood: Mood,

    font_size: f32,
    double_spacing: bool,
    override_mode: Option<FormatMode>,

    last_table: Option<ConjugationTable>,
    last_visual: Option<VisualTable>,
    error: Option<String>,
    font_notice: Option<String>,
}

impl ConjugatorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, formatter: Formatter) -> Self {
        let font_notice = load_arabic_font(&cc.egui_ctx, config.font_path.as_deref());
        let mut app = Self::with_config(config, formatter);
        app.font_notice = font_notice;
        app
    }

    /// Builds the window state without a toolkit context.
    pub fn with_config(config: Config, formatter: Formatter) -> Self {
        let examples = bundled_examples().unwrap_or_else(|e| {
            error!(error = %e, "example verbs unavailable");
            Vec::new()
        });
        let mut app = Self {
            formatter,
            examples,
            example_labels: Vec::new(),
            bab_labels: Vec::new(),
            selected_example: None,
            verb_input: String::new(),
            tense: config.default_tense,
            bab: config.default_bab(),
            mood: config.default_mood,
            font_size: config.font_size,
            double_spacing: false,
            override_mode: config.format.as_override(),
            last_table: None,
            last_visual: None,
            error: None,
            font_notice: None,
        };
        app.refresh_labels();
        app
    }

    pub fn mode(&self) -> FormatMode {
        self.formatter.resolve_mode(RenderTarget::GuiPane, self.override_mode)
    }

    pub fn set_verb(&mut self, verb: &str) {
        self.verb_input = verb.to_string();
    }

    pub fn verb(&self) -> &str {
        &self.verb_input
    }

    pub fn set_tense(&mut self, tense: Tense) {
        self.tense = tense;
    }

    pub fn set_present_options(&mut self, bab: Bab, mood: Mood) {
        self.bab = bab;
        self.mood = mood;
    }

    pub fn example_labels(&self) -> &[String] {
        &self.example_labels
    }

    pub fn last_visual(&self) -> Option<&VisualTable> {
        self.last_visual.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn refresh_labels(&mut self) {
        let mode = self.override_mode;
        self.example_labels =
            self.formatter
                .format_labels(self.examples.iter().map(|e| e.text.as_str()), RenderTarget::GuiPane, mode);
        self.bab_labels = self
            .formatter
            .format_labels(Bab::ALL.iter().map(|b| b.label()), RenderTarget::GuiPane, mode);
    }

    /// Fills the entry with the example's logical text, never its display form.
    pub fn select_example(&mut self, index: usize) {
        let Some(example) = self.examples.get(index) else {
            return;
        };
        self.verb_input = example.text.clone();
        match example.bab() {
            Ok(bab) => self.bab = bab,
            Err(e) => warn!(error = %e, "example has no usable pattern"),
        }
        self.selected_example = Some(index);
    }

    pub fn calculate_conjugation(&mut self) {
        let request = match self.tense {
            Tense::Past => ConjugationRequest::past(),
            Tense::Present => ConjugationRequest::present(self.mood, self.bab.number()),
        };
        match conjugate_guarded(&self.verb_input, &request) {
            Ok(table) => {
                self.error = None;
                self.last_table = Some(table);
                self.redisplay();
            }
            Err(e) => {
                let message = e.to_string();
                self.error = self
                    .formatter
                    .format_labels([message.as_str()], RenderTarget::GuiPane, self.override_mode)
                    .pop();
                self.last_table = None;
                self.last_visual = None;
            }
        }
    }

    fn redisplay(&mut self) {
        self.last_visual = self
            .last_table
            .as_ref()
            .map(|table| self.formatter.format_table(table, RenderTarget::GuiPane, self.override_mode));
    }

    /// Flips between reshaped and logical display and re-renders whatever is showing.
    pub fn toggle_format(&mut self) {
        self.override_mode = Some(self.mode().toggled());
        self.refresh_labels();
        self.redisplay();
    }

    fn input_panel(&mut self, ui: &mut egui::Ui) {
        let mut picked = None;
        let mut submit = false;

        ui.horizontal(|ui| {
            ui.label("1. Past tense verb (3rd person masculine singular, with harakat):");
            let entry = ui.add(
                egui::TextEdit::singleline(&mut self.verb_input)
                    .desired_width(180.0)
                    .font(egui::FontId::proportional(self.font_size)),
            );
            if entry.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            if ui.button("Clear").clicked() {
                self.verb_input.clear();
            }

            let selected_text = self
                .selected_example
                .and_then(|i| self.example_labels.get(i))
                .cloned()
                .unwrap_or_else(|| "Examples".to_string());
            egui::ComboBox::from_id_source("example_verbs")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for (i, label) in self.example_labels.iter().enumerate() {
                        if ui.selectable_label(self.selected_example == Some(i), label.as_str()).clicked() {
                            picked = Some(i);
                        }
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("2. Tense:");
            ui.radio_value(&mut self.tense, Tense::Past, "Past");
            ui.radio_value(&mut self.tense, Tense::Present, "Present");
        });

        if self.tense == Tense::Present {
            ui.horizontal(|ui| {
                ui.label("3. Pattern (bab):");
                let selected = usize::from(self.bab.number() - 1);
                let selected_text = self.bab_labels.get(selected).cloned().unwrap_or_default();
                egui::ComboBox::from_id_source("bab")
                    .selected_text(selected_text)
                    .width(260.0)
                    .show_ui(ui, |ui| {
                        for (bab, label) in Bab::ALL.iter().zip(&self.bab_labels) {
                            ui.selectable_value(&mut self.bab, *bab, label.as_str());
                        }
                    });
                ui.label("Mood:");
                ui.radio_value(&mut self.mood, Mood::Indicative, "Indicative");
                ui.radio_value(&mut self.mood, Mood::Subjunctive, "Subjunctive");
            });
        }

        let toggle_text = match self.mode() {
            FormatMode::ReshapedAndReordered => "Reshape/Reorder: On",
            FormatMode::LogicalOnly => "Reshape/Reorder: Off",
        };
        let mut toggle = false;
        ui.horizontal(|ui| {
            if ui.button("Conjugate Verb").clicked() {
                submit = true;
            }
            ui.separator();
            ui.add(egui::Slider::new(&mut self.font_size, 12.0..=48.0).text("Font size"));
            ui.checkbox(&mut self.double_spacing, "Double spacing");
            toggle = ui.button(toggle_text).clicked();
        });

        if toggle {
            self.toggle_format();
        }
        if let Some(i) = picked {
            self.select_example(i);
        }
        if submit {
            self.calculate_conjugation();
        }
    }

    fn output_panel(&self, ui: &mut egui::Ui) {
        if let Some(notice) = &self.font_notice {
            ui.colored_label(egui::Color32::YELLOW, notice.as_str());
        }
        if let Some(err) = &self.error {
            ui.colored_label(egui::Color32::RED, egui::RichText::new(err).size(self.font_size));
            return;
        }
        let Some(visual) = &self.last_visual else {
            ui.label("Enter a verb and press Conjugate Verb.");
            return;
        };

        if visual.degraded {
            ui.colored_label(
                egui::Color32::YELLOW,
                "Arabic shaping is not available in this build; letters may appear unjoined.",
            );
        }
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new(&visual.title).size(self.font_size).strong());
        });
        ui.add_space(8.0);

        let row_gap = if self.double_spacing { self.font_size } else { self.font_size / 3.0 };
        egui::Grid::new("conjugation_grid")
            .striped(true)
            .spacing([32.0, row_gap])
            .show(ui, |ui| {
                for header in GRID_HEADER {
                    ui.strong(header);
                }
                ui.end_row();
                for row in grid_rows(visual) {
                    for cell in &row[..3] {
                        ui.label(egui::RichText::new(cell.as_str()).size(self.font_size));
                    }
                    ui.label(row[3].as_str());
                    ui.end_row();
                }
            });
    }
}

impl App for ConjugatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("input_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            self.input_panel(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().id_source("output_scroll").auto_shrink([false, false]).show(ui, |ui| {
                self.output_panel(ui);
            });
        });
    }
}

/// The configured font if it exists, else the first system font that does.
pub fn find_arabic_font<'a>(
    configured: Option<&Path>,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<PathBuf> {
    configured
        .filter(|p| p.is_file())
        .map(Path::to_path_buf)
        .or_else(|| candidates.into_iter().map(PathBuf::from).find(|p| p.is_file()))
}

/// Installs an Arabic-capable font. Returns a notice for the output pane when
/// none could be loaded.
fn load_arabic_font(ctx: &egui::Context, configured: Option<&Path>) -> Option<String> {
    let Some(path) = find_arabic_font(configured, SYSTEM_ARABIC_FONTS.iter().copied()) else {
        warn!("no Arabic font found, letters will show as boxes");
        return Some("No Arabic font found. Set font_path in conjugator.toml to a font with Arabic glyphs.".to_string());
    };
    match install_arabic_font(ctx, &path) {
        Ok(()) => {
            debug!(path = %path.display(), "installed Arabic font");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not load the Arabic font, using the built-in one");
            Some(format!("Could not load the Arabic font {}: {}", path.display(), e))
        }
    }
}

fn install_arabic_font(ctx: &egui::Context, path: &Path) -> std::io::Result<()> {
    let bytes = fs::read(path)?;
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(ARABIC_FONT.to_owned(), egui::FontData::from_owned(bytes));
    // Fallback only, so Latin text keeps the default face.
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push(ARABIC_FONT.to_owned());
    }
    ctx.set_fonts(fonts);
    Ok(())
}

pub fn run(config: Config, formatter: Formatter) -> Result<(), eframe::Error> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 650.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Arabic Verb Conjugator",
        options,
        Box::new(move |cc| Box::new(ConjugatorApp::new(cc, config, formatter))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{ModeDefaults, ShapingCapability};
    use pretty_assertions::assert_eq;

    fn app(defaults: FormatMode) -> ConjugatorApp {
        ConjugatorApp::with_config(Config::default(), Formatter::new(ShapingCapability::detect(), ModeDefaults::uniform(defaults)))
    }

    #[test]
    fn configured_font_wins_then_system_fonts() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let present = manifest.to_str().unwrap();
        assert_eq!(find_arabic_font(Some(manifest.as_path()), ["/no/such/font.ttf"]), Some(manifest.clone()));
        assert_eq!(
            find_arabic_font(Some(Path::new("/no/such/font.ttf")), ["/also/missing.ttf", present]),
            Some(manifest.clone())
        );
        assert_eq!(find_arabic_font(None, ["/also/missing.ttf"]), None);
    }

    #[test]
    fn selecting_an_example_uses_logical_text() {
        let mut app = app(FormatMode::ReshapedAndReordered);
        app.select_example(2);
        assert_eq!(app.verb(), "كَتَبَ");
        app.set_tense(Tense::Present);
        app.calculate_conjugation();
        assert_eq!(app.bab, Bab::FathaDamma);
        assert_eq!(app.error(), None);
        assert_eq!(app.last_visual().unwrap().forms.len(), 13);
    }

    #[test]
    fn errors_clear_the_table() {
        let mut app = app(FormatMode::LogicalOnly);
        app.set_verb("فَعَلَ");
        app.calculate_conjugation();
        assert!(app.last_visual().is_some());

        app.set_verb("فعل");
        app.calculate_conjugation();
        assert!(app.error().unwrap().starts_with("Input Error"));
        assert!(app.last_visual().is_none());
    }

    #[test]
    fn jussive_is_reported_not_fatal() {
        let mut app = app(FormatMode::LogicalOnly);
        app.set_verb("فَعَلَ");
        app.set_tense(Tense::Present);
        app.set_present_options(Bab::FathaFatha, Mood::Jussive);
        app.calculate_conjugation();
        assert_eq!(app.error(), Some("The Jussive (مجزوم) mood is not supported yet"));
    }

    #[test]
    fn toggle_rerenders_table_and_examples() {
        let mut app = app(FormatMode::LogicalOnly);
        app.set_verb("فَعَلَ");
        app.calculate_conjugation();
        assert_eq!(app.mode(), FormatMode::LogicalOnly);
        assert_eq!(app.example_labels()[0], "فَعَلَ");
        assert_eq!(app.last_visual().unwrap().get(crate::conjugation::Pronoun::FirstSingular), Some("فَعَلْتُ"));

        app.toggle_format();
        assert_eq!(app.mode(), FormatMode::ReshapedAndReordered);
        assert_eq!(app.last_visual().unwrap().mode, FormatMode::ReshapedAndReordered);

        app.toggle_format();
        assert_eq!(app.example_labels()[0], "فَعَلَ");
        assert_eq!(app.verb(), "فَعَلَ");
    }
}
