//! Lays a formatted table out for a terminal, or as JSON.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::conjugation::{Pronoun, Tense};
use crate::display::{FormatMode, VisualTable};
use crate::table::ConjugationTable;

const EMPTY_CELL: &str = "---";

/// Grid rows: person/gender label and the (plural, dual, singular) cells.
/// The second-person dual is shared by both second-person rows and the first
/// person has no dual.
const GRID: [(&str, [Option<Pronoun>; 3]); 5] = [
    (
        "3rd person male",
        [Some(Pronoun::ThirdPluralMasc), Some(Pronoun::ThirdDualMasc), Some(Pronoun::ThirdSingularMasc)],
    ),
    (
        "3rd person female",
        [Some(Pronoun::ThirdPluralFem), Some(Pronoun::ThirdDualFem), Some(Pronoun::ThirdSingularFem)],
    ),
    (
        "2nd person male",
        [Some(Pronoun::SecondPluralMasc), Some(Pronoun::SecondDual), Some(Pronoun::SecondSingularMasc)],
    ),
    (
        "2nd person female",
        [Some(Pronoun::SecondPluralFem), Some(Pronoun::SecondDual), Some(Pronoun::SecondSingularFem)],
    ),
    ("1st person", [Some(Pronoun::FirstPlural), None, Some(Pronoun::FirstSingular)]),
];

const HEADER: [&str; 4] = ["Plural", "Dual", "Singular", "Person"];

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(fill))
}

/// Rows of visual cells in grid order, shared by the terminal and GUI layouts.
pub fn grid_rows(visual: &VisualTable) -> Vec<[String; 4]> {
    GRID.iter()
        .map(|&(person, cells)| {
            let [plural, dual, singular] = cells.map(|slot| {
                slot.and_then(|p| visual.get(p))
                    .unwrap_or(EMPTY_CELL)
                    .to_string()
            });
            [plural, dual, singular, person.to_string()]
        })
        .collect()
}

pub fn render_terminal(visual: &VisualTable) -> String {
    let rows = grid_rows(visual);
    let mut widths = HEADER.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }
    let line_width = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);

    let join = |cells: [&str; 4]| -> String {
        let padded: Vec<String> = cells.iter().zip(widths).map(|(c, w)| pad(c, w)).collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&visual.title);
    out.push('\n');
    out.push_str(&"=".repeat(line_width));
    out.push('\n');
    out.push_str(&join(HEADER));
    out.push('\n');
    out.push_str(&"-".repeat(line_width));
    out.push('\n');
    for row in &rows {
        out.push_str(&join([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]));
        out.push('\n');
    }
    out.push_str(&"=".repeat(line_width));
    out.push('\n');
    out
}

#[derive(Serialize)]
struct JsonForm<'a> {
    pronoun: Pronoun,
    tag: &'static str,
    label: &'static str,
    arabic_pronoun: &'static str,
    logical: &'a str,
    visual: &'a str,
}

#[derive(Serialize)]
struct JsonTable<'a> {
    title: &'a str,
    tense: Tense,
    mode: FormatMode,
    degraded: bool,
    forms: Vec<JsonForm<'a>>,
}

pub fn render_json(table: &ConjugationTable, visual: &VisualTable) -> serde_json::Result<String> {
    let forms = table
        .forms()
        .iter()
        .zip(&visual.forms)
        .map(|(form, cell)| JsonForm {
            pronoun: form.pronoun(),
            tag: form.pronoun().tag(),
            label: form.label(),
            arabic_pronoun: form.pronoun().arabic(),
            logical: &cell.logical_text,
            visual: &cell.visual_text,
        })
        .collect();
    serde_json::to_string_pretty(&JsonTable {
        title: table.title(),
        tense: table.tense(),
        mode: visual.mode,
        degraded: visual.degraded,
        forms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conjugation::{conjugate, ConjugationRequest, Mood};
    use crate::display::{Formatter, ModeDefaults, RenderTarget, ShapingCapability};
    use pretty_assertions::assert_eq;

    fn logical_visual(table: &ConjugationTable) -> VisualTable {
        Formatter::new(ShapingCapability::Unavailable, ModeDefaults::uniform(FormatMode::LogicalOnly))
            .format_table(table, RenderTarget::TerminalStream, None)
    }

    #[test]
    fn grid_places_every_cell() {
        let table = conjugate("فَعَلَ", &ConjugationRequest::past()).unwrap();
        let rows = grid_rows(&logical_visual(&table));
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], ["فَعَلُوْا", "فَعَلَا", "فَعَلَ", "3rd person male"].map(String::from));
        assert_eq!(rows[2][1], rows[3][1]);
        assert_eq!(rows[4], ["فَعَلْنَا", "---", "فَعَلْتُ", "1st person"].map(String::from));
    }

    #[test]
    fn terminal_layout_has_title_header_and_rules() {
        let table = conjugate("كَتَبَ", &ConjugationRequest::present(Mood::Indicative, 2)).unwrap();
        let text = render_terminal(&logical_visual(&table));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], table.title());
        assert!(lines[1].chars().all(|c| c == '='));
        assert!(lines[2].starts_with("Plural"));
        assert!(lines[2].contains(" | Dual"));
        assert!(lines[3].chars().all(|c| c == '-'));
        assert!(lines[4].starts_with("يَكْتُبُوْنَ"));
        assert!(lines[8].ends_with("1st person"));
        assert_eq!(lines[1], lines[9]);
    }

    #[test]
    fn columns_line_up_by_display_width() {
        let table = conjugate("فَعَلَ", &ConjugationRequest::past()).unwrap();
        let text = render_terminal(&logical_visual(&table));
        let separators: Vec<Vec<usize>> = text
            .lines()
            .skip(4)
            .take(5)
            .map(|line| {
                line.match_indices('|')
                    .map(|(byte_idx, _)| line[..byte_idx].width())
                    .collect::<Vec<usize>>()
            })
            .collect();
        assert!(separators.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn json_carries_logical_and_visual_text() {
        let table = conjugate("فَعَلَ", &ConjugationRequest::past()).unwrap();
        let json = render_json(&table, &logical_visual(&table)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tense"], "past");
        assert_eq!(value["degraded"], false);
        assert_eq!(value["forms"].as_array().unwrap().len(), 13);
        assert_eq!(value["forms"][0]["pronoun"], "first_singular");
        assert_eq!(value["forms"][0]["logical"], "فَعَلْتُ");
        assert_eq!(value["forms"][3]["tag"], "3rd-sg-masc");
    }
}
