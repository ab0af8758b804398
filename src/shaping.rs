//! Contextual glyph shaping for Arabic text, for surfaces that draw code
//! points one by one without applying OpenType joining themselves.

use crate::arabic::{is_mark, ALEF, ALEF_HAMZA_ABOVE, ALEF_HAMZA_BELOW, ALEF_MADDA, LAM, TATWEEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joining {
    /// Connects on both sides (ب, س, ل ...).
    Dual,
    /// Connects only to the letter before it (ا, د, ر, و ...).
    Right,
}

/// Presentation form block for a letter: the isolated form, with final,
/// initial and medial following it at +1, +2, +3 for dual-joining letters.
/// Hamza never joins and is left out.
fn presentation_base(c: char) -> Option<(u32, Joining)> {
    let entry = match c {
        '\u{0622}' => (0xFE81, Joining::Right),
        '\u{0623}' => (0xFE83, Joining::Right),
        '\u{0624}' => (0xFE85, Joining::Right),
        '\u{0625}' => (0xFE87, Joining::Right),
        '\u{0626}' => (0xFE89, Joining::Dual),
        '\u{0627}' => (0xFE8D, Joining::Right),
        '\u{0628}' => (0xFE8F, Joining::Dual),
        '\u{0629}' => (0xFE93, Joining::Right),
        '\u{062A}' => (0xFE95, Joining::Dual),
        '\u{062B}' => (0xFE99, Joining::Dual),
        '\u{062C}' => (0xFE9D, Joining::Dual),
        '\u{062D}' => (0xFEA1, Joining::Dual),
        '\u{062E}' => (0xFEA5, Joining::Dual),
        '\u{062F}' => (0xFEA9, Joining::Right),
        '\u{0630}' => (0xFEAB, Joining::Right),
        '\u{0631}' => (0xFEAD, Joining::Right),
        '\u{0632}' => (0xFEAF, Joining::Right),
        '\u{0633}' => (0xFEB1, Joining::Dual),
        '\u{0634}' => (0xFEB5, Joining::Dual),
        '\u{0635}' => (0xFEB9, Joining::Dual),
        '\u{0636}' => (0xFEBD, Joining::Dual),
        '\u{0637}' => (0xFEC1, Joining::Dual),
        '\u{0638}' => (0xFEC5, Joining::Dual),
        '\u{0639}' => (0xFEC9, Joining::Dual),
        '\u{063A}' => (0xFECD, Joining::Dual),
        '\u{0641}' => (0xFED1, Joining::Dual),
        '\u{0642}' => (0xFED5, Joining::Dual),
        '\u{0643}' => (0xFED9, Joining::Dual),
        '\u{0644}' => (0xFEDD, Joining::Dual),
        '\u{0645}' => (0xFEE1, Joining::Dual),
        '\u{0646}' => (0xFEE5, Joining::Dual),
        '\u{0647}' => (0xFEE9, Joining::Dual),
        '\u{0648}' => (0xFEED, Joining::Right),
        '\u{0649}' => (0xFEEF, Joining::Right),
        '\u{064A}' => (0xFEF1, Joining::Dual),
        _ => return None,
    };
    Some(entry)
}

// Lam followed by an alef collapses into one glyph: (isolated, final).
fn lam_alef_ligature(alef: char) -> Option<(u32, u32)> {
    match alef {
        ALEF_MADDA => Some((0xFEF5, 0xFEF6)),
        ALEF_HAMZA_ABOVE => Some((0xFEF7, 0xFEF8)),
        ALEF_HAMZA_BELOW => Some((0xFEF9, 0xFEFA)),
        ALEF => Some((0xFEFB, 0xFEFC)),
        _ => None,
    }
}

fn joining(c: char) -> Option<Joining> {
    if c == TATWEEL {
        return Some(Joining::Dual);
    }
    presentation_base(c).map(|(_, j)| j)
}

fn from_u32(code: u32, fallback: char) -> char {
    char::from_u32(code).unwrap_or(fallback)
}

/// A letter or ligature with the marks that sit on it.
#[derive(Debug)]
struct Cluster {
    base: char,
    ligature_alef: Option<char>,
    marks: Vec<char>,
}

impl Cluster {
    // A lam-alef ligature joins like an alef: only to the letter before it.
    fn joining(&self) -> Option<Joining> {
        if self.ligature_alef.is_some() {
            Some(Joining::Right)
        } else {
            joining(self.base)
        }
    }
}

fn clusters(text: &str) -> Vec<Cluster> {
    let mut out: Vec<Cluster> = Vec::new();
    for c in text.chars() {
        if is_mark(c) {
            if let Some(last) = out.last_mut() {
                last.marks.push(c);
                continue;
            }
        }
        if let Some(last) = out.last_mut() {
            if last.base == LAM && last.ligature_alef.is_none() && lam_alef_ligature(c).is_some() {
                last.ligature_alef = Some(c);
                continue;
            }
        }
        out.push(Cluster { base: c, ligature_alef: None, marks: Vec::new() });
    }
    out
}

/// Replaces every Arabic letter with the presentation form its neighbours
/// call for. Harakat are kept and do not break joining. Non-Arabic
/// characters pass through untouched and end any joining run.
pub fn reshape(text: &str) -> String {
    let clusters = clusters(text);
    let mut out = String::with_capacity(text.len());

    for (i, cluster) in clusters.iter().enumerate() {
        let Some(own) = cluster.joining() else {
            out.push(cluster.base);
            out.extend(&cluster.marks);
            continue;
        };

        let joins_prev = i > 0 && clusters[i - 1].joining() == Some(Joining::Dual);
        let joins_next =
            own == Joining::Dual && clusters.get(i + 1).is_some_and(|next| next.joining().is_some());

        if let Some(alef) = cluster.ligature_alef {
            if let Some((isolated, fin)) = lam_alef_ligature(alef) {
                out.push(from_u32(if joins_prev { fin } else { isolated }, cluster.base));
            }
        } else if cluster.base == TATWEEL {
            out.push(TATWEEL);
        } else if let Some((base, kind)) = presentation_base(cluster.base) {
            let offset = match (kind, joins_prev, joins_next) {
                (Joining::Right, true, _) => 1,
                (Joining::Right, false, _) => 0,
                (Joining::Dual, false, false) => 0,
                (Joining::Dual, true, false) => 1,
                (Joining::Dual, false, true) => 2,
                (Joining::Dual, true, true) => 3,
            };
            out.push(from_u32(base + offset, cluster.base));
        }
        out.extend(&cluster.marks);
    }
    out
}

/// Moves each run of combining marks in front of the character it belongs
/// to. Once the string is reversed for a left-to-right surface the marks
/// follow their base again, which is where terminals attach them.
pub fn shift_harakat(text: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(text.chars().count());
    let mut base_index: Option<usize> = None;
    for c in text.chars() {
        match (is_mark(c), base_index) {
            (true, Some(idx)) => {
                out.insert(idx, c);
                base_index = Some(idx + 1);
            }
            _ => {
                base_index = Some(out.len());
                out.push(c);
            }
        }
    }
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn picks_positional_forms() {
        // ك initial, ت medial, ب final
        assert_eq!(reshape("كتب"), "\u{FEDB}\u{FE98}\u{FE90}");
        // ب isolated
        assert_eq!(reshape("ب"), "\u{FE8F}");
    }

    #[test]
    fn right_joining_letters_break_the_run() {
        // د final, then ر isolated since د never connects forward
        assert_eq!(reshape("بدر"), "\u{FE91}\u{FEAA}\u{FEAD}");
    }

    #[test]
    fn harakat_are_transparent() {
        assert_eq!(reshape("كَتَبَ"), "\u{FEDB}\u{064E}\u{FE98}\u{064E}\u{FE90}\u{064E}");
    }

    #[test]
    fn forms_lam_alef_ligatures() {
        assert_eq!(reshape("لا"), "\u{FEFB}");
        assert_eq!(reshape("فلا"), "\u{FED3}\u{FEFC}");
        assert_eq!(reshape("لَأ"), "\u{FEF7}\u{064E}");
    }

    #[test]
    fn leaves_other_text_alone() {
        assert_eq!(reshape("abc (M)"), "abc (M)");
        assert_eq!(reshape(""), "");
    }

    #[test]
    fn shifts_marks_before_their_base() {
        assert_eq!(shift_harakat("كَتَبَ"), "\u{064E}ك\u{064E}ت\u{064E}ب");
        assert_eq!(shift_harakat("لْتُمْ"), "\u{0652}ل\u{064F}ت\u{0652}م");
        assert_eq!(shift_harakat("نّ\u{064E}"), "\u{0651}\u{064E}ن");
        assert_eq!(shift_harakat("ab"), "ab");
    }
}
