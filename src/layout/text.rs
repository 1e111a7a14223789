use crate::fonts::FontSet;
use crate::text_metrics;
use crate::theme::{FontRole, FontSpec};

/// Measures rendered text. Layout only ever asks for widths.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32;
}

/// Glyph-advance measurement against the resolved font files. Falls back to
/// the width table when a face cannot be loaded, so it never fails.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    fonts: FontSet,
}

impl FontMetrics {
    pub fn new(fonts: FontSet) -> Self {
        Self { fonts }
    }
}

impl TextMeasure for FontMetrics {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        let source = &self.fonts.get(font.role).source;
        text_metrics::measure_text_width(text, font.size, source)
            .unwrap_or_else(|| table_text_width(text, font))
    }
}

/// Width table only. Deterministic and free of font I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMetrics;

impl TextMeasure for ApproxMetrics {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        table_text_width(text, font)
    }
}

/// Bold faces run roughly this much wider than the regular advances below.
const BOLD_WIDTH_SCALE: f32 = 1.09;

/// DejaVu Sans Book advance widths, in ems.
fn advance_em(ch: char) -> f32 {
    match ch {
        ' ' | '.' | ',' => 0.318,
        '\'' => 0.275,
        '"' => 0.460,
        ':' | ';' | '/' | '|' | '\\' => 0.337,
        '-' => 0.361,
        '(' | ')' | '[' | ']' => 0.390,
        '{' | '}' => 0.636,
        '!' => 0.400,
        '?' => 0.531,
        '_' => 0.500,
        '+' | '=' | '<' | '>' | '#' => 0.838,
        '&' => 0.780,
        '%' => 0.950,
        '@' => 1.000,
        '0'..='9' => 0.636,
        'a' => 0.613,
        'b' | 'd' | 'g' | 'p' | 'q' => 0.635,
        'c' => 0.550,
        'e' => 0.615,
        'f' => 0.352,
        'h' | 'n' | 'u' => 0.634,
        'i' | 'j' | 'l' => 0.278,
        'k' => 0.579,
        'm' => 0.974,
        'o' => 0.612,
        'r' => 0.411,
        's' => 0.521,
        't' => 0.392,
        'v' | 'x' | 'y' => 0.592,
        'w' => 0.818,
        'z' => 0.525,
        'A' | 'V' => 0.684,
        'B' => 0.686,
        'C' => 0.698,
        'D' => 0.770,
        'E' => 0.632,
        'F' => 0.575,
        'G' => 0.775,
        'H' => 0.752,
        'I' | 'J' => 0.295,
        'K' => 0.656,
        'L' => 0.557,
        'M' => 0.863,
        'N' => 0.748,
        'O' | 'Q' => 0.787,
        'P' => 0.603,
        'R' => 0.695,
        'S' => 0.635,
        'T' | 'Y' => 0.611,
        'U' => 0.732,
        'W' => 0.989,
        'X' | 'Z' => 0.685,
        _ if is_wide(ch) => 1.0,
        _ => 0.600,
    }
}

/// East Asian wide ranges that render at a full em.
fn is_wide(ch: char) -> bool {
    matches!(
        ch,
        '\u{1100}'..='\u{115f}'
            | '\u{2e80}'..='\u{a4cf}'
            | '\u{ac00}'..='\u{d7a3}'
            | '\u{f900}'..='\u{faff}'
            | '\u{ff00}'..='\u{ff60}'
            | '\u{ffe0}'..='\u{ffe6}'
    )
}

fn table_text_width(text: &str, font: &FontSpec) -> f32 {
    let ems: f32 = text.chars().filter(|ch| *ch != '\n').map(advance_em).sum();
    let scale = match font.role {
        FontRole::Bold => BOLD_WIDTH_SCALE,
        FontRole::Regular | FontRole::Italic => 1.0,
    };
    ems * font.size * scale
}
