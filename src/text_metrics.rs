use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use ttf_parser::{Face, GlyphId};

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Where a face comes from: a concrete file, or a system family query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontSource {
    File(PathBuf),
    System {
        family: String,
        bold: bool,
        italic: bool,
    },
}

impl FontSource {
    fn cache_key(&self) -> String {
        match self {
            Self::File(path) => format!("file:{}", path.display()),
            Self::System {
                family,
                bold,
                italic,
            } => format!("system:{}:{bold}:{italic}", family.trim()),
        }
    }
}

/// Family name, weight and slant read from a font file's tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFileInfo {
    pub family: String,
    pub weight: u16,
    pub italic: bool,
}

/// Sum of glyph advances for `text` at `font_size` pixels per em. `None` when
/// the face cannot be loaded.
pub fn measure_text_width(text: &str, font_size: f32, source: &FontSource) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, source)
}

pub fn font_file_info(path: &Path) -> Option<FontFileInfo> {
    let bytes = fs::read(path).ok()?;
    let face = Face::parse(&bytes, 0).ok()?;
    let family = face_family(&face)?;
    Some(FontFileInfo {
        family,
        weight: face.weight().to_number(),
        italic: face.is_italic(),
    })
}

fn face_family(face: &Face<'_>) -> Option<String> {
    let names = face.names();
    [
        ttf_parser::name_id::TYPOGRAPHIC_FAMILY,
        ttf_parser::name_id::FAMILY,
    ]
    .into_iter()
    .find_map(|wanted| {
        names
            .into_iter()
            .filter(|name| name.name_id == wanted)
            .find_map(|name| name.to_string())
    })
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, source: &FontSource) -> Option<f32> {
        let key = source.cache_key();
        if !self.cache.contains_key(&key) {
            let face = self.load_face(source);
            self.cache.insert(key.clone(), face);
        }
        let face = self.cache.get_mut(&key).and_then(|face| face.as_mut())?;
        let normalized = text.replace('\t', "    ");
        face.measure_width(&normalized, font_size)
    }

    fn load_face(&mut self, source: &FontSource) -> Option<FontFace> {
        match source {
            FontSource::File(path) => {
                let bytes = fs::read(path).ok()?;
                FontFace::new(bytes, 0)
            }
            FontSource::System {
                family,
                bold,
                italic,
            } => self.load_system_face(family, *bold, *italic),
        }
    }

    fn load_system_face(&mut self, font_family: &str, bold: bool, italic: bool) -> Option<FontFace> {
        let mut names: Vec<String> = Vec::new();
        let mut generic: Vec<Option<Family<'static>>> = Vec::new();
        for part in font_family.split(',') {
            let raw = part.trim().trim_matches('"').trim_matches('\'');
            if raw.is_empty() {
                continue;
            }
            match raw.to_ascii_lowercase().as_str() {
                "serif" => generic.push(Some(Family::Serif)),
                "sans-serif" | "system-ui" => generic.push(Some(Family::SansSerif)),
                "monospace" => generic.push(Some(Family::Monospace)),
                _ => {
                    names.push(raw.to_string());
                    generic.push(None);
                }
            }
        }
        if generic.is_empty() {
            generic.push(Some(Family::SansSerif));
        }

        let mut families: Vec<Family<'_>> = Vec::with_capacity(generic.len());
        let mut named = names.iter();
        for token in generic {
            match token {
                Some(family) => families.push(family),
                None => {
                    if let Some(name) = named.next() {
                        families.push(Family::Name(name.as_str()));
                    }
                }
            }
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: if bold { Weight::BOLD } else { Weight::NORMAL },
            stretch: Stretch::Normal,
            style: if italic { Style::Italic } else { Style::Normal },
        };
        let id = self.db.query(&query)?;
        let mut loaded = None;
        self.db.with_face_data(id, |data, index| {
            loaded = FontFace::new(data.to_vec(), index);
        });
        loaded
    }
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascii_advances: [u16; 128],
    advance_cache: HashMap<char, Option<u16>>,
}

impl FontFace {
    fn new(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph_id) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph_id).unwrap_or(0);
            }
        }
        Some(Self {
            data,
            index,
            units_per_em,
            ascii_advances,
            advance_cache: HashMap::new(),
        })
    }

    fn measure_width(&mut self, text: &str, font_size: f32) -> Option<f32> {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;

        if text.is_ascii() {
            let width: f32 = text
                .bytes()
                .filter(|byte| *byte != b'\n')
                .map(|byte| match self.ascii_advances[byte as usize] {
                    0 => fallback,
                    advance => advance as f32 * scale,
                })
                .sum();
            return Some(width.max(0.0));
        }

        let face = Face::parse(&self.data, self.index).ok()?;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = *self.advance_cache.entry(ch).or_insert_with(|| {
                face.glyph_index(ch)
                    .map(|glyph: GlyphId| face.glyph_hor_advance(glyph).unwrap_or(0))
            });
            width += match advance {
                Some(advance) => advance as f32 * scale,
                None => fallback,
            };
        }
        Some(width.max(0.0))
    }
}
