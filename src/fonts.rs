//! Picks the font file used for each [`FontRole`].
//!
//! Atkinson Hyperlegible is preferred, DejaVu Sans is the packaged fallback.
//! When neither exists the role degrades to the system `sans-serif` family and
//! a [`FontUnavailableError`] is logged. Layout never fails over fonts.

use std::path::{Path, PathBuf};

use crate::config::FontConfig;
use crate::error::FontUnavailableError;
use crate::text_metrics::{self, FontSource};
use crate::theme::FontRole;

pub const FALLBACK_FAMILY: &str = "sans-serif";

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFont {
    pub source: FontSource,
    /// Family name as written into the SVG `font-family` attribute.
    pub family: String,
    pub weight: u16,
    pub italic: bool,
}

impl ResolvedFont {
    fn system(role: FontRole) -> Self {
        let bold = role == FontRole::Bold;
        let italic = role == FontRole::Italic;
        Self {
            source: FontSource::System {
                family: FALLBACK_FAMILY.to_string(),
                bold,
                italic,
            },
            family: FALLBACK_FAMILY.to_string(),
            weight: if bold { 700 } else { 400 },
            italic,
        }
    }

    fn from_file(path: &Path, role: FontRole) -> Self {
        let fallback = Self::system(role);
        let info = text_metrics::font_file_info(path);
        Self {
            source: FontSource::File(path.to_path_buf()),
            family: info
                .as_ref()
                .map(|info| info.family.clone())
                .unwrap_or(fallback.family),
            weight: info.as_ref().map(|info| info.weight).unwrap_or(fallback.weight),
            italic: info.map(|info| info.italic).unwrap_or(fallback.italic),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FontSource::File(path) => Some(path),
            FontSource::System { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSet {
    pub bold: ResolvedFont,
    pub regular: ResolvedFont,
    pub italic: ResolvedFont,
}

impl FontSet {
    pub fn resolve(config: &FontConfig) -> Self {
        let bold = resolve_role(config, FontRole::Bold);
        let regular = resolve_role(config, FontRole::Regular);
        let italic = match first_existing(&candidates(config, FontRole::Italic)) {
            Some(path) => ResolvedFont::from_file(&path, FontRole::Italic),
            None => regular.clone(),
        };
        tracing::debug!(
            bold = %bold.family,
            regular = %regular.family,
            italic = %italic.family,
            "resolved fonts"
        );
        Self {
            bold,
            regular,
            italic,
        }
    }

    /// System faces only. Used where the filesystem is unavailable.
    pub fn system() -> Self {
        Self {
            bold: ResolvedFont::system(FontRole::Bold),
            regular: ResolvedFont::system(FontRole::Regular),
            italic: ResolvedFont::system(FontRole::Italic),
        }
    }

    pub fn get(&self, role: FontRole) -> &ResolvedFont {
        match role {
            FontRole::Bold => &self.bold,
            FontRole::Regular => &self.regular,
            FontRole::Italic => &self.italic,
        }
    }

    /// Distinct font files referenced by the set, for loading into a renderer.
    pub fn files(&self) -> Vec<&Path> {
        let mut files: Vec<&Path> = Vec::new();
        for font in [&self.bold, &self.regular, &self.italic] {
            if let Some(path) = font.path()
                && !files.contains(&path)
            {
                files.push(path);
            }
        }
        files
    }
}

fn resolve_role(config: &FontConfig, role: FontRole) -> ResolvedFont {
    let tried = candidates(config, role);
    match first_existing(&tried) {
        Some(path) => ResolvedFont::from_file(&path, role),
        None => {
            let err = FontUnavailableError { role, tried };
            tracing::warn!("{err}");
            ResolvedFont::system(role)
        }
    }
}

fn candidates(config: &FontConfig, role: FontRole) -> Vec<PathBuf> {
    let explicit = match role {
        FontRole::Bold => config.bold.as_ref(),
        FontRole::Regular => config.regular.as_ref(),
        FontRole::Italic => config.italic.as_ref(),
    };
    let file_names: &[&str] = match role {
        FontRole::Bold => &["AtkinsonHyperlegible-Bold.ttf", "DejaVuSans-Bold.ttf"],
        FontRole::Regular => &["AtkinsonHyperlegible-Regular.ttf", "DejaVuSans.ttf"],
        // Regular resolution covers the rest.
        FontRole::Italic => &["AtkinsonHyperlegible-Italic.ttf"],
    };

    let mut out: Vec<PathBuf> = explicit.into_iter().cloned().collect();
    for name in file_names {
        for dir in &config.search_dirs {
            out.push(dir.join(name));
        }
    }
    out
}

fn first_existing(paths: &[PathBuf]) -> Option<PathBuf> {
    paths.iter().find(|path| path.is_file()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn empty_config() -> FontConfig {
        FontConfig {
            bold: None,
            regular: None,
            italic: None,
            search_dirs: vec![PathBuf::from("/nonexistent/fonts")],
        }
    }

    #[test]
    fn missing_fonts_fall_back_to_system_family() {
        let fonts = FontSet::resolve(&empty_config());
        assert_eq!(fonts.bold.family, FALLBACK_FAMILY);
        assert_eq!(fonts.bold.weight, 700);
        assert_eq!(fonts.regular.weight, 400);
        assert!(fonts.files().is_empty());
    }

    #[test]
    fn missing_fonts_are_reported_as_warnings() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let fonts =
            tracing::subscriber::with_default(subscriber, || FontSet::resolve(&empty_config()));
        assert_eq!(fonts.bold.family, FALLBACK_FAMILY);

        let output = log.contents();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("no Bold font found"), "{output}");
        assert!(
            output.contains("/nonexistent/fonts/AtkinsonHyperlegible-Bold.ttf"),
            "{output}"
        );
        assert!(output.contains("/nonexistent/fonts/DejaVuSans.ttf"), "{output}");
        assert!(output.contains("falling back to system sans-serif"), "{output}");
    }

    #[test]
    fn explicit_font_file_is_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Custom-Bold.ttf");
        std::fs::write(&path, b"not a real font").unwrap();
        let mut config = empty_config();
        config.bold = Some(path.clone());

        let fonts = FontSet::resolve(&config);
        assert_eq!(fonts.bold.path(), Some(path.as_path()));
        // unreadable name table keeps the generic family
        assert_eq!(fonts.bold.family, FALLBACK_FAMILY);
        assert_eq!(fonts.files(), vec![path.as_path()]);
    }

    #[test]
    fn italic_falls_back_to_regular_resolution() {
        let fonts = FontSet::resolve(&empty_config());
        assert_eq!(fonts.italic, fonts.regular);
    }

    #[test]
    fn explicit_path_is_tried_first() {
        let mut config = empty_config();
        config.bold = Some(PathBuf::from("/custom/Bold.ttf"));
        let tried = candidates(&config, FontRole::Bold);
        assert_eq!(tried[0], PathBuf::from("/custom/Bold.ttf"));
        assert_eq!(
            tried[1],
            PathBuf::from("/nonexistent/fonts/AtkinsonHyperlegible-Bold.ttf")
        );
        assert_eq!(tried.len(), 3);
    }
}
