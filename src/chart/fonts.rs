//! Font registration for bitmap builds.
//!
//! Glyphs are rasterized with `ab_glyph`, which has no access to system font
//! discovery, so a TrueType file is loaded once and registered as the chart's
//! sans-serif family.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};
use tracing::debug;

use super::render::FONT_FAMILY;
use crate::error::{PlotError, Result};

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<PathBuf> = OnceLock::new();

/// Registers `explicit`, or the first system font found, unless a font is
/// already registered.
pub(crate) fn ensure_font(explicit: Option<&Path>) -> Result<()> {
    if REGISTERED.get().is_some() {
        return Ok(());
    }
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => find_system_font().ok_or_else(|| {
            PlotError::Font("no system font found; set `font` under [chart] in the config".into())
        })?,
    };
    let bytes = fs::read(&path)
        .map_err(|err| PlotError::Font(format!("{}: {err}", path.display())))?;
    // plotters keeps registered fonts for the rest of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|err| PlotError::Font(format!("{}: {err}", path.display())))?;
    debug!(path = %path.display(), "registered chart font");
    let _ = REGISTERED.set(path);
    Ok(())
}

fn find_system_font() -> Option<PathBuf> {
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.is_file())
}

