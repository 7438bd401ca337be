//! Font loading for the report renderer.
//!
//! Callers name a font family; the loader resolves the four style files
//! (`<Name>-Regular.ttf`, `<Name>-Bold.ttf`, `<Name>-Italic.ttf`,
//! `<Name>-BoldItalic.ttf`) from a small search path and falls back to the
//! bundled default family when the requested one is not installed.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::warn;

/// Name of the bundled fallback font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable overriding the font search path.
pub const FONTS_DIR_ENV: &str = "RESERVATION_REPORT_FONTS_DIR";

const FONT_VARIANTS: &[&str] = &["Regular", "Bold", "Italic", "BoldItalic"];

fn font_file_names(family: &str) -> Vec<String> {
    FONT_VARIANTS
        .iter()
        .map(|variant| format!("{}-{}.ttf", family, variant))
        .collect()
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(path) = env::var(FONTS_DIR_ENV) {
        if !path.trim().is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.iter().any(|existing| existing == &candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates
        .iter()
        .any(|existing| existing == &manifest_candidate)
    {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_font_files(path: &Path, family: &str) -> Vec<PathBuf> {
    font_file_names(family)
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory(family: &str) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate, family);

        if exists && missing.is_empty() {
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(Error::new(
        format!(
            "Unable to locate font family '{}'. Checked: {}. Set {} to point at a directory containing the family's TTF files.",
            family, summary, FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn load_named_font_family(family: &str) -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory(family)?;

    fonts::from_files(&directory, family, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                family,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Loads the requested font family, falling back to the bundled default
/// family when the request cannot be satisfied.
///
/// A blank family name selects the default family directly.
pub fn load_font_family(family: &str) -> Result<FontFamily<FontData>, Error> {
    let requested = if family.trim().is_empty() {
        DEFAULT_FONT_FAMILY_NAME
    } else {
        family
    };

    match load_named_font_family(requested) {
        Ok(loaded) => Ok(loaded),
        Err(err) if requested != DEFAULT_FONT_FAMILY_NAME && fonts_missing(&err) => {
            warn!(
                "Font family '{}' unavailable ({}); falling back to '{}'.",
                requested, err, DEFAULT_FONT_FAMILY_NAME
            );
            load_named_font_family(DEFAULT_FONT_FAMILY_NAME)
        }
        Err(err) => Err(err),
    }
}

/// Indicates whether the named family's files are present in the search path.
pub fn fonts_available(family: &str) -> bool {
    resolve_font_directory(family).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_file_names_cover_all_variants() {
        let names = font_file_names("Roboto");
        assert_eq!(
            names,
            vec![
                "Roboto-Regular.ttf",
                "Roboto-Bold.ttf",
                "Roboto-Italic.ttf",
                "Roboto-BoldItalic.ttf",
            ]
        );
    }

    #[test]
    fn manifest_fonts_directory_is_a_candidate() {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
        assert!(font_directory_candidates().contains(&manifest));
    }

    #[test]
    fn unknown_family_reports_search_path() {
        let err = resolve_font_directory("NoSuchFamily").unwrap_err();
        assert!(err.to_string().contains("NoSuchFamily"));
        assert!(err.to_string().contains(FONTS_DIR_ENV));
    }
}
