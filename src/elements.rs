//! Extended element implementations built on top of `genpdf` primitives.
//!
//! This module adds helpers for decoding the header logo and scaling it into
//! its bounding box, plus a horizontal rule element the upstream crate does
//! not ship with.

use std::path::Path;

use image::GenericImageView;

use genpdf::elements::Image;
use genpdf::error::{Context as _, Error};
use genpdf::style::{Color, Style};
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Scale, Size};

use crate::model::ImageSource;

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

/// Width of the bounding box the header logo is scaled into.
pub const LOGO_BOX_WIDTH: f64 = 100.0;
/// Height of the bounding box the header logo is scaled into.
pub const LOGO_BOX_HEIGHT: f64 = 55.0;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Decodes an image from in-memory bytes using the [`image`] crate with descriptive errors.
pub fn decode_image_from_bytes(bytes: impl AsRef<[u8]>) -> Result<image::DynamicImage, Error> {
    image::load_from_memory(bytes.as_ref()).context("Failed to decode image from provided bytes")
}

/// Decodes the image at `path` using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

fn image_from_dynamic(image: image::DynamicImage) -> Result<(Image, Size), Error> {
    let size = estimated_image_size(&image, DEFAULT_IMAGE_DPI);
    let image = Image::from_dynamic_image(image)?;
    Ok((image, size))
}

fn fit_scale(natural: Size, box_width: f64, box_height: f64) -> f64 {
    let width = mm_to_f64(natural.width);
    let height = mm_to_f64(natural.height);
    if width <= f64::EPSILON || height <= f64::EPSILON {
        return 1.0;
    }
    (box_width / width).min(box_height / height)
}

/// Resolves the logo reference into a renderable image, scaled to fit the
/// logo bounding box while preserving the aspect ratio and aligned to the
/// right margin.
pub fn scaled_logo(source: &ImageSource) -> Result<Image, Error> {
    let dynamic = match source {
        ImageSource::Bytes(bytes) => decode_image_from_bytes(bytes)?,
        ImageSource::Path(path) => decode_image_from_path(path)?,
    };
    let (mut image, natural) = image_from_dynamic(dynamic)?;
    let scale = fit_scale(natural, LOGO_BOX_WIDTH, LOGO_BOX_HEIGHT);
    image.set_scale(Scale::new(scale, scale));
    image.set_alignment(Alignment::Right);
    Ok(image)
}

/// A horizontal rule spanning the full available width.
///
/// Used as the bottom border under the column header row; genpdf's cell
/// decorators can only draw complete frames, not a single edge.
pub struct Rule {
    thickness: Mm,
    color: Color,
}

impl Rule {
    /// Creates a rule with the given stroke thickness and color.
    pub fn new(thickness: impl Into<Mm>, color: Color) -> Self {
        Self {
            thickness: thickness.into(),
            color,
        }
    }
}

impl Element for Rule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        mut area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.thickness > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        area.draw_line(
            vec![Position::new(0, 0), Position::new(width, 0)],
            Style::new().with_color(self.color),
        );

        result.size = Size::new(width, self.thickness);
        Ok(result)
    }
}
