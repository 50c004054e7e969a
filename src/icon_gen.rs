use crate::canvas::Canvas;
use crate::chart::{Arrowhead, ChartLayout};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Icon sizes produced by a normal run.
pub const ICON_SIZES: [u32; 3] = [16, 48, 128];

/// Directory the icons are written to, relative to the working directory.
pub const OUTPUT_DIR: &str = "icons";

/// Green badge behind the chart.
pub const BADGE_COLOR: Rgba<u8> = Rgba([52, 175, 80, 255]);

/// Chart line and arrowhead.
pub const LINE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Name of the file written for a given size.
pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}

/// Draw the badge, chart line and arrowhead onto a fresh transparent canvas.
pub fn render_icon(size: u32) -> Result<RgbaImage> {
    let mut canvas = Canvas::new(size).with_context(|| format!("Can't render {size}px icon"))?;
    let layout = ChartLayout::new(size);

    let (center, radius) = layout.badge();
    canvas.fill_circle(center, radius, BADGE_COLOR);

    let points = layout.line_points();
    canvas.stroke_polyline(&points, layout.stroke_width(), LINE_COLOR);

    if let Some(arrow) = Arrowhead::at_end_of(&points, layout.arrow_size()) {
        canvas.fill_polygon(&arrow.vertices(), LINE_COLOR);
    }

    Ok(canvas.into_image())
}

/// Render every size in `sizes` and save it into `out_dir`.
///
/// Each icon is written before the next one is rendered. Returns the paths
/// of the written files in the order of `sizes`.
pub fn generate_icons(out_dir: &Path, sizes: &[u32], verbose: bool) -> Result<Vec<PathBuf>> {
    // Ensure the output directory exists
    create_dir_all(out_dir).context("Can't create output directory")?;

    if verbose {
        println!("Generating stock chart icons...");
    }

    let mut written = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let icon = render_icon(size)?;
        let output_path = out_dir.join(icon_file_name(size));
        save_png(&icon, &output_path)?;

        if verbose {
            println!("  ✓ Generated {}", output_path.display());
        }
        written.push(output_path);
    }

    Ok(written)
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);

    write_png(image.as_raw(), &mut out_file, image.width())
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out_file.flush()?;
    Ok(())
}

// Encode square RGBA data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}

/// What a written icon looks like when read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct IconCheck {
    pub width: u32,
    pub height: u32,
    pub corner: Rgba<u8>,
    pub center: Rgba<u8>,
}

impl IconCheck {
    pub fn has_transparent_corner(&self) -> bool {
        self.corner[3] == 0
    }

    pub fn has_badge_center(&self) -> bool {
        self.center == BADGE_COLOR
    }
}

/// Re-open a generated icon and make sure it is `size`×`size`.
pub fn check_icon(path: &Path, size: u32) -> Result<IconCheck> {
    let img = image::open(path)
        .with_context(|| format!("Failed to load icon {}", path.display()))?
        .to_rgba8();

    if img.width() != size || img.height() != size {
        anyhow::bail!(
            "{} is {}x{}, expected {size}x{size}",
            path.display(),
            img.width(),
            img.height()
        );
    }

    Ok(IconCheck {
        width: img.width(),
        height: img.height(),
        corner: *img.get_pixel(0, 0),
        center: *img.get_pixel(size / 2, size / 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::TRANSPARENT;

    #[test]
    fn rendered_icon_has_requested_dimensions() {
        for size in ICON_SIZES {
            let icon = render_icon(size).unwrap();
            assert_eq!(icon.width(), size);
            assert_eq!(icon.height(), size);
        }
    }

    #[test]
    fn background_is_transparent_and_badge_is_green() {
        for size in ICON_SIZES {
            let icon = render_icon(size).unwrap();

            assert_eq!(*icon.get_pixel(0, 0), TRANSPARENT, "size {size}");
            assert_eq!(*icon.get_pixel(size - 1, size - 1), TRANSPARENT, "size {size}");
            assert_eq!(*icon.get_pixel(size / 2, size / 2), BADGE_COLOR, "size {size}");
        }
    }

    #[test]
    fn chart_line_is_drawn_over_the_badge() {
        let icon = render_icon(128).unwrap();

        // Vertices of the zig-zag line.
        for (x, y) in [(40, 64), (64, 88), (88, 64)] {
            assert_eq!(*icon.get_pixel(x, y), LINE_COLOR, "({x}, {y})");
        }
    }

    #[test]
    fn arrowhead_points_down_after_falling_segment() {
        let icon = render_icon(128).unwrap();
        let (x, y) = (112, 88);

        // Below the end point lies the arrowhead, above it neither line nor arrow.
        assert_eq!(*icon.get_pixel(x, y + 8), LINE_COLOR);
        assert_ne!(*icon.get_pixel(x, y - 8), LINE_COLOR);
    }

    #[test]
    fn small_arrowhead_extends_below_end_point() {
        let icon = render_icon(16).unwrap();
        let (x, y) = (14, 11);

        assert_eq!(*icon.get_pixel(x, y + 1), LINE_COLOR);
        assert_ne!(*icon.get_pixel(x, y - 2), LINE_COLOR);
    }

    #[test]
    fn zero_size_is_an_error() {
        assert!(render_icon(0).is_err());
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_icon(48).unwrap(), render_icon(48).unwrap());
    }

    #[test]
    fn file_names_follow_size() {
        assert_eq!(icon_file_name(16), "icon16.png");
        assert_eq!(icon_file_name(128), "icon128.png");
    }
}
