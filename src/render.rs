use crate::config::LayoutConfig;
use crate::error::DiagramError;
use crate::fonts::{FALLBACK_FAMILY, FontSet, ResolvedFont};
use crate::ir::Tier;
use crate::layout::Layout;
use crate::theme::Theme;
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig, fonts: &FontSet) -> String {
    let mut svg = String::new();
    let (width, height) = layout.size();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    let nodes = layout.tree.nodes_breadth_first();

    for node in &nodes {
        for child in &node.children {
            svg.push_str(&arrow_svg(
                node.bottom_center(),
                child.top_center(),
                &theme.line_color,
                config,
            ));
        }
    }

    for node in &nodes {
        let style = theme.tier(node.tier);
        let (x0, y0, _, _) = node.bbox();
        svg.push_str(&format!(
            "<rect x=\"{x0:.2}\" y=\"{y0:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\"/>",
            node.w,
            node.h,
            style.fill,
            r = config.node_corner_radius,
        ));
        svg.push_str(&text_svg(
            node.x,
            node.y,
            &node.label,
            fonts.get(style.font),
            style.font_size,
            &style.text_color,
            TextAnchor::Center,
        ));
    }

    let desc_font = theme.description_font();
    for node in &nodes {
        if node.tier != Tier::Tool {
            continue;
        }
        let Some(description) = node.description.as_deref() else {
            continue;
        };
        let (_, _, _, y1) = node.bbox();
        svg.push_str(&text_svg(
            node.x,
            y1 + config.desc_offset_y,
            description,
            fonts.get(desc_font.role),
            desc_font.size,
            &theme.ink_color,
            TextAnchor::TopCenter,
        ));
    }

    let legend_font = theme.legend_font();
    let swatch = config.legend_swatch_size;
    for item in &layout.legend.items {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{swatch:.2}\" height=\"{swatch:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\"/>",
            item.swatch_x,
            layout.legend.y,
            theme.tier(item.tier).fill,
            r = config.legend_swatch_radius,
        ));
        svg.push_str(&text_svg(
            item.label_x,
            layout.legend.y + swatch / 2.0,
            &item.label,
            fonts.get(legend_font.role),
            legend_font.size,
            &theme.ink_color,
            TextAnchor::LeftMiddle,
        ));
    }

    if let Some(title) = &layout.title {
        let title_font = theme.title_font();
        svg.push_str(&text_svg(
            title.x,
            title.y,
            &title.text,
            fonts.get(title_font.role),
            title_font.size,
            &theme.ink_color,
            TextAnchor::TopCenter,
        ));
    }

    svg.push_str("</svg>");
    svg
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextAnchor {
    /// Centered both ways on the point.
    Center,
    /// Horizontally centered, hanging from the point.
    TopCenter,
    /// Starting at the point, vertically centered.
    LeftMiddle,
}

fn text_svg(
    x: f32,
    y: f32,
    text: &str,
    font: &ResolvedFont,
    font_size: f32,
    fill: &str,
    anchor: TextAnchor,
) -> String {
    let (text_anchor, baseline) = match anchor {
        TextAnchor::Center => ("middle", "central"),
        TextAnchor::TopCenter => ("middle", "hanging"),
        TextAnchor::LeftMiddle => ("start", "central"),
    };
    let style = if font.italic { "italic" } else { "normal" };
    format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{text_anchor}\" dominant-baseline=\"{baseline}\" font-family=\"{}\" font-size=\"{font_size}\" font-weight=\"{}\" font-style=\"{style}\" fill=\"{fill}\">{}</text>",
        font_family_attr(&font.family),
        font.weight,
        escape_xml(text)
    )
}

fn font_family_attr(family: &str) -> String {
    if family == FALLBACK_FAMILY {
        return family.to_string();
    }
    format!("'{}', {FALLBACK_FAMILY}", escape_xml(family))
}

fn arrow_svg(from: (f32, f32), to: (f32, f32), color: &str, config: &LayoutConfig) -> String {
    let [tip, left, right] = arrowhead(
        from,
        to,
        config.arrowhead_length,
        config.arrowhead_half_width,
    );
    format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{color}\" stroke-width=\"{}\"/><polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{color}\"/>",
        from.0,
        from.1,
        to.0,
        to.1,
        config.arrow_width,
        tip.0,
        tip.1,
        left.0,
        left.1,
        right.0,
        right.1,
    )
}

/// Triangle with its tip at `to`, pointing along `from -> to`. The base sits
/// `length` back from the tip, `half_width` out to each side.
pub(crate) fn arrowhead(
    from: (f32, f32),
    to: (f32, f32),
    length: f32,
    half_width: f32,
) -> [(f32, f32); 3] {
    let angle = (to.1 - from.1).atan2(to.0 - from.0);
    let back = (to.0 - length * angle.cos(), to.1 - length * angle.sin());
    let perp = angle + std::f32::consts::FRAC_PI_2;
    let offset = (half_width * perp.cos(), half_width * perp.sin());
    [
        to,
        (back.0 + offset.0, back.1 + offset.1),
        (back.0 - offset.0, back.1 - offset.1),
    ]
}

pub fn write_output_svg(svg: &str, output: &Path) -> Result<(), DiagramError> {
    std::fs::write(output, svg)?;
    Ok(())
}

#[cfg(feature = "png")]
pub fn rasterize(svg: &str, fonts: &FontSet) -> Result<resvg::tiny_skia::Pixmap, DiagramError> {
    let mut opt = usvg::Options::default();
    opt.font_family = fonts.regular.family.clone();
    {
        let db = opt.fontdb_mut();
        db.load_system_fonts();
        for path in fonts.files() {
            if let Err(err) = db.load_font_file(path) {
                tracing::warn!(path = %path.display(), "failed to load font for rendering: {err}");
            }
        }
    }

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|err| DiagramError::Render(format!("invalid SVG document: {err}")))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| {
            DiagramError::Render(format!(
                "failed to allocate {}x{} pixmap",
                size.width(),
                size.height()
            ))
        })?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    Ok(pixmap)
}

/// Pixels per meter for the PNG `pHYs` chunk.
pub fn dpi_to_pixels_per_meter(dpi: u32) -> u32 {
    (dpi as f64 / 0.0254).round() as u32
}

/// RGB PNG carrying `dpi` as resolution metadata. Pixel size is untouched.
#[cfg(feature = "png")]
pub fn encode_png(pixmap: &resvg::tiny_skia::Pixmap, dpi: u32) -> Result<Vec<u8>, DiagramError> {
    let mut data = Vec::with_capacity(pixmap.width() as usize * pixmap.height() as usize * 3);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        data.extend_from_slice(&[color.red(), color.green(), color.blue()]);
    }

    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = dpi_to_pixels_per_meter(dpi);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));
    let encode_err =
        |err: png::EncodingError| DiagramError::Render(format!("PNG encoding failed: {err}"));
    let mut writer = encoder.write_header().map_err(encode_err)?;
    writer.write_image_data(&data).map_err(encode_err)?;
    writer.finish().map_err(encode_err)?;
    Ok(out)
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    dpi: u32,
    fonts: &FontSet,
) -> Result<(), DiagramError> {
    let pixmap = rasterize(svg, fonts)?;
    let bytes = encode_png(&pixmap, dpi)?;
    std::fs::write(output, bytes)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
