// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Thumbnail renderer: rasterises a page into a fixed-size preview.
//
// Pages produced by this crate are made of image XObjects placed with
// `cm`/`Do`, so rendering composites those images onto a white page area.
// Vector content and text are not drawn.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageFormat, Rgba, RgbaImage, RgbImage};
use lopdf::{Object, Stream};
use photopdf_core::config::AppConfig;
use tracing::{debug, instrument};

use crate::image::processor::ImageProcessor;
use crate::pdf::document::Document;
use crate::pdf::pages::{ImagePlacement, PageBox};

const PAGE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BACKGROUND_COLOR: Rgba<u8> = Rgba([230, 230, 230, 255]);

/// Renders page previews of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailRenderer {
    width: u32,
    height: u32,
}

impl Default for ThumbnailRenderer {
    /// The 100×150 box used for stored document thumbnails.
    fn default() -> Self {
        Self::new(100, 150)
    }
}

impl ThumbnailRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Renderer for stored-record thumbnails.
    pub fn for_records(config: &AppConfig) -> Self {
        Self::new(config.thumbnail_width, config.thumbnail_height)
    }

    /// Renderer for the reader's page strip.
    pub fn for_page_strip(config: &AppConfig) -> Self {
        Self::new(config.page_preview_width, config.page_preview_height)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Render page `index` of `document`.
    ///
    /// The page is scaled by `min(tw / pw, th / ph)` and centred on a canvas of
    /// exactly the target size. Returns `None` when the index is out of range
    /// or the page has nothing this renderer can draw.
    #[instrument(skip(self, document), fields(size = ?self.size()))]
    pub fn render(&self, document: &Document, index: usize) -> Option<RgbaImage> {
        let page = document.page(index)?;
        let page_box = page.display_box()?;
        if page_box.width() <= 0.0 || page_box.height() <= 0.0 {
            return None;
        }

        let (tw, th) = (self.width as f32, self.height as f32);
        let scale = (tw / page_box.width()).min(th / page_box.height());
        let drawn_w = page_box.width() * scale;
        let drawn_h = page_box.height() * scale;
        let offset_x = (tw - drawn_w) / 2.0;
        let offset_y = (th - drawn_h) / 2.0;

        let mut canvas = RgbaImage::from_pixel(self.width, self.height, BACKGROUND_COLOR);
        fill_rect(
            &mut canvas,
            offset_x.round() as i64,
            offset_y.round() as i64,
            drawn_w.round() as u32,
            drawn_h.round() as u32,
            PAGE_COLOR,
        );

        let lopdf_doc = page.document();
        let mut drawn = 0usize;
        for placement in page.image_placements() {
            let Some(image) = decode_placement(lopdf_doc, &placement) else {
                continue;
            };
            let target = CanvasRect::map(&placement.bounds, &page_box, scale, offset_x, offset_y);
            let Some(visible) = target.clip(self.width, self.height) else {
                continue;
            };
            // Only the on-canvas part is resized; placements may be far
            // larger than the page.
            let (sx, sy, sw, sh) = visible.source_rect(&target, image.width(), image.height());
            let part = image.crop_imm(sx, sy, sw, sh).to_rgba8();
            let resized = imageops::resize(&part, visible.width, visible.height, FilterType::Triangle);
            imageops::overlay(&mut canvas, &resized, visible.left, visible.top);
            drawn += 1;
        }

        if drawn == 0 {
            debug!(index, "Nothing renderable on page");
            return None;
        }
        Some(canvas)
    }

    /// Render page `index` and encode it as PNG.
    pub fn render_png(&self, document: &Document, index: usize) -> Option<Vec<u8>> {
        let canvas = self.render(document, index)?;
        ImageProcessor::from_dynamic(DynamicImage::ImageRgba8(canvas))
            .to_png_bytes()
            .ok()
    }

    /// Previews for every page, in order. Pages that cannot be rendered yield
    /// `None` in their slot.
    pub fn render_all(&self, document: &Document) -> Vec<Option<RgbaImage>> {
        (0..document.page_count())
            .map(|index| self.render(document, index))
            .collect()
    }
}

/// Pixel rectangle in canvas coordinates. It may extend past the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CanvasRect {
    left: i64,
    top: i64,
    width: u32,
    height: u32,
}

impl CanvasRect {
    /// Page space has its origin bottom-left; the canvas top-left.
    fn map(bounds: &PageBox, page_box: &PageBox, scale: f32, offset_x: f32, offset_y: f32) -> Self {
        let left = offset_x + (bounds.x0 - page_box.x0) * scale;
        let top = offset_y + (page_box.y1 - bounds.y1) * scale;
        Self {
            left: left.round() as i64,
            top: top.round() as i64,
            width: (bounds.width() * scale).round().max(0.0) as u32,
            height: (bounds.height() * scale).round().max(0.0) as u32,
        }
    }

    fn right(&self) -> i64 {
        self.left + i64::from(self.width)
    }

    fn bottom(&self) -> i64 {
        self.top + i64::from(self.height)
    }

    /// The part of `self` inside a `width`×`height` canvas, or `None` when
    /// nothing of it is visible.
    fn clip(&self, width: u32, height: u32) -> Option<Self> {
        let left = self.left.max(0);
        let top = self.top.max(0);
        let right = self.right().min(i64::from(width));
        let bottom = self.bottom().min(i64::from(height));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self {
            left,
            top,
            width: u32::try_from(right - left).ok()?,
            height: u32::try_from(bottom - top).ok()?,
        })
    }

    /// Source pixels of an `image_w`×`image_h` image, stretched over `full`,
    /// that land inside `self`. Always at least one pixel each way.
    fn source_rect(&self, full: &CanvasRect, image_w: u32, image_h: u32) -> (u32, u32, u32, u32) {
        let span = |offset: i64, len: u32, full_len: u32, image_len: u32| {
            let per_pixel = f64::from(image_len) / f64::from(full_len.max(1));
            let start = ((offset as f64) * per_pixel).floor().clamp(0.0, f64::from(image_len - 1)) as u32;
            let end = ((offset + i64::from(len)) as f64 * per_pixel)
                .ceil()
                .clamp(f64::from(start + 1), f64::from(image_len)) as u32;
            (start, end - start)
        };
        let (x, w) = span(self.left - full.left, self.width, full.width, image_w.max(1));
        let (y, h) = span(self.top - full.top, self.height, full.height, image_h.max(1));
        (x, y, w, h)
    }
}

fn fill_rect(canvas: &mut RgbaImage, left: i64, top: i64, width: u32, height: u32, color: Rgba<u8>) {
    let block = RgbaImage::from_pixel(width.max(1), height.max(1), color);
    imageops::overlay(canvas, &block, left, top);
}

// ---------------------------------------------------------------------------
// Image XObject decoding
// ---------------------------------------------------------------------------

fn decode_placement(doc: &lopdf::Document, placement: &ImagePlacement) -> Option<DynamicImage> {
    match doc.get_object(placement.object_id) {
        Ok(Object::Stream(stream)) => decode_image_stream(doc, stream),
        _ => None,
    }
}

/// Decode an image XObject: DCT (JPEG) streams, or Flate/unfiltered 8-bit
/// Gray, RGB or CMYK samples.
fn decode_image_stream(doc: &lopdf::Document, stream: &Stream) -> Option<DynamicImage> {
    let filters = filter_names(doc, stream);
    if filters.iter().any(|f| f.as_slice() == b"DCTDecode") {
        if filters.len() != 1 {
            return None;
        }
        return image::load_from_memory_with_format(&stream.content, ImageFormat::Jpeg).ok();
    }

    let samples = match filters.as_slice() {
        [] => stream.content.clone(),
        [flate] if flate.as_slice() == b"FlateDecode" => stream.decompressed_content().ok()?,
        _ => return None,
    };

    let dict = &stream.dict;
    let width = dict_u32(doc, dict, b"Width")?;
    let height = dict_u32(doc, dict, b"Height")?;
    if dict_u32(doc, dict, b"BitsPerComponent").unwrap_or(8) != 8 {
        return None;
    }
    let components = color_components(doc, dict.get(b"ColorSpace").ok()?)?;

    let needed = width as usize * height as usize * components;
    if samples.len() < needed {
        return None;
    }
    let samples = samples[..needed].to_vec();

    match components {
        1 => GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
        4 => {
            let rgb: Vec<u8> = samples.chunks_exact(4).flat_map(cmyk_to_rgb).collect();
            RgbImage::from_raw(width, height, rgb).map(DynamicImage::ImageRgb8)
        }
        _ => None,
    }
}

fn filter_names(doc: &lopdf::Document, stream: &Stream) -> Vec<Vec<u8>> {
    let Ok(filter) = stream.dict.get(b"Filter") else {
        return Vec::new();
    };
    match deref(doc, filter) {
        Object::Name(name) => vec![name.clone()],
        Object::Array(items) => items
            .iter()
            .filter_map(|item| deref(doc, item).as_name().ok().map(<[u8]>::to_vec))
            .collect(),
        _ => Vec::new(),
    }
}

fn dict_u32(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<u32> {
    let value = deref(doc, dict.get(key).ok()?).as_i64().ok()?;
    u32::try_from(value).ok().filter(|v| *v > 0)
}

/// Number of colour components for the supported colour spaces.
fn color_components(doc: &lopdf::Document, space: &Object) -> Option<usize> {
    match deref(doc, space) {
        Object::Name(name) => match name.as_slice() {
            b"DeviceGray" | b"CalGray" | b"G" => Some(1),
            b"DeviceRGB" | b"CalRGB" | b"RGB" => Some(3),
            b"DeviceCMYK" | b"CMYK" => Some(4),
            _ => None,
        },
        Object::Array(items) => {
            let family = deref(doc, items.first()?).as_name().ok()?;
            match family {
                b"ICCBased" => match deref(doc, items.get(1)?) {
                    Object::Stream(profile) => {
                        let n = deref(doc, profile.dict.get(b"N").ok()?).as_i64().ok()?;
                        usize::try_from(n).ok()
                    }
                    _ => None,
                },
                b"CalGray" => Some(1),
                b"CalRGB" => Some(3),
                _ => None,
            }
        }
        _ => None,
    }
}

fn cmyk_to_rgb(px: &[u8]) -> [u8; 3] {
    let k = 255 - u16::from(px[3]);
    let channel = |c: u8| ((255 - u16::from(c)) * k / 255) as u8;
    [channel(px[0]), channel(px[1]), channel(px[2])]
}

fn deref<'a>(doc: &'a lopdf::Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::builder::DocumentBuilder;
    use crate::pdf::pages::PageCollection;
    use crate::pdf::pages::tests::labelled_collection;
    use image::Rgb;
    use lopdf::dictionary;
    use photopdf_core::types::PageLayout;

    fn close(actual: Rgba<u8>, expected: [u8; 3]) -> bool {
        actual.0[..3]
            .iter()
            .zip(expected)
            .all(|(a, e)| (i16::from(*a) - i16::from(e)).abs() <= 24)
    }

    fn built(images: Vec<DynamicImage>) -> Document {
        let mut builder = DocumentBuilder::new(PageLayout::FitImage);
        builder.set_dpi(72.0);
        builder.build(images).unwrap()
    }

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    /// A single page with an unfiltered RGB image filling it.
    fn handmade_image_page(color: [u8; 3]) -> Document {
        image_page_with_content(color, 4, b"q 200 0 0 300 0 0 cm /Im0 Do Q")
    }

    /// A 200x300 page drawing a solid `side`x`side` RGB image with `content`.
    fn image_page_with_content(color: [u8; 3], side: u32, content: &[u8]) -> Document {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let pixels: Vec<u8> = std::iter::repeat(color)
            .take((side * side) as usize)
            .flatten()
            .collect();
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(side),
                "Height" => i64::from(side),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
            },
            pixels,
        ));
        let content_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), content.to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(200), Object::Integer(300)],
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => dictionary! { "Im0" => image_id } },
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1_i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);
        Document::from_pages(PageCollection::from_lopdf(doc).unwrap())
    }

    #[test]
    fn output_has_exact_target_size() {
        let doc = built(vec![solid(40, 20, [200, 0, 0])]);
        let thumb = ThumbnailRenderer::new(100, 150).render(&doc, 0).unwrap();
        assert_eq!(thumb.dimensions(), (100, 150));
    }

    #[test]
    fn page_is_centred_with_background_bands() {
        // A 40x20 landscape page in a 100x150 box: 100x50 centred vertically.
        let doc = built(vec![solid(40, 20, [200, 0, 0])]);
        let thumb = ThumbnailRenderer::default().render(&doc, 0).unwrap();
        assert!(close(*thumb.get_pixel(50, 75), [200, 0, 0]));
        assert_eq!(*thumb.get_pixel(50, 5), BACKGROUND_COLOR);
        assert_eq!(*thumb.get_pixel(50, 145), BACKGROUND_COLOR);
    }

    #[test]
    fn unfiltered_rgb_image_renders() {
        let thumb = ThumbnailRenderer::new(20, 30)
            .render(&handmade_image_page([0, 0, 255]), 0)
            .unwrap();
        assert!(close(*thumb.get_pixel(10, 15), [0, 0, 255]));
    }

    #[test]
    fn oversized_placement_is_clipped_to_canvas() {
        let doc = image_page_with_content([0, 200, 0], 1, b"q 100000 0 0 100000 0 0 cm /Im0 Do Q");
        let thumb = ThumbnailRenderer::default().render(&doc, 0).unwrap();
        assert_eq!(thumb.dimensions(), (100, 150));
        assert!(close(*thumb.get_pixel(50, 75), [0, 200, 0]));
    }

    #[test]
    fn image_hanging_off_the_page_keeps_its_visible_half() {
        // A 400x300 placement starting 200pt left of the page.
        let page = image_page_with_content([255, 0, 0], 2, b"q 400 0 0 300 -200 0 cm /Im0 Do Q");
        let thumb = ThumbnailRenderer::new(20, 30).render(&page, 0).unwrap();
        assert!(close(*thumb.get_pixel(10, 15), [255, 0, 0]));
    }

    #[test]
    fn clip_keeps_only_the_visible_part() {
        let full = CanvasRect {
            left: -50,
            top: 10,
            width: 100,
            height: 1_000_000,
        };
        let visible = full.clip(100, 150).unwrap();
        assert_eq!(
            visible,
            CanvasRect {
                left: 0,
                top: 10,
                width: 50,
                height: 140,
            }
        );
        // A 10x10 image over `full`: the right half, a sliver from the top.
        assert_eq!(visible.source_rect(&full, 10, 10), (5, 0, 5, 1));

        let outside = CanvasRect {
            left: 200,
            top: 0,
            width: 10,
            height: 10,
        };
        assert!(outside.clip(100, 150).is_none());
    }

    #[test]
    fn each_page_renders_its_own_image() {
        let doc = built(vec![solid(30, 30, [250, 0, 0]), solid(30, 30, [0, 250, 0])]);
        let renderer = ThumbnailRenderer::new(60, 80);
        let first = renderer.render(&doc, 0).unwrap();
        let second = renderer.render(&doc, 1).unwrap();
        assert!(close(*first.get_pixel(30, 40), [250, 0, 0]));
        assert!(close(*second.get_pixel(30, 40), [0, 250, 0]));
    }

    #[test]
    fn invalid_index_yields_none() {
        let doc = built(vec![solid(10, 10, [0, 0, 0])]);
        assert!(ThumbnailRenderer::default().render(&doc, 1).is_none());
        assert!(ThumbnailRenderer::default().render_png(&doc, 5).is_none());
    }

    #[test]
    fn text_only_page_yields_none() {
        let doc = Document::from_pages(labelled_collection(1));
        assert!(ThumbnailRenderer::default().render(&doc, 0).is_none());
    }

    #[test]
    fn png_output_decodes() {
        let doc = built(vec![solid(10, 10, [10, 20, 30])]);
        let png = ThumbnailRenderer::default().render_png(&doc, 0).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 150));
    }

    #[test]
    fn render_all_covers_every_page() {
        let doc = built(vec![solid(10, 10, [1, 1, 1]), solid(10, 10, [2, 2, 2])]);
        let previews = ThumbnailRenderer::new(60, 80).render_all(&doc);
        assert_eq!(previews.len(), 2);
        assert!(previews.iter().all(Option::is_some));
    }

    #[test]
    fn cmyk_conversion() {
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 0]), [255, 255, 255]);
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 255]), [0, 0, 0]);
        assert_eq!(cmyk_to_rgb(&[255, 0, 0, 0]), [0, 255, 255]);
    }
}
