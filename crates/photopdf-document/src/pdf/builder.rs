// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document builder: one page per image, using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. The output is decoded straight back into a
// `Document` so that later edits work on the same representation.

use image::DynamicImage;
use photopdf_core::config::AppConfig;
use photopdf_core::error::{PhotoPdfError, Result};
use photopdf_core::types::PageLayout;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::image::processor::ImageProcessor;
use crate::pdf::document::Document;

const DEFAULT_DPI: f32 = 150.0;
const PAPER_MARGIN_MM: f32 = 15.0;
const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

/// Creates documents from ordered lists of images.
pub struct DocumentBuilder {
    layout: PageLayout,
    /// Resolution images are embedded at.
    dpi: f32,
    /// Longest edge an embedded image may keep.
    max_image_dimension: u32,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(PageLayout::default())
    }
}

impl DocumentBuilder {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            dpi: DEFAULT_DPI,
            max_image_dimension: 0,
            title: None,
        }
    }

    /// A builder configured from the application settings.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut builder = Self::new(config.page_layout);
        builder.set_dpi(config.image_dpi);
        builder.set_max_image_dimension(config.max_image_dimension);
        builder
    }

    pub fn set_layout(&mut self, layout: PageLayout) {
        self.layout = layout;
    }

    /// Non-positive values fall back to 150 DPI.
    pub fn set_dpi(&mut self, dpi: f32) {
        self.dpi = if dpi > 0.0 { dpi } else { DEFAULT_DPI };
    }

    /// `0` disables downscaling.
    pub fn set_max_image_dimension(&mut self, max_dimension: u32) {
        self.max_image_dimension = max_dimension;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    // -- Building -------------------------------------------------------------

    /// Decode each encoded image (JPEG, PNG, ...) and build a document from
    /// them, in order.
    #[instrument(skip_all, fields(image_count = images.len()))]
    pub fn build_from_encoded<B: AsRef<[u8]>>(&self, images: &[B]) -> Result<Document> {
        if images.is_empty() {
            return Err(PhotoPdfError::EmptyInput);
        }
        let decoded = images
            .iter()
            .map(|bytes| ImageProcessor::from_bytes(bytes.as_ref()).map(ImageProcessor::into_dynamic))
            .collect::<Result<Vec<_>>>()?;
        self.build(decoded)
    }

    /// Build a document with one page per image; page `i` shows image `i`.
    #[instrument(skip_all, fields(image_count = images.len(), layout = ?self.layout))]
    pub fn build(&self, images: Vec<DynamicImage>) -> Result<Document> {
        if images.is_empty() {
            return Err(PhotoPdfError::EmptyInput);
        }
        let expected_pages = images.len();
        let title = self.title.as_deref().unwrap_or("PhotoPDF Document");
        info!(pages = expected_pages, title, "Building document from images");

        let mut doc = PdfDocument::new(title);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(expected_pages);

        for (index, image) in images.into_iter().enumerate() {
            let rgb = ImageProcessor::from_dynamic(image)
                .fit_within(self.max_image_dimension)
                .into_rgb8();
            let (width_px, height_px) = rgb.dimensions();
            if width_px == 0 || height_px == 0 {
                return Err(PhotoPdfError::Image(format!("image {index} has no pixels")));
            }

            let raw = RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width: width_px as usize,
                height: height_px as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let (page_w, page_h, transform) = self.place(width_px, height_px);
            debug!(index, width_px, height_px, page_w = page_w.0, page_h = page_h.0, "Image placed on page");
            pages.push(PdfPage::new(
                page_w,
                page_h,
                vec![Op::UseXobject {
                    id: xobject_id,
                    transform,
                }],
            ));
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings while saving");
        }

        let document = Document::from_bytes(&output)
            .map_err(|err| PhotoPdfError::Pdf(format!("generated PDF did not parse: {err}")))?;
        if document.page_count() != expected_pages {
            return Err(PhotoPdfError::Pdf(format!(
                "generated PDF has {} pages, expected {expected_pages}",
                document.page_count()
            )));
        }

        debug!(output_bytes = output.len(), "Document built");
        Ok(document)
    }

    /// Page size and image transform for an image of the given pixel size.
    fn place(&self, width_px: u32, height_px: u32) -> (Mm, Mm, XObjectTransform) {
        let img_w_pt = width_px as f32 / self.dpi * PT_PER_INCH;
        let img_h_pt = height_px as f32 / self.dpi * PT_PER_INCH;

        match self.layout {
            PageLayout::FitImage => {
                let page_w = Mm(width_px as f32 / self.dpi * MM_PER_INCH);
                let page_h = Mm(height_px as f32 / self.dpi * MM_PER_INCH);
                let transform = XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(0.0)),
                    scale_x: Some(1.0),
                    scale_y: Some(1.0),
                    dpi: Some(self.dpi),
                    rotate: None,
                };
                (page_w, page_h, transform)
            }
            PageLayout::Paper(paper) => {
                let (w_mm, h_mm) = paper.dimensions_mm();
                let (page_w, page_h) = (Mm(w_mm as f32), Mm(h_mm as f32));
                let usable_w_pt = Mm(page_w.0 - 2.0 * PAPER_MARGIN_MM).into_pt().0;
                let usable_h_pt = Mm(page_h.0 - 2.0 * PAPER_MARGIN_MM).into_pt().0;

                // Fit inside the margins; never upscale.
                let scale = (usable_w_pt / img_w_pt)
                    .min(usable_h_pt / img_h_pt)
                    .min(1.0);
                let rendered_w_pt = img_w_pt * scale;
                let rendered_h_pt = img_h_pt * scale;

                let margin_pt = Mm(PAPER_MARGIN_MM).into_pt().0;
                let transform = XObjectTransform {
                    translate_x: Some(Pt(margin_pt + (usable_w_pt - rendered_w_pt) / 2.0)),
                    translate_y: Some(Pt(margin_pt + (usable_h_pt - rendered_h_pt) / 2.0)),
                    scale_x: Some(scale),
                    scale_y: Some(scale),
                    dpi: Some(self.dpi),
                    rotate: None,
                };
                (page_w, page_h, transform)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use photopdf_core::types::PaperSize;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    fn builder_at_72_dpi() -> DocumentBuilder {
        let mut builder = DocumentBuilder::new(PageLayout::FitImage);
        builder.set_dpi(72.0);
        builder
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = DocumentBuilder::default().build(Vec::new());
        assert!(matches!(result, Err(PhotoPdfError::EmptyInput)));

        let encoded: Vec<Vec<u8>> = Vec::new();
        let result = DocumentBuilder::default().build_from_encoded(&encoded);
        assert!(matches!(result, Err(PhotoPdfError::EmptyInput)));
    }

    #[test]
    fn one_page_per_image_in_input_order() {
        let images = vec![
            solid(30, 40, [255, 0, 0]),
            solid(50, 40, [0, 255, 0]),
            solid(70, 40, [0, 0, 255]),
        ];
        let doc = builder_at_72_dpi().build(images).unwrap();
        assert_eq!(doc.page_count(), 3);

        // At 72 DPI one pixel is one point, so page widths identify the images.
        let widths: Vec<f32> = (0..3)
            .map(|i| doc.page(i).unwrap().media_box().unwrap().width())
            .collect();
        for (width, expected) in widths.iter().zip([30.0, 50.0, 70.0]) {
            assert!((width - expected).abs() < 0.5, "{widths:?}");
        }
    }

    #[test]
    fn built_document_is_serialized() {
        let doc = builder_at_72_dpi().build(vec![solid(10, 10, [9, 9, 9])]).unwrap();
        assert!(doc.is_serialized());
        assert!(doc.bytes().unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn paper_layout_uses_paper_size() {
        let builder = DocumentBuilder::new(PageLayout::Paper(PaperSize::A4));
        let doc = builder.build(vec![solid(20, 20, [1, 2, 3])]).unwrap();
        let media = doc.page(0).unwrap().media_box().unwrap();
        assert!((media.width() - Mm(210.0).into_pt().0).abs() < 1.0);
        assert!((media.height() - Mm(297.0).into_pt().0).abs() < 1.0);
    }

    #[test]
    fn undecodable_bytes_are_an_image_error() {
        let result = DocumentBuilder::default().build_from_encoded(&[b"nope".to_vec()]);
        assert!(matches!(result, Err(PhotoPdfError::Image(_))));
    }

    #[test]
    fn oversized_images_are_downscaled() {
        let mut builder = builder_at_72_dpi();
        builder.set_max_image_dimension(50);
        let doc = builder.build(vec![solid(200, 100, [0, 0, 0])]).unwrap();
        let media = doc.page(0).unwrap().media_box().unwrap();
        assert!((media.width() - 50.0).abs() < 0.5);
        assert!((media.height() - 25.0).abs() < 0.5);
    }
}
