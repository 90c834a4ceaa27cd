// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page collection: the ordered page tree behind a single document, built on
// `lopdf`.
//
// Every structural change (dropping a page, moving a page, concatenating
// documents) produces a fresh `lopdf::Document` into which the surviving pages
// are copied. Source documents are never edited in place, so nothing can keep
// a reference to an object that has been removed.

use std::collections::HashMap;

use lopdf::content::Content;
use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};
use photopdf_core::error::{PhotoPdfError, Result};
use tracing::{debug, warn};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed page trees whose /Parent chain loops.
const MAX_TREE_DEPTH: usize = 64;

/// A rectangle in PDF user space (points), normalised so that `x0 <= x1` and
/// `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl PageBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    fn from_object(doc: &lopdf::Document, object: &Object) -> Option<Self> {
        let values = resolve(doc, object).as_array().ok()?;
        if values.len() != 4 {
            return None;
        }
        let mut coords = [0f32; 4];
        for (slot, value) in coords.iter_mut().zip(values) {
            *slot = resolve(doc, value).as_float().ok()?;
        }
        Some(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }
}

/// Where an image XObject lands on a page, in page space.
#[derive(Debug, Clone)]
pub struct ImagePlacement {
    /// Resource name used by the `Do` operator.
    pub name: Vec<u8>,
    /// The XObject stream's object id.
    pub object_id: ObjectId,
    /// Axis-aligned bounds of the transformed unit square.
    pub bounds: PageBox,
}

/// Borrowed view of one page inside a [`PageCollection`].
#[derive(Clone, Copy)]
pub struct Page<'a> {
    doc: &'a lopdf::Document,
    id: ObjectId,
    index: usize,
}

impl<'a> Page<'a> {
    /// Zero-based position in the owning collection.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The page's object id in the underlying document.
    pub fn object_id(&self) -> ObjectId {
        self.id
    }

    /// The page's /MediaBox, following inheritance through the page tree.
    pub fn media_box(&self) -> Option<PageBox> {
        inherited(self.doc, self.id, b"MediaBox").and_then(|obj| PageBox::from_object(self.doc, obj))
    }

    /// The visible region: /CropBox when present, otherwise /MediaBox.
    pub fn display_box(&self) -> Option<PageBox> {
        inherited(self.doc, self.id, b"CropBox")
            .and_then(|obj| PageBox::from_object(self.doc, obj))
            .or_else(|| self.media_box())
    }

    /// Decoded content stream bytes (all streams concatenated).
    pub fn content(&self) -> Vec<u8> {
        self.doc.get_page_content(self.id).unwrap_or_default()
    }

    /// Every image XObject drawn directly by the page's content stream, with
    /// the rectangle it covers.
    ///
    /// Tracks `q`/`Q`/`cm` so that the placement reflects the current
    /// transformation matrix at each `Do`. Form XObjects are not descended
    /// into.
    pub fn image_placements(&self) -> Vec<ImagePlacement> {
        let content = match Content::decode(&self.content()) {
            Ok(content) => content,
            Err(err) => {
                debug!(page = self.index, %err, "content stream did not decode");
                return Vec::new();
            }
        };
        let xobjects = self.xobjects();

        let mut placements = Vec::new();
        let mut stack: Vec<Matrix> = Vec::new();
        let mut ctm = Matrix::IDENTITY;

        for op in &content.operations {
            match op.operator.as_str() {
                "q" => stack.push(ctm),
                "Q" => ctm = stack.pop().unwrap_or(Matrix::IDENTITY),
                "cm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        ctm = m.concat(&ctm);
                    }
                }
                "Do" => {
                    let Some(name) = op.operands.first().and_then(|o| o.as_name().ok()) else {
                        continue;
                    };
                    let Some(&object_id) = xobjects.get(name) else {
                        continue;
                    };
                    if is_image_xobject(self.doc, object_id) {
                        placements.push(ImagePlacement {
                            name: name.to_vec(),
                            object_id,
                            bounds: ctm.unit_square_bounds(),
                        });
                    }
                }
                _ => {}
            }
        }

        placements
    }

    /// The document this page belongs to.
    pub fn document(&self) -> &'a lopdf::Document {
        self.doc
    }

    /// Map of XObject resource names to object ids.
    fn xobjects(&self) -> HashMap<Vec<u8>, ObjectId> {
        let mut map = HashMap::new();
        let Some(resources) = inherited(self.doc, self.id, b"Resources") else {
            return map;
        };
        let Ok(resources) = resolve(self.doc, resources).as_dict() else {
            return map;
        };
        let Ok(xobjects) = resources.get(b"XObject") else {
            return map;
        };
        let Ok(xobjects) = resolve(self.doc, xobjects).as_dict() else {
            return map;
        };
        for (name, value) in xobjects.iter() {
            if let Ok(id) = value.as_reference() {
                map.insert(name.clone(), id);
            }
        }
        map
    }
}

/// Ordered sequence of pages backing one document.
#[derive(Debug, Clone)]
pub struct PageCollection {
    doc: lopdf::Document,
}

impl Default for PageCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCollection {
    // -- Construction ---------------------------------------------------------

    /// An empty collection: a catalog and a page tree with no kids.
    pub fn new() -> Self {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0_i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        Self { doc }
    }

    /// Parse serialized PDF bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|err| PhotoPdfError::Decode(format!("failed to parse PDF: {err}")))?;
        // A document without a usable page tree is as good as undecodable.
        pages_root(&doc).map_err(|err| PhotoPdfError::Decode(err.to_string()))?;
        Ok(Self { doc })
    }

    /// Wrap an already-loaded `lopdf` document.
    pub fn from_lopdf(doc: lopdf::Document) -> Result<Self> {
        pages_root(&doc)?;
        Ok(Self { doc })
    }

    // -- Inspection -----------------------------------------------------------

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    pub fn is_empty(&self) -> bool {
        self.page_count() == 0
    }

    /// Page object ids in reading order.
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.doc.get_pages().into_values().collect()
    }

    /// The page at `index`, if it exists.
    pub fn page(&self, index: usize) -> Option<Page<'_>> {
        self.page_ids().get(index).map(|&id| Page {
            doc: &self.doc,
            id,
            index,
        })
    }

    /// All pages in order.
    pub fn pages(&self) -> Vec<Page<'_>> {
        self.page_ids()
            .into_iter()
            .enumerate()
            .map(|(index, id)| Page {
                doc: &self.doc,
                id,
                index,
            })
            .collect()
    }

    /// Borrow the underlying `lopdf` document.
    pub fn as_lopdf(&self) -> &lopdf::Document {
        &self.doc
    }

    // -- Structural operations ------------------------------------------------

    /// A new collection holding every page except the one at `index`, in the
    /// original relative order.
    pub fn without_page(&self, index: usize) -> Result<PageCollection> {
        let ids = self.page_ids();
        check_index(index, ids.len())?;
        let order: Vec<ObjectId> = ids
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, id)| *id)
            .collect();
        self.rebuilt(&order)
    }

    /// A new collection where the page at `from` now sits at `to`.
    pub fn with_page_moved(&self, from: usize, to: usize) -> Result<PageCollection> {
        let mut ids = self.page_ids();
        check_index(from, ids.len())?;
        check_index(to, ids.len())?;
        let page = ids.remove(from);
        ids.insert(to, page);
        self.rebuilt(&ids)
    }

    /// Append copies of every page of `other`, in order, to the end of this
    /// collection.
    pub fn append_all(&mut self, other: &PageCollection) -> Result<()> {
        let mut copier = PageCopier::new(&other.doc);
        let target_pages = pages_root(&self.doc)?;
        for page_id in other.page_ids() {
            copier.copy_page(&mut self.doc, target_pages, page_id)?;
        }
        debug!(
            appended = other.page_count(),
            total = self.page_count(),
            "pages appended"
        );
        Ok(())
    }

    /// Serialize to PDF bytes.
    ///
    /// Parsing and saving again is not byte-stable in general. Callers that
    /// need decode→serialize to return the input unchanged go through
    /// [`Document`](crate::pdf::document::Document), which keeps the bytes it
    /// was decoded from.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut doc = self.doc.clone();
        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|err| PhotoPdfError::Pdf(format!("failed to serialise PDF: {err}")))?;
        Ok(output)
    }

    /// Copy the pages listed in `order` into a brand-new collection, carrying
    /// the document information dictionary along.
    fn rebuilt(&self, order: &[ObjectId]) -> Result<PageCollection> {
        let mut target = PageCollection::new();
        target.doc.version = self.doc.version.clone();
        let target_pages = pages_root(&target.doc)?;

        let mut copier = PageCopier::new(&self.doc);
        for &page_id in order {
            copier.copy_page(&mut target.doc, target_pages, page_id)?;
        }

        if let Ok(info) = self.doc.trailer.get(b"Info") {
            let info = copier.copy_object(&mut target.doc, info)?;
            target.doc.trailer.set("Info", info);
        }

        Ok(target)
    }
}

fn check_index(index: usize, page_count: usize) -> Result<()> {
    if index >= page_count {
        return Err(PhotoPdfError::IndexOutOfRange { index, page_count });
    }
    Ok(())
}

/// Object id of the root /Pages node.
fn pages_root(doc: &lopdf::Document) -> Result<ObjectId> {
    let catalog = doc
        .catalog()
        .map_err(|err| PhotoPdfError::Pdf(format!("no catalog: {err}")))?;
    catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|err| PhotoPdfError::Pdf(format!("no /Pages reference: {err}")))
}

/// Follow a single level of indirection.
fn resolve<'a>(doc: &'a lopdf::Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        other => other,
    }
}

/// Look up `key` on a page, walking up /Parent links for inheritable keys.
fn inherited<'a>(doc: &'a lopdf::Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn is_image_xobject(doc: &lopdf::Document, id: ObjectId) -> bool {
    match doc.get_object(id) {
        Ok(Object::Stream(stream)) => stream
            .dict
            .get(b"Subtype")
            .and_then(Object::as_name)
            .map(|name| name == b"Image")
            .unwrap_or(false),
        _ => false,
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    match object {
        Object::Dictionary(dict) => dict
            .get(b"Type")
            .and_then(Object::as_name)
            .map(|name| name == b"Page" || name == b"Pages")
            .unwrap_or(false),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Page copying
// ---------------------------------------------------------------------------

/// Copies pages (and everything they reference) from one document into
/// another.
///
/// Each source object is copied at most once per copier, so resources shared
/// between pages stay shared in the target and reference cycles terminate.
struct PageCopier<'a> {
    source: &'a lopdf::Document,
    copied: HashMap<ObjectId, ObjectId>,
}

impl<'a> PageCopier<'a> {
    fn new(source: &'a lopdf::Document) -> Self {
        Self {
            source,
            copied: HashMap::new(),
        }
    }

    /// Copy one page and append it to the target's /Kids.
    fn copy_page(
        &mut self,
        target: &mut lopdf::Document,
        target_pages: ObjectId,
        page_id: ObjectId,
    ) -> Result<ObjectId> {
        let page = self.source.get_dictionary(page_id).map_err(|err| {
            PhotoPdfError::Pdf(format!("cannot read page object {page_id:?}: {err}"))
        })?;

        // Reserve the id first so that back-references (e.g. /P in
        // annotations) resolve to the copy instead of recursing.
        let new_id = target.new_object_id();
        self.copied.insert(page_id, new_id);

        let mut copy = Dictionary::new();
        for (key, value) in page.iter() {
            if key.as_slice() == b"Parent" {
                continue;
            }
            copy.set(key.clone(), self.copy_object(target, value)?);
        }
        // Inherited attributes would be lost once the page leaves its tree.
        for key in INHERITABLE_KEYS {
            if copy.has(key) {
                continue;
            }
            if let Some(value) = inherited(self.source, page_id, key) {
                copy.set(key.to_vec(), self.copy_object(target, value)?);
            }
        }
        copy.set("Parent", Object::Reference(target_pages));
        target.objects.insert(new_id, Object::Dictionary(copy));

        if let Ok(Object::Dictionary(pages)) = target.get_object_mut(target_pages) {
            if let Ok(Object::Array(kids)) = pages.get_mut(b"Kids") {
                kids.push(Object::Reference(new_id));
            }
            if let Ok(Object::Integer(count)) = pages.get_mut(b"Count") {
                *count += 1;
            }
        }

        Ok(new_id)
    }

    /// Deep-copy an object, remapping every reference into the target.
    fn copy_object(&mut self, target: &mut lopdf::Document, object: &Object) -> Result<Object> {
        match object {
            Object::Reference(id) => self.copy_reference(target, *id),
            Object::Dictionary(dict) => Ok(Object::Dictionary(self.copy_dictionary(target, dict)?)),
            Object::Array(items) => {
                let mut copy = Vec::with_capacity(items.len());
                for item in items {
                    copy.push(self.copy_object(target, item)?);
                }
                Ok(Object::Array(copy))
            }
            Object::Stream(stream) => {
                let dict = self.copy_dictionary(target, &stream.dict)?;
                Ok(Object::Stream(Stream::new(dict, stream.content.clone())))
            }
            other => Ok(other.clone()),
        }
    }

    fn copy_dictionary(&mut self, target: &mut lopdf::Document, dict: &Dictionary) -> Result<Dictionary> {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            if key.as_slice() == b"Parent" {
                continue;
            }
            copy.set(key.clone(), self.copy_object(target, value)?);
        }
        Ok(copy)
    }

    fn copy_reference(&mut self, target: &mut lopdf::Document, id: ObjectId) -> Result<Object> {
        if let Some(&mapped) = self.copied.get(&id) {
            return Ok(Object::Reference(mapped));
        }
        let referenced = match self.source.get_object(id) {
            Ok(object) => object,
            Err(err) => {
                warn!(?id, %err, "Cannot resolve reference, using Null");
                return Ok(Object::Null);
            }
        };
        // Pages reached through links (destinations, /P of foreign
        // annotations) are not part of the copy.
        if is_page_tree_node(referenced) {
            return Ok(Object::Null);
        }

        let new_id = target.new_object_id();
        self.copied.insert(id, new_id);
        let copy = self.copy_object(target, referenced)?;
        target.objects.insert(new_id, copy);
        Ok(Object::Reference(new_id))
    }
}

// ---------------------------------------------------------------------------
// Transformation matrices
// ---------------------------------------------------------------------------

/// A PDF transformation matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() != 6 {
            return None;
        }
        let mut v = [0f32; 6];
        for (slot, operand) in v.iter_mut().zip(operands) {
            *slot = operand.as_float().ok()?;
        }
        Some(Self {
            a: v[0],
            b: v[1],
            c: v[2],
            d: v[3],
            e: v[4],
            f: v[5],
        })
    }

    /// `self × other`, i.e. apply `self` first, then `other`.
    fn concat(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    fn unit_square_bounds(&self) -> PageBox {
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(1.0, 0.0),
            self.apply(0.0, 1.0),
            self.apply(1.0, 1.0),
        ];
        let xs = corners.iter().map(|(x, _)| *x);
        let ys = corners.iter().map(|(_, y)| *y);
        PageBox::new(
            xs.clone().fold(f32::INFINITY, f32::min),
            ys.clone().fold(f32::INFINITY, f32::min),
            xs.fold(f32::NEG_INFINITY, f32::max),
            ys.fold(f32::NEG_INFINITY, f32::max),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A collection whose page `i` has a /MediaBox `i + 1` hundred points wide
    /// and a content stream naming the page, so tests can tell pages apart.
    pub(crate) fn labelled_collection(count: usize) -> PageCollection {
        labelled_collection_from(0, count)
    }

    pub(crate) fn labelled_collection_from(first: usize, count: usize) -> PageCollection {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for label in first..first + count {
            let content = format!("BT /F1 12 Tf 10 10 Td (page {label}) Tj ET");
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(100 * (label as i64 + 1)),
                    Object::Integer(200),
                ],
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count as i64,
                "Resources" => resources_id,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        PageCollection::from_lopdf(doc).expect("valid page tree")
    }

    /// The label baked into each page's /MediaBox width.
    pub(crate) fn labels(collection: &PageCollection) -> Vec<usize> {
        collection
            .pages()
            .iter()
            .map(|page| {
                let width = page.media_box().expect("media box").width();
                (width / 100.0).round() as usize - 1
            })
            .collect()
    }

    #[test]
    fn new_collection_is_empty_and_serialises() {
        let pages = PageCollection::new();
        assert_eq!(pages.page_count(), 0);
        let bytes = pages.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(PageCollection::from_bytes(&bytes).unwrap().page_count(), 0);
    }

    #[test]
    fn garbage_does_not_decode() {
        let err = PageCollection::from_bytes(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PhotoPdfError::Decode(_)));
    }

    #[test]
    fn without_page_filters_in_order() {
        let pages = labelled_collection(4);
        let filtered = pages.without_page(1).unwrap();
        assert_eq!(labels(&filtered), vec![0, 2, 3]);
        // The source is untouched.
        assert_eq!(labels(&pages), vec![0, 1, 2, 3]);
    }

    #[test]
    fn without_page_rejects_out_of_range() {
        let pages = labelled_collection(2);
        match pages.without_page(2) {
            Err(PhotoPdfError::IndexOutOfRange { index, page_count }) => {
                assert_eq!(index, 2);
                assert_eq!(page_count, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn moved_page_lands_at_target_index() {
        let pages = labelled_collection(4);
        assert_eq!(labels(&pages.with_page_moved(0, 2).unwrap()), vec![1, 2, 0, 3]);
        assert_eq!(labels(&pages.with_page_moved(3, 0).unwrap()), vec![3, 0, 1, 2]);
    }

    #[test]
    fn copied_pages_keep_inherited_resources() {
        let pages = labelled_collection(2);
        let filtered = pages.without_page(0).unwrap();
        let page = filtered.page(0).unwrap();
        let resources = page.document().get_dictionary(page.object_id()).unwrap();
        assert!(resources.has(b"Resources"));
        assert!(page.content().starts_with(b"BT"));
    }

    #[test]
    fn append_all_concatenates() {
        let mut first = labelled_collection(2);
        let second = labelled_collection_from(5, 1);
        first.append_all(&second).unwrap();
        assert_eq!(labels(&first), vec![0, 1, 5]);
    }

    #[test]
    fn rebuilt_collection_survives_serialisation() {
        let pages = labelled_collection(3).without_page(2).unwrap();
        let bytes = pages.to_bytes().unwrap();
        let reloaded = PageCollection::from_bytes(&bytes).unwrap();
        assert_eq!(labels(&reloaded), vec![0, 1]);
    }

    #[test]
    fn matrix_places_scaled_image() {
        let ctm = Matrix {
            a: 50.0,
            b: 0.0,
            c: 0.0,
            d: 80.0,
            e: 10.0,
            f: 20.0,
        };
        let bounds = ctm.unit_square_bounds();
        assert_eq!(bounds, PageBox::new(10.0, 20.0, 60.0, 100.0));
    }

    #[test]
    fn concat_applies_left_operand_first() {
        let scale = Matrix {
            a: 2.0,
            d: 2.0,
            ..Matrix::IDENTITY
        };
        let translate = Matrix {
            e: 5.0,
            f: 7.0,
            ..Matrix::IDENTITY
        };
        let combined = scale.concat(&translate);
        assert_eq!(combined.apply(1.0, 1.0), (7.0, 9.0));
    }
}
