use crate::{
    layout::TextMeasurer,
    refs::{ObjectReferences, RefType},
    LabelError, Pt,
};
use ab_glyph::FontVec;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// Name under which the caption font is registered in PDF page resources
pub(crate) const PDF_FONT_NAME: &[u8] = b"F0";

/// A parsed TrueType or OpenType font used to measure and draw captions.
///
/// The font is parsed twice: once with [owned_ttf_parser] for metrics and PDF embedding,
/// and once with [ab_glyph] for rasterizing captions into PNG output. When written to a
/// PDF the whole font file is embedded, but only the widths and unicode mappings of the
/// glyphs the caption actually uses are written.
pub struct Font {
    pub face: OwnedFace,
    raster: FontVec,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LabelError> {
        let raster = FontVec::try_from_vec(bytes.clone())?;
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face, raster })
    }

    /// Load a font file from disk
    pub fn load_from_disk<P: AsRef<std::path::Path>>(path: P) -> Result<Font, LabelError> {
        Self::load(std::fs::read(path)?)
    }

    fn find_name(&self, name_id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The PostScript name of the font, if it has one
    pub fn postscript_name(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::POST_SCRIPT_NAME)
    }

    /// The family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FAMILY)
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph used for characters the font does not cover
    pub fn replacement_glyph_id(&self) -> u16 {
        self.glyph_id('\u{FFFD}')
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// The glyph drawn for `ch`, falling back to the replacement glyph
    pub fn glyph_id_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .unwrap_or_else(|| self.replacement_glyph_id())
    }

    fn advance(&self, gid: u16) -> u16 {
        self.face
            .as_face_ref()
            .glyph_hor_advance(GlyphId(gid))
            .unwrap_or_default()
    }

    /// The font as seen by the rasterizer
    pub(crate) fn raster(&self) -> &FontVec {
        &self.raster
    }

    /// Writes the font program, its descriptor, the CID font, and the Type0 font that
    /// pages refer to. `text` is every caption that will be drawn with the font.
    pub(crate) fn write(&self, refs: &mut ObjectReferences, text: &str, writer: &mut Pdf) {
        // <glyph id, character>
        let mut glyphs: BTreeMap<u16, char> = BTreeMap::new();
        for ch in text.chars() {
            glyphs.entry(self.glyph_id_or_replacement(ch)).or_insert(ch);
        }

        let font_id = refs.gen(RefType::Font);
        let cid_font_id = self.write_cid(refs, &glyphs, writer);
        let to_unicode_id = self.write_to_unicode(refs, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(PDF_FONT_NAME));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_cid(&self, refs: &mut ObjectReferences, glyphs: &BTreeMap<u16, char>, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, writer);

        let id = refs.gen(RefType::CidFont);
        let scaling = 1000.0 / self.face.as_face_ref().units_per_em() as f32;

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(PDF_FONT_NAME));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        // group consecutive glyph ids into runs
        let mut widths = cid_font.widths();
        let mut run: Option<(u16, Vec<f32>)> = None;
        for &gid in glyphs.keys() {
            let width = self.advance(gid) as f32 * scaling;
            match run.as_mut() {
                Some((start, ws)) if *start as usize + ws.len() == gid as usize => ws.push(width),
                _ => {
                    if let Some((start, ws)) = run.take() {
                        widths.consecutive(start, ws);
                    }
                    run = Some((gid, vec![width]));
                }
            }
        }
        if let Some((start, ws)) = run {
            widths.consecutive(start, ws);
        }
        widths.finish();

        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Ref {
        let face = self.face.as_face_ref();

        let font_data_id = refs.gen(RefType::FontData);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            self.face.as_slice(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(font_data_id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), self.face.as_slice().len() as i32);
        stream.finish();

        let id = refs.gen(RefType::FontDescriptor);
        let scaling = 1000.0 / face.units_per_em() as f32;
        let name = self.postscript_name().unwrap_or_else(|| "CaptionFont".to_string());

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));

        let mut flags: FontFlags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        // TODO: derive from the OS/2 weight class instead of a fixed stem width
        descriptor.stem_v(80.0);
        descriptor.font_file2(font_data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode);

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, &ch)| (gid, ch)).collect();
        for block in entries.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                let mut units = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|u| format!("{u:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{hex}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);

        id
    }
}

impl TextMeasurer for Font {
    /// Sum of the horizontal advances of each glyph; characters the font lacks are
    /// measured as the replacement glyph
    fn text_width(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .map(|ch| scaling * self.advance(self.glyph_id_or_replacement(ch)) as f32)
            .sum()
    }
}
