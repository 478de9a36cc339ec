// Text stamp: rasterize the text content twice into the frame, centred.
// Visual: an outlined caption appears in the middle of the canvas; the
// feedback loop then grows pattern out of its edges.

use std::sync::Arc;

use ab_glyph::{point, Font, FontArc, FontRef, FontVec, GlyphId, PxScale, ScaleFont};
use fontdb::{Database, Family, Query};
use tracing::debug;

use crate::draw::glyph5x7;
use crate::params::{TextParams, LINE_DELIMITER};
use crate::types::{FontVariant, Frame};

/// Preferred system families per variant, most specific first.
fn family_names(variant: FontVariant) -> &'static [&'static str] {
    match variant {
        FontVariant::Mincho => &["Hiragino Mincho ProN", "MS PMincho", "Noto Serif CJK JP"],
        FontVariant::Gothic => &["Hiragino Kaku Gothic ProN", "Meiryo", "Noto Sans CJK JP"],
    }
}

fn generic_family(variant: FontVariant) -> Family<'static> {
    match variant {
        FontVariant::Mincho => Family::Serif,
        FontVariant::Gothic => Family::SansSerif,
    }
}

fn load_face(db: &Database, variant: FontVariant) -> Option<FontArc> {
    let mut families: Vec<Family> = family_names(variant).iter().map(|&n| Family::Name(n)).collect();
    families.push(generic_family(variant));
    let id = db.query(&Query { families: &families, ..Query::default() })?;
    db.with_face_data(id, |data, index| {
        FontVec::try_from_vec_and_index(data.to_vec(), index)
            .ok()
            .map(FontArc::new)
    })?
}

/// Every visible character maps to a real glyph (not .notdef).
fn covers<F: Font>(font: &F, content: &str) -> bool {
    content
        .chars()
        .filter(|&c| c != LINE_DELIMITER && !c.is_whitespace())
        .all(|c| font.glyph_id(c).0 != 0)
}

/// First installed face that can draw all of `content`.
fn find_covering_face(db: &Database, content: &str) -> Option<FontArc> {
    db.faces().find_map(|face| {
        db.with_face_data(face.id, |data, index| {
            let font = FontRef::try_from_slice_and_index(data, index).ok()?;
            if !covers(&font, content) {
                return None;
            }
            FontVec::try_from_vec_and_index(data.to_vec(), index)
                .ok()
                .map(FontArc::new)
        })
        .flatten()
    })
}

/// Owns the resolved faces plus the installed-font database used when
/// neither variant can draw the content. With no outline face at all the
/// built-in 5x7 bitmap font is used.
#[derive(Clone, Default)]
pub struct TextRasterizer {
    mincho: Option<FontArc>,
    gothic: Option<FontArc>,
    installed: Option<Arc<Database>>,
}

impl TextRasterizer {
    /// Look both variants up among the installed system fonts.
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        Self::from_database(db)
    }

    /// Resolve both variants from an already populated font database.
    pub fn from_database(db: Database) -> Self {
        let mincho = load_face(&db, FontVariant::Mincho);
        let gothic = load_face(&db, FontVariant::Gothic);
        debug!(
            faces = db.len(),
            mincho = mincho.is_some(),
            gothic = gothic.is_some(),
            "resolved text faces"
        );
        Self { mincho, gothic, installed: Some(Arc::new(db)) }
    }

    /// No outline fonts at all; every stamp uses the bitmap face.
    pub fn bitmap_only() -> Self {
        Self::default()
    }

    /// The requested variant if it covers the content, then the other
    /// variant, then any installed face that does.
    fn face_for(&self, text: &TextParams) -> Option<FontArc> {
        let (own, other) = match text.font {
            FontVariant::Mincho => (&self.mincho, &self.gothic),
            FontVariant::Gothic => (&self.gothic, &self.mincho),
        };
        let content = text.content.as_str();
        if let Some(font) = [own, other].into_iter().flatten().find(|f| covers(*f, content)) {
            return Some(font.clone());
        }
        let found = self.installed.as_deref().and_then(|db| find_covering_face(db, content));
        if found.is_none() {
            debug!(content, "no installed face covers the text, using the bitmap face");
        }
        found
    }

    /// Which texels the glyphs themselves cover (before any stroke).
    pub fn coverage(&self, text: &TextParams, width: usize, height: usize) -> Vec<bool> {
        let mut mask = vec![false; width * height];
        let lines = text.lines();
        match self.face_for(text) {
            Some(font) => cover_outline(&font, &lines, text.size, width, height, &mut mask),
            None => cover_bitmap(&lines, text.size, width, height, &mut mask),
        }
        mask
    }

    /// Outline pass in the stroke ink, then fill pass in the fill ink.
    /// Only text texels are written.
    pub fn stamp(&self, frame: &mut Frame, text: &TextParams) {
        let mask = self.coverage(text, frame.width, frame.height);
        paint_dilated(frame, &mask, text.outline_weight * 0.5, text.stroke.value());
        paint_dilated(frame, &mask, text.weight * 0.5, text.fill.value());
    }
}

/// Baseline-to-baseline distance for a given text size.
fn line_pitch(size: f32) -> f32 {
    size * 0.5
}

/// Vertical centre of line `i` out of `n`, block centred on the canvas.
fn line_center_y(i: usize, n: usize, height: usize, pitch: f32) -> f32 {
    height as f32 * 0.5 + (i as f32 - (n as f32 - 1.0) * 0.5) * pitch
}

fn cover_outline(font: &FontArc, lines: &[&str], size: f32, width: usize, height: usize, mask: &mut [bool]) {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let (ascent, descent) = (scaled.ascent(), scaled.descent());

    for (i, line) in lines.iter().enumerate() {
        // Lay the line out from x = 0, then shift it to centre.
        let mut caret = 0.0f32;
        let mut placed: Vec<(GlyphId, f32)> = Vec::new();
        let mut prev: Option<GlyphId> = None;
        for ch in line.chars() {
            let id = font.glyph_id(ch);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            placed.push((id, caret));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }

        let left = width as f32 * 0.5 - caret * 0.5;
        let baseline = line_center_y(i, lines.len(), height, line_pitch(size)) + (ascent + descent) * 0.5;
        for (id, gx) in placed {
            let glyph = id.with_scale_and_position(scale, point(left + gx, baseline));
            let Some(outlined) = font.outline_glyph(glyph) else { continue };
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, c| {
                if c < 0.5 {
                    return;
                }
                let x = bounds.min.x as i32 + px as i32;
                let y = bounds.min.y as i32 + py as i32;
                if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                    mask[y as usize * width + x as usize] = true;
                }
            });
        }
    }
}

/// 5x7 glyphs blown up so one line is roughly `size` texels tall.
fn cover_bitmap(lines: &[&str], size: f32, width: usize, height: usize, mask: &mut [bool]) {
    let dot = (size / 8.0).max(1.0); // texels per glyph dot
    for (i, line) in lines.iter().enumerate() {
        let chars = line.chars().count();
        if chars == 0 {
            continue;
        }
        let line_w = (chars * 6 - 1) as f32 * dot; // 5 dots + 1 gap per glyph
        let left = width as f32 * 0.5 - line_w * 0.5;
        let top = line_center_y(i, lines.len(), height, line_pitch(size)) - 3.5 * dot;
        for (ci, ch) in line.chars().enumerate() {
            let Some(rows) = glyph5x7(ch) else { continue };
            for (ry, bits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if bits & (1 << (4 - rx)) == 0 {
                        continue;
                    }
                    let x0 = left + (ci * 6 + rx) as f32 * dot;
                    let y0 = top + ry as f32 * dot;
                    fill_rect(mask, width, height, x0, y0, dot);
                }
            }
        }
    }
}

/// Mark texels whose centres fall in [x0, x0+side) x [y0, y0+side).
fn fill_rect(mask: &mut [bool], width: usize, height: usize, x0: f32, y0: f32, side: f32) {
    let xs = (x0 - 0.5).ceil().max(0.0) as usize;
    let ys = (y0 - 0.5).ceil().max(0.0) as usize;
    for y in ys..height {
        if y as f32 + 0.5 >= y0 + side {
            break;
        }
        for x in xs..width {
            if x as f32 + 0.5 >= x0 + side {
                break;
            }
            mask[y * width + x] = true;
        }
    }
}

fn is_edge(mask: &[bool], width: usize, height: usize, x: usize, y: usize) -> bool {
    x == 0
        || y == 0
        || x + 1 == width
        || y + 1 == height
        || !mask[y * width + x - 1]
        || !mask[y * width + x + 1]
        || !mask[(y - 1) * width + x]
        || !mask[(y + 1) * width + x]
}

/// Paint the mask grown by `radius` texels (a stroke of width 2*radius
/// centred on the glyph outline, plus the glyph body).
fn paint_dilated(frame: &mut Frame, mask: &[bool], radius: f32, value: u8) {
    let (w, h) = (frame.width, frame.height);
    let reach = radius.floor() as i32;
    let r2 = radius * radius;
    let mut offsets = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if (dx * dx + dy * dy) as f32 <= r2 {
                offsets.push((dx, dy));
            }
        }
    }

    for y in 0..h {
        for x in 0..w {
            if !mask[y * w + x] {
                continue;
            }
            if reach > 0 && is_edge(mask, w, h, x, y) {
                for &(dx, dy) in &offsets {
                    frame.put(x as i32 + dx, y as i32 + dy, value);
                }
            } else {
                frame.pixels[y * w + x] = value;
            }
        }
    }
}
