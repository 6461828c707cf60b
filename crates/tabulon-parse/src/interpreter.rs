//! Content-stream interpreter.
//!
//! Walks a page's decoded operations, maintains graphics and text state,
//! and emits positioned glyph records plus raw path-painting events to a
//! [`ContentSink`]. Glyphs arrive in top-left page coordinates; path events
//! are forwarded in user space together with the CTM manipulations, so the
//! receiving side owns transform handling for geometry.

use std::collections::HashMap;
use std::rc::Rc;

use lopdf::content::Content;
use tabulon_core::{Ctm, PathEvent, Point};

use crate::error::ParseError;
use crate::fonts::{as_number, resolve_ref, Font};

/// Fraction of the font size above the baseline used for the glyph box.
const ASCENT_RATIO: f64 = 0.8;

/// A positioned character record in top-left page coordinates.
#[derive(Debug, Clone)]
pub struct GlyphEvent {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub font_name: String,
    pub font_size: f64,
    pub width_of_space: f64,
}

/// Receives interpreter output: glyph records and path-painting events.
pub trait ContentSink {
    fn on_glyph(&mut self, glyph: GlyphEvent);
    fn on_path(&mut self, event: PathEvent);
}

/// Vertical span of the media box, for device → top-left projection.
#[derive(Debug, Clone, Copy)]
pub struct PageFrame {
    /// Media box left edge in device space.
    pub left: f64,
    /// Media box top edge in device space (`ury`, or `lly` when inverted).
    pub top: f64,
    /// Whether the media box has inverted y (lly above ury).
    pub y_inverted: bool,
}

impl PageFrame {
    fn project(&self, p: Point) -> Point {
        let y = if self.y_inverted {
            p.y - self.top
        } else {
            self.top - p.y
        };
        Point::new(p.x - self.left, y)
    }
}

struct TextState {
    tm: Ctm,
    tlm: Ctm,
    leading: f64,
    char_spacing: f64,
    word_spacing: f64,
    h_scale: f64,
    font: Option<Rc<Font>>,
    font_size: f64,
}

impl TextState {
    fn new() -> Self {
        Self {
            tm: Ctm::identity(),
            tlm: Ctm::identity(),
            leading: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scale: 1.0,
            font: None,
            font_size: 0.0,
        }
    }

    fn move_text(&mut self, tx: f64, ty: f64) {
        self.tlm = Ctm::new(1.0, 0.0, 0.0, 1.0, tx, ty).concat(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        self.move_text(0.0, -self.leading);
    }
}

/// Interpret a page's content operations, emitting to `sink`.
pub fn interpret(
    doc: &lopdf::Document,
    content: &[u8],
    resources: Option<&lopdf::Dictionary>,
    frame: PageFrame,
    sink: &mut dyn ContentSink,
) -> Result<(), ParseError> {
    let content = Content::decode(content).map_err(ParseError::malformed)?;

    let mut ctm = Ctm::identity();
    let mut ctm_stack: Vec<Ctm> = Vec::new();
    let mut text = TextState::new();
    let mut font_cache: HashMap<String, Rc<Font>> = HashMap::new();

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            // --- Graphics state ---
            "q" => {
                ctm_stack.push(ctm);
                sink.on_path(PathEvent::Save);
            }
            "Q" => {
                if let Some(m) = ctm_stack.pop() {
                    ctm = m;
                }
                sink.on_path(PathEvent::Restore);
            }
            "cm" => {
                if let Some(m) = matrix_operand(operands) {
                    ctm = m.concat(&ctm);
                    sink.on_path(PathEvent::Concat(m));
                }
            }

            // --- Path construction ---
            "m" => {
                if let [x, y] = numbers(operands, 2)[..] {
                    sink.on_path(PathEvent::BeginSubpath { x, y });
                }
            }
            "l" => {
                if let [x, y] = numbers(operands, 2)[..] {
                    sink.on_path(PathEvent::AppendLine { x, y });
                }
            }
            // Curves: chord to the endpoint; axis-aligned chords can still
            // act as rulings, the rest are dropped as oblique downstream.
            "c" => {
                if let [.., x, y] = numbers(operands, 6)[..] {
                    sink.on_path(PathEvent::AppendLine { x, y });
                }
            }
            "v" | "y" => {
                if let [.., x, y] = numbers(operands, 4)[..] {
                    sink.on_path(PathEvent::AppendLine { x, y });
                }
            }
            "re" => {
                if let [x, y, w, h] = numbers(operands, 4)[..] {
                    sink.on_path(PathEvent::AppendRectangle { x, y, w, h });
                }
            }
            "h" => sink.on_path(PathEvent::ClosePath),

            // --- Path painting ---
            "S" => sink.on_path(PathEvent::Stroke),
            "s" => sink.on_path(PathEvent::CloseAndStroke),
            "f" | "F" => sink.on_path(PathEvent::FillNonzero),
            "f*" => sink.on_path(PathEvent::FillEvenOdd),
            // Fill-and-stroke paints: the stroked outline already yields
            // every ruling the fill would.
            "B" | "B*" => sink.on_path(PathEvent::Stroke),
            "b" | "b*" => sink.on_path(PathEvent::CloseAndStroke),
            "n" => sink.on_path(PathEvent::EndPath),

            // --- Text state ---
            "BT" => {
                text.tm = Ctm::identity();
                text.tlm = Ctm::identity();
            }
            "ET" => {}
            "Tf" => {
                if operands.len() >= 2 {
                    let key = operands[0]
                        .as_name()
                        .map(|n| String::from_utf8_lossy(n).into_owned())
                        .unwrap_or_default();
                    text.font_size = as_number(&operands[1]).unwrap_or(0.0);
                    let font = font_cache
                        .entry(key.clone())
                        .or_insert_with(|| Rc::new(load_font(doc, resources, &key)));
                    text.font = Some(Rc::clone(font));
                }
            }
            "Td" => {
                if let [tx, ty] = numbers(operands, 2)[..] {
                    text.move_text(tx, ty);
                }
            }
            "TD" => {
                if let [tx, ty] = numbers(operands, 2)[..] {
                    text.leading = -ty;
                    text.move_text(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = matrix_operand(operands) {
                    text.tlm = m;
                    text.tm = m;
                }
            }
            "T*" => text.next_line(),
            "TL" => {
                if let [v] = numbers(operands, 1)[..] {
                    text.leading = v;
                }
            }
            "Tc" => {
                if let [v] = numbers(operands, 1)[..] {
                    text.char_spacing = v;
                }
            }
            "Tw" => {
                if let [v] = numbers(operands, 1)[..] {
                    text.word_spacing = v;
                }
            }
            "Tz" => {
                if let [v] = numbers(operands, 1)[..] {
                    text.h_scale = v / 100.0;
                }
            }

            // --- Text showing ---
            "Tj" => {
                if let Some(bytes) = string_operand(operands.first()) {
                    show_string(&mut text, &ctm, frame, bytes, sink);
                }
            }
            "'" => {
                text.next_line();
                if let Some(bytes) = string_operand(operands.first()) {
                    show_string(&mut text, &ctm, frame, bytes, sink);
                }
            }
            "\"" => {
                if operands.len() >= 3 {
                    if let Some(aw) = as_number(&operands[0]) {
                        text.word_spacing = aw;
                    }
                    if let Some(ac) = as_number(&operands[1]) {
                        text.char_spacing = ac;
                    }
                    text.next_line();
                    if let Some(bytes) = string_operand(operands.get(2)) {
                        show_string(&mut text, &ctm, frame, bytes, sink);
                    }
                }
            }
            "TJ" => {
                if let Some(lopdf::Object::Array(items)) = operands.first() {
                    for item in items {
                        match item {
                            lopdf::Object::String(bytes, _) => {
                                show_string(&mut text, &ctm, frame, bytes, sink);
                            }
                            other => {
                                if let Some(adj) = as_number(other) {
                                    let tx =
                                        -adj / 1000.0 * text.font_size * text.h_scale;
                                    text.tm =
                                        Ctm::new(1.0, 0.0, 0.0, 1.0, tx, 0.0).concat(&text.tm);
                                }
                            }
                        }
                    }
                }
            }

            // Remaining operators (color, clipping, XObjects, marked
            // content) do not affect table geometry.
            _ => {}
        }
    }
    Ok(())
}

/// Render one show-string: emit a glyph event per code and advance the
/// text matrix.
fn show_string(
    text: &mut TextState,
    ctm: &Ctm,
    frame: PageFrame,
    bytes: &[u8],
    sink: &mut dyn ContentSink,
) {
    let font = match &text.font {
        Some(f) => Rc::clone(f),
        None => return,
    };
    let fs = text.font_size;
    let th = text.h_scale;

    for (code, glyph_text) in font.decode(bytes) {
        let advance_ts = font.width(code) / 1000.0 * fs * th;
        let total = text.tm.concat(ctm);

        if !glyph_text.is_empty() {
            let origin = total.transform_point(Point::new(0.0, 0.0));
            let end = total.transform_point(Point::new(advance_ts, 0.0));
            let ascent = total.transform_point(Point::new(0.0, fs * ASCENT_RATIO));
            let cap = total.transform_point(Point::new(0.0, fs));

            let origin_page = frame.project(origin);
            let top_page = frame.project(ascent);
            let height = (frame.project(cap).y - origin_page.y).abs();
            let width = (end.x - origin.x).abs();

            let space_ts = font.space_width() / 1000.0 * fs * th;
            let space_end = total.transform_point(Point::new(space_ts, 0.0));
            let width_of_space = (space_end.x - origin.x).abs();

            sink.on_glyph(GlyphEvent {
                top: top_page.y.min(origin_page.y),
                left: origin_page.x.min(frame.project(end).x),
                width,
                height,
                text: glyph_text,
                font_name: font.name.clone(),
                font_size: fs,
                width_of_space,
            });
        }

        let mut tx = advance_ts + text.char_spacing * th;
        if code == 32 {
            tx += text.word_spacing * th;
        }
        text.tm = Ctm::new(1.0, 0.0, 0.0, 1.0, tx, 0.0).concat(&text.tm);
    }
}

fn load_font(
    doc: &lopdf::Document,
    resources: Option<&lopdf::Dictionary>,
    key: &str,
) -> Font {
    let dict = resources
        .and_then(|r| r.get(b"Font").ok())
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
        .and_then(|fonts| fonts.get(key.as_bytes()).ok())
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok());

    match dict {
        Some(d) => Font::load(doc, d, key),
        None => Font::fallback(key),
    }
}

fn numbers(operands: &[lopdf::Object], want: usize) -> Vec<f64> {
    if operands.len() < want {
        return Vec::new();
    }
    let values: Vec<f64> = operands.iter().take(want).filter_map(as_number).collect();
    if values.len() == want {
        values
    } else {
        Vec::new()
    }
}

fn matrix_operand(operands: &[lopdf::Object]) -> Option<Ctm> {
    match numbers(operands, 6)[..] {
        [a, b, c, d, e, f] => Some(Ctm::new(a, b, c, d, e, f)),
        _ => None,
    }
}

fn string_operand(obj: Option<&lopdf::Object>) -> Option<&[u8]> {
    match obj {
        Some(lopdf::Object::String(bytes, _)) => Some(bytes),
        _ => None,
    }
}
