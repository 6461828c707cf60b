//! Cohen-Sutherland clipping of rulings against a rectangle.
//!
//! Used when cropping a page to an area: surviving ruling portions are kept,
//! fully-outside rulings are dropped. Oblique rulings are filtered before
//! they reach this module.

use crate::geometry::Rect;
use crate::ruling::Ruling;

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn region_code(x: f64, y: f64, rect: &Rect) -> u8 {
    let mut code = INSIDE;
    if x < rect.left {
        code |= LEFT;
    } else if x > rect.right() {
        code |= RIGHT;
    }
    if y > rect.bottom() {
        code |= BOTTOM;
    } else if y < rect.top {
        code |= TOP;
    }
    code
}

/// Clip a ruling to a rectangle.
///
/// Returns the surviving segment, or `None` when the ruling lies entirely
/// outside. Both endpoints inside yields the input unchanged.
pub fn clip_ruling(ruling: &Ruling, rect: &Rect) -> Option<Ruling> {
    let (mut x1, mut y1, mut x2, mut y2) = (ruling.x1, ruling.y1, ruling.x2, ruling.y2);
    let mut code1 = region_code(x1, y1, rect);
    let mut code2 = region_code(x2, y2, rect);

    loop {
        if code1 == INSIDE && code2 == INSIDE {
            return Some(Ruling::new(x1, y1, x2, y2));
        }
        if code1 & code2 != 0 {
            return None;
        }

        // Pick an endpoint that is outside and move it to the first
        // violated edge, testing bottom, top, right, left in that order.
        let outside = if code1 != INSIDE { code1 } else { code2 };
        let (x, y);
        if outside & BOTTOM != 0 {
            x = x1 + (x2 - x1) * (rect.bottom() - y1) / (y2 - y1);
            y = rect.bottom();
        } else if outside & TOP != 0 {
            x = x1 + (x2 - x1) * (rect.top - y1) / (y2 - y1);
            y = rect.top;
        } else if outside & RIGHT != 0 {
            y = y1 + (y2 - y1) * (rect.right() - x1) / (x2 - x1);
            x = rect.right();
        } else {
            y = y1 + (y2 - y1) * (rect.left - x1) / (x2 - x1);
            x = rect.left;
        }

        if outside == code1 {
            x1 = x;
            y1 = y;
            code1 = region_code(x1, y1, rect);
        } else {
            x2 = x;
            y2 = y;
            code2 = region_code(x2, y2, rect);
        }
    }
}
