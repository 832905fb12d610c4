//! Tiny built-in 5x7 pixel font for on-map labels.
//!
//! Covers exactly the characters distance labels are made of. Each glyph is
//! seven rows top to bottom, five bits per row with the high bit on the left.

/// Horizontal advance from one character cell to the next, in pixels.
pub(crate) const ADVANCE: i32 = 6;

/// Height of a character cell in pixels.
pub(crate) const HEIGHT: i32 = 7;

/// Returns the bitmap for the given character, if it is in the set.
pub(crate) fn glyph(c: char) -> Option<&'static [u8; 7]> {
    match c {
        '0' => Some(&[0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
        '1' => Some(&[0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
        '2' => Some(&[0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
        '3' => Some(&[0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E]),
        '4' => Some(&[0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
        '5' => Some(&[0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
        '6' => Some(&[0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
        '7' => Some(&[0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
        '8' => Some(&[0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
        '9' => Some(&[0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
        'k' => Some(&[0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12]),
        'm' => Some(&[0x00, 0x00, 0x1A, 0x15, 0x15, 0x15, 0x15]),
        _ => None,
    }
}
