//! Packed ARGB8888 color helpers.

/// Opaque black, the initial value of every color buffer.
pub const BLACK: u32 = 0xFF00_0000;

/// Convert a channel in `[0, 1]` to its 8-bit value.
///
/// Rounds to nearest. Values outside `[0, 1]` saturate at 0 or 255 and NaN
/// maps to 0 (the float-to-int cast saturates).
#[inline]
pub fn channel_to_u8(value: f32) -> u8 {
    (value * 255.0).round() as u8
}

/// Pack an RGB triple in `[0, 1]` into an opaque ARGB8888 pixel.
#[inline]
pub fn pack_rgb(rgb: [f32; 3]) -> u32 {
    let r = channel_to_u8(rgb[0]) as u32;
    let g = channel_to_u8(rgb[1]) as u32;
    let b = channel_to_u8(rgb[2]) as u32;
    0xFF00_0000 | (r << 16) | (g << 8) | b
}

/// Split a packed pixel into its 8-bit `[r, g, b]` channels.
#[inline]
pub fn unpack_rgb(color: u32) -> [u8; 3] {
    [
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    ]
}
