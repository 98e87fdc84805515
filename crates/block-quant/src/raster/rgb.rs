//! 8-bit RGB pixel type.

/// A pixel with three 8-bit channels.
///
/// # Example
/// ```
/// use block_quant::Rgb;
/// let grey = Rgb::new(128, 128, 128);
/// assert_eq!(grey.to_bytes(), [128, 128, 128]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Pure black, the value of every pixel in a freshly allocated raster.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a pixel from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a pixel from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    #[inline]
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgb> for [u8; 3] {
    #[inline]
    fn from(color: Rgb) -> Self {
        color.to_bytes()
    }
}
