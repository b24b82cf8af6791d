use multidim_core::{InitError, Initializer, Result, build};
use multidim_derive::Nest;

/// An 8-bit RGB pixel, usable as the leaf of an image grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Nest)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Rec. 601 luma in `0.0..=255.0`.
    pub fn luma(&self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }
}

/// A `height x width` image, red rising left to right and green top to bottom.
pub fn gradient(height: usize, width: usize) -> Result<Vec<Vec<Pixel>>> {
    let dims = [
        isize::try_from(height).map_err(|_| InitError::Overflow)?,
        isize::try_from(width).map_err(|_| InitError::Overflow)?,
    ];
    build(
        Initializer::indexed(|c| {
            Pixel::new(ramp(c[1], width), ramp(c[0], height), 0x80)
        }),
        &dims,
    )
}

fn ramp(at: usize, len: usize) -> u8 {
    if len <= 1 {
        return 0;
    }
    (at * 255 / (len - 1)) as u8
}
