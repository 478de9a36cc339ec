// Core types shared by the pipeline, the overlay and the window.

/// One grayscale frame: 0 = black, 255 = white.
/// Visual: this is the canvas the pattern grows on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,    // texels per row
    pub height: usize,   // rows
    pub pixels: Vec<u8>, // length = width * height, row-major
}

impl Frame {
    /// A frame where every texel holds `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self { width, height, pixels: vec![value; width * height] }
    }

    /// Blank white canvas (what "clear" shows).
    pub fn white(width: usize, height: usize) -> Self {
        Self::filled(width, height, 255)
    }

    pub fn min_side(&self) -> usize {
        self.width.min(self.height)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Set a texel if (x,y) is inside bounds; silently ignores the rest.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, value: u8) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = value;
    }

    /// Expand gray texels into 0x00RRGGBB for minifb.
    pub fn to_screen(&self, out: &mut FrameBuffer) {
        if out.width != self.width || out.height != self.height {
            *out = FrameBuffer::new(self.width, self.height);
        }
        for (dst, &v) in out.pixels.iter_mut().zip(&self.pixels) {
            let v = v as u32;
            *dst = (v << 16) | (v << 8) | v;
        }
    }
}

/// What the window displays: each entry is 0x00RRGGBB.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Binary paint color used by the cursor and the text stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ink {
    White,
    Black,
}

impl Ink {
    pub fn value(self) -> u8 {
        match self {
            Ink::White => 255,
            Ink::Black => 0,
        }
    }

    pub fn inverted(self) -> Ink {
        match self {
            Ink::White => Ink::Black,
            Ink::Black => Ink::White,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Ink::White => "White",
            Ink::Black => "Black",
        }
    }
}

/// Typeface family requested for the text stamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FontVariant {
    #[default]
    Mincho,
    Gothic,
}

impl FontVariant {
    pub fn toggled(self) -> FontVariant {
        match self {
            FontVariant::Mincho => FontVariant::Gothic,
            FontVariant::Gothic => FontVariant::Mincho,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontVariant::Mincho => "Mincho",
            FontVariant::Gothic => "Gothic",
        }
    }
}
