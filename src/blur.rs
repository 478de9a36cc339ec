// Separable low-pass filter used as the first stage of every tick.
// Visual: each call softens the canvas a little; on its own it would smear
// the pattern into flat gray after a few hundred ticks.

use crate::types::Frame;

/// 9-tap Gaussian weights, centre tap first. centre + 2 * rest == 1.
pub const WEIGHTS: [f32; 5] = [
    0.227_027_03,
    0.194_594_6,
    0.121_621_62,
    0.054_054_055,
    0.016_216_217,
];

/// Float working plane in [0,1]; scratch storage between passes.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl Plane {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, data: vec![0.0; width * height] }
    }

    pub fn from_frame(frame: &Frame) -> Self {
        let mut plane = Self::new(frame.width, frame.height);
        plane.load(frame);
        plane
    }

    /// Copy a frame in, reusing this plane's allocation.
    pub fn load(&mut self, frame: &Frame) {
        self.width = frame.width;
        self.height = frame.height;
        self.data.clear();
        self.data.extend(frame.pixels.iter().map(|&v| v as f32 / 255.0));
    }

    pub fn to_frame(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            pixels: self.data.iter().map(|&v| to_u8(v)).collect(),
        }
    }

    /// Snap every sample to the nearest 8-bit level, as if it had been
    /// written to an 8-bit texture and read back.
    pub fn quantize(&mut self) {
        for v in &mut self.data {
            *v = to_u8(*v) as f32 / 255.0;
        }
    }

    fn resize_like(&mut self, other: &Plane) {
        self.width = other.width;
        self.height = other.height;
        self.data.resize(other.width * other.height, 0.0);
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Sample along `axis` at a fractional offset from (x,y).
/// Linear between neighbours, clamped at the edges.
#[inline]
fn sample(src: &Plane, x: usize, y: usize, offset: f32, axis: Axis) -> f32 {
    let (pos, len) = match axis {
        Axis::Horizontal => (x as f32 + offset, src.width),
        Axis::Vertical => (y as f32 + offset, src.height),
    };
    let pos = pos.clamp(0.0, (len - 1) as f32);
    let i0 = pos.floor() as usize;
    let i1 = (i0 + 1).min(len - 1);
    let t = pos - i0 as f32;
    let (a, b) = match axis {
        Axis::Horizontal => (src.data[y * src.width + i0], src.data[y * src.width + i1]),
        Axis::Vertical => (src.data[i0 * src.width + x], src.data[i1 * src.width + x]),
    };
    a + (b - a) * t
}

/// One 1D convolution. Taps sit `spread` texels apart.
pub fn blur_pass(src: &Plane, dst: &mut Plane, spread: f32, axis: Axis) {
    dst.resize_like(src);
    if src.data.is_empty() {
        return;
    }
    for y in 0..src.height {
        for x in 0..src.width {
            let mut acc = WEIGHTS[0] * sample(src, x, y, 0.0, axis);
            for (k, &w) in WEIGHTS.iter().enumerate().skip(1) {
                let off = k as f32 * spread;
                acc += w * (sample(src, x, y, -off, axis) + sample(src, x, y, off, axis));
            }
            dst.data[y * src.width + x] = acc;
        }
    }
}

/// Horizontal pass into `tmp`, vertical pass from `tmp` into `dst`.
/// `src` is never written, so callers can ping-pong planes freely.
pub fn blur_plane(src: &Plane, tmp: &mut Plane, dst: &mut Plane, spread: f32) {
    blur_pass(src, tmp, spread, Axis::Horizontal);
    blur_pass(tmp, dst, spread, Axis::Vertical);
}

/// Two-pass separable blur of a whole frame.
pub fn blur(input: &Frame, spread: f32) -> Frame {
    let src = Plane::from_frame(input);
    let mut tmp = Plane::new(input.width, input.height);
    let mut dst = Plane::new(input.width, input.height);
    blur_plane(&src, &mut tmp, &mut dst, spread);
    dst.to_frame()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum = WEIGHTS[0] + 2.0 * WEIGHTS[1..].iter().sum::<f32>();
        assert!((sum - 1.0).abs() < 1e-5, "sum = {sum}");
    }

    #[test]
    fn constant_frame_is_unchanged() {
        let f = Frame::filled(12, 9, 173);
        assert_eq!(blur(&f, 1.0), f);
        assert_eq!(blur(&f, 2.7), f);
    }

    #[test]
    fn impulse_spreads_symmetrically() {
        let mut f = Frame::filled(11, 11, 0);
        f.put(5, 5, 255);
        let out = blur(&f, 1.0);
        let c = out.get(5, 5);
        assert!(c > 0 && c < 255);
        assert_eq!(out.get(4, 5), out.get(6, 5));
        assert_eq!(out.get(5, 4), out.get(5, 6));
        assert_eq!(out.get(4, 5), out.get(5, 4));
        assert!(out.get(4, 5) < c);
        assert!(out.get(3, 3) < out.get(4, 4));
    }

    #[test]
    fn wider_spread_reaches_further() {
        let mut f = Frame::filled(31, 1, 0);
        f.put(15, 0, 255);
        let narrow = blur(&f, 1.0);
        let wide = blur(&f, 3.0);
        // Taps at spread 1 stop at 4 texels.
        assert_eq!(narrow.get(22, 0), 0);
        assert!(wide.get(24, 0) > 0);
    }

    #[test]
    fn deterministic() {
        let f = Frame {
            width: 7,
            height: 5,
            pixels: (0..35).map(|i| (i * 37 % 256) as u8).collect(),
        };
        assert_eq!(blur(&f, 1.3), blur(&f, 1.3));
    }
}
