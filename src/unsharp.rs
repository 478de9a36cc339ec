// Unsharp mask: the second stage of every tick.
// Visual: edges that the blur just softened come back harder than before.
// Repeating blur -> sharpen is what grows the branching, cellular pattern.

use crate::blur::{blur_plane, Plane};
use crate::types::Frame;

/// out = clamp(base + amount * (base - wide), 0, 1), per sample.
pub fn unsharp_combine(base: &Plane, wide: &Plane, amount: f32, out: &mut Plane) {
    out.width = base.width;
    out.height = base.height;
    out.data.clear();
    out.data.extend(
        base.data
            .iter()
            .zip(&wide.data)
            .map(|(&b, &w)| (b + amount * (b - w)).clamp(0.0, 1.0)),
    );
}

/// Amplify detail of `blurred` against a wider blur of itself.
/// `radius` is the tap spacing of the wide blur.
pub fn sharpen(blurred: &Frame, radius: f32, amount: f32) -> Frame {
    let base = Plane::from_frame(blurred);
    let mut tmp = Plane::new(blurred.width, blurred.height);
    let mut wide = Plane::new(blurred.width, blurred.height);
    blur_plane(&base, &mut tmp, &mut wide, radius);
    let mut out = Plane::new(blurred.width, blurred.height);
    unsharp_combine(&base, &wide, amount, &mut out);
    out.to_frame()
}
