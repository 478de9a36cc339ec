// Direct frame edits that bypass the pipeline. The feedback loop picks
// them up on the next tick and grows pattern out of them.

use rand::Rng;

use crate::draw::{edge_band, fill_disc};
use crate::input::Pointer;
use crate::types::{Frame, Ink};

/// Width of the white border band: a min_side/24 stroke centred on the
/// canvas edge, so half of it lands on the canvas.
pub fn border_width(frame: &Frame) -> usize {
    ((frame.min_side() as f32 / 48.0).ceil() as usize).max(1)
}

/// Redrawn every tick so the loop cannot eat into the canvas edge.
pub fn draw_border(frame: &mut Frame) {
    let width = border_width(frame);
    edge_band(frame, width, Ink::White.value());
}

/// Dab at the pointer while the button is held; does nothing otherwise.
pub fn stamp_cursor(frame: &mut Frame, pointer: &Pointer, diameter: f32, ink: Ink) {
    if pointer.pressed {
        fill_disc(frame, pointer.x, pointer.y, diameter, ink.value());
    }
}

/// `count` black discs at uniform random centres inside the canvas.
/// Returns the centres used.
pub fn seed_random_points<R: Rng + ?Sized>(
    frame: &mut Frame,
    rng: &mut R,
    count: u32,
    diameter: f32,
) -> Vec<(f32, f32)> {
    let (w, h) = (frame.width as f32, frame.height as f32);
    let mut centres = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let x = rng.random_range(0.0..w);
        let y = rng.random_range(0.0..h);
        fill_disc(frame, x, y, diameter, Ink::Black.value());
        centres.push((x, y));
    }
    centres
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn border_is_idempotent() {
        let mut f = Frame {
            width: 60,
            height: 40,
            pixels: (0..2400).map(|i| (i % 251) as u8).collect(),
        };
        draw_border(&mut f);
        let once = f.clone();
        draw_border(&mut f);
        assert_eq!(f, once);
    }

    #[test]
    fn border_width_tracks_short_side() {
        assert_eq!(border_width(&Frame::white(300, 300)), 7);
        assert_eq!(border_width(&Frame::white(600, 600)), 13);
        assert_eq!(border_width(&Frame::white(10, 10)), 1);
    }

    #[test]
    fn cursor_only_draws_while_pressed() {
        let mut f = Frame::filled(20, 20, 128);
        let mut p = Pointer { pressed: false, x: 10.0, y: 10.0 };
        stamp_cursor(&mut f, &p, 6.0, Ink::White);
        assert!(f.pixels.iter().all(|&v| v == 128));
        p.pressed = true;
        stamp_cursor(&mut f, &p, 6.0, Ink::Black);
        assert_eq!(f.get(10, 10), 0);
        assert_eq!(f.get(0, 0), 128);
    }

    #[test]
    fn random_points_land_inside_canvas() {
        let mut f = Frame::white(120, 80);
        let mut rng = StdRng::seed_from_u64(7);
        let centres = seed_random_points(&mut f, &mut rng, 30, 10.0);
        assert_eq!(centres.len(), 30);
        for &(x, y) in &centres {
            assert!((0.0..120.0).contains(&x) && (0.0..80.0).contains(&y));
            assert_eq!(f.get(x as usize, y as usize), 0);
        }
    }
}
