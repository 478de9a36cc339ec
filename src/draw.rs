// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the evolving pattern, stretched to the display size.
// 2) Filled discs and bands drawn straight into the frame.
// 3) A tiny 5x7 bitmap font, the last-resort face for the text stamp.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

use crate::error::Error;
use crate::input::{InputEvent, InputQueue};
use crate::status::Status;
use crate::types::{Frame, FrameBuffer};

/// On-screen size of the (square) window, whatever the canvas resolution.
pub const DISPLAY_SIZE: usize = 600;
pub const TITLE: &str = "Reaction-Diffusion";

pub struct Drawer {
    window: Window,       // the on-screen window you see
    screen: FrameBuffer,  // gray frame expanded to 0x00RRGGBB
    pressed: bool,        // left button state at the previous poll
}

impl Drawer {
    /// Visual: a new empty window appears, sized DISPLAY_SIZE x DISPLAY_SIZE.
    pub fn new(size: usize) -> Result<Self, Error> {
        let options = WindowOptions { scale_mode: ScaleMode::Stretch, ..WindowOptions::default() };
        let mut window =
            Window::new(TITLE, size, size, options).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, screen: FrameBuffer::new(0, 0), pressed: false })
    }

    /// Push the frame to the screen.
    /// Visual: the window immediately displays the new pattern.
    pub fn present(&mut self, frame: &Frame) -> Result<(), Error> {
        frame.to_screen(&mut self.screen);
        self.window
            .update_with_buffer(&self.screen.pixels, self.screen.width, self.screen.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Visual: the title bar reads e.g. "Reaction-Diffusion | Paused | cursor White | ...".
    pub fn show_status(&mut self, status: &Status) {
        self.window.set_title(&format!("{TITLE} | {}", status.summary()));
    }

    /// Queue this refresh's key presses and pointer changes.
    /// Pointer positions are converted to frame texels.
    pub fn poll(&mut self, frame_width: usize, frame_height: usize, queue: &mut InputQueue) {
        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            queue.push(InputEvent::Key(key));
        }

        let down = self.window.get_mouse_down(MouseButton::Left);
        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let (ww, wh) = self.window.get_size();
            let x = mx * frame_width as f32 / ww.max(1) as f32;
            let y = my * frame_height as f32 / wh.max(1) as f32;
            if down && !self.pressed {
                queue.push(InputEvent::PointerPressed { x, y });
            } else if down {
                queue.push(InputEvent::PointerMoved { x, y });
            }
        }
        if !down && self.pressed {
            queue.push(InputEvent::PointerReleased);
        }
        self.pressed = down;
    }

    /// Escape also arrives through `poll`; this covers a key held since startup.
    pub fn esc_down(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }
}

/* ---------- Software drawing into the frame ---------- */

/// Filled disc centred at (cx,cy); a texel is inside when its centre is.
/// Visual: a solid round dab of `value`.
pub fn fill_disc(frame: &mut Frame, cx: f32, cy: f32, diameter: f32, value: u8) {
    let r = diameter * 0.5;
    if r <= 0.0 {
        return;
    }
    let r2 = r * r;
    let x0 = (cx - r).floor() as i32;
    let x1 = (cx + r).ceil() as i32;
    let y0 = (cy - r).floor() as i32;
    let y1 = (cy + r).ceil() as i32;
    for y in y0..=y1 {
        let dy = y as f32 + 0.5 - cy;
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                frame.put(x, y, value);
            }
        }
    }
}

/// Paint a band of `width` texels just inside every edge.
/// Visual: a crisp frame around the canvas.
pub fn edge_band(frame: &mut Frame, width: usize, value: u8) {
    let (w, h) = (frame.width, frame.height);
    for y in 0..h {
        for x in 0..w {
            let inside = x >= width && y >= width && x + width < w && y + width < h;
            if !inside {
                frame.pixels[y * w + x] = value;
            }
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap. Lowercase maps to uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
pub fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b10001,0b01010,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disc_area_is_close_to_circle() {
        let mut f = Frame::white(200, 200);
        fill_disc(&mut f, 100.0, 100.0, 50.0, 0);
        let black = f.pixels.iter().filter(|&&v| v == 0).count() as f32;
        let ideal = std::f32::consts::PI * 25.0 * 25.0;
        assert!((black - ideal).abs() / ideal < 0.03, "black = {black}");
    }

    #[test]
    fn disc_is_clipped_at_edges() {
        let mut f = Frame::white(10, 10);
        fill_disc(&mut f, 0.0, 0.0, 8.0, 0);
        assert_eq!(f.get(0, 0), 0);
        assert_eq!(f.get(9, 9), 255);
    }

    #[test]
    fn band_hugs_every_edge() {
        let mut f = Frame::filled(10, 8, 0);
        edge_band(&mut f, 2, 255);
        assert_eq!(f.get(0, 0), 255);
        assert_eq!(f.get(1, 4), 255);
        assert_eq!(f.get(8, 4), 255);
        assert_eq!(f.get(4, 6), 255);
        assert_eq!(f.get(2, 2), 0);
        assert_eq!(f.get(7, 5), 0);
    }

    #[test]
    fn lowercase_uses_uppercase_glyph() {
        assert_eq!(glyph5x7('a'), glyph5x7('A'));
        assert!(glyph5x7('模').is_none());
    }
}
