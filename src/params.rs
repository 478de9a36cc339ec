// Tunable parameters owned by the control surface.
// The core reads these at the start of each tick/interaction and never
// rejects them: every setter here clamps before the value reaches the core.

use crate::types::{FontVariant, Ink};

/// Canvas sizes the control surface offers (square frames).
pub const RESOLUTIONS: [u32; 6] = [100, 200, 300, 400, 500, 600];
pub const DEFAULT_RESOLUTION: u32 = 300;

/// Reference size the UI-scaled defaults are expressed in.
const UI_REFERENCE: f32 = 600.0;

/// Splits text content into lines.
pub const LINE_DELIMITER: char = '/';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution(u32);

impl Resolution {
    /// Only the sizes in [`RESOLUTIONS`] are accepted.
    pub fn new(px: u32) -> Option<Self> {
        RESOLUTIONS.contains(&px).then_some(Self(px))
    }

    /// Like [`Resolution::new`], snapping unknown values to the default.
    pub fn or_default(px: u32) -> Self {
        Self::new(px).unwrap_or_default()
    }

    pub fn px(self) -> u32 {
        self.0
    }

    pub fn side(self) -> usize {
        self.0 as usize
    }

    pub fn ui_scale(self) -> f32 {
        self.0 as f32 / UI_REFERENCE
    }

    /// Next larger size, saturating at the top.
    pub fn larger(self) -> Self {
        let i = self.index();
        Self(RESOLUTIONS[(i + 1).min(RESOLUTIONS.len() - 1)])
    }

    /// Next smaller size, saturating at the bottom.
    pub fn smaller(self) -> Self {
        Self(RESOLUTIONS[self.index().saturating_sub(1)])
    }

    fn index(self) -> usize {
        RESOLUTIONS.iter().position(|&r| r == self.0).unwrap_or(0)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self(DEFAULT_RESOLUTION)
    }
}

/// Text stamp settings.
#[derive(Clone, Debug, PartialEq)]
pub struct TextParams {
    pub content: String, // '/' starts a new line
    pub size: f32,
    pub weight: f32,         // stroke width of the fill pass
    pub outline_weight: f32, // stroke width of the outline pass
    pub font: FontVariant,
    pub fill: Ink,
    pub stroke: Ink, // always fill.inverted()
}

impl TextParams {
    /// Content split at the line delimiter.
    pub fn lines(&self) -> Vec<&str> {
        self.content.split(LINE_DELIMITER).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameters {
    pub resolution: Resolution,
    pub blur_spread: f32,
    pub unsharp_radius: f32,
    pub unsharp_amount: f32,
    /// Brush size in texels, measured across the dab.
    pub cursor_radius: f32,
    pub cursor_color: Ink,
    pub random_point_count: u32,
    /// Diameter of each random seed point.
    pub random_point_size: f32,
    pub text: TextParams,
}

impl SimulationParameters {
    /// Defaults for a given canvas size; size-dependent values scale with it.
    pub fn for_resolution(resolution: Resolution) -> Self {
        let scale = resolution.ui_scale();
        Self {
            resolution,
            blur_spread: 1.0,
            unsharp_radius: 3.5,
            unsharp_amount: 64.0,
            cursor_radius: resolution.side() as f32 / 6.0,
            cursor_color: Ink::White,
            random_point_count: 50,
            random_point_size: 50.0,
            text: TextParams {
                content: "模様".to_string(),
                size: 250.0 * scale,
                weight: 0.0,
                outline_weight: 15.0 * scale,
                font: FontVariant::Mincho,
                fill: Ink::White,
                stroke: Ink::Black,
            },
        }
    }

    /// Pull every field back into its allowed range.
    pub fn clamped(mut self) -> Self {
        let scale = self.resolution.ui_scale();
        self.blur_spread = self.blur_spread.max(0.01);
        self.unsharp_radius = snap_half(self.unsharp_radius.clamp(1.0, 20.0));
        self.unsharp_amount = self.unsharp_amount.max(0.0);
        self.cursor_radius = self.cursor_radius.clamp(10.0, (150.0 * scale).max(10.0));
        self.random_point_count = self.random_point_count.clamp(1, 100);
        self.random_point_size = self.random_point_size.clamp(10.0, 100.0);
        self.text.size = self.text.size.clamp(100.0 * scale, 500.0 * scale);
        self.text.weight = self.text.weight.clamp(0.0, 30.0 * scale);
        self.text.outline_weight = self.text.outline_weight.clamp(0.0, 30.0 * scale);
        self.text.stroke = self.text.fill.inverted();
        self
    }

    pub fn toggle_cursor_color(&mut self) {
        self.cursor_color = self.cursor_color.inverted();
    }

    /// Fill and stroke flip together; they always stay opposite.
    pub fn toggle_text_colors(&mut self) {
        self.text.fill = self.text.fill.inverted();
        self.text.stroke = self.text.fill.inverted();
    }

    pub fn toggle_font(&mut self) {
        self.text.font = self.text.font.toggled();
    }

    pub fn adjust_unsharp_radius(&mut self, delta: f32) {
        self.unsharp_radius = snap_half((self.unsharp_radius + delta).clamp(1.0, 20.0));
    }

    pub fn adjust_cursor_radius(&mut self, delta: f32) {
        let max = (150.0 * self.resolution.ui_scale()).max(10.0);
        self.cursor_radius = (self.cursor_radius + delta).clamp(10.0, max);
    }
}

/// Command-line values. Each one replaces its per-resolution default
/// whenever parameters are rebuilt (startup and every resolution change).
#[derive(Clone, Debug, Default, PartialEq, clap::Args)]
pub struct ParamOverrides {
    /// Text stamp content ('/' starts a new line)
    #[arg(long)]
    pub text: Option<String>,

    #[arg(long, value_enum)]
    pub font: Option<FontVariant>,

    #[arg(long, value_name = "TEXELS")]
    pub blur_spread: Option<f32>,

    #[arg(long, value_name = "TEXELS")]
    pub unsharp_radius: Option<f32>,

    #[arg(long)]
    pub unsharp_amount: Option<f32>,

    /// Brush size across the dab
    #[arg(long, value_name = "TEXELS")]
    pub cursor_radius: Option<f32>,

    /// Discs scattered by R (1-100)
    #[arg(long, value_name = "N")]
    pub point_count: Option<u32>,

    /// Diameter of each random disc (10-100)
    #[arg(long, value_name = "TEXELS")]
    pub point_size: Option<f32>,

    #[arg(long, value_name = "TEXELS")]
    pub text_size: Option<f32>,

    /// Stroke width of the fill pass
    #[arg(long, value_name = "TEXELS")]
    pub text_weight: Option<f32>,

    /// Stroke width of the outline pass
    #[arg(long, value_name = "TEXELS")]
    pub outline_weight: Option<f32>,
}

impl ParamOverrides {
    /// Defaults for `resolution`, overridden field by field, then clamped.
    pub fn params_for(&self, resolution: Resolution) -> SimulationParameters {
        let mut p = SimulationParameters::for_resolution(resolution);
        if let Some(text) = &self.text {
            p.text.content = text.clone();
        }
        if let Some(font) = self.font {
            p.text.font = font;
        }
        let replace = |slot: &mut f32, v: Option<f32>| {
            if let Some(v) = v {
                *slot = v;
            }
        };
        replace(&mut p.blur_spread, self.blur_spread);
        replace(&mut p.unsharp_radius, self.unsharp_radius);
        replace(&mut p.unsharp_amount, self.unsharp_amount);
        replace(&mut p.cursor_radius, self.cursor_radius);
        replace(&mut p.random_point_size, self.point_size);
        replace(&mut p.text.size, self.text_size);
        replace(&mut p.text.weight, self.text_weight);
        replace(&mut p.text.outline_weight, self.outline_weight);
        if let Some(n) = self.point_count {
            p.random_point_count = n;
        }
        p.clamped()
    }
}

fn snap_half(v: f32) -> f32 {
    (v * 2.0).round() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_set_is_closed() {
        assert!(Resolution::new(300).is_some());
        assert!(Resolution::new(250).is_none());
        assert_eq!(Resolution::or_default(0).px(), 300);
        assert_eq!(Resolution::or_default(600).larger().px(), 600);
        assert_eq!(Resolution::or_default(100).smaller().px(), 100);
        assert_eq!(Resolution::or_default(300).larger().px(), 400);
    }

    #[test]
    fn defaults_scale_with_canvas() {
        let p = SimulationParameters::for_resolution(Resolution::or_default(300));
        assert_eq!(p.cursor_radius, 50.0);
        assert_eq!(p.text.size, 125.0);
        assert_eq!(p.text.outline_weight, 7.5);
        assert_eq!(p.clone().clamped(), p);
    }

    #[test]
    fn clamping_pulls_values_into_range() {
        let mut p = SimulationParameters::for_resolution(Resolution::or_default(600));
        p.unsharp_radius = 42.3;
        p.unsharp_amount = -3.0;
        p.blur_spread = 0.0;
        p.random_point_count = 0;
        p.random_point_size = 500.0;
        p.text.fill = Ink::Black;
        let p = p.clamped();
        assert_eq!(p.unsharp_radius, 20.0);
        assert_eq!(p.unsharp_amount, 0.0);
        assert!(p.blur_spread > 0.0);
        assert_eq!(p.random_point_count, 1);
        assert_eq!(p.random_point_size, 100.0);
        assert_eq!(p.text.stroke, Ink::White);
    }

    #[test]
    fn text_colors_stay_opposite() {
        let mut p = SimulationParameters::for_resolution(Resolution::default());
        p.toggle_text_colors();
        assert_eq!((p.text.fill, p.text.stroke), (Ink::Black, Ink::White));
        p.toggle_text_colors();
        assert_eq!((p.text.fill, p.text.stroke), (Ink::White, Ink::Black));
    }

    #[test]
    fn radius_nudges_stay_on_half_steps() {
        let mut p = SimulationParameters::for_resolution(Resolution::default());
        p.adjust_unsharp_radius(0.5);
        assert_eq!(p.unsharp_radius, 4.0);
        for _ in 0..50 {
            p.adjust_unsharp_radius(-0.5);
        }
        assert_eq!(p.unsharp_radius, 1.0);
    }

    #[test]
    fn overrides_replace_defaults_then_clamp() {
        let o = ParamOverrides {
            text: Some("AB".into()),
            font: Some(FontVariant::Gothic),
            cursor_radius: Some(1000.0),
            point_count: Some(7),
            text_size: Some(10.0),
            ..ParamOverrides::default()
        };
        let p = o.params_for(Resolution::or_default(300));
        assert_eq!(p.text.content, "AB");
        assert_eq!(p.text.font, FontVariant::Gothic);
        assert_eq!(p.cursor_radius, 75.0);
        assert_eq!(p.random_point_count, 7);
        assert_eq!(p.text.size, 50.0);
        assert_eq!(p.unsharp_amount, 64.0);
    }

    #[test]
    fn overrides_parse_from_flags() {
        use clap::Parser;

        #[derive(Parser)]
        struct Cli {
            #[command(flatten)]
            params: ParamOverrides,
        }

        let cli = Cli::try_parse_from([
            "reaction-diffusion",
            "--point-count", "12",
            "--point-size", "30",
            "--text-size", "200",
            "--text-weight", "4",
            "--outline-weight", "9",
            "--cursor-radius", "40",
            "--font", "gothic",
        ])
        .unwrap();
        let p = cli.params.params_for(Resolution::or_default(600));
        assert_eq!(p.random_point_count, 12);
        assert_eq!(p.random_point_size, 30.0);
        assert_eq!(p.text.size, 200.0);
        assert_eq!(p.text.weight, 4.0);
        assert_eq!(p.text.outline_weight, 9.0);
        assert_eq!(p.cursor_radius, 40.0);
        assert_eq!(p.text.font, FontVariant::Gothic);
    }

    #[test]
    fn no_overrides_means_plain_defaults() {
        let r = Resolution::or_default(500);
        assert_eq!(ParamOverrides::default().params_for(r), SimulationParameters::for_resolution(r));
    }

    #[test]
    fn delimiter_splits_lines() {
        let mut p = SimulationParameters::for_resolution(Resolution::default());
        p.text.content = "AB/CD".into();
        assert_eq!(p.text.lines(), vec!["AB", "CD"]);
    }
}
