// The explicit simulation state: frame store, pipeline, clock, parameters
// and pointer, plus every operation the control surface can trigger.
//
// Per tick:
//   1) drain queued input (commands may stamp the frame or pause)
//   2) snapshot -> pipeline (only if Running) -> commit
//   3) cursor dab + border on top of the committed frame
// The window shell then presents `frame()`.

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::clock::{PlaybackState, SimulationClock};
use crate::input::{command_for_key, Command, InputEvent, InputQueue, Pointer};
use crate::overlay::{draw_border, seed_random_points, stamp_cursor};
use crate::params::{ParamOverrides, Resolution, SimulationParameters};
use crate::pipeline::{FilterSettings, Pipeline};
use crate::seed::SeedImage;
use crate::status::{Status, StatusObserver};
use crate::store::FrameStore;
use crate::text::TextRasterizer;
use crate::types::Frame;

/// Ticks run right after (re)initialization, before the first present.
pub const WARMUP_TICKS: usize = 3;

/// Things only the window shell can do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Quit,
    ExportFrame,
    /// The canvas was rebuilt at this size; persist it.
    ResolutionChanged(Resolution),
}

pub struct Simulation {
    overrides: ParamOverrides,
    params: SimulationParameters,
    seed: SeedImage,
    store: FrameStore,
    pipeline: Pipeline,
    clock: SimulationClock,
    pointer: Pointer,
    text: TextRasterizer,
    rng: StdRng,
    observers: Vec<Box<dyn StatusObserver>>,
}

impl Simulation {
    /// Start from the seed image at `resolution`, Running.
    pub fn new(
        seed: SeedImage,
        resolution: Resolution,
        overrides: ParamOverrides,
        text: TextRasterizer,
        rng: StdRng,
    ) -> Self {
        let params = overrides.params_for(resolution);
        let frame = seed.frame_at(resolution);
        let (w, h) = (frame.width, frame.height);
        let mut sim = Self {
            overrides,
            params,
            seed,
            store: FrameStore::new(frame),
            pipeline: Pipeline::new(w, h),
            clock: SimulationClock::new(),
            pointer: Pointer::default(),
            text,
            rng,
            observers: Vec::new(),
        };
        sim.warm_up();
        sim
    }

    fn warm_up(&mut self) {
        for _ in 0..WARMUP_TICKS {
            self.tick();
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn StatusObserver>) {
        self.observers.push(observer);
    }

    pub fn status(&self) -> Status {
        Status {
            playback: self.clock.state(),
            cursor_color: self.params.cursor_color,
            text_fill: self.params.text.fill,
            text_stroke: self.params.text.stroke,
            font: self.params.text.font,
            resolution: self.params.resolution.px(),
        }
    }

    fn notify(&mut self) {
        let status = self.status();
        for observer in &mut self.observers {
            observer.status_changed(&status);
        }
    }

    pub fn frame(&self) -> &Frame {
        self.store.frame()
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Edits made here are picked up at the next tick/interaction.
    pub fn params_mut(&mut self) -> &mut SimulationParameters {
        &mut self.params
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn playback(&self) -> PlaybackState {
        self.clock.state()
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /* ------------------------------ ticking ------------------------------ */

    /// One scheduling tick. Runs the pipeline only while Running; the
    /// overlay is drawn either way.
    pub fn tick(&mut self) {
        if self.clock.is_running() {
            self.feedback_step();
        }
        self.clock.record_tick();
        self.draw_overlay();
    }

    fn feedback_step(&mut self) {
        let settings = FilterSettings::from(&self.params);
        let snapshot = self.store.snapshot();
        let next = self.pipeline.run(&snapshot, settings);
        self.store.commit(next);
        self.clock.record_pipeline_run();
    }

    fn draw_overlay(&mut self) {
        let frame = self.store.frame_mut();
        stamp_cursor(frame, &self.pointer, self.params.cursor_radius, self.params.cursor_color);
        draw_border(frame);
    }

    /// Run `n` full tick-equivalents right now; only valid while Paused.
    /// Returns how many ran (0 while Running). Only the final frame is
    /// ever presented.
    pub fn step_burst(&mut self, n: usize) -> usize {
        if self.clock.is_running() {
            debug!(n, "step burst ignored while running");
            return 0;
        }
        for _ in 0..n {
            self.feedback_step();
            self.draw_overlay();
        }
        n
    }

    /* --------------------------- interactions --------------------------- */

    pub fn toggle(&mut self) -> PlaybackState {
        let state = self.clock.toggle();
        self.notify();
        state
    }

    /// No-op (and no notification) when already paused.
    pub fn pause(&mut self) {
        if self.clock.pause() {
            self.notify();
        }
    }

    /// Blank white canvas, bypassing the pipeline.
    pub fn clear(&mut self) {
        let (w, h) = (self.frame().width, self.frame().height);
        self.store.reset(Frame::white(w, h));
    }

    /// Pause, then scatter black discs; returns their centres.
    pub fn seed_random_points(&mut self) -> Vec<(f32, f32)> {
        self.pause();
        let count = self.params.random_point_count;
        let size = self.params.random_point_size;
        seed_random_points(self.store.frame_mut(), &mut self.rng, count, size)
    }

    /// Pause, then composite the outlined text stamp.
    pub fn submit_text(&mut self) {
        self.pause();
        self.text.stamp(self.store.frame_mut(), &self.params.text);
    }

    pub fn toggle_cursor_color(&mut self) {
        self.params.toggle_cursor_color();
        self.notify();
    }

    pub fn toggle_text_colors(&mut self) {
        self.params.toggle_text_colors();
        self.notify();
    }

    pub fn toggle_font(&mut self) {
        self.params.toggle_font();
        self.notify();
    }

    /// Same as a fresh launch at `resolution`: parameters go back to their
    /// defaults (plus the startup overrides), every buffer is rebuilt from
    /// the seed image, playback restarts and the warm-up ticks run again.
    pub fn reinitialize(&mut self, resolution: Resolution) {
        info!(resolution = resolution.px(), "reinitializing canvas");
        self.params = self.overrides.params_for(resolution);
        let frame = self.seed.frame_at(resolution);
        self.pipeline = Pipeline::new(frame.width, frame.height);
        self.store.reset(frame);
        self.clock = SimulationClock::new();
        self.pointer = Pointer::default();
        self.warm_up();
        self.notify();
    }

    /* ------------------------------ input ------------------------------- */

    /// Apply one command; returns what the shell still has to do.
    pub fn apply(&mut self, command: Command) -> Option<Effect> {
        debug!(?command, "command");
        match command {
            Command::TogglePlayback => {
                self.toggle();
            }
            Command::StepBurst(n) => {
                self.step_burst(n);
            }
            Command::ToggleCursorColor => self.toggle_cursor_color(),
            Command::ToggleTextColors => self.toggle_text_colors(),
            Command::ToggleFont => self.toggle_font(),
            Command::ClearToWhite => self.clear(),
            Command::SeedRandomPoints => {
                self.seed_random_points();
            }
            Command::SubmitText => self.submit_text(),
            Command::ExportFrame => return Some(Effect::ExportFrame),
            Command::AdjustUnsharpRadius(delta) => self.params.adjust_unsharp_radius(delta),
            Command::AdjustCursorRadius(delta) => self.params.adjust_cursor_radius(delta),
            Command::LargerResolution | Command::SmallerResolution => {
                let current = self.params.resolution;
                let next = if command == Command::LargerResolution {
                    current.larger()
                } else {
                    current.smaller()
                };
                if next == current {
                    return None;
                }
                self.reinitialize(next);
                return Some(Effect::ResolutionChanged(next));
            }
            Command::Quit => return Some(Effect::Quit),
        }
        None
    }

    /// Drain every queued event, oldest first.
    pub fn process(&mut self, queue: &mut InputQueue) -> Vec<Effect> {
        let events: Vec<InputEvent> = queue.drain().collect();
        let mut effects = Vec::new();
        for event in events {
            match event {
                InputEvent::Key(key) => {
                    if let Some(effect) = command_for_key(key).and_then(|cmd| self.apply(cmd)) {
                        effects.push(effect);
                    }
                }
                other => self.pointer.apply(&other),
            }
        }
        effects
    }
}
