// Running / Paused state machine.
// Visual: Running = the pattern keeps evolving every refresh;
// Paused = the canvas holds still until a digit key steps it forward.

/// Playback state of the feedback loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Running,
    Paused,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Running => "Running",
            PlaybackState::Paused => "Paused",
        }
    }
}

/// Most tick-equivalents a single step burst can ask for.
pub const MAX_BURST: usize = 10;

/// Digit key -> number of steps. `0` means ten.
pub fn burst_len(digit: u8) -> usize {
    match digit {
        0 => MAX_BURST,
        d => (d as usize).min(9),
    }
}

#[derive(Debug)]
pub struct SimulationClock {
    state: PlaybackState,
    ticks: u64,          // scheduling ticks seen
    pipeline_runs: u64,  // feedback steps executed (ticks + burst steps)
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    pub fn new() -> Self {
        Self { state: PlaybackState::Running, ticks: 0, pipeline_runs: 0 }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// Flip unconditionally; returns the new state.
    pub fn toggle(&mut self) -> PlaybackState {
        self.state = match self.state {
            PlaybackState::Running => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Running,
        };
        self.state
    }

    /// Returns true only if this call actually changed the state.
    pub fn pause(&mut self) -> bool {
        if self.state == PlaybackState::Paused {
            return false;
        }
        self.state = PlaybackState::Paused;
        true
    }

    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    pub fn record_pipeline_run(&mut self) {
        self.pipeline_runs += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pipeline_runs(&self) -> u64 {
        self.pipeline_runs
    }
}
