// Holds the one visible frame.
// Each tick: snapshot() before any overlay drawing, run the pipeline on
// the snapshot, commit() the result, then let the overlay draw on top.

use crate::types::Frame;

pub struct FrameStore {
    current: Frame,
}

impl FrameStore {
    pub fn new(frame: Frame) -> Self {
        Self { current: frame }
    }

    /// The frame as committed at the end of the previous tick.
    pub fn snapshot(&self) -> Frame {
        self.current.clone()
    }

    /// Swap in a new frame of the same size.
    pub fn commit(&mut self, frame: Frame) {
        debug_assert_eq!(
            (frame.width, frame.height),
            (self.current.width, self.current.height),
            "commit must keep frame dimensions"
        );
        self.current = frame;
    }

    /// Replace the frame outright (clear / reinit); may change dimensions.
    pub fn reset(&mut self, frame: Frame) {
        self.current = frame;
    }

    pub fn frame(&self) -> &Frame {
        &self.current
    }

    /// Direct access for overlay drawing.
    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.current
    }
}
