// Read-only status the control surface shows: playback state plus the
// current toggle colors and font. The simulation pushes a fresh snapshot
// to every observer whenever one of these changes.

use std::sync::mpsc::Sender;

use tracing::info;

use crate::clock::PlaybackState;
use crate::types::{FontVariant, Ink};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub playback: PlaybackState,
    pub cursor_color: Ink,
    pub text_fill: Ink,
    pub text_stroke: Ink,
    pub font: FontVariant,
    pub resolution: u32,
}

impl Status {
    /// One-line form, used for the window title.
    pub fn summary(&self) -> String {
        format!(
            "{} | cursor {} | text {}/{} | {} | {}px",
            self.playback.label(),
            self.cursor_color.label(),
            self.text_fill.label(),
            self.text_stroke.label(),
            self.font.label(),
            self.resolution,
        )
    }
}

pub trait StatusObserver {
    fn status_changed(&mut self, status: &Status);
}

/// Writes each status change to the log.
pub struct LogStatus;

impl StatusObserver for LogStatus {
    fn status_changed(&mut self, status: &Status) {
        info!(
            playback = status.playback.label(),
            cursor = status.cursor_color.label(),
            fill = status.text_fill.label(),
            stroke = status.text_stroke.label(),
            font = status.font.label(),
            "status changed"
        );
    }
}

/// Forwards each change to another part of the program (the window shell).
impl StatusObserver for Sender<Status> {
    fn status_changed(&mut self, status: &Status) {
        // A dropped receiver just means nobody is watching any more.
        let _ = self.send(status.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn summary_lists_every_field() {
        let s = Status {
            playback: PlaybackState::Paused,
            cursor_color: Ink::Black,
            text_fill: Ink::White,
            text_stroke: Ink::Black,
            font: FontVariant::Gothic,
            resolution: 200,
        };
        assert_eq!(s.summary(), "Paused | cursor Black | text White/Black | Gothic | 200px");
    }

    #[test]
    fn channel_observer_forwards() {
        let (mut tx, rx) = mpsc::channel();
        let s = Status {
            playback: PlaybackState::Running,
            cursor_color: Ink::White,
            text_fill: Ink::White,
            text_stroke: Ink::Black,
            font: FontVariant::Mincho,
            resolution: 300,
        };
        tx.status_changed(&s);
        assert_eq!(rx.try_recv().ok(), Some(s));
    }
}
