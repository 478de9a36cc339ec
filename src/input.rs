// Input plumbing: the window pushes raw events into a queue, the
// simulation drains it once per tick and maps keys through a pure table.
// Scripted tests push the same events without any window.

use std::collections::VecDeque;

use minifb::Key;

use crate::clock::burst_len;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    TogglePlayback,
    StepBurst(usize),
    ToggleCursorColor,
    ToggleTextColors,
    ToggleFont,
    ClearToWhite,
    SeedRandomPoints,
    SubmitText,
    ExportFrame,
    AdjustUnsharpRadius(f32),
    AdjustCursorRadius(f32),
    LargerResolution,
    SmallerResolution,
    Quit,
}

/// Key -> command. Unbound keys map to nothing.
pub fn command_for_key(key: Key) -> Option<Command> {
    let cmd = match key {
        Key::Space => Command::TogglePlayback,
        Key::Key0 | Key::NumPad0 => Command::StepBurst(burst_len(0)),
        Key::Key1 | Key::NumPad1 => Command::StepBurst(burst_len(1)),
        Key::Key2 | Key::NumPad2 => Command::StepBurst(burst_len(2)),
        Key::Key3 | Key::NumPad3 => Command::StepBurst(burst_len(3)),
        Key::Key4 | Key::NumPad4 => Command::StepBurst(burst_len(4)),
        Key::Key5 | Key::NumPad5 => Command::StepBurst(burst_len(5)),
        Key::Key6 | Key::NumPad6 => Command::StepBurst(burst_len(6)),
        Key::Key7 | Key::NumPad7 => Command::StepBurst(burst_len(7)),
        Key::Key8 | Key::NumPad8 => Command::StepBurst(burst_len(8)),
        Key::Key9 | Key::NumPad9 => Command::StepBurst(burst_len(9)),
        Key::B => Command::ToggleCursorColor,
        Key::X => Command::ToggleTextColors,
        Key::F => Command::ToggleFont,
        Key::C => Command::ClearToWhite,
        Key::R => Command::SeedRandomPoints,
        Key::T => Command::SubmitText,
        Key::S => Command::ExportFrame,
        Key::LeftBracket => Command::AdjustUnsharpRadius(-0.5),
        Key::RightBracket => Command::AdjustUnsharpRadius(0.5),
        Key::Minus => Command::AdjustCursorRadius(-5.0),
        Key::Equal => Command::AdjustCursorRadius(5.0),
        Key::Up => Command::LargerResolution,
        Key::Down => Command::SmallerResolution,
        Key::Escape => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Raw events in frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Key(Key),
    PointerPressed { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    PointerReleased,
}

/// Pointer as of the latest drained event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub pressed: bool,
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerPressed { x, y } => {
                self.pressed = true;
                self.x = x;
                self.y = y;
            }
            InputEvent::PointerMoved { x, y } => {
                self.x = x;
                self.y = y;
            }
            InputEvent::PointerReleased => self.pressed = false,
            InputEvent::Key(_) => {}
        }
    }
}

#[derive(Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Oldest first; leaves the queue empty.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}
