use bytemuck::{Pod, Zeroable};
use crate::core::session::SessionEvent;
use crate::guidance::GuidanceEvent;

/// Numeric event kinds for the flat event buffer read by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventKind {
    StrokeStarted = 1,
    StrokeProgress = 2,
    StrokeCompleted = 3,
    CharacterCompleted = 4,
    GuidanceActivated = 10,
    StrokeFailed = 11,
    StrokeSuccess = 12,
    GuidanceCharacterCompleted = 13,
}

/// Session and guidance events interleaved in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TracerEvent {
    Session(SessionEvent),
    Guidance(GuidanceEvent),
}

impl TracerEvent {
    pub fn as_session(&self) -> Option<&SessionEvent> {
        match self {
            TracerEvent::Session(event) => Some(event),
            TracerEvent::Guidance(_) => None,
        }
    }

    pub fn as_guidance(&self) -> Option<&GuidanceEvent> {
        match self {
            TracerEvent::Guidance(event) => Some(event),
            TracerEvent::Session(_) => None,
        }
    }
}

/// An event record communicated from Rust to the host through a flat f32 buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EventRecord {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl EventRecord {
    pub const FLOATS: usize = 4;

    fn new(kind: EventKind, a: f32, b: f32, c: f32) -> Self {
        Self { kind: kind as u32 as f32, a, b, c }
    }
}

impl From<&SessionEvent> for EventRecord {
    fn from(event: &SessionEvent) -> Self {
        match *event {
            SessionEvent::StrokeStarted { stroke } => {
                Self::new(EventKind::StrokeStarted, stroke as f32, 0.0, 0.0)
            }
            SessionEvent::StrokeProgress { stroke, estimate } => {
                Self::new(EventKind::StrokeProgress, stroke as f32, estimate, 0.0)
            }
            SessionEvent::StrokeCompleted { stroke, valid, failures } => Self::new(
                EventKind::StrokeCompleted,
                stroke as f32,
                if valid { 1.0 } else { 0.0 },
                failures as f32,
            ),
            SessionEvent::CharacterCompleted { character } => {
                Self::new(EventKind::CharacterCompleted, character as f32, 0.0, 0.0)
            }
        }
    }
}

impl From<&GuidanceEvent> for EventRecord {
    fn from(event: &GuidanceEvent) -> Self {
        match *event {
            GuidanceEvent::GuidanceActivated { stroke } => {
                Self::new(EventKind::GuidanceActivated, stroke as f32, 0.0, 0.0)
            }
            GuidanceEvent::StrokeFailed { attempts } => {
                Self::new(EventKind::StrokeFailed, attempts as f32, 0.0, 0.0)
            }
            GuidanceEvent::StrokeSuccess => Self::new(EventKind::StrokeSuccess, 0.0, 0.0, 0.0),
            GuidanceEvent::CharacterCompleted => {
                Self::new(EventKind::GuidanceCharacterCompleted, 0.0, 0.0, 0.0)
            }
        }
    }
}

impl From<&TracerEvent> for EventRecord {
    fn from(event: &TracerEvent) -> Self {
        match event {
            TracerEvent::Session(event) => event.into(),
            TracerEvent::Guidance(event) => event.into(),
        }
    }
}
