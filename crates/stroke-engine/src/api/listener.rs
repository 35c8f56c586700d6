//! Callback-style observers for hosts that prefer listener traits over
//! draining event enums.

use crate::core::session::SessionEvent;
use crate::guidance::GuidanceEvent;

/// Receives tracing-session lifecycle callbacks.
pub trait SessionListener {
    fn on_stroke_started(&mut self) {}
    fn on_stroke_progress(&mut self, _estimate: f32) {}
    fn on_stroke_completed(&mut self, _valid: bool) {}
    fn on_character_completed(&mut self) {}
}

/// Receives guidance callbacks.
pub trait GuidanceListener {
    fn on_guidance_activated(&mut self) {}
    fn on_stroke_failed(&mut self, _attempts: u32) {}
    fn on_stroke_success(&mut self) {}
    fn on_character_completed(&mut self) {}
}

impl SessionEvent {
    pub fn dispatch<L: SessionListener + ?Sized>(&self, listener: &mut L) {
        match *self {
            SessionEvent::StrokeStarted { .. } => listener.on_stroke_started(),
            SessionEvent::StrokeProgress { estimate, .. } => listener.on_stroke_progress(estimate),
            SessionEvent::StrokeCompleted { valid, .. } => listener.on_stroke_completed(valid),
            SessionEvent::CharacterCompleted { .. } => listener.on_character_completed(),
        }
    }
}

impl GuidanceEvent {
    pub fn dispatch<L: GuidanceListener + ?Sized>(&self, listener: &mut L) {
        match *self {
            GuidanceEvent::GuidanceActivated { .. } => listener.on_guidance_activated(),
            GuidanceEvent::StrokeFailed { attempts } => listener.on_stroke_failed(attempts),
            GuidanceEvent::StrokeSuccess => listener.on_stroke_success(),
            GuidanceEvent::CharacterCompleted => listener.on_character_completed(),
        }
    }
}
