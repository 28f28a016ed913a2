//! Render loop lifecycle.
//!
//! The loop does not schedule itself. The embedding application asks for a
//! frame from its own scheduler (`requestAnimationFrame`, a winit redraw,
//! a test) and schedules the next one only after the current frame has been
//! painted and only while [`RenderLoop::is_running`] holds.

use crate::interaction::Interaction;
use nc_core::{GraphStore, Size};
use nc_render::{DrawCommand, Theme};

#[derive(Debug, Clone, Default)]
pub struct RenderLoop {
    running: bool,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("render loop started");
            self.running = true;
        }
    }

    /// Stop handing out frames. Called on surface teardown.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("render loop stopped after {} frames", self.frames);
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames produced since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One tick: the draw commands for the current state, or `None` once
    /// stopped.
    pub fn frame<S: GraphStore>(
        &mut self,
        interaction: &Interaction,
        store: &S,
        surface: Size,
        theme: &Theme,
    ) -> Option<Vec<DrawCommand>> {
        if !self.running {
            return None;
        }
        self.frames += 1;
        Some(interaction.frame(store, surface, theme))
    }
}
