//! The figure surface — explicit replacement for a process-global figure set.
//!
//! Analysis modules push figures here instead of "showing" them. The report
//! harness owns the surface, drains it to files after each module, and
//! closes whatever is left so one module's figures can never bleed into the
//! next module's artifact count.

use super::Figure;

/// Accumulates figures for the currently running module.
#[derive(Debug, Default)]
pub struct FigureSurface {
    open: Vec<Figure>,
}

impl FigureSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a figure to the surface (the "show" operation).
    pub fn add(&mut self, figure: Figure) {
        self.open.push(figure);
    }

    /// Number of figures currently open.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Take every open figure off the surface, leaving it empty.
    pub fn drain(&mut self) -> Vec<Figure> {
        std::mem::take(&mut self.open)
    }

    /// Discard every open figure.
    pub fn close_all(&mut self) {
        self.open.clear();
    }
}
