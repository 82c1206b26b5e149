//! Figure rendering collaborator.
//!
//! Actual rasterization lives outside this system; `FigureRenderer` is the
//! seam a real backend plugs into. The shipped `SpecRenderer` writes the
//! serialized figure model to the artifact path, which keeps artifact
//! naming, counting, and attachment plumbing fully exercised offline.

use super::Figure;
use std::io;
use std::path::Path;

/// Renders one figure to one file.
pub trait FigureRenderer {
    fn render(&self, figure: &Figure, path: &Path) -> io::Result<()>;
}

/// Writes the figure's serialized spec to the target path.
#[derive(Debug, Clone, Default)]
pub struct SpecRenderer;

impl FigureRenderer for SpecRenderer {
    fn render(&self, figure: &Figure, path: &Path) -> io::Result<()> {
        let json = serde_json::to_vec_pretty(figure).map_err(io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_renderer_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("module_fig1.png");
        SpecRenderer.render(&Figure::new("Test"), &path).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("\"Test\""));
    }
}
