//! Circular dependency detection infrastructure.

use tracing::trace;

use crate::error::{DiError, DiResult};

struct Frame {
    name: String,
    cell: usize,
}

/// Names currently under construction for one top-level resolution.
///
/// A frame is keyed by the requested name and by the descriptor's instance
/// cell, so a class bound under both its own name and an interface key is
/// caught when it would re-enter its own construction through either key.
pub(crate) struct ResolutionPath {
    frames: Vec<Frame>,
    max_depth: usize,
}

impl ResolutionPath {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Pushes `name`, failing if it is already being constructed.
    ///
    /// Circular detection happens BEFORE pushing, so the reported chain is the
    /// current path followed by the re-encountered name.
    pub(crate) fn enter(&mut self, name: &str, cell: usize) -> DiResult<()> {
        if self.frames.iter().any(|f| f.name == name || f.cell == cell) {
            let mut chain: Vec<String> = self.frames.iter().map(|f| f.name.clone()).collect();
            chain.push(name.to_string());
            return Err(DiError::Circular(chain));
        }

        if self.frames.len() >= self.max_depth {
            return Err(DiError::DepthExceeded(self.frames.len()));
        }

        trace!(name, depth = self.frames.len(), "Entering resolution");
        self.frames.push(Frame {
            name: name.to_string(),
            cell,
        });
        Ok(())
    }

    /// Pops the innermost frame; called on success and failure alike.
    pub(crate) fn leave(&mut self) {
        if let Some(frame) = self.frames.pop() {
            trace!(name = %frame.name, "Leaving resolution");
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}
