//! Undo/redo for canvas editing sessions
//!
//! Each entry is a zstd-compressed JSON snapshot of the whole graph.
//! Snapshots make every mutation reversible without per-operation inverse
//! logic; a marketing automation graph compresses to a few hundred bytes,
//! so a full editing session stays small.

use std::collections::VecDeque;

use crate::error::{GraphError, Result};
use crate::types::Graph;

/// Compression level for snapshot entries
const SNAPSHOT_ZSTD_LEVEL: i32 = 3;

/// Bounded undo/redo stack of graph snapshots
pub struct UndoStack {
    /// Compressed graph states (zstd)
    snapshots: VecDeque<Vec<u8>>,
    /// Current position in the stack
    current: usize,
    /// Maximum number of snapshots to keep
    max_snapshots: usize,
}

impl UndoStack {
    /// Create a new undo stack keeping at most `max_snapshots` entries
    pub fn new(max_snapshots: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            current: 0,
            max_snapshots: max_snapshots.max(1),
        }
    }

    /// Push a new snapshot onto the stack
    ///
    /// Truncates any redo history (snapshots after the current position).
    pub fn push(&mut self, graph: &Graph) -> Result<()> {
        let json = serde_json::to_vec(graph)?;
        let compressed = zstd::encode_all(&json[..], SNAPSHOT_ZSTD_LEVEL)
            .map_err(|e| GraphError::Compression(e.to_string()))?;

        while self.snapshots.len() > self.current + 1 {
            self.snapshots.pop_back();
        }

        self.snapshots.push_back(compressed);
        self.current = self.snapshots.len() - 1;

        // Trim the oldest entries once over the limit
        while self.snapshots.len() > self.max_snapshots {
            self.snapshots.pop_front();
            if self.current > 0 {
                self.current -= 1;
            }
        }

        Ok(())
    }

    /// Undo: move back one snapshot
    ///
    /// Returns the previous graph state, or None if at the beginning.
    pub fn undo(&mut self) -> Option<Result<Graph>> {
        if self.current > 0 {
            self.current -= 1;
            Some(self.decompress(self.current))
        } else {
            None
        }
    }

    /// Redo: move forward one snapshot
    ///
    /// Returns the next graph state, or None if at the end.
    pub fn redo(&mut self) -> Option<Result<Graph>> {
        if self.current + 1 < self.snapshots.len() {
            self.current += 1;
            Some(self.decompress(self.current))
        } else {
            None
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.snapshots.len()
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Clear all snapshots
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current = 0;
    }

    fn decompress(&self, index: usize) -> Result<Graph> {
        let compressed = &self.snapshots[index];
        let json = zstd::decode_all(&compressed[..])
            .map_err(|e| GraphError::Compression(e.to_string()))?;
        let graph: Graph = serde_json::from_slice(&json)?;
        Ok(graph)
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(50)
    }
}
