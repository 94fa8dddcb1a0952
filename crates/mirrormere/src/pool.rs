//! Free-list pool of interactive editors

use indexmap::IndexMap;
use tracing::debug;

use crate::editor::{Editor, EditorKind};

/// A kind-keyed free-list of reusable editor instances.
///
/// Borrow returns a recycled instance or constructs one; reclaim resets
/// all transient input state before the instance becomes available to an
/// unrelated record. The pool is injected per session rather than held
/// as ambient shared state.
#[derive(Debug, Default)]
pub struct EditorPool {
    idle: IndexMap<EditorKind, Vec<Editor>>,
    created: usize,
}

impl EditorPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Check out an editor of the given kind
    pub fn borrow(&mut self, kind: EditorKind) -> Editor {
        if let Some(editor) = self.idle.get_mut(&kind).and_then(Vec::pop) {
            debug!(?kind, "recycled pooled editor");
            return editor;
        }
        self.created += 1;
        debug!(?kind, created = self.created, "constructed editor");
        Editor::new(kind)
    }

    /// Check an editor back in, wiping its transient state
    pub fn reclaim(&mut self, mut editor: Editor) {
        editor.reset();
        debug!(kind = ?editor.kind(), "reclaimed editor");
        self.idle.entry(editor.kind()).or_default().push(editor);
    }

    /// Number of idle instances of a kind
    pub fn idle_count(&self, kind: EditorKind) -> usize {
        self.idle.get(&kind).map_or(0, Vec::len)
    }

    /// Total editors ever constructed by this pool
    pub fn created(&self) -> usize {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrow_constructs_then_recycles() {
        let mut pool = EditorPool::new();

        let editor = pool.borrow(EditorKind::Text);
        assert_eq!(pool.created(), 1);
        assert_eq!(pool.idle_count(EditorKind::Text), 0);

        pool.reclaim(editor);
        assert_eq!(pool.idle_count(EditorKind::Text), 1);

        // Recycled, not constructed
        let _again = pool.borrow(EditorKind::Text);
        assert_eq!(pool.created(), 1);
        assert_eq!(pool.idle_count(EditorKind::Text), 0);
    }

    #[test]
    fn test_reclaim_resets_state() {
        let mut pool = EditorPool::new();

        let mut editor = pool.borrow(EditorKind::Text);
        editor.set_buffer("secret input");
        pool.reclaim(editor);

        let recycled = pool.borrow(EditorKind::Text);
        assert_eq!(recycled.buffer(), Some(""));
    }

    #[test]
    fn test_kinds_pool_independently() {
        let mut pool = EditorPool::new();
        let text = pool.borrow(EditorKind::Text);
        let picker = pool.borrow(EditorKind::VariantPicker);
        pool.reclaim(text);
        pool.reclaim(picker);

        assert_eq!(pool.idle_count(EditorKind::Text), 1);
        assert_eq!(pool.idle_count(EditorKind::VariantPicker), 1);
        assert_eq!(pool.idle_count(EditorKind::ListPager), 0);
    }
}
