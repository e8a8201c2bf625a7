//! Page context: which resource a page shows and which record is being edited

use crate::types::{RecordId, ResourceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    kind: ResourceKind,
    editing_id: Option<RecordId>,
}

impl PageContext {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind, editing_id: None }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Record open for edit, `None` in create mode
    pub fn editing_id(&self) -> Option<RecordId> {
        self.editing_id
    }

    pub fn set_editing(&mut self, id: Option<RecordId>) {
        self.editing_id = id;
    }

    pub fn clear_editing(&mut self) {
        self.editing_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_clear() {
        let mut ctx = PageContext::new(ResourceKind::Markets);
        assert_eq!(ctx.kind(), ResourceKind::Markets);
        assert_eq!(ctx.editing_id(), None);

        ctx.set_editing(Some(4));
        assert_eq!(ctx.editing_id(), Some(4));
        ctx.clear_editing();
        assert_eq!(ctx.editing_id(), None);
    }
}
