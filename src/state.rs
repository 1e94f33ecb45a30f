//! Page-local view state. These values are the only mutable state shared
//! between callbacks on a page; they are owned by the page component and
//! dropped with it on navigation.

/// Whether the expense form creates a new record or updates an existing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Create,
    Editing(i64),
}

impl EditMode {
    pub fn editing_id(&self) -> Option<i64> {
        match self {
            EditMode::Create => None,
            EditMode::Editing(id) => Some(*id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::Editing(_))
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            EditMode::Create => "Add Expense",
            EditMode::Editing(_) => "Update Expense",
        }
    }

    pub fn form_title(&self) -> &'static str {
        match self {
            EditMode::Create => "Add New Expense",
            EditMode::Editing(_) => "Edit Expense",
        }
    }
}

/// Lifecycle of one fetched view region.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl LoadPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_mode_has_no_id() {
        let mode = EditMode::Create;
        assert_eq!(mode.editing_id(), None);
        assert!(!mode.is_editing());
        assert_eq!(mode.submit_label(), "Add Expense");
        assert_eq!(mode.form_title(), "Add New Expense");
    }

    #[test]
    fn editing_mode_carries_the_record_id() {
        let mode = EditMode::Editing(17);
        assert_eq!(mode.editing_id(), Some(17));
        assert!(mode.is_editing());
        assert_eq!(mode.submit_label(), "Update Expense");
        assert_eq!(mode.form_title(), "Edit Expense");
    }

    #[test]
    fn default_phase_is_loading() {
        assert!(LoadPhase::default().is_loading());
        assert!(!LoadPhase::Ready.is_loading());
    }
}
