//! Create-vs-edit mode shared by every CRUD form draft.

/// Whether a form draft creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode<Id> {
    #[default]
    Create,
    Edit(Id),
}

impl<Id> FormMode<Id> {
    pub fn is_create(&self) -> bool {
        matches!(self, FormMode::Create)
    }

    /// Target id when editing.
    pub fn editing(&self) -> Option<&Id> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }
}
