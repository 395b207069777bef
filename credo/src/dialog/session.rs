//! Per-conversation state: cursor, collected answers, completion flag.

use crate::fields::{CollectedData, Field};

/// One conversation's wizard state.
///
/// Created empty with the cursor on [`Field::FIRST`]; mutated one field per valid
/// turn by [`AssessmentEngine::step`](super::AssessmentEngine::step); reset to the
/// initial state on explicit restart. Values only enter `data` after passing their
/// validator, and the cursor only advances on successful validation.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub(crate) cursor: Field,
    pub(crate) data: CollectedData,
    pub(crate) completed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            cursor: Field::FIRST,
            data: CollectedData::default(),
            completed: false,
        }
    }

    /// The field currently awaiting input.
    pub fn cursor(&self) -> Field {
        self.cursor
    }

    pub fn data(&self) -> &CollectedData {
        &self.data
    }

    /// True once an assessment has been delivered for this session.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Back to the initial state: empty map, cursor on the first field.
    pub fn reset(&mut self) {
        *self = Session::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldValue;

    #[test]
    fn new_session_starts_at_first_field_with_empty_map() {
        let session = Session::new();
        assert_eq!(session.cursor(), Field::FIRST);
        assert!(session.data().is_empty());
        assert!(!session.is_completed());
    }

    #[test]
    fn reset_restores_the_initial_state() {
        let mut session = Session::new();
        session.data.insert(Field::Age, FieldValue::Int(30));
        session.cursor = Field::Income;
        session.completed = true;

        session.reset();

        assert_eq!(session, Session::new());
    }
}
