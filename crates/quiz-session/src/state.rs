use quiz_spec::AnswerMap;

/// Navigation pointer and live answers of the active questionnaire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor {
    pub index: usize,
    pub answers: AnswerMap,
}

impl Cursor {
    pub fn new(answers: AnswerMap) -> Self {
        Self { index: 0, answers }
    }
}

/// Lifecycle of a session; submitted-while-loading cannot be expressed.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading(Cursor),
    Active(Cursor),
    Submitted(Cursor),
}

impl SessionState {
    pub fn cursor(&self) -> &Cursor {
        match self {
            Self::Loading(cursor) | Self::Active(cursor) | Self::Submitted(cursor) => cursor,
        }
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        match self {
            Self::Loading(cursor) | Self::Active(cursor) | Self::Submitted(cursor) => cursor,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }

    /// Replaces the cursor; a submitted session becomes active again.
    pub fn restart(&mut self, cursor: Cursor) {
        *self = match self {
            Self::Loading(_) => Self::Loading(cursor),
            Self::Active(_) | Self::Submitted(_) => Self::Active(cursor),
        };
    }

    /// Clears the submitted flag, keeping the cursor.
    pub fn reopen(&mut self) {
        if let Self::Submitted(cursor) = self {
            *self = Self::Active(std::mem::take(cursor));
        }
    }

    pub fn finish_loading(&mut self) {
        if let Self::Loading(cursor) = self {
            *self = Self::Active(std::mem::take(cursor));
        }
    }

    /// Only an active session can become submitted.
    pub fn mark_submitted(&mut self) -> bool {
        match self {
            Self::Active(cursor) => {
                *self = Self::Submitted(std::mem::take(cursor));
                true
            }
            Self::Submitted(_) => true,
            Self::Loading(_) => false,
        }
    }
}
