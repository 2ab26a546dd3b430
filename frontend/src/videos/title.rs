use crate::api::error::ApiError;
use crate::models::VideoRecord;
use std::rc::Rc;
use yew::functional::Reducible;

pub const INVALID_TITLE_MESSAGE: &str = "Title is too long or invalid";
pub const TITLE_UPDATE_FAILED_MESSAGE: &str = "Failed to update title";

/// Edit buffer behind a card's title input. `draft` is what the user sees,
/// `saved` is the last title the server accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleField {
    pub draft: String,
    pub saved: String,
    pub error: Option<&'static str>,
    pub saving: bool,
}

impl TitleField {
    pub fn new(title: &str) -> Self {
        Self {
            draft: title.to_string(),
            saved: title.to_string(),
            error: None,
            saving: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }

    pub fn edit(&mut self, value: String) {
        self.draft = value;
        self.error = None;
    }

    /// Called on blur. Returns the title to send, if it changed.
    pub fn begin_save(&mut self) -> Option<String> {
        if !self.is_dirty() || self.saving {
            return None;
        }
        self.saving = true;
        Some(self.draft.clone())
    }

    pub fn finish_save(&mut self, result: Result<&VideoRecord, &ApiError>) {
        self.saving = false;
        match result {
            Ok(record) => {
                self.saved = record.title.clone();
                self.draft = record.title.clone();
                self.error = None;
            }
            Err(err) => {
                self.draft = self.saved.clone();
                self.error = Some(if err.is_validation() {
                    INVALID_TITLE_MESSAGE
                } else {
                    TITLE_UPDATE_FAILED_MESSAGE
                });
            }
        }
    }

    /// Follows a canonical title change (push update, another tab) unless the
    /// user is in the middle of editing.
    pub fn sync_canonical(&mut self, title: &str) {
        if self.saved == title {
            return;
        }
        let editing = self.is_dirty() || self.saving;
        self.saved = title.to_string();
        if !editing {
            self.draft = title.to_string();
        }
    }
}

pub enum TitleAction {
    Edit(String),
    SaveStarted,
    SaveFinished(Result<VideoRecord, ApiError>),
    Canonical(String),
}

impl Reducible for TitleField {
    type Action = TitleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            TitleAction::Edit(value) => next.edit(value),
            TitleAction::SaveStarted => {
                next.begin_save();
            }
            TitleAction::SaveFinished(result) => next.finish_save(result.as_ref()),
            TitleAction::Canonical(title) => next.sync_canonical(&title),
        }
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reducer_runs_a_full_edit_cycle() {
        let field = Rc::new(TitleField::new("A"))
            .reduce(TitleAction::Edit("B".into()))
            .reduce(TitleAction::SaveStarted);
        assert!(field.saving);

        let field = field.reduce(TitleAction::SaveFinished(Ok(VideoRecord::new("1", "B", true))));
        assert_eq!(field.saved, "B");
        assert!(!field.saving);
    }

    #[test]
    fn unchanged_title_is_not_sent() {
        let mut field = TitleField::new("A");
        assert_eq!(field.begin_save(), None);
        field.edit("A".into());
        assert_eq!(field.begin_save(), None);
    }

    #[test]
    fn accepted_title_becomes_saved() {
        let mut field = TitleField::new("A");
        field.edit("Holiday".into());
        assert_eq!(field.begin_save(), Some("Holiday".to_string()));
        assert!(field.saving);
        assert_eq!(field.begin_save(), None);

        field.finish_save(Ok(&VideoRecord::new("1", "Holiday", true)));
        assert_eq!(field.saved, "Holiday");
        assert_eq!(field.draft, "Holiday");
        assert_eq!(field.error, None);
        assert!(!field.saving);
    }

    #[test]
    fn rejected_title_reverts_with_validation_message() {
        let mut field = TitleField::new("A");
        field.edit("ThisTitleIsWayTooLong".repeat(20));
        field.begin_save();
        field.finish_save(Err(&ApiError::from_status(400, "too long".into(), true)));
        assert_eq!(field.draft, "A");
        assert_eq!(field.saved, "A");
        assert_eq!(field.error, Some(INVALID_TITLE_MESSAGE));
    }

    #[test]
    fn other_failures_use_a_distinct_message() {
        let mut field = TitleField::new("A");
        field.edit("B".into());
        field.begin_save();
        field.finish_save(Err(&ApiError::Server {
            status: 500,
            body: String::new(),
        }));
        assert_eq!(field.draft, "A");
        assert_eq!(field.error, Some(TITLE_UPDATE_FAILED_MESSAGE));
        assert_ne!(INVALID_TITLE_MESSAGE, TITLE_UPDATE_FAILED_MESSAGE);

        field.finish_save(Err(&ApiError::Transport("offline".into())));
        assert_eq!(field.error, Some(TITLE_UPDATE_FAILED_MESSAGE));
    }

    #[test]
    fn typing_clears_the_error() {
        let mut field = TitleField::new("A");
        field.edit("B".into());
        field.begin_save();
        field.finish_save(Err(&ApiError::from_status(400, String::new(), true)));
        field.edit("C".into());
        assert_eq!(field.error, None);
    }

    #[test]
    fn canonical_changes_do_not_clobber_a_draft() {
        let mut field = TitleField::new("A");
        field.sync_canonical("From server");
        assert_eq!(field.draft, "From server");

        field.edit("Typing".into());
        field.sync_canonical("Pushed");
        assert_eq!(field.draft, "Typing");
        assert_eq!(field.saved, "Pushed");
    }
}
