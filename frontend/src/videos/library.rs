//! The canonical list of the signed-in user's videos.
//!
//! Three sources feed it: the initial fetch, the server's push channel, and
//! the user's own confirmed uploads, renames and deletions. Every change goes
//! through [`VideoLibrary::reduce`] on the UI thread, so the reducer is the
//! only writer. Order is set by the initial fetch and only grows at the tail
//! on upload; every other change keeps positions.

use crate::models::{VideoId, VideoRecord};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryAction {
    LoadStarted,
    Loaded(Vec<VideoRecord>),
    LoadFailed(String),
    /// Push notification carrying the complete record.
    Processed(VideoRecord),
    Uploaded(VideoRecord),
    TitleUpdated(VideoRecord),
    Deleted(VideoId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoLibrary {
    records: Vec<VideoRecord>,
    loading: bool,
    load_error: Option<String>,
    // push events that arrived before the initial fetch settled
    pending: Vec<VideoRecord>,
    // uploads confirmed before the initial fetch settled
    uploaded: Vec<VideoRecord>,
}

impl VideoLibrary {
    /// State of a page that is about to fetch, so nothing renders as empty
    /// before the first response.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    fn position(&self, id: &VideoId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    fn apply_processed(&mut self, record: VideoRecord) {
        let id = record.id.clone();
        if !self.replace_in_place(record) {
            log::debug!("Dropping push update for unknown video {}", id);
        }
    }

    /// Processing is one-way: a stale payload cannot un-process a record.
    fn replace_in_place(&mut self, record: VideoRecord) -> bool {
        match self.position(&record.id) {
            Some(index) => {
                let was_processed = self.records[index].is_processed;
                self.records[index] = record;
                self.records[index].is_processed |= was_processed;
                true
            }
            None => false,
        }
    }
}

impl Reducible for VideoLibrary {
    type Action = LibraryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            LibraryAction::LoadStarted => {
                next.loading = true;
                next.load_error = None;
            }
            LibraryAction::Loaded(records) => {
                next.records = Vec::with_capacity(records.len());
                for record in records {
                    if next.position(&record.id).is_none() {
                        next.records.push(record);
                    } else {
                        log::warn!("Server listed video {} twice", record.id);
                    }
                }
                for record in std::mem::take(&mut next.uploaded) {
                    if next.position(&record.id).is_none() {
                        next.records.push(record);
                    }
                }
                next.loading = false;
                next.load_error = None;
                for record in std::mem::take(&mut next.pending) {
                    next.apply_processed(record);
                }
            }
            LibraryAction::LoadFailed(message) => {
                next.records.clear();
                next.pending.clear();
                next.uploaded.clear();
                next.loading = false;
                next.load_error = Some(message);
            }
            LibraryAction::Processed(record) => {
                if next.loading {
                    next.pending.push(record);
                } else {
                    next.apply_processed(record);
                }
            }
            LibraryAction::Uploaded(record) => {
                if next.loading {
                    next.uploaded.push(record.clone());
                }
                if !next.replace_in_place(record.clone()) {
                    next.records.push(record);
                }
            }
            LibraryAction::TitleUpdated(record) => {
                if !next.replace_in_place(record.clone()) {
                    log::debug!("Renamed video {} is no longer listed", record.id);
                }
            }
            LibraryAction::Deleted(id) => {
                next.records.retain(|r| r.id != id);
                next.uploaded.retain(|r| r.id != id);
            }
        }

        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, processed: bool) -> VideoRecord {
        VideoRecord::new(id, title, processed)
    }

    fn loaded(records: Vec<VideoRecord>) -> Rc<VideoLibrary> {
        Rc::new(VideoLibrary::default())
            .reduce(LibraryAction::LoadStarted)
            .reduce(LibraryAction::Loaded(records))
    }

    fn ids(library: &VideoLibrary) -> Vec<&str> {
        library.records().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn loading_state_tracks_initial_fetch() {
        let library = Rc::new(VideoLibrary::default()).reduce(LibraryAction::LoadStarted);
        assert!(library.is_loading());
        assert!(library.records().is_empty());

        let library = library.reduce(LibraryAction::Loaded(vec![
            record("3", "C", true),
            record("1", "A", false),
            record("2", "B", true),
        ]));
        assert!(!library.is_loading());
        assert_eq!(ids(&library), vec!["3", "1", "2"]);
    }

    #[test]
    fn failed_load_leaves_collection_empty() {
        let library = Rc::new(VideoLibrary::default())
            .reduce(LibraryAction::LoadStarted)
            .reduce(LibraryAction::Processed(record("1", "A", true)))
            .reduce(LibraryAction::LoadFailed("HTTP error 500".into()));
        assert!(library.records().is_empty());
        assert_eq!(library.load_error(), Some("HTTP error 500"));
        assert!(!library.is_loading());

        // buffered events were discarded with the failed load
        let library = library.reduce(LibraryAction::Loaded(vec![record("1", "A", false)]));
        assert!(!library.records()[0].is_processed);
    }

    #[test]
    fn push_event_marks_record_processed_in_place() {
        let library = loaded(vec![record("1", "A", false)]);
        let library = library.reduce(LibraryAction::Processed(record("1", "A", true)));
        assert_eq!(library.records(), &[record("1", "A", true)]);
    }

    #[test]
    fn push_replace_keeps_position_and_takes_payload() {
        let mut library = loaded(vec![
            record("1", "A", false),
            record("2", "B", false),
            record("3", "C", false),
        ]);
        let updates = [
            record("2", "B renamed", true),
            record("3", "C", true),
            record("2", "B again", true),
            record("1", "A", true),
        ];
        for update in updates {
            library = library.reduce(LibraryAction::Processed(update.clone()));
            let index = library.position(&update.id).unwrap();
            assert_eq!(library.records()[index], update);
            assert_eq!(ids(&library), vec!["1", "2", "3"]);
        }
    }

    #[test]
    fn processed_flag_never_reverts() {
        let library = loaded(vec![record("1", "A", true)]);
        let library = library.reduce(LibraryAction::Processed(record("1", "A2", false)));
        assert!(library.records()[0].is_processed);
        assert_eq!(library.records()[0].title, "A2");
    }

    #[test]
    fn push_for_unknown_id_is_dropped_after_load() {
        let library = loaded(vec![record("1", "A", false)]);
        let library = library.reduce(LibraryAction::Processed(record("9", "Z", true)));
        assert_eq!(ids(&library), vec!["1"]);
    }

    #[test]
    fn push_before_load_completes_is_applied_afterwards() {
        let library = Rc::new(VideoLibrary::default())
            .reduce(LibraryAction::LoadStarted)
            .reduce(LibraryAction::Processed(record("2", "B", true)))
            .reduce(LibraryAction::Processed(record("7", "X", true)))
            .reduce(LibraryAction::Loaded(vec![
                record("1", "A", false),
                record("2", "B", false),
            ]));
        assert_eq!(
            library.records(),
            &[record("1", "A", false), record("2", "B", true)]
        );
    }

    #[test]
    fn upload_appends_one_unprocessed_record_at_tail() {
        let library = loaded(vec![record("1", "A", true)]);
        let library = library.reduce(LibraryAction::Uploaded(record("2", "", false)));
        assert_eq!(
            library.records(),
            &[record("1", "A", true), record("2", "", false)]
        );
    }

    #[test]
    fn upload_preserves_prior_order() {
        let library = loaded(vec![
            record("5", "E", true),
            record("4", "D", false),
            record("6", "F", true),
        ]);
        let library = library.reduce(LibraryAction::Uploaded(record("7", "", false)));
        assert_eq!(ids(&library), vec!["5", "4", "6", "7"]);
        assert!(!library.records().last().unwrap().is_processed);
    }

    #[test]
    fn upload_during_initial_load_survives_the_fetch() {
        let library = Rc::new(VideoLibrary::loading())
            .reduce(LibraryAction::Uploaded(record("2", "", false)))
            .reduce(LibraryAction::Loaded(vec![record("1", "A", true)]));
        assert_eq!(
            library.records(),
            &[record("1", "A", true), record("2", "", false)]
        );

        let library = library.reduce(LibraryAction::Processed(record("2", "Clip", true)));
        assert_eq!(library.records()[1], record("2", "Clip", true));
    }

    #[test]
    fn fetched_copy_of_an_early_upload_is_not_duplicated() {
        let library = Rc::new(VideoLibrary::default())
            .reduce(LibraryAction::LoadStarted)
            .reduce(LibraryAction::Uploaded(record("2", "", false)))
            .reduce(LibraryAction::Loaded(vec![
                record("2", "", false),
                record("1", "A", true),
            ]));
        assert_eq!(ids(&library), vec!["2", "1"]);
    }

    #[test]
    fn early_upload_deleted_before_fetch_stays_deleted() {
        let library = Rc::new(VideoLibrary::loading())
            .reduce(LibraryAction::Uploaded(record("2", "", false)))
            .reduce(LibraryAction::Deleted(VideoId::from("2")))
            .reduce(LibraryAction::Loaded(vec![record("1", "A", true)]));
        assert_eq!(ids(&library), vec!["1"]);
    }

    #[test]
    fn page_starts_in_loading_state() {
        let library = Rc::new(VideoLibrary::loading());
        assert!(library.is_loading());
        assert!(library.records().is_empty());
        assert_eq!(library.load_error(), None);

        // a push before the first dispatch is held for the fetch
        let library = library
            .reduce(LibraryAction::Processed(record("1", "A", true)))
            .reduce(LibraryAction::Loaded(vec![record("1", "A", false)]));
        assert!(library.records()[0].is_processed);
    }

    #[test]
    fn duplicate_ids_from_server_keep_first() {
        let library = loaded(vec![
            record("1", "first", false),
            record("1", "second", false),
            record("2", "B", false),
        ]);
        assert_eq!(ids(&library), vec!["1", "2"]);
        assert_eq!(library.records()[0].title, "first");
    }

    #[test]
    fn delete_removes_exactly_the_target() {
        let library = loaded(vec![
            record("1", "A", true),
            record("2", "B", false),
            record("3", "C", true),
        ]);
        let before = library.records().len();
        let library = library.reduce(LibraryAction::Deleted(VideoId::from("2")));
        assert_eq!(library.records().len(), before - 1);
        assert_eq!(ids(&library), vec!["1", "3"]);
    }

    #[test]
    fn confirmed_rename_replaces_in_place() {
        let library = loaded(vec![record("1", "A", true), record("2", "B", true)]);
        let library = library.reduce(LibraryAction::TitleUpdated(record("1", "Renamed", true)));
        assert_eq!(
            library.records(),
            &[record("1", "Renamed", true), record("2", "B", true)]
        );

        // a rename that lands after a delete does not resurrect the record
        let library = library
            .reduce(LibraryAction::Deleted(VideoId::from("2")))
            .reduce(LibraryAction::TitleUpdated(record("2", "Ghost", true)));
        assert_eq!(ids(&library), vec!["1"]);
    }

    #[test]
    fn rename_and_push_race_is_last_write_wins() {
        let library = loaded(vec![record("1", "A", false)]);
        let library = library
            .reduce(LibraryAction::TitleUpdated(record("1", "Mine", false)))
            .reduce(LibraryAction::Processed(record("1", "A", true)));
        assert_eq!(library.records()[0].title, "A");

        let library = library.reduce(LibraryAction::TitleUpdated(record("1", "Mine", true)));
        assert_eq!(library.records()[0].title, "Mine");
    }
}
