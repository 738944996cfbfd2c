//! Serial number list controller.
//!
//! Owns the working view of entries plus the session state a presentation
//! layer renders: selection, pending input and the transient notice. Every
//! failure is recorded as an error notice before it is returned, so callers
//! can either match on the `Err` or just re-render.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::export::{render_csv, ExportReceipt, ExportSink};
use crate::models::{Entry, EntryId};
use crate::store::EntryStore;

/// Kind of transient message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// Transient message describing the outcome of the last operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// When the notice was raised (Unix ms)
    pub raised_at: i64,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raised_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Session-scoped set of selected entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<EntryId>,
}

impl Selection {
    pub fn contains(&self, id: &EntryId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn insert(&mut self, id: EntryId) -> bool {
        self.ids.insert(id)
    }

    fn remove(&mut self, id: &EntryId) -> bool {
        self.ids.remove(id)
    }

    fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer reference a live entry
    fn retain_present(&mut self, entries: &[Entry]) {
        self.ids
            .retain(|id| entries.iter().any(|entry| entry.id == *id));
    }
}

/// Keys a presentation layer forwards while the list has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Enter,
    Escape,
}

/// User intents a presentation layer forwards to the controller
///
/// Export is not an intent because it needs a sink; call
/// [`ListController::export_csv`] directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetInput(String),
    Submit,
    Add(String),
    Select(EntryId),
    Deselect(EntryId),
    ToggleSelection(EntryId),
    SelectAll,
    ClearSelection,
    DeleteOne(EntryId),
    DeleteAt(Vec<usize>),
    DeleteSelected,
    DeleteAll,
    KeyPress(Key),
    DismissNotice,
}

/// Controller for the serial number list, generic over its store
pub struct ListController<S: EntryStore> {
    store: S,
    entries: Vec<Entry>,
    selection: Selection,
    input: String,
    notice: Option<Notice>,
    notice_ttl: Option<Duration>,
}

impl<S: EntryStore> ListController<S> {
    /// Create a controller and load the current entries from `store`
    pub fn new(store: S) -> Result<Self> {
        let mut controller = Self {
            store,
            entries: Vec::new(),
            selection: Selection::default(),
            input: String::new(),
            notice: None,
            notice_ttl: None,
        };
        controller.refresh()?;
        Ok(controller)
    }

    /// Let notices expire after `ttl` (see [`Self::expire_notice`])
    #[must_use]
    pub const fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = Some(ttl);
        self
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Entries in store order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Message of the last failed operation, if it has not been cleared
    pub fn error_message(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| notice.kind == NoticeKind::Error)
            .map(|notice| notice.message.as_str())
    }

    /// Find a live entry by its exact value
    pub fn find(&self, value: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.matches(value))
    }

    /// Reload entries from the store and prune the selection
    pub fn refresh(&mut self) -> Result<()> {
        match self.store.query_all() {
            Ok(entries) => {
                self.entries = entries;
                self.selection.retain_present(&self.entries);
                Ok(())
            }
            Err(error) => self.fail(persistence(error)),
        }
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Add the pending input; it is cleared when the add succeeds
    pub fn submit(&mut self) -> Result<Option<Entry>> {
        let value = self.input.clone();
        self.add(&value)
    }

    /// Add a serial number
    ///
    /// Returns `Ok(None)` for an empty value. The value is stored exactly as
    /// given: no trimming or case folding.
    pub fn add(&mut self, value: &str) -> Result<Option<Entry>> {
        if value.is_empty() {
            return Ok(None);
        }

        if self.find(value).is_some() {
            return self.fail(Error::DuplicateEntry(value.to_string()));
        }

        let entry = match self.store.insert(value) {
            Ok(entry) => entry,
            Err(error) => return self.abort(error),
        };
        if let Err(error) = self.store.commit() {
            return self.abort(error);
        }

        self.notice = None;
        self.input.clear();
        self.reload_after_commit(|entries| entries.push(entry.clone()));
        tracing::debug!("Added serial number {}", entry.value);
        Ok(Some(entry))
    }

    /// Delete the entries at the given 0-based positions of the current list
    ///
    /// Every position is checked before anything is deleted.
    pub fn delete_at(&mut self, positions: &[usize]) -> Result<usize> {
        let len = self.entries.len();
        if let Some(&position) = positions.iter().find(|&&position| position >= len) {
            return self.fail(Error::PositionOutOfRange { position, len });
        }

        let ids = positions
            .iter()
            .map(|&position| self.entries[position].id)
            .collect::<Vec<_>>();
        self.delete_entries(&ids)
    }

    /// Delete a single entry
    pub fn delete_one(&mut self, id: &EntryId) -> Result<usize> {
        self.delete_entries(std::slice::from_ref(id))
    }

    /// Delete the given entries in one commit
    ///
    /// Repeated ids are deleted once. Unknown ids are rejected before
    /// anything is deleted.
    pub fn delete_entries(&mut self, ids: &[EntryId]) -> Result<usize> {
        if let Some(missing) = ids.iter().find(|id| !self.contains(id)) {
            return self.fail(Error::NotFound(missing.to_string()));
        }

        let mut seen = HashSet::new();
        let unique = ids
            .iter()
            .filter(|id| seen.insert(**id))
            .copied()
            .collect::<Vec<_>>();

        for id in &unique {
            if let Err(error) = self.store.delete(id) {
                return self.abort(error);
            }
        }
        if let Err(error) = self.store.commit() {
            return self.abort(error);
        }

        self.notice = None;
        self.reload_after_commit(|entries| entries.retain(|entry| !unique.contains(&entry.id)));
        tracing::debug!("Deleted {} serial number(s)", unique.len());
        Ok(unique.len())
    }

    /// Delete every selected entry and clear the selection
    ///
    /// An empty selection is a no-op.
    pub fn delete_selected(&mut self) -> Result<usize> {
        if self.selection.is_empty() {
            return Ok(0);
        }

        let ids = self
            .entries
            .iter()
            .filter(|entry| self.selection.contains(&entry.id))
            .map(|entry| entry.id)
            .collect::<Vec<_>>();
        let deleted = self.delete_entries(&ids)?;
        self.selection.clear();
        Ok(deleted)
    }

    /// Delete every entry and clear the selection
    pub fn delete_all(&mut self) -> Result<usize> {
        let ids = self.entries.iter().map(|entry| entry.id).collect::<Vec<_>>();
        let deleted = self.delete_entries(&ids)?;
        self.selection.clear();
        Ok(deleted)
    }

    /// Add an entry to the selection
    ///
    /// Like every successful selection change, this clears an error notice.
    /// Success notices stay until dismissed or expired.
    pub fn select(&mut self, id: &EntryId) -> Result<()> {
        if !self.contains(id) {
            return self.fail(Error::NotFound(id.to_string()));
        }
        self.selection.insert(*id);
        self.clear_error();
        Ok(())
    }

    /// Select the entry holding `value`
    pub fn select_value(&mut self, value: &str) -> Result<EntryId> {
        let Some(id) = self.find(value).map(|entry| entry.id) else {
            return self.fail(Error::NotFound(value.to_string()));
        };
        self.selection.insert(id);
        self.clear_error();
        Ok(id)
    }

    pub fn deselect(&mut self, id: &EntryId) {
        self.selection.remove(id);
        self.clear_error();
    }

    /// Flip membership; returns whether the entry is now selected
    pub fn toggle_selection(&mut self, id: &EntryId) -> Result<bool> {
        if self.selection.remove(id) {
            self.clear_error();
            return Ok(false);
        }
        self.select(id)?;
        Ok(true)
    }

    pub fn select_all(&mut self) {
        for entry in &self.entries {
            self.selection.insert(entry.id);
        }
        self.clear_error();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.clear_error();
    }

    /// Render the list as CSV and hand it to `sink`
    pub fn export_csv(&mut self, sink: &mut dyn ExportSink) -> Result<ExportReceipt> {
        let rendered = render_csv(&self.entries);

        let destination = match sink.write(rendered.as_bytes()) {
            Ok(destination) => destination,
            Err(error) => return self.fail(Error::Export(error.to_string())),
        };

        let receipt = ExportReceipt {
            destination,
            count: self.entries.len(),
        };
        self.notice = Some(Notice::new(
            NoticeKind::Success,
            format!(
                "Exported {} serial number(s) to {}",
                receipt.count, receipt.destination
            ),
        ));
        tracing::debug!("Exported {} serial number(s)", receipt.count);
        Ok(receipt)
    }

    /// Handle a key press while the list has focus
    ///
    /// Delete and Backspace delete the selection, Enter submits the pending
    /// input and Escape clears the selection.
    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Delete | Key::Backspace => self.delete_selected().map(|_| ()),
            Key::Enter => self.submit().map(|_| ()),
            Key::Escape => {
                self.clear_selection();
                Ok(())
            }
        }
    }

    /// Apply a user intent
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::SetInput(value) => {
                self.set_input(value);
                Ok(())
            }
            Intent::Submit => self.submit().map(|_| ()),
            Intent::Add(value) => self.add(&value).map(|_| ()),
            Intent::Select(id) => self.select(&id),
            Intent::Deselect(id) => {
                self.deselect(&id);
                Ok(())
            }
            Intent::ToggleSelection(id) => self.toggle_selection(&id).map(|_| ()),
            Intent::SelectAll => {
                self.select_all();
                Ok(())
            }
            Intent::ClearSelection => {
                self.clear_selection();
                Ok(())
            }
            Intent::DeleteOne(id) => self.delete_one(&id).map(|_| ()),
            Intent::DeleteAt(positions) => self.delete_at(&positions).map(|_| ()),
            Intent::DeleteSelected => self.delete_selected().map(|_| ()),
            Intent::DeleteAll => self.delete_all().map(|_| ()),
            Intent::KeyPress(key) => self.handle_key(key),
            Intent::DismissNotice => {
                self.dismiss_notice();
                Ok(())
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Clear the notice once it is older than the configured TTL
    ///
    /// Returns whether a notice was cleared.
    pub fn expire_notice(&mut self, now_ms: i64) -> bool {
        let (Some(ttl), Some(notice)) = (self.notice_ttl, self.notice.as_ref()) else {
            return false;
        };
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        if now_ms.saturating_sub(notice.raised_at) < ttl_ms {
            return false;
        }
        self.notice = None;
        true
    }

    fn contains(&self, id: &EntryId) -> bool {
        self.entries.iter().any(|entry| entry.id == *id)
    }

    fn clear_error(&mut self) {
        if self.error_message().is_some() {
            self.notice = None;
        }
    }

    /// Replace the view with the committed store contents
    ///
    /// The commit already succeeded, so a failed read is only logged and
    /// `apply_locally` brings the view up to date instead.
    fn reload_after_commit(&mut self, apply_locally: impl FnOnce(&mut Vec<Entry>)) {
        match self.store.query_all() {
            Ok(entries) => self.entries = entries,
            Err(error) => {
                tracing::warn!("Changes were saved but reloading the list failed: {error}");
                apply_locally(&mut self.entries);
            }
        }
        self.selection.retain_present(&self.entries);
    }

    /// Record `error` as the current notice and return it
    fn fail<T>(&mut self, error: Error) -> Result<T> {
        tracing::warn!("{error}");
        self.notice = Some(Notice::new(NoticeKind::Error, error.to_string()));
        Err(error)
    }

    /// Drop queued store changes, resync the view and fail with a
    /// persistence error
    fn abort<T>(&mut self, error: Error) -> Result<T> {
        self.store.discard_pending();
        if let Ok(entries) = self.store.query_all() {
            self.entries = entries;
            self.selection.retain_present(&self.entries);
        }
        self.fail(persistence(error))
    }
}

fn persistence(error: Error) -> Error {
    match error {
        Error::Persistence(_) => error,
        other => Error::Persistence(other.to_string()),
    }
}
