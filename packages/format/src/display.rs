//! The display panel holding one text entry per feature.

use geojson_show_map_models::DisplayId;
use serde::Serialize;

/// One feature's text in the display panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEntry {
    /// Identifier stamped onto the feature at load time.
    pub id: DisplayId,
    /// Formatted text, or the raw serialisation when formatting failed.
    pub text: String,
    /// Whether `text` came back from the formatter.
    pub formatted: bool,
}

impl DisplayEntry {
    /// Creates an entry holding formatter output.
    #[must_use]
    pub const fn formatted(id: DisplayId, text: String) -> Self {
        Self {
            id,
            text,
            formatted: true,
        }
    }

    /// Creates an entry holding unformatted text.
    #[must_use]
    pub const fn raw(id: DisplayId, text: String) -> Self {
        Self {
            id,
            text,
            formatted: false,
        }
    }
}

/// An ordered list of entries, addressable by [`DisplayId`].
///
/// At most one entry is marked selected at a time. Selecting an entry also
/// records it as the entry scrolled into view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayPanel {
    entries: Vec<DisplayEntry>,
    selected: Option<DisplayId>,
    scrolled_to: Option<DisplayId>,
}

impl DisplayPanel {
    /// Creates an empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the end of the panel.
    pub fn append(&mut self, entry: DisplayEntry) {
        log::trace!("Appending display entry {}", entry.id);
        self.entries.push(entry);
    }

    /// Entries in the order they were appended.
    #[must_use]
    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    /// Looks up the entry for `id`.
    #[must_use]
    pub fn entry(&self, id: &DisplayId) -> Option<&DisplayEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the panel has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Marks the entry for `id` as selected and scrolls it into view,
    /// unmarking any previous selection first.
    ///
    /// Returns `false` (leaving nothing selected) when no entry has that
    /// identifier yet.
    pub fn select(&mut self, id: &DisplayId) -> bool {
        self.clear_selection();

        if self.entry(id).is_none() {
            log::debug!("No display entry for {id}");
            return false;
        }

        self.selected = Some(id.clone());
        self.scrolled_to = Some(id.clone());
        true
    }

    /// Removes every entry along with the selection and scroll target.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
        self.scrolled_to = None;
    }

    /// Unmarks the selected entry, if any.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The currently selected entry's identifier.
    #[must_use]
    pub const fn selected(&self) -> Option<&DisplayId> {
        self.selected.as_ref()
    }

    /// The entry most recently scrolled into view.
    #[must_use]
    pub const fn scrolled_to(&self) -> Option<&DisplayId> {
        self.scrolled_to.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_with(count: usize) -> DisplayPanel {
        let mut panel = DisplayPanel::new();
        for i in 0..count {
            panel.append(DisplayEntry::raw(DisplayId::for_index(i), format!("{i}")));
        }
        panel
    }

    #[test]
    fn entries_are_addressable_by_id() {
        let panel = panel_with(3);
        assert_eq!(panel.len(), 3);
        assert_eq!(panel.entry(&DisplayId::for_index(1)).unwrap().text, "1");
        assert!(panel.entry(&DisplayId::for_index(7)).is_none());
    }

    #[test]
    fn selecting_replaces_previous_selection() {
        let mut panel = panel_with(2);
        let a = DisplayId::for_index(0);
        let b = DisplayId::for_index(1);

        assert!(panel.select(&a));
        assert!(panel.select(&b));
        assert_eq!(panel.selected(), Some(&b));
        assert_eq!(panel.scrolled_to(), Some(&b));

        panel.clear_selection();
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn clearing_drops_entries_and_selection() {
        let mut panel = panel_with(2);
        assert!(panel.select(&DisplayId::for_index(1)));

        panel.clear();

        assert!(panel.is_empty());
        assert_eq!(panel.selected(), None);
        assert_eq!(panel.scrolled_to(), None);
    }

    #[test]
    fn selecting_unknown_entry_leaves_nothing_selected() {
        let mut panel = panel_with(1);
        assert!(panel.select(&DisplayId::for_index(0)));
        assert!(!panel.select(&DisplayId::for_index(5)));
        assert_eq!(panel.selected(), None);
    }
}
