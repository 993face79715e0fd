//! Which feature is selected, kept in step with the display panel.

use geojson_show_format::DisplayPanel;
use geojson_show_map_models::DisplayId;
use serde::Serialize;

/// Selection state of the map.
///
/// A feature can be selected before its display entry has arrived from the
/// formatter; the panel then simply has nothing marked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum Selection {
    /// Nothing selected.
    #[default]
    Unselected,
    /// The feature with this display identifier is selected.
    Selected(DisplayId),
}

impl Selection {
    /// Handles a click on a feature layer, replacing any previous
    /// selection.
    pub fn on_layer_click(&mut self, id: &DisplayId, panel: &mut DisplayPanel) {
        log::debug!("Selecting {id}");
        panel.select(id);
        *self = Self::Selected(id.clone());
    }

    /// Handles a click on the map background.
    pub fn on_background_click(&mut self, panel: &mut DisplayPanel) {
        panel.clear_selection();
        *self = Self::Unselected;
    }

    /// The selected feature's identifier.
    #[must_use]
    pub const fn selected(&self) -> Option<&DisplayId> {
        match self {
            Self::Unselected => None,
            Self::Selected(id) => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use geojson_show_format::DisplayEntry;

    use super::*;

    fn panel() -> DisplayPanel {
        let mut panel = DisplayPanel::new();
        for i in 0..3 {
            panel.append(DisplayEntry::raw(DisplayId::for_index(i), String::new()));
        }
        panel
    }

    #[test]
    fn clicking_a_then_b_then_background() {
        let mut panel = panel();
        let mut selection = Selection::default();
        let a = DisplayId::for_index(0);
        let b = DisplayId::for_index(2);

        selection.on_layer_click(&a, &mut panel);
        assert_eq!(selection, Selection::Selected(a));
        assert_eq!(panel.selected(), selection.selected());

        selection.on_layer_click(&b, &mut panel);
        assert_eq!(selection.selected(), Some(&b));
        assert_eq!(panel.selected(), Some(&b));
        assert_eq!(panel.scrolled_to(), Some(&b));

        selection.on_background_click(&mut panel);
        assert_eq!(selection, Selection::Unselected);
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn selecting_before_the_entry_arrives_marks_nothing() {
        let mut panel = DisplayPanel::new();
        let mut selection = Selection::default();
        let id = DisplayId::for_index(0);

        selection.on_layer_click(&id, &mut panel);

        assert_eq!(selection.selected(), Some(&id));
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn serializes_with_state_tag() {
        assert_eq!(
            serde_json::to_value(Selection::Selected(DisplayId::for_index(1))).unwrap(),
            serde_json::json!({ "state": "selected", "id": "show-2" })
        );
        assert_eq!(
            serde_json::to_value(Selection::Unselected).unwrap(),
            serde_json::json!({ "state": "unselected" })
        );
    }
}
