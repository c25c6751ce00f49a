/// Which of the reading's edit panels is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Collapsed,
    Editing,
    DeadlineEditing,
}

/// Visibility of the four per-reading panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    pub slider: bool,
    pub update_button: bool,
    pub save_button: bool,
    pub deadline: bool,
}

impl PanelState {
    /// Primary toggle behind the "Update" button.
    pub fn toggle_edit(self) -> Self {
        match self {
            Self::Collapsed => Self::Editing,
            Self::Editing | Self::DeadlineEditing => Self::Collapsed,
        }
    }

    /// Secondary toggle swapping the slider for the deadline form.
    pub fn toggle_deadline(self) -> Self {
        match self {
            Self::Collapsed | Self::Editing => Self::DeadlineEditing,
            Self::DeadlineEditing => Self::Editing,
        }
    }

    pub fn is_open(self) -> bool {
        self != Self::Collapsed
    }

    pub fn visibility(self) -> PanelVisibility {
        let slider = self == Self::Editing;
        PanelVisibility {
            slider,
            update_button: !slider,
            save_button: self.is_open(),
            deadline: self == Self::DeadlineEditing,
        }
    }
}

/// Page-level pair of stats blocks, only one shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsView {
    #[default]
    Summary,
    Progress,
}

impl StatsView {
    pub fn toggle(self) -> Self {
        match self {
            Self::Summary => Self::Progress,
            Self::Progress => Self::Summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PanelState; 3] = [
        PanelState::Collapsed,
        PanelState::Editing,
        PanelState::DeadlineEditing,
    ];

    #[test]
    fn collapsed_shows_only_update_button() {
        let v = PanelState::Collapsed.visibility();
        assert!(v.update_button);
        assert!(!v.slider && !v.save_button && !v.deadline);
    }

    #[test]
    fn edit_toggle_is_its_own_inverse_from_collapsed() {
        let state = PanelState::Collapsed;
        assert_eq!(state.toggle_edit(), PanelState::Editing);
        assert_eq!(state.toggle_edit().toggle_edit(), state);
    }

    #[test]
    fn deadline_toggle_swaps_slider_and_keeps_save() {
        let editing = PanelState::Editing;
        let deadline = editing.toggle_deadline();
        assert_eq!(deadline, PanelState::DeadlineEditing);
        assert_eq!(deadline.toggle_deadline(), editing);

        let v = deadline.visibility();
        assert!(v.deadline && v.save_button && !v.slider);
    }

    #[test]
    fn invariants_hold_in_every_state() {
        for state in ALL {
            let v = state.visibility();
            assert!(!(v.slider && v.deadline), "{state:?}");
            assert_eq!(v.update_button, !v.slider, "{state:?}");
            assert_eq!(v.save_button, v.slider || v.deadline, "{state:?}");
        }
    }

    #[test]
    fn closing_from_deadline_collapses() {
        assert_eq!(
            PanelState::DeadlineEditing.toggle_edit(),
            PanelState::Collapsed
        );
    }

    #[test]
    fn stats_view_alternates() {
        assert_eq!(StatsView::Summary.toggle(), StatsView::Progress);
        assert_eq!(StatsView::Summary.toggle().toggle(), StatsView::Summary);
    }
}
