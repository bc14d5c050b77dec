use crate::viewmodel::EmployeeInput;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which tab of the dataset overview expander is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverviewTab {
    #[default]
    Preview,
    Statistics,
    Info,
}

/// The full UI state, independent of rendering. Everything derived from it
/// (prediction, charts, metrics) is recomputed each frame from the loaded
/// resources; nothing computed is stored here.
pub struct AppState {
    /// Current slider values.
    pub input: EmployeeInput,

    /// Latched once the predict button is pressed; until then only the
    /// dataset overview is rendered.
    pub triggered: bool,

    /// Active tab inside the dataset overview expander.
    pub overview_tab: OverviewTab,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            input: EmployeeInput::default(),
            triggered: false,
            overview_tab: OverviewTab::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_slider_midpoints() {
        let state = AppState::default();
        assert_eq!(state.input.age, 30);
        assert_eq!(state.input.experience, 5);
        assert!(!state.triggered);
        assert_eq!(state.overview_tab, OverviewTab::Preview);
    }
}
