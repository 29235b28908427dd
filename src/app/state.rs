//! Selection state and its pure transition function.
//!
//! [`SelectionState`] tracks the query, the highlighted row and the lengths of
//! both lists. It is never mutated in place by callers: every change goes
//! through [`transition`], which returns the next state and at most one
//! [`Command`] for the session to act on.
//!
//! # Index discipline
//!
//! - any edit of the query resets the index to 0 in the same update
//! - after every transition the stored index is clamped to the active list
//! - [`SelectionState::selected_index`] clamps again on read
//!
//! A state built by hand with an out-of-range index therefore still reads
//! back a valid row.
//!
//! # Example
//!
//! ```rust
//! use quicklaunch::app::{transition, Intent, SelectionEvent, SelectionState};
//!
//! let state = SelectionState::new(3, 0);
//! let (state, _) = transition(&state, &SelectionEvent::Key(Intent::MoveDown));
//! assert_eq!(state.selected_index(), 1);
//!
//! let edited = SelectionEvent::QueryEdited { query: "co".into(), result_count: 5 };
//! let (state, _) = transition(&state, &edited);
//! assert_eq!(state.selected_index(), 0);
//! ```

use super::modes::{Intent, ListMode, Overlay};

/// Snapshot of the palette's selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    query: String,
    selected_index: usize,
    pin_count: usize,
    result_count: usize,
    overlay: Option<Overlay>,
}

/// Inputs to [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// A keyboard intent.
    Key(Intent),

    /// The query text changed and was re-ranked into `result_count` rows.
    QueryEdited { query: String, result_count: usize },

    /// The result list was re-ranked for the same query (roster refresh).
    ResultsChanged { result_count: usize },

    /// The pin list changed length. Mode and index are kept.
    PinsChanged { pin_count: usize },

    OverlayOpened(Overlay),
    OverlayClosed,

    /// Summon: blank query, first row, no overlay.
    Reset,

    /// Pointer selection of a row in the active list.
    Select(usize),
}

/// Effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Launch row `index` of the list active in `mode`.
    Launch { mode: ListMode, index: usize },

    /// Ask the window collaborator to hide.
    HideWindow,
}

impl SelectionState {
    /// Creates a state with a blank query (pins mode) and the first row selected.
    #[must_use]
    pub fn new(pin_count: usize, result_count: usize) -> Self {
        Self {
            pin_count,
            result_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn mode(&self) -> ListMode {
        ListMode::for_query(&self.query)
    }

    /// Length of the list the mode currently points at.
    #[must_use]
    pub fn active_len(&self) -> usize {
        match self.mode() {
            ListMode::Pins => self.pin_count,
            ListMode::Search => self.result_count,
        }
    }

    /// Highlighted row, always within `0..max(active_len, 1)`.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        clamp_index(self.selected_index, self.active_len())
    }

    #[must_use]
    pub const fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    #[must_use]
    pub const fn pin_count(&self) -> usize {
        self.pin_count
    }

    #[must_use]
    pub const fn result_count(&self) -> usize {
        self.result_count
    }

    fn normalized(mut self) -> Self {
        self.selected_index = self.selected_index();
        self
    }
}

const fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if index >= len {
        len - 1
    } else {
        index
    }
}

/// Computes the state following `event`.
///
/// Pure: `state` is left untouched and the same inputs always give the same
/// output.
#[must_use]
pub fn transition(state: &SelectionState, event: &SelectionEvent) -> (SelectionState, Option<Command>) {
    let mut next = state.clone().normalized();
    let mut command = None;

    match event {
        SelectionEvent::Key(intent) => command = apply_intent(&mut next, *intent),
        SelectionEvent::QueryEdited { query, result_count } => {
            next.query.clone_from(query);
            next.result_count = *result_count;
            next.selected_index = 0;
        }
        SelectionEvent::ResultsChanged { result_count } => next.result_count = *result_count,
        SelectionEvent::PinsChanged { pin_count } => next.pin_count = *pin_count,
        SelectionEvent::OverlayOpened(overlay) => next.overlay = Some(*overlay),
        SelectionEvent::OverlayClosed => next.overlay = None,
        SelectionEvent::Reset => {
            next.query.clear();
            next.selected_index = 0;
            next.overlay = None;
        }
        SelectionEvent::Select(index) => {
            if next.overlay.is_none() {
                next.selected_index = *index;
            }
        }
    }

    (next.normalized(), command)
}

fn apply_intent(state: &mut SelectionState, intent: Intent) -> Option<Command> {
    if state.overlay.is_some() {
        if intent == Intent::Cancel {
            state.overlay = None;
        }
        return None;
    }

    let len = state.active_len();
    match intent {
        Intent::MoveDown | Intent::Tab => {
            state.selected_index = clamp_index(state.selected_index + 1, len);
            None
        }
        Intent::MoveUp | Intent::BackTab => {
            state.selected_index = state.selected_index.saturating_sub(1);
            None
        }
        Intent::Confirm => (len > 0).then(|| Command::Launch {
            mode: state.mode(),
            index: state.selected_index,
        }),
        Intent::Cancel => {
            if state.query.is_empty() {
                Some(Command::HideWindow)
            } else {
                state.query.clear();
                state.selected_index = 0;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(state: &SelectionState, intent: Intent) -> (SelectionState, Option<Command>) {
        transition(state, &SelectionEvent::Key(intent))
    }

    fn typed(state: &SelectionState, query: &str, result_count: usize) -> SelectionState {
        let event = SelectionEvent::QueryEdited {
            query: query.to_string(),
            result_count,
        };
        transition(state, &event).0
    }

    #[test]
    fn mode_follows_trimmed_query() {
        let state = SelectionState::new(2, 0);
        assert_eq!(state.mode(), ListMode::Pins);
        assert_eq!(typed(&state, "  ", 8).mode(), ListMode::Pins);
        assert_eq!(typed(&state, " a ", 8).mode(), ListMode::Search);
    }

    #[test]
    fn movement_saturates_at_both_ends() {
        let mut state = SelectionState::new(3, 0);
        for _ in 0..5 {
            state = key(&state, Intent::Tab).0;
        }
        assert_eq!(state.selected_index(), 2);

        for _ in 0..5 {
            state = key(&state, Intent::BackTab).0;
        }
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn empty_list_pins_index_to_zero() {
        let state = SelectionState::new(0, 0);
        let (state, command) = key(&state, Intent::MoveDown);
        assert_eq!(state.selected_index(), 0);
        assert_eq!(key(&state, Intent::Confirm).1, None);
        assert_eq!(command, None);
    }

    #[test]
    fn query_edit_resets_index() {
        let state = typed(&SelectionState::new(0, 0), "c", 6);
        let state = key(&key(&state, Intent::MoveDown).0, Intent::MoveDown).0;
        assert_eq!(state.selected_index(), 2);

        let state = typed(&state, "co", 6);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn shrinking_list_clamps_index() {
        let mut state = SelectionState::new(5, 0);
        for _ in 0..4 {
            state = key(&state, Intent::MoveDown).0;
        }
        let (state, _) = transition(&state, &SelectionEvent::PinsChanged { pin_count: 2 });
        assert_eq!(state.selected_index(), 1);
        assert_eq!(state.mode(), ListMode::Pins);
    }

    #[test]
    fn confirm_launches_from_active_list() {
        let state = typed(&SelectionState::new(4, 0), "vs", 3);
        let state = key(&state, Intent::MoveDown).0;
        assert_eq!(
            key(&state, Intent::Confirm).1,
            Some(Command::Launch {
                mode: ListMode::Search,
                index: 1
            })
        );
    }

    #[test]
    fn cancel_unwinds_overlay_then_query_then_window() {
        let state = typed(&SelectionState::new(1, 0), "x", 1);
        let (state, _) = transition(&state, &SelectionEvent::OverlayOpened(Overlay::Settings));

        let (state, command) = key(&state, Intent::Cancel);
        assert_eq!(state.overlay(), None);
        assert_eq!(state.query(), "x");
        assert_eq!(command, None);

        let (state, command) = key(&state, Intent::Cancel);
        assert_eq!(state.query(), "");
        assert_eq!(command, None);

        assert_eq!(key(&state, Intent::Cancel).1, Some(Command::HideWindow));
    }

    #[test]
    fn overlay_swallows_navigation() {
        let state = SelectionState::new(3, 0);
        let (state, _) = transition(&state, &SelectionEvent::OverlayOpened(Overlay::Settings));
        let (state, command) = key(&state, Intent::MoveDown);
        assert_eq!(state.selected_index(), 0);
        assert_eq!(key(&state, Intent::Confirm).1, None);
        assert_eq!(command, None);
    }

    #[test]
    fn reset_returns_to_pins() {
        let state = typed(&SelectionState::new(2, 0), "code", 4);
        let state = key(&state, Intent::MoveDown).0;
        let (state, _) = transition(&state, &SelectionEvent::OverlayOpened(Overlay::Settings));

        let (state, command) = transition(&state, &SelectionEvent::Reset);
        assert_eq!(state.query(), "");
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.overlay(), None);
        assert_eq!(command, None);
    }

    #[test]
    fn transition_does_not_touch_input() {
        let before = SelectionState::new(3, 0);
        let snapshot = before.clone();
        let _ = key(&before, Intent::MoveDown);
        assert_eq!(before, snapshot);
    }
}
