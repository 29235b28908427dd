//! Display-ready snapshot of the palette.
//!
//! A [`PaletteViewModel`] is computed on demand from the selection, the active
//! list and the pin store. It holds no behavior and is never stored; renderers
//! (the console host, tests) only read it.

use super::modes::{ListMode, Overlay};
use super::state::SelectionState;
use crate::domain::{AppEntry, LaunchError, PinItem};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Dismissible message shown above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The global hotkey could not be registered. Search keeps working.
    HotkeyFailed(String),

    /// A launch request was rejected by the launch service.
    LaunchFailed(LaunchError),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::HotkeyFailed(reason) => format!("Global hotkey unavailable: {reason}"),
            Self::LaunchFailed(error) => format!("Launch failed: {error}"),
        }
    }
}

/// One row of the active list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// App name in search mode, pin alias in pins mode.
    pub label: String,

    /// Category in search mode, target path in pins mode.
    pub detail: String,

    pub path: String,

    pub is_selected: bool,

    pub is_pinned: bool,

    /// `(start, end)` char ranges of `label` matched by the query, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Everything a renderer needs to draw the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteViewModel {
    pub mode: ListMode,
    pub query: String,
    pub rows: Vec<Row>,
    pub selected_index: usize,
    pub overlay: Option<Overlay>,
    pub hotkey_label: Option<String>,
    pub notice: Option<Notice>,
}

impl PaletteViewModel {
    /// Builds the view model for `selection`.
    ///
    /// `results` is the ranked list for the current query and `pins` the pin
    /// list in display order; only the one matching the mode becomes rows.
    #[must_use]
    pub fn build(
        selection: &SelectionState,
        results: &[AppEntry],
        pins: &[PinItem],
        hotkey_label: Option<&str>,
        notice: Option<&Notice>,
    ) -> Self {
        let selected_index = selection.selected_index();
        let mode = selection.mode();

        let rows = match mode {
            ListMode::Pins => pins
                .iter()
                .enumerate()
                .map(|(index, pin)| Row {
                    label: pin.alias.clone(),
                    detail: pin.path.clone(),
                    path: pin.path.clone(),
                    is_selected: index == selected_index,
                    is_pinned: true,
                    highlight_ranges: Vec::new(),
                })
                .collect(),
            ListMode::Search => {
                let matcher = SkimMatcherV2::default();
                let query = selection.query().trim();
                results
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| Row {
                        label: entry.name.clone(),
                        detail: entry.category.clone(),
                        path: entry.path.clone(),
                        is_selected: index == selected_index,
                        is_pinned: pins.iter().any(|pin| pin.path == entry.path),
                        highlight_ranges: highlight_ranges(&matcher, &entry.name, query),
                    })
                    .collect()
            }
        };

        Self {
            mode,
            query: selection.query().to_string(),
            rows,
            selected_index,
            overlay: selection.overlay(),
            hotkey_label: hotkey_label.map(str::to_string),
            notice: notice.cloned(),
        }
    }

    /// The highlighted row, if the active list is non-empty.
    #[must_use]
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected_index)
    }
}

/// Coalesces the matcher's char indices into contiguous ranges.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for index in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == index => *end += 1,
            _ => ranges.push((index, index + 1)),
        }
    }
    ranges
}
