//! Expand/collapse state for the details region of each card.
//!
//! Every card starts `Collapsed`. `Toggle` flips the state; `Collapse`
//! forces `Collapsed` and asks for focus to return to the card's primary
//! toggle. Cards never affect each other.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

const CARD_ID_PREFIX: &str = "card-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureState {
    #[default]
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureAction {
    Toggle,
    Collapse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    PrimaryToggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: DisclosureState,
    pub focus: Option<FocusTarget>,
}

impl DisclosureState {
    pub fn apply(self, action: DisclosureAction) -> Transition {
        match action {
            DisclosureAction::Toggle => Transition {
                state: match self {
                    Self::Collapsed => Self::Expanded,
                    Self::Expanded => Self::Collapsed,
                },
                focus: None,
            },
            DisclosureAction::Collapse => Transition {
                state: Self::Collapsed,
                focus: Some(FocusTarget::PrimaryToggle),
            },
        }
    }

    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }

    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Collapsed => "View full review",
            Self::Expanded => "Hide full review",
        }
    }
}

/// Disclosure state of every card on a page, keyed by card id.
///
/// Only expanded cards are stored. The set round-trips through a
/// comma-separated `expanded` query parameter so that each control can be
/// rendered as a link to the page in its next state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisclosureStates {
    expanded: BTreeSet<String>,
}

impl DisclosureStates {
    pub const QUERY_KEY: &'static str = "expanded";

    pub const fn none() -> Self {
        Self {
            expanded: BTreeSet::new(),
        }
    }

    pub fn all_expanded<I, S>(card_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expanded: card_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads the `expanded` query value. Anything that is not a card id is
    /// dropped, so only `card-{n}` ids ever reach rendered links.
    pub fn from_query(raw: Option<&str>) -> Self {
        let expanded = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .filter(|id| {
                let valid = is_card_id(id);
                if !valid {
                    debug!(id, "ignoring unknown card id in query");
                }
                valid
            })
            .map(str::to_string)
            .collect();
        Self { expanded }
    }

    pub fn to_query(&self) -> Option<String> {
        if self.expanded.is_empty() {
            return None;
        }
        let ids: Vec<&str> = self.expanded.iter().map(String::as_str).collect();
        Some(ids.join(","))
    }

    pub fn state_of(&self, card_id: &str) -> DisclosureState {
        if self.expanded.contains(card_id) {
            DisclosureState::Expanded
        } else {
            DisclosureState::Collapsed
        }
    }

    pub fn apply(&mut self, card_id: &str, action: DisclosureAction) -> Transition {
        let transition = self.state_of(card_id).apply(action);
        match transition.state {
            DisclosureState::Expanded => {
                self.expanded.insert(card_id.to_string());
            }
            DisclosureState::Collapsed => {
                self.expanded.remove(card_id);
            }
        }
        transition
    }

    /// Link to `base_path` with `card_id` moved to the state `action` leads to.
    ///
    /// The fragment points at the primary toggle when the transition asks for
    /// focus to return there, and at the card otherwise.
    pub fn href_after(&self, base_path: &str, card_id: &str, action: DisclosureAction) -> String {
        let mut next = self.clone();
        let transition = next.apply(card_id, action);
        let fragment = match transition.focus {
            Some(FocusTarget::PrimaryToggle) => toggle_id(card_id),
            None => card_id.to_string(),
        };

        match next.to_query() {
            Some(query) => format!("{base_path}?{}={query}#{fragment}", Self::QUERY_KEY),
            None => format!("{base_path}#{fragment}"),
        }
    }
}

/// Card ids follow the record's position in the `reviews` array.
pub fn card_id(position: usize) -> String {
    format!("{CARD_ID_PREFIX}{position}")
}

pub fn is_card_id(raw: &str) -> bool {
    raw.strip_prefix(CARD_ID_PREFIX)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

pub fn toggle_id(card_id: &str) -> String {
    format!("{card_id}-toggle")
}

pub fn region_id(card_id: &str) -> String {
    format!("{card_id}-details")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_collapse_forces_collapsed() {
        let expanded = DisclosureState::Collapsed.apply(DisclosureAction::Toggle);
        assert_eq!(expanded.state, DisclosureState::Expanded);
        assert_eq!(expanded.focus, None);

        let collapsed = expanded.state.apply(DisclosureAction::Toggle);
        assert_eq!(collapsed.state, DisclosureState::Collapsed);

        let forced = DisclosureState::Expanded.apply(DisclosureAction::Collapse);
        assert_eq!(forced.state, DisclosureState::Collapsed);
        assert_eq!(forced.focus, Some(FocusTarget::PrimaryToggle));

        let idle = DisclosureState::Collapsed.apply(DisclosureAction::Collapse);
        assert_eq!(idle.state, DisclosureState::Collapsed);
    }

    #[test]
    fn cards_are_independent() {
        let mut states = DisclosureStates::default();
        states.apply("card-0", DisclosureAction::Toggle);
        states.apply("card-2", DisclosureAction::Toggle);
        states.apply("card-0", DisclosureAction::Collapse);

        assert_eq!(states.state_of("card-0"), DisclosureState::Collapsed);
        assert_eq!(states.state_of("card-1"), DisclosureState::Collapsed);
        assert_eq!(states.state_of("card-2"), DisclosureState::Expanded);
    }

    #[test]
    fn query_round_trip_ignores_blank_ids() {
        let states = DisclosureStates::from_query(Some("card-3, ,card-1,"));
        assert_eq!(states.to_query().as_deref(), Some("card-1,card-3"));
        assert_eq!(DisclosureStates::from_query(None).to_query(), None);
    }

    #[test]
    fn query_drops_values_that_are_not_card_ids() {
        let states =
            DisclosureStates::from_query(Some("\"><script>alert(1)</script>,card-2,card-,card-x1"));
        assert_eq!(states.to_query().as_deref(), Some("card-2"));
        assert_eq!(
            states.href_after("/reviews", "card-0", DisclosureAction::Toggle),
            "/reviews?expanded=card-0,card-2#card-0"
        );
        assert!(is_card_id("card-17"));
        assert!(!is_card_id("card-1a"));
        assert_eq!(card_id(4), "card-4");
    }

    #[test]
    fn hrefs_encode_next_state_and_focus_target() {
        let states = DisclosureStates::from_query(Some("card-1"));

        assert_eq!(
            states.href_after("/reviews", "card-0", DisclosureAction::Toggle),
            "/reviews?expanded=card-0,card-1#card-0"
        );
        assert_eq!(
            states.href_after("/reviews", "card-1", DisclosureAction::Collapse),
            "/reviews#card-1-toggle"
        );
    }
}
