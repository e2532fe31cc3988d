//! Display cells produced by the renderer.

use crate::api::Direction;
use crate::render::RowAction;

/// Check state of a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Indeterminate,
    Unchecked,
}

impl CheckState {
    /// State of a select-all box given `selected` of `total` rows.
    pub fn of(selected: usize, total: usize) -> Self {
        match selected {
            0 => Self::Unchecked,
            n if n >= total => Self::Checked,
            _ => Self::Indeterminate,
        }
    }
}

/// Sort indicator rendered next to a sortable header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
    Unsorted,
}

impl From<Option<Direction>> for SortIndicator {
    fn from(direction: Option<Direction>) -> Self {
        match direction {
            Some(Direction::Asc) => Self::Ascending,
            Some(Direction::Desc) => Self::Descending,
            None => Self::Unsorted,
        }
    }
}

impl SortIndicator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
            Self::Unsorted => "↕",
        }
    }
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderCell {
    /// The select-all checkbox.
    SelectAll(CheckState),
    /// A labelled header; `sort` is `None` for non-sortable columns.
    Label {
        key: Option<String>,
        text: String,
        sort: Option<SortIndicator>,
    },
}

impl HeaderCell {
    /// A header that cannot be activated.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Label {
            key: None,
            text: text.into(),
            sort: None,
        }
    }

    /// Plain-text form, for terminals and tests.
    pub fn text(&self) -> String {
        match self {
            Self::SelectAll(state) => checkbox_text(*state).to_string(),
            Self::Label { text, sort: Some(sort), .. } => format!("{} {}", text, sort.symbol()),
            Self::Label { text, .. } => text.clone(),
        }
    }
}

/// Visual tone of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
    Neutral,
}

/// An action affordance inside a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLink {
    pub label: &'static str,
    pub action: RowAction,
    /// Route visited by navigation actions.
    pub href: Option<String>,
}

/// One body cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(u64),
    Checkbox(bool),
    Badge {
        label: String,
        tone: Tone,
        action: Option<RowAction>,
    },
    Actions(Vec<ActionLink>),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Plain-text form, for terminals and tests.
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(n) => n.to_string(),
            Self::Checkbox(checked) => {
                let state = if *checked { CheckState::Checked } else { CheckState::Unchecked };
                checkbox_text(state).to_string()
            }
            Self::Badge { label, .. } => label.clone(),
            Self::Actions(links) => links
                .iter()
                .map(|l| l.label)
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}

fn checkbox_text(state: CheckState) -> &'static str {
    match state {
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
        CheckState::Unchecked => "[ ]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_state() {
        assert_eq!(CheckState::of(0, 10), CheckState::Unchecked);
        assert_eq!(CheckState::of(3, 10), CheckState::Indeterminate);
        assert_eq!(CheckState::of(10, 10), CheckState::Checked);
        assert_eq!(CheckState::of(0, 0), CheckState::Unchecked);
    }

    #[test]
    fn test_header_text() {
        let header = HeaderCell::Label {
            key: Some("name".into()),
            text: "Name".into(),
            sort: Some(SortIndicator::from(Some(Direction::Desc))),
        };
        assert_eq!(header.text(), "Name ▼");
        assert_eq!(HeaderCell::plain("No").text(), "No");
    }
}
