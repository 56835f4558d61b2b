//! Display, positioning and overflow behaviour of a component's box.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    #[default]
    Inline,
    Block,
    TableCell,
    Invisible,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PositionMode {
    #[default]
    Static,
    Relative,
    Absolute,
}

/// What layout does with content that does not fit its region.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowAction {
    #[default]
    NewPage,
    Truncate,
    None,
}

/// Whether a block may be split across regions or pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowSplit {
    #[default]
    Any,
    Never,
}

/// Repetition of header rows on each page a table spans.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TableRowRepeat {
    #[default]
    None,
    RepeatAtTop,
}
