//! List marker properties.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ListStyleType {
    #[default]
    Disc,
    Circle,
    Square,
    Decimal,
    LowerAlpha,
    UpperAlpha,
    None,
}

impl ListStyleType {
    /// Whether markers are numbered rather than glyph bullets
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            ListStyleType::Decimal | ListStyleType::LowerAlpha | ListStyleType::UpperAlpha
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ListStylePosition {
    Inside,
    #[default]
    Outside,
}
