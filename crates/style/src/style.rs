//! The style value attached to components.
//!
//! Every property is optional. An unset property means "not specified at this
//! level": merging only overwrites set properties, and inheritance fills unset
//! inheritable properties from the parent's full style.

use crate::border::Border;
use crate::dimension::{Dimension, Margins, PageOrientation, PageSize};
use crate::font::{FontStyle, FontWeight};
use crate::list::{ListStylePosition, ListStyleType};
use crate::position::{DisplayMode, OverflowAction, OverflowSplit, PositionMode, TableRowRepeat};
use crate::text::{TextAlign, TextDecoration};
use quire_types::Color;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    // Font & Text (inherited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "color")]
    pub fill: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_style_type: Option<ListStyleType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_style_position: Option<ListStylePosition>,

    // Box
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,

    // Positioning & flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_action: Option<OverflowAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_split: Option<OverflowSplit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_row_repeat: Option<TableRowRepeat>,

    // Page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_orientation: Option<PageOrientation>,
}

macro_rules! overwrite_set {
    ($target:expr, $source:expr; $($field:ident),+ $(,)?) => {
        $(
            if $source.$field.is_some() {
                $target.$field = $source.$field.clone();
            }
        )+
    };
}

macro_rules! fill_unset {
    ($target:expr, $source:expr; $($field:ident),+ $(,)?) => {
        $(
            if $target.$field.is_none() {
                $target.$field = $source.$field.clone();
            }
        )+
    };
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites every property that `other` sets.
    pub fn merge(&mut self, other: &Style) {
        overwrite_set!(self, other;
            font_family, font_size, font_weight, font_style, line_height, text_align, fill,
            list_style_type, text_decoration, list_style_position,
            background_color, border, margin, padding, width, height,
            display, position, overflow_action, overflow_split, table_row_repeat,
            page_size, page_orientation,
        );
    }

    /// Consuming form of [`Style::merge`]
    pub fn merged(mut self, other: &Style) -> Self {
        self.merge(other);
        self
    }

    /// Fills unset inheritable properties from the parent's full style.
    ///
    /// Box, position and page properties never inherit.
    pub fn inherit_from(&mut self, parent: &Style) {
        fill_unset!(self, parent;
            font_family, font_size, font_weight, font_style, line_height, text_align, fill,
            list_style_type,
        );
    }

    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_position(mut self, position: PositionMode) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_margin(mut self, margin: Margins) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Effective page size after orientation
    pub fn page_extent(&self) -> quire_types::Size {
        self.page_size
            .unwrap_or_default()
            .oriented(self.page_orientation.unwrap_or_default())
    }
}
