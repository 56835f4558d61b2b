//! Style values for quire components: properties, merging and inheritance,
//! per-type base style chains, stylesheets and inline style parsing.

pub mod border;
pub mod cascade;
pub mod dimension;
pub mod font;
pub mod list;
pub mod parsers;
pub mod position;
pub mod style;
pub mod stylesheet;
pub mod text;

pub use border::{Border, BorderStyle};
pub use cascade::{no_defaults, resolve_full_style, StyleLayer, StyleTransform};
pub use dimension::{Dimension, Margins, PageOrientation, PageSize};
pub use font::{FontStyle, FontWeight};
pub use list::{ListStylePosition, ListStyleType};
pub use parsers::{parse_inline_css, StyleParseError};
pub use position::{DisplayMode, OverflowAction, OverflowSplit, PositionMode, TableRowRepeat};
pub use style::Style;
pub use stylesheet::Stylesheet;
pub use text::{TextAlign, TextDecoration};
