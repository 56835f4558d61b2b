//! nom parsers for CSS-like style values and inline `style` attributes.

use crate::border::{Border, BorderStyle};
use crate::dimension::{Dimension, Margins, PageOrientation, PageSize};
use crate::font::{FontStyle, FontWeight};
use crate::list::{ListStylePosition, ListStyleType};
use crate::position::{DisplayMode, OverflowAction, OverflowSplit, PositionMode, TableRowRepeat};
use crate::style::Style;
use crate::text::{TextAlign, TextDecoration};
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while, take_while1};
use nom::character::complete::{char, digit1, multispace0, space1};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded, separated_pair, terminated};
use nom::{IResult, Parser};
use quire_types::Color;
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

fn invalid(property: &str, value: &str) -> StyleParseError {
    StyleParseError::InvalidValue {
        property: property.to_string(),
        value: value.to_string(),
    }
}

// --- Helper Parsers ---

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize((digit1, opt((char('.'), digit1)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

/// Runs a parser that must consume the whole (trimmed) input.
pub fn run_parser<'a, T, P>(mut parser: P, input: &'a str) -> Result<T, StyleParseError>
where
    P: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

// --- Lengths ---

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        value(1.0, tag_no_case("pt")),
        value(1.0, tag_no_case("px")),
        value(72.0, tag_no_case("in")),
        value(28.35, tag_no_case("cm")),
        value(2.835, tag_no_case("mm")),
    ))
    .parse(input)
}

/// Parses a length with optional unit into points (e.g. "12pt", "1in", "10").
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    map((parse_f32, opt(parse_unit)), |(v, unit)| v * unit.unwrap_or(1.0)).parse(input)
}

/// Parses a length, a percentage or `auto`.
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    alt((
        value(Dimension::Auto, tag_no_case("auto")),
        map(terminated(parse_f32, char('%')), Dimension::Percent),
        map(parse_length, Dimension::Pt),
    ))
    .parse(input)
}

/// Parses 1 to 4 space separated lengths using CSS shorthand rules.
pub fn parse_shorthand_margins(input: &str) -> Result<Margins, StyleParseError> {
    let parts = run_parser(separated_list1(space1, parse_length), input)?;
    match parts.as_slice() {
        [all] => Ok(Margins::all(*all)),
        [v, h] => Ok(Margins::new(*v, *h, *v, *h)),
        [t, h, b] => Ok(Margins::new(*t, *h, *b, *h)),
        [t, r, b, l] => Ok(Margins::new(*t, *r, *b, *l)),
        _ => Err(StyleParseError::Parse(format!(
            "Invalid number of values for margin/padding shorthand: got {}, expected 1 to 4.",
            parts.len()
        ))),
    }
}

// --- Colour & Border ---

/// Parses `#rgb`, `#rrggbb` or a colour name.
pub fn parse_color(input: &str) -> IResult<&str, Color> {
    alt((
        map_res(
            recognize(preceded(char('#'), take_while1(|c: char| c.is_ascii_hexdigit()))),
            |s: &str| s.parse::<Color>(),
        ),
        map_res(take_while1(|c: char| c.is_ascii_alphabetic()), |s: &str| {
            s.parse::<Color>()
        }),
    ))
    .parse(input)
}

pub fn parse_border_style(input: &str) -> IResult<&str, BorderStyle> {
    alt((
        value(BorderStyle::Solid, tag_no_case("solid")),
        value(BorderStyle::Dashed, tag_no_case("dashed")),
        value(BorderStyle::Dotted, tag_no_case("dotted")),
        value(BorderStyle::None, tag_no_case("none")),
    ))
    .parse(input)
}

/// Parses a border shorthand such as "2pt solid #00ff00" or "none".
pub fn parse_border(input: &str) -> IResult<&str, Border> {
    alt((
        map((ws(parse_length), ws(parse_border_style), ws(parse_color)), |(width, style, color)| {
            Border { width, style, color }
        }),
        value(Border::default(), tag_no_case("none")),
    ))
    .parse(input)
}

// --- Keywords ---

fn keyword<T: Copy>(property: &str, text: &str, table: &[(&str, T)]) -> Result<T, StyleParseError> {
    let lowered = text.trim().to_ascii_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, v)| *v)
        .ok_or_else(|| invalid(property, text))
}

pub fn parse_font_weight(s: &str) -> Result<FontWeight, StyleParseError> {
    keyword(
        "font-weight",
        s,
        &[
            ("light", FontWeight::Light),
            ("regular", FontWeight::Regular),
            ("normal", FontWeight::Regular),
            ("bold", FontWeight::Bold),
        ],
    )
    .or_else(|_| {
        s.trim()
            .parse::<u16>()
            .map(FontWeight::Numeric)
            .map_err(|_| invalid("font-weight", s))
    })
}

pub fn parse_font_style(s: &str) -> Result<FontStyle, StyleParseError> {
    keyword(
        "font-style",
        s,
        &[
            ("normal", FontStyle::Normal),
            ("italic", FontStyle::Italic),
            ("oblique", FontStyle::Oblique),
        ],
    )
}

pub fn parse_page_size(s: &str) -> Result<PageSize, StyleParseError> {
    keyword(
        "page-size",
        s,
        &[
            ("a4", PageSize::A4),
            ("a3", PageSize::A3),
            ("letter", PageSize::Letter),
            ("legal", PageSize::Legal),
        ],
    )
}

fn parse_display(s: &str) -> Result<DisplayMode, StyleParseError> {
    keyword(
        "display",
        s,
        &[
            ("inline", DisplayMode::Inline),
            ("block", DisplayMode::Block),
            ("table-cell", DisplayMode::TableCell),
            ("none", DisplayMode::Invisible),
        ],
    )
}

fn parse_text_decoration(s: &str) -> Result<TextDecoration, StyleParseError> {
    keyword(
        "text-decoration",
        s,
        &[
            ("none", TextDecoration::None),
            ("underline", TextDecoration::Underline),
            ("overline", TextDecoration::Overline),
            ("line-through", TextDecoration::LineThrough),
        ],
    )
}

// --- Style Application ---

/// Applies one `name: value` declaration to `style`. Unknown names are ignored.
pub fn apply_style_property(
    style: &mut Style,
    name: &str,
    text: &str,
) -> Result<(), StyleParseError> {
    match name.to_ascii_lowercase().as_str() {
        "font-family" => {
            style.font_family = Some(text.trim().trim_matches(['\'', '"']).to_string())
        }
        "font-size" => style.font_size = Some(run_parser(parse_length, text)?),
        "font-weight" => style.font_weight = Some(parse_font_weight(text)?),
        "font-style" => style.font_style = Some(parse_font_style(text)?),
        "line-height" => style.line_height = Some(run_parser(parse_length, text)?),
        "text-align" => {
            style.text_align = Some(keyword(
                "text-align",
                text,
                &[
                    ("left", TextAlign::Left),
                    ("right", TextAlign::Right),
                    ("center", TextAlign::Center),
                    ("justify", TextAlign::Justify),
                ],
            )?)
        }
        "text-decoration" => style.text_decoration = Some(parse_text_decoration(text)?),
        "color" | "fill" => style.fill = Some(run_parser(parse_color, text)?),
        "background-color" => style.background_color = Some(run_parser(parse_color, text)?),
        "border" => style.border = Some(run_parser(parse_border, text)?),
        "margin" => style.margin = Some(parse_shorthand_margins(text)?),
        "margin-top" => {
            let margin = style.margin.get_or_insert_with(Default::default);
            margin.top = run_parser(parse_length, text)?;
        }
        "margin-right" => {
            let margin = style.margin.get_or_insert_with(Default::default);
            margin.right = run_parser(parse_length, text)?;
        }
        "margin-bottom" => {
            let margin = style.margin.get_or_insert_with(Default::default);
            margin.bottom = run_parser(parse_length, text)?;
        }
        "margin-left" => {
            let margin = style.margin.get_or_insert_with(Default::default);
            margin.left = run_parser(parse_length, text)?;
        }
        "padding" => style.padding = Some(parse_shorthand_margins(text)?),
        "width" => style.width = Some(run_parser(parse_dimension, text)?),
        "height" => style.height = Some(run_parser(parse_dimension, text)?),
        "display" => style.display = Some(parse_display(text)?),
        "position" => {
            style.position = Some(keyword(
                "position",
                text,
                &[
                    ("static", PositionMode::Static),
                    ("relative", PositionMode::Relative),
                    ("absolute", PositionMode::Absolute),
                ],
            )?)
        }
        "overflow" => {
            style.overflow_action = Some(keyword(
                "overflow",
                text,
                &[
                    ("new-page", OverflowAction::NewPage),
                    ("truncate", OverflowAction::Truncate),
                    ("hidden", OverflowAction::Truncate),
                    ("none", OverflowAction::None),
                ],
            )?)
        }
        "overflow-split" | "page-break-inside" => {
            style.overflow_split = Some(keyword(
                name,
                text,
                &[
                    ("any", OverflowSplit::Any),
                    ("auto", OverflowSplit::Any),
                    ("never", OverflowSplit::Never),
                    ("avoid", OverflowSplit::Never),
                ],
            )?)
        }
        "repeat" => {
            style.table_row_repeat = Some(keyword(
                "repeat",
                text,
                &[
                    ("none", TableRowRepeat::None),
                    ("repeat-at-top", TableRowRepeat::RepeatAtTop),
                ],
            )?)
        }
        "list-style-type" => {
            style.list_style_type = Some(keyword(
                "list-style-type",
                text,
                &[
                    ("disc", ListStyleType::Disc),
                    ("circle", ListStyleType::Circle),
                    ("square", ListStyleType::Square),
                    ("decimal", ListStyleType::Decimal),
                    ("lower-alpha", ListStyleType::LowerAlpha),
                    ("upper-alpha", ListStyleType::UpperAlpha),
                    ("none", ListStyleType::None),
                ],
            )?)
        }
        "list-style-position" => {
            style.list_style_position = Some(keyword(
                "list-style-position",
                text,
                &[
                    ("inside", ListStylePosition::Inside),
                    ("outside", ListStylePosition::Outside),
                ],
            )?)
        }
        "page-size" => style.page_size = Some(parse_page_size(text)?),
        "page-orientation" => {
            style.page_orientation = Some(keyword(
                "page-orientation",
                text,
                &[
                    ("portrait", PageOrientation::Portrait),
                    ("landscape", PageOrientation::Landscape),
                ],
            )?)
        }
        _ => {}
    };
    Ok(())
}

fn property_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-').parse(input)
}

fn declaration(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(ws(property_name), char(':'), take_while(|c: char| c != ';')).parse(input)
}

/// Parses an inline `style="key: value; ..."` attribute into a new style.
pub fn parse_inline_css(css: &str) -> Result<Style, StyleParseError> {
    let mut style = Style::default();
    for text in css.split(';').map(str::trim).filter(|d| !d.is_empty()) {
        let (name, raw_value) = run_parser(declaration, text)?;
        if raw_value.trim().is_empty() {
            return Err(invalid(name, raw_value));
        }
        apply_style_property(&mut style, name, raw_value)?;
    }
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length() {
        assert_eq!(run_parser(parse_length, "12pt").unwrap(), 12.0);
        assert_eq!(run_parser(parse_length, " 1in ").unwrap(), 72.0);
        assert_eq!(run_parser(parse_length, "10").unwrap(), 10.0);
        assert_eq!(run_parser(parse_length, "-.5pt").unwrap(), -0.5);
        assert!(run_parser(parse_length, "abc").is_err());
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(run_parser(parse_dimension, "12pt").unwrap(), Dimension::Pt(12.0));
        assert_eq!(run_parser(parse_dimension, "50%").unwrap(), Dimension::Percent(50.0));
        assert_eq!(run_parser(parse_dimension, "AUTO").unwrap(), Dimension::Auto);
        assert!(run_parser(parse_dimension, "50p").is_err());
    }

    #[test]
    fn test_parse_shorthand_margins() {
        assert_eq!(parse_shorthand_margins("10pt").unwrap(), Margins::all(10.0));
        assert_eq!(
            parse_shorthand_margins("1 2 3").unwrap(),
            Margins::new(1.0, 2.0, 3.0, 2.0)
        );
        assert!(parse_shorthand_margins("1 2 3 4 5").is_err());
    }

    #[test]
    fn test_parse_border_and_color() {
        let border = run_parser(parse_border, "2pt solid #00ff00").unwrap();
        assert_eq!(border, Border::solid(2.0, Color::rgb(0, 255, 0)));
        assert!(!run_parser(parse_border, "none").unwrap().is_visible());
        assert_eq!(run_parser(parse_color, "white").unwrap(), Color::WHITE);
    }

    #[test]
    fn test_parse_inline_css() {
        let style = parse_inline_css(
            "font-size: 14pt; font-weight: bold;color:#333 ; margin: 4pt 8pt; overflow-split: never;",
        )
        .unwrap();

        assert_eq!(style.font_size, Some(14.0));
        assert_eq!(style.font_weight, Some(FontWeight::Bold));
        assert_eq!(style.fill, Some(Color::gray(0x33)));
        assert_eq!(style.margin, Some(Margins::new(4.0, 8.0, 4.0, 8.0)));
        assert_eq!(style.overflow_split, Some(OverflowSplit::Never));
    }

    #[test]
    fn test_inline_css_rejects_bad_values() {
        assert!(matches!(
            parse_inline_css("font-style: sideways"),
            Err(StyleParseError::InvalidValue { .. })
        ));
        assert!(parse_inline_css("color:").is_err());
        assert!(parse_inline_css("unknown-thing: 3").unwrap().is_empty());
    }
}
