use crate::capability::Capabilities;
use crate::component::Component;
use crate::components::PANEL_LAYER;
use crate::error::Result;
use crate::tree::ComponentTree;
use crate::wrapping::ComponentWrappingList;
use quire_style::{DisplayMode, FontWeight, OverflowSplit, StyleLayer, TableRowRepeat};
use quire_types::{ComponentId, ObjectType};

static TABLE_LAYER: StyleLayer = StyleLayer::extends(&PANEL_LAYER, "table", |style| style);

static ROW_LAYER: StyleLayer = StyleLayer::extends(&TABLE_LAYER, "row", |mut style| {
    style.overflow_split = Some(OverflowSplit::Never);
    style
});

static HEADER_ROW_LAYER: StyleLayer = StyleLayer::extends(&ROW_LAYER, "header-row", |mut style| {
    style.table_row_repeat = Some(TableRowRepeat::RepeatAtTop);
    style.with_font_weight(FontWeight::Bold)
});

static CELL_LAYER: StyleLayer = StyleLayer::extends(&PANEL_LAYER, "cell", |style| {
    style.with_display(DisplayMode::TableCell)
});

/// A grid of [`TableRow`]s. Rows may sit inside placeholders or be generated
/// by a `ForEach`; [`Table::rows`] sees through both.
#[derive(Debug, Default)]
pub struct Table {
    rows: Option<ComponentWrappingList<TableRow>>,
}

impl Table {
    /// Rows in document order, header rows included.
    pub fn rows(&self, tree: &ComponentTree) -> Vec<ComponentId> {
        self.rows.as_ref().map(|rows| rows.to_vec(tree)).unwrap_or_default()
    }

    pub fn header_rows(&self, tree: &ComponentTree) -> Vec<ComponentId> {
        self.rows(tree)
            .into_iter()
            .filter(|row| tree.get::<TableRow>(*row).is_some_and(|r| r.kind() == RowKind::Header))
            .collect()
    }
}

impl Component for Table {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("table")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &TABLE_LAYER
    }

    fn on_created(&mut self, tree: &mut ComponentTree, id: ComponentId) -> Result<()> {
        self.rows = Some(ComponentWrappingList::new(tree, id)?);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowKind {
    #[default]
    Body,
    Header,
    Footer,
}

#[derive(Debug, Default)]
pub struct TableRow {
    kind: RowKind,
}

impl TableRow {
    pub fn new(kind: RowKind) -> Self {
        Self { kind }
    }

    pub fn body() -> Self {
        Self::new(RowKind::Body)
    }

    pub fn header() -> Self {
        Self::new(RowKind::Header)
    }

    pub fn footer() -> Self {
        Self::new(RowKind::Footer)
    }

    pub fn kind(&self) -> RowKind {
        self.kind
    }
}

impl Component for TableRow {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("row")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        match self.kind {
            RowKind::Header => &HEADER_ROW_LAYER,
            RowKind::Body | RowKind::Footer => &ROW_LAYER,
        }
    }
}

#[derive(Debug, Default)]
pub struct TableCell;

impl Component for TableCell {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("cell")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &CELL_LAYER
    }
}
