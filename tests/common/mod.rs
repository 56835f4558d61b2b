#![allow(dead_code)]

use quire::traits::{GraphicsPath, ObjectReference, RenderError, RenderWriter};
use quire::{
    Capabilities, Component, ComponentId, ComponentTree, DataContext, InitContext, LayoutContext,
    LayoutEngine, LayoutEngineFactory, LoadContext, MarkupParser, ObjectType, ParseResult,
    RenderContext, Result,
};
use quire::components::{Panel, TextLiteral};
use quire::style::Style;
use std::cell::RefCell;
use std::rc::Rc;

pub type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// What a [`RecordingWriter`] was asked to write.
#[derive(Debug, Clone, PartialEq)]
pub enum Written {
    Path(usize),
    Text(String),
    Image(String, usize),
    BeginGroup(String),
    EndGroup,
}

#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub ops: Vec<Written>,
    next: u32,
}

impl RecordingWriter {
    fn reference(&mut self) -> ObjectReference {
        self.next += 1;
        ObjectReference::new(self.next)
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Written::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl RenderWriter for RecordingWriter {
    fn write_path(
        &mut self,
        path: &GraphicsPath,
        _style: &Style,
    ) -> std::result::Result<ObjectReference, RenderError> {
        self.ops.push(Written::Path(path.ops().len()));
        Ok(self.reference())
    }

    fn write_text(
        &mut self,
        text: &str,
        _style: &Style,
    ) -> std::result::Result<ObjectReference, RenderError> {
        self.ops.push(Written::Text(text.to_string()));
        Ok(self.reference())
    }

    fn write_image(
        &mut self,
        source: &str,
        data: &[u8],
        _style: &Style,
    ) -> std::result::Result<ObjectReference, RenderError> {
        self.ops.push(Written::Image(source.to_string(), data.len()));
        Ok(self.reference())
    }

    fn begin_group(&mut self, name: &str) -> std::result::Result<(), RenderError> {
        self.ops.push(Written::BeginGroup(name.to_string()));
        Ok(())
    }

    fn end_group(&mut self) -> std::result::Result<(), RenderError> {
        self.ops.push(Written::EndGroup);
        Ok(())
    }
}

/// Records `(engine, parent engine, viewport unique id)` for each layout.
#[derive(Debug, Default, Clone)]
pub struct RecordingLayoutFactory {
    pub laid_out: Rc<RefCell<Vec<(String, Option<String>, String)>>>,
}

pub struct RecordingEngine {
    name: String,
    parent: Option<String>,
    laid_out: Rc<RefCell<Vec<(String, Option<String>, String)>>>,
}

impl LayoutEngine for RecordingEngine {
    fn layout(
        &mut self,
        tree: &mut ComponentTree,
        viewport: ComponentId,
        _ctx: &mut LayoutContext<'_>,
    ) -> Result<()> {
        let uid = tree.unique_id(viewport)?;
        self.laid_out
            .borrow_mut()
            .push((self.name.clone(), self.parent.clone(), uid));
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl LayoutEngineFactory for RecordingLayoutFactory {
    fn create_layout_engine(
        &self,
        parent: Option<&dyn LayoutEngine>,
        _ctx: &LayoutContext<'_>,
        _style: &Style,
    ) -> Box<dyn LayoutEngine> {
        let count = self.laid_out.borrow().len();
        Box::new(RecordingEngine {
            name: format!("engine{}", count),
            parent: parent.map(|p| p.name().to_string()),
            laid_out: Rc::clone(&self.laid_out),
        })
    }
}

/// One text literal per line; a line starting with '>' becomes a panel
/// holding the text. A line reading `!` fails the parse and a line reading
/// `<` closes a component that was never opened.
pub struct LineParser;

impl MarkupParser for LineParser {
    fn parse(
        &self,
        origin: &str,
        content: &str,
        tree: &mut ComponentTree,
    ) -> Result<Vec<ParseResult>> {
        let mut results = Vec::new();
        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line == "!" {
                return Err(quire::DocumentError::Parse {
                    origin: origin.to_string(),
                    message: "unexpected '!'".to_string(),
                });
            }
            if line == "<" {
                let stray = tree.create(TextLiteral::new("stray"));
                results.push(ParseResult::end(stray));
                continue;
            }
            if let Some(rest) = line.strip_prefix('>') {
                let panel = tree.create(Panel::default());
                let text = tree.create(TextLiteral::new(rest.trim()));
                results.extend([
                    ParseResult::start(panel),
                    ParseResult::start(text),
                    ParseResult::end(text),
                    ParseResult::end(panel),
                ]);
            } else {
                let text = tree.create(TextLiteral::new(line));
                results.extend([ParseResult::start(text), ParseResult::end(text)]);
            }
        }
        Ok(results)
    }
}

pub type PhaseLog = Rc<RefCell<Vec<String>>>;

/// Container that appends `"{phase} {label}"` to a shared log for every hook.
#[derive(Debug)]
pub struct Recorder {
    label: String,
    log: PhaseLog,
}

impl Recorder {
    pub fn new(label: &str, log: &PhaseLog) -> Self {
        Self {
            label: label.to_string(),
            log: Rc::clone(log),
        }
    }

    fn record(&self, phase: &str) {
        self.log.borrow_mut().push(format!("{} {}", phase, self.label));
    }
}

impl Component for Recorder {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("rec")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn on_init(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut InitContext<'_>,
    ) -> Result<()> {
        self.record("init");
        Ok(())
    }

    fn on_load(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut LoadContext<'_>,
    ) -> Result<()> {
        self.record("load");
        Ok(())
    }

    fn on_data_bind(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut DataContext<'_>,
    ) -> Result<()> {
        self.record("bind");
        Ok(())
    }

    fn on_pre_layout(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut LayoutContext<'_>,
    ) -> Result<()> {
        self.record("pre-layout");
        Ok(())
    }

    fn on_layout_complete(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut LayoutContext<'_>,
    ) -> Result<()> {
        self.record("layout-complete");
        Ok(())
    }

    fn on_pre_render(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<()> {
        self.record("pre-render");
        Ok(())
    }

    fn on_post_render(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<()> {
        self.record("post-render");
        Ok(())
    }

    fn on_dispose(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {
        self.record("dispose");
    }
}

/// Texts of the text literals directly below `parent`, in list order.
pub fn child_texts(tree: &ComponentTree, parent: ComponentId) -> Vec<String> {
    tree.children(parent)
        .iter()
        .filter_map(|c| tree.get::<TextLiteral>(*c))
        .map(|t| t.text().to_string())
        .collect()
}
