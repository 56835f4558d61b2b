//! Tree construction and phase propagation benchmarks
//!
//! Measures building wide and deep component trees, flattened views over
//! placeholders, and a full generation pass with a no-op layout and writer.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use quire::components::{Paragraph, PlaceHolder, TextLiteral};
use quire::style::Style;
use quire::traits::{GraphicsPath, ObjectReference, RenderError, RenderWriter};
use quire::{
    ComponentId, ComponentTree, ComponentWrappingList, Document, LayoutContext, LayoutEngine,
    LayoutEngineFactory,
};
use std::hint::black_box;

struct NullLayout;

impl LayoutEngine for NullLayout {
    fn layout(
        &mut self,
        _tree: &mut ComponentTree,
        _viewport: ComponentId,
        _ctx: &mut LayoutContext<'_>,
    ) -> quire::Result<()> {
        Ok(())
    }
}

impl LayoutEngineFactory for NullLayout {
    fn create_layout_engine(
        &self,
        _parent: Option<&dyn LayoutEngine>,
        _ctx: &LayoutContext<'_>,
        _style: &Style,
    ) -> Box<dyn LayoutEngine> {
        Box::new(NullLayout)
    }
}

#[derive(Default)]
struct CountingWriter(u32);

impl RenderWriter for CountingWriter {
    fn write_path(
        &mut self,
        _path: &GraphicsPath,
        _style: &Style,
    ) -> Result<ObjectReference, RenderError> {
        self.0 += 1;
        Ok(ObjectReference::new(self.0))
    }

    fn write_text(&mut self, text: &str, _style: &Style) -> Result<ObjectReference, RenderError> {
        black_box(text);
        self.0 += 1;
        Ok(ObjectReference::new(self.0))
    }

    fn write_image(
        &mut self,
        _source: &str,
        _data: &[u8],
        _style: &Style,
    ) -> Result<ObjectReference, RenderError> {
        self.0 += 1;
        Ok(ObjectReference::new(self.0))
    }
}

fn build_document(paragraphs: usize) -> Document {
    let mut document = Document::with_tree(ComponentTree::with_id_prefix("b"));
    let root = document.root();
    let tree = document.tree_mut();
    for i in 0..paragraphs {
        let para = tree.create(Paragraph);
        let text = tree.create(TextLiteral::new(format!("Paragraph {}", i)));
        if let Ok(mut content) = tree.content_mut(para) {
            let _ = content.add(text);
        }
        if let Ok(mut content) = tree.content_mut(root) {
            let _ = content.add(para);
        }
    }
    document
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut document = build_document(size);
                let mut writer = CountingWriter::default();
                document.generate(&NullLayout, &mut writer).ok();
                black_box(writer.0)
            })
        });
    }
    group.finish();
}

fn bench_wrapping_view(c: &mut Criterion) {
    let mut tree = ComponentTree::with_id_prefix("w");
    let owner = tree.create(Paragraph);
    let Ok(view) = ComponentWrappingList::<TextLiteral>::new(&mut tree, owner) else {
        return;
    };
    for i in 0..200 {
        let holder = tree.create(PlaceHolder);
        let text = tree.create(TextLiteral::new(format!("{}", i)));
        if let Ok(mut content) = tree.content_mut(holder) {
            let _ = content.add(text);
        }
        if let Ok(mut content) = tree.content_mut(owner) {
            let _ = content.add(holder);
        }
    }

    c.bench_function("wrapping_view_rebuild", |b| {
        b.iter(|| {
            if let Ok(mut content) = tree.content_mut(owner) {
                let _ = content.move_item(0, 199);
            }
            black_box(view.len(&tree))
        })
    });
}

criterion_group!(benches, bench_generate, bench_wrapping_view);
criterion_main!(benches);
