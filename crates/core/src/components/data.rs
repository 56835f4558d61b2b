use crate::capability::Capabilities;
use crate::component::Component;
use crate::components::sibling_insertion_point;
use crate::context::DataContext;
use crate::error::{DocumentError, Result};
use crate::lifecycle;
use crate::template::{materialize, Template};
use crate::trace::TraceLevel;
use crate::tree::ComponentTree;
use quire_types::{ComponentId, ObjectType};
use serde_json::Value;
use std::rc::Rc;

/// Holds a JSON value that binding components can refer to by id.
#[derive(Debug, Clone)]
pub struct DataSource {
    value: Value,
}

impl DataSource {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// The value at a JSON pointer, or the whole value for `None`.
    pub fn select(&self, pointer: Option<&str>) -> Option<&Value> {
        match pointer {
            Some(pointer) => self.value.pointer(pointer),
            None => Some(&self.value),
        }
    }
}

impl Component for DataSource {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("data")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::DATA_SOURCE
    }
}

/// Repeats a template once per data item, inserting the generated components
/// into its container just before itself.
///
/// Data comes from, in order of preference: an inline value, a referenced
/// [`DataSource`], a pointer into the current data item, or the current item
/// itself. Each data bind replaces the components generated last time.
#[derive(Debug)]
pub struct ForEach {
    template: Rc<dyn Template>,
    value: Option<Value>,
    data_source_id: Option<String>,
    select: Option<String>,
    start: usize,
    step: usize,
    max_items: Option<usize>,
    added: Vec<ComponentId>,
}

impl ForEach {
    pub fn new(template: Rc<dyn Template>) -> Self {
        Self {
            template,
            value: None,
            data_source_id: None,
            select: None,
            start: 0,
            step: 1,
            max_items: None,
            added: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_data_source(mut self, id: impl Into<String>) -> Self {
        self.data_source_id = Some(id.into());
        self
    }

    /// JSON pointer applied to the resolved data
    pub fn with_select(mut self, pointer: impl Into<String>) -> Self {
        self.select = Some(pointer.into());
        self
    }

    pub fn with_range(mut self, start: usize, step: usize) -> Self {
        self.start = start;
        self.step = step.max(1);
        self
    }

    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Components generated by the last data bind
    pub fn added(&self) -> &[ComponentId] {
        &self.added
    }

    fn resolve_data(
        &self,
        tree: &ComponentTree,
        id: ComponentId,
        ctx: &DataContext<'_>,
    ) -> Result<Option<Value>> {
        let select = self.select.as_deref();
        if let Some(value) = &self.value {
            return Ok(match select {
                Some(pointer) => value.pointer(pointer).cloned(),
                None => Some(value.clone()),
            });
        }

        if let Some(source_id) = &self.data_source_id {
            let component = tree.node(id)?.id().to_string();
            let top = tree.ancestors(id).last().unwrap_or(id);
            let found = tree
                .find_by_id(top, source_id)
                .or_else(|| tree.lookup_name(source_id))
                .ok_or_else(|| DocumentError::DataSourceNotFound {
                    component: component.clone(),
                    source_id: source_id.clone(),
                })?;
            let source = tree.get::<DataSource>(found).ok_or_else(|| DocumentError::NotADataSource {
                component,
                source_id: source_id.clone(),
            })?;
            return Ok(source.select(select).cloned());
        }

        Ok(match select {
            Some(pointer) => ctx.select(pointer),
            None => ctx.current().cloned(),
        })
    }

    fn items(&self, data: Value) -> Vec<Value> {
        let all = match data {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            single => vec![single],
        };
        let limit = self.max_items.unwrap_or(usize::MAX);
        all.into_iter().skip(self.start).step_by(self.step).take(limit).collect()
    }
}

impl Component for ForEach {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("each")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::BINDABLE | Capabilities::NO_OP
    }

    fn on_data_bind(
        &mut self,
        tree: &mut ComponentTree,
        id: ComponentId,
        ctx: &mut DataContext<'_>,
    ) -> Result<()> {
        for previous in std::mem::take(&mut self.added) {
            if tree.contains(previous) {
                lifecycle::dispose(tree, previous)?;
            }
        }

        let (container, index) = sibling_insertion_point(tree, id)?;
        let data = match self.resolve_data(tree, id, ctx)? {
            Some(data) if !data.is_null() => data,
            _ => {
                if ctx.should_log(TraceLevel::Warning) {
                    let uid = tree.unique_id(id)?;
                    ctx.trace_log.add(
                        TraceLevel::Warning,
                        "Data For Each",
                        &format!("No data was found for the for-each component '{}'", uid),
                    );
                }
                return Ok(());
            }
        };

        let template = Rc::clone(&self.template);
        for (generation, item) in self.items(data).into_iter().enumerate() {
            ctx.push(item, generation);
            let insert_at = index + self.added.len();
            let result = materialize(tree, &*template, generation, id, container, insert_at, ctx);
            ctx.pop();
            self.added.extend(result?);
        }
        log::debug!("For-each {} generated {} components", id, self.added.len());
        Ok(())
    }

    fn on_dispose(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {
        self.added.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Panel, TextLiteral};
    use crate::context::ContextFixture;
    use crate::context::LoadContext;
    use crate::template::FnTemplate;
    use quire_traits::ResourceError;
    use serde_json::json;

    fn text_template() -> Rc<dyn Template> {
        Rc::new(FnTemplate::new("text", |_, _, tree: &mut ComponentTree| {
            Ok(vec![tree.create(TextLiteral::bound("/name"))])
        }))
    }

    fn texts(tree: &ComponentTree, panel: ComponentId) -> Vec<String> {
        tree.children(panel)
            .iter()
            .filter_map(|c| tree.get::<TextLiteral>(*c))
            .map(|t| t.text().to_string())
            .collect()
    }

    #[test]
    fn test_generates_before_itself_and_rebinds() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let panel = tree.create(Panel::default());
        let each = tree.create(
            ForEach::new(text_template()).with_value(json!([{"name": "a"}, {"name": "b"}])),
        );
        tree.content_mut(panel).unwrap().add(each).unwrap();

        let fixture = ContextFixture::default();
        let mut ctx = DataContext::new(fixture.base());
        lifecycle::data_bind(&mut tree, panel, &mut ctx, true).unwrap();

        assert_eq!(texts(&tree, panel), vec!["a", "b"]);
        assert_eq!(tree.children(panel).last(), Some(&each));

        lifecycle::data_bind(&mut tree, panel, &mut ctx, true).unwrap();
        assert_eq!(tree.children(panel).len(), 3);
        assert_eq!(tree.len(), 4);
    }

    /// Stands in for content whose resource cannot be read.
    #[derive(Debug)]
    struct BrokenResource;

    impl Component for BrokenResource {
        fn object_type(&self) -> ObjectType {
            ObjectType::new("broken")
        }

        fn on_load(
            &mut self,
            _tree: &mut ComponentTree,
            _id: ComponentId,
            _ctx: &mut LoadContext<'_>,
        ) -> Result<()> {
            Err(DocumentError::Resource(ResourceError::NotFound("gone.png".into())))
        }
    }

    #[test]
    fn test_failed_generation_is_rolled_back_when_lax() {
        let template: Rc<dyn Template> =
            Rc::new(FnTemplate::new("broken second", |generation, _, tree: &mut ComponentTree| {
                let text = tree.create(TextLiteral::bound("/name"));
                if generation == 1 {
                    return Ok(vec![text, tree.create(BrokenResource)]);
                }
                Ok(vec![text])
            }));
        let mut tree = ComponentTree::with_id_prefix("t");
        let panel = tree.create(Panel::default());
        let each = tree.create(
            ForEach::new(template).with_value(json!([{"name": "a"}, {"name": "b"}, {"name": "c"}])),
        );
        tree.content_mut(panel).unwrap().add(each).unwrap();

        let fixture = ContextFixture::lax();
        let mut ctx = DataContext::new(fixture.base());
        lifecycle::data_bind(&mut tree, panel, &mut ctx, true).unwrap();

        assert_eq!(texts(&tree, panel), vec!["a"]);
        assert_eq!(tree.get::<ForEach>(each).unwrap().added().len(), 1);
        let live = tree.len();

        lifecycle::data_bind(&mut tree, panel, &mut ctx, true).unwrap();
        assert_eq!(texts(&tree, panel), vec!["a"]);
        assert_eq!(tree.len(), live);
        assert!(!fixture.trace_log.entries_at_least(TraceLevel::Warning).is_empty());
    }

    #[test]
    fn test_data_source_reference_and_limits() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let panel = tree.create(Panel::default());
        let source = tree.create(DataSource::new(json!({"people": [
            {"name": "a"}, {"name": "b"}, {"name": "c"}, {"name": "d"}
        ]})));
        tree.set_id(source, "people").unwrap();
        let each = tree.create(
            ForEach::new(text_template())
                .with_data_source("people")
                .with_select("/people")
                .with_range(1, 1)
                .with_max_items(2),
        );
        tree.content_mut(panel).unwrap().add_range([source, each]).unwrap();

        let fixture = ContextFixture::default();
        let mut ctx = DataContext::new(fixture.base());
        lifecycle::data_bind(&mut tree, panel, &mut ctx, true).unwrap();
        assert_eq!(texts(&tree, panel), vec!["b", "c"]);
    }

    #[test]
    fn test_unknown_data_source() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let panel = tree.create(Panel::default());
        let each = tree.create(ForEach::new(text_template()).with_data_source("missing"));
        tree.content_mut(panel).unwrap().add(each).unwrap();

        let fixture = ContextFixture::default();
        let mut ctx = DataContext::new(fixture.base());
        let err = lifecycle::data_bind(&mut tree, panel, &mut ctx, true).unwrap_err();
        match err {
            DocumentError::DataBinding { source, .. } => {
                assert!(matches!(*source, DocumentError::DataSourceNotFound { .. }))
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_referenced_component_must_be_data_source() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let panel = tree.create(Panel::default());
        let other = tree.create(TextLiteral::new("x"));
        tree.set_id(other, "people").unwrap();
        let each = tree.create(ForEach::new(text_template()).with_data_source("people"));
        tree.content_mut(panel).unwrap().add_range([other, each]).unwrap();

        let fixture = ContextFixture::lax();
        let mut ctx = DataContext::new(fixture.base());
        let err = lifecycle::data_bind(&mut tree, panel, &mut ctx, true).unwrap_err();
        assert!(err.to_string().contains("not a data source"));
    }

    #[test]
    fn test_without_container_parent() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let each = tree.create(ForEach::new(text_template()).with_value(json!([1])));
        let fixture = ContextFixture::default();
        let err = lifecycle::data_bind(&mut tree, each, &mut DataContext::new(fixture.base()), true)
            .unwrap_err();
        assert!(err.to_string().contains("container parent"));
    }
}
