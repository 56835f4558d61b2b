mod common;

use common::{child_texts, TestResult};
use quire::components::{
    ListBlock, ListItem, NoOp, Panel, PlaceHolder, Table, TableRow, TextLiteral,
};
use quire::{AnyComponent, ComponentTree, ComponentWrappingList, DocumentError};

#[test]
fn test_moving_between_lists_keeps_one_parent() -> TestResult {
    let mut tree = ComponentTree::with_id_prefix("t");
    let left = tree.create(Panel::default());
    let right = tree.create(Panel::default());
    let text = tree.create(TextLiteral::new("x"));

    tree.content_mut(left)?.add(text)?;
    tree.content_mut(right)?.add(text)?;

    assert!(tree.children(left).is_empty());
    assert_eq!(tree.children(right), &[text]);
    assert_eq!(tree.parent(text), Some(right));
    Ok(())
}

#[test]
fn test_insert_and_reorder() -> TestResult {
    let mut tree = ComponentTree::with_id_prefix("t");
    let panel = tree.create(Panel::default());
    let [a, b, c] = ["a", "b", "c"].map(|t| tree.create(TextLiteral::new(t)));

    let mut content = tree.content_mut(panel)?;
    content.add_range([a, c])?;
    content.insert(1, b)?;
    assert_eq!(child_texts(&tree, panel), vec!["a", "b", "c"]);

    tree.content_mut(panel)?.move_item(0, 2)?;
    assert_eq!(child_texts(&tree, panel), vec!["b", "c", "a"]);

    let d = tree.create(TextLiteral::new("d"));
    let err = tree.content_mut(panel)?.insert(5, d).unwrap_err();
    assert!(matches!(err, DocumentError::IndexOutOfRange { index: 5, len: 3 }));
    Ok(())
}

#[test]
fn test_text_literal_is_not_a_container() {
    let mut tree = ComponentTree::with_id_prefix("t");
    let text = tree.create(TextLiteral::new("x"));
    assert!(matches!(tree.content_mut(text), Err(DocumentError::NotAContainer(_))));
}

#[test]
fn test_cannot_insert_an_ancestor() -> TestResult {
    let mut tree = ComponentTree::with_id_prefix("t");
    let outer = tree.create(Panel::default());
    let inner = tree.create(Panel::default());
    tree.content_mut(outer)?.add(inner)?;

    let err = tree.content_mut(inner)?.add(outer).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidHierarchy { .. }));
    Ok(())
}

#[test]
fn test_noop_only_list() -> TestResult {
    let mut tree = ComponentTree::with_id_prefix("t");
    let panel = tree.create(Panel::default());
    let noop = tree.create(NoOp);
    tree.content_mut(panel)?.add(noop)?;

    let list = tree.content(panel).ok_or("panel has no list")?;
    assert!(list.only_noops());
    assert_eq!(list.len(), 1);
    Ok(())
}

#[test]
fn test_wrapping_view_flattens_placeholders() -> TestResult {
    let mut tree = ComponentTree::with_id_prefix("t");
    let panel = tree.create(Panel::default());
    let holder = tree.create(PlaceHolder);
    let [a, b, c] = ["a", "b", "c"].map(|t| tree.create(TextLiteral::new(t)));
    let noop = tree.create(NoOp);

    let view = ComponentWrappingList::<TextLiteral>::new(&mut tree, panel)?;
    tree.content_mut(panel)?.add_range([a, holder, noop, c])?;
    tree.content_mut(holder)?.add(b)?;

    assert_eq!(view.to_vec(&tree), vec![a, b, c]);

    tree.content_mut(holder)?.remove(b)?;
    assert!(view.is_stale());
    assert_eq!(view.to_vec(&tree), vec![a, c]);

    let everything = ComponentWrappingList::<AnyComponent>::new(&mut tree, panel)?;
    // an empty placeholder has nothing to promote and is listed itself
    assert_eq!(everything.to_vec(&tree), vec![a, holder, c]);
    Ok(())
}

#[test]
fn test_table_rows_view() -> TestResult {
    let mut document = quire::Document::new();
    let table = document.add(Table::default())?;
    let tree = document.tree_mut();
    let header = tree.create(TableRow::header());
    let body = tree.create(TableRow::body());
    let holder = tree.create(PlaceHolder);
    let nested = tree.create(TableRow::body());
    tree.content_mut(table)?.add_range([header, body, holder])?;
    tree.content_mut(holder)?.add(nested)?;

    document.init_and_load()?;

    let tree = document.tree();
    let table_ref = tree.get::<Table>(table).ok_or("not a table")?;
    assert_eq!(table_ref.rows(tree), vec![header, body, nested]);
    assert_eq!(table_ref.header_rows(tree), vec![header]);
    Ok(())
}

#[test]
fn test_list_items_before_init() -> TestResult {
    let mut tree = ComponentTree::with_id_prefix("t");
    let list = tree.create(ListBlock::unordered());
    let item = tree.create(ListItem);
    let holder = tree.create(PlaceHolder);
    let nested = tree.create(ListItem);
    tree.content_mut(holder)?.add(nested)?;
    tree.content_mut(list)?.add_range([item, holder])?;

    let block = tree.get::<ListBlock>(list).ok_or("not a list")?;
    assert_eq!(block.items(&tree), vec![item, nested]);
    Ok(())
}

#[test]
fn test_list_items_view() -> TestResult {
    let mut document = quire::Document::new();
    let list = document.add(ListBlock::ordered())?;
    let tree = document.tree_mut();
    let first = tree.create(ListItem);
    let second = tree.create(ListItem);
    let stray = tree.create(TextLiteral::new("not an item"));
    tree.content_mut(list)?.add_range([first, stray, second])?;

    document.init_and_load()?;

    let tree = document.tree();
    let block = tree.get::<ListBlock>(list).ok_or("not a list")?;
    assert!(block.is_ordered());
    assert_eq!(block.items(tree), vec![first, second]);
    Ok(())
}
