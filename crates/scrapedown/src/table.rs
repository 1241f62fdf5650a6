//! Pipe-table conversion for `<table>` subtrees.
//!
//! The renderer hands a whole table over and suppresses the normal walk for
//! its subtree, so everything inside the table surfaces here or not at all.

use tl::{HTMLTag, NodeHandle, Parser};

/// Converts the subtree under a `table` node into a Markdown pipe table.
///
/// Rows come from `tr` elements anywhere below the table (so `thead`/`tbody`
/// wrappers are transparent), cells from their direct `td`/`th` children. The
/// first row is the header; the separator and every data row are padded or
/// truncated to the header's column count so the grid stays rectangular.
///
/// A table that yields no rows or no header cells converts to the empty
/// string rather than failing the surrounding render.
pub(crate) fn table_to_markdown(table: NodeHandle, parser: &Parser) -> String {
    let rows = collect_rows(table, parser);
    let Some(header) = rows.first() else {
        return String::new();
    };
    let width = header.len();
    if width == 0 {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(header, width));
    lines.push(format!("|{}", " --- |".repeat(width)));
    for row in &rows[1..] {
        lines.push(format_row(row, width));
    }
    lines.join("\n")
}

fn format_row(cells: &[String], width: usize) -> String {
    let mut line = String::from("|");
    for index in 0..width {
        line.push(' ');
        line.push_str(cells.get(index).map_or("", String::as_str));
        line.push_str(" |");
    }
    line
}

/// Gathers rows in document order. Nested tables are not entered; their text
/// still reaches the enclosing cell through `inner_text`.
fn collect_rows(table: NodeHandle, parser: &Parser) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut stack = Vec::new();
    push_element_children(table, parser, &mut stack);

    while let Some(handle) = stack.pop() {
        let Some(node) = handle.get(parser) else { continue };
        let Some(tag) = node.as_tag() else { continue };
        let name = tag.name().as_utf8_str().to_ascii_lowercase();
        match name.as_str() {
            "tr" => rows.push(collect_cells(tag, parser)),
            "table" => {}
            _ => push_element_children(handle, parser, &mut stack),
        }
    }

    rows
}

fn collect_cells(row: &HTMLTag, parser: &Parser) -> Vec<String> {
    let mut cells = Vec::new();
    let children = row.children();
    for child in children.top().iter() {
        let Some(node) = child.get(parser) else { continue };
        let Some(tag) = node.as_tag() else { continue };
        let name = tag.name().as_utf8_str().to_ascii_lowercase();
        if matches!(name.as_str(), "td" | "th") {
            cells.push(escape_cell(node.inner_text(parser).trim()));
        }
    }
    cells
}

/// Pipes inside cell text would break the grid.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn push_element_children(handle: NodeHandle, parser: &Parser, stack: &mut Vec<NodeHandle>) {
    let Some(node) = handle.get(parser) else { return };
    let Some(tag) = node.as_tag() else { return };
    let children = tag.children();
    let mut kept: Vec<NodeHandle> = children.top().iter().copied().collect();
    kept.reverse();
    stack.extend(kept);
}
