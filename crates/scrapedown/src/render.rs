//! The tree renderer: a stack-based depth-first walk over the DOM that emits
//! Markdown or plain-text tokens per node kind.
//!
//! The walk is iterative on purpose. An explicit `Vec`-backed stack keeps deep
//! or badly nested trees from blowing the call stack, and it turns subtree
//! suppression (tables, nav) into a guard before pushing children instead of
//! an early return threaded through recursive calls. Children are pushed in
//! reverse DOM order so that popping yields left-to-right document order.

use tl::{Node, NodeHandle, Parser};

use crate::error::{Result, ScrapeError};
use crate::table::table_to_markdown;

/// Output flavor produced by [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Headings, inline code spans, bullet markers and pipe tables.
    #[default]
    Markdown,
    /// Every text-bearing block on its own line, tables still as pipe tables.
    PlainText,
}

/// Options controlling a single render pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Which output flavor to emit.
    pub format: OutputFormat,
    /// Walk into `<nav>` subtrees instead of dropping them.
    pub include_nav: bool,
}

/// Closed classification of DOM nodes, one variant per emission rule.
///
/// Dispatching over this enum instead of comparing tag names at every rule
/// keeps the per-node match total: adding a variant forces every mode to say
/// what it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `h1` through `h6`, with the level carried along.
    Heading(u8),
    /// `p`.
    Paragraph,
    /// `span`.
    Span,
    /// `li`.
    ListItem,
    /// `table`; consumes its whole subtree via the table conversion.
    Table,
    /// `nav`; excluded from the walk unless requested.
    Nav,
    /// Text, comment, script, style and processing-instruction content.
    /// Never pushed onto the stack, contributes only through `inner_text`.
    TextLike,
    /// Any other element: emits nothing, children still walked.
    Other,
}

impl NodeKind {
    /// Classify a parsed node.
    pub fn classify(node: &Node) -> Self {
        match node {
            Node::Raw(_) | Node::Comment(_) => Self::TextLike,
            Node::Tag(tag) => {
                let name = tag.name().as_utf8_str().to_ascii_lowercase();
                Self::from_tag_name(&name)
            }
        }
    }

    fn from_tag_name(name: &str) -> Self {
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Self::Heading(name.as_bytes()[1] - b'0'),
            "p" => Self::Paragraph,
            "span" => Self::Span,
            "li" => Self::ListItem,
            "table" => Self::Table,
            "nav" => Self::Nav,
            "script" | "style" => Self::TextLike,
            _ => Self::Other,
        }
    }
}

/// Parses `html` and renders it in one call.
///
/// The render root is the `<body>` element when the document has one,
/// matching how browsers scope visible content. Fragments without a body are
/// rendered from their top-level nodes in document order.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] when the input cannot be parsed at all.
pub fn convert_html(html: &str, options: &RenderOptions) -> Result<String> {
    let dom = tl::parse(html, tl::ParserOptions::default())
        .map_err(|err| ScrapeError::Parse(err.to_string()))?;
    let parser = dom.parser();

    if let Some(body) = dom.query_selector("body").and_then(|mut hits| hits.next()) {
        return Ok(render(Some(body), parser, options));
    }

    // Fragment without a body: seed the stack with the top-level nodes,
    // applying the same exclusions as child enumeration.
    let mut seed = Vec::new();
    for handle in dom.children() {
        let Some(node) = handle.get(parser) else { continue };
        match NodeKind::classify(node) {
            NodeKind::TextLike => {}
            NodeKind::Nav if !options.include_nav => {}
            _ => seed.push(*handle),
        }
    }
    seed.reverse();
    Ok(render_stack(seed, parser, options))
}

/// Renders the subtree under `root` into a single string.
///
/// A missing root is not an error: `None` renders to the empty string. The
/// traversal itself never fails either — nodes whose children cannot be
/// enumerated are logged and skipped, and everything around them renders in
/// unchanged order.
pub fn render(root: Option<NodeHandle>, parser: &Parser, options: &RenderOptions) -> String {
    match root {
        Some(handle) => render_stack(vec![handle], parser, options),
        None => String::new(),
    }
}

/// Core loop. `stack` holds nodes still to visit, topmost = next in document
/// order.
fn render_stack(mut stack: Vec<NodeHandle>, parser: &Parser, options: &RenderOptions) -> String {
    let mut output = String::new();

    while let Some(handle) = stack.pop() {
        // Reset per iteration: suppression only ever applies to the children
        // of the node that asked for it, never to its siblings.
        let mut emit_children = true;

        let Some(node) = handle.get(parser) else {
            log::warn!("dangling node handle {}, skipping", handle.get_inner());
            continue;
        };
        let kind = NodeKind::classify(node);

        match options.format {
            OutputFormat::Markdown => match kind {
                NodeKind::Heading(level) => {
                    output.push('\n');
                    for _ in 0..level {
                        output.push('#');
                    }
                    output.push(' ');
                    output.push_str(node.inner_text(parser).trim());
                    output.push('\n');
                }
                NodeKind::Paragraph => {
                    output.push_str(node.inner_text(parser).trim());
                    output.push_str("\n\n");
                }
                NodeKind::Span => {
                    let text = node.inner_text(parser);
                    let text = text.trim();
                    if !text.is_empty() {
                        output.push('`');
                        output.push_str(text);
                        output.push_str("` ");
                    }
                }
                // Bullet marker only. Inline text inside an li surfaces
                // through the rules of descendant elements, not here.
                NodeKind::ListItem => output.push_str("- "),
                NodeKind::Table => {
                    output.push('\n');
                    output.push_str(&table_to_markdown(handle, parser));
                    output.push('\n');
                    emit_children = false;
                }
                NodeKind::Nav | NodeKind::TextLike | NodeKind::Other => {}
            },
            OutputFormat::PlainText => match kind {
                NodeKind::Heading(_) | NodeKind::Paragraph | NodeKind::Span | NodeKind::ListItem => {
                    output.push('\n');
                    output.push_str(node.inner_text(parser).trim());
                    output.push('\n');
                }
                NodeKind::Table => {
                    output.push('\n');
                    output.push_str(&table_to_markdown(handle, parser));
                    output.push('\n');
                    emit_children = false;
                }
                NodeKind::Nav | NodeKind::TextLike | NodeKind::Other => {}
            },
        }

        if emit_children {
            push_children(node, kind, parser, options, &mut stack);
        }
    }

    output
}

/// Enumerates `node`'s children and pushes the kept ones in reverse order.
///
/// Text-like children are never pushed (their text reaches the output through
/// `inner_text` of ancestors) and `nav` children are dropped entirely unless
/// `include_nav` is set. A node without a children interface is a structural
/// anomaly: it gets a diagnostic and the walk moves on.
fn push_children(
    node: &Node,
    kind: NodeKind,
    parser: &Parser,
    options: &RenderOptions,
    stack: &mut Vec<NodeHandle>,
) {
    let Node::Tag(tag) = node else {
        log::warn!("cannot enumerate children of {kind:?} node, skipping descent");
        return;
    };

    let children = tag.children();
    let mut kept = Vec::new();
    for child in children.top().iter() {
        let Some(child_node) = child.get(parser) else { continue };
        match NodeKind::classify(child_node) {
            NodeKind::TextLike => {}
            NodeKind::Nav if !options.include_nav => {}
            _ => kept.push(*child),
        }
    }
    for child in kept.into_iter().rev() {
        stack.push(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markdown() -> RenderOptions {
        RenderOptions::default()
    }

    fn plain_text() -> RenderOptions {
        RenderOptions { format: OutputFormat::PlainText, ..RenderOptions::default() }
    }

    #[test]
    fn none_root_renders_empty() {
        let dom = tl::parse("<p>ignored</p>", tl::ParserOptions::default()).unwrap();
        assert_eq!(render(None, dom.parser(), &markdown()), "");
    }

    #[test]
    fn raw_root_renders_empty_without_descent() {
        // A text node has no children interface; the walk logs and finishes.
        let dom = tl::parse("just text", tl::ParserOptions::default()).unwrap();
        let root = dom.children().first().copied();
        assert!(root.is_some());
        assert_eq!(render(root, dom.parser(), &markdown()), "");
    }

    #[test]
    fn empty_document_renders_empty() {
        assert_eq!(convert_html("", &markdown()).unwrap(), "");
    }

    #[test]
    fn heading_level_is_preserved() {
        let output = convert_html("<h3>Intro</h3>", &markdown()).unwrap();
        assert_eq!(output, "\n### Intro\n");
    }

    #[test]
    fn all_heading_levels() {
        let output = convert_html("<h1>a</h1><h6>b</h6>", &markdown()).unwrap();
        assert_eq!(output, "\n# a\n\n###### b\n");
    }

    #[test]
    fn paragraph_gets_blank_line() {
        let output = convert_html("<p>Hello world</p>", &markdown()).unwrap();
        assert_eq!(output, "Hello world\n\n");
    }

    #[test]
    fn sibling_order_is_document_order() {
        let html = "<div><p>one</p><p>two</p><p>three</p></div>";
        let output = convert_html(html, &markdown()).unwrap();
        assert_eq!(output, "one\n\ntwo\n\nthree\n\n");
    }

    #[test]
    fn nested_blocks_keep_preorder() {
        let html = "<div><div><h2>first</h2></div><p>second</p></div>";
        let output = convert_html(html, &markdown()).unwrap();
        assert_eq!(output, "\n## first\nsecond\n\n");
    }

    #[test]
    fn span_becomes_inline_code() {
        let output = convert_html("<span>value</span>", &markdown()).unwrap();
        assert_eq!(output, "`value` ");
    }

    #[test]
    fn whitespace_only_span_is_suppressed() {
        let output = convert_html("<div><span>   </span></div>", &markdown()).unwrap();
        assert_eq!(output, "");
    }

    #[test]
    fn list_item_emits_marker_only() {
        let output = convert_html("<ul><li>plain text</li></ul>", &markdown()).unwrap();
        assert_eq!(output, "- ");
    }

    #[test]
    fn list_item_text_surfaces_through_descendants() {
        let output = convert_html("<ul><li><span>code</span></li></ul>", &markdown()).unwrap();
        assert_eq!(output, "- `code` ");
    }

    #[test]
    fn body_scopes_the_render() {
        let html = "<html><head><title>skip me</title></head><body><p>keep me</p></body></html>";
        let output = convert_html(html, &markdown()).unwrap();
        assert_eq!(output, "keep me\n\n");
    }

    #[test]
    fn script_and_style_children_are_not_walked() {
        let html = "<div><script>let x = 1;</script><style>p {}</style><p>real</p></div>";
        let output = convert_html(html, &markdown()).unwrap();
        assert_eq!(output, "real\n\n");
    }

    #[test]
    fn nav_is_dropped_by_default() {
        let html = "<body><nav><h2>Menu</h2></nav><p>Content</p></body>";
        let output = convert_html(html, &markdown()).unwrap();
        assert_eq!(output, "Content\n\n");
    }

    #[test]
    fn nav_is_kept_on_request() {
        let html = "<body><nav><h2>Menu</h2></nav><p>Content</p></body>";
        let options = RenderOptions { include_nav: true, ..RenderOptions::default() };
        let output = convert_html(html, &options).unwrap();
        assert_eq!(output, "\n## Menu\nContent\n\n");
    }

    #[test]
    fn nav_is_dropped_in_plain_text_too() {
        let html = "<body><nav><h2>Menu</h2></nav><p>Content</p></body>";
        let output = convert_html(html, &plain_text()).unwrap();
        assert_eq!(output, "\nContent\n");
    }

    #[test]
    fn table_renders_as_pipe_table() {
        let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
        let output = convert_html(html, &markdown()).unwrap();
        assert_eq!(output, "\n| A | B |\n| --- | --- |\n| 1 | 2 |\n");
    }

    #[test]
    fn table_conversion_is_reproducible() {
        let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
        let first = convert_html(html, &markdown()).unwrap();
        let second = convert_html(html, &markdown()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn table_descendants_are_not_emitted_separately() {
        let html = "<table><tr><td><p>inside</p><span>cell</span></td></tr></table>";
        let output = convert_html(html, &markdown()).unwrap();
        assert!(output.contains("| inside"));
        assert!(!output.contains("inside\n\n"), "paragraph rule leaked into table: {output:?}");
        assert!(!output.contains('`'), "span rule leaked into table: {output:?}");
    }

    #[test]
    fn empty_table_emits_bare_newlines() {
        let output = convert_html("<table></table>", &markdown()).unwrap();
        assert_eq!(output, "\n\n");
    }

    #[test]
    fn siblings_after_a_table_still_render() {
        let html = "<div><table><tr><td>x</td></tr></table><p>after</p></div>";
        let output = convert_html(html, &markdown()).unwrap();
        assert!(output.ends_with("after\n\n"), "unexpected tail: {output:?}");
    }

    #[test]
    fn plain_text_blocks_get_surrounding_newlines() {
        let html = "<h1>Title</h1><p>body</p>";
        let output = convert_html(html, &plain_text()).unwrap();
        assert_eq!(output, "\nTitle\n\nbody\n");
    }

    #[test]
    fn plain_text_emits_list_item_text() {
        let output = convert_html("<ul><li>item one</li></ul>", &plain_text()).unwrap();
        assert_eq!(output, "\nitem one\n");
    }

    #[test]
    fn unknown_tags_are_passthrough() {
        let html = "<article><section><p>deep</p></section></article>";
        let output = convert_html(html, &markdown()).unwrap();
        assert_eq!(output, "deep\n\n");
    }

    #[test]
    fn comments_contribute_nothing() {
        let output = convert_html("<div><!-- hidden --><p>shown</p></div>", &markdown()).unwrap();
        assert_eq!(output, "shown\n\n");
    }
}
