//! Built-in output formats
//!
//! Four renderers ship with the registry: a flat text table, an HTML graph
//! table with callees, an HTML call-stack view, and a Graphviz dot digraph.
//! All of them render deterministically from the same call-tree result.

use crate::registry::ResultRenderer;
use profiling_types::{CallNode, ProfilingResult};
use std::collections::HashSet;

/// Escape text for embedding into HTML element content
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for embedding into a quoted dot-language string
fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Percentage of `part` against `whole`, 0.0 when the whole is empty
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Node ids that never appear as anyone's child, in node order
fn top_level_ids(result: &ProfilingResult) -> Vec<u32> {
    let referenced: HashSet<u32> = result
        .nodes
        .iter()
        .flat_map(|node| node.children.iter().copied())
        .collect();
    result
        .nodes
        .iter()
        .filter(|node| !referenced.contains(&node.id))
        .map(|node| node.id)
        .collect()
}

/// Flat text report, one row per frame, heaviest self time first
pub struct FlatPrinter;

impl ResultRenderer for FlatPrinter {
    fn render(&self, result: &ProfilingResult) -> Vec<u8> {
        let total_self = result.total_self_time_us();

        let mut sorted: Vec<&CallNode> = result.nodes.iter().collect();
        sorted.sort_by(|a, b| {
            b.self_time_us
                .cmp(&a.self_time_us)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut out = String::with_capacity(256);
        out.push_str(&format!(
            "Total time: {:.0} us\n\n",
            result.duration_us()
        ));
        out.push_str(" %self     total      self     calls  name\n");
        for node in sorted {
            out.push_str(&format!(
                "{:>6.2} {:>9} {:>9} {:>9}  {}\n",
                percent(node.self_time_us, total_self),
                node.total_time_us,
                node.self_time_us,
                node.call_count,
                node.name
            ));
        }
        out.into_bytes()
    }
}

/// HTML graph report: one table row per frame with its callees
pub struct GraphHtmlPrinter;

impl ResultRenderer for GraphHtmlPrinter {
    fn render(&self, result: &ProfilingResult) -> Vec<u8> {
        let total_self = result.total_self_time_us();

        let mut html = String::with_capacity(4 * 1024);
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
        html.push_str("<title>Profile Graph</title>\n");
        html.push_str(
            "<style>\nbody { font-family: monospace; }\ntable { border-collapse: collapse; }\n\
             th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: right; }\n\
             td.name, th.name { text-align: left; }\n</style>\n",
        );
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!(
            "<h1>Profile Graph ({:.0} us)</h1>\n",
            result.duration_us()
        ));
        html.push_str("<table>\n<tr><th>%self</th><th>total</th><th>self</th>");
        html.push_str("<th>calls</th><th class=\"name\">name</th><th class=\"name\">callees</th></tr>\n");

        for node in &result.nodes {
            let callees: Vec<String> = node
                .children
                .iter()
                .filter_map(|id| result.node(*id))
                .map(|child| escape_html(&child.name))
                .collect();
            html.push_str(&format!(
                "<tr><td>{:.2}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td class=\"name\">{}</td><td class=\"name\">{}</td></tr>\n",
                percent(node.self_time_us, total_self),
                node.total_time_us,
                node.self_time_us,
                node.call_count,
                escape_html(&node.name),
                callees.join(", ")
            ));
        }

        html.push_str("</table>\n</body>\n</html>\n");
        html.into_bytes()
    }
}

/// HTML call-stack view: nested lists following the call tree
pub struct CallStackPrinter;

impl CallStackPrinter {
    fn render_node(
        result: &ProfilingResult,
        id: u32,
        visited: &mut HashSet<u32>,
        html: &mut String,
    ) {
        // Cycle guard; malformed trees must not recurse forever
        if !visited.insert(id) {
            return;
        }
        let Some(node) = result.node(id) else {
            return;
        };

        html.push_str(&format!(
            "<li>{} <span class=\"t\">({} us self, {} us total, {} calls)</span>",
            escape_html(&node.name),
            node.self_time_us,
            node.total_time_us,
            node.call_count
        ));
        if !node.children.is_empty() {
            html.push_str("\n<ul>\n");
            for child in &node.children {
                Self::render_node(result, *child, visited, html);
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</li>\n");
    }
}

impl ResultRenderer for CallStackPrinter {
    fn render(&self, result: &ProfilingResult) -> Vec<u8> {
        let mut html = String::with_capacity(4 * 1024);
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
        html.push_str("<title>Call Stack</title>\n");
        html.push_str(
            "<style>\nbody { font-family: monospace; }\nul { list-style: none; }\n\
             .t { color: #888; }\n</style>\n",
        );
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!(
            "<h1>Call Stack ({:.0} us)</h1>\n<ul>\n",
            result.duration_us()
        ));

        let mut visited = HashSet::new();
        for id in top_level_ids(result) {
            Self::render_node(result, id, &mut visited, &mut html);
        }

        html.push_str("</ul>\n</body>\n</html>\n");
        html.into_bytes()
    }
}

/// Graphviz dot digraph of the call tree
pub struct DotPrinter;

impl ResultRenderer for DotPrinter {
    fn render(&self, result: &ProfilingResult) -> Vec<u8> {
        let mut dot = String::with_capacity(1024);
        dot.push_str("digraph profile {\n");
        dot.push_str("  node [shape=box];\n");

        for node in &result.nodes {
            dot.push_str(&format!(
                "  n{} [label=\"{}\\n{} us self / {} us total / {} calls\"];\n",
                node.id,
                escape_dot(&node.name),
                node.self_time_us,
                node.total_time_us,
                node.call_count
            ));
        }
        for node in &result.nodes {
            for child in &node.children {
                dot.push_str(&format!("  n{} -> n{};\n", node.id, child));
            }
        }

        dot.push_str("}\n");
        dot.into_bytes()
    }
}
