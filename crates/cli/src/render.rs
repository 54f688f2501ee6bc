//! Text rendering of render trees for the terminal.

use a2ui_core::surface::{NodeStatus, RenderNode};
use a2ui_core::Surface;
use colored::Colorize;
use std::fmt::Write;

/// Format a surface header followed by its tree.
pub fn surface_to_text(surface: &Surface, tree: Option<&RenderNode>) -> String {
    let mut out = String::new();
    let ready = if surface.is_ready_to_render {
        "ready".green()
    } else {
        "pending".yellow()
    };
    let _ = writeln!(
        out,
        "{} {} [{}] {}",
        "surface".bold(),
        surface.id.cyan().bold(),
        ready,
        surface.catalog_id.dimmed()
    );

    match tree {
        Some(tree) => write_node(&mut out, tree, 1),
        None => {
            let _ = writeln!(out, "  {}", "(no root declared)".dimmed());
        }
    }
    out
}

fn write_node(out: &mut String, node: &RenderNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = match (&node.status, &node.component_type) {
        (NodeStatus::Resolved, Some(component_type)) => component_type.blue().bold(),
        (NodeStatus::Missing, _) => "missing".red(),
        (NodeStatus::Cycle, _) => "cycle".red().bold(),
        (NodeStatus::DepthLimit, _) => "depth limit".yellow(),
        (NodeStatus::Resolved, None) => "?".normal(),
    };

    let mut line = format!("{indent}{label} {}", node.id);
    if let Some(key) = &node.item_key {
        let _ = write!(line, " [{key}]");
    }
    if let Some(context) = &node.data_context_path {
        let _ = write!(line, " @{}", context.dimmed());
    }
    for (name, value) in &node.properties {
        // Child ids are shown by the tree itself.
        if name == "child" || name.ends_with("Child") {
            continue;
        }
        let _ = write!(line, " {}={}", name.dimmed(), value);
    }
    let _ = writeln!(out, "{line}");

    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}
