//! Human-friendly CLI output formatters.
//!
//! Each `fmt_*` function formats one tool's output for terminal display.
//! When `color` is true, ANSI escape codes are emitted via `owo_colors`.

use crate::model::{TocItem, TocNode};
use crate::tools::{GroupsOutput, SearchOutput, TocOutput};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Colors an HTTP method by what it does to a resource.
fn method_label(method: &str, color: bool) -> String {
    let label = format!("{:<7}", method.to_uppercase());
    if !color {
        return label;
    }
    match method {
        "get" => label.green().to_string(),
        "post" => label.blue().to_string(),
        "delete" => label.red().to_string(),
        "put" | "patch" => label.yellow().to_string(),
        _ => label.dimmed().to_string(),
    }
}

fn write_leaf(w: &mut impl Write, node: &TocNode, indent: &str, color: bool) -> io::Result<()> {
    if node.node_type.is_schema() {
        writeln!(w, "{indent}{:<7} {}", "", node.title)?;
    } else {
        writeln!(w, "{indent}{} {}", method_label(&node.meta, color), node.title)?;
    }
    Ok(())
}

// ── toc ─────────────────────────────────────────────────────────────────────

pub fn fmt_tree(w: &mut impl Write, out: &TocOutput, color: bool) -> io::Result<()> {
    let heading = match &out.version {
        Some(version) => format!("{} {}", out.service, version),
        None => out.service.clone(),
    };
    if !heading.is_empty() {
        if color {
            writeln!(w, "{}", heading.bold())?;
        } else {
            writeln!(w, "{heading}")?;
        }
    }

    for item in &out.tree {
        match item {
            TocItem::Overview => writeln!(w, "  {}", item.title())?,
            TocItem::Divider { title } => {
                writeln!(w)?;
                if color {
                    writeln!(w, "{}", title.bold())?;
                } else {
                    writeln!(w, "{title}")?;
                }
            }
            TocItem::Node(node) => write_leaf(w, node, "  ", color)?,
            TocItem::Group(group) => {
                if color {
                    writeln!(w, "  {}", group.title.underline())?;
                } else {
                    writeln!(w, "  {}", group.title)?;
                }
                for node in &group.items {
                    write_leaf(w, node, "    ", color)?;
                }
            }
        }
    }

    writeln!(w)?;
    writeln!(w, "{} entries", out.leaf_count)?;
    Ok(())
}

// ── tag_groups ──────────────────────────────────────────────────────────────

pub fn fmt_groups(w: &mut impl Write, out: &GroupsOutput, color: bool) -> io::Result<()> {
    for group in &out.groups {
        let marker = if group.declared { "" } else { " (undeclared)" };
        if color {
            writeln!(
                w,
                "{}  [{}]{}",
                group.title.bold(),
                group.category,
                marker.dimmed()
            )?;
        } else {
            writeln!(w, "{}  [{}]{}", group.title, group.category, marker)?;
        }
        for uri in &group.operations {
            writeln!(w, "  {uri}")?;
        }
    }

    if !out.ungrouped.is_empty() {
        if color {
            writeln!(w, "{}", "(no tag)".dimmed())?;
        } else {
            writeln!(w, "(no tag)")?;
        }
        for uri in &out.ungrouped {
            writeln!(w, "  {uri}")?;
        }
    }

    Ok(())
}

// ── search ──────────────────────────────────────────────────────────────────

pub fn fmt_search(w: &mut impl Write, out: &SearchOutput, color: bool) -> io::Result<()> {
    if out.results.is_empty() {
        writeln!(w, "No results for '{}'", out.query)?;
        return Ok(());
    }

    for hit in &out.results {
        let method = if hit.summary.is_empty() {
            format!("{:<7}", hit.node_type)
        } else {
            method_label(&hit.summary, color)
        };

        if color {
            writeln!(
                w,
                "{} {}  ({} · {})",
                method,
                hit.title.bold(),
                hit.score,
                hit.category.dimmed()
            )?;
        } else {
            writeln!(w, "{} {}  ({} · {})", method, hit.title, hit.score, hit.category)?;
        }

        if !hit.preview.is_empty() {
            writeln!(w, "        {}", hit.preview)?;
        }
        if color {
            writeln!(w, "        {}", hit.slug.dimmed())?;
        } else {
            writeln!(w, "        {}", hit.slug)?;
        }
    }

    writeln!(w, "{} results", out.total_returned)?;
    Ok(())
}
