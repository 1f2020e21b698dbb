//! Terminal rendering of a comparison.

use std::fmt;

use colored::Colorize;
use specdiff_sdk::text_delta::{diff_text, is_multiline, DeltaLine};
use specdiff_sdk::{ApiOverview, Comparison, DiffKind, DiffNode, TreeValue};

/// Render the whole comparison: changed positions, endpoint overview,
/// resolution warnings, then a metrics line.
pub fn render_comparison(comparison: &Comparison, show_unchanged: bool) -> String {
    ComparisonView {
        comparison,
        show_unchanged,
    }
    .to_string()
}

struct ComparisonView<'a> {
    comparison: &'a Comparison,
    show_unchanged: bool,
}

impl fmt::Display for ComparisonView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comparison = self.comparison;
        write_node(f, &comparison.display, self.show_unchanged)?;
        if !comparison.overview.is_empty() {
            writeln!(f)?;
            write_overview(f, &comparison.overview)?;
        }
        for warning in &comparison.warnings {
            writeln!(f, "{} {}", "warning:".yellow().bold(), warning)?;
        }
        writeln!(f, "\n{}", comparison.metrics.to_string().bold())
    }
}

fn display_path(node: &DiffNode) -> &str {
    if node.path.is_empty() {
        "(root)"
    } else {
        &node.path
    }
}

fn compact(value: Option<&TreeValue>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &DiffNode, show_unchanged: bool) -> fmt::Result {
    let path = display_path(node);
    match node.kind {
        DiffKind::Added => {
            let line = format!("+ {}: {}", path, compact(node.after.as_ref()));
            writeln!(f, "{}", line.green())
        }
        DiffKind::Removed => {
            let line = format!("- {}: {}", path, compact(node.before.as_ref()));
            writeln!(f, "{}", line.red())
        }
        DiffKind::Unchanged if node.is_leaf() => {
            if show_unchanged {
                let line = format!("  {}: {}", path, compact(node.after.as_ref()));
                writeln!(f, "{}", line.dimmed())?;
            }
            Ok(())
        }
        DiffKind::Changed if node.is_leaf() => write_changed_leaf(f, node, path),
        DiffKind::Changed | DiffKind::Unchanged => {
            for child in &node.children {
                write_node(f, child, show_unchanged)?;
            }
            Ok(())
        }
    }
}

fn write_changed_leaf(f: &mut fmt::Formatter<'_>, node: &DiffNode, path: &str) -> fmt::Result {
    let old = node.before.as_ref().and_then(TreeValue::as_str);
    let new = node.after.as_ref().and_then(TreeValue::as_str);
    if let (Some(old), Some(new)) = (old, new) {
        if is_multiline(old) || is_multiline(new) {
            writeln!(f, "{}", format!("~ {}:", path).yellow())?;
            for hunk in diff_text(old, new).hunks {
                writeln!(f, "    {}", hunk.header().cyan())?;
                for line in hunk.lines {
                    match line {
                        DeltaLine::Context(text) => writeln!(f, "     {}", text)?,
                        DeltaLine::Added(text) => writeln!(f, "    {}", format!("+{}", text).green())?,
                        DeltaLine::Removed(text) => writeln!(f, "    {}", format!("-{}", text).red())?,
                    }
                }
            }
            return Ok(());
        }
    }
    let line = format!(
        "~ {}: {} -> {}",
        path,
        compact(node.before.as_ref()),
        compact(node.after.as_ref())
    );
    writeln!(f, "{}", line.yellow())
}

fn write_overview(f: &mut fmt::Formatter<'_>, overview: &ApiOverview) -> fmt::Result {
    if let Some(title) = &overview.title {
        writeln!(f, "{}", title.bold())?;
    }
    for endpoint in &overview.new_endpoints {
        writeln!(f, "  {} {}", "new".green(), endpoint)?;
    }
    for endpoint in &overview.missing_endpoints {
        writeln!(f, "  {} {}", "missing".red(), endpoint)?;
    }
    for endpoint in &overview.deprecated_endpoints {
        writeln!(f, "  {} {}", "deprecated".yellow(), endpoint)?;
    }
    for op in &overview.changed_operations {
        writeln!(
            f,
            "  {} {} (+{} -{} ~{})",
            "changed".yellow(),
            op.endpoint,
            op.added,
            op.removed,
            op.changed
        )?;
    }
    let verdict = if overview.compatible {
        "backward compatible".green()
    } else {
        "breaking changes".red().bold()
    };
    writeln!(f, "  {}", verdict)
}
