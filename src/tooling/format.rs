//! Format catalogs, item lists, verification reports and averages as text.

use crate::items::Averages;
use crate::tree::{Catalog, CategoryNode};
use crate::types::Item;
use crate::verify::VerifyReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::collections::BTreeMap;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Item table in the configured column order.
pub fn format_items_table(items: &[Item], fields: &[String]) -> String {
    if items.is_empty() {
        return "No items.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(fields.to_vec());
    for item in items {
        table.add_row(
            fields
                .iter()
                .map(|field| item.field(field).to_string())
                .collect::<Vec<_>>(),
        );
    }
    table.to_string()
}

/// Items of one leaf under a `a -> b -> c` heading.
pub fn format_leaf_items(category: &str, items: &[Item], fields: &[String]) -> String {
    format!(
        "{}\n\n{}\n",
        format_section_heading(category),
        format_items_table(items, fields)
    )
}

/// Indented category tree with item counts on the leaves.
pub fn format_catalog_tree(catalog: &Catalog) -> String {
    let mut out = format!(
        "{}\n\n",
        format_section_heading(&catalog.base_path.display().to_string())
    );
    if catalog.is_empty() {
        out.push_str("  (no categories)\n");
    }
    push_level(&mut out, &catalog.categories, 1);
    if !catalog.warnings.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", format_section_heading("Warnings")));
        for warning in &catalog.warnings {
            out.push_str(&format!("  {}\n", warning.yellow()));
        }
    }
    out
}

fn push_level(out: &mut String, children: &BTreeMap<String, CategoryNode>, depth: usize) {
    let indent = "  ".repeat(depth);
    for (name, node) in children {
        match node {
            CategoryNode::Leaf(records) => {
                let noun = if records.items.len() == 1 { "item" } else { "items" };
                out.push_str(&format!(
                    "{}{} ({} {})\n",
                    indent,
                    name,
                    records.items.len(),
                    noun
                ));
            }
            CategoryNode::Interior(next) => {
                out.push_str(&format!("{}{}/\n", indent, name.bold()));
                push_level(out, next, depth + 1);
            }
        }
    }
}

/// Verification outcome: what was created, reset or repaired.
pub fn format_verify_report(report: &VerifyReport) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Catalog verification"));
    out.push_str(&format!("  Base path: {}\n", report.base_path.display()));
    if report.seeded {
        out.push_str("  Seeded the default category hierarchy\n");
    }
    if report.expected_leaves > 0 {
        out.push_str(&format!(
            "  Expected leaf categories: {}\n",
            report.expected_leaves
        ));
    }
    out.push_str(&format!("  Record files audited: {}\n", report.audited_files));

    if report.is_noop() && report.is_valid() {
        out.push_str("  Structure is up to date\n");
        return out;
    }

    if !report.created_dirs.is_empty() || !report.created_files.is_empty() {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Created")));
        for dir in &report.created_dirs {
            out.push_str(&format!("  {} {}/\n", "+".green(), dir.display()));
        }
        for file in &report.created_files {
            out.push_str(&format!("  {} {}\n", "+".green(), file.display()));
        }
    }

    if !report.reset_files.is_empty() {
        out.push_str(&format!(
            "\n{}\n\n",
            format_section_heading("Reset (header mismatch)")
        ));
        for reset in &report.reset_files {
            out.push_str(&format!(
                "  {} {} (found: {})\n",
                "!".yellow(),
                reset.path.display(),
                reset.found_header.join(",")
            ));
        }
    }

    if !report.repaired_files.is_empty() {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Repaired")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["File", "Line", "Reason"]);
        for repaired in &report.repaired_files {
            for row in &repaired.dropped {
                table.add_row(vec![
                    repaired.path.display().to_string(),
                    row.line.to_string(),
                    row.reason.clone(),
                ]);
            }
        }
        out.push_str(&format!("{}\n", table));
        out.push_str(&format!(
            "  Dropped {} invalid row(s)\n",
            report.dropped_rows()
        ));
    }

    if !report.errors.is_empty() {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Errors")));
        for error in &report.errors {
            out.push_str(&format!("  {}\n", error.red()));
        }
    }
    out
}

/// Mean price and stock, or a notice when nothing numeric was found.
pub fn format_averages(scope: &str, averages: &Averages, files: usize) -> String {
    let mut out = format!("{}\n\n", format_section_heading(&format!("Averages: {}", scope)));
    if averages.is_empty() {
        out.push_str("  No numeric prices or stock to average.\n");
        return out;
    }
    out.push_str(&format!("  Files: {}\n", files));
    match averages.mean_price() {
        Some(mean) => out.push_str(&format!(
            "  Mean price: {:.2} ({} items)\n",
            mean, averages.price_count
        )),
        None => out.push_str("  Mean price: - (no numeric prices)\n"),
    }
    match averages.mean_stock() {
        Some(mean) => out.push_str(&format!(
            "  Mean stock: {:.2} ({} items)\n",
            mean, averages.stock_count
        )),
        None => out.push_str("  Mean stock: - (no numeric stock)\n"),
    }
    out
}
