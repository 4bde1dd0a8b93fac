use crate::edit_model::{InstanceTree, PropertyNode};
use crate::panel::{Control, PanelLayout};
use crate::visibility::VisibilityConfiguration;
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};
use std::fmt::Write as _;

fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|header| Cell::new(header)));
    table
}

/// Stored values of an edit model instance, one row per property
pub fn format_edit_model(instance: &InstanceTree) -> String {
    let mut table = create_table(&["Attribute", "Property", "Type", "Value"]);

    for attribute in &instance.root.children {
        if attribute.children.is_empty() {
            table.add_row(vec![
                Cell::new(&attribute.name),
                Cell::new(""),
                Cell::new(attribute.property_type),
                Cell::new(""),
            ]);
        }
        for property in &attribute.children {
            table.add_row(vec![
                Cell::new(&attribute.name),
                Cell::new(&property.name),
                Cell::new(property.property_type),
                Cell::new(format_value(property)),
            ]);
        }
    }

    format!("{}\n{table}\n", instance.name().bold())
}

fn format_value(node: &PropertyNode) -> String {
    node.value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Attributes and criteria of the filters configuration with their flags
pub fn format_configuration(configuration: &VisibilityConfiguration) -> String {
    let mut out = String::new();
    for attribute in &configuration.attributes {
        let _ = writeln!(out, "{} {}", flag(attribute.enabled), attribute.name.bold());
        for child in &attribute.children {
            let _ = writeln!(out, "    {} {}", flag(child.enabled), child.name);
        }
    }
    out
}

/// Accordions of the filter panel; expanded ones list their controls
pub fn format_layout(layout: &PanelLayout) -> String {
    let mut out = String::new();
    for accordion in &layout.accordions {
        let marker = if accordion.expanded { "▾" } else { "▸" };
        let _ = writeln!(out, "{marker} {}", accordion.label.bold());
        if !accordion.expanded {
            continue;
        }
        for control in &accordion.controls {
            let line = match control {
                Control::CheckBox { label, .. } => label.clone(),
                Control::DateTimeRow { label, .. } => format!("{label} [date-time]"),
                Control::SeverityRow {
                    from_label,
                    to_label,
                    ..
                } => format!("{from_label} / {to_label} [severity]"),
            };
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}

fn flag(enabled: bool) -> String {
    if enabled {
        "[x]".green().to_string()
    } else {
        "[ ]".dimmed().to_string()
    }
}

/// Query with its keywords highlighted for terminal output
pub fn highlight_query(query: &str) -> String {
    query
        .split(' ')
        .map(|word| match word {
            "SELECT" | "FROM" | "WHERE" | "AND" | "OR" | "LIKE" | "IN" => {
                word.bright_blue().bold().to_string()
            }
            _ => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
