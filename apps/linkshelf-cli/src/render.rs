//! Terminal rendering of link pages and tag lists.

use chrono::DateTime;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use linkshelf_core::projection::{link_views, page_summary, LinkView};
use linkshelf_core::query::{project, QueryState};
use linkshelf_core::repository::LinkRepository;
use linkshelf_tags::Suggestion;

/// Print the page `state` selects, with counter and pagination info.
pub fn page(repository: &LinkRepository, state: &QueryState, page_size: usize, owner: bool) {
    let projection = project(repository.records(), state, page_size);
    let summary = page_summary(&projection, repository.status());

    println!("{}", summary.counter);
    if let Some(message) = &summary.empty_message {
        println!("{}", message);
        return;
    }

    println!("{}", link_table(&link_views(&projection.items, owner)));

    if summary.show_pagination {
        let mut nav = summary.page_info.clone();
        if summary.has_previous {
            nav.push_str(&format!("  (--page {} for previous)", projection.current_page - 1));
        }
        if summary.has_next {
            nav.push_str(&format!("  (--page {} for next)", projection.current_page + 1));
        }
        println!("{}", nav);
    }
}

fn link_table(views: &[LinkView]) -> Table {
    let editable = views.iter().any(|v| v.editable);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = Vec::new();
    if editable {
        header.push("Row");
    }
    header.extend(["Link", "Description", "Tags", "Added"]);
    table.set_header(header);

    for view in views {
        let mut cells = Vec::new();
        if editable {
            cells.push(view.row.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()));
        }
        cells.push(view.display_url.clone());
        cells.push(view.description.clone());
        cells.push(
            view.tags
                .iter()
                .map(|chip| chip.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        );
        cells.push(created_date(view.created_at));
        table.add_row(cells);
    }

    table
}

fn created_date(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(at) if millis > 0 => at.format("%Y-%m-%d").to_string(),
        _ => "-".to_string(),
    }
}

pub fn tags(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("No tags in use.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Tag", "Links"]);
    for suggestion in suggestions {
        table.add_row(vec![suggestion.tag.clone(), suggestion.use_count.to_string()]);
    }
    println!("{}", table);
}
