//! Terminal output for listings.

use colored::Colorize;

use candidate_model::{Candidate, CategoryCatalog, CategoryKey, Filters, ResultSnapshot};
use listing::{ListViewState, LoadOutcome, PageToken, Paginator, SessionView, result_summary};

/// Print the whole listing for a session view
pub fn print_session(view: &SessionView<'_>) {
    println!();
    if view.search_input != view.filters.search {
        println!("{} {}", "Typing:".dimmed(), view.search_input);
    }
    print_listing(view.filters, view.snapshot, view.state, &view.paginator);

    if let Some(LoadOutcome::Failed(e)) = view.last_outcome {
        println!("{} {}", "!".yellow(), format!("Last request failed: {}", e).dimmed());
    }
}

/// Summary, active filters, the list (or its placeholder) and pagination
pub fn print_listing(
    filters: &Filters,
    snapshot: &ResultSnapshot,
    state: ListViewState,
    paginator: &Paginator,
) {
    println!("{}", result_summary(snapshot.total).bold().blue());
    println!("{}Sort: {}", "• ".green(), filters.sort_label());
    print_active_filters(filters);

    match state.placeholder() {
        Some(text) => println!("  {}", text.dimmed()),
        None => {
            for candidate in &snapshot.candidates {
                print_candidate(candidate);
            }
        }
    }

    if paginator.is_visible() {
        print_pagination(paginator);
    }
}

fn print_active_filters(filters: &Filters) {
    if !filters.search.is_empty() {
        println!("{}Search: {:?}", "• ".cyan(), filters.search);
    }
    if let Some(job_id) = &filters.job_id {
        println!("{}Job: {}", "• ".cyan(), job_id);
    }
    for key in CategoryKey::ALL {
        let selected = filters.selection(key);
        if !selected.is_empty() {
            let values = selected.iter().collect::<Vec<_>>().join(", ");
            println!("{}{}: {}", "• ".cyan(), key, values);
        }
    }
}

fn print_candidate(candidate: &Candidate) {
    let name = candidate.text("name").unwrap_or("(unnamed)");
    let mut line = format!("{}. {}", candidate.id.to_string().green(), name.bold());

    match (candidate.text("position"), candidate.text("company")) {
        (Some(position), Some(company)) => line.push_str(&format!(" - {} at {}", position, company)),
        (Some(position), None) => line.push_str(&format!(" - {}", position)),
        (None, Some(company)) => line.push_str(&format!(" - {}", company)),
        (None, None) => {}
    }
    if let Some(last_activity) = candidate.text("last_activity") {
        line.push_str(&format!(" {}", format!("(last activity {})", last_activity).dimmed()));
    }

    println!("  {}", line);
}

fn print_pagination(paginator: &Paginator) {
    let labels = paginator
        .labels()
        .into_iter()
        .map(|token| match token {
            PageToken::Page(page) if page == paginator.current_page() => {
                format!("[{}]", page).bold().to_string()
            }
            token => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let previous = if paginator.previous_disabled() { "<".dimmed() } else { "<".normal() };
    let next = if paginator.next_disabled() { ">".dimmed() } else { ">".normal() };
    println!("  {} {} {}", previous, labels, next);
}

/// Print every category and its options
pub fn print_catalog(catalog: &CategoryCatalog) {
    for category in catalog.iter() {
        println!("{} ({})", category.title.bold().blue(), category.key);
        for option in &category.options {
            println!("  {}{}", "• ".green(), option);
        }
    }
}
