use crate::query::{Coverage, QueryState, SortOrder};
use crate::render::escape_html;
use crate::surface::PageSurface;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Page-level settings that do not come from the bills document
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
    pub coverage: Coverage,
    /// Href of the published feed, if any
    pub feed_href: Option<String>,
}

const STATUS_OPTIONS: &[(&str, &str)] = &[
    ("all", "All Statuses"),
    ("introduced", "Introduced"),
    ("committee", "In Committee"),
    ("passed", "Passed"),
    ("enacted", "Enacted"),
];

/// Format the document's `last_updated` stamp for display.
///
/// Returns the raw text when it is not a recognised ISO-8601 value.
pub fn format_last_updated(raw: &str) -> String {
    const WITH_TIME: &str = "%B %-d, %Y at %I:%M %p";
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format(WITH_TIME).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(WITH_TIME).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }
    raw.to_string()
}

/// Assemble the complete static page from the surface slots
pub fn render_page(surface: &PageSurface, query: &QueryState, options: &PageOptions) -> String {
    let title = escape_html(&options.title);

    let feed_link = match &options.feed_href {
        Some(href) => format!(
            "\n  <link rel=\"alternate\" type=\"application/rss+xml\" title=\"{}\" href=\"{}\">",
            title,
            escape_html(href)
        ),
        None => String::new(),
    };

    let last_updated = match &surface.last_updated {
        Some(raw) => format!(
            "<time datetime=\"{}\">{}</time>",
            escape_html(raw),
            escape_html(&format_last_updated(raw))
        ),
        None => "-".to_string(),
    };

    let stat = |value: Option<usize>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    let stats = surface.statistics;

    let mut stat_cards = vec![
        ("totalBills", "Total Bills", stat(stats.map(|s| s.total_bills))),
    ];
    if options.coverage.is_multi() {
        stat_cards.push(("totalStates", "States Tracked", stat(stats.map(|s| s.jurisdictions))));
    }
    stat_cards.push(("activeBills", "Active Bills", stat(stats.map(|s| s.active_bills))));
    stat_cards.push(("analyzedBills", "With Analysis", stat(stats.map(|s| s.analyzed_bills))));
    let stat_cards_html = stat_cards
        .iter()
        .map(|(id, label, value)| {
            format!(
                "      <div class=\"stat-card\">\n        <h4>{}</h4>\n        <p class=\"stat-number\" id=\"{}\">{}</p>\n      </div>",
                label, id, value
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>{feed_link}
  <link rel="stylesheet" href="style.css">
</head>
<body>
  <header>
    <div class="container">
      <h1>{title}</h1>
      <span class="last-updated" id="lastUpdated">Last Updated: {last_updated}</span>
    </div>
  </header>

  <main class="container">
    <section class="filters">
      <form class="filter-controls" method="get">
        <input type="text" id="searchInput" name="search" value="{search}" placeholder="Search bills by title, description, or bill number...">
{jurisdiction_select}        <select id="statusFilter" name="status">
{status_options}
        </select>
        <select id="sortOrder" name="sort">
{sort_options}
        </select>
      </form>
    </section>

    <section class="stats">
{stat_cards_html}
    </section>

    <section class="bills-list">
      <div id="billsContainer">
{bill_list}
      </div>
    </section>
  </main>
</body>
</html>
"#,
        title = title,
        feed_link = feed_link,
        last_updated = last_updated,
        search = escape_html(&query.search_term),
        jurisdiction_select = jurisdiction_select(surface, query, options.coverage),
        status_options = status_options(query),
        sort_options = sort_options(query, options.coverage),
        stat_cards_html = stat_cards_html,
        bill_list = surface.bill_list,
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "          <option value=\"{}\"{}>{}</option>",
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

fn jurisdiction_select(surface: &PageSurface, query: &QueryState, coverage: Coverage) -> String {
    if !coverage.is_multi() {
        return String::new();
    }
    let current = query.jurisdiction_filter.as_str();
    let mut lines = vec![
        "        <select id=\"stateFilter\" name=\"state\">".to_string(),
        option("all", "All States + Federal", current == "all"),
        option("US", "Federal Only", current == "US"),
        "          <optgroup label=\"States\">".to_string(),
    ];
    lines.extend(
        surface
            .jurisdiction_options
            .iter()
            .map(|state| option(state, state, current == state)),
    );
    lines.push("          </optgroup>".to_string());
    lines.push("        </select>".to_string());
    let mut html = lines.join("\n");
    html.push('\n');
    html
}

fn status_options(query: &QueryState) -> String {
    let current = query.status_filter.as_str();
    STATUS_OPTIONS
        .iter()
        .map(|(value, label)| option(value, label, current == *value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn sort_options(query: &QueryState, coverage: Coverage) -> String {
    SortOrder::all()
        .into_iter()
        .filter(|order| coverage.is_multi() || *order != SortOrder::State)
        .map(|order| {
            let label = match order {
                SortOrder::Recent => "Most Recent",
                SortOrder::Oldest => "Oldest First",
                SortOrder::State => "By State",
                SortOrder::Alphabetical => "By Bill Number",
            };
            option(order.as_str(), label, query.sort_order == Some(order))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
