use crate::config::{FilterCriteria, JurisdictionFilter, SortKey, StatusFilter};
use crate::dates::format_card_date;
use crate::stats::Statistics;
use crate::types::{BillRecord, Sponsor, FEDERAL_CODE};
use std::fmt::{self, Write};

/// Sponsors shown as tags before collapsing the rest into "+n more"
pub const MAX_SPONSOR_TAGS: usize = 3;

pub const NO_RESULTS_HTML: &str =
    r#"<div id="noResults" class="no-results"><p>No bills found matching your criteria.</p></div>"#;

/// Visual class for a bill's status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Introduced,
    Committee,
    Passed,
    Enacted,
}

impl StatusClass {
    /// First match wins; unknown or missing statuses use the introduced styling
    pub fn classify(status: Option<&str>) -> Self {
        let status = status.unwrap_or("").to_lowercase();

        if status.contains("introduced") {
            StatusClass::Introduced
        } else if status.contains("committee") {
            StatusClass::Committee
        } else if status.contains("passed") {
            StatusClass::Passed
        } else if status.contains("enacted") || status.contains("signed") {
            StatusClass::Enacted
        } else {
            StatusClass::Introduced
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusClass::Introduced => "status-introduced",
            StatusClass::Committee => "status-committee",
            StatusClass::Passed => "status-passed",
            StatusClass::Enacted => "status-enacted",
        }
    }
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Sponsor tags: the first three, then "+n more". Empty when there are no sponsors.
pub fn render_sponsors(sponsors: &[Sponsor]) -> String {
    if sponsors.is_empty() {
        return String::new();
    }

    let mut tags: Vec<String> = sponsors
        .iter()
        .take(MAX_SPONSOR_TAGS)
        .map(|sponsor| {
            format!(
                r#"<span class="sponsor-tag">{}</span>"#,
                escape_html(&sponsor.label())
            )
        })
        .collect();

    if sponsors.len() > MAX_SPONSOR_TAGS {
        tags.push(format!(
            r#"<span class="sponsor-tag">+{} more</span>"#,
            sponsors.len() - MAX_SPONSOR_TAGS
        ));
    }

    format!(
        r#"<div class="bill-sponsors"><strong>Sponsors:</strong><div class="sponsor-list">{}</div></div>"#,
        tags.join(" ")
    )
}

/// Analysis link, or an inert placeholder so every card keeps the same layout
pub fn render_analysis_action(analysis_url: Option<&str>) -> String {
    match analysis_url {
        Some(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="btn btn-analysis">Read Analysis</a>"#,
            escape_html(url)
        ),
        None => r#"<span class="btn btn-disabled" title="Analysis coming soon" aria-disabled="true">Analysis Pending</span>"#
            .to_string(),
    }
}

/// Write one bill card
pub fn render_card<W: Write>(out: &mut W, bill: &BillRecord) -> fmt::Result {
    let badge_class = if bill.is_federal() {
        "state-badge-federal"
    } else {
        "state-badge-state"
    };
    let status_class = StatusClass::classify(bill.status());
    let source_url = if bill.source_url.trim().is_empty() {
        "#"
    } else {
        bill.source_url.as_str()
    };

    write!(
        out,
        r#"      <article class="bill-card" data-state="{}" data-state-code="{}" data-bill-number="{}">
        <div class="bill-header">
          <div class="bill-title">
            <div class="bill-meta-top">
              <span class="state-badge {}">{}</span>
              <span class="bill-number">{}</span>
            </div>
            <h3>{}</h3>
          </div>
          <div class="bill-status {}">{}</div>
        </div>
"#,
        escape_html(&bill.jurisdiction_name),
        escape_html(&bill.jurisdiction_code),
        escape_html(&bill.bill_number),
        badge_class,
        escape_html(&bill.jurisdiction_name),
        escape_html(&bill.bill_number),
        escape_html(bill.title().unwrap_or("Untitled Bill")),
        status_class.css_class(),
        escape_html(bill.status().unwrap_or("Unknown Status")),
    )?;

    if let Some(description) = bill.description() {
        writeln!(
            out,
            r#"        <p class="bill-description">{}</p>"#,
            escape_html(description)
        )?;
    }

    writeln!(out, r#"        <div class="bill-meta">"#)?;
    writeln!(
        out,
        r#"          <div class="bill-meta-item"><strong>Last Action:</strong> {}</div>"#,
        escape_html(&format_card_date(bill.action_date()))
    )?;
    if let Some(last_action) = bill.last_action() {
        writeln!(
            out,
            r#"          <div class="bill-meta-item"><strong>Latest:</strong> {}</div>"#,
            escape_html(last_action)
        )?;
    }
    writeln!(out, "        </div>")?;

    let sponsors = render_sponsors(&bill.sponsors);
    if !sponsors.is_empty() {
        writeln!(out, "        {}", sponsors)?;
    }

    write!(
        out,
        r#"        <div class="bill-actions">
          <a href="{}" target="_blank" rel="noopener noreferrer" class="btn btn-secondary">View Bill</a>
          {}
        </div>
      </article>
"#,
        escape_html(source_url),
        render_analysis_action(bill.analysis_url()),
    )
}

/// Cards for the whole view, or the no-results indicator when it is empty.
/// A card that fails to render is skipped; its siblings still render.
pub fn render_cards(view: &[&BillRecord]) -> String {
    if view.is_empty() {
        return NO_RESULTS_HTML.to_string();
    }

    let mut html = String::new();
    for bill in view {
        let mut card = String::new();
        match render_card(&mut card, bill) {
            Ok(()) => html.push_str(&card),
            Err(e) => log::warn!(
                "Skipping card for {} {}: {}",
                bill.jurisdiction_code,
                bill.bill_number,
                e
            ),
        }
    }
    html
}

/// Single visible message shown in place of the bill list
pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="error-message" role="alert"><p>{}</p></div>"#,
        escape_html(message)
    )
}

pub fn render_loading() -> String {
    r#"<div class="loading"><p>Loading bills...</p></div>"#.to_string()
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

/// Jurisdiction control options: all, federal, then each named jurisdiction
pub fn render_jurisdiction_options(names: &[String], selected: &JurisdictionFilter) -> String {
    let states: Vec<String> = names
        .iter()
        .map(|name| {
            option(
                name,
                name,
                matches!(selected, JurisdictionFilter::Named(n) if n == name),
            )
        })
        .collect();

    format!(
        r#"{}{}<optgroup label="States">{}</optgroup>"#,
        option(
            "all",
            "All States + Federal",
            *selected == JurisdictionFilter::All
        ),
        option(
            FEDERAL_CODE,
            "Federal Only",
            *selected == JurisdictionFilter::Federal
        ),
        states.join("")
    )
}

pub fn render_status_options(selected: &StatusFilter) -> String {
    StatusFilter::CHOICES
        .iter()
        .map(|(value, label)| option(value, label, selected.as_value() == *value))
        .collect()
}

pub fn render_sort_options(selected: SortKey) -> String {
    SortKey::ALL
        .iter()
        .map(|key| option(key.as_value(), key.label(), *key == selected))
        .collect()
}

pub fn render_stats(stats: &Statistics) -> String {
    [
        ("Total Bills", stats.total_bills),
        ("States Tracked", stats.jurisdictions),
        ("Active Bills", stats.active_bills),
        ("With Analysis", stats.with_analysis),
    ]
    .iter()
    .map(|(label, count)| {
        format!(
            r#"<div class="stat-card"><h4>{}</h4><p class="stat-number">{}</p></div>"#,
            label, count
        )
    })
    .collect()
}

/// Everything the page shell needs; each slot is already-rendered HTML unless noted
pub struct PageSlots<'a> {
    /// Plain text
    pub title: &'a str,
    pub criteria: &'a FilterCriteria,
    pub jurisdiction_options: &'a str,
    pub statistics: &'a str,
    /// Plain text
    pub last_updated: &'a str,
    pub content: &'a str,
}

/// Complete HTML document
pub fn page(slots: &PageSlots<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
    * {{
      margin: 0;
      padding: 0;
      box-sizing: border-box;
    }}

    body {{
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
      line-height: 1.6;
      color: #333;
      background: #fafafa;
    }}

    .container {{
      max-width: 1100px;
      margin: 0 auto;
      padding: 2rem 1rem;
    }}

    header {{
      background: #1f4d2b;
      color: white;
      padding: 2rem 0;
    }}

    h1 {{
      font-size: 2.25rem;
      font-weight: 700;
      letter-spacing: -0.02em;
    }}

    .last-updated {{
      font-size: 0.9rem;
      opacity: 0.9;
    }}

    .filter-controls {{
      display: flex;
      flex-wrap: wrap;
      gap: 0.75rem;
      margin: 1rem 0 2rem;
    }}

    .filter-controls input,
    .filter-controls select {{
      padding: 0.5rem 0.75rem;
      border: 1px solid #ccc;
      border-radius: 4px;
      font-size: 0.95rem;
    }}

    .filter-controls input {{
      flex: 1 1 280px;
    }}

    .stats {{
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 1rem;
      margin-bottom: 2rem;
    }}

    .stat-card {{
      background: white;
      border-radius: 8px;
      padding: 1rem 1.25rem;
      box-shadow: 0 1px 3px rgba(0,0,0,0.1);
    }}

    .stat-number {{
      font-size: 1.75rem;
      font-weight: 700;
      color: #1f4d2b;
    }}

    #billsContainer {{
      display: flex;
      flex-direction: column;
      gap: 1.5rem;
    }}

    .bill-card {{
      background: white;
      border-radius: 8px;
      padding: 1.5rem;
      box-shadow: 0 1px 3px rgba(0,0,0,0.1);
    }}

    .bill-header {{
      display: flex;
      justify-content: space-between;
      gap: 1rem;
      margin-bottom: 0.75rem;
    }}

    .bill-meta-top {{
      display: flex;
      gap: 0.5rem;
      align-items: center;
      margin-bottom: 0.25rem;
    }}

    .state-badge {{
      padding: 0.15rem 0.6rem;
      border-radius: 12px;
      font-size: 0.8rem;
      font-weight: 600;
    }}

    .state-badge-state {{
      background: #e8f0fe;
      color: #1a56db;
    }}

    .state-badge-federal {{
      background: #fde8e8;
      color: #c81e1e;
    }}

    .bill-number {{
      font-weight: 600;
      color: #666;
    }}

    .bill-status {{
      align-self: flex-start;
      white-space: nowrap;
      padding: 0.25rem 0.75rem;
      border-radius: 12px;
      font-size: 0.85rem;
      font-weight: 500;
    }}

    .status-introduced {{ background: #f0f0f0; color: #555; }}
    .status-committee {{ background: #fff4e5; color: #b45309; }}
    .status-passed {{ background: #e0f2fe; color: #0369a1; }}
    .status-enacted {{ background: #dcfce7; color: #15803d; }}

    .bill-description {{
      color: #555;
      margin-bottom: 0.75rem;
    }}

    .bill-meta {{
      font-size: 0.9rem;
      color: #666;
      margin-bottom: 0.75rem;
    }}

    .sponsor-list {{
      display: flex;
      flex-wrap: wrap;
      gap: 0.4rem;
      margin-top: 0.25rem;
    }}

    .sponsor-tag {{
      background: #f0f0f0;
      border-radius: 12px;
      padding: 0.15rem 0.6rem;
      font-size: 0.8rem;
    }}

    .bill-actions {{
      display: flex;
      gap: 0.75rem;
      margin-top: 1rem;
    }}

    .btn {{
      display: inline-block;
      padding: 0.45rem 1rem;
      border-radius: 4px;
      font-size: 0.9rem;
      text-decoration: none;
    }}

    .btn-secondary {{ background: #f0f0f0; color: #333; }}
    .btn-analysis {{ background: #1f4d2b; color: white; }}
    .btn-disabled {{ background: #f5f5f5; color: #aaa; cursor: not-allowed; }}

    .no-results,
    .error-message,
    .loading {{
      text-align: center;
      padding: 3rem 1rem;
      color: #888;
    }}

    .error-message {{
      color: #c81e1e;
    }}

    @media (max-width: 768px) {{
      h1 {{
        font-size: 1.75rem;
      }}

      .bill-header {{
        flex-direction: column;
      }}
    }}
  </style>
</head>
<body>
  <header>
    <div class="container">
      <h1>{title}</h1>
      <span class="last-updated">Last Updated: {last_updated}</span>
    </div>
  </header>

  <main class="container">
    <section class="filters">
      <form class="filter-controls" method="get">
        <input type="text" id="searchInput" name="search" value="{search}" placeholder="Search bills by title, description, or bill number..." aria-label="Search bills">
        <select id="stateFilter" name="jurisdiction" aria-label="Filter by state">{jurisdiction_options}</select>
        <select id="statusFilter" name="status" aria-label="Filter by status">{status_options}</select>
        <select id="sortOrder" name="sort" aria-label="Sort order">{sort_options}</select>
      </form>
    </section>

    <section class="stats">{statistics}</section>

    <section class="bills-list">
      <div id="billsContainer">
{content}
      </div>
    </section>
  </main>
</body>
</html>
"#,
        title = escape_html(slots.title),
        last_updated = escape_html(slots.last_updated),
        search = escape_html(&slots.criteria.search),
        jurisdiction_options = slots.jurisdiction_options,
        status_options = render_status_options(&slots.criteria.status),
        sort_options = render_sort_options(slots.criteria.sort),
        statistics = slots.statistics,
        content = slots.content,
    )
}
