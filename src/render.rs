//! Projects the visible bills into display fragments.
//!
//! Rendering goes through a small view model ([`Fragment`], [`BillCard`])
//! holding raw text. Only [`Fragment::to_html`] produces markup, and every
//! field-derived value passes through [`escape_html`] on the way out.

use crate::query::Coverage;
use crate::status::StatusCategory;
use crate::types::{parse_date, Bill};

/// Sponsors shown on a card before collapsing into "+N more"
pub const MAX_SPONSOR_TAGS: usize = 3;

pub const NO_RESULTS_MESSAGE: &str = "No bills found matching your criteria.";

const UNTITLED: &str = "Untitled bill";
const UNKNOWN: &str = "Unknown";
const NO_DESCRIPTION: &str = "No description available.";

/// One renderable unit of the bill list
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Card(BillCard),
    NoResults,
}

/// Display-ready data for a single bill
#[derive(Debug, Clone, PartialEq)]
pub struct BillCard {
    pub jurisdiction: Option<JurisdictionBadge>,
    pub bill_number: String,
    pub title: String,
    pub status: String,
    pub category: StatusCategory,
    pub description: String,
    pub last_action: String,
    /// Raw date for the `data-date` attribute
    pub date_attr: String,
    pub sponsor_tags: Vec<String>,
    /// Sponsors beyond [`MAX_SPONSOR_TAGS`]
    pub more_sponsors: usize,
    pub url: String,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionBadge {
    pub name: String,
    pub code: String,
    pub federal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    Available(String),
    Pending,
}

/// Build one fragment per bill, or a single "no results" fragment
pub fn render_fragments(bills: &[&Bill], coverage: Coverage) -> Vec<Fragment> {
    if bills.is_empty() {
        return vec![Fragment::NoResults];
    }
    bills
        .iter()
        .map(|bill| Fragment::Card(BillCard::from_bill(bill, coverage)))
        .collect()
}

/// Render the bill list container contents
pub fn render_list(bills: &[&Bill], coverage: Coverage) -> String {
    render_fragments(bills, coverage)
        .iter()
        .map(Fragment::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Error message shown in place of the bill list
pub fn error_html(message: &str) -> String {
    format!(
        "<div class=\"no-results load-error\">\n  <p role=\"alert\">{}</p>\n</div>",
        escape_html(message)
    )
}

/// Format a last-action date as "Mar 4, 2025".
///
/// Unparsable dates are shown as given; missing dates read "Unknown".
pub fn format_action_date(raw: Option<&str>) -> String {
    match raw {
        None => UNKNOWN.to_string(),
        Some(raw) => match parse_date(raw) {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => raw.to_string(),
        },
    }
}

impl BillCard {
    pub fn from_bill(bill: &Bill, coverage: Coverage) -> Self {
        let jurisdiction = coverage.is_multi().then(|| JurisdictionBadge {
            name: or_placeholder(bill.state_name(), UNKNOWN),
            code: bill.state_code.clone().unwrap_or_default(),
            federal: bill.is_federal(),
        });

        let analysis = match bill.analysis_url() {
            Some(url) => Analysis::Available(url.to_string()),
            None => Analysis::Pending,
        };

        Self {
            jurisdiction,
            bill_number: or_placeholder(&bill.bill_number, UNKNOWN),
            title: or_placeholder(&bill.title, UNTITLED),
            status: or_placeholder(&bill.status, UNKNOWN),
            category: StatusCategory::classify(&bill.status),
            description: or_placeholder(&bill.description, NO_DESCRIPTION),
            last_action: format_action_date(bill.action_date_raw()),
            date_attr: bill.action_date_raw().unwrap_or_default().to_string(),
            sponsor_tags: bill
                .sponsors
                .iter()
                .take(MAX_SPONSOR_TAGS)
                .map(|s| s.label())
                .collect(),
            more_sponsors: bill.sponsors.len().saturating_sub(MAX_SPONSOR_TAGS),
            url: bill.url.clone(),
            analysis,
        }
    }
}

impl Fragment {
    pub fn to_html(&self) -> String {
        match self {
            Fragment::NoResults => format!(
                "<div class=\"no-results\">\n  <p>{}</p>\n</div>",
                NO_RESULTS_MESSAGE
            ),
            Fragment::Card(card) => card.to_html(),
        }
    }
}

impl BillCard {
    fn to_html(&self) -> String {
        let (state, state_code) = match &self.jurisdiction {
            Some(j) => (j.name.as_str(), j.code.as_str()),
            None => ("", ""),
        };

        let badge = match &self.jurisdiction {
            Some(badge) => {
                let class = if badge.federal {
                    "state-badge-federal"
                } else {
                    "state-badge-state"
                };
                format!(
                    "        <span class=\"state-badge {}\">{}</span>\n",
                    class,
                    escape_html(&badge.name)
                )
            }
            None => String::new(),
        };

        let sponsors = if self.sponsor_tags.is_empty() {
            String::new()
        } else {
            let mut tags: Vec<String> = self
                .sponsor_tags
                .iter()
                .map(|tag| format!("      <span class=\"sponsor-tag\">{}</span>\n", escape_html(tag)))
                .collect();
            if self.more_sponsors > 0 {
                tags.push(format!(
                    "      <span class=\"sponsor-tag\">+{} more</span>\n",
                    self.more_sponsors
                ));
            }
            format!(
                "  <div class=\"bill-sponsors\">\n    <strong>Sponsors:</strong>\n    <div class=\"sponsor-list\">\n{}    </div>\n  </div>\n",
                tags.concat()
            )
        };

        let analysis = match &self.analysis {
            Analysis::Available(url) => format!(
                "    <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"btn btn-analysis\">Read Analysis</a>\n",
                escape_html(safe_href(url))
            ),
            Analysis::Pending => {
                "    <span class=\"btn btn-disabled\" title=\"Analysis coming soon\">Analysis Pending</span>\n"
                    .to_string()
            }
        };

        format!(
            r#"<article class="bill-card" data-state="{state}" data-state-code="{state_code}" data-status="{status}" data-date="{date}">
  <div class="bill-header">
    <div class="bill-title">
      <div class="bill-meta-top">
{badge}        <span class="bill-number">{number}</span>
      </div>
      <h3>{title}</h3>
    </div>
    <div class="bill-status {status_class}">{status}</div>
  </div>
  <p class="bill-description">{description}</p>
  <div class="bill-meta">
    <div class="bill-meta-item"><strong>Last Action:</strong> {last_action}</div>
  </div>
{sponsors}  <div class="bill-actions">
    <a href="{href}" target="_blank" rel="noopener noreferrer" class="btn btn-secondary">View Bill</a>
{analysis}  </div>
</article>"#,
            state = escape_html(state),
            state_code = escape_html(state_code),
            status = escape_html(&self.status),
            date = escape_html(&self.date_attr),
            badge = badge,
            number = escape_html(&self.bill_number),
            title = escape_html(&self.title),
            status_class = self.category.css_class(),
            description = escape_html(&self.description),
            last_action = escape_html(&self.last_action),
            sponsors = sponsors,
            href = escape_html(safe_href(&self.url)),
            analysis = analysis,
        )
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

/// Keep a link target only if it is relative or uses a web scheme; otherwise "#"
pub fn safe_href(url: &str) -> &str {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return "#";
    }
    let scheme_end = trimmed.find(':');
    let path_start = trimmed.find(['/', '?', '#']);
    match (scheme_end, path_start) {
        (Some(colon), Some(slash)) if slash < colon => trimmed,
        (Some(colon), _) => {
            let scheme = trimmed[..colon].to_ascii_lowercase();
            if matches!(scheme.as_str(), "http" | "https" | "mailto") {
                trimmed
            } else {
                "#"
            }
        }
        (None, _) => trimmed,
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sponsor;

    fn sponsor(name: &str, party: Option<&str>) -> Sponsor {
        Sponsor {
            name: name.to_string(),
            party: party.map(str::to_string),
            role: None,
        }
    }

    fn sample() -> Bill {
        Bill {
            bill_number: "HB 1".to_string(),
            title: "Adult Use Act".to_string(),
            description: "Legalizes adult use".to_string(),
            status: "Passed House".to_string(),
            last_action_date: Some("2025-03-04".to_string()),
            url: "https://legiscan.com/OH/bill/HB1/2025".to_string(),
            state_name: Some("Ohio".to_string()),
            state_code: Some("OH".to_string()),
            sponsors: vec![sponsor("Ann", Some("D")), sponsor("Bo", None)],
            ..Default::default()
        }
    }

    #[test]
    fn empty_list_renders_no_results() {
        assert_eq!(render_fragments(&[], Coverage::Multi), vec![Fragment::NoResults]);
        assert!(render_list(&[], Coverage::Single).contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn card_carries_all_sections() {
        let bill = sample();
        let html = render_list(&[&bill], Coverage::Multi);
        assert!(html.contains(r#"<span class="state-badge state-badge-state">Ohio</span>"#));
        assert!(html.contains(r#"<span class="bill-number">HB 1</span>"#));
        assert!(html.contains("<h3>Adult Use Act</h3>"));
        assert!(html.contains(r#"<div class="bill-status status-passed">Passed House</div>"#));
        assert!(html.contains("<strong>Last Action:</strong> Mar 4, 2025"));
        assert!(html.contains(r#"<span class="sponsor-tag">Ann (D)</span>"#));
        assert!(html.contains(r#"<span class="sponsor-tag">Bo</span>"#));
        assert!(html.contains(r#"href="https://legiscan.com/OH/bill/HB1/2025""#));
        assert!(html.contains("Analysis Pending"));
        assert!(!html.contains("more</span>"));
    }

    #[test]
    fn federal_badge_and_single_coverage() {
        let mut bill = sample();
        bill.state_code = Some("US".to_string());
        bill.state_name = Some("Federal".to_string());
        let multi = render_list(&[&bill], Coverage::Multi);
        assert!(multi.contains("state-badge-federal"));

        let single = render_list(&[&bill], Coverage::Single);
        assert!(!single.contains("state-badge"));
    }

    #[test]
    fn five_sponsors_show_three_tags_and_overflow() {
        let mut bill = sample();
        bill.sponsors = (1..=5).map(|i| sponsor(&format!("S{}", i), None)).collect();
        let html = render_list(&[&bill], Coverage::Multi);
        assert_eq!(html.matches(r#"<span class="sponsor-tag">"#).count(), 4);
        assert!(html.contains(r#"<span class="sponsor-tag">+2 more</span>"#));
        assert!(!html.contains("S4"));
    }

    #[test]
    fn analysis_link_when_present() {
        let mut bill = sample();
        bill.analysis_url = Some("https://example.org/analysis".to_string());
        let html = render_list(&[&bill], Coverage::Multi);
        assert!(html.contains(r#"<a href="https://example.org/analysis""#));
        assert!(!html.contains("Analysis Pending"));
    }

    #[test]
    fn field_text_is_escaped() {
        let mut bill = sample();
        bill.title = "<script>alert('x')</script>".to_string();
        bill.sponsors = vec![sponsor("<b>Eve</b>", Some("\"R\""))];
        let html = render_list(&[&bill], Coverage::Multi);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt; (&quot;R&quot;)"));
    }

    #[test]
    fn unsafe_links_are_neutralised() {
        let mut bill = sample();
        bill.url = "javascript:alert(1)".to_string();
        bill.analysis_url = Some("data:text/html,boom".to_string());
        let html = render_list(&[&bill], Coverage::Multi);
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("data:text"));
        assert_eq!(html.matches(r##"href="#""##).count(), 2);
    }

    #[test]
    fn safe_href_accepts_relative_and_web_links() {
        assert_eq!(safe_href("/bills/HB1"), "/bills/HB1");
        assert_eq!(safe_href("bills/HB1?x=a:b"), "bills/HB1?x=a:b");
        assert_eq!(safe_href("HTTPS://example.org"), "HTTPS://example.org");
        assert_eq!(safe_href("  "), "#");
        assert_eq!(safe_href("vbscript:msgbox"), "#");
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let bill = Bill::default();
        let card = BillCard::from_bill(&bill, Coverage::Multi);
        assert_eq!(card.title, UNTITLED);
        assert_eq!(card.bill_number, UNKNOWN);
        assert_eq!(card.description, NO_DESCRIPTION);
        assert_eq!(card.last_action, UNKNOWN);
        assert_eq!(card.category, StatusCategory::Introduced);
        assert!(card.to_html().contains(r##"href="#""##));
    }

    #[test]
    fn unparsable_date_is_shown_verbatim() {
        assert_eq!(format_action_date(Some("sometime")), "sometime");
        assert_eq!(format_action_date(Some("2024-11-05")), "Nov 5, 2024");
    }

    #[test]
    fn error_message_is_escaped() {
        let html = error_html("Failed <now>");
        assert!(html.contains("Failed &lt;now&gt;"));
        assert!(html.contains("no-results"));
    }
}
