use crate::render::safe_href;
use crate::status::StatusCategory;
use crate::types::Bill;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rss::{ChannelBuilder, ItemBuilder};
use std::collections::HashSet;
use tracing::debug;

/// Channel-level settings for the bills feed
#[derive(Debug, Clone)]
pub struct FeedChannel {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    /// Raw `last_updated` stamp of the bills document
    pub last_updated: String,
}

/// Parse the document's `last_updated` stamp as UTC.
///
/// Naive timestamps are taken to be UTC already.
pub fn parse_last_updated(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// Title of a feed item: "HB 1 - Adult Use Act"
pub fn extract_title(bill: &Bill) -> String {
    let title = bill.title.trim();
    match (bill.bill_number.trim(), title) {
        ("", "") => "Legislative Update".to_string(),
        ("", title) => title.to_string(),
        (number, "") => number.to_string(),
        (number, title) => format!("{} - {}", number, title),
    }
}

/// Plain-text item description; the feed writer escapes it
pub fn extract_description(bill: &Bill) -> String {
    let mut parts = Vec::new();
    if !bill.status.trim().is_empty() {
        parts.push(format!("status: {}", bill.status.trim()));
    }
    if let Some(state) = bill.state_name.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("jurisdiction: {}", state));
    }
    if let Some(date) = bill.action_date_raw() {
        parts.push(format!("last action: {}", date));
    }
    if !bill.description.trim().is_empty() {
        parts.push(bill.description.trim().to_string());
    }

    if parts.is_empty() {
        "Legislative update".to_string()
    } else {
        parts.join("\n")
    }
}

/// Unique id of a feed item: the bill url, else jurisdiction plus bill number
pub fn extract_guid(bill: &Bill) -> String {
    if !bill.url.trim().is_empty() {
        return bill.url.trim().to_string();
    }
    format!("{}_{}", bill.state_code.as_deref().unwrap_or(""), bill.bill_number)
}

/// Convert the visible bills to an RSS 2.0 document
pub fn bills_to_rss(bills: &[&Bill], channel: &FeedChannel) -> String {
    let mut items = Vec::new();
    let mut seen_guids = HashSet::new();

    for bill in bills {
        let guid = extract_guid(bill);

        // Deduplicate by GUID
        if !seen_guids.insert(guid.clone()) {
            debug!(%guid, bill_number = %bill.bill_number, "dropping feed item with duplicate guid");
            continue;
        }

        let mut item_builder = ItemBuilder::default();
        item_builder.title(extract_title(bill));
        item_builder.description(extract_description(bill));

        let link = safe_href(&bill.url);
        if link != "#" {
            item_builder.link(link.to_string());
        }

        if let Some(pub_date) = bill
            .action_date()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| Utc.from_utc_datetime(&dt))
        {
            item_builder.pub_date(pub_date.to_rfc2822());
        }

        item_builder.guid(rss::Guid {
            value: guid,
            permalink: false,
        });

        let mut categories = vec![StatusCategory::classify(&bill.status).as_str().to_string()];
        if let Some(state) = bill.state_name.as_deref().filter(|s| !s.is_empty()) {
            categories.push(state.to_string());
        }
        for name in categories {
            item_builder.category(rss::Category { name, domain: None });
        }

        items.push(item_builder.build());
    }

    let channel = ChannelBuilder::default()
        .title(channel.title.clone())
        .link(channel.link.clone())
        .description(channel.description.clone())
        .language(Some(channel.language.clone()))
        .last_build_date(parse_last_updated(&channel.last_updated).map(|dt| dt.to_rfc2822()))
        .items(items)
        .build();

    channel.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> FeedChannel {
        FeedChannel {
            title: "Bills".to_string(),
            link: "https://tracker.example.org/".to_string(),
            description: "Tracked bills".to_string(),
            language: "en-us".to_string(),
            last_updated: "2025-01-15T14:05:00Z".to_string(),
        }
    }

    fn bill(number: &str, url: &str) -> Bill {
        Bill {
            bill_number: number.to_string(),
            title: "Hemp <Reform> & More".to_string(),
            status: "In Committee".to_string(),
            last_action_date: Some("2025-01-10".to_string()),
            url: url.to_string(),
            state_name: Some("Ohio".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn builds_items_with_dates_and_categories() {
        let a = bill("HB 1", "https://example.org/hb1");
        let xml = bills_to_rss(&[&a], &channel());
        let parsed = rss::Channel::read_from(xml.as_bytes()).unwrap();

        assert_eq!(parsed.title(), "Bills");
        assert_eq!(parsed.last_build_date(), Some("Wed, 15 Jan 2025 14:05:00 +0000"));
        let item = &parsed.items()[0];
        assert_eq!(item.title(), Some("HB 1 - Hemp <Reform> & More"));
        assert_eq!(item.link(), Some("https://example.org/hb1"));
        assert_eq!(item.pub_date(), Some("Fri, 10 Jan 2025 00:00:00 +0000"));
        let categories: Vec<_> = item.categories().iter().map(|c| c.name()).collect();
        assert_eq!(categories, ["committee", "Ohio"]);
    }

    #[test]
    fn duplicate_guids_are_dropped() {
        let a = bill("HB 1", "https://example.org/hb1");
        let b = bill("HB 1 (copy)", "https://example.org/hb1");
        let c = bill("HB 2", "");
        let xml = bills_to_rss(&[&a, &b, &c], &channel());
        let parsed = rss::Channel::read_from(xml.as_bytes()).unwrap();
        assert_eq!(parsed.items().len(), 2);
        assert_eq!(parsed.items()[1].guid().map(|g| g.value()), Some("_HB 2"));
        assert_eq!(parsed.items()[1].link(), None);
    }

    #[test]
    fn same_number_in_different_jurisdictions_is_kept() {
        let mut ohio = bill("HB 2", "");
        ohio.state_code = Some("OH".to_string());
        let mut alaska = bill("HB 2", "");
        alaska.state_code = Some("AK".to_string());
        alaska.state_name = Some("Alaska".to_string());

        let xml = bills_to_rss(&[&ohio, &alaska], &channel());
        let parsed = rss::Channel::read_from(xml.as_bytes()).unwrap();
        let guids: Vec<_> = parsed
            .items()
            .iter()
            .filter_map(|i| i.guid().map(|g| g.value()))
            .collect();
        assert_eq!(guids, ["OH_HB 2", "AK_HB 2"]);
    }

    #[test]
    fn script_links_are_left_out() {
        let a = bill("HB 1", "javascript:alert(1)");
        let xml = bills_to_rss(&[&a], &channel());
        assert!(!xml.contains("<link>javascript:"));
    }

    #[test]
    fn title_falls_back_when_fields_missing() {
        assert_eq!(extract_title(&Bill::default()), "Legislative Update");
        let mut b = Bill::default();
        b.bill_number = "SB 9".to_string();
        assert_eq!(extract_title(&b), "SB 9");
    }
}
