use crate::stats::Statistics;

/// Named insertion points the tracker writes into.
///
/// The surface is owned by the page, not by the tracker: the tracker only
/// pushes values into these slots.
pub trait DisplaySurface {
    fn set_statistics(&mut self, stats: &Statistics);
    fn set_jurisdiction_options(&mut self, options: &[String]);
    /// Raw `last_updated` timestamp from the bills document
    fn set_last_updated(&mut self, raw: &str);
    /// Replace the bill list container contents
    fn set_bill_list(&mut self, html: String);
}

/// In-memory surface that keeps every slot for later page assembly
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSurface {
    /// `None` until a collection has been loaded
    pub statistics: Option<Statistics>,
    pub jurisdiction_options: Vec<String>,
    pub last_updated: Option<String>,
    pub bill_list: String,
    /// Number of times the list container was replaced
    pub list_renders: usize,
}

impl PageSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySurface for PageSurface {
    fn set_statistics(&mut self, stats: &Statistics) {
        self.statistics = Some(*stats);
    }

    fn set_jurisdiction_options(&mut self, options: &[String]) {
        self.jurisdiction_options = options.to_vec();
    }

    fn set_last_updated(&mut self, raw: &str) {
        self.last_updated = Some(raw.to_string());
    }

    fn set_bill_list(&mut self, html: String) {
        self.bill_list = html;
        self.list_renders += 1;
    }
}
