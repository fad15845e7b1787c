use crate::error::{Error, Result};
use crate::feed::FeedChannel;
use crate::loader::BillSource;
use crate::page::PageOptions;
use crate::query::{Coverage, QueryState, SortOrder};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when nothing else is given
pub const DEFAULT_CONFIG_FILE: &str = "tracker.yml";

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "BILL_TRACKER_CONFIG";

pub const FEED_FILE: &str = "feed.xml";
pub const PAGE_FILE: &str = "index.html";

/// Configuration for a tracker run
#[derive(Debug, Clone)]
pub struct Config {
    pub source: BillSource,
    pub output_dir: PathBuf,
    pub title: String,
    /// Public address of the published page, used as the feed link
    pub site_url: Option<String>,
    pub coverage: Coverage,
    /// Whether to publish `feed.xml` next to the page
    pub feed: bool,
    /// Query applied before the first render
    pub query: QueryState,
    pub log_level: String,
}

/// On-disk shape of `tracker.yml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub title: Option<String>,
    pub site_url: Option<String>,
    pub coverage: Option<Coverage>,
    pub feed: Option<bool>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub jurisdiction: Option<String>,
    pub sort: Option<SortOrder>,
    pub log_level: Option<String>,
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            source: BillSource::default(),
            output_dir: PathBuf::from("public"),
            title: "Legislation Tracker".to_string(),
            site_url: None,
            coverage: Coverage::Multi,
            feed: true,
            query: QueryState::default(),
            log_level: "info".to_string(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Config("Title must not be empty".to_string()));
        }

        match &self.source {
            BillSource::Path(path) if path.as_os_str().is_empty() => {
                return Err(Error::Config("Bills source must not be empty".to_string()));
            }
            _ => {}
        }

        if let Some(url) = &self.site_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "Site URL must start with http:// or https://: {}",
                    url
                )));
            }
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(Error::Config(format!(
                "Output directory is not a directory: {}",
                self.output_dir.display()
            )));
        }

        Ok(())
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            title: self.title.clone(),
            coverage: self.coverage,
            feed_href: self.feed.then(|| FEED_FILE.to_string()),
        }
    }

    pub fn feed_channel(&self, last_updated: &str) -> FeedChannel {
        FeedChannel {
            title: self.title.clone(),
            link: self.site_url.clone().unwrap_or_else(|| PAGE_FILE.to_string()),
            description: format!("Latest bills tracked by {}", self.title),
            language: "en-us".to_string(),
            last_updated: last_updated.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and parse a YAML config file
pub fn load_config_file(config_path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {}",
            config_path.display(),
            e
        ))
    })?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Pick the config file: explicit flag, then environment variable, then
/// `tracker.yml` if it exists in the working directory
pub fn resolve_config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = flag {
        return Some(path);
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.exists().then_some(default)
}

/// Builder for creating configurations
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    /// Layer the values of a config file over the current settings
    pub fn file(mut self, file: FileConfig) -> Self {
        if let Some(source) = file.source {
            self = self.source_str(&source);
        }
        if let Some(dir) = file.output_dir {
            self.config.output_dir = dir;
        }
        if let Some(title) = file.title {
            self.config.title = title;
        }
        if file.site_url.is_some() {
            self.config.site_url = file.site_url;
        }
        if let Some(coverage) = file.coverage {
            self.config.coverage = coverage;
        }
        if let Some(feed) = file.feed {
            self.config.feed = feed;
        }
        if let Some(search) = file.search {
            self = self.search(search);
        }
        if let Some(status) = file.status {
            self = self.status(&status);
        }
        if let Some(jurisdiction) = file.jurisdiction {
            self = self.jurisdiction(&jurisdiction);
        }
        if file.sort.is_some() {
            self.config.query.sort_order = file.sort;
        }
        if let Some(level) = file.log_level {
            self.config.log_level = level;
        }
        self
    }

    pub fn source(mut self, source: BillSource) -> Self {
        self.config.source = source;
        self
    }

    /// Set the source from a path or URL string
    pub fn source_str(mut self, source: &str) -> Self {
        self.config.source = BillSource::parse(source);
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn site_url(mut self, url: impl Into<String>) -> Self {
        self.config.site_url = Some(url.into());
        self
    }

    pub fn coverage(mut self, coverage: Coverage) -> Self {
        self.config.coverage = coverage;
        self
    }

    /// Set coverage from string
    pub fn coverage_str(mut self, coverage: &str) -> Result<Self> {
        self.config.coverage = coverage.parse()?;
        Ok(self)
    }

    pub fn feed(mut self, enabled: bool) -> Self {
        self.config.feed = enabled;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.config.query.search_term = term.into();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.config.query.status_filter = status.into();
        self
    }

    pub fn jurisdiction(mut self, jurisdiction: &str) -> Self {
        self.config.query.jurisdiction_filter = jurisdiction.into();
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.config.query.sort_order = Some(order);
        self
    }

    /// Set sort order from string
    pub fn sort_order_str(mut self, order: &str) -> Result<Self> {
        self.config.query.sort_order = Some(order.parse()?);
        Ok(self)
    }

    /// Keep the collection order
    pub fn unsorted(mut self) -> Self {
        self.config.query.sort_order = None;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
