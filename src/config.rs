use crate::error::{Error, Result};
use crate::feed::FeedLocation;
use crate::types::FEDERAL_CODE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Ordering applied to the filtered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest action date first
    #[default]
    Recent,
    /// Oldest action date first
    Oldest,
    /// Jurisdiction name, newest first within a jurisdiction
    ByJurisdiction,
    /// Bill number
    Alphabetical,
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "oldest" => SortKey::Oldest,
            "state" | "jurisdiction" | "byjurisdiction" => SortKey::ByJurisdiction,
            "alphabetical" => SortKey::Alphabetical,
            "recent" | _ => SortKey::Recent,
        }
    }
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Recent,
        SortKey::Oldest,
        SortKey::ByJurisdiction,
        SortKey::Alphabetical,
    ];

    /// Value carried by the sort control
    pub fn as_value(&self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Oldest => "oldest",
            SortKey::ByJurisdiction => "state",
            SortKey::Alphabetical => "alphabetical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Recent => "Most Recent",
            SortKey::Oldest => "Oldest First",
            SortKey::ByJurisdiction => "By State",
            SortKey::Alphabetical => "By Bill Number",
        }
    }
}

/// Jurisdiction selection: everything, federal bills only, or one named jurisdiction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JurisdictionFilter {
    #[default]
    All,
    Federal,
    Named(String),
}

impl From<&str> for JurisdictionFilter {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            JurisdictionFilter::All
        } else if trimmed == FEDERAL_CODE {
            JurisdictionFilter::Federal
        } else {
            JurisdictionFilter::Named(trimmed.to_string())
        }
    }
}

impl JurisdictionFilter {
    pub fn as_value(&self) -> &str {
        match self {
            JurisdictionFilter::All => "all",
            JurisdictionFilter::Federal => FEDERAL_CODE,
            JurisdictionFilter::Named(name) => name,
        }
    }
}

/// Status selection: everything, or statuses containing a substring
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    /// Lowercased substring
    Contains(String),
}

impl From<&str> for StatusFilter {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            StatusFilter::All
        } else {
            StatusFilter::Contains(trimmed.to_lowercase())
        }
    }
}

impl StatusFilter {
    /// Choices offered by the status control, as (value, label)
    pub const CHOICES: [(&'static str, &'static str); 5] = [
        ("all", "All Statuses"),
        ("introduced", "Introduced"),
        ("committee", "In Committee"),
        ("passed", "Passed"),
        ("enacted", "Enacted"),
    ];

    pub fn as_value(&self) -> &str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Contains(s) => s,
        }
    }
}

/// Current values of the four user controls
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search: String,
    pub jurisdiction: JurisdictionFilter,
    pub status: StatusFilter,
    pub sort: SortKey,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn with_jurisdiction(mut self, jurisdiction: impl Into<JurisdictionFilter>) -> Self {
        self.jurisdiction = jurisdiction.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_sort(mut self, sort: impl Into<SortKey>) -> Self {
        self.sort = sort.into();
        self
    }
}

/// Optional `billboard.yml` settings. CLI flags take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub feed: Option<String>,
    pub title: Option<String>,
    pub output: Option<PathBuf>,
    pub search: Option<String>,
    pub jurisdiction: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

impl FileConfig {
    /// Load and parse a YAML config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

pub const DEFAULT_TITLE: &str = "Legislation Tracker";
pub const DEFAULT_FEED: &str = "bills.json";

/// Configuration for a board session
#[derive(Debug, Clone)]
pub struct Config {
    pub feed: FeedLocation,
    pub title: String,
    pub output: Option<PathBuf>,
    pub criteria: FilterCriteria,
}

impl Config {
    /// Create a new default configuration
    pub fn new(feed: FeedLocation) -> Self {
        Self {
            feed,
            title: DEFAULT_TITLE.to_string(),
            output: None,
            criteria: FilterCriteria::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Config("Page title must not be empty".to_string()));
        }

        if let FeedLocation::File(path) = &self.feed {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Feed file does not exist: {}",
                    path.display()
                )));
            }
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "Feed path is not a file: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(FeedLocation::parse(DEFAULT_FEED))
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the builder from a config file; later calls override these values
    pub fn file_config(mut self, file: &FileConfig) -> Self {
        if let Some(feed) = &file.feed {
            self.config.feed = FeedLocation::parse(feed);
        }
        if let Some(title) = &file.title {
            self.config.title = title.clone();
        }
        if let Some(output) = &file.output {
            self.config.output = Some(output.clone());
        }
        if let Some(search) = &file.search {
            self.config.criteria.search = search.clone();
        }
        if let Some(jurisdiction) = &file.jurisdiction {
            self.config.criteria.jurisdiction = jurisdiction.as_str().into();
        }
        if let Some(status) = &file.status {
            self.config.criteria.status = status.as_str().into();
        }
        if let Some(sort) = &file.sort {
            self.config.criteria.sort = sort.as_str().into();
        }
        self
    }

    pub fn feed(mut self, feed: FeedLocation) -> Self {
        self.config.feed = feed;
        self
    }

    /// Set the feed from a URL or file path
    pub fn feed_str(self, feed: &str) -> Self {
        self.feed(FeedLocation::parse(feed))
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = Some(path.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.config.criteria.search = text.into();
        self
    }

    pub fn jurisdiction_str(mut self, value: &str) -> Self {
        self.config.criteria.jurisdiction = value.into();
        self
    }

    pub fn status_str(mut self, value: &str) -> Self {
        self.config.criteria.status = value.into();
        self
    }

    pub fn sort_str(mut self, value: &str) -> Self {
        self.config.criteria.sort = value.into();
        self
    }

    pub fn criteria(mut self, criteria: FilterCriteria) -> Self {
        self.config.criteria = criteria;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_parses_control_values() {
        assert_eq!(SortKey::from("recent"), SortKey::Recent);
        assert_eq!(SortKey::from("oldest"), SortKey::Oldest);
        assert_eq!(SortKey::from("state"), SortKey::ByJurisdiction);
        assert_eq!(SortKey::from("byJurisdiction"), SortKey::ByJurisdiction);
        assert_eq!(SortKey::from("alphabetical"), SortKey::Alphabetical);
        assert_eq!(SortKey::from("sideways"), SortKey::Recent);
    }

    #[test]
    fn sort_key_values_round_trip() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from(key.as_value()), key);
        }
    }

    #[test]
    fn jurisdiction_filter_recognizes_sentinels() {
        assert_eq!(JurisdictionFilter::from("all"), JurisdictionFilter::All);
        assert_eq!(JurisdictionFilter::from(""), JurisdictionFilter::All);
        assert_eq!(JurisdictionFilter::from("US"), JurisdictionFilter::Federal);
        assert_eq!(
            JurisdictionFilter::from("Colorado"),
            JurisdictionFilter::Named("Colorado".to_string())
        );
    }

    #[test]
    fn status_filter_lowercases_substring() {
        assert_eq!(StatusFilter::from("all"), StatusFilter::All);
        assert_eq!(
            StatusFilter::from("Passed"),
            StatusFilter::Contains("passed".to_string())
        );
    }

    #[test]
    fn builder_rejects_empty_title() {
        let result = ConfigBuilder::new()
            .feed_str("https://example.org/bills.json")
            .title("  ")
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn builder_rejects_missing_feed_file() {
        let result = ConfigBuilder::new()
            .feed_str("/definitely/not/here/bills.json")
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn later_builder_calls_override_file_config() {
        let file: FileConfig = serde_yaml::from_str(
            "feed: https://example.org/bills.json\ntitle: Cannabis Tracker\nsort: oldest\nstatus: passed\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .file_config(&file)
            .sort_str("alphabetical")
            .build()
            .unwrap();

        assert_eq!(config.title, "Cannabis Tracker");
        assert_eq!(config.criteria.sort, SortKey::Alphabetical);
        assert_eq!(config.criteria.status, StatusFilter::Contains("passed".to_string()));
        assert!(matches!(config.feed, FeedLocation::Http(_)));
    }

    #[test]
    fn file_config_rejects_unknown_keys() {
        let parsed: std::result::Result<FileConfig, _> = serde_yaml::from_str("colour: red\n");
        assert!(parsed.is_err());
    }
}
