use crate::config::FilterCriteria;
use crate::render::{self, PageSlots};
use crate::stats::Statistics;

/// The display the board writes to. Every call replaces the slot's previous contents.
pub trait Surface {
    fn show_loading(&mut self);

    /// Replace the card container with a single error message
    fn show_error(&mut self, message: &str);

    /// Replace the card container with freshly rendered cards
    fn replace_cards(&mut self, html: String);

    fn set_jurisdiction_options(&mut self, html: String);

    fn set_statistics(&mut self, stats: &Statistics);

    fn set_last_updated(&mut self, text: &str);
}

/// Collects slot contents and assembles them into a static HTML page
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    title: String,
    content: String,
    jurisdiction_options: String,
    statistics: String,
    last_updated: String,
}

impl HtmlSurface {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            jurisdiction_options: render::render_jurisdiction_options(&[], &Default::default()),
            statistics: render::render_stats(&Statistics::default()),
            last_updated: "N/A".to_string(),
        }
    }

    /// Current contents of the card container
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn to_page(&self, criteria: &FilterCriteria) -> String {
        render::page(&PageSlots {
            title: &self.title,
            criteria,
            jurisdiction_options: &self.jurisdiction_options,
            statistics: &self.statistics,
            last_updated: &self.last_updated,
            content: &self.content,
        })
    }
}

impl Surface for HtmlSurface {
    fn show_loading(&mut self) {
        self.content = render::render_loading();
    }

    fn show_error(&mut self, message: &str) {
        self.content = render::render_error(message);
    }

    fn replace_cards(&mut self, html: String) {
        self.content = html;
    }

    fn set_jurisdiction_options(&mut self, html: String) {
        self.jurisdiction_options = html;
    }

    fn set_statistics(&mut self, stats: &Statistics) {
        self.statistics = render::render_stats(stats);
    }

    fn set_last_updated(&mut self, text: &str) {
        self.last_updated = text.to_string();
    }
}
