//! The board controller: owns the loaded collection, the current control values
//! and the surface, and redraws on every control change.

use crate::config::{FilterCriteria, JurisdictionFilter, SortKey, StatusFilter};
use crate::dates::format_last_updated;
use crate::error::LoadError;
use crate::feed::{load_collection, FeedSource};
use crate::filter::{apply, jurisdiction_options};
use crate::render::{render_cards, render_jurisdiction_options};
use crate::stats::Statistics;
use crate::surface::{HtmlSurface, Surface};
use crate::types::{BillCollection, BillRecord};
use std::sync::Arc;

/// A change on one of the four user controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    Search(String),
    Jurisdiction(String),
    Status(String),
    Sort(String),
}

/// Where the board is in its one-shot load
#[derive(Debug, Clone)]
pub enum LoadState {
    Pending,
    Ready(Arc<BillCollection>),
    Failed(LoadError),
}

pub struct BillBoard<S: Surface> {
    surface: S,
    state: LoadState,
    criteria: FilterCriteria,
    visible: usize,
}

impl<S: Surface> BillBoard<S> {
    pub fn new(surface: S) -> Self {
        Self::with_criteria(surface, FilterCriteria::default())
    }

    /// Start with pre-set control values
    pub fn with_criteria(surface: S, criteria: FilterCriteria) -> Self {
        Self {
            surface,
            state: LoadState::Pending,
            criteria,
            visible: 0,
        }
    }

    /// Fetch the feed and draw the board. Runs once; later calls return the first outcome.
    ///
    /// On failure the surface shows a single error message and no cards, and the
    /// error is returned for the caller to log.
    pub async fn load<F: FeedSource>(&mut self, source: &F) -> Result<(), LoadError> {
        match &self.state {
            LoadState::Ready(_) => {
                log::warn!("Bill feed already loaded; ignoring reload");
                return Ok(());
            }
            LoadState::Failed(e) => {
                log::warn!("Bill feed already failed to load; ignoring reload");
                return Err(e.clone());
            }
            LoadState::Pending => {}
        }

        self.surface.show_loading();

        match load_collection(source).await {
            Ok(collection) => {
                self.install(collection);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load bill feed: {}", e);
                self.visible = 0;
                self.surface.show_error(&e.user_message());
                self.state = LoadState::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Take an already-fetched collection and draw the board.
    /// Like [`BillBoard::load`], this only takes effect once.
    pub fn install(&mut self, collection: BillCollection) {
        if !matches!(self.state, LoadState::Pending) {
            log::warn!("Bill board already settled; ignoring installed collection");
            return;
        }

        let collection = Arc::new(collection);

        let names = jurisdiction_options(&collection);
        self.surface.set_jurisdiction_options(render_jurisdiction_options(
            &names,
            &self.criteria.jurisdiction,
        ));
        self.surface
            .set_statistics(&Statistics::compute(&collection));
        let last_updated = collection
            .last_updated()
            .map(|dt| format_last_updated(&dt))
            .unwrap_or_else(|| "N/A".to_string());
        self.surface.set_last_updated(&last_updated);

        self.state = LoadState::Ready(collection);
        self.refresh();
    }

    /// Apply a control change and redraw
    pub fn handle(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Search(text) => self.criteria.search = text,
            ControlEvent::Jurisdiction(value) => {
                self.criteria.jurisdiction = JurisdictionFilter::from(value.as_str())
            }
            ControlEvent::Status(value) => {
                self.criteria.status = StatusFilter::from(value.as_str())
            }
            ControlEvent::Sort(value) => self.criteria.sort = SortKey::from(value.as_str()),
        }
        self.refresh();
    }

    pub fn on_search_input(&mut self, text: &str) {
        self.handle(ControlEvent::Search(text.to_string()));
    }

    pub fn on_jurisdiction_change(&mut self, value: &str) {
        self.handle(ControlEvent::Jurisdiction(value.to_string()));
    }

    pub fn on_status_change(&mut self, value: &str) {
        self.handle(ControlEvent::Status(value.to_string()));
    }

    pub fn on_sort_change(&mut self, value: &str) {
        self.handle(ControlEvent::Sort(value.to_string()));
    }

    /// Recompute the view and replace the rendered cards. No-op until loaded.
    fn refresh(&mut self) {
        let LoadState::Ready(collection) = &self.state else {
            return;
        };

        let view = apply(collection, &self.criteria);
        log::debug!(
            "Filter pass kept {} of {} bills",
            view.len(),
            collection.len()
        );
        let html = render_cards(&view);
        self.visible = view.len();
        self.surface.replace_cards(html);
    }

    /// Current filtered view; empty until loaded
    pub fn view(&self) -> Vec<&BillRecord> {
        match &self.state {
            LoadState::Ready(collection) => apply(collection, &self.criteria),
            _ => Vec::new(),
        }
    }

    /// Number of cards on the surface after the last redraw
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn collection(&self) -> Option<&Arc<BillCollection>> {
        match &self.state {
            LoadState::Ready(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl BillBoard<HtmlSurface> {
    /// The complete page as currently drawn
    pub fn render_page(&self) -> String {
        self.surface.to_page(&self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::StaticSource;
    use serde_json::json;

    fn feed() -> StaticSource {
        StaticSource::json(&json!({
            "last_updated": "2025-01-05T14:30:00",
            "bills": [
                {"state_code": "CO", "state_name": "Colorado", "bill_number": "HB 2", "status": "Passed Chamber", "last_action_date": "2024-03-01"},
                {"state_code": "US", "state_name": "Federal", "bill_number": "HR 1", "status": "Introduced", "last_action_date": "2024-05-01"},
                {"state_code": "CO", "state_name": "Colorado", "bill_number": "HB 1", "status": "Enacted", "last_action_date": "2024-04-01"}
            ]
        }))
    }

    #[tokio::test]
    async fn load_draws_every_bill() {
        let mut board = BillBoard::new(HtmlSurface::new("Tracker"));
        board.load(&feed()).await.unwrap();

        assert_eq!(board.visible_count(), 3);
        assert_eq!(board.surface().content().matches("<article").count(), 3);
        let page = board.render_page();
        assert!(page.contains("January 05, 2025 at 02:30 PM"));
        assert!(page.contains(r#"<option value="Colorado">Colorado</option>"#));
    }

    #[tokio::test]
    async fn events_recompute_view() {
        let mut board = BillBoard::new(HtmlSurface::new("Tracker"));
        board.load(&feed()).await.unwrap();

        board.on_jurisdiction_change("Colorado");
        board.on_sort_change("alphabetical");
        let numbers: Vec<&str> = board.view().iter().map(|b| b.bill_number.as_str()).collect();
        assert_eq!(numbers, vec!["HB 1", "HB 2"]);
        assert_eq!(board.visible_count(), 2);

        board.on_status_change("passed");
        assert_eq!(board.visible_count(), 1);

        board.on_search_input("nothing matches this");
        assert_eq!(board.visible_count(), 0);
        assert!(board.surface().content().contains("no-results"));
    }

    #[tokio::test]
    async fn events_before_load_only_update_criteria() {
        let mut board = BillBoard::new(HtmlSurface::new("Tracker"));
        board.on_status_change("enacted");
        assert_eq!(board.surface().content(), "");

        board.load(&feed()).await.unwrap();
        assert_eq!(board.visible_count(), 1);
    }

    #[tokio::test]
    async fn second_load_is_ignored() {
        let mut board = BillBoard::new(HtmlSurface::new("Tracker"));
        board.load(&feed()).await.unwrap();
        board
            .load(&StaticSource::failing(LoadError::Malformed("late".to_string())))
            .await
            .unwrap();
        assert_eq!(board.visible_count(), 3);
    }

    fn one_bill() -> BillCollection {
        BillCollection::new(vec![BillRecord::new("TX", "Texas", "HB 9")], None)
    }

    #[tokio::test]
    async fn install_after_load_is_ignored() {
        let mut board = BillBoard::new(HtmlSurface::new("Tracker"));
        board.load(&feed()).await.unwrap();

        board.install(one_bill());
        assert_eq!(board.visible_count(), 3);
        assert!(!board.surface().content().contains("HB 9"));
    }

    #[tokio::test]
    async fn install_after_failed_load_keeps_the_error() {
        let mut board = BillBoard::new(HtmlSurface::new("Tracker"));
        let _ = board
            .load(&StaticSource::failing(LoadError::Malformed("bad".to_string())))
            .await;

        board.install(one_bill());
        assert!(matches!(board.state(), LoadState::Failed(_)));
        assert_eq!(board.visible_count(), 0);
        assert!(board.surface().content().contains("error-message"));
    }

    #[test]
    fn install_on_fresh_board_draws_cards() {
        let mut board = BillBoard::new(HtmlSurface::new("Tracker"));
        board.install(one_bill());
        assert_eq!(board.visible_count(), 1);
        assert!(board.surface().content().contains("HB 9"));
    }
}
