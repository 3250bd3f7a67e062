//! Search panel: one query state, one executor, and the observers that re-render them.

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::error::{SubmitRejected, ValidationError};
use crate::executor::{PendingSearch, Resolution, SearchExecutor, SearchOutcome};
use crate::present::{present, View};
use crate::query::QueryState;
use crate::service::SearchService;
use crate::types::{SearchMode, TimeWindow};

/// What changed, sent to observers after each mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    QueryChanged,
    OutcomeChanged,
}

type Observer = Box<dyn FnMut(PanelEvent)>;

/// A single search panel instance. Owns its state exclusively; nothing is persisted.
pub struct SearchPanel<S: ?Sized> {
    query: QueryState,
    executor: SearchExecutor<S>,
    observers: Vec<Observer>,
}

impl<S: SearchService + ?Sized> SearchPanel<S> {
    pub fn new(service: Arc<S>, config: &SearchConfig) -> Self {
        Self {
            query: QueryState::new(Arc::new(config.type_vocabulary.clone())),
            executor: SearchExecutor::new(service, config),
            observers: Vec::new(),
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn outcome(&self) -> &SearchOutcome {
        self.executor.outcome()
    }

    pub fn executor(&self) -> &SearchExecutor<S> {
        &self.executor
    }

    /// Current view. Empty and error copy name the submitted query, not whatever has
    /// been typed since.
    pub fn view(&self) -> View<'_> {
        let submitted = self.executor.last_request().map_or(self.query.text(), |r| r.query.as_str());
        present(submitted, self.executor.outcome())
    }

    /// Register a callback run after every state change.
    pub fn subscribe(&mut self, observer: impl FnMut(PanelEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, event: PanelEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }

    /// Replace the text. Emptying it returns the panel to Unstarted, dropping any
    /// results and superseding a request still in flight.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.query.set_text(text);
        self.notify(PanelEvent::QueryChanged);
        if self.query.text().is_empty() && *self.executor.outcome() != SearchOutcome::Idle {
            self.executor.reset();
            self.notify(PanelEvent::OutcomeChanged);
        }
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.query.set_window(window);
        self.notify(PanelEvent::QueryChanged);
    }

    pub fn set_window_str(&mut self, window: &str) -> Result<(), ValidationError> {
        self.query.set_window_str(window)?;
        self.notify(PanelEvent::QueryChanged);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.query.set_mode(mode);
        self.notify(PanelEvent::QueryChanged);
    }

    pub fn set_mode_str(&mut self, mode: &str) -> Result<(), ValidationError> {
        self.query.set_mode_str(mode)?;
        self.notify(PanelEvent::QueryChanged);
        Ok(())
    }

    pub fn toggle_type(&mut self, tag: &str) -> Result<bool, ValidationError> {
        let selected = self.query.toggle_type(tag)?;
        self.notify(PanelEvent::QueryChanged);
        Ok(selected)
    }

    pub fn set_temporal_boost(&mut self, enabled: bool) {
        self.query.set_temporal_boost(enabled);
        self.notify(PanelEvent::QueryChanged);
    }

    pub fn clear_filters(&mut self) {
        self.query.clear_filters();
        self.notify(PanelEvent::QueryChanged);
    }

    /// Explicit submission (Enter or the submit control). Filter edits never call this.
    pub fn submit(&mut self) -> Result<PendingSearch<S>, SubmitRejected> {
        let pending = self.executor.submit(&self.query)?;
        self.notify(PanelEvent::OutcomeChanged);
        Ok(pending)
    }

    pub fn retry(&mut self) -> Result<PendingSearch<S>, SubmitRejected> {
        let pending = self.executor.retry()?;
        self.notify(PanelEvent::OutcomeChanged);
        Ok(pending)
    }

    /// Feed a finished request back in. Stale ones are dropped without notifying.
    pub fn resolve(&mut self, resolution: Resolution) -> bool {
        let applied = self.executor.resolve(resolution);
        if applied {
            self.notify(PanelEvent::OutcomeChanged);
        }
        applied
    }

    /// Clear the text and return to the Unstarted view.
    pub fn clear(&mut self) {
        self.query.set_text(String::new());
        self.executor.reset();
        self.notify(PanelEvent::QueryChanged);
        self.notify(PanelEvent::OutcomeChanged);
    }

    /// Submit and wait for the result in one go, for hosts that don't interleave searches.
    pub async fn run(&mut self) -> Result<&SearchOutcome, SubmitRejected> {
        let pending = self.submit()?;
        let resolution = pending.run().await;
        self.resolve(resolution);
        Ok(self.outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::SearchRequest;
    use crate::error::SearchError;
    use crate::present::ViewKind;
    use crate::types::{RankedResult, SearchResponse};
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct EchoService;

    #[async_trait]
    impl SearchService for EchoService {
        async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
            Ok(SearchResponse::new(vec![
                RankedResult::new(request.query.clone(), serde_json::json!({})).with_score(0.5),
            ]))
        }
    }

    fn panel() -> SearchPanel<EchoService> {
        SearchPanel::new(Arc::new(EchoService), &SearchConfig::default())
    }

    #[test]
    fn observers_see_each_mutation() {
        let mut p = panel();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        p.subscribe(move |e| sink.borrow_mut().push(e));

        p.set_text("roadmap");
        p.toggle_type("idea").unwrap();
        p.clear_filters();

        assert_eq!(events.borrow().len(), 3);
        assert!(events.borrow().iter().all(|e| *e == PanelEvent::QueryChanged));
    }

    #[test]
    fn rejected_mutation_does_not_notify() {
        let mut p = panel();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        p.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(p.toggle_type("nonsense").is_err());
        assert!(p.set_mode_str("vector").is_err());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn filter_changes_never_leave_idle() {
        let mut p = panel();
        p.toggle_type("insight").unwrap();
        p.set_mode(SearchMode::Keyword);
        p.set_temporal_boost(false);
        assert_eq!(p.outcome(), &SearchOutcome::Idle);
        assert_eq!(p.view().kind(), ViewKind::Unstarted);
    }

    #[tokio::test]
    async fn run_goes_through_loading_to_populated() {
        let mut p = panel();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        p.subscribe(move |e| sink.borrow_mut().push(e));

        p.set_text("roadmap");
        p.run().await.unwrap();

        assert_eq!(p.view().kind(), ViewKind::Populated);
        assert_eq!(
            *events.borrow(),
            vec![PanelEvent::QueryChanged, PanelEvent::OutcomeChanged, PanelEvent::OutcomeChanged]
        );
    }

    struct NothingService;

    #[async_trait]
    impl SearchService for NothingService {
        async fn search(&self, _request: &SearchRequest) -> Result<SearchResponse, SearchError> {
            Ok(SearchResponse::new(vec![]).with_elapsed_ms(7.5))
        }
    }

    #[tokio::test]
    async fn empty_view_names_the_submitted_query() {
        let mut p = SearchPanel::new(Arc::new(NothingService), &SearchConfig::default());
        p.set_text("roadmap");
        p.run().await.unwrap();
        p.set_text("roadmap for Q4");

        assert_eq!(p.view(), View::Empty { query: "roadmap", elapsed_ms: 7.5 });
        assert!(p.view().hint().unwrap().contains("\u{201c}roadmap\u{201d}"));
    }

    #[tokio::test]
    async fn deleting_all_text_returns_to_unstarted() {
        let mut p = panel();
        let events = Rc::new(RefCell::new(Vec::new()));
        p.set_text("roadmap");
        p.run().await.unwrap();
        let sink = Rc::clone(&events);
        p.subscribe(move |e| sink.borrow_mut().push(e));

        p.set_text("road");
        assert_eq!(p.view().kind(), ViewKind::Populated);

        p.set_text("");
        assert_eq!(p.outcome(), &SearchOutcome::Idle);
        assert_eq!(p.view().kind(), ViewKind::Unstarted);
        assert_eq!(
            *events.borrow(),
            vec![PanelEvent::QueryChanged, PanelEvent::QueryChanged, PanelEvent::OutcomeChanged]
        );
    }

    #[test]
    fn window_changes_notify_and_reject_unknown_names() {
        let mut p = panel();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        p.subscribe(move |_| *sink.borrow_mut() += 1);

        p.set_window(TimeWindow::Week);
        assert!(p.set_window_str("decade").is_err());
        assert_eq!(p.query().window(), TimeWindow::Week);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(p.outcome(), &SearchOutcome::Idle);
    }

    #[tokio::test]
    async fn clear_returns_to_unstarted() {
        let mut p = panel();
        p.set_text("roadmap");
        p.run().await.unwrap();
        p.clear();
        assert_eq!(p.query().text(), "");
        assert_eq!(p.view().kind(), ViewKind::Unstarted);
    }
}
