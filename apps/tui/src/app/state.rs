use airpower_leaderboard::config::AppConfig;
use airpower_leaderboard::domain::{Subsystem, LEADERBOARD};
use airpower_leaderboard::render::RosterCard;
use airpower_leaderboard::{
    CardRenderer, FleetCache, LoadState, Switch, SwitchTicket, TabController,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::sync::Arc;
use std::time::Instant;
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Overview,
    Fleet,
}

/// Messages from background tasks to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The default entity's roster is loaded or failed.
    DefaultResolved,
    /// A pending tab switch may now render.
    TabReady(SwitchTicket),
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub status_message: String,
    pub config: AppConfig,
    pub source_description: String,
    pub cache: Arc<FleetCache>,
    pub tabs: TabController<CardRenderer>,
    pub default_ready: bool,
    pub selected_row: usize,
    pub subsystem_index: usize,
    pub card_scroll: usize,
    pub filter: String,
    pub filter_editing: bool,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub throbber_state: ThrobberState,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(
        config: AppConfig,
        source_description: String,
        cache: Arc<FleetCache>,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            running: true,
            screen: AppScreen::Fleet,
            show_help: false,
            status_message: String::new(),
            config,
            source_description,
            tabs: TabController::new(Arc::clone(&cache), CardRenderer),
            cache,
            default_ready: false,
            selected_row: 0,
            subsystem_index: 0,
            card_scroll: 0,
            filter: String::new(),
            filter_editing: false,
            animation_counter: 0.0,
            last_frame: Instant::now(),
            throbber_state: ThrobberState::default(),
            events,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }
        if self.is_loading() {
            self.throbber_state.calc_next();
        }
    }

    /// True while the default roster or the active tab is still loading.
    pub fn is_loading(&self) -> bool {
        !self.default_ready || self.tabs.view().is_awaiting()
    }

    pub fn subsystem(&self) -> Subsystem {
        Subsystem::from_index(self.subsystem_index).unwrap_or(Subsystem::SensorReach)
    }

    /// Switch the fleet screen to `code`, spawning a readiness task when the
    /// roster is not there yet.
    pub fn open_tab(&mut self, code: &str) {
        self.card_scroll = 0;
        match self.tabs.switch_to(code) {
            Ok(switch) => self.follow_switch(switch),
            Err(error) => self.status_message = format!("Error: {error}"),
        }
    }

    pub fn next_tab(&mut self) {
        self.card_scroll = 0;
        match self.tabs.next() {
            Ok(switch) => self.follow_switch(switch),
            Err(error) => self.status_message = format!("Error: {error}"),
        }
    }

    pub fn previous_tab(&mut self) {
        self.card_scroll = 0;
        match self.tabs.previous() {
            Ok(switch) => self.follow_switch(switch),
            Err(error) => self.status_message = format!("Error: {error}"),
        }
    }

    fn follow_switch(&mut self, switch: Switch) {
        match switch {
            Switch::Rendered => self.status_message.clear(),
            Switch::Pending(ticket) => {
                self.status_message = format!("Loading {} roster...", ticket.code.to_uppercase());
                let ready = self.tabs.readiness(ticket);
                let events = self.events.clone();
                tokio::spawn(async move {
                    let ticket = ready.await;
                    let _ = events.send(AppEvent::TabReady(ticket));
                });
            }
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DefaultResolved => {
                self.default_ready = true;
                if let LoadState::Failed(reason) = self.cache.state(self.config.default_entity) {
                    self.status_message = format!("Default roster unavailable: {reason}");
                }
            }
            AppEvent::TabReady(ticket) => {
                if self.tabs.complete(&ticket) {
                    self.status_message.clear();
                }
            }
        }
    }

    /// Cards of the active tab that match the current filter, best match first.
    pub fn visible_cards(&self) -> Vec<&RosterCard> {
        let airpower_leaderboard::TabView::Rendered { content, .. } = self.tabs.view() else {
            return Vec::new();
        };

        let query = self.filter.trim();
        if query.is_empty() {
            return content.cards.iter().collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &RosterCard)> = content
            .cards
            .iter()
            .filter_map(|card| {
                matcher
                    .fuzzy_match(&card.aircraft, query)
                    .map(|score| (score, card))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, card)| card).collect()
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.filter_editing = false;
        self.card_scroll = 0;
    }

    pub fn selected_entity_code(&self) -> &'static str {
        LEADERBOARD[self.selected_row.min(LEADERBOARD.len() - 1)].code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airpower_leaderboard::roster::RosterEntry;
    use airpower_leaderboard::TabView;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn config() -> AppConfig {
        AppConfig::from_lookup(|_| None).unwrap_or_else(|error| panic!("default config: {error}"))
    }

    fn entry(name: &str) -> RosterEntry {
        RosterEntry {
            aircraft: Some(name.to_string()),
            ..RosterEntry::default()
        }
    }

    #[tokio::test]
    async fn pending_tab_renders_after_ready_event() {
        let cache = Arc::new(FleetCache::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(config(), "test".to_string(), cache.clone(), tx);

        cache.begin("us");
        app.open_tab("us");
        assert!(app.is_loading());

        cache.resolve("us", Ok(vec![entry("F-35A")]));
        let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .ok()
            .flatten();
        let Some(event) = event else {
            panic!("no readiness event");
        };
        app.handle_event(event);

        assert!(matches!(app.tabs.view(), TabView::Rendered { code: "us", .. }));
        assert_eq!(app.visible_cards().len(), 1);
    }

    #[tokio::test]
    async fn filter_keeps_fuzzy_matches_only() {
        let cache = Arc::new(FleetCache::new());
        cache.begin("us");
        cache.resolve(
            "us",
            Ok(vec![entry("F-35A Lightning II"), entry("KC-46A Pegasus"), entry("F-22A Raptor")]),
        );
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(config(), "test".to_string(), cache, tx);
        app.open_tab("us");

        app.filter = "raptor".to_string();
        let names: Vec<&str> = app
            .visible_cards()
            .iter()
            .map(|card| card.aircraft.as_str())
            .collect();
        assert_eq!(names, vec!["F-22A Raptor"]);

        app.clear_filter();
        assert_eq!(app.visible_cards().len(), 3);
    }

    #[tokio::test]
    async fn default_resolution_dismisses_loading() {
        let cache = Arc::new(FleetCache::new());
        cache.begin("us");
        cache.resolve("us", Ok(Vec::new()));
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(config(), "test".to_string(), cache, tx);
        app.open_tab("us");
        assert!(app.is_loading());

        app.handle_event(AppEvent::DefaultResolved);
        assert!(!app.is_loading());
    }
}
