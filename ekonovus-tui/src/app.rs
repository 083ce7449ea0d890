use std::sync::Arc;

use chrono::NaiveDate;
use ekonovus_core::{
    model::{Address, CollectionEvent, WasteObjectFilter},
    service::ScheduleService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Schedule,
    Summary,
}

pub(crate) struct App {
    pub service: Arc<ScheduleService>,

    pub address: Address,
    pub filter: WasteObjectFilter,

    pub screen: Screen,
    pub events: Vec<CollectionEvent>,
    pub list_index: usize,
    pub sort_by_date: bool,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// Pickups of one waste type, for the summary screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TypeSummary {
    pub waste_type: String,
    pub icon: Option<String>,
    pub next_pickup: Option<NaiveDate>,
    pub pickups: usize,
}

impl App {
    pub(crate) fn new(
        service: Arc<ScheduleService>,
        address: Address,
        filter: WasteObjectFilter,
    ) -> Self {
        Self {
            service,
            address,
            filter,
            screen: Screen::Schedule,
            events: Vec::new(),
            list_index: 0,
            sort_by_date: false,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn set_events(&mut self, events: Vec<CollectionEvent>) {
        self.events = events;
        self.list_index = 0;
    }

    /// Events in display order: backend order unless sorting by date.
    pub(crate) fn visible_events(&self) -> Vec<CollectionEvent> {
        let mut events = self.events.clone();
        if self.sort_by_date {
            events.sort_by_key(|event| event.date);
        }
        events
    }

    pub(crate) fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Schedule => Screen::Summary,
            Screen::Summary => Screen::Schedule,
        };
        self.list_index = 0;
    }

    pub(crate) fn toggle_sort(&mut self) {
        self.sort_by_date = !self.sort_by_date;
        self.list_index = 0;
    }

    pub(crate) fn row_count(&self, today: NaiveDate) -> usize {
        match self.screen {
            Screen::Schedule => self.events.len(),
            Screen::Summary => summarize(&self.events, today).len(),
        }
    }

    pub(crate) fn select_previous(&mut self) {
        self.list_index = self.list_index.saturating_sub(1);
    }

    pub(crate) fn select_next(&mut self, row_count: usize) {
        if self.list_index + 1 < row_count {
            self.list_index += 1;
        }
    }
}

/// Group events by waste type in order of first appearance.
pub(crate) fn summarize(events: &[CollectionEvent], today: NaiveDate) -> Vec<TypeSummary> {
    let mut summaries: Vec<TypeSummary> = Vec::new();

    for event in events {
        let upcoming = (event.date >= today).then_some(event.date);

        if let Some(summary) = summaries
            .iter_mut()
            .find(|summary| summary.waste_type == event.waste_type)
        {
            summary.pickups += 1;
            summary.next_pickup = match (summary.next_pickup, upcoming) {
                (Some(current), Some(candidate)) => Some(current.min(candidate)),
                (current, candidate) => current.or(candidate),
            };
        } else {
            summaries.push(TypeSummary {
                waste_type: event.waste_type.clone(),
                icon: event.icon.clone(),
                next_pickup: upcoming,
                pickups: 1,
            });
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use ekonovus_provider_powerbi::PowerBiConfig;
    use reqwest::Client;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn app() -> App {
        let service = Arc::new(ekonovus_provider_powerbi::service(
            Client::new(),
            PowerBiConfig::default(),
        ));
        App::new(
            service,
            Address::new("Vilniaus r. sav.", "Vilniaus m.", "Fabijoniškių g.", "24-1"),
            WasteObjectFilter::default(),
        )
    }

    fn events() -> Vec<CollectionEvent> {
        vec![
            CollectionEvent::new(date(2024, 3, 15), "Komunalinės"),
            CollectionEvent::new(date(2024, 3, 1), "Komunalinės"),
            CollectionEvent::new(date(2024, 3, 8), "Pakuotė"),
            CollectionEvent::new(date(2024, 2, 20), "Stiklas"),
        ]
    }

    #[test]
    fn summary_picks_next_upcoming_pickup() {
        let summaries = summarize(&events(), date(2024, 3, 2));

        assert_eq!(
            summaries,
            vec![
                TypeSummary {
                    waste_type: "Komunalinės".to_owned(),
                    icon: Some("mdi:trash-can".to_owned()),
                    next_pickup: Some(date(2024, 3, 15)),
                    pickups: 2,
                },
                TypeSummary {
                    waste_type: "Pakuotė".to_owned(),
                    icon: Some("mdi:recycle".to_owned()),
                    next_pickup: Some(date(2024, 3, 8)),
                    pickups: 1,
                },
                TypeSummary {
                    waste_type: "Stiklas".to_owned(),
                    icon: Some("mdi:glass-fragile".to_owned()),
                    next_pickup: None,
                    pickups: 1,
                },
            ],
            "one row per type"
        );
    }

    #[test]
    fn sorting_is_a_view_only_toggle() {
        let mut app = app();
        app.set_events(events());

        assert_eq!(
            app.visible_events().first().map(|event| event.date),
            Some(date(2024, 3, 15)),
            "backend order by default"
        );

        app.toggle_sort();

        assert_eq!(
            app.visible_events().first().map(|event| event.date),
            Some(date(2024, 2, 20)),
            "earliest first when sorted"
        );
        assert_eq!(
            app.events.first().map(|event| event.date),
            Some(date(2024, 3, 15)),
            "stored order untouched"
        );
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = app();
        app.set_events(events());
        let rows = app.row_count(date(2024, 3, 2));

        app.select_previous();
        assert_eq!(app.list_index, 0, "cannot move above first row");

        for _ in 0..10 {
            app.select_next(rows);
        }
        assert_eq!(app.list_index, 3, "stops at last row");

        app.toggle_screen();
        assert_eq!(app.screen, Screen::Summary, "summary screen");
        assert_eq!(app.list_index, 0, "selection reset");
        assert_eq!(app.row_count(date(2024, 3, 2)), 3, "three waste types");
    }
}
