// Front-end application state as an immutable snapshot. Every change goes
// through `Snapshot::apply`, which returns a new snapshot.

use serde::Serialize;

use crate::draw::Draw;
use crate::services::{Recommendation, FALLBACK_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Lotto,
    Stock,
    Deals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Loading {
    pub draw: bool,
    pub stock: bool,
    pub deals: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Snapshot {
    pub active_tab: Tab,
    pub draw: Option<Draw>,
    pub stock_query: String,
    pub stock_response: String,
    pub deals: Vec<Recommendation>,
    pub loading: Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    SelectTab(Tab),
    DrawStarted,
    DrawFinished(Draw),
    StockQueryChanged(String),
    StockStarted,
    StockAnswered(String),
    StockFailed,
    DealsStarted,
    DealsFetched(Vec<Recommendation>),
    DealsFailed,
}

impl Snapshot {
    pub fn apply(&self, transition: Transition) -> Snapshot {
        let mut next = self.clone();
        match transition {
            Transition::SelectTab(tab) => next.active_tab = tab,
            Transition::DrawStarted => {
                next.draw = None;
                next.loading.draw = true;
            }
            Transition::DrawFinished(draw) => {
                next.draw = Some(draw);
                next.loading.draw = false;
            }
            Transition::StockQueryChanged(query) => next.stock_query = query,
            Transition::StockStarted => {
                // Blank questions are never submitted.
                if self.stock_query.trim().is_empty() {
                    return next;
                }
                next.stock_response.clear();
                next.loading.stock = true;
            }
            Transition::StockAnswered(text) => {
                next.stock_response = text;
                next.loading.stock = false;
            }
            Transition::StockFailed => {
                next.stock_response = FALLBACK_MESSAGE.to_string();
                next.loading.stock = false;
            }
            Transition::DealsStarted => {
                next.deals.clear();
                next.loading.deals = true;
            }
            Transition::DealsFetched(deals) => {
                next.deals = deals;
                next.loading.deals = false;
            }
            Transition::DealsFailed => next.loading.deals = false,
        }
        next
    }

    /// Whether the active tab shows the recommendation panel.
    pub fn recommendations_visible(&self) -> bool {
        match self.active_tab {
            Tab::Lotto => self.draw.is_some() || self.loading.deals,
            Tab::Stock => !self.stock_response.is_empty() || self.loading.deals,
            Tab::Deals => true,
        }
    }
}
