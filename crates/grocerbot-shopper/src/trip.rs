//! Shopping-trip orchestration.
//!
//! A trip reads the list, opens a session, logs in, empties the cart, adds
//! every item in list order, records the results and mails a summary. Any
//! failure aborts the remaining steps; items already in the cart stay there.
//! The browser session is closed on every path.

use std::fmt;

use chrono::{DateTime, Datelike, Local, TimeZone};
use grocerbot_protocols::{
    EmailMessage, GroceryListSource, Notifier, PageDriver, ShoppingResult,
};
use tracing::{debug, error, info, warn};

use crate::command::Shopper;
use crate::error::ShopperError;

/// Where a trip currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripState {
    NotStarted,
    SessionOpen,
    LoggedIn,
    CartEmptied,
    Searching,
    Adding,
    Reporting,
    Closed,
}

impl fmt::Display for TripState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TripState::NotStarted => "not started",
            TripState::SessionOpen => "session open",
            TripState::LoggedIn => "logged in",
            TripState::CartEmptied => "cart emptied",
            TripState::Searching => "searching",
            TripState::Adding => "adding",
            TripState::Reporting => "reporting",
            TripState::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Account and mail settings for a trip.
#[derive(Debug, Clone, Default)]
pub struct TripSettings {
    pub email: String,
    pub password: String,
    /// Display name on the summary mail.
    pub sender_display: String,
    /// Summary recipient.
    pub recipient: String,
}

/// Outcome of a completed trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripReport {
    pub title: String,
    pub cart_url: String,
    pub sheet_url: String,
    pub results: Vec<ShoppingResult>,
}

impl TripReport {
    pub fn found(&self) -> usize {
        self.results.iter().filter(|r| r.is_found()).count()
    }

    /// HTML summary body.
    pub fn html_body(&self) -> String {
        format!(
            "<span><b>Shopping Cart:</b> {}</span><br />\n\
             <span><b>Shopping Results:</b> {}</span>",
            self.cart_url, self.sheet_url
        )
    }
}

/// Runs one shopping trip.
pub struct ShoppingTrip<D: PageDriver> {
    shopper: Shopper<D>,
    source: Box<dyn GroceryListSource>,
    notifier: Option<Box<dyn Notifier>>,
    settings: TripSettings,
    state: TripState,
}

impl<D: PageDriver> ShoppingTrip<D> {
    pub fn new(
        shopper: Shopper<D>,
        source: Box<dyn GroceryListSource>,
        notifier: Option<Box<dyn Notifier>>,
        settings: TripSettings,
    ) -> Self {
        Self {
            shopper,
            source,
            notifier,
            settings,
            state: TripState::NotStarted,
        }
    }

    pub fn state(&self) -> TripState {
        self.state
    }

    pub fn shopper(&self) -> &Shopper<D> {
        &self.shopper
    }

    fn advance(&mut self, next: TripState) {
        debug!("Trip: {} -> {}", self.state, next);
        self.state = next;
    }

    /// Run the trip to completion, closing the session whatever happens.
    pub async fn run(&mut self) -> Result<TripReport, ShopperError> {
        info!("Beginning shopping trip");
        let outcome = self.shop().await;

        if let Err(e) = self.shopper.shutdown().await {
            warn!("Failed to close browser session: {}", e);
        }
        let failed_in = self.state;
        self.advance(TripState::Closed);

        match &outcome {
            Ok(report) => info!(
                "Shopping trip completed: {} of {} items added",
                report.found(),
                report.results.len()
            ),
            Err(e) => error!("Shopping trip failed while {}: {}", failed_in, e),
        }
        outcome
    }

    async fn shop(&mut self) -> Result<TripReport, ShopperError> {
        self.source.init().await?;
        let list = self.source.get_list().await?;
        info!("Shopping list has {} items", list.len());

        self.shopper.init().await?;
        self.advance(TripState::SessionOpen);

        self.shopper
            .login(&self.settings.email, &self.settings.password)
            .await?;
        self.advance(TripState::LoggedIn);

        self.shopper.cart().empty_cart().await?;
        self.advance(TripState::CartEmptied);

        let mut results = Vec::with_capacity(list.len());
        for request in &list {
            info!("Attempting to add {} of {} to cart", request.quantity, request.name);
            self.advance(TripState::Searching);
            let cart = self.shopper.cart();
            let Some(candidate) = cart.resolver().search_and_select(&request.name).await? else {
                results.push(ShoppingResult::new(&request.name, None));
                continue;
            };
            self.advance(TripState::Adding);
            let item = self.shopper.cart().add_candidate(candidate, request.quantity).await?;
            results.push(ShoppingResult::new(&request.name, Some(item)));
        }
        debug!("Shopping results: {:?}", results);

        self.advance(TripState::Reporting);
        let now = Local::now();
        let title = trip_title(&now);
        let sheet_url = self
            .source
            .record_results(&title, now.timestamp(), &results)
            .await?;
        let cart_url = self.shopper.cart().show_cart().await?;

        let report = TripReport {
            title,
            cart_url,
            sheet_url,
            results,
        };
        debug!("URL to cart: {}", report.cart_url);
        debug!("URL to sheet: {}", report.sheet_url);

        self.notify(&report).await;
        Ok(report)
    }

    /// Mail the summary. Failures are logged, never returned.
    async fn notify(&self, report: &TripReport) {
        let Some(notifier) = &self.notifier else {
            debug!("Email disabled, skipping summary");
            return;
        };
        let message = EmailMessage {
            sender_display: self.settings.sender_display.clone(),
            recipient: self.settings.recipient.clone(),
            subject: report.title.clone(),
            html_body: report.html_body(),
        };
        match notifier.send(&message).await {
            Ok(()) => info!("Sent trip summary to {}", message.recipient),
            Err(e) => warn!("Failed to send trip summary: {}", e),
        }
    }
}

/// `Shopping Trip on October 16th 2026 @ 9:05 am`
pub fn trip_title<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!(
        "Shopping Trip on {} {}{} {}",
        at.format("%B"),
        at.day(),
        ordinal_suffix(at.day()),
        at.format("%Y @ %-I:%M %P")
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
#[path = "trip_tests.rs"]
mod tests;
