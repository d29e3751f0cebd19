use crate::browser::{ChromeDriver, Driver};
use crate::dates;
use crate::models::{HotelCandidate, SearchCriteria};
use crate::pages::home::CHILD_AGE;
use crate::pages::{HomePage, SearchResultsPage};
use anyhow::Result;
use std::time::Duration;
use tracing::info;

const BOOKING_URL: &str = "https://www.booking.com/";

// The results page exposes no reliable readiness signal after search
// submission; a flat settle is the pragmatic synchronization here.
const RESULTS_SETTLE: Duration = Duration::from_secs(8);

/// Drives the whole scrape: one sequential pass from city entry to the
/// extracted best candidate. Generic over [`Driver`] so the sequencing is
/// testable without a browser.
///
/// The driver (and with it the browser) is owned by this struct, so it is
/// released on every exit path, including fatal-error unwinding.
pub struct BookingScraper<D: Driver> {
    driver: D,
}

impl BookingScraper<ChromeDriver> {
    /// Launches a fresh headless Chrome session.
    pub fn launch() -> Result<Self> {
        Ok(Self {
            driver: ChromeDriver::launch()?,
        })
    }
}

impl<D: Driver> BookingScraper<D> {
    pub fn with_driver(driver: D) -> Self {
        Self { driver }
    }

    /// Runs the full interaction sequence and returns the best-rated
    /// five-star hotel for the given criteria.
    pub fn run(&self, criteria: &SearchCriteria) -> Result<HotelCandidate> {
        let check_in = dates::future_date(criteria.check_in_offset);
        let check_out = dates::future_date(criteria.check_out_offset);
        info!(
            "🔎 Searching {} hotels, {} to {}",
            criteria.city, check_in, check_out
        );

        self.driver.navigate(BOOKING_URL)?;
        self.driver.clear_site_storage()?;

        let home = HomePage::new(&self.driver);
        home.dismiss_sign_in_popup();
        home.enter_city(&criteria.city)?;
        home.open_date_picker()?;
        home.select_date(&check_in)?;
        home.select_date(&check_out)?;
        home.open_guests_popup()?;
        home.increment_children()?;
        home.set_child_age(CHILD_AGE)?;
        home.confirm_guests()?;
        home.click_search()?;

        self.driver.settle(RESULTS_SETTLE);

        let results = SearchResultsPage::new(&self.driver);
        results.apply_five_star_filter()?;
        results.load_all_results()?;
        results.best_rated_hotel()
    }
}
