use crate::browser::{Driver, Locator};
use crate::models::{HotelCandidate, UNPRICED};
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, warn};

const FILTER_LOAD_WAIT: Duration = Duration::from_secs(5);
const FACET_WAIT: Duration = Duration::from_secs(10);
const FILTER_CONFIRM_WAIT: Duration = Duration::from_secs(8);

pub(crate) fn five_star_facet() -> Locator {
    Locator::xpath(
        "//div[@data-testid='filters-group'][contains(., 'Property rating')]\
         //div[@data-testid='filters-group-label-container'][contains(., '5 stars')]",
    )
}

pub(crate) fn five_star_applied() -> Locator {
    Locator::css("button[data-testid='filter:class=5']")
}

pub(crate) fn property_card() -> Locator {
    Locator::test_id("property-card")
}

pub(crate) fn card_title() -> Locator {
    Locator::css("div[data-testid='title']")
}

pub(crate) fn card_score() -> Locator {
    Locator::css("div[data-testid='review-score'] div")
}

pub(crate) fn card_price() -> Locator {
    Locator::css("span[data-testid='price-and-discounted-price']")
}

pub(crate) fn card_link() -> Locator {
    Locator::css("a")
}

/// Page object for the search results page: star-class filtering,
/// lazy-load scrolling and best-candidate extraction.
pub struct SearchResultsPage<'a, D: Driver> {
    driver: &'a D,
}

impl<'a, D: Driver> SearchResultsPage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    /// Narrows the result set to five-star properties. Every timeout here
    /// is fatal: extraction assumes the facet took effect, and there is no
    /// fallback if it never appears.
    pub fn apply_five_star_filter(&self) -> Result<()> {
        if !self.driver.wait_for_load(FILTER_LOAD_WAIT)? {
            anyhow::bail!("results page never reported content loaded");
        }

        let facet = five_star_facet();
        if !self.driver.wait_visible(&facet, FACET_WAIT)? {
            anyhow::bail!(
                "5-star property rating facet not visible within {}s",
                FACET_WAIT.as_secs()
            );
        }
        self.driver.click(&facet)?;

        if !self.driver.wait_for_load(FILTER_LOAD_WAIT)? {
            anyhow::bail!("results page never reloaded after applying filter");
        }
        if !self.driver.wait_visible(&five_star_applied(), FILTER_CONFIRM_WAIT)? {
            anyhow::bail!(
                "5-star filter indicator not visible within {}s",
                FILTER_CONFIRM_WAIT.as_secs()
            );
        }

        info!("✔ 5-star filter applied");
        Ok(())
    }

    /// Scrolls to the bottom so lazily loaded result cards materialize
    /// before they are counted.
    pub fn load_all_results(&self) -> Result<()> {
        self.driver.scroll_to_bottom()
    }

    /// Walks every result card and returns the highest-rated one. Ties keep
    /// the earlier card; a run where no card has a readable rating returns
    /// the all-sentinel candidate, which is a valid signaling output.
    pub fn best_rated_hotel(&self) -> Result<HotelCandidate> {
        let cards = property_card();
        let count = self.driver.count(&cards)?;
        info!("Found {count} result cards");

        let mut best = HotelCandidate::unrated();
        for index in 0..count {
            let candidate = match self.read_card(&cards, index) {
                Ok(candidate) => candidate,
                Err(err) => {
                    warn!("Skipping result card {index}: {err:#}");
                    continue;
                }
            };
            debug!(
                "Card {index}: {:?} rated {}",
                candidate.name, candidate.rating
            );
            if candidate.rating > best.rating {
                best = candidate;
            }
        }
        Ok(best)
    }

    /// Reads the four fields of one card. Each field falls back to its
    /// sentinel independently, so one unreadable field never costs the
    /// others; only a card that is gone altogether errors out of here.
    fn read_card(&self, cards: &Locator, index: usize) -> Result<HotelCandidate> {
        if !self.driver.exists_at(cards, index)? {
            anyhow::bail!("card no longer attached to the page");
        }

        let name = self
            .driver
            .text_within(cards, index, &card_title())
            .unwrap_or_default();

        let rating = match self.driver.texts_within(cards, index, &card_score()) {
            Ok(texts) => texts
                .iter()
                .find(|text| is_review_score(text))
                .and_then(|text| text.parse::<f64>().ok())
                .unwrap_or(0.0),
            Err(_) => 0.0,
        };

        let price = self
            .driver
            .text_within(cards, index, &card_price())
            .map(|text| collapse_whitespace(&text))
            .unwrap_or_else(|_| UNPRICED.to_string());

        let url = self
            .driver
            .attr_within(cards, index, &card_link(), "href")
            .ok()
            .flatten();

        Ok(HotelCandidate {
            name,
            rating,
            price,
            url,
        })
    }
}

/// Strict review-score shape: digits with at most one decimal point, e.g.
/// "8" or "8.9". Review-score blocks contain several div texts; only the
/// bare numeric one is the score.
fn is_review_score(text: &str) -> bool {
    fn digits(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
    }
    match text.split_once('.') {
        Some((whole, frac)) => digits(whole) && digits(frac),
        None => digits(text),
    }
}

/// Collapses runs of whitespace (including newlines) to single spaces and
/// trims the ends, preserving the currency symbol.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
