use super::DateNotFound;
use crate::browser::{Driver, Locator};
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

const POPUP_WAIT: Duration = Duration::from_secs(8);
const MONTH_ADVANCE_LIMIT: usize = 12;
const CALENDAR_RENDER_DELAY: Duration = Duration::from_millis(300);
const GUEST_POPUP_WAIT: Duration = Duration::from_secs(2);
const KIDS_AGE_WAIT: Duration = Duration::from_secs(10);
const GUEST_CONFIRM_LOAD_WAIT: Duration = Duration::from_secs(2);
const SEARCH_BUTTON_WAIT: Duration = Duration::from_secs(5);

/// Age assigned to the single child traveller.
pub const CHILD_AGE: &str = "1";

pub(crate) fn sign_in_dismiss() -> Locator {
    Locator::css("button[aria-label='Dismiss sign-in info.'] span span")
}

pub(crate) fn city_input() -> Locator {
    Locator::xpath(
        "//input[@aria-label='Where are you going?' or @placeholder='Where are you going?']",
    )
}

pub(crate) fn check_in_field() -> Locator {
    Locator::test_id("date-display-field-start")
}

pub(crate) fn date_cell(date: &str) -> Locator {
    Locator::css(format!("span[data-date='{date}']"))
}

pub(crate) fn next_month() -> Locator {
    Locator::css("button[aria-label='Next month']")
}

pub(crate) fn guests_button() -> Locator {
    Locator::test_id("searchbox-form-button-icon")
}

pub(crate) fn occupancy_popup() -> Locator {
    Locator::test_id("occupancy-popup")
}

// The counter wrapper is the previous sibling of the hidden input; the
// second button inside it is the plus.
pub(crate) fn children_plus() -> Locator {
    Locator::xpath("//input[@id='group_children']/preceding-sibling::div[1]//button[2]")
}

pub(crate) fn kids_ages_select() -> Locator {
    Locator::test_id("kids-ages-select")
}

pub(crate) fn child_age_select() -> Locator {
    Locator::css("select[name='age']")
}

pub(crate) fn guests_done() -> Locator {
    Locator::xpath("//div[@data-testid='occupancy-popup']//button[normalize-space(.)='Done']")
}

pub(crate) fn search_button() -> Locator {
    Locator::xpath("//button[normalize-space(.)='Search']")
}

/// Page object for the Booking.com landing page: popup dismissal, city
/// entry, calendar navigation, guest configuration and search submission.
pub struct HomePage<'a, D: Driver> {
    driver: &'a D,
}

impl<'a, D: Driver> HomePage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    /// Best-effort dismissal of the Genius sign-in popup. The popup is
    /// optional; whether it appears or not, the workflow proceeds
    /// identically, so every outcome here is absorbed.
    pub fn dismiss_sign_in_popup(&self) {
        let dismiss = sign_in_dismiss();
        match self.driver.wait_visible(&dismiss, POPUP_WAIT) {
            Ok(true) => {
                if self.driver.click(&dismiss).is_ok() {
                    info!("✔ Sign-in popup dismissed");
                } else {
                    info!("ℹ Sign-in popup vanished before it could be dismissed");
                }
            }
            _ => info!("ℹ No sign-in popup to dismiss"),
        }
    }

    pub fn enter_city(&self, city: &str) -> Result<()> {
        debug!("Entering city: {city}");
        self.driver.fill(&city_input(), city)
    }

    /// Opens the date picker by clicking the check-in display field.
    pub fn open_date_picker(&self) -> Result<()> {
        self.driver.click(&check_in_field())
    }

    /// Selects `target` (YYYY-MM-DD) in the open calendar, paging forward
    /// through the month view when it is not yet rendered.
    ///
    /// The calendar only renders about a year ahead and advances one month
    /// per click with a client-side re-render lag, hence the bounded loop
    /// with a fixed pause. Failing to find the date is fatal: continuing
    /// with a wrong date would silently corrupt the whole search.
    pub fn select_date(&self, target: &str) -> Result<()> {
        let cell = date_cell(target);

        if self.driver.is_visible(&cell)? {
            self.driver.click(&cell)?;
            debug!("Selected {target} on the initial calendar view");
            return Ok(());
        }

        let advance = next_month();
        for advances in 1..=MONTH_ADVANCE_LIMIT {
            self.driver.click(&advance)?;
            self.driver.sleep(CALENDAR_RENDER_DELAY);
            if self.driver.is_visible(&cell)? {
                self.driver.click(&cell)?;
                debug!("Selected {target} after {advances} month advances");
                return Ok(());
            }
        }

        Err(DateNotFound {
            date: target.to_string(),
            advances: MONTH_ADVANCE_LIMIT,
        }
        .into())
    }

    /// Opens the guest selection popup.
    pub fn open_guests_popup(&self) -> Result<()> {
        self.driver.click(&guests_button())?;
        if !self.driver.wait_visible(&occupancy_popup(), GUEST_POPUP_WAIT)? {
            debug!("Occupancy popup not detected after opening guest editor");
        }
        Ok(())
    }

    /// Clicks the children "+" control exactly once.
    ///
    /// Precondition: the counter is at the site default of zero children.
    /// This is a blind increment — the current value is never read — so the
    /// call is not idempotent and must happen once per session. Adult count
    /// is deliberately left at the site default of two.
    pub fn increment_children(&self) -> Result<()> {
        self.driver.click(&children_plus())
    }

    /// Sets the single child's age once the per-child age selector appears.
    pub fn set_child_age(&self, age: &str) -> Result<()> {
        if !self.driver.wait_visible(&kids_ages_select(), KIDS_AGE_WAIT)? {
            anyhow::bail!("child age selector never became visible");
        }
        self.driver.click(&kids_ages_select())?;
        self.driver.select_value(&child_age_select(), age)
    }

    /// Confirms the guest selection. The subsequent content-loaded wait is
    /// tolerated on expiry: the host page gives no dependable signal here.
    pub fn confirm_guests(&self) -> Result<()> {
        self.driver.click(&guests_done())?;
        if !self.driver.wait_for_load(GUEST_CONFIRM_LOAD_WAIT)? {
            info!("ℹ Page load signal missing after guest confirmation, continuing");
        }
        Ok(())
    }

    /// Waits for the Search button and clicks it. A missing button is fatal:
    /// a blind click would leave the workflow on the wrong page.
    pub fn click_search(&self) -> Result<()> {
        let search = search_button();
        if !self.driver.wait_visible(&search, SEARCH_BUTTON_WAIT)? {
            anyhow::bail!(
                "search button not visible within {}s",
                SEARCH_BUTTON_WAIT.as_secs()
            );
        }
        self.driver.click(&search)
    }
}
