use super::{Driver, Locator};
use anyhow::{anyhow, Context, Result};
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use serde_json::json;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Real page driver backed by headless Chrome.
///
/// The browser is launched with a fresh temporary profile, so no cookies or
/// storage survive from earlier runs; it is closed when this driver is
/// dropped, on every exit path including error unwinding.
pub struct ChromeDriver {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeDriver {
    pub fn launch() -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;

        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    fn find(&self, locator: &Locator) -> Result<Element<'_>> {
        let element = match locator {
            Locator::Css(s) => self.tab.find_element(s),
            Locator::XPath(s) => self.tab.find_element_by_xpath(s),
        };
        element.map_err(|e| anyhow!("element {locator} not found: {e}"))
    }

    fn find_all(&self, locator: &Locator) -> Result<Vec<Element<'_>>> {
        let elements = match locator {
            Locator::Css(s) => self.tab.find_elements(s),
            Locator::XPath(s) => self.tab.find_elements_by_xpath(s),
        };
        // No matches comes back as an error from CDP; treat it as empty.
        Ok(elements.unwrap_or_default())
    }

    fn nth(&self, root: &Locator, index: usize) -> Result<Element<'_>> {
        let mut elements = self.find_all(root)?;
        if index >= elements.len() {
            anyhow::bail!("element {root} has no match at index {index}");
        }
        Ok(elements.swap_remove(index))
    }

    fn child_css<'a>(child: &'a Locator) -> Result<&'a str> {
        match child {
            Locator::Css(s) => Ok(s),
            Locator::XPath(_) => anyhow::bail!("child locators must be CSS, got {child}"),
        }
    }
}

fn element_visible(element: &Element<'_>) -> bool {
    let probed = element.call_js_fn(
        "function() { \
            const r = this.getBoundingClientRect(); \
            const s = window.getComputedStyle(this); \
            return r.width > 0 && r.height > 0 \
                && s.visibility !== 'hidden' && s.display !== 'none'; \
        }",
        vec![],
        false,
    );
    match probed {
        Ok(result) => result.value.and_then(|v| v.as_bool()).unwrap_or(false),
        Err(_) => false,
    }
}

impl Driver for ChromeDriver {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {url}"))?;
        self.tab
            .wait_until_navigated()
            .context("Navigation did not complete")?;
        Ok(())
    }

    fn clear_site_storage(&self) -> Result<()> {
        self.tab
            .evaluate("localStorage.clear(); sessionStorage.clear();", false)
            .context("Failed to clear site storage")?;
        Ok(())
    }

    fn is_visible(&self, locator: &Locator) -> Result<bool> {
        match self.find(locator) {
            Ok(element) => Ok(element_visible(&element)),
            Err(_) => Ok(false),
        }
    }

    fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_visible(locator)? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn click(&self, locator: &Locator) -> Result<()> {
        self.find(locator)?
            .click()
            .map_err(|e| anyhow!("failed to click {locator}: {e}"))?;
        Ok(())
    }

    fn fill(&self, locator: &Locator, value: &str) -> Result<()> {
        let element = self.find(locator)?;
        element
            .click()
            .map_err(|e| anyhow!("failed to focus {locator}: {e}"))?;
        element
            .type_into(value)
            .map_err(|e| anyhow!("failed to type into {locator}: {e}"))?;
        Ok(())
    }

    fn select_value(&self, locator: &Locator, value: &str) -> Result<()> {
        self.find(locator)?
            .call_js_fn(
                "function(value) { \
                    this.value = value; \
                    this.dispatchEvent(new Event('change', { bubbles: true })); \
                }",
                vec![json!(value)],
                false,
            )
            .map_err(|e| anyhow!("failed to select value on {locator}: {e}"))?;
        Ok(())
    }

    fn wait_for_load(&self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let state = self
                .tab
                .evaluate("document.readyState", false)
                .context("Failed to read document.readyState")?;
            let loaded = state
                .value
                .as_ref()
                .and_then(|v| v.as_str())
                .map(|s| s == "interactive" || s == "complete")
                .unwrap_or(false);
            if loaded {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn scroll_to_bottom(&self) -> Result<()> {
        self.tab
            .evaluate("window.scrollTo(0, document.body.scrollHeight)", false)
            .context("Failed to scroll to bottom")?;
        Ok(())
    }

    fn count(&self, locator: &Locator) -> Result<usize> {
        Ok(self.find_all(locator)?.len())
    }

    fn exists_at(&self, locator: &Locator, index: usize) -> Result<bool> {
        Ok(index < self.find_all(locator)?.len())
    }

    fn text_within(&self, root: &Locator, index: usize, child: &Locator) -> Result<String> {
        let selector = Self::child_css(child)?;
        let card = self.nth(root, index)?;
        let element = card
            .find_element(selector)
            .map_err(|e| anyhow!("no {child} inside {root}[{index}]: {e}"))?;
        element
            .get_inner_text()
            .map_err(|e| anyhow!("failed to read text of {child}: {e}"))
    }

    fn texts_within(&self, root: &Locator, index: usize, child: &Locator) -> Result<Vec<String>> {
        let selector = Self::child_css(child)?;
        let card = self.nth(root, index)?;
        let elements = card.find_elements(selector).unwrap_or_default();
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(
                element
                    .get_inner_text()
                    .map_err(|e| anyhow!("failed to read text of {child}: {e}"))?,
            );
        }
        Ok(texts)
    }

    fn attr_within(
        &self,
        root: &Locator,
        index: usize,
        child: &Locator,
        name: &str,
    ) -> Result<Option<String>> {
        let selector = Self::child_css(child)?;
        let card = self.nth(root, index)?;
        let element = card
            .find_element(selector)
            .map_err(|e| anyhow!("no {child} inside {root}[{index}]: {e}"))?;
        let attributes = element
            .get_attributes()
            .map_err(|e| anyhow!("failed to read attributes of {child}: {e}"))?;
        // CDP returns attributes as a flat name/value list.
        Ok(attributes.and_then(|attrs| {
            attrs
                .chunks(2)
                .find(|pair| pair.first().map(String::as_str) == Some(name))
                .and_then(|pair| pair.get(1).cloned())
        }))
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}
