pub mod chrome;
#[cfg(test)]
pub mod fake;

pub use chrome::ChromeDriver;

use anyhow::Result;
use std::fmt;
use std::time::Duration;

/// Element descriptor understood by a [`Driver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(query: impl Into<String>) -> Self {
        Self::XPath(query.into())
    }

    /// Shorthand for Booking's `data-testid` attributes.
    pub fn test_id(id: &str) -> Self {
        Self::Css(format!("[data-testid='{id}']"))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
        }
    }
}

/// The page-automation capability set the workflow depends on.
///
/// Implemented for real by [`ChromeDriver`]; the page objects are written
/// against this trait so their sequencing logic is testable without a
/// browser. Waits report `Ok(false)` on expiry rather than erroring — the
/// caller decides whether an absent element is tolerated or fatal.
///
/// The `*_within` methods scope a lookup to the `index`-th match of `root`;
/// their `child` locator must be CSS (structural lookups inside an element
/// subtree).
pub trait Driver {
    fn navigate(&self, url: &str) -> Result<()>;

    /// Wipes localStorage and sessionStorage so every run starts without
    /// residual site-side state.
    fn clear_site_storage(&self) -> Result<()>;

    fn is_visible(&self, locator: &Locator) -> Result<bool>;

    fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<bool>;

    fn click(&self, locator: &Locator) -> Result<()>;

    fn fill(&self, locator: &Locator, value: &str) -> Result<()>;

    /// Sets a `<select>` element's value and fires its change event.
    fn select_value(&self, locator: &Locator, value: &str) -> Result<()>;

    /// Waits until the document reports content loaded.
    fn wait_for_load(&self, timeout: Duration) -> Result<bool>;

    /// Full-page scroll to the bottom, forcing lazy-loaded content in.
    fn scroll_to_bottom(&self) -> Result<()>;

    /// Number of elements currently matching `locator`.
    fn count(&self, locator: &Locator) -> Result<usize>;

    /// Whether the `index`-th match of `locator` is still attached.
    fn exists_at(&self, locator: &Locator, index: usize) -> Result<bool>;

    fn text_within(&self, root: &Locator, index: usize, child: &Locator) -> Result<String>;

    /// Text of every `child` match under the `index`-th `root`, in document
    /// order.
    fn texts_within(&self, root: &Locator, index: usize, child: &Locator) -> Result<Vec<String>>;

    fn attr_within(
        &self,
        root: &Locator,
        index: usize,
        child: &Locator,
        name: &str,
    ) -> Result<Option<String>>;

    fn sleep(&self, duration: Duration);

    /// Best-effort settle for steps with no usable readiness signal. Kept as
    /// a named primitive so a real readiness check can replace it per call
    /// site if one ever becomes available.
    fn settle(&self, duration: Duration) {
        self.sleep(duration);
    }
}
