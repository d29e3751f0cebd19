//! Scripted in-memory [`Driver`] used by the page-object tests. No browser,
//! no clock: waits resolve against the scripted state immediately.

use super::{Driver, Locator};
use anyhow::Result;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// One scripted result card. `None` fields simulate unreadable elements.
#[derive(Debug, Clone, Default)]
pub struct FakeCard {
    pub name: Option<String>,
    /// Texts of the review-score sub-elements, in document order.
    pub score_texts: Vec<String>,
    /// Simulates the score sub-elements erroring out on read.
    pub score_read_fails: bool,
    pub price: Option<String>,
    pub href: Option<String>,
    /// Simulates a card that detached from the page mid-extraction.
    pub detached: bool,
}

#[derive(Default)]
struct FakeState {
    visible: HashSet<String>,
    /// target key -> (trigger key, clicks of trigger required to reveal it)
    reveal_after: HashMap<String, (String, usize)>,
    clicks: Vec<String>,
    fills: HashMap<String, String>,
    selected: HashMap<String, String>,
    cards: Vec<FakeCard>,
    load_ready: bool,
    navigated: Option<String>,
    storage_cleared: bool,
    scrolled: bool,
}

pub struct FakeDriver {
    state: RefCell<FakeState>,
}

impl FakeDriver {
    pub fn new() -> Self {
        let state = FakeState {
            load_ready: true,
            ..FakeState::default()
        };
        Self {
            state: RefCell::new(state),
        }
    }

    pub fn set_visible(&self, locator: &Locator) {
        self.state.borrow_mut().visible.insert(locator.to_string());
    }

    /// Makes `target` visible only once `trigger` has been clicked `clicks`
    /// times.
    pub fn reveal_after_clicks(&self, target: &Locator, trigger: &Locator, clicks: usize) {
        self.state
            .borrow_mut()
            .reveal_after
            .insert(target.to_string(), (trigger.to_string(), clicks));
    }

    pub fn set_cards(&self, cards: Vec<FakeCard>) {
        self.state.borrow_mut().cards = cards;
    }

    pub fn set_load_ready(&self, ready: bool) {
        self.state.borrow_mut().load_ready = ready;
    }

    pub fn clicks_of(&self, locator: &Locator) -> usize {
        let key = locator.to_string();
        self.state
            .borrow()
            .clicks
            .iter()
            .filter(|c| **c == key)
            .count()
    }

    pub fn filled_value(&self, locator: &Locator) -> Option<String> {
        self.state.borrow().fills.get(&locator.to_string()).cloned()
    }

    pub fn selected_value(&self, locator: &Locator) -> Option<String> {
        self.state
            .borrow()
            .selected
            .get(&locator.to_string())
            .cloned()
    }

    pub fn navigated_to(&self) -> Option<String> {
        self.state.borrow().navigated.clone()
    }

    pub fn storage_cleared(&self) -> bool {
        self.state.borrow().storage_cleared
    }

    pub fn scrolled(&self) -> bool {
        self.state.borrow().scrolled
    }

    fn visible_now(&self, key: &str) -> bool {
        let state = self.state.borrow();
        if let Some((trigger, needed)) = state.reveal_after.get(key) {
            let done = state.clicks.iter().filter(|c| *c == trigger).count();
            return done >= *needed;
        }
        state.visible.contains(key)
    }

    fn card(&self, index: usize) -> Result<FakeCard> {
        let state = self.state.borrow();
        let card = state
            .cards
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("no card at index {index}"))?;
        if card.detached {
            anyhow::bail!("card {index} is detached");
        }
        Ok(card.clone())
    }
}

impl Driver for FakeDriver {
    fn navigate(&self, url: &str) -> Result<()> {
        self.state.borrow_mut().navigated = Some(url.to_string());
        Ok(())
    }

    fn clear_site_storage(&self) -> Result<()> {
        self.state.borrow_mut().storage_cleared = true;
        Ok(())
    }

    fn is_visible(&self, locator: &Locator) -> Result<bool> {
        Ok(self.visible_now(&locator.to_string()))
    }

    fn wait_visible(&self, locator: &Locator, _timeout: Duration) -> Result<bool> {
        self.is_visible(locator)
    }

    fn click(&self, locator: &Locator) -> Result<()> {
        self.state.borrow_mut().clicks.push(locator.to_string());
        Ok(())
    }

    fn fill(&self, locator: &Locator, value: &str) -> Result<()> {
        self.state
            .borrow_mut()
            .fills
            .insert(locator.to_string(), value.to_string());
        Ok(())
    }

    fn select_value(&self, locator: &Locator, value: &str) -> Result<()> {
        self.state
            .borrow_mut()
            .selected
            .insert(locator.to_string(), value.to_string());
        Ok(())
    }

    fn wait_for_load(&self, _timeout: Duration) -> Result<bool> {
        Ok(self.state.borrow().load_ready)
    }

    fn scroll_to_bottom(&self) -> Result<()> {
        self.state.borrow_mut().scrolled = true;
        Ok(())
    }

    fn count(&self, _locator: &Locator) -> Result<usize> {
        Ok(self.state.borrow().cards.len())
    }

    fn exists_at(&self, _locator: &Locator, index: usize) -> Result<bool> {
        let state = self.state.borrow();
        Ok(state
            .cards
            .get(index)
            .map(|card| !card.detached)
            .unwrap_or(false))
    }

    fn text_within(&self, _root: &Locator, index: usize, child: &Locator) -> Result<String> {
        let card = self.card(index)?;
        let key = child.to_string();
        let field = if key.contains("title") {
            card.name
        } else if key.contains("price") {
            card.price
        } else {
            None
        };
        field.ok_or_else(|| anyhow::anyhow!("{child} unreadable in card {index}"))
    }

    fn texts_within(&self, _root: &Locator, index: usize, child: &Locator) -> Result<Vec<String>> {
        let card = self.card(index)?;
        if card.score_read_fails {
            anyhow::bail!("{child} unreadable in card {index}");
        }
        Ok(card.score_texts)
    }

    fn attr_within(
        &self,
        _root: &Locator,
        index: usize,
        _child: &Locator,
        _name: &str,
    ) -> Result<Option<String>> {
        Ok(self.card(index)?.href)
    }

    fn sleep(&self, _duration: Duration) {}
}
