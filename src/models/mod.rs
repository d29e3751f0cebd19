use serde::{Deserialize, Serialize};

/// Placeholder price used when a card's price element cannot be read.
pub const UNPRICED: &str = "₹0";

/// Normalized record of the best-rated hotel found in one run.
///
/// Field declaration order is the serialized order: name, rating, price, url.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelCandidate {
    /// Hotel name; empty when the title element was unreadable.
    pub name: String,
    /// User review score on Booking's 0-10 scale. `0.0` means "no rating
    /// available" and is never treated as a winning rating.
    pub rating: f64,
    /// Display price for the selected dates, currency symbol preserved,
    /// internal whitespace collapsed.
    pub price: String,
    /// Hotel link, relative or absolute as the site renders it.
    pub url: Option<String>,
}

impl HotelCandidate {
    /// The all-sentinel starting candidate. Returned as-is when no card
    /// yields a readable rating.
    pub fn unrated() -> Self {
        Self {
            name: String::new(),
            rating: 0.0,
            price: UNPRICED.to_string(),
            url: None,
        }
    }
}

/// Search parameters for one scrape run.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    /// City or area to search in
    pub city: String,
    /// Check-in date, as days from today
    pub check_in_offset: i64,
    /// Check-out date, as days from today
    pub check_out_offset: i64,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            city: "Mumbai".to_string(),
            check_in_offset: 60,
            check_out_offset: 65,
        }
    }
}
