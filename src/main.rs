mod browser;
mod dates;
mod models;
mod output;
mod pages;
mod workflow;

use clap::Parser;
use models::SearchCriteria;
use tracing::{info, Level};
use workflow::BookingScraper;

/// Finds the best-rated five-star hotel on Booking.com for a city and date
/// range, and saves a normalized record of it.
#[derive(Parser, Debug)]
#[command(name = "booking-scout")]
struct Args {
    /// City to search hotels in
    #[arg(long, default_value = "Mumbai")]
    city: String,

    /// Check-in date, as days from today
    #[arg(long, default_value_t = 60)]
    check_in: i64,

    /// Check-out date, as days from today
    #[arg(long, default_value_t = 65)]
    check_out: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let args = Args::parse();

    info!("🏨 Booking Scout - best five-star hotel finder");
    info!("==============================================");

    let criteria = SearchCriteria {
        city: args.city,
        check_in_offset: args.check_in,
        check_out_offset: args.check_out,
    };

    let scraper = BookingScraper::launch()?;
    let best = scraper.run(&criteria)?;

    println!("Best rated 5-star hotel in {}:", criteria.city);
    println!("  Name:   {}", best.name);
    println!("  Rating: {}", best.rating);
    println!("  Price:  {}", best.price);
    println!("  URL:    {}", best.url.as_deref().unwrap_or("-"));

    let path = output::persist_best(&best).await?;
    info!("💾 Saved best hotel to {}", path.display());

    Ok(())
}
