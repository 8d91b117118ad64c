//! Offer Index - Binary Entry Point
//!
//! Walks the catalog through a short scripted session and logs each outcome.
//! Set `RUST_LOG=offer_index=debug` to see the catalog's own events.

use offer_index::{CatalogError, OfferCatalog, OfferId, Price, PriceError, ProductId};
use tracing::{info, warn};

fn price(s: &str) -> Result<Price, PriceError> {
    s.parse()
}

fn report(label: &str, outcome: Result<Option<OfferId>, CatalogError>) {
    match outcome {
        Ok(Some(offer)) => info!(%offer, "{label}"),
        Ok(None) => info!("{label}: no offer at or below price"),
        Err(err) => warn!(error = %err, "{label}"),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = OfferCatalog::new();
    let p1 = ProductId::new("P1");
    let p2 = ProductId::new("P2");

    catalog.register_product(p1.clone());

    catalog.add_offer(OfferId::new("O1"), &p1, price("10.00")?)?;
    report("P1 closest to 12.00", catalog.closest_offer(&p1, price("12.00")?));
    report("P1 closest to 5.00", catalog.closest_offer(&p1, price("5.00")?));

    catalog.add_offer(OfferId::new("O2"), &p1, price("10.00")?)?;
    report("P1 closest to 10.00", catalog.closest_offer(&p1, price("10.00")?));

    catalog.add_offer(OfferId::new("O3"), &p1, price("20.00")?)?;
    report("P1 closest to 15.00", catalog.closest_offer(&p1, price("15.00")?));

    report("P2 closest to 10.00", catalog.closest_offer(&p2, price("10.00")?));
    if let Err(err) = catalog.add_offer(OfferId::new("O4"), &p2, price("5.00")?) {
        warn!(error = %err, "add O4 to P2");
    }

    let root = hex::encode(catalog.state_root(&p1)?);
    info!(product = %p1, offers = catalog.offer_count(&p1)?, state_root = %root, "final state");
    Ok(())
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
