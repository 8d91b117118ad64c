//! Stress tests for the offer catalog.
//!
//! These tests verify:
//! 1. Insert and query throughput on a large index
//! 2. Determinism of the final state across runs
//! 3. Writers on different products do not serialize behind each other
//! 4. Readers never observe a partially inserted offer
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

use offer_index::{OfferCatalog, OfferId, OfferIndex, Price, ProductId};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Offers inserted by the throughput test
const STRESS_OFFER_COUNT: usize = 200_000;

/// Floor queries issued by the throughput test
const STRESS_QUERY_COUNT: usize = 200_000;

/// Target throughput (operations per second)
const TARGET_THROUGHPUT: f64 = 50_000.0;

/// Base price: 50000.00000000 (fixed-point, 10^8 scale)
const BASE_PRICE: i64 = 5_000_000_000_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Generate deterministic (offer, price) pairs.
///
/// Uses a seeded RNG for reproducibility. Same seed = same offers.
fn generate_offers(count: usize, seed: u64) -> Vec<(OfferId, Price)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            // Price variation: ±1000.00000000 in whole cents
            let offset: i64 = rng.gen_range(-100_000i64..=100_000) * 1_000_000;
            let price = Price::from_raw(BASE_PRICE + offset);
            (OfferId::new(format!("O{}", i + 1)), price)
        })
        .collect()
}

fn run_deterministic_sequence(seed: u64, count: usize) -> [u8; 32] {
    let catalog = OfferCatalog::new();
    let product = ProductId::new("P1");
    catalog.register_product(product.clone());

    for (offer, price) in generate_offers(count, seed) {
        catalog.add_offer(offer, &product, price).unwrap();
    }

    catalog.state_root(&product).unwrap()
}

// ============================================================================
// STRESS TESTS
// ============================================================================

#[test]
fn stress_insert_and_query() {
    println!("\n=== STRESS TEST: Insert + Floor Query ===\n");

    let offers = generate_offers(STRESS_OFFER_COUNT, 42);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let queries: Vec<Price> = (0..STRESS_QUERY_COUNT)
        .map(|_| Price::from_raw(BASE_PRICE + rng.gen_range(-200_000_000_000i64..=200_000_000_000)))
        .collect();

    let catalog = OfferCatalog::new();
    let product = ProductId::new("P1");
    catalog.register_product(product.clone());

    let start = Instant::now();
    for (offer, price) in offers {
        catalog.add_offer(offer, &product, price).unwrap();
    }
    let mut hits = 0usize;
    for price in &queries {
        if catalog.closest_offer(&product, *price).unwrap().is_some() {
            hits += 1;
        }
    }
    let elapsed = start.elapsed();

    let ops = (STRESS_OFFER_COUNT + STRESS_QUERY_COUNT) as f64;
    let throughput = ops / elapsed.as_secs_f64();

    println!("  Offers inserted:   {:>12}", STRESS_OFFER_COUNT);
    println!("  Distinct prices:   {:>12}", catalog.offer_count(&product).unwrap());
    println!("  Queries:           {:>12}", STRESS_QUERY_COUNT);
    println!("  Hits:              {:>12}", hits);
    println!("  Elapsed time:      {:>12.2?}", elapsed);
    println!("  Throughput:        {:>12.0} ops/sec", throughput);

    assert!(hits > 0 && hits < STRESS_QUERY_COUNT, "queries span both sides of the book");
    assert!(
        throughput >= TARGET_THROUGHPUT,
        "Throughput {:.0} ops/sec below target {:.0}",
        throughput,
        TARGET_THROUGHPUT
    );

    println!("\n=== STRESS TEST PASSED ===\n");
}

/// Same sequence of inserts produces an identical state root.
#[test]
fn verify_determinism() {
    const TEST_COUNT: usize = 10_000;
    const SEED: u64 = 12345;

    let root1 = run_deterministic_sequence(SEED, TEST_COUNT);
    let root2 = run_deterministic_sequence(SEED, TEST_COUNT);

    println!("  Run 1 state root: {}", hex::encode(root1));
    println!("  Run 2 state root: {}", hex::encode(root2));
    assert_eq!(root1, root2, "State roots must match for determinism");

    let root3 = run_deterministic_sequence(SEED + 1, TEST_COUNT);
    assert_ne!(root1, root3, "Different seeds should produce different roots");
}

/// Catalog results agree with a bare index fed the same inserts.
#[test]
fn catalog_matches_index() {
    let offers = generate_offers(20_000, 99);

    let catalog = OfferCatalog::new();
    let product = ProductId::new("P1");
    catalog.register_product(product.clone());
    let mut index = OfferIndex::new();

    for (offer, price) in &offers {
        catalog.add_offer(offer.clone(), &product, *price).unwrap();
        index.insert(offer.clone(), *price);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..10_000 {
        let q = Price::from_raw(BASE_PRICE + rng.gen_range(-150_000_000_000i64..=150_000_000_000));
        assert_eq!(catalog.closest_offer(&product, q).unwrap(), index.closest_at_or_below(q));
    }
    assert_eq!(catalog.state_root(&product).unwrap(), index.state_root());
}

/// Writers on distinct products run in parallel and each product ends up
/// with exactly its own offers.
#[test]
fn concurrent_writers_on_distinct_products() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 20_000;

    let catalog = Arc::new(OfferCatalog::new());
    for t in 0..THREADS {
        catalog.register_product(ProductId::new(format!("P{t}")));
    }
    let barrier = Arc::new(Barrier::new(THREADS));

    let start = Instant::now();
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let catalog = Arc::clone(&catalog);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let product = ProductId::new(format!("P{t}"));
                barrier.wait();
                for i in 0..PER_THREAD {
                    let offer = OfferId::new(format!("P{t}-O{i}"));
                    let price = Price::from_raw(i as i64 * 1_000_000);
                    catalog.add_offer(offer, &product, price).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    println!("  {} writers x {} offers in {:.2?}", THREADS, PER_THREAD, start.elapsed());

    for t in 0..THREADS {
        let product = ProductId::new(format!("P{t}"));
        assert_eq!(catalog.offer_count(&product), Ok(PER_THREAD));

        let top = Price::from_raw((PER_THREAD as i64 - 1) * 1_000_000);
        let expected = OfferId::new(format!("P{t}-O{}", PER_THREAD - 1));
        assert_eq!(catalog.closest_offer(&product, top), Ok(Some(expected)));
    }
}

/// A reader racing a writer on the same product only ever sees offers the
/// writer had fully inserted, and the floor never moves backwards.
#[test]
fn concurrent_reader_sees_whole_entries() {
    const INSERTS: i64 = 50_000;

    let catalog = Arc::new(OfferCatalog::new());
    let product = ProductId::new("P1");
    catalog.register_product(product.clone());
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let catalog = Arc::clone(&catalog);
        let product = product.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            // Ascending prices: each offer's id encodes its price
            for i in 0..INSERTS {
                catalog
                    .add_offer(OfferId::new(i.to_string()), &product, Price::from_raw(i))
                    .unwrap();
            }
            done.store(true, Ordering::Release);
        })
    };

    let reader = {
        let catalog = Arc::clone(&catalog);
        let product = product.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut last_seen = -1i64;
            let mut reads = 0usize;
            while !done.load(Ordering::Acquire) {
                if let Some(offer) = catalog.closest_offer(&product, Price::MAX).unwrap() {
                    let seen: i64 = offer.as_str().parse().unwrap();
                    assert!(seen >= last_seen, "floor moved backwards: {seen} < {last_seen}");
                    assert!(seen < INSERTS);
                    last_seen = seen;
                }
                reads += 1;
            }
            reads
        })
    };

    writer.join().unwrap();
    let reads = reader.join().unwrap();
    println!("  reader completed {reads} queries during writes");

    assert_eq!(
        catalog.closest_offer(&product, Price::MAX),
        Ok(Some(OfferId::new((INSERTS - 1).to_string())))
    );
}

/// Concurrent registration of the same product creates it exactly once.
#[test]
fn concurrent_registration_is_idempotent() {
    const THREADS: usize = 16;

    let catalog = Arc::new(OfferCatalog::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let created: usize = (0..THREADS)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                catalog.register_product(ProductId::new("shared")) as usize
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .sum();

    assert_eq!(created, 1);
    assert_eq!(catalog.product_count(), 1);
}
