//! Integration tests against the real color catalog.
//!
//! These tests need network access and are ignored by default. To point them
//! at a different catalog, create a `.env` file in the paintchip-lib
//! directory with:
//!
//! ```env
//! PAINTCHIP_CATALOG_URL=https://api.sherwin-williams.com/shared-color-service
//! ```
//!
//! Then run: `cargo test -p paintchip-lib -- --ignored`

use std::env;
use std::sync::Arc;
use std::time::Duration;

use paintchip_lib::CatalogClient;
use paintchip_lib::DEFAULT_BASE_URL;
use paintchip_lib::MetadataService;
use paintchip_lib::cache::InMemoryCache;
use paintchip_lib::lookup::LookupTable;

fn live_client() -> CatalogClient {
    let _ = dotenvy::dotenv();

    let base_url = env::var("PAINTCHIP_CATALOG_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    CatalogClient::builder()
        .base_url(base_url)
        .cache(InMemoryCache::new())
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Invalid PAINTCHIP_CATALOG_URL")
}

#[tokio::test]
#[ignore = "requires network access to the color catalog"]
async fn test_live_known_color() {
    let service = MetadataService::new(live_client(), Arc::new(LookupTable::empty()));

    let metadata = service
        .get_color_metadata("SW7008")
        .await
        .expect("lookup failed")
        .expect("SW7008 should exist");

    println!("{} {} lab={:?} lch={:?}", metadata.number, metadata.name, metadata.lab, metadata.lch);
    assert_eq!(metadata.number, "SW7008");
    assert!(metadata.lab.l > 80.0);
}

#[tokio::test]
#[ignore = "requires network access to the color catalog"]
async fn test_live_unknown_color() {
    let client = live_client();
    assert!(client.get_color("SW0000").await.expect("lookup failed").is_none());
}
