use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use mcp_stays::adapters::memory_catalog::InMemoryCatalog;
use mcp_stays::domain::pricing::PricingPolicy;
use mcp_stays::domain::property::{PropertyFeatures, PropertyRecord};
use mcp_stays::error::{Result, StaysError};
use mcp_stays::mcp::server::StaysMcpServer;
use mcp_stays::ports::availability::{AvailabilityClient, AvailabilityResult};
use mcp_stays::search::service::SearchService;

use rmcp::ServerHandler;

/// Collaborator that answers "available" for everything.
struct AlwaysFree;

#[async_trait]
impl AvailabilityClient for AlwaysFree {
    async fn check_availability(
        &self,
        property_id: u32,
        _check_in: NaiveDate,
        _check_out: NaiveDate,
    ) -> Result<AvailabilityResult> {
        Ok(AvailabilityResult {
            property_id,
            available: true,
        })
    }
}

/// Collaborator that fails every check.
struct Offline;

#[async_trait]
impl AvailabilityClient for Offline {
    async fn check_availability(
        &self,
        _property_id: u32,
        _check_in: NaiveDate,
        _check_out: NaiveDate,
    ) -> Result<AvailabilityResult> {
        Err(StaysError::Availability {
            reason: "reservations service offline".into(),
        })
    }
}

fn seeded_record(id: u32, name: &str, location: &str, price: f64) -> PropertyRecord {
    PropertyRecord {
        id,
        name: name.into(),
        location: location.into(),
        description: String::new(),
        price,
        category: None,
        aesthetic: None,
        guests: 2,
        bedrooms: 1,
        bathrooms: 1,
        images: vec![],
        features: Some(PropertyFeatures {
            amenities: vec!["WiFi".into()],
            rating: 4.5,
            reviews_count: 10,
            is_available: true,
        }),
        story: None,
        pricing: PricingPolicy::default(),
    }
}

fn make_service(availability: Arc<dyn AvailabilityClient>) -> Arc<SearchService> {
    let catalog = InMemoryCatalog::new(vec![
        seeded_record(1, "Harbor Loft", "Fort", 5000.0),
        seeded_record(2, "Palm Villa", "Juhu", 9000.0),
    ]);
    Arc::new(SearchService::new(Arc::new(catalog), availability))
}

#[test]
fn server_lists_seven_tools() {
    let server = StaysMcpServer::new(make_service(Arc::new(AlwaysFree)));
    let info = server.get_info();
    let instructions = info.instructions.unwrap();
    assert!(instructions.contains("stays_search"));
    assert!(instructions.contains("stays_property_details"));
    assert!(instructions.contains("stays_quote"));
    assert!(instructions.contains("stays_availability"));
    assert!(instructions.contains("stays_featured"));
    assert!(instructions.contains("stays_popular"));
    assert!(instructions.contains("stays_similar"));
    // Verify capabilities include tools and resources
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());
}

#[test]
fn server_get_info_has_protocol_version() {
    let server = StaysMcpServer::new(make_service(Arc::new(AlwaysFree)));
    let info = server.get_info();
    // Just verify it doesn't panic and returns valid info
    let _ = info.protocol_version;
}

#[test]
fn server_creates_with_different_collaborators() {
    // Verify the server can be built over either collaborator flavor
    let _server1 = StaysMcpServer::new(make_service(Arc::new(AlwaysFree)));
    let _server2 = StaysMcpServer::new(make_service(Arc::new(Offline)));
}
