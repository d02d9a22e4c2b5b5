use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::sync::RwLock;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ListResourceTemplatesResult, ListResourcesResult,
        PaginatedRequestParams, ProtocolVersion, RawResource, RawResourceTemplate,
        ReadResourceRequestParams, ReadResourceResult, Resource, ResourceContents,
        ResourceTemplate, ServerCapabilities, ServerInfo,
    },
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::domain::criteria::{SearchCriteria, SortKey, SortOrder};
use crate::domain::property::StaySummary;
use crate::search::service::SearchService;

// ---------- Resource Store ----------

/// Thread-safe store of catalog data exposed as MCP resources.
/// Keys are URIs like `stays://property/7`, values are text content.
#[derive(Clone, Default)]
pub struct ResourceStore {
    entries: Arc<RwLock<HashMap<String, ResourceEntry>>>,
}

#[derive(Clone)]
struct ResourceEntry {
    name: String,
    text: String,
}

impl ResourceStore {
    async fn insert(&self, uri: impl Into<String>, name: impl Into<String>, text: String) {
        self.entries.write().await.insert(
            uri.into(),
            ResourceEntry {
                name: name.into(),
                text,
            },
        );
    }

    async fn get(&self, uri: &str) -> Option<ResourceEntry> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn list(&self) -> Vec<(String, String)> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(uri, entry)| (uri.clone(), entry.name.clone()))
            .collect()
    }
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore").finish()
    }
}

// ---------- Tool parameter types ----------

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchToolParams {
    /// Free-text needle matched case-insensitively against property locations
    /// and names (e.g. "bandra", "Colaba"). Omitted or empty matches everything.
    pub location: Option<String>,
    /// Check-in date (YYYY-MM-DD). Must be paired with check_out to filter by availability.
    pub check_in: Option<String>,
    /// Check-out date (YYYY-MM-DD). Must be paired with check_in.
    pub check_out: Option<String>,
    /// Party size (default: 1). Carried to the reservation check but never a filter.
    pub guests: Option<u32>,
    /// Lowest nightly price to include
    pub min_price: Option<f64>,
    /// Highest nightly price to include
    pub max_price: Option<f64>,
    /// Amenities every result must offer, exact names (e.g. ["WiFi", "Kitchen"])
    pub amenities: Option<Vec<String>>,
    /// Minimum rating, 0 disables the floor
    pub min_rating: Option<f64>,
    /// Sort key: "price", "rating" or "popularity" (default: popularity).
    /// Any other value keeps the filtered order.
    pub sort_by: Option<String>,
    /// Sort direction: "asc" or "desc" (default: desc)
    pub sort_order: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DetailToolParams {
    /// Property ID from stays_search results
    pub id: u32,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct QuoteToolParams {
    /// Property ID
    pub id: u32,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD)
    pub check_out: String,
    /// Party size. Accepted for booking-form parity; does not change the amount.
    pub guests: Option<u32>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AvailabilityToolParams {
    /// Property ID
    pub id: u32,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD)
    pub check_out: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct BrowseToolParams {
    /// Number of properties to return (default: 4)
    pub limit: Option<u32>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SimilarToolParams {
    /// Property ID to find companions for
    pub id: u32,
    /// Number of properties to return (default: 4)
    pub limit: Option<u32>,
}

fn parse_sort_key(value: &str) -> SortKey {
    match value.to_ascii_lowercase().as_str() {
        "price" => SortKey::Price,
        "rating" => SortKey::Rating,
        "popularity" => SortKey::Popularity,
        // Unrecognized keys leave the filtered order untouched.
        _ => SortKey::Distance,
    }
}

fn parse_sort_order(value: &str) -> SortOrder {
    if value.eq_ignore_ascii_case("asc") {
        SortOrder::Asc
    } else {
        SortOrder::Desc
    }
}

fn format_summaries(summaries: &[StaySummary]) -> String {
    let mut text = String::new();
    for (i, summary) in summaries.iter().enumerate() {
        let _ = writeln!(text, "{}. {summary} (ID: {})", i + 1, summary.id);
    }
    text
}

// ---------- MCP Server ----------

#[derive(Clone)]
pub struct StaysMcpServer {
    service: Arc<SearchService>,
    tool_router: ToolRouter<Self>,
    resources: ResourceStore,
}

#[tool_router]
impl StaysMcpServer {
    pub fn new(service: Arc<SearchService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
            resources: ResourceStore::default(),
        }
    }

    /// Search the stay catalog by location, dates, price band, amenities and rating.
    #[tool(
        name = "stays_search",
        description = "Search the stay catalog by location, dates, price band, amenities, and rating floor, sorted by price, rating, or popularity. When both dates are given, properties already booked for that range are dropped. Use this as the starting point to discover property IDs for the other tools.",
        annotations(read_only_hint = true, open_world_hint = true)
    )]
    async fn stays_search(
        &self,
        Parameters(params): Parameters<SearchToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let criteria = SearchCriteria {
            location: params.location.unwrap_or_default(),
            check_in: params.check_in,
            check_out: params.check_out,
            guests: params.guests.unwrap_or(1),
            min_price: params.min_price.unwrap_or(0.0),
            max_price: params.max_price.unwrap_or(f64::MAX),
            amenities: params.amenities.unwrap_or_default(),
            min_rating: params.min_rating.unwrap_or(0.0),
            sort_by: params
                .sort_by
                .as_deref()
                .map_or_else(SortKey::default, parse_sort_key),
            sort_order: params
                .sort_order
                .as_deref()
                .map_or_else(SortOrder::default, parse_sort_order),
        };

        let summaries = self.service.search(&criteria).await;
        let mut text = String::new();
        if summaries.is_empty() {
            text.push_str("No properties matched this search.\n");
        } else {
            let _ = writeln!(text, "Found {} properties:\n", summaries.len());
            for (i, summary) in summaries.iter().enumerate() {
                let _ = write!(
                    text,
                    "{}. **{}** (ID: {})\n   {}\n   {:.0}/night",
                    i + 1,
                    summary.name,
                    summary.id,
                    summary.location,
                    summary.price,
                );
                if summary.features.rating > 0.0 {
                    let _ = write!(
                        text,
                        " | Rating: {:.1} ({} reviews)",
                        summary.features.rating, summary.features.reviews_count,
                    );
                }
                let _ = writeln!(text, "\n");
            }
        }

        let location_key = if criteria.location.is_empty() {
            "all"
        } else {
            criteria.location.as_str()
        };
        let uri = format!("stays://search/{location_key}");
        let name = format!("Search: {location_key}");
        self.resources.insert(uri, name, text.clone()).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Get the full catalog record for one property.
    #[tool(
        name = "stays_property_details",
        description = "Get the full record for one property: description, amenities, capacity, images, and the fee/discount schedule used for quotes. Requires a property ID from stays_search.",
        annotations(read_only_hint = true)
    )]
    async fn stays_property_details(
        &self,
        Parameters(params): Parameters<DetailToolParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service.property(params.id) {
            Some(record) => {
                let text = record.to_string();
                let uri = format!("stays://property/{}", params.id);
                let name = format!("Property: {}", record.name);
                self.resources.insert(uri, name, text.clone()).await;
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            None => Ok(CallToolResult::error(vec![Content::text(format!(
                "No property with ID {}. Use stays_search to find valid IDs.",
                params.id
            ))])),
        }
    }

    /// Quote a stay: nightly rate, long-stay discount, fees, and total.
    #[tool(
        name = "stays_quote",
        description = "Price a stay for a property and date range: nightly rate x nights, weekly (7+ nights) or monthly (28+ nights) discount, flat cleaning and service fees, and the total. Guest count does not change the amount.",
        annotations(read_only_hint = true)
    )]
    async fn stays_quote(
        &self,
        Parameters(params): Parameters<QuoteToolParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .service
            .quote(params.id, &params.check_in, &params.check_out, params.guests)
        {
            Ok(quote) => {
                let text = quote.to_string();
                let uri = format!(
                    "stays://quote/{}/{}/{}",
                    params.id, params.check_in, params.check_out
                );
                let name = format!(
                    "Quote: property {} {} to {}",
                    params.id, params.check_in, params.check_out
                );
                self.resources.insert(uri, name, text.clone()).await;
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to quote stay for property {}: {e}",
                params.id
            ))])),
        }
    }

    /// Ask the reservation collaborator whether one property is free.
    #[tool(
        name = "stays_availability",
        description = "Check whether one property is available for a date range by asking the reservation collaborator directly. Unlike stays_search this reports collaborator failures instead of assuming availability.",
        annotations(read_only_hint = true, open_world_hint = true)
    )]
    async fn stays_availability(
        &self,
        Parameters(params): Parameters<AvailabilityToolParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .service
            .availability(params.id, &params.check_in, &params.check_out)
            .await
        {
            Ok(result) => {
                let text = if result.available {
                    format!(
                        "Property {} is available from {} to {}.",
                        params.id, params.check_in, params.check_out
                    )
                } else {
                    format!(
                        "Property {} is not available from {} to {}.",
                        params.id, params.check_in, params.check_out
                    )
                };
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to check availability for property {}: {e}",
                params.id
            ))])),
        }
    }

    /// List the highest rated properties.
    #[tool(
        name = "stays_featured",
        description = "List the highest rated properties in the catalog, best first.",
        annotations(read_only_hint = true)
    )]
    async fn stays_featured(
        &self,
        Parameters(params): Parameters<BrowseToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.limit.unwrap_or(4).clamp(1, 20) as usize;
        let summaries = self.service.featured(limit);
        Ok(CallToolResult::success(vec![Content::text(
            format_summaries(&summaries),
        )]))
    }

    /// List the most reviewed properties.
    #[tool(
        name = "stays_popular",
        description = "List the most reviewed properties in the catalog, busiest first.",
        annotations(read_only_hint = true)
    )]
    async fn stays_popular(
        &self,
        Parameters(params): Parameters<BrowseToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.limit.unwrap_or(4).clamp(1, 20) as usize;
        let summaries = self.service.popular(limit);
        Ok(CallToolResult::success(vec![Content::text(
            format_summaries(&summaries),
        )]))
    }

    /// List properties sharing a category or aesthetic with a given one.
    #[tool(
        name = "stays_similar",
        description = "List properties that share a category or aesthetic with the given one, excluding the property itself. Requires a property ID from stays_search.",
        annotations(read_only_hint = true)
    )]
    async fn stays_similar(
        &self,
        Parameters(params): Parameters<SimilarToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.limit.unwrap_or(4).clamp(1, 20) as usize;
        let summaries = self.service.similar(params.id, limit);
        let text = if summaries.is_empty() {
            "No similar properties found.".to_string()
        } else {
            let mut text = format!("Found {} similar properties:\n", summaries.len());
            text.push_str(&format_summaries(&summaries));
            text
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for StaysMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Stay catalog MCP server for searching short-term rentals, checking \
                 availability, and quoting stays.\n\
                 \n\
                 ## Tools\n\
                 Start with stays_search to find properties. Each result carries a property ID \
                 used by the other tools:\n\
                 - stays_search: filter by location, dates, price band, amenities, and rating; \
                 sort by price, rating, or popularity\n\
                 - stays_property_details: full record for one property (description, amenities, \
                 capacity, fee schedule)\n\
                 - stays_quote: price breakdown for a date range (nightly rate, long-stay \
                 discount, fees, total)\n\
                 - stays_availability: ask the reservation collaborator about one property and range\n\
                 - stays_featured: highest rated properties\n\
                 - stays_popular: most reviewed properties\n\
                 - stays_similar: properties sharing a category or aesthetic with a given one\n\
                 \n\
                 ## Resources\n\
                 Search results, property details, and quotes are cached as MCP resources. Read \
                 their URIs to reuse previously fetched data.\n\
                 \n\
                 ## Tips\n\
                 - Dates are YYYY-MM-DD. stays_search only filters by availability when both \
                 check_in and check_out are given.\n\
                 - Guest count never changes a quote; capacity is settled at booking time.\n\
                 - Stays of 7+ nights get the weekly discount, 28+ nights the monthly one."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let entries = self.resources.list().await;
        let resources: Vec<Resource> = entries
            .into_iter()
            .map(|(uri, name)| Resource {
                annotations: None,
                raw: RawResource {
                    uri,
                    name,
                    title: None,
                    description: None,
                    mime_type: Some("text/plain".into()),
                    size: None,
                    icons: None,
                    meta: None,
                },
            })
            .collect();
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let templates = vec![
            ResourceTemplate {
                annotations: None,
                raw: RawResourceTemplate {
                    uri_template: "stays://property/{id}".into(),
                    name: "Property Record".into(),
                    title: Some("Property details".into()),
                    description: Some(
                        "Full catalog record (fetched via stays_property_details)".into(),
                    ),
                    mime_type: Some("text/plain".into()),
                    icons: None,
                },
            },
            ResourceTemplate {
                annotations: None,
                raw: RawResourceTemplate {
                    uri_template: "stays://search/{location}".into(),
                    name: "Search Results".into(),
                    title: Some("Search results".into()),
                    description: Some(
                        "Properties found for a location (fetched via stays_search)".into(),
                    ),
                    mime_type: Some("text/plain".into()),
                    icons: None,
                },
            },
            ResourceTemplate {
                annotations: None,
                raw: RawResourceTemplate {
                    uri_template: "stays://quote/{id}/{check_in}/{check_out}".into(),
                    name: "Stay Quote".into(),
                    title: Some("Stay quote".into()),
                    description: Some(
                        "Price breakdown for a property and date range (fetched via stays_quote)"
                            .into(),
                    ),
                    mime_type: Some("text/plain".into()),
                    icons: None,
                },
            },
        ];
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match self.resources.get(&request.uri).await {
            Some(entry) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(entry.text, request.uri)],
            }),
            None => Err(McpError::resource_not_found(
                format!("resource not found: {}", request.uri),
                None,
            )),
        }
    }
}
