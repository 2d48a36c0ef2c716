use reqwest::blocking::{Client, Response};

use crate::error::{Result, StoreError};
use crate::models::{parse_products, Product};

// ---------------------------------------------------------------------------
// Internal response handling
// ---------------------------------------------------------------------------

/// Shared logic for building a configured [`Client`] and making requests.
struct BaseClient {
    base_url: String,
    http: Client,
}

impl BaseClient {
    fn new(base_url: &str) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build the full URL for a given endpoint.
    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    fn get(&self, endpoint: &str) -> Result<String> {
        let url = self.url(endpoint);
        tracing::debug!(%url, "GET");
        let resp = self.http.get(url).send()?;
        handle_response(resp)
    }
}

fn handle_response(response: Response) -> Result<String> {
    let status = response.status().as_u16();
    let body = response.text()?;
    check_status(status, body)
}

/// Map a status code and raw body to the body or a [`StoreError`].
fn check_status(status: u16, body: String) -> Result<String> {
    if (200..300).contains(&status) {
        return Ok(body);
    }

    // Non-JSON error bodies leave the message empty.
    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_default();

    match status {
        404 => Err(StoreError::NotFound {
            message: if msg.is_empty() {
                "Not found".into()
            } else {
                msg
            },
        }),
        _ => Err(StoreError::Api {
            status,
            message: if msg.is_empty() {
                format!("HTTP {status}")
            } else {
                msg
            },
        }),
    }
}

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// HTTP access to a storefront API.
///
/// ```no_run
/// use rayna_store::StoreClient;
///
/// let client = StoreClient::new("http://localhost:8080/api").unwrap();
/// for p in client.products().list().unwrap() {
///     println!("{}: {}", p.name, p.display_price());
/// }
/// ```
pub struct StoreClient {
    base: BaseClient,
}

impl StoreClient {
    /// Create a new client for `base_url`, e.g. `http://localhost:8080/api`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: BaseClient::new(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base.base_url
    }

    pub fn products(&self) -> ProductsClient<'_> {
        ProductsClient { base: &self.base }
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub struct ProductsClient<'a> {
    base: &'a BaseClient,
}

impl ProductsClient<'_> {
    /// `GET /products`
    pub fn list(&self) -> Result<Vec<Product>> {
        let body = self.base.get("/products")?;
        parse_products(&body)
    }
}
