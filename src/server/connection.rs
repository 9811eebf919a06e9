use super::cleanup::read_storage_response;
use super::models::{Created, Product, ProductList};
use super::outcome::{Labels, Outcome, ServerError};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::form_urlencoded;
use url::Url;

const BARCODES_PATH: &str = "barcodes";
const PRODUCTS_PATH: &str = "products";
const COMMENTS_PATH: &str = "comments";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const BARCODE_LABELS: Labels = Labels {
    delay: "Requesting info...",
    found: "Product found",
    missing: "No data available",
};

pub const PRODUCT_LABELS: Labels = Labels {
    delay: "Requesting info...",
    found: "Product found",
    missing: "No data available",
};

pub const SUBMIT_PRODUCT_LABELS: Labels = Labels {
    delay: "Submitting product...",
    found: "Product submitted",
    missing: "No data available",
};

pub const SUBMIT_COMMENT_LABELS: Labels = Labels {
    delay: "Submitting comment...",
    found: "Comment submitted",
    missing: "No data available",
};

/// Client for the Barcode Agent server.
///
/// Every request produces exactly one [`Outcome`]. Requests are not retried
/// and carry no timeout of their own.
#[derive(Debug, Clone)]
pub struct ServerConnection {
    http_client: Client,
    base_url: Url,
}

impl ServerConnection {
    /// Create a connection to the server at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ServerError> {
        Ok(Self {
            http_client: Client::new(),
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Point the connection at another server. In-flight requests keep
    /// talking to the old one.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<(), ServerError> {
        self.base_url = parse_base_url(base_url)?;
        info!("Server URL set to {}", self.base_url);
        Ok(())
    }

    /// URL of the lookup resource for `barcode`
    pub fn barcode_url(&self, barcode: &str) -> Result<Url, ServerError> {
        self.endpoint(&[BARCODES_PATH, barcode])
    }

    pub fn products_url(&self) -> Result<Url, ServerError> {
        self.endpoint(&[PRODUCTS_PATH])
    }

    pub fn product_url(&self, product_id: &str) -> Result<Url, ServerError> {
        self.endpoint(&[PRODUCTS_PATH, product_id])
    }

    pub fn comments_url(&self, product_id: &str) -> Result<Url, ServerError> {
        self.endpoint(&[PRODUCTS_PATH, product_id, COMMENTS_PATH])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServerError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServerError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Look up the products carrying `barcode`.
    ///
    /// An empty barcode fails without issuing a request.
    pub async fn request_barcode_info(&self, barcode: &str) -> Outcome<ProductList> {
        if barcode.is_empty() {
            return Outcome::Failed(ServerError::MissingBarcode);
        }

        let url = match self.barcode_url(barcode) {
            Ok(url) => url,
            Err(err) => return Outcome::Failed(err),
        };
        info!("Requesting info from {}", url);
        decode(self.execute(self.http_client.get(url)).await)
    }

    /// Fetch a single product with its comments
    pub async fn request_product_info(&self, product_id: &str) -> Outcome<Product> {
        let url = match self.product_url(product_id) {
            Ok(url) => url,
            Err(err) => return Outcome::Failed(err),
        };
        info!("Requesting product info from {}", url);
        decode(self.execute(self.http_client.get(url)).await)
    }

    /// Create a product. The outcome carries the id assigned by the server.
    pub async fn submit_product(&self, barcode: &str, name: &str) -> Outcome<Created> {
        let url = match self.products_url() {
            Ok(url) => url,
            Err(err) => return Outcome::Failed(err),
        };
        info!("Submitting product {} ({}) to {}", name, barcode, url);

        let body = encode_form(&[("barcode", barcode), ("name", name)]);
        let request = self
            .http_client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        decode(self.execute(request).await)
    }

    /// Add a comment written by `by` to a product
    pub async fn submit_comment(&self, product_id: &str, by: &str, comment: &str) -> Outcome<()> {
        let url = match self.comments_url(product_id) {
            Ok(url) => url,
            Err(err) => return Outcome::Failed(err),
        };
        info!("Submitting comment by {} to {}", by, url);

        let body = encode_form(&[("by", by), ("comment", comment)]);
        let request = self
            .http_client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        self.execute(request).await.map(|_| ())
    }

    /// Send a request and classify its status. The body is only read for
    /// successful responses.
    async fn execute(&self, request: RequestBuilder) -> Outcome<String> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("Request failed before a response arrived: {}", err);
                return Outcome::Failed(ServerError::NetworkUnreachable {
                    detail: err.to_string(),
                });
            }
        };

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Outcome::from_status(status.as_u16(), || Ok(String::new()));
        }

        match response.text().await {
            Ok(text) => Outcome::Found(text),
            Err(err) => Outcome::Failed(ServerError::InvalidBody(err.to_string())),
        }
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ServerError> {
    let url = Url::parse(base_url.trim()).map_err(|_| ServerError::InvalidUrl(base_url.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ServerError::InvalidUrl(base_url.to_string()));
    }
    Ok(url)
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

fn decode<T: DeserializeOwned>(outcome: Outcome<String>) -> Outcome<T> {
    match outcome {
        Outcome::Found(body) => match parse_body(&body) {
            Ok(value) => Outcome::Found(value),
            Err(err) => Outcome::Failed(err),
        },
        Outcome::Missing => Outcome::Missing,
        Outcome::Failed(err) => Outcome::Failed(err),
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ServerError> {
    let value = read_storage_response(body).map_err(|e| ServerError::InvalidBody(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| ServerError::InvalidBody(e.to_string()))
}
