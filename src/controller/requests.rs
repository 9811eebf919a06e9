//! Server requests issued by the controller and the events they produce.

use crate::server::{
    Created, Labels, Outcome, Product, ProductList, ServerConnection, BARCODE_LABELS,
    PRODUCT_LABELS, SUBMIT_COMMENT_LABELS, SUBMIT_PRODUCT_LABELS,
};

/// One request to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    BarcodeInfo {
        barcode: String,
    },
    ProductInfo {
        product_id: String,
    },
    SubmitProduct {
        barcode: String,
        name: String,
    },
    SubmitComment {
        product_id: String,
        by: String,
        comment: String,
    },
}

impl Request {
    pub fn labels(&self) -> Labels {
        match self {
            Request::BarcodeInfo { .. } => BARCODE_LABELS,
            Request::ProductInfo { .. } => PRODUCT_LABELS,
            Request::SubmitProduct { .. } => SUBMIT_PRODUCT_LABELS,
            Request::SubmitComment { .. } => SUBMIT_COMMENT_LABELS,
        }
    }

    /// Issue the request and wait for its outcome
    pub async fn send(self, server: &ServerConnection) -> Response {
        match self {
            Request::BarcodeInfo { barcode } => {
                let outcome = server.request_barcode_info(&barcode).await;
                Response::BarcodeInfo { barcode, outcome }
            }
            Request::ProductInfo { product_id } => {
                Response::ProductInfo(server.request_product_info(&product_id).await)
            }
            Request::SubmitProduct { barcode, name } => {
                Response::ProductSubmitted(server.submit_product(&barcode, &name).await)
            }
            Request::SubmitComment {
                product_id,
                by,
                comment,
            } => {
                let outcome = server.submit_comment(&product_id, &by, &comment).await;
                Response::CommentSubmitted {
                    product_id,
                    outcome,
                }
            }
        }
    }
}

/// Outcome of a [`Request`], with whatever the continuation needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    BarcodeInfo {
        barcode: String,
        outcome: Outcome<ProductList>,
    },
    ProductInfo(Outcome<Product>),
    ProductSubmitted(Outcome<Created>),
    CommentSubmitted {
        product_id: String,
        outcome: Outcome<()>,
    },
}

/// A response delivered back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEvent {
    /// Navigation epoch at the time the request was issued
    pub epoch: u64,
    pub response: Response,
}

/// A request that has been announced to the user but not yet sent.
///
/// Owns a copy of the connection, so it can be moved onto the runtime
/// without borrowing the controller.
#[derive(Debug, Clone)]
pub struct Dispatch {
    epoch: u64,
    request: Request,
    server: ServerConnection,
}

impl Dispatch {
    pub(crate) fn new(epoch: u64, request: Request, server: ServerConnection) -> Self {
        Self {
            epoch,
            request,
            server,
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub async fn run(self) -> ServerEvent {
        let response = self.request.send(&self.server).await;
        ServerEvent {
            epoch: self.epoch,
            response,
        }
    }
}
