//! Connection to the Barcode Agent server.

pub mod cleanup;
pub mod connection;
pub mod models;
pub mod outcome;

pub use cleanup::{clean_storage_ids, read_storage_response};
pub use connection::{
    ServerConnection, BARCODE_LABELS, PRODUCT_LABELS, SUBMIT_COMMENT_LABELS, SUBMIT_PRODUCT_LABELS,
};
pub use models::{Comment, Created, Product, ProductList};
pub use outcome::{Labels, Outcome, ServerError, StatusClass};
