//! Report module - validates a generation request, renders the PDF and
//! hands it to the delivery notifier.

pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod validation;

pub use error::ReportError;
