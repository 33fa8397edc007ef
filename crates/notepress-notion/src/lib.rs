//! Delivery side of the pipeline: the service wire model, a blocking
//! HTTP client, and the batched create-then-append orchestrator.
//!
//! Everything here consumes a validated
//! [`Document`](notepress_engine::Document); nothing here parses or
//! re-chunks content. Failures carry resume state (created page id,
//! confirmed chunk count) but are never retried internally.

pub mod batch;
pub mod client;
pub mod error;
pub mod wire;

pub use batch::{BatchPlan, DeliveredPage, Delivery, DeliveryState, FailedStage, deliver};
pub use client::{CreatedPage, HttpNotionClient, NOTION_VERSION, NotionApi};
pub use error::{ApiError, DeliveryError};
pub use wire::{block_to_json, blocks_to_json};
