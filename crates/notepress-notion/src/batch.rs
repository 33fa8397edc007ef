use notepress_engine::Document;
use notepress_engine::limits::MAX_BLOCKS_PER_BATCH;
use serde_json::Value;

use crate::client::NotionApi;
use crate::error::DeliveryError;
use crate::wire::blocks_to_json;

/// The document sliced into per-call chunks, order preserved.
///
/// The first chunk rides the create-page call; every later chunk is one
/// append call. Concatenating the chunks reproduces the document.
#[derive(Debug)]
pub struct BatchPlan {
    chunks: Vec<Vec<Value>>,
}

impl BatchPlan {
    pub fn new(document: Document) -> Self {
        let blocks: Vec<_> = document.into_iter().collect();
        let chunks = blocks
            .chunks(MAX_BLOCKS_PER_BATCH)
            .map(blocks_to_json)
            .collect();
        Self { chunks }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &[Vec<Value>] {
        &self.chunks
    }
}

/// Where a delivery stands. Drives the create-then-append sequence and
/// is what partial-failure reporting reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryState {
    NotStarted,
    PageCreated,
    /// Currently sending chunk `i` (zero-based into the plan).
    Appending(usize),
    Done,
    Failed(FailedStage),
}

/// The call that broke a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedStage {
    Create,
    /// Index of the chunk whose append call failed.
    Append(usize),
}

/// A fully delivered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredPage {
    pub page_id: String,
    pub url: Option<String>,
    pub chunks_sent: usize,
}

/// One delivery attempt: a plan walked through the state machine once.
///
/// Chunks go out strictly in order; an append only starts after the
/// previous call confirmed, since the service does not order concurrent
/// appends. Nothing is retried and nothing is rolled back here: on
/// failure the state freezes at the failed stage and the error carries
/// the created page id and confirmed chunk count.
pub struct Delivery<'a> {
    api: &'a dyn NotionApi,
    plan: BatchPlan,
    state: DeliveryState,
}

impl<'a> Delivery<'a> {
    pub fn new(api: &'a dyn NotionApi, document: Document) -> Self {
        Self {
            api,
            plan: BatchPlan::new(document),
            state: DeliveryState::NotStarted,
        }
    }

    pub fn state(&self) -> &DeliveryState {
        &self.state
    }

    pub fn run(&mut self, parent_id: &str, title: &str) -> Result<DeliveredPage, DeliveryError> {
        let total = self.plan.chunk_count();
        let first = self.plan.chunks.first().map(Vec::as_slice).unwrap_or(&[]);

        tracing::info!(total_chunks = total, title, "creating page");
        let created = match self.api.create_page(parent_id, title, first) {
            Ok(created) => created,
            Err(source) => {
                self.state = DeliveryState::Failed(FailedStage::Create);
                return Err(DeliveryError::CreateFailed { source });
            }
        };
        self.state = DeliveryState::PageCreated;

        for (i, chunk) in self.plan.chunks.iter().enumerate().skip(1) {
            self.state = DeliveryState::Appending(i);
            tracing::info!(chunk = i, total_chunks = total, "appending chunk");
            if let Err(source) = self.api.append_children(&created.page_id, chunk) {
                self.state = DeliveryState::Failed(FailedStage::Append(i));
                return Err(DeliveryError::AppendFailed {
                    page_id: created.page_id,
                    appended_chunks: i,
                    total_chunks: total,
                    source,
                });
            }
        }

        self.state = DeliveryState::Done;
        Ok(DeliveredPage {
            page_id: created.page_id,
            url: created.url,
            chunks_sent: total,
        })
    }
}

/// Convenience wrapper for the common one-shot case.
pub fn deliver(
    api: &dyn NotionApi,
    document: Document,
    parent_id: &str,
    title: &str,
) -> Result<DeliveredPage, DeliveryError> {
    Delivery::new(api, document).run(parent_id, title)
}
