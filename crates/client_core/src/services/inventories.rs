use shared::{
    domain::{CenterId, InventoryId},
    envelope::{PageResponse, Paginated},
    protocol::Inventory,
};
use tracing::debug;

use super::PageQuery;
use crate::{error::ServiceResult, transport::ApiTransport, validation::InventoryDraft};

#[derive(Debug, Clone)]
pub struct InventoryService {
    transport: ApiTransport,
}

impl InventoryService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self, page: u32, size: u32) -> ServiceResult<Paginated<Inventory>> {
        let page: PageResponse<Inventory> = self
            .transport
            .get_with_query(
                "/api/inventories",
                &PageQuery { page, size },
                "Failed to load inventory",
            )
            .await?;
        Ok(page.into())
    }

    /// Walks every server page in order until the last one.
    pub async fn list_all(&self, page_size: u32) -> ServiceResult<Vec<Inventory>> {
        let page_size = page_size.max(1);
        let mut rows = Vec::new();
        let mut page = 0;
        loop {
            let batch = self.list(page, page_size).await?;
            let done = batch.pagination.last
                || batch.data.is_empty()
                || page + 1 >= batch.pagination.total_pages;
            rows.extend(batch.data);
            if done {
                break;
            }
            page += 1;
        }
        debug!("inventory: fetched rows={} pages={}", rows.len(), page + 1);
        Ok(rows)
    }

    pub async fn list_by_center(&self, center_id: CenterId) -> ServiceResult<Vec<Inventory>> {
        self.transport
            .get(
                &format!("/api/inventories/center/{center_id}"),
                "Failed to load center inventory",
            )
            .await
    }

    pub async fn low_stock(&self) -> ServiceResult<Vec<Inventory>> {
        self.transport
            .get("/api/inventories/low-stock", "Failed to load low stock parts")
            .await
    }

    pub async fn create(&self, draft: &InventoryDraft) -> ServiceResult<Inventory> {
        let request = draft.validate()?;
        self.transport
            .post("/api/inventories", &request, "Failed to add inventory")
            .await
    }

    pub async fn update(&self, id: InventoryId, draft: &InventoryDraft) -> ServiceResult<Inventory> {
        let request = draft.validate()?;
        self.transport
            .put(
                &format!("/api/inventories/{id}"),
                &request,
                "Failed to update inventory",
            )
            .await
    }

    pub async fn delete(&self, id: InventoryId) -> ServiceResult<()> {
        self.transport
            .delete(&format!("/api/inventories/{id}"), "Failed to delete inventory")
            .await
    }
}
