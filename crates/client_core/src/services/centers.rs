use shared::{
    domain::CenterId,
    envelope::{PageResponse, Paginated},
    protocol::ServiceCenter,
};

use super::PageQuery;
use crate::{error::ServiceResult, transport::ApiTransport, validation::ServiceCenterDraft};

#[derive(Debug, Clone)]
pub struct CenterService {
    transport: ApiTransport,
}

impl CenterService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// Server-paginated listing; `page` is zero-based.
    pub async fn list(&self, page: u32, size: u32) -> ServiceResult<Paginated<ServiceCenter>> {
        let page: PageResponse<ServiceCenter> = self
            .transport
            .get_with_query(
                "/api/service-centers",
                &PageQuery { page, size },
                "Failed to load service centers",
            )
            .await?;
        Ok(page.into())
    }

    pub async fn get(&self, id: CenterId) -> ServiceResult<ServiceCenter> {
        self.transport
            .get(
                &format!("/api/service-centers/{id}"),
                "Failed to load service center",
            )
            .await
    }

    pub async fn create(&self, draft: &ServiceCenterDraft) -> ServiceResult<ServiceCenter> {
        let request = draft.validate()?;
        self.transport
            .post(
                "/api/service-centers",
                &request,
                "Failed to create service center",
            )
            .await
    }

    pub async fn update(
        &self,
        id: CenterId,
        draft: &ServiceCenterDraft,
    ) -> ServiceResult<ServiceCenter> {
        let request = draft.validate()?;
        self.transport
            .put(
                &format!("/api/service-centers/{id}"),
                &request,
                "Failed to update service center",
            )
            .await
    }

    pub async fn delete(&self, id: CenterId) -> ServiceResult<()> {
        self.transport
            .delete(
                &format!("/api/service-centers/{id}"),
                "Failed to delete service center",
            )
            .await
    }
}
