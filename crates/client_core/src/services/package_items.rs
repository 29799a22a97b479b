use async_trait::async_trait;
use serde::de::IgnoredAny;
use shared::{
    domain::{PackageItemId, VehicleModelId},
    protocol::{ModelPackageItem, ModelPackageItemRequest, RenameMilestoneRequest},
};

use crate::{
    error::ServiceResult, milestone::PackageItemApi, transport::ApiTransport,
    validation::validate_package_item,
};

#[derive(Debug, Clone)]
pub struct PackageItemService {
    transport: ApiTransport,
}

impl PackageItemService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list_by_model(&self, model_id: VehicleModelId) -> ServiceResult<Vec<ModelPackageItem>> {
        self.transport
            .get(
                &format!("/api/model-package-items/model/{model_id}"),
                "Failed to load maintenance packages",
            )
            .await
    }

    /// Total price of every row at one milestone, computed by the backend.
    pub async fn milestone_total(&self, model_id: VehicleModelId, milestone_km: u32) -> ServiceResult<f64> {
        self.transport
            .get(
                &format!("/api/model-package-items/model/{model_id}/milestone/{milestone_km}/total-price"),
                "Failed to load package total",
            )
            .await
    }

    pub async fn create(&self, request: &ModelPackageItemRequest) -> ServiceResult<ModelPackageItem> {
        validate_package_item(request)?;
        self.transport
            .post(
                "/api/model-package-items",
                request,
                "Failed to add package item",
            )
            .await
    }

    pub async fn update(
        &self,
        id: PackageItemId,
        request: &ModelPackageItemRequest,
    ) -> ServiceResult<ModelPackageItem> {
        validate_package_item(request)?;
        self.transport
            .put(
                &format!("/api/model-package-items/{id}"),
                request,
                "Failed to update package item",
            )
            .await
    }

    pub async fn delete(&self, id: PackageItemId) -> ServiceResult<()> {
        self.transport
            .delete(
                &format!("/api/model-package-items/{id}"),
                "Failed to delete package item",
            )
            .await
    }

    /// Moves every row of a milestone to a new km/month pair.
    pub async fn rename_milestone(
        &self,
        model_id: VehicleModelId,
        milestone_km: u32,
        request: &RenameMilestoneRequest,
    ) -> ServiceResult<()> {
        self.transport
            .put::<IgnoredAny, _>(
                &format!("/api/model-package-items/model/{model_id}/milestone/{milestone_km}"),
                request,
                "Failed to update milestone",
            )
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl PackageItemApi for PackageItemService {
    async fn list_by_model(&self, model_id: VehicleModelId) -> ServiceResult<Vec<ModelPackageItem>> {
        PackageItemService::list_by_model(self, model_id).await
    }

    async fn milestone_total(&self, model_id: VehicleModelId, milestone_km: u32) -> ServiceResult<f64> {
        PackageItemService::milestone_total(self, model_id, milestone_km).await
    }

    async fn create(&self, request: &ModelPackageItemRequest) -> ServiceResult<ModelPackageItem> {
        PackageItemService::create(self, request).await
    }

    async fn update(
        &self,
        id: PackageItemId,
        request: &ModelPackageItemRequest,
    ) -> ServiceResult<ModelPackageItem> {
        PackageItemService::update(self, id, request).await
    }

    async fn delete(&self, id: PackageItemId) -> ServiceResult<()> {
        PackageItemService::delete(self, id).await
    }

    async fn rename_milestone(
        &self,
        model_id: VehicleModelId,
        milestone_km: u32,
        request: &RenameMilestoneRequest,
    ) -> ServiceResult<()> {
        PackageItemService::rename_milestone(self, model_id, milestone_km, request).await
    }
}
