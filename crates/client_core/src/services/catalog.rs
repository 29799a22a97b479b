use shared::{
    domain::{ServiceItemId, SparePartId, VehicleModelId},
    protocol::{ServiceItem, SparePart, VehicleModel},
};

use crate::{
    error::ServiceResult,
    transport::ApiTransport,
    validation::{ServiceItemDraft, SparePartDraft, VehicleModelDraft},
};

#[derive(Debug, Clone)]
pub struct VehicleModelService {
    transport: ApiTransport,
}

impl VehicleModelService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> ServiceResult<Vec<VehicleModel>> {
        self.transport
            .get("/api/vehicleModel", "Failed to load vehicle models")
            .await
    }

    pub async fn get(&self, id: VehicleModelId) -> ServiceResult<VehicleModel> {
        self.transport
            .get(&format!("/api/vehicleModel/{id}"), "Failed to load vehicle model")
            .await
    }

    pub async fn create(&self, draft: &VehicleModelDraft) -> ServiceResult<VehicleModel> {
        let request = draft.validate()?;
        self.transport
            .post("/api/vehicleModel", &request, "Failed to create vehicle model")
            .await
    }

    pub async fn update(
        &self,
        id: VehicleModelId,
        draft: &VehicleModelDraft,
    ) -> ServiceResult<VehicleModel> {
        let request = draft.validate()?;
        self.transport
            .put(
                &format!("/api/vehicleModel/{id}"),
                &request,
                "Failed to update vehicle model",
            )
            .await
    }

    pub async fn delete(&self, id: VehicleModelId) -> ServiceResult<()> {
        self.transport
            .delete(
                &format!("/api/vehicleModel/{id}"),
                "Failed to delete vehicle model",
            )
            .await
    }
}

#[derive(Debug, Clone)]
pub struct SparePartService {
    transport: ApiTransport,
}

impl SparePartService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> ServiceResult<Vec<SparePart>> {
        self.transport
            .get("/api/spareParts", "Failed to load spare parts")
            .await
    }

    pub async fn get(&self, id: SparePartId) -> ServiceResult<SparePart> {
        self.transport
            .get(&format!("/api/spareParts/{id}"), "Failed to load spare part")
            .await
    }

    pub async fn create(&self, draft: &SparePartDraft) -> ServiceResult<SparePart> {
        let request = draft.validate()?;
        self.transport
            .post("/api/spareParts", &request, "Failed to create spare part")
            .await
    }

    pub async fn update(&self, id: SparePartId, draft: &SparePartDraft) -> ServiceResult<SparePart> {
        let request = draft.validate()?;
        self.transport
            .put(
                &format!("/api/spareParts/{id}"),
                &request,
                "Failed to update spare part",
            )
            .await
    }

    pub async fn delete(&self, id: SparePartId) -> ServiceResult<()> {
        self.transport
            .delete(&format!("/api/spareParts/{id}"), "Failed to delete spare part")
            .await
    }
}

#[derive(Debug, Clone)]
pub struct ServiceItemService {
    transport: ApiTransport,
}

impl ServiceItemService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> ServiceResult<Vec<ServiceItem>> {
        self.transport
            .get("/api/serviceItem", "Failed to load service items")
            .await
    }

    pub async fn get(&self, id: ServiceItemId) -> ServiceResult<ServiceItem> {
        self.transport
            .get(&format!("/api/serviceItem/{id}"), "Failed to load service item")
            .await
    }

    pub async fn create(&self, draft: &ServiceItemDraft) -> ServiceResult<ServiceItem> {
        let request = draft.validate()?;
        self.transport
            .post("/api/serviceItem", &request, "Failed to create service item")
            .await
    }

    pub async fn update(
        &self,
        id: ServiceItemId,
        draft: &ServiceItemDraft,
    ) -> ServiceResult<ServiceItem> {
        let request = draft.validate()?;
        self.transport
            .put(
                &format!("/api/serviceItem/{id}"),
                &request,
                "Failed to update service item",
            )
            .await
    }

    pub async fn delete(&self, id: ServiceItemId) -> ServiceResult<()> {
        self.transport
            .delete(
                &format!("/api/serviceItem/{id}"),
                "Failed to delete service item",
            )
            .await
    }
}
