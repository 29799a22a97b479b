use shared::{
    domain::{CustomerId, VehicleId},
    protocol::Vehicle,
};

use crate::{error::ServiceResult, transport::ApiTransport, validation::VehicleDraft};

#[derive(Debug, Clone)]
pub struct VehicleService {
    transport: ApiTransport,
}

impl VehicleService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Vehicle>> {
        self.transport
            .get("/api/vehicles", "Failed to load vehicles")
            .await
    }

    pub async fn get(&self, id: VehicleId) -> ServiceResult<Vehicle> {
        self.transport
            .get(&format!("/api/vehicles/{id}"), "Failed to load vehicle")
            .await
    }

    pub async fn list_by_customer(&self, customer_id: CustomerId) -> ServiceResult<Vec<Vehicle>> {
        self.transport
            .get(
                &format!("/api/vehicles/customer/{customer_id}"),
                "Failed to load your vehicles",
            )
            .await
    }

    pub async fn register(&self, draft: &VehicleDraft) -> ServiceResult<Vehicle> {
        let request = draft.validate()?;
        self.transport
            .post("/api/vehicles", &request, "Failed to register vehicle")
            .await
    }

    pub async fn update(&self, id: VehicleId, draft: &VehicleDraft) -> ServiceResult<Vehicle> {
        let request = draft.validate()?;
        self.transport
            .put(
                &format!("/api/vehicles/{id}"),
                &request,
                "Failed to update vehicle",
            )
            .await
    }

    pub async fn delete(&self, id: VehicleId) -> ServiceResult<()> {
        self.transport
            .delete(&format!("/api/vehicles/{id}"), "Failed to delete vehicle")
            .await
    }
}
