use shared::{
    domain::{CenterId, CustomerId, StaffId},
    protocol::{Customer, Staff, Technician},
};

use crate::{
    error::ServiceResult,
    transport::ApiTransport,
    validation::{CustomerDraft, StaffDraft},
};

#[derive(Debug, Clone)]
pub struct CustomerService {
    transport: ApiTransport,
}

impl CustomerService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Customer>> {
        self.transport
            .get("/api/customers", "Failed to load customers")
            .await
    }

    pub async fn get(&self, id: CustomerId) -> ServiceResult<Customer> {
        self.transport
            .get(&format!("/api/customers/{id}"), "Failed to load customer")
            .await
    }

    pub async fn update(&self, id: CustomerId, draft: &CustomerDraft) -> ServiceResult<Customer> {
        let request = draft.validate()?;
        self.transport
            .put(
                &format!("/api/customers/{id}"),
                &request,
                "Failed to update customer",
            )
            .await
    }

    pub async fn delete(&self, id: CustomerId) -> ServiceResult<()> {
        self.transport
            .delete(&format!("/api/customers/{id}"), "Failed to delete customer")
            .await
    }
}

#[derive(Debug, Clone)]
pub struct StaffService {
    transport: ApiTransport,
}

impl StaffService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Staff>> {
        self.transport
            .get("/api/staffs", "Failed to load employees")
            .await
    }

    pub async fn get(&self, id: StaffId) -> ServiceResult<Staff> {
        self.transport
            .get(&format!("/api/staffs/{id}"), "Failed to load employee")
            .await
    }

    pub async fn create(&self, draft: &StaffDraft) -> ServiceResult<Staff> {
        let request = draft.validate()?;
        self.transport
            .post("/api/staffs", &request, "Failed to create employee")
            .await
    }

    pub async fn update(&self, id: StaffId, draft: &StaffDraft) -> ServiceResult<Staff> {
        let request = draft.validate()?;
        self.transport
            .put(
                &format!("/api/staffs/{id}"),
                &request,
                "Failed to update employee",
            )
            .await
    }

    pub async fn delete(&self, id: StaffId) -> ServiceResult<()> {
        self.transport
            .delete(&format!("/api/staffs/{id}"), "Failed to delete employee")
            .await
    }
}

#[derive(Debug, Clone)]
pub struct TechnicianService {
    transport: ApiTransport,
}

impl TechnicianService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Technician>> {
        self.transport
            .get("/api/technicians", "Failed to load technicians")
            .await
    }

    pub async fn list_by_center(&self, center_id: CenterId) -> ServiceResult<Vec<Technician>> {
        self.transport
            .get(
                &format!("/api/technicians/center/{center_id}"),
                "Failed to load center technicians",
            )
            .await
    }
}
