//! Typed client for the EV maintenance service backend.
//!
//! Every call goes through [`transport::ApiTransport`], which unwraps the
//! `{code, message, result}` envelope into a [`ServiceResult`].

use shared::domain::{AppointmentStatus, VehicleModelId};

pub mod config;
pub mod error;
pub mod listing;
pub mod milestone;
pub mod services;
pub mod transport;
pub mod validation;

pub use config::{load_settings, AppEnv, ClientSettings, ConfigError};
pub use error::{ServiceError, ServiceResponse, ServiceResult};
pub use milestone::{MilestoneGroup, MilestoneWorkflow, PackageItemApi};
pub use transport::ApiTransport;

use services::{
    AppointmentService, CenterService, CustomerService, InventoryService, InvoiceService,
    PackageItemService, PaymentService, ReportService, ServiceItemService, SparePartService,
    StaffService, TechnicianService, VehicleModelService, VehicleService,
};

/// Entry point handing out one service per backend resource. Services share
/// the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    transport: ApiTransport,
}

impl ServiceClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ConfigError> {
        Ok(Self::new(ApiTransport::from_settings(settings)?))
    }

    pub fn transport(&self) -> &ApiTransport {
        &self.transport
    }

    pub fn appointments(&self) -> AppointmentService {
        AppointmentService::new(self.transport.clone())
    }

    pub fn vehicles(&self) -> VehicleService {
        VehicleService::new(self.transport.clone())
    }

    pub fn vehicle_models(&self) -> VehicleModelService {
        VehicleModelService::new(self.transport.clone())
    }

    pub fn package_items(&self) -> PackageItemService {
        PackageItemService::new(self.transport.clone())
    }

    pub fn spare_parts(&self) -> SparePartService {
        SparePartService::new(self.transport.clone())
    }

    pub fn inventories(&self) -> InventoryService {
        InventoryService::new(self.transport.clone())
    }

    pub fn service_items(&self) -> ServiceItemService {
        ServiceItemService::new(self.transport.clone())
    }

    pub fn centers(&self) -> CenterService {
        CenterService::new(self.transport.clone())
    }

    pub fn customers(&self) -> CustomerService {
        CustomerService::new(self.transport.clone())
    }

    pub fn staffs(&self) -> StaffService {
        StaffService::new(self.transport.clone())
    }

    pub fn technicians(&self) -> TechnicianService {
        TechnicianService::new(self.transport.clone())
    }

    pub fn invoices(&self) -> InvoiceService {
        InvoiceService::new(self.transport.clone())
    }

    pub fn payments(&self) -> PaymentService {
        PaymentService::new(self.transport.clone())
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.transport.clone())
    }

    /// Milestone editor for one model, backed by the package-item endpoints.
    pub fn milestones(&self, model_id: VehicleModelId) -> MilestoneWorkflow<PackageItemService> {
        MilestoneWorkflow::new(self.package_items(), model_id)
    }
}

/// Actions a front end offers for an appointment in the given status. The
/// backend still decides whether the transition is allowed.
pub fn appointment_actions(status: AppointmentStatus) -> Vec<AppointmentStatus> {
    let mut actions = match status {
        AppointmentStatus::Pending => vec![AppointmentStatus::Confirmed],
        AppointmentStatus::Confirmed => vec![AppointmentStatus::InProgress],
        AppointmentStatus::InProgress | AppointmentStatus::CustomerApproved => {
            vec![AppointmentStatus::Completed]
        }
        _ => Vec::new(),
    };
    if status.offers_cancel() {
        actions.push(AppointmentStatus::Cancelled);
    }
    actions
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
