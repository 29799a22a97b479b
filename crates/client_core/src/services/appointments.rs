use shared::{
    domain::{AppointmentId, AppointmentStatus, CustomerId, TechnicianId},
    envelope::{PageResponse, Paginated},
    protocol::{Appointment, AssignTechnicianRequest, UpdateAppointmentStatusRequest},
};

use super::PageQuery;
use crate::{error::ServiceResult, transport::ApiTransport, validation::AppointmentDraft};

#[derive(Debug, Clone)]
pub struct AppointmentService {
    transport: ApiTransport,
}

impl AppointmentService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self, page: u32, size: u32) -> ServiceResult<Paginated<Appointment>> {
        let page: PageResponse<Appointment> = self
            .transport
            .get_with_query(
                "/api/appointments",
                &PageQuery { page, size },
                "Failed to load appointments",
            )
            .await?;
        Ok(page.into())
    }

    pub async fn get(&self, id: AppointmentId) -> ServiceResult<Appointment> {
        self.transport
            .get(
                &format!("/api/appointments/{id}"),
                "Failed to load appointment details",
            )
            .await
    }

    pub async fn list_by_customer(&self, customer_id: CustomerId) -> ServiceResult<Vec<Appointment>> {
        self.transport
            .get(
                &format!("/api/appointments/customer/{customer_id}"),
                "Failed to load your appointments",
            )
            .await
    }

    pub async fn list_by_technician(
        &self,
        technician_id: TechnicianId,
    ) -> ServiceResult<Vec<Appointment>> {
        self.transport
            .get(
                &format!("/api/appointments/technician/{technician_id}"),
                "Failed to load assigned appointments",
            )
            .await
    }

    pub async fn book(&self, draft: &AppointmentDraft) -> ServiceResult<Appointment> {
        let request = draft.validate()?;
        self.transport
            .post("/api/appointments", &request, "Failed to book appointment")
            .await
    }

    /// Sends the new status as-is; legality of the transition is the
    /// backend's call.
    pub async fn update_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> ServiceResult<Appointment> {
        self.transport
            .put(
                &format!("/api/appointments/{id}/status"),
                &UpdateAppointmentStatusRequest { status },
                "Failed to update appointment status",
            )
            .await
    }

    pub async fn assign_technician(
        &self,
        id: AppointmentId,
        technician_id: TechnicianId,
    ) -> ServiceResult<Appointment> {
        self.transport
            .put(
                &format!("/api/appointments/{id}/assign"),
                &AssignTechnicianRequest { technician_id },
                "Failed to assign technician",
            )
            .await
    }

    pub async fn cancel(&self, id: AppointmentId) -> ServiceResult<Appointment> {
        self.transport
            .put_empty(
                &format!("/api/appointments/{id}/cancel"),
                "Failed to cancel appointment",
            )
            .await
    }
}
