//! One service per backend resource. Every method maps to exactly one
//! endpoint and goes through [`ApiTransport`](crate::transport::ApiTransport).

mod appointments;
mod catalog;
mod centers;
mod inventories;
mod package_items;
mod payments;
mod people;
mod reports;
mod vehicles;

pub use appointments::AppointmentService;
pub use catalog::{ServiceItemService, SparePartService, VehicleModelService};
pub use centers::CenterService;
pub use inventories::InventoryService;
pub use package_items::PackageItemService;
pub use payments::{InvoiceService, PaymentService};
pub use people::{CustomerService, StaffService, TechnicianService};
pub use reports::{ReportPeriod, ReportService};
pub use vehicles::VehicleService;

#[derive(serde::Serialize)]
struct PageQuery {
    page: u32,
    size: u32,
}
