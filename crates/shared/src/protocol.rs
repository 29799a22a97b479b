use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ActionType, AppointmentId, AppointmentStatus, CenterId, CustomerId, InventoryId, InvoiceId,
    InvoiceStatus, MaintenanceRecordId, PackageItemId, ServiceItemId, SparePartId, StaffId,
    StaffRole, TechnicianId, VehicleId, VehicleModelId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(default)]
    pub appointment_date: Option<NaiveDateTime>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<VehicleId>,
    #[serde(default)]
    pub license_plate: Option<String>,
    #[serde(default)]
    pub center_id: Option<CenterId>,
    #[serde(default)]
    pub center_name: Option<String>,
    #[serde(default)]
    pub technician_id: Option<TechnicianId>,
    #[serde(default)]
    pub technician_name: Option<String>,
    #[serde(default)]
    pub service_items: Vec<ServiceItem>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub customer_id: CustomerId,
    pub vehicle_id: VehicleId,
    pub center_id: CenterId,
    pub appointment_date: NaiveDateTime,
    pub service_item_ids: Vec<ServiceItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTechnicianRequest {
    pub technician_id: TechnicianId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub license_plate: String,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub current_km: Option<u32>,
    #[serde(default)]
    pub purchase_year: Option<i32>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub model_id: Option<VehicleModelId>,
    #[serde(default)]
    pub model_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub license_plate: String,
    pub vin: String,
    pub current_km: u32,
    pub purchase_year: i32,
    pub customer_id: CustomerId,
    pub model_id: VehicleModelId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleModel {
    pub id: VehicleModelId,
    pub model_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub battery_capacity: Option<f64>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleModelRequest {
    pub model_name: String,
    pub brand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// One row of a model's maintenance plan: a service item due at a milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPackageItem {
    pub id: PackageItemId,
    pub model_id: VehicleModelId,
    pub service_item_id: ServiceItemId,
    #[serde(default)]
    pub service_item_name: Option<String>,
    pub milestone_km: u32,
    #[serde(default)]
    pub milestone_month: Option<u32>,
    #[serde(default)]
    pub price: f64,
    pub action_type: ActionType,
    #[serde(default)]
    pub spare_part_id: Option<SparePartId>,
    #[serde(default)]
    pub spare_part_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPackageItemRequest {
    pub model_id: VehicleModelId,
    pub service_item_id: ServiceItemId,
    pub milestone_km: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_month: Option<u32>,
    pub price: f64,
    pub action_type: ActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spare_part_id: Option<SparePartId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl From<&ModelPackageItem> for ModelPackageItemRequest {
    fn from(item: &ModelPackageItem) -> Self {
        Self {
            model_id: item.model_id,
            service_item_id: item.service_item_id,
            milestone_km: item.milestone_km,
            milestone_month: item.milestone_month,
            price: item.price,
            action_type: item.action_type,
            spare_part_id: item.spare_part_id,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameMilestoneRequest {
    pub new_milestone_km: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_milestone_month: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparePart {
    pub id: SparePartId,
    #[serde(default)]
    pub part_number: Option<String>,
    pub name: String,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparePartRequest {
    pub part_number: String,
    pub name: String,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: InventoryId,
    pub center_id: CenterId,
    #[serde(default)]
    pub center_name: Option<String>,
    pub spare_part_id: SparePartId,
    #[serde(default)]
    pub spare_part_name: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub minimum_threshold: i64,
}

impl Inventory {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.minimum_threshold
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRequest {
    pub center_id: CenterId,
    pub spare_part_id: SparePartId,
    pub quantity: i64,
    pub minimum_threshold: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: ServiceItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItemRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCenter {
    pub id: CenterId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCenterRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateRequest {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: StaffId,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: StaffRole,
    #[serde(default)]
    pub center_id: Option<CenterId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: StaffRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_id: Option<CenterId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: TechnicianId,
    pub full_name: String,
    #[serde(default)]
    pub center_id: Option<CenterId>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    #[serde(default)]
    pub maintenance_record_id: Option<MaintenanceRecordId>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    pub total_amount: f64,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub issued_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterRevenue {
    pub center_id: CenterId,
    #[serde(default)]
    pub center_name: Option<String>,
    pub revenue: f64,
    #[serde(default)]
    pub appointment_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_revenue: f64,
    #[serde(default)]
    pub centers: Vec<CenterRevenue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartUsage {
    pub spare_part_id: SparePartId,
    #[serde(default)]
    pub spare_part_name: Option<String>,
    pub quantity_used: u64,
    #[serde(default)]
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: AppointmentStatus,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub invoice_id: InvoiceId,
    /// Amount in VND; the gateway works in whole units.
    pub amount: u64,
    pub order_info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRedirect {
    pub payment_url: String,
    #[serde(default)]
    pub transaction_ref: Option<String>,
}
