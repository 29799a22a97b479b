//! Form checks that run before a create/update request is issued.
//!
//! Drafts hold raw user input (text fields) and turn into the typed request
//! bodies from `shared::protocol` once every field passes.

use chrono::{Datelike, Local, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use shared::{
    domain::{ActionType, CenterId, CustomerId, ServiceItemId, StaffRole, VehicleId, VehicleModelId},
    protocol::{
        CreateAppointmentRequest, CustomerUpdateRequest, InventoryRequest, ModelPackageItemRequest,
        ServiceCenterRequest, ServiceItemRequest, SparePartRequest, StaffRequest,
        VehicleModelRequest, VehicleRequest,
    },
};
use thiserror::Error;

lazy_static! {
    /// Vietnamese plates: 51H-123.45, 30A-12345, 29LD-1234.
    static ref REGEX_LICENSE_PLATE: Regex =
        Regex::new(r"^[0-9]{2}[A-Z]{1,2}[0-9]?-?[0-9]{3,4}\.?[0-9]{0,2}$").unwrap();
    static ref REGEX_VIN: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
    static ref REGEX_PHONE: Regex = Regex::new(r"^(0|\+84)[0-9]{9,10}$").unwrap();
    static ref REGEX_EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

const OLDEST_PURCHASE_YEAR: i32 = 2000;
const MAX_MILESTONE_MONTH: u32 = 240;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn required<'a>(field: &'static str, label: &str, value: &'a str) -> ValidationResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    Ok(trimmed)
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    label: &str,
    value: &str,
) -> ValidationResult<T> {
    required(field, label, value)?
        .parse::<T>()
        .map_err(|_| ValidationError::new(field, format!("{label} must be a valid number")))
}

fn check_phone(field: &'static str, value: &str) -> ValidationResult<String> {
    let phone = required(field, "Phone number", value)?.replace([' ', '.'], "");
    if !REGEX_PHONE.is_match(&phone) {
        return Err(ValidationError::new(field, "Phone number is not valid"));
    }
    Ok(phone)
}

fn check_email(field: &'static str, value: &str) -> ValidationResult<String> {
    let email = required(field, "Email", value)?;
    if !REGEX_EMAIL.is_match(email) {
        return Err(ValidationError::new(field, "Email is not valid"));
    }
    Ok(email.to_string())
}

#[derive(Debug, Clone, Default)]
pub struct VehicleDraft {
    pub license_plate: String,
    pub vin: String,
    pub current_km: String,
    pub purchase_year: String,
    pub customer_id: Option<CustomerId>,
    pub model_id: Option<VehicleModelId>,
}

impl VehicleDraft {
    pub fn validate(&self) -> ValidationResult<VehicleRequest> {
        self.validate_for_year(Local::now().year())
    }

    pub fn validate_for_year(&self, current_year: i32) -> ValidationResult<VehicleRequest> {
        let plate = required("licensePlate", "License plate", &self.license_plate)?
            .to_ascii_uppercase();
        if !REGEX_LICENSE_PLATE.is_match(&plate) {
            return Err(ValidationError::new(
                "licensePlate",
                "License plate must look like 51H-123.45",
            ));
        }

        let vin = required("vin", "VIN", &self.vin)?.to_ascii_uppercase();
        if vin.len() != 17 {
            return Err(ValidationError::new("vin", "VIN must be 17 characters"));
        }
        if !REGEX_VIN.is_match(&vin) {
            return Err(ValidationError::new(
                "vin",
                "VIN may only contain letters and digits, excluding I, O and Q",
            ));
        }

        let current_km: u32 = parse_number("currentKm", "Current km", &self.current_km)?;

        let purchase_year: i32 = parse_number("purchaseYear", "Purchase year", &self.purchase_year)?;
        if !(OLDEST_PURCHASE_YEAR..=current_year).contains(&purchase_year) {
            return Err(ValidationError::new(
                "purchaseYear",
                format!("Purchase year must be between {OLDEST_PURCHASE_YEAR} and {current_year}"),
            ));
        }

        let customer_id = self
            .customer_id
            .ok_or_else(|| ValidationError::new("customerId", "Customer is required"))?;
        let model_id = self
            .model_id
            .ok_or_else(|| ValidationError::new("modelId", "Vehicle model is required"))?;

        Ok(VehicleRequest {
            license_plate: plate,
            vin,
            current_km,
            purchase_year,
            customer_id,
            model_id,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentDraft {
    pub customer_id: Option<CustomerId>,
    pub vehicle_id: Option<VehicleId>,
    pub center_id: Option<CenterId>,
    /// `YYYY-MM-DDTHH:MM` as produced by a datetime-local input.
    pub appointment_date: String,
    pub service_item_ids: Vec<ServiceItemId>,
    pub notes: String,
}

impl AppointmentDraft {
    pub fn validate(&self) -> ValidationResult<CreateAppointmentRequest> {
        self.validate_at(Local::now().naive_local())
    }

    pub fn validate_at(&self, now: NaiveDateTime) -> ValidationResult<CreateAppointmentRequest> {
        let customer_id = self
            .customer_id
            .ok_or_else(|| ValidationError::new("customerId", "Customer is required"))?;
        let vehicle_id = self
            .vehicle_id
            .ok_or_else(|| ValidationError::new("vehicleId", "Please select a vehicle"))?;
        let center_id = self
            .center_id
            .ok_or_else(|| ValidationError::new("centerId", "Please select a service center"))?;

        let raw_date = required("appointmentDate", "Appointment date", &self.appointment_date)?;
        let appointment_date = NaiveDateTime::parse_from_str(raw_date, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(raw_date, "%Y-%m-%dT%H:%M:%S"))
            .map_err(|_| ValidationError::new("appointmentDate", "Appointment date is not valid"))?;
        if appointment_date <= now {
            return Err(ValidationError::new(
                "appointmentDate",
                "Appointment date must be in the future",
            ));
        }

        if self.service_item_ids.is_empty() {
            return Err(ValidationError::new(
                "serviceItemIds",
                "Please select at least one service",
            ));
        }

        Ok(CreateAppointmentRequest {
            customer_id,
            vehicle_id,
            center_id,
            appointment_date,
            service_item_ids: self.service_item_ids.clone(),
            notes: optional(&self.notes),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SparePartDraft {
    pub part_number: String,
    pub name: String,
    pub unit_price: String,
    pub manufacturer: String,
    pub category: String,
}

impl SparePartDraft {
    pub fn validate(&self) -> ValidationResult<SparePartRequest> {
        let part_number = required("partNumber", "Part number", &self.part_number)?;
        let name = required("name", "Part name", &self.name)?;
        let unit_price: f64 = parse_number("unitPrice", "Unit price", &self.unit_price)?;
        if !(unit_price > 0.0) {
            return Err(ValidationError::new("unitPrice", "Unit price must be greater than 0"));
        }
        Ok(SparePartRequest {
            part_number: part_number.to_string(),
            name: name.to_string(),
            unit_price,
            manufacturer: optional(&self.manufacturer),
            category: optional(&self.category),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InventoryDraft {
    pub center_id: Option<CenterId>,
    pub spare_part_id: Option<shared::domain::SparePartId>,
    pub quantity: String,
    pub minimum_threshold: String,
}

impl InventoryDraft {
    pub fn validate(&self) -> ValidationResult<InventoryRequest> {
        let center_id = self
            .center_id
            .ok_or_else(|| ValidationError::new("centerId", "Service center is required"))?;
        let spare_part_id = self
            .spare_part_id
            .ok_or_else(|| ValidationError::new("sparePartId", "Spare part is required"))?;
        let quantity: i64 = parse_number("quantity", "Quantity", &self.quantity)?;
        if quantity < 0 {
            return Err(ValidationError::new("quantity", "Quantity cannot be negative"));
        }
        let minimum_threshold: i64 =
            parse_number("minimumThreshold", "Minimum threshold", &self.minimum_threshold)?;
        if minimum_threshold < 0 {
            return Err(ValidationError::new(
                "minimumThreshold",
                "Minimum threshold cannot be negative",
            ));
        }
        Ok(InventoryRequest {
            center_id,
            spare_part_id,
            quantity,
            minimum_threshold,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServiceItemDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub estimated_minutes: String,
}

impl ServiceItemDraft {
    pub fn validate(&self) -> ValidationResult<ServiceItemRequest> {
        let name = required("name", "Service name", &self.name)?;
        let price: f64 = parse_number("price", "Price", &self.price)?;
        if !(price >= 0.0) {
            return Err(ValidationError::new("price", "Price cannot be negative"));
        }
        let estimated_minutes = match optional(&self.estimated_minutes) {
            Some(raw) => {
                let minutes: u32 = parse_number("estimatedMinutes", "Estimated time", &raw)?;
                if minutes == 0 {
                    return Err(ValidationError::new(
                        "estimatedMinutes",
                        "Estimated time must be greater than 0",
                    ));
                }
                Some(minutes)
            }
            None => None,
        };
        Ok(ServiceItemRequest {
            name: name.to_string(),
            description: optional(&self.description),
            price,
            estimated_minutes,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServiceCenterDraft {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl ServiceCenterDraft {
    pub fn validate(&self) -> ValidationResult<ServiceCenterRequest> {
        let name = required("name", "Center name", &self.name)?;
        let address = required("address", "Address", &self.address)?;
        let phone = check_phone("phone", &self.phone)?;
        let email = match optional(&self.email) {
            Some(raw) => Some(check_email("email", &raw)?),
            None => None,
        };
        Ok(ServiceCenterRequest {
            name: name.to_string(),
            address: address.to_string(),
            phone,
            email,
        })
    }
}

#[derive(Debug, Clone)]
pub struct StaffDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: StaffRole,
    pub center_id: Option<CenterId>,
}

impl StaffDraft {
    pub fn validate(&self) -> ValidationResult<StaffRequest> {
        let full_name = required("fullName", "Full name", &self.full_name)?;
        let email = check_email("email", &self.email)?;
        let phone = check_phone("phone", &self.phone)?;
        if self.role == StaffRole::Unknown {
            return Err(ValidationError::new("role", "Please select a role"));
        }
        if self.role == StaffRole::Technician && self.center_id.is_none() {
            return Err(ValidationError::new(
                "centerId",
                "Technicians must belong to a service center",
            ));
        }
        Ok(StaffRequest {
            full_name: full_name.to_string(),
            email,
            phone,
            role: self.role,
            center_id: self.center_id,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CustomerDraft {
    pub fn validate(&self) -> ValidationResult<CustomerUpdateRequest> {
        let full_name = required("fullName", "Full name", &self.full_name)?;
        let email = match optional(&self.email) {
            Some(raw) => Some(check_email("email", &raw)?),
            None => None,
        };
        let phone = match optional(&self.phone) {
            Some(raw) => Some(check_phone("phone", &raw)?),
            None => None,
        };
        Ok(CustomerUpdateRequest {
            full_name: full_name.to_string(),
            email,
            phone,
            address: optional(&self.address),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct VehicleModelDraft {
    pub model_name: String,
    pub brand: String,
    pub battery_capacity: String,
    pub year: String,
}

impl VehicleModelDraft {
    pub fn validate(&self) -> ValidationResult<VehicleModelRequest> {
        let model_name = required("modelName", "Model name", &self.model_name)?;
        let brand = required("brand", "Brand", &self.brand)?;
        let battery_capacity = match optional(&self.battery_capacity) {
            Some(raw) => {
                let kwh: f64 = parse_number("batteryCapacity", "Battery capacity", &raw)?;
                if !(kwh > 0.0) {
                    return Err(ValidationError::new(
                        "batteryCapacity",
                        "Battery capacity must be greater than 0",
                    ));
                }
                Some(kwh)
            }
            None => None,
        };
        let year = match optional(&self.year) {
            Some(raw) => Some(parse_number::<i32>("year", "Year", &raw)?),
            None => None,
        };
        Ok(VehicleModelRequest {
            model_name: model_name.to_string(),
            brand: brand.to_string(),
            battery_capacity,
            year,
        })
    }
}

/// Package rows are edited as typed values, so only range rules apply.
pub fn validate_package_item(item: &ModelPackageItemRequest) -> ValidationResult<()> {
    if item.milestone_km == 0 {
        return Err(ValidationError::new(
            "milestoneKm",
            "Milestone km must be greater than 0",
        ));
    }
    if let Some(month) = item.milestone_month {
        if month == 0 || month > MAX_MILESTONE_MONTH {
            return Err(ValidationError::new(
                "milestoneMonth",
                format!("Milestone month must be between 1 and {MAX_MILESTONE_MONTH}"),
            ));
        }
    }
    if !(item.price >= 0.0) {
        return Err(ValidationError::new("price", "Price cannot be negative"));
    }
    if item.action_type == ActionType::Replace {
        if item.spare_part_id.is_none() {
            return Err(ValidationError::new(
                "sparePartId",
                "A replacement needs a spare part",
            ));
        }
        if item.quantity.unwrap_or(0) == 0 {
            return Err(ValidationError::new(
                "quantity",
                "Replacement quantity must be at least 1",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
