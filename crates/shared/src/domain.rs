use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(AppointmentId);
id_newtype!(VehicleId);
id_newtype!(VehicleModelId);
id_newtype!(PackageItemId);
id_newtype!(SparePartId);
id_newtype!(InventoryId);
id_newtype!(ServiceItemId);
id_newtype!(CenterId);
id_newtype!(CustomerId);
id_newtype!(StaffId);
id_newtype!(TechnicianId);
id_newtype!(InvoiceId);
id_newtype!(MaintenanceRecordId);

/// Appointment lifecycle as reported by the backend. Transitions are
/// enforced server-side only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    CustomerApproved,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::CustomerApproved => "CUSTOMER_APPROVED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether a front end should show a cancel action. Purely cosmetic:
    /// the cancel endpoint is called without any local legality check.
    pub fn offers_cancel(&self) -> bool {
        !self.is_terminal() && *self != Self::Unknown
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Check,
    Replace,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Check => "CHECK",
            Self::Replace => "REPLACE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Admin,
    Staff,
    Technician,
    #[serde(other)]
    Unknown,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Staff => "STAFF",
            Self::Technician => "TECHNICIAN",
            Self::Unknown => "UNKNOWN",
        }
    }
}
