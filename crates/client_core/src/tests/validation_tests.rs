use super::*;

use chrono::NaiveDate;
use shared::domain::SparePartId;

fn vehicle_draft() -> VehicleDraft {
    VehicleDraft {
        license_plate: "51h-123.45".into(),
        vin: "5yjsa1e14hf000001".into(),
        current_km: "12000".into(),
        purchase_year: "2022".into(),
        customer_id: Some(CustomerId(4)),
        model_id: Some(VehicleModelId(2)),
    }
}

#[test]
fn vehicle_draft_normalizes_case() {
    let request = vehicle_draft().validate_for_year(2025).expect("valid");
    assert_eq!(request.license_plate, "51H-123.45");
    assert_eq!(request.vin, "5YJSA1E14HF000001");
    assert_eq!(request.current_km, 12000);
}

#[test]
fn vehicle_draft_rejects_short_vin() {
    let draft = VehicleDraft {
        vin: "ABC123".into(),
        ..vehicle_draft()
    };
    let err = draft.validate_for_year(2025).expect_err("short vin");
    assert_eq!(err.field, "vin");
}

#[test]
fn vehicle_draft_rejects_vin_with_forbidden_letters() {
    let draft = VehicleDraft {
        vin: "5YJSA1E14HF00000O".into(),
        ..vehicle_draft()
    };
    assert_eq!(draft.validate_for_year(2025).expect_err("O").field, "vin");
}

#[test]
fn vehicle_draft_rejects_future_purchase_year_and_bad_km() {
    let draft = VehicleDraft {
        purchase_year: "2031".into(),
        ..vehicle_draft()
    };
    assert_eq!(
        draft.validate_for_year(2025).expect_err("future").field,
        "purchaseYear"
    );

    let draft = VehicleDraft {
        current_km: "-5".into(),
        ..vehicle_draft()
    };
    assert_eq!(draft.validate_for_year(2025).expect_err("km").field, "currentKm");
}

#[test]
fn vehicle_draft_requires_model() {
    let draft = VehicleDraft {
        model_id: None,
        ..vehicle_draft()
    };
    assert_eq!(draft.validate_for_year(2025).expect_err("model").field, "modelId");
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("date")
}

fn appointment_draft() -> AppointmentDraft {
    AppointmentDraft {
        customer_id: Some(CustomerId(1)),
        vehicle_id: Some(VehicleId(2)),
        center_id: Some(CenterId(3)),
        appointment_date: "2025-05-02T09:30".into(),
        service_item_ids: vec![ServiceItemId(10)],
        notes: "  ".into(),
    }
}

#[test]
fn appointment_draft_accepts_future_slot() {
    let request = appointment_draft().validate_at(now()).expect("valid");
    assert_eq!(request.appointment_date.to_string(), "2025-05-02 09:30:00");
    assert_eq!(request.notes, None);
}

#[test]
fn appointment_draft_rejects_past_slot_and_empty_services() {
    let draft = AppointmentDraft {
        appointment_date: "2025-04-30T09:30".into(),
        ..appointment_draft()
    };
    assert_eq!(
        draft.validate_at(now()).expect_err("past").field,
        "appointmentDate"
    );

    let draft = AppointmentDraft {
        service_item_ids: Vec::new(),
        ..appointment_draft()
    };
    assert_eq!(
        draft.validate_at(now()).expect_err("no services").field,
        "serviceItemIds"
    );
}

#[test]
fn appointment_draft_rejects_garbage_date() {
    let draft = AppointmentDraft {
        appointment_date: "tomorrow".into(),
        ..appointment_draft()
    };
    assert_eq!(
        draft.validate_at(now()).expect_err("garbage").message,
        "Appointment date is not valid"
    );
}

#[test]
fn spare_part_price_must_be_positive() {
    let draft = SparePartDraft {
        part_number: "BRK-01".into(),
        name: "Brake pad".into(),
        unit_price: "0".into(),
        ..SparePartDraft::default()
    };
    assert_eq!(draft.validate().expect_err("zero").field, "unitPrice");
}

#[test]
fn inventory_quantity_cannot_be_negative() {
    let draft = InventoryDraft {
        center_id: Some(CenterId(1)),
        spare_part_id: Some(SparePartId(2)),
        quantity: "-1".into(),
        minimum_threshold: "3".into(),
    };
    assert_eq!(draft.validate().expect_err("negative").field, "quantity");
}

#[test]
fn service_item_optional_minutes() {
    let draft = ServiceItemDraft {
        name: "Brake Inspection".into(),
        price: "150000".into(),
        ..ServiceItemDraft::default()
    };
    assert_eq!(draft.validate().expect("valid").estimated_minutes, None);

    let draft = ServiceItemDraft {
        estimated_minutes: "0".into(),
        ..draft
    };
    assert_eq!(draft.validate().expect_err("zero").field, "estimatedMinutes");
}

#[test]
fn center_phone_and_email_formats() {
    let draft = ServiceCenterDraft {
        name: "District 1".into(),
        address: "1 Le Loi".into(),
        phone: "0901 234 567".into(),
        email: String::new(),
    };
    let request = draft.validate().expect("valid");
    assert_eq!(request.phone, "0901234567");
    assert_eq!(request.email, None);

    let draft = ServiceCenterDraft {
        email: "not-an-email".into(),
        ..draft
    };
    assert_eq!(draft.validate().expect_err("email").field, "email");
}

#[test]
fn technician_staff_needs_center() {
    let draft = StaffDraft {
        full_name: "Tran Van B".into(),
        email: "b@evcare.vn".into(),
        phone: "+84901234567".into(),
        role: StaffRole::Technician,
        center_id: None,
    };
    assert_eq!(draft.validate().expect_err("center").field, "centerId");
}

#[test]
fn package_item_replace_needs_part_and_quantity() {
    let mut item = ModelPackageItemRequest {
        model_id: VehicleModelId(1),
        service_item_id: ServiceItemId(2),
        milestone_km: 10_000,
        milestone_month: Some(12),
        price: 200_000.0,
        action_type: ActionType::Replace,
        spare_part_id: None,
        quantity: None,
    };
    assert_eq!(validate_package_item(&item).expect_err("part").field, "sparePartId");

    item.spare_part_id = Some(SparePartId(7));
    assert_eq!(validate_package_item(&item).expect_err("qty").field, "quantity");

    item.quantity = Some(2);
    assert!(validate_package_item(&item).is_ok());

    item.milestone_km = 0;
    assert_eq!(validate_package_item(&item).expect_err("km").field, "milestoneKm");
}
