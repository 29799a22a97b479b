use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use super::*;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{
    domain::{InvoiceId, InvoiceStatus},
    protocol::Invoice,
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::validation::VehicleDraft;

#[derive(Clone, Default)]
struct Recorded {
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn record(state: &Recorded, body: Value) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.bodies.lock().await.push(body);
}

fn package_rows() -> Value {
    json!([
        {"id": 1, "modelId": 7, "serviceItemId": 3, "milestoneKm": 10000, "milestoneMonth": 6,
         "price": 150000.0, "actionType": "CHECK"},
        {"id": 2, "modelId": 7, "serviceItemId": 4, "milestoneKm": 10000, "milestoneMonth": 6,
         "price": 90000.0, "actionType": "REPLACE", "sparePartId": 11, "quantity": 1},
        {"id": 3, "modelId": 7, "serviceItemId": 3, "milestoneKm": 5000, "milestoneMonth": 3,
         "price": 120000.0, "actionType": "CHECK"}
    ])
}

async fn spawn_backend() -> (ServiceClient, Recorded) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let recorded = Recorded::default();
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let app = Router::new()
        .route(
            "/api/service-centers",
            get(|Query(params): Query<HashMap<String, u32>>| async move {
                Json(json!({
                    "code": 1000,
                    "message": "Success",
                    "result": {
                        "content": [{"id": 1, "name": "EV Care District 1", "phone": "0901234567"}],
                        "totalElements": 42,
                        "number": params.get("page"),
                        "size": params.get("size"),
                        "first": true,
                        "last": false
                    }
                }))
            }),
        )
        .route(
            "/api/inventories",
            get(
                |State(state): State<Recorded>, Query(params): Query<HashMap<String, u32>>| async move {
                    let page = params.get("page").copied().unwrap_or(0);
                    let size = params.get("size").copied().unwrap_or(1).max(1);
                    record(&state, json!({"page": page, "size": size})).await;
                    let total = 5u32;
                    let content: Vec<Value> = (page * size..((page + 1) * size).min(total))
                        .map(|i| {
                            json!({"id": i + 1, "centerId": 1, "sparePartId": 100 + i, "quantity": 3})
                        })
                        .collect();
                    Json(json!({
                        "code": 1000,
                        "result": {
                            "content": content,
                            "totalElements": total,
                            "number": page,
                            "size": size,
                            "first": page == 0,
                            "last": (page + 1) * size >= total
                        }
                    }))
                },
            ),
        )
        .route(
            "/api/vehicles",
            post(|State(state): State<Recorded>, Json(body): Json<Value>| async move {
                record(&state, body.clone()).await;
                Json(json!({"code": 1000, "result": {"id": 99, "licensePlate": body["licensePlate"]}}))
            }),
        )
        .route(
            "/api/appointments/:id/status",
            put(
                |State(state): State<Recorded>, Path(id): Path<i64>, Json(body): Json<Value>| async move {
                    record(&state, body.clone()).await;
                    Json(json!({"code": 1000, "result": {"id": id, "status": body["status"]}}))
                },
            ),
        )
        .route(
            "/api/appointments/:id/cancel",
            put(|Path(id): Path<i64>| async move {
                Json(json!({"code": 1006, "message": "Completed appointments cannot be cancelled", "result": {"id": id}}))
            }),
        )
        .route(
            "/api/vnpay/create",
            post(|State(state): State<Recorded>, Json(body): Json<Value>| async move {
                record(&state, body).await;
                Json(json!({
                    "code": 0,
                    "message": "ok",
                    "result": {"paymentUrl": "https://sandbox.vnpayment.vn/pay?ref=abc", "transactionRef": "abc"}
                }))
            }),
        )
        .route(
            "/api/model-package-items/model/:model_id",
            get(|| async { Json(json!({"code": 1000, "result": package_rows()})) }),
        )
        .route(
            "/api/model-package-items/model/:model_id/milestone/:km/total-price",
            get(|Path((_, km)): Path<(i64, u32)>| async move {
                let total = if km == 10000 { 240000.0 } else { 120000.0 };
                Json(json!({"code": 1000, "result": total}))
            }),
        )
        .with_state(recorded.clone());

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    let client = ServiceClient::new(ApiTransport::new(format!("http://{addr}")));
    (client, recorded)
}

fn unpaid_invoice(total_amount: f64) -> Invoice {
    Invoice {
        id: InvoiceId(55),
        maintenance_record_id: None,
        customer_id: None,
        total_amount,
        status: InvoiceStatus::Unpaid,
        issued_date: None,
    }
}

#[tokio::test]
async fn centers_page_is_normalized() {
    let (client, _) = spawn_backend().await;
    let page = client.centers().list(0, 15).await.expect("centers");

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "EV Care District 1");
    assert_eq!(page.pagination.total_elements, 42);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.current_page, 0);
    assert_eq!(page.pagination.page_size, 15);
    assert!(page.pagination.first);
    assert!(!page.pagination.last);
}

#[tokio::test]
async fn inventory_list_all_walks_every_page() {
    let (client, recorded) = spawn_backend().await;
    let rows = client.inventories().list_all(2).await.expect("inventory");

    let ids: Vec<i64> = rows.iter().map(|row| row.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    let pages: Vec<Value> = recorded
        .bodies
        .lock()
        .await
        .iter()
        .map(|body| body["page"].clone())
        .collect();
    assert_eq!(pages, vec![json!(0), json!(1), json!(2)]);
}

#[tokio::test]
async fn invalid_vehicle_never_reaches_backend() {
    let (client, recorded) = spawn_backend().await;
    let draft = VehicleDraft {
        license_plate: "   ".into(),
        current_km: "1200".into(),
        purchase_year: "2023".into(),
        ..VehicleDraft::default()
    };

    let err = client.vehicles().register(&draft).await.expect_err("invalid");
    assert!(err.is_validation());
    assert_eq!(recorded.hits.load(Ordering::SeqCst), 0);

    let response = ServiceResponse::from(Err::<shared::protocol::Vehicle, _>(err));
    assert!(!response.success);
    assert!(response.message.is_some());
}

#[tokio::test]
async fn status_update_sends_wire_name() {
    let (client, recorded) = spawn_backend().await;
    let appointment = client
        .appointments()
        .update_status(shared::domain::AppointmentId(12), AppointmentStatus::InProgress)
        .await
        .expect("status");

    assert_eq!(appointment.status, AppointmentStatus::InProgress);
    let bodies = recorded.bodies.lock().await;
    assert_eq!(bodies.as_slice(), &[json!({"status": "IN_PROGRESS"})]);
}

#[tokio::test]
async fn cancel_rejection_surfaces_backend_message() {
    let (client, _) = spawn_backend().await;
    let err = client
        .appointments()
        .cancel(shared::domain::AppointmentId(3))
        .await
        .expect_err("rejected");

    assert_eq!(err.user_message(), "Completed appointments cannot be cancelled");
}

#[tokio::test]
async fn vnpay_accepts_code_zero() {
    let (client, recorded) = spawn_backend().await;
    let redirect = client
        .payments()
        .create_vnpay_payment(&unpaid_invoice(350000.0))
        .await
        .expect("payment");

    assert!(redirect.payment_url.starts_with("https://sandbox.vnpayment.vn"));
    let bodies = recorded.bodies.lock().await;
    assert_eq!(bodies[0]["invoiceId"], json!(55));
    assert_eq!(bodies[0]["amount"], json!(350000));
}

#[tokio::test]
async fn paid_or_empty_invoice_is_refused_locally() {
    let (client, recorded) = spawn_backend().await;

    let mut paid = unpaid_invoice(100.0);
    paid.status = InvoiceStatus::Paid;
    let err = client
        .payments()
        .create_vnpay_payment(&paid)
        .await
        .expect_err("paid");
    assert!(err.is_validation());

    let err = client
        .payments()
        .create_vnpay_payment(&unpaid_invoice(0.0))
        .await
        .expect_err("zero");
    assert!(err.is_validation());

    for amount in [f64::INFINITY, f64::NAN, -5.0] {
        let err = client
            .payments()
            .create_vnpay_payment(&unpaid_invoice(amount))
            .await
            .expect_err("unusable amount");
        assert!(err.is_validation());
    }
    assert_eq!(recorded.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn milestones_load_over_http() {
    let (client, _) = spawn_backend().await;
    let mut workflow = client.milestones(VehicleModelId(7));
    let groups = workflow.load().await.expect("load");

    let kms: Vec<u32> = groups.iter().map(|g| g.milestone_km).collect();
    assert_eq!(kms, vec![5000, 10000]);
    assert_eq!(groups[1].items.len(), 2);
    assert_eq!(groups[1].package_name, "Maintenance 10000 km");
    assert_eq!(groups[1].total_price, Some(240000.0));
}

#[test]
fn actions_follow_status() {
    assert_eq!(
        appointment_actions(AppointmentStatus::Pending),
        vec![AppointmentStatus::Confirmed, AppointmentStatus::Cancelled]
    );
    assert_eq!(
        appointment_actions(AppointmentStatus::CustomerApproved),
        vec![AppointmentStatus::Completed, AppointmentStatus::Cancelled]
    );
    assert!(appointment_actions(AppointmentStatus::Completed).is_empty());
    assert!(appointment_actions(AppointmentStatus::Unknown).is_empty());
}
