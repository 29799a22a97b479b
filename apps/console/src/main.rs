use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use client_core::{
    appointment_actions,
    config::{load_settings_from, DEFAULT_SETTINGS_FILE},
    listing::{self, ListQuery},
    milestone::recommend,
    services::ReportPeriod,
    ServiceClient, ServiceResponse, ServiceResult,
};
use serde::Serialize;
use shared::{
    domain::{
        ActionType, AppointmentId, AppointmentStatus, CenterId, CustomerId, InvoiceId,
        ServiceItemId, SparePartId, VehicleModelId,
    },
    protocol::ModelPackageItemRequest,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server page size used while pulling the full inventory for local filtering.
const INVENTORY_PAGE_SIZE: u32 = 200;

#[derive(Parser, Debug)]
#[command(name = "evcare", about = "EV maintenance service console")]
struct Cli {
    /// Settings file; environment variables still take precedence.
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    /// Overrides the configured API base url.
    #[arg(long)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    Centers(CenterCommand),
    #[command(subcommand)]
    Appointments(AppointmentCommand),
    #[command(subcommand)]
    Vehicles(VehicleCommand),
    #[command(subcommand)]
    Inventory(InventoryCommand),
    #[command(subcommand)]
    Milestones(MilestoneCommand),
    /// Starts a VNPay checkout for an invoice.
    Pay { invoice_id: i64 },
    /// Revenue per center for a date range (YYYY-MM-DD).
    Revenue { from: NaiveDate, to: NaiveDate },
}

#[derive(Subcommand, Debug)]
enum CenterCommand {
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
}

#[derive(Subcommand, Debug)]
enum AppointmentCommand {
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    Show { id: i64 },
    /// Sets a status such as CONFIRMED or IN_PROGRESS.
    Status { id: i64, status: String },
    Cancel { id: i64 },
}

#[derive(Subcommand, Debug)]
enum VehicleCommand {
    List {
        #[arg(long)]
        customer: Option<i64>,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[derive(Subcommand, Debug)]
enum InventoryCommand {
    List {
        #[arg(long)]
        center: Option<i64>,
        #[arg(long, default_value = "")]
        search: String,
        /// Only rows at or below their minimum threshold.
        #[arg(long)]
        low: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[derive(Subcommand, Debug)]
enum MilestoneCommand {
    /// Prints a model's maintenance packages, optionally with the next one due.
    Show {
        model_id: i64,
        #[arg(long)]
        current_km: Option<u32>,
        #[arg(long, default_value_t = 0)]
        months: u32,
    },
    /// Creates a new package with a single service item.
    Add {
        model_id: i64,
        #[arg(long)]
        km: u32,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        service_item: i64,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        spare_part: Option<i64>,
        #[arg(long)]
        quantity: Option<u32>,
    },
}

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the uniform response record. Returns whether the call succeeded.
fn emit<T: Serialize>(result: ServiceResult<T>) -> Result<bool> {
    if let Err(err) = &result {
        eprintln!("error: {}", err.user_message());
    }
    let response = ServiceResponse::from(result);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(response.success)
}

fn parse_status(raw: &str) -> Result<AppointmentStatus> {
    let status: AppointmentStatus =
        serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_uppercase()))
            .with_context(|| format!("unrecognised appointment status '{raw}'"))?;
    if status == AppointmentStatus::Unknown {
        anyhow::bail!("unrecognised appointment status '{raw}'");
    }
    Ok(status)
}

#[derive(Serialize)]
struct AppointmentView {
    #[serde(flatten)]
    appointment: shared::protocol::Appointment,
    actions: Vec<AppointmentStatus>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings_from(&cli.config, |key| std::env::var(key).ok());
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }
    init_tracing(settings.app_env.default_log_directive());
    info!(
        "console: api={} env={:?}",
        settings.api_base_url, settings.app_env
    );

    let client = ServiceClient::from_settings(&settings).context("invalid client settings")?;

    let ok = match cli.command {
        Command::Centers(CenterCommand::List { page, size }) => {
            emit(client.centers().list(page, size).await)?
        }
        Command::Appointments(cmd) => match cmd {
            AppointmentCommand::List { page, size } => {
                emit(client.appointments().list(page, size).await)?
            }
            AppointmentCommand::Show { id } => {
                let result = client.appointments().get(AppointmentId(id)).await;
                emit(result.map(|appointment| AppointmentView {
                    actions: appointment_actions(appointment.status),
                    appointment,
                }))?
            }
            AppointmentCommand::Status { id, status } => {
                let status = parse_status(&status)?;
                emit(
                    client
                        .appointments()
                        .update_status(AppointmentId(id), status)
                        .await,
                )?
            }
            AppointmentCommand::Cancel { id } => {
                emit(client.appointments().cancel(AppointmentId(id)).await)?
            }
        },
        Command::Vehicles(VehicleCommand::List {
            customer,
            search,
            page,
        }) => {
            let result = match customer {
                Some(id) => client.vehicles().list_by_customer(CustomerId(id)).await,
                None => client.vehicles().list().await,
            };
            let query = ListQuery {
                search,
                page,
                ..ListQuery::default()
            };
            emit(result.map(|rows| listing::apply(&rows, &query)))?
        }
        Command::Inventory(InventoryCommand::List {
            center,
            search,
            low,
            page,
        }) => {
            let result = match center {
                Some(id) => client.inventories().list_by_center(CenterId(id)).await,
                None if low => client.inventories().low_stock().await,
                None => client.inventories().list_all(INVENTORY_PAGE_SIZE).await,
            };
            let query = ListQuery {
                search,
                category: low.then(|| "low".to_string()),
                page,
                ..ListQuery::default()
            };
            emit(result.map(|rows| listing::apply(&rows, &query)))?
        }
        Command::Milestones(MilestoneCommand::Show {
            model_id,
            current_km,
            months,
        }) => {
            let mut workflow = client.milestones(VehicleModelId(model_id));
            match current_km {
                None => emit(workflow.load().await.map(|groups| groups.to_vec()))?,
                Some(km) => emit(
                    workflow
                        .load()
                        .await
                        .map(|groups| recommend(groups, km, months).cloned()),
                )?,
            }
        }
        Command::Milestones(MilestoneCommand::Add {
            model_id,
            km,
            month,
            service_item,
            price,
            spare_part,
            quantity,
        }) => {
            let model_id = VehicleModelId(model_id);
            let mut workflow = client.milestones(model_id);
            let loaded = workflow.load().await.map(|_| ());
            if loaded.is_err() {
                emit(loaded)?
            } else {
                let item = ModelPackageItemRequest {
                    model_id,
                    service_item_id: ServiceItemId(service_item),
                    milestone_km: km,
                    milestone_month: month,
                    price,
                    action_type: if spare_part.is_some() {
                        ActionType::Replace
                    } else {
                        ActionType::Check
                    },
                    spare_part_id: spare_part.map(SparePartId),
                    quantity,
                };
                emit(
                    workflow
                        .create_milestone(km, month, vec![item])
                        .await
                        .map(|groups| groups.to_vec()),
                )?
            }
        }
        Command::Pay { invoice_id } => {
            match client.invoices().get(InvoiceId(invoice_id)).await {
                Ok(invoice) => emit(client.payments().create_vnpay_payment(&invoice).await)?,
                Err(err) => emit::<()>(Err(err))?,
            }
        }
        Command::Revenue { from, to } => match ReportPeriod::new(from, to) {
            Ok(period) => emit(client.reports().revenue(period).await)?,
            Err(err) => emit::<()>(Err(err.into()))?,
        },
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
