//! Maintenance plan editing for a vehicle model.
//!
//! The backend stores a model's plan as flat package-item rows. Rows that
//! share a `milestoneKm` are shown as one package; every edit goes to the
//! backend row by row and the grouped view is fetched again afterwards.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use shared::{
    domain::{PackageItemId, VehicleModelId},
    protocol::{ModelPackageItem, ModelPackageItemRequest, RenameMilestoneRequest},
};
use tracing::{debug, info, warn};

use crate::{error::ServiceResult, validation::ValidationError};

#[async_trait]
pub trait PackageItemApi: Send + Sync {
    async fn list_by_model(&self, model_id: VehicleModelId) -> ServiceResult<Vec<ModelPackageItem>>;
    async fn milestone_total(&self, model_id: VehicleModelId, milestone_km: u32) -> ServiceResult<f64>;
    async fn create(&self, request: &ModelPackageItemRequest) -> ServiceResult<ModelPackageItem>;
    async fn update(
        &self,
        id: PackageItemId,
        request: &ModelPackageItemRequest,
    ) -> ServiceResult<ModelPackageItem>;
    async fn delete(&self, id: PackageItemId) -> ServiceResult<()>;
    async fn rename_milestone(
        &self,
        model_id: VehicleModelId,
        milestone_km: u32,
        request: &RenameMilestoneRequest,
    ) -> ServiceResult<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneGroup {
    pub milestone_km: u32,
    pub milestone_month: Option<u32>,
    pub package_name: String,
    pub items: Vec<ModelPackageItem>,
    /// `None` until fetched, or when the total could not be loaded.
    pub total_price: Option<f64>,
}

pub fn package_name(milestone_km: u32) -> String {
    format!("Maintenance {milestone_km} km")
}

/// Buckets rows by km, ascending. Row order inside a bucket is preserved and
/// the month comes from the bucket's first row.
pub fn group_by_milestone(rows: Vec<ModelPackageItem>) -> Vec<MilestoneGroup> {
    let mut buckets: BTreeMap<u32, Vec<ModelPackageItem>> = BTreeMap::new();
    for row in rows {
        buckets.entry(row.milestone_km).or_default().push(row);
    }

    buckets
        .into_iter()
        .map(|(milestone_km, items)| MilestoneGroup {
            milestone_km,
            milestone_month: items.first().and_then(|item| item.milestone_month),
            package_name: package_name(milestone_km),
            items,
            total_price: None,
        })
        .collect()
}

/// The next package a vehicle is due for. Service falls due at whichever
/// limit comes first, so a milestone counts as passed once the odometer has
/// passed its km or the vehicle is older than its month. The result is the
/// first milestone passed by neither.
pub fn recommend(
    groups: &[MilestoneGroup],
    current_km: u32,
    months_since_purchase: u32,
) -> Option<&MilestoneGroup> {
    groups.iter().find(|group| {
        let km_ahead = group.milestone_km >= current_km;
        let month_ahead = group
            .milestone_month
            .map(|month| month >= months_since_purchase)
            .unwrap_or(true);
        km_ahead && month_ahead
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkSaveReport {
    pub succeeded: usize,
    pub failed: Vec<(PackageItemId, String)>,
}

impl BulkSaveReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Loaded plan of one model plus the edit operations on it.
pub struct MilestoneWorkflow<A: PackageItemApi> {
    api: A,
    model_id: VehicleModelId,
    groups: Vec<MilestoneGroup>,
}

impl<A: PackageItemApi> MilestoneWorkflow<A> {
    pub fn new(api: A, model_id: VehicleModelId) -> Self {
        Self {
            api,
            model_id,
            groups: Vec::new(),
        }
    }

    pub fn model_id(&self) -> VehicleModelId {
        self.model_id
    }

    pub fn groups(&self) -> &[MilestoneGroup] {
        &self.groups
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn has_milestone(&self, milestone_km: u32) -> bool {
        self.groups
            .iter()
            .any(|group| group.milestone_km == milestone_km)
    }

    /// Fetches rows, groups them, then asks for each milestone's total.
    pub async fn load(&mut self) -> ServiceResult<&[MilestoneGroup]> {
        let rows = self.api.list_by_model(self.model_id).await?;
        let mut groups = group_by_milestone(rows);

        for group in &mut groups {
            match self
                .api
                .milestone_total(self.model_id, group.milestone_km)
                .await
            {
                Ok(total) => group.total_price = Some(total),
                Err(err) => warn!(
                    "milestone: total unavailable model={} km={} err={err}",
                    self.model_id, group.milestone_km
                ),
            }
        }

        debug!(
            "milestone: loaded model={} groups={}",
            self.model_id,
            groups.len()
        );
        self.groups = groups;
        Ok(&self.groups)
    }

    fn ensure_free_km(&self, milestone_km: u32) -> ServiceResult<()> {
        if milestone_km == 0 {
            return Err(ValidationError::new(
                "milestoneKm",
                "Milestone km must be greater than 0",
            )
            .into());
        }
        if self.has_milestone(milestone_km) {
            return Err(ValidationError::new(
                "milestoneKm",
                format!("A package for {milestone_km} km already exists"),
            )
            .into());
        }
        Ok(())
    }

    /// Creates every row of a new milestone. A km already present in the
    /// loaded groups is refused before any request goes out. When a row
    /// fails after earlier rows went through, the groups are reloaded before
    /// the error is returned.
    pub async fn create_milestone(
        &mut self,
        milestone_km: u32,
        milestone_month: Option<u32>,
        items: Vec<ModelPackageItemRequest>,
    ) -> ServiceResult<&[MilestoneGroup]> {
        self.ensure_free_km(milestone_km)?;
        if items.is_empty() {
            return Err(ValidationError::new(
                "items",
                "Add at least one service item to the package",
            )
            .into());
        }

        let mut created = 0usize;
        for mut item in items {
            item.model_id = self.model_id;
            item.milestone_km = milestone_km;
            item.milestone_month = milestone_month;
            if let Err(err) = self.api.create(&item).await {
                warn!(
                    "milestone: create failed model={} km={milestone_km} created={created} err={err}",
                    self.model_id
                );
                // Rows already written stay on the backend; the groups must show them.
                if created > 0 {
                    if let Err(reload_err) = self.load().await {
                        warn!(
                            "milestone: reload after failed create model={} err={reload_err}",
                            self.model_id
                        );
                    }
                }
                return Err(err);
            }
            created += 1;
        }
        info!(
            "milestone: created model={} km={milestone_km}",
            self.model_id
        );
        self.load().await
    }

    pub async fn add_item(
        &mut self,
        mut item: ModelPackageItemRequest,
    ) -> ServiceResult<&[MilestoneGroup]> {
        item.model_id = self.model_id;
        self.api.create(&item).await?;
        self.load().await
    }

    pub async fn update_item(
        &mut self,
        id: PackageItemId,
        item: &ModelPackageItemRequest,
    ) -> ServiceResult<&[MilestoneGroup]> {
        self.api.update(id, item).await?;
        self.load().await
    }

    pub async fn delete_item(&mut self, id: PackageItemId) -> ServiceResult<&[MilestoneGroup]> {
        self.api.delete(id).await?;
        self.load().await
    }

    /// Moves a milestone to another km and/or month. Moving onto another
    /// loaded km is refused the same way creation is.
    pub async fn rename_milestone(
        &mut self,
        milestone_km: u32,
        new_milestone_km: u32,
        new_milestone_month: Option<u32>,
    ) -> ServiceResult<&[MilestoneGroup]> {
        if !self.has_milestone(milestone_km) {
            return Err(ValidationError::new(
                "milestoneKm",
                format!("No package exists for {milestone_km} km"),
            )
            .into());
        }
        if new_milestone_km != milestone_km {
            self.ensure_free_km(new_milestone_km)?;
        }

        self.api
            .rename_milestone(
                self.model_id,
                milestone_km,
                &RenameMilestoneRequest {
                    new_milestone_km,
                    new_milestone_month,
                },
            )
            .await?;
        self.load().await
    }

    /// Sends one update per row, in order, and tallies the outcome. Rows that
    /// already went through stay saved when a later one fails.
    pub async fn save_all(&mut self, items: &[ModelPackageItem]) -> ServiceResult<BulkSaveReport> {
        let mut report = BulkSaveReport::default();
        for item in items {
            match self
                .api
                .update(item.id, &ModelPackageItemRequest::from(item))
                .await
            {
                Ok(_) => report.succeeded += 1,
                Err(err) => {
                    warn!("milestone: save failed item={} err={err}", item.id);
                    report.failed.push((item.id, err.user_message()));
                }
            }
        }

        if report.succeeded > 0 {
            self.load().await?;
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "tests/milestone_tests.rs"]
mod tests;
