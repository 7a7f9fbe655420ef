//! Batch estimation across many pay items.

use std::collections::BTreeMap;

use costest_core::errors::{EstimateError, InputError};
use costest_core::models::{
    EstimateResult, HistoricalRecord, MappingDebugRow, PayItemCode, ProjectContext,
    RollupMapping, SourceTier, SummaryEntry,
};
use rayon::prelude::*;
use tracing::{info, warn};

use super::selector::{EstimateContext, Estimator, ItemEstimate};
use crate::aggregation::HistoricalPool;
use crate::mapping::{self, MappingTable};
use crate::summary::SummaryTable;

/// Materialized inputs for a run, as delivered by the ingestion side.
#[derive(Debug, Clone, Default)]
pub struct RunInputs {
    pub records: Vec<HistoricalRecord>,
    pub static_mappings: Vec<RollupMapping>,
    pub overlay_mappings: Vec<RollupMapping>,
    pub summaries: Vec<SummaryEntry>,
}

/// Output of a batch: one result per requested code in request order, the
/// rollup audit rows, and every non-fatal error met along the way.
#[derive(Debug, Default)]
pub struct EstimateBatch {
    pub results: Vec<EstimateResult>,
    pub mapping_debug: Vec<MappingDebugRow>,
    pub errors: Vec<EstimateError>,
}

impl EstimateBatch {
    /// Number of results priced by `tier`.
    pub fn count_by_tier(&self, tier: SourceTier) -> usize {
        self.results.iter().filter(|r| r.source_tier() == tier).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Screened, indexed inputs ready to price any number of items.
///
/// Mapping conflicts fail [`EstimationRun::prepare`] before any estimate is
/// made. Malformed records are excluded at preparation and reported with
/// every batch.
#[derive(Debug)]
pub struct EstimationRun<'e> {
    estimator: &'e Estimator,
    records: HistoricalPool,
    mappings: MappingTable,
    summaries: SummaryTable,
    rejected: Vec<InputError>,
}

impl<'e> EstimationRun<'e> {
    pub fn prepare(estimator: &'e Estimator, inputs: RunInputs) -> Result<Self, EstimateError> {
        let mappings = mapping::resolve(&inputs.static_mappings, &inputs.overlay_mappings)?;
        let (records, mut rejected) = HistoricalPool::from_records(inputs.records);

        for entry in &inputs.summaries {
            if let Err(e) = entry.validate() {
                warn!(item = %entry.item_code, period = %entry.period, error = %e, "malformed summary entry");
                rejected.push(e);
            }
        }
        let summaries = SummaryTable::from_entries(inputs.summaries);

        info!(
            records = records.len(),
            rejected = rejected.len(),
            mappings = mappings.len(),
            summary_items = summaries.item_count(),
            "estimation run prepared"
        );

        Ok(Self {
            estimator,
            records,
            mappings,
            summaries,
            rejected,
        })
    }

    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    pub fn records(&self) -> &HistoricalPool {
        &self.records
    }

    /// Inputs excluded during preparation.
    pub fn rejected(&self) -> &[InputError] {
        &self.rejected
    }

    /// Context for estimating items of `project` directly.
    pub fn context<'a>(&'a self, project: &'a ProjectContext) -> EstimateContext<'a> {
        EstimateContext {
            records: &self.records,
            mappings: &self.mappings,
            summaries: &self.summaries,
            project,
        }
    }

    /// Estimate every requested code in parallel.
    ///
    /// Results come back in request order. A code that fails validation
    /// yields a NO_DATA row naming the problem and an error in the batch.
    pub fn estimate_all<S>(&self, project: &ProjectContext, requested: &[S]) -> EstimateBatch
    where
        S: AsRef<str> + Sync,
    {
        let ctx = self.context(project);
        let outcomes: Vec<Result<ItemEstimate, (EstimateResult, EstimateError)>> = requested
            .par_iter()
            .map(|raw| self.estimate_raw(raw.as_ref(), &ctx))
            .collect();

        let mut batch = EstimateBatch {
            results: Vec::with_capacity(outcomes.len()),
            mapping_debug: Vec::new(),
            errors: self.rejected.iter().cloned().map(EstimateError::from).collect(),
        };
        for outcome in outcomes {
            match outcome {
                Ok(item) => {
                    batch.results.push(item.result);
                    batch.mapping_debug.extend(item.mapping_debug);
                }
                Err((result, error)) => {
                    batch.results.push(result);
                    batch.errors.push(error);
                }
            }
        }

        let mut tiers: BTreeMap<SourceTier, usize> = BTreeMap::new();
        for result in &batch.results {
            *tiers.entry(result.source_tier()).or_default() += 1;
        }
        info!(
            items = batch.results.len(),
            category_mix = tiers.get(&SourceTier::CategoryMix).copied().unwrap_or(0),
            rollup = tiers.get(&SourceTier::DesignMemoRollup).copied().unwrap_or(0),
            summary = tiers.get(&SourceTier::UnitPriceSummary).copied().unwrap_or(0),
            no_data = tiers.get(&SourceTier::NoData).copied().unwrap_or(0),
            errors = batch.errors.len(),
            "estimation batch complete"
        );

        batch
    }

    fn estimate_raw(
        &self,
        raw: &str,
        ctx: &EstimateContext<'_>,
    ) -> Result<ItemEstimate, (EstimateResult, EstimateError)> {
        match PayItemCode::parse(raw) {
            Ok(code) => Ok(self.estimator.estimate(&code, ctx)),
            Err(e) => {
                warn!(raw, error = %e, "requested item code is malformed");
                let notes = format!("NO_DATA: malformed item code ({e})");
                let result = EstimateResult::no_data(raw.trim(), notes);
                let error = EstimateError::from(e).for_item(raw, SourceTier::NoData.name());
                Err((result, error))
            }
        }
    }
}
