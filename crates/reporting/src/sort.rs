//! Sort composer — orders grouped rollups by a chosen field and direction.

use insights_core::types::{AggregateRow, SortDirection, SortField, SortSpec};
use std::cmp::Ordering;

/// Reorder rows in place by the given field and direction. The sort is
/// stable, so equal keys retain their relative order; row contents are never
/// mutated.
pub fn sort_rows(rows: &mut [AggregateRow], spec: SortSpec) {
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, spec.field);
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &AggregateRow, b: &AggregateRow, field: SortField) -> Ordering {
    match field {
        // Locale-aware lexical ordering: case-insensitive comparison with a
        // raw tie-break for determinism.
        SortField::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortField::Leads => a.leads.total_cmp(&b.leads),
        SortField::CostPerLead => a.cost_per_lead.total_cmp(&b.cost_per_lead),
        SortField::Reach => a.reach.total_cmp(&b.reach),
        SortField::Impressions => a.impressions.total_cmp(&b.impressions),
        SortField::Frequency => a.frequency.total_cmp(&b.frequency),
        SortField::Spent => a.spent.total_cmp(&b.spent),
        SortField::LinkClicks => a.link_clicks.total_cmp(&b.link_clicks),
        SortField::Ctr => a.ctr.total_cmp(&b.ctr),
        SortField::Cpm => a.cpm.total_cmp(&b.cpm),
    }
}
