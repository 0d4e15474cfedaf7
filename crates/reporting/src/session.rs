//! Caller-owned session state for the reporting pipeline.
//!
//! The pipeline itself is stateless; a [`SessionContext`] is just the
//! current dataset plus the view controls, and every [`view`] call
//! re-derives the filtered set, the summary, and the sorted rollups from
//! scratch.
//!
//! [`view`]: SessionContext::view

use insights_core::types::{
    AggregateRow, CampaignRecord, ColumnVisibility, FilterCriteria, GlobalSummary, GroupKey,
    Preferences, SortSpec,
};
use tracing::debug;

use crate::aggregate::{distinct_names, global_summary, group_rows};
use crate::filter::apply_filters;
use crate::sort::sort_rows;

/// Current dataset and view controls, owned by the caller and passed into
/// the pipeline on every change.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub raw: Vec<CampaignRecord>,
    pub filters: FilterCriteria,
    pub group_by: GroupKey,
    pub sort: SortSpec,
}

/// One fully derived view: global summary plus sorted per-group rollups.
#[derive(Debug, Clone)]
pub struct CampaignView {
    pub summary: GlobalSummary,
    pub rows: Vec<AggregateRow>,
    pub filtered_count: usize,
}

impl SessionContext {
    pub fn new(raw: Vec<CampaignRecord>) -> Self {
        Self {
            raw,
            ..Default::default()
        }
    }

    /// Restore view controls from persisted preferences.
    pub fn with_preferences(raw: Vec<CampaignRecord>, prefs: &Preferences) -> Self {
        Self {
            raw,
            filters: prefs.filters.clone(),
            group_by: prefs.group_by,
            sort: prefs.sort,
        }
    }

    /// Re-derive the complete view model from the current state.
    pub fn view(&self) -> CampaignView {
        let filtered = apply_filters(&self.raw, &self.filters);
        let summary = global_summary(&filtered);
        let mut rows = group_rows(&filtered, self.group_by);
        sort_rows(&mut rows, self.sort);

        debug!(
            filtered = filtered.len(),
            groups = rows.len(),
            "view derived"
        );

        CampaignView {
            summary,
            rows,
            filtered_count: filtered.len(),
        }
    }

    /// Swap in a freshly imported dataset, wholly replacing the old one.
    pub fn replace_dataset(&mut self, raw: Vec<CampaignRecord>) {
        self.raw = raw;
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterCriteria::default();
    }

    /// Filter choices offered to the caller, drawn from the raw
    /// (unfiltered) dataset.
    pub fn account_names(&self) -> Vec<String> {
        distinct_names(&self.raw, GroupKey::Account)
    }

    pub fn campaign_names(&self) -> Vec<String> {
        distinct_names(&self.raw, GroupKey::Campaign)
    }

    pub fn ad_set_names(&self) -> Vec<String> {
        distinct_names(&self.raw, GroupKey::AdSet)
    }

    /// Snapshot the view controls for persistence.
    pub fn preferences(&self, column_visibility: ColumnVisibility) -> Preferences {
        Preferences {
            group_by: self.group_by,
            filters: self.filters.clone(),
            column_visibility,
            sort: self.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::types::{SortDirection, SortField};

    fn record(campaign: &str, spent: f64) -> CampaignRecord {
        CampaignRecord {
            account_name: "Conta".to_string(),
            campaign_name: campaign.to_string(),
            ad_set_name: "Conjunto".to_string(),
            ad_name: "Anúncio".to_string(),
            account_id: String::new(),
            campaign_id: String::new(),
            ad_set_id: String::new(),
            ad_id: String::new(),
            ad_label: String::new(),
            day: String::new(),
            reach: 0.0,
            impressions: 0.0,
            frequency: 0.0,
            currency: "BRL".to_string(),
            amount_spent: spent,
            attribution_setting: String::new(),
            cost_per_lead: 0.0,
            leads: 0.0,
            link_clicks: 0.0,
            ctr: 0.0,
            cpm: 0.0,
            cpc_link: 0.0,
            cpc_all: 0.0,
            views: 0.0,
            report_start: String::new(),
            report_end: String::new(),
        }
    }

    #[test]
    fn test_view_re_derives_after_filter_mutation() {
        let mut session = SessionContext::new(vec![record("A", 100.0), record("B", 50.0)]);
        assert_eq!(session.view().summary.total_spent, 150.0);

        session.filters.campaigns.insert("A".to_string());
        let view = session.view();
        assert_eq!(view.summary.total_spent, 100.0);
        assert_eq!(view.filtered_count, 1);

        session.reset_filters();
        assert_eq!(session.view().summary.total_spent, 150.0);
    }

    #[test]
    fn test_view_rows_follow_sort_spec() {
        let mut session = SessionContext::new(vec![record("A", 10.0), record("B", 99.0)]);
        session.sort = SortSpec {
            field: SortField::Spent,
            direction: SortDirection::Desc,
        };
        let view = session.view();
        assert_eq!(view.rows[0].name, "B");

        session.sort.direction = SortDirection::Asc;
        let view = session.view();
        assert_eq!(view.rows[0].name, "A");
    }

    #[test]
    fn test_replace_dataset_is_wholesale() {
        let mut session = SessionContext::new(vec![record("A", 100.0)]);
        session.replace_dataset(vec![record("C", 5.0), record("D", 6.0)]);

        let view = session.view();
        assert_eq!(view.summary.total_spent, 11.0);
        assert_eq!(session.campaign_names(), vec!["C", "D"]);
    }

    #[test]
    fn test_preferences_roundtrip() {
        let mut session = SessionContext::new(vec![record("A", 1.0)]);
        session.group_by = GroupKey::Ad;
        session.filters.accounts.insert("Conta".to_string());

        let prefs = session.preferences(ColumnVisibility::default());
        let restored = SessionContext::with_preferences(session.raw.clone(), &prefs);
        assert_eq!(restored.group_by, GroupKey::Ad);
        assert!(restored.filters.accounts.contains("Conta"));
        assert_eq!(restored.sort, session.sort);
    }
}
