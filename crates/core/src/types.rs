use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

// ─── Records ────────────────────────────────────────────────────────────────

/// One decoded row of the campaign performance export. Immutable once
/// decoded; blank identity names are already replaced by their localized
/// placeholders, so equal names always group together downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub account_name: String,
    pub campaign_name: String,
    pub ad_set_name: String,
    pub ad_name: String,
    pub account_id: String,
    pub campaign_id: String,
    pub ad_set_id: String,
    pub ad_id: String,
    pub ad_label: String,
    /// ISO-8601 calendar day, or empty when the export has no day column.
    pub day: String,
    pub reach: f64,
    pub impressions: f64,
    pub frequency: f64,
    pub currency: String,
    pub amount_spent: f64,
    pub attribution_setting: String,
    pub cost_per_lead: f64,
    pub leads: f64,
    pub link_clicks: f64,
    pub ctr: f64,
    pub cpm: f64,
    pub cpc_link: f64,
    pub cpc_all: f64,
    pub views: f64,
    pub report_start: String,
    pub report_end: String,
}

/// Metadata for one decoder run. A new import wholly replaces any prior
/// dataset, so the id identifies the current dataset generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub dataset_id: Uuid,
    pub imported_at: DateTime<Utc>,
    /// Data lines seen after the skipped header (blank lines excluded).
    pub total_lines: usize,
    pub decoded: usize,
    pub skipped: usize,
    pub full_layout_rows: usize,
    pub legacy_layout_rows: usize,
}

// ─── Grouping & Filtering ───────────────────────────────────────────────────

/// Which identity field of [`CampaignRecord`] supplies the grouping string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Account,
    #[default]
    Campaign,
    AdSet,
    Ad,
}

impl GroupKey {
    /// The identity field value this key selects from a record.
    pub fn field_of<'a>(&self, record: &'a CampaignRecord) -> &'a str {
        match self {
            GroupKey::Account => &record.account_name,
            GroupKey::Campaign => &record.campaign_name,
            GroupKey::AdSet => &record.ad_set_name,
            GroupKey::Ad => &record.ad_name,
        }
    }
}

impl FromStr for GroupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account" => Ok(GroupKey::Account),
            "campaign" => Ok(GroupKey::Campaign),
            "ad-set" | "ad_set" | "adset" => Ok(GroupKey::AdSet),
            "ad" => Ok(GroupKey::Ad),
            other => Err(format!("unknown group key: {other}")),
        }
    }
}

/// Caller-selected subsets of identity values plus an inclusive date
/// interval. An empty selection set means no restriction on that dimension;
/// an absent bound leaves that side of the interval unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub accounts: HashSet<String>,
    pub campaigns: HashSet<String>,
    pub ad_sets: HashSet<String>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

impl FilterCriteria {
    /// True when no filter is active and filtering is the identity.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
            && self.campaigns.is_empty()
            && self.ad_sets.is_empty()
            && self.date_start.is_none()
            && self.date_end.is_none()
    }
}

// ─── Rollups ────────────────────────────────────────────────────────────────

/// One per-group rollup. Ratios are derived from this row's own sums and
/// carry no hidden state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub name: String,
    pub reach: f64,
    pub impressions: f64,
    pub spent: f64,
    pub leads: f64,
    pub link_clicks: f64,
    pub frequency: f64,
    pub cost_per_lead: f64,
    pub ctr: f64,
    pub cpm: f64,
    pub count: usize,
}

/// Whole-dataset totals and derived averages plus distinct identity counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub total_reach: f64,
    pub total_impressions: f64,
    pub total_spent: f64,
    pub total_leads: f64,
    pub total_link_clicks: f64,
    pub avg_frequency: f64,
    pub avg_cost_per_lead: f64,
    pub avg_ctr: f64,
    pub avg_cpm: f64,
    pub avg_cpc_link: f64,
    pub unique_accounts: usize,
    pub unique_campaigns: usize,
    pub unique_ad_sets: usize,
    pub unique_ads: usize,
}

// ─── Sorting & Preferences ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Leads,
    CostPerLead,
    Reach,
    Impressions,
    Frequency,
    #[default]
    Spent,
    LinkClicks,
    Ctr,
    Cpm,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "leads" => Ok(SortField::Leads),
            "cost-per-lead" | "cost_per_lead" | "cpl" => Ok(SortField::CostPerLead),
            "reach" => Ok(SortField::Reach),
            "impressions" => Ok(SortField::Impressions),
            "frequency" => Ok(SortField::Frequency),
            "spent" => Ok(SortField::Spent),
            "link-clicks" | "link_clicks" | "clicks" => Ok(SortField::LinkClicks),
            "ctr" => Ok(SortField::Ctr),
            "cpm" => Ok(SortField::Cpm),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// Field/direction pair applied to grouped rollups. Defaults to spent
/// descending, the ordering the dashboard opens with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Per-column show/hide flags for the rendered table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnVisibility {
    pub leads: bool,
    pub cost_per_lead: bool,
    pub reach: bool,
    pub impressions: bool,
    pub frequency: bool,
    pub spent: bool,
    pub link_clicks: bool,
    pub ctr: bool,
    pub cpm: bool,
}

impl Default for ColumnVisibility {
    fn default() -> Self {
        Self {
            leads: true,
            cost_per_lead: true,
            reach: true,
            impressions: true,
            frequency: true,
            spent: true,
            link_clicks: true,
            ctr: true,
            cpm: true,
        }
    }
}

/// Session preferences persisted between runs via the key-value store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub group_by: GroupKey,
    #[serde(default)]
    pub filters: FilterCriteria,
    #[serde(default)]
    pub column_visibility: ColumnVisibility,
    #[serde(default)]
    pub sort: SortSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_parse() {
        assert_eq!("campaign".parse::<GroupKey>().unwrap(), GroupKey::Campaign);
        assert_eq!("ad-set".parse::<GroupKey>().unwrap(), GroupKey::AdSet);
        assert!("channel".parse::<GroupKey>().is_err());
    }

    #[test]
    fn test_sort_defaults_match_dashboard() {
        let spec = SortSpec::default();
        assert_eq!(spec.field, SortField::Spent);
        assert_eq!(spec.direction, SortDirection::Desc);
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        assert!(FilterCriteria::default().is_empty());

        let mut criteria = FilterCriteria::default();
        criteria.accounts.insert("Conta A".into());
        assert!(!criteria.is_empty());
    }
}
