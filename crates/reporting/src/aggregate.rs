//! Metric aggregation — whole-dataset totals and per-group rollups.
//!
//! Derived ratios are recomputed from the summed base metrics every run;
//! nothing here caches across calls.

use insights_core::types::{AggregateRow, CampaignRecord, GlobalSummary, GroupKey};
use std::collections::{HashMap, HashSet};

/// Summed base metrics for one group (or the whole dataset). Ratios are
/// derived from these sums alone.
#[derive(Debug, Clone, Copy, Default)]
struct MetricSums {
    reach: f64,
    impressions: f64,
    spent: f64,
    leads: f64,
    link_clicks: f64,
    count: usize,
}

impl MetricSums {
    fn add(&mut self, record: &CampaignRecord) {
        self.reach += record.reach;
        self.impressions += record.impressions;
        self.spent += record.amount_spent;
        self.leads += record.leads;
        self.link_clicks += record.link_clicks;
        self.count += 1;
    }

    fn frequency(&self) -> f64 {
        if self.reach > 0.0 {
            self.impressions / self.reach
        } else {
            0.0
        }
    }

    fn cost_per_lead(&self) -> f64 {
        if self.leads > 0.0 {
            self.spent / self.leads
        } else {
            0.0
        }
    }

    fn ctr(&self) -> f64 {
        if self.impressions > 0.0 {
            self.link_clicks / self.impressions * 100.0
        } else {
            0.0
        }
    }

    fn cpm(&self) -> f64 {
        if self.impressions > 0.0 {
            self.spent / self.impressions * 1000.0
        } else {
            0.0
        }
    }

    fn cpc_link(&self) -> f64 {
        if self.link_clicks > 0.0 {
            self.spent / self.link_clicks
        } else {
            0.0
        }
    }

    fn into_row(self, name: String) -> AggregateRow {
        AggregateRow {
            frequency: self.frequency(),
            cost_per_lead: self.cost_per_lead(),
            ctr: self.ctr(),
            cpm: self.cpm(),
            name,
            reach: self.reach,
            impressions: self.impressions,
            spent: self.spent,
            leads: self.leads,
            link_clicks: self.link_clicks,
            count: self.count,
        }
    }
}

/// Compute totals, derived averages, and distinct identity counts over the
/// filtered dataset.
pub fn global_summary(records: &[CampaignRecord]) -> GlobalSummary {
    let mut sums = MetricSums::default();
    let mut accounts = HashSet::new();
    let mut campaigns = HashSet::new();
    let mut ad_sets = HashSet::new();
    let mut ads = HashSet::new();

    for record in records {
        sums.add(record);
        accounts.insert(record.account_name.as_str());
        campaigns.insert(record.campaign_name.as_str());
        ad_sets.insert(record.ad_set_name.as_str());
        ads.insert(record.ad_name.as_str());
    }

    GlobalSummary {
        total_reach: sums.reach,
        total_impressions: sums.impressions,
        total_spent: sums.spent,
        total_leads: sums.leads,
        total_link_clicks: sums.link_clicks,
        avg_frequency: sums.frequency(),
        avg_cost_per_lead: sums.cost_per_lead(),
        avg_ctr: sums.ctr(),
        avg_cpm: sums.cpm(),
        avg_cpc_link: sums.cpc_link(),
        unique_accounts: accounts.len(),
        unique_campaigns: campaigns.len(),
        unique_ad_sets: ad_sets.len(),
        unique_ads: ads.len(),
    }
}

/// Partition records by the selected identity field and reduce each group to
/// one rollup row. Emission order is the order of first appearance; sorting
/// is a separate concern.
pub fn group_rows(records: &[CampaignRecord], key: GroupKey) -> Vec<AggregateRow> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, MetricSums> = HashMap::new();

    for record in records {
        let name = key.field_of(record);
        if !groups.contains_key(name) {
            order.push(name.to_string());
        }
        groups.entry(name.to_string()).or_default().add(record);
    }

    order
        .into_iter()
        .map(|name| {
            let sums = groups[&name];
            sums.into_row(name)
        })
        .collect()
}

/// Distinct values of the selected identity field, in order of first
/// appearance. Used by callers to offer filter choices.
pub fn distinct_names(records: &[CampaignRecord], key: GroupKey) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for record in records {
        let name = key.field_of(record);
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }
    names
}
