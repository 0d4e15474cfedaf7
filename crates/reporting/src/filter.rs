//! Filter engine: narrows the raw dataset before aggregation.
//!
//! Categorical selections and the date interval compose by logical AND. A
//! record that lacks the data a filter needs (absent or unparsable day)
//! passes that filter unchanged.

use chrono::NaiveDate;
use insights_core::types::{CampaignRecord, FilterCriteria};

/// Parse an ISO-8601 calendar day. Empty or malformed values yield `None`,
/// which the date filter treats as unconstrained.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Produce the order-preserving subsequence of records passing every active
/// filter.
pub fn apply_filters(
    records: &[CampaignRecord],
    criteria: &FilterCriteria,
) -> Vec<CampaignRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| passes(r, criteria))
        .cloned()
        .collect()
}

fn passes(record: &CampaignRecord, criteria: &FilterCriteria) -> bool {
    if !criteria.accounts.is_empty() && !criteria.accounts.contains(&record.account_name) {
        return false;
    }
    if !criteria.campaigns.is_empty() && !criteria.campaigns.contains(&record.campaign_name) {
        return false;
    }
    if !criteria.ad_sets.is_empty() && !criteria.ad_sets.contains(&record.ad_set_name) {
        return false;
    }
    passes_date(record, criteria)
}

fn passes_date(record: &CampaignRecord, criteria: &FilterCriteria) -> bool {
    // Fail-open: a record without an evaluable day is always retained.
    let Some(day) = parse_day(&record.day) else {
        return true;
    };
    if let Some(start) = criteria.date_start {
        if day < start {
            return false;
        }
    }
    if let Some(end) = criteria.date_end {
        if day > end {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(account: &str, campaign: &str, day: &str) -> CampaignRecord {
        CampaignRecord {
            account_name: account.to_string(),
            campaign_name: campaign.to_string(),
            ad_set_name: "Conjunto".to_string(),
            ad_name: "Anúncio".to_string(),
            account_id: String::new(),
            campaign_id: String::new(),
            ad_set_id: String::new(),
            ad_id: String::new(),
            ad_label: String::new(),
            day: day.to_string(),
            reach: 0.0,
            impressions: 0.0,
            frequency: 0.0,
            currency: "BRL".to_string(),
            amount_spent: 0.0,
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_criteria_returns_input_unchanged() {
        let records = vec![record("A", "C1", ""), record("B", "C2", "")];
        let filtered = apply_filters(&records, &FilterCriteria::default());
        assert_eq!(filtered, records);
    }

    #[test]
    fn test_account_selection() {
        let records = vec![record("A", "C1", ""), record("B", "C2", "")];
        let mut criteria = FilterCriteria::default();
        criteria.accounts.insert("A".to_string());

        let filtered = apply_filters(&records, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].account_name, "A");
    }

    #[test]
    fn test_selection_without_dataset_values_empties_result() {
        let records = vec![record("A", "C1", ""), record("B", "C2", "")];
        let mut criteria = FilterCriteria::default();
        criteria.accounts.insert("Z".to_string());

        assert!(apply_filters(&records, &criteria).is_empty());
    }

    #[test]
    fn test_filters_compose_with_and() {
        let records = vec![
            record("A", "C1", ""),
            record("A", "C2", ""),
            record("B", "C1", ""),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.accounts.insert("A".to_string());
        criteria.campaigns.insert("C1".to_string());

        let filtered = apply_filters(&records, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].campaign_name, "C1");
        assert_eq!(filtered[0].account_name, "A");
    }

    #[test]
    fn test_date_interval_is_inclusive() {
        let records = vec![
            record("A", "C", "2024-03-01"),
            record("A", "C", "2024-03-15"),
            record("A", "C", "2024-03-31"),
            record("A", "C", "2024-04-01"),
        ];
        let criteria = FilterCriteria {
            date_start: Some(date(2024, 3, 1)),
            date_end: Some(date(2024, 3, 31)),
            ..Default::default()
        };

        let filtered = apply_filters(&records, &criteria);
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[2].day, "2024-03-31");
    }

    #[test]
    fn test_absent_bound_is_unbounded() {
        let records = vec![record("A", "C", "2020-01-01"), record("A", "C", "2024-06-01")];
        let criteria = FilterCriteria {
            date_end: Some(date(2024, 1, 1)),
            ..Default::default()
        };

        let filtered = apply_filters(&records, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].day, "2020-01-01");
    }

    #[test]
    fn test_dayless_record_survives_any_date_range() {
        let records = vec![
            record("A", "C", ""),
            record("A", "C", "não-é-data"),
            record("A", "C", "1999-01-01"),
        ];
        let criteria = FilterCriteria {
            date_start: Some(date(2024, 1, 1)),
            date_end: Some(date(2024, 12, 31)),
            ..Default::default()
        };

        // The range excludes every dated record, yet dayless rows remain.
        let filtered = apply_filters(&records, &criteria);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| parse_day(&r.day).is_none()));
    }

    #[test]
    fn test_order_preserved() {
        let records = vec![
            record("A", "C3", ""),
            record("A", "C1", ""),
            record("A", "C2", ""),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.accounts.insert("A".to_string());

        let names: Vec<_> = apply_filters(&records, &criteria)
            .into_iter()
            .map(|r| r.campaign_name)
            .collect();
        assert_eq!(names, vec!["C3", "C1", "C2"]);
    }
}
