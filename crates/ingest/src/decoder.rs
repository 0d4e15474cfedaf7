//! Record decoder: maps tokenized field lists into [`CampaignRecord`]s.
//!
//! The header line is skipped unconditionally. Rows below the minimum field
//! count and summary artifact rows (both primary identity fields blank) are
//! dropped silently; nothing in here raises.

use chrono::Utc;
use insights_core::types::{CampaignRecord, ImportReport};
use tracing::debug;
use uuid::Uuid;

use crate::numeric::parse_metric;
use crate::schema::ColumnLayout;
use crate::tokenizer::tokenize_line;

/// Placeholders substituted for blank identity names at decode time, so that
/// nameless rows always group together downstream.
pub const PLACEHOLDER_ACCOUNT: &str = "Sem conta";
pub const PLACEHOLDER_CAMPAIGN: &str = "Sem campanha";
pub const PLACEHOLDER_AD_SET: &str = "Sem conjunto";
pub const PLACEHOLDER_AD: &str = "Sem anúncio";

const DEFAULT_CURRENCY: &str = "BRL";

/// Decode a whole export into records, in input order, plus an import
/// report. Input with fewer than two lines yields an empty dataset.
pub fn decode_export(content: &str) -> (Vec<CampaignRecord>, ImportReport) {
    let mut report = ImportReport {
        dataset_id: Uuid::new_v4(),
        imported_at: Utc::now(),
        total_lines: 0,
        decoded: 0,
        skipped: 0,
        full_layout_rows: 0,
        legacy_layout_rows: 0,
    };

    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 2 {
        return (Vec::new(), report);
    }

    let mut records = Vec::new();

    // First line is always the header, regardless of content.
    for line in &lines[1..] {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        report.total_lines += 1;

        match decode_line(line) {
            Some((record, layout)) => {
                match layout {
                    ColumnLayout::Full => report.full_layout_rows += 1,
                    ColumnLayout::Legacy => report.legacy_layout_rows += 1,
                }
                records.push(record);
                report.decoded += 1;
            }
            None => report.skipped += 1,
        }
    }

    debug!(
        dataset_id = %report.dataset_id,
        decoded = report.decoded,
        skipped = report.skipped,
        "export decoded"
    );

    (records, report)
}

/// Decode one data line. `None` when the row is below the minimum field
/// count or is a summary artifact.
pub fn decode_line(line: &str) -> Option<(CampaignRecord, ColumnLayout)> {
    let values = tokenize_line(line);
    let layout = ColumnLayout::detect(values.len())?;
    let cols = layout.columns();

    // Summary rows carry neither an account nor a campaign name.
    if values[cols.account_name].is_empty() && values[cols.campaign_name].is_empty() {
        return None;
    }

    let record = CampaignRecord {
        account_name: named(&values, cols.account_name, PLACEHOLDER_ACCOUNT),
        campaign_name: named(&values, cols.campaign_name, PLACEHOLDER_CAMPAIGN),
        ad_set_name: named(&values, cols.ad_set_name, PLACEHOLDER_AD_SET),
        ad_name: named(&values, cols.ad_name, PLACEHOLDER_AD),
        account_id: text(&values, Some(cols.account_id)),
        campaign_id: text(&values, Some(cols.campaign_id)),
        ad_set_id: text(&values, Some(cols.ad_set_id)),
        ad_id: text(&values, Some(cols.ad_id)),
        ad_label: text(&values, Some(cols.ad_label)),
        day: text(&values, cols.day),
        reach: metric(&values, Some(cols.reach)),
        impressions: metric(&values, Some(cols.impressions)),
        frequency: metric(&values, Some(cols.frequency)),
        currency: {
            let c = text(&values, Some(cols.currency));
            if c.is_empty() {
                DEFAULT_CURRENCY.to_string()
            } else {
                c
            }
        },
        amount_spent: metric(&values, Some(cols.amount_spent)),
        attribution_setting: text(&values, Some(cols.attribution_setting)),
        cost_per_lead: metric(&values, cols.cost_per_lead),
        leads: metric(&values, cols.leads),
        link_clicks: metric(&values, cols.link_clicks),
        ctr: metric(&values, cols.ctr),
        cpm: metric(&values, cols.cpm),
        cpc_link: metric(&values, cols.cpc_link),
        cpc_all: metric(&values, cols.cpc_all),
        views: metric(&values, cols.views),
        report_start: text(&values, Some(cols.report_start)),
        report_end: text(&values, Some(cols.report_end)),
    };

    Some((record, layout))
}

/// Text column accessor. Absent columns (unmapped in the layout, or beyond
/// the row's field count) read as empty.
fn text(values: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| values.get(i)).cloned().unwrap_or_default()
}

/// Identity-name accessor with placeholder substitution for blanks.
fn named(values: &[String], idx: usize, placeholder: &str) -> String {
    match values.get(idx) {
        Some(v) if !v.is_empty() => v.clone(),
        _ => placeholder.to_string(),
    }
}

/// Metric column accessor. Absent columns and unparsable values read as 0.
fn metric(values: &[String], idx: Option<usize>) -> f64 {
    idx.and_then(|i| values.get(i))
        .map(|v| parse_metric(v))
        .unwrap_or(0.0)
}
