//! Positional column schema for the campaign export.
//!
//! The export has two observed layouts: the full day-level report and a
//! reduced legacy report without day or lead/click columns. The layout is
//! selected per row from the observed field count, and every column access
//! goes through an explicit index map rather than magic offsets.

pub const DELIMITER: char = ',';
pub const QUOTE: char = '"';

/// Field count of the reduced legacy layout.
pub const LEGACY_MIN_FIELDS: usize = 17;
/// Field count at which a row is read as the full day-level layout.
pub const FULL_MIN_FIELDS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// Day-level export with lead and click metrics (20+ fields).
    Full,
    /// Reduced historical export (17-19 fields).
    Legacy,
}

impl ColumnLayout {
    /// Select the layout for an observed field count. `None` means the row
    /// is below the minimum and must be discarded.
    pub fn detect(field_count: usize) -> Option<ColumnLayout> {
        if field_count >= FULL_MIN_FIELDS {
            Some(ColumnLayout::Full)
        } else if field_count >= LEGACY_MIN_FIELDS {
            Some(ColumnLayout::Legacy)
        } else {
            None
        }
    }

    pub fn columns(&self) -> &'static ColumnMap {
        match self {
            ColumnLayout::Full => &FULL_LAYOUT,
            ColumnLayout::Legacy => &LEGACY_LAYOUT,
        }
    }
}

/// Index of each business attribute within a tokenized row. `None` marks a
/// column the layout does not carry; the decoder substitutes the field's
/// default. Trailing indices may exceed a particular row's field count, which
/// the decoder also treats as absent.
#[derive(Debug)]
pub struct ColumnMap {
    pub account_name: usize,
    pub campaign_name: usize,
    pub ad_set_name: usize,
    pub ad_name: usize,
    pub account_id: usize,
    pub campaign_id: usize,
    pub ad_set_id: usize,
    pub ad_id: usize,
    pub ad_label: usize,
    pub day: Option<usize>,
    pub reach: usize,
    pub impressions: usize,
    pub frequency: usize,
    pub currency: usize,
    pub amount_spent: usize,
    pub attribution_setting: usize,
    pub cost_per_lead: Option<usize>,
    pub leads: Option<usize>,
    pub link_clicks: Option<usize>,
    pub ctr: Option<usize>,
    pub cpm: Option<usize>,
    pub cpc_link: Option<usize>,
    pub cpc_all: Option<usize>,
    pub views: Option<usize>,
    pub report_start: usize,
    pub report_end: usize,
}

pub const FULL_LAYOUT: ColumnMap = ColumnMap {
    account_name: 0,
    campaign_name: 1,
    ad_set_name: 2,
    ad_name: 3,
    account_id: 4,
    campaign_id: 5,
    ad_set_id: 6,
    ad_id: 7,
    ad_label: 8,
    day: Some(9),
    reach: 10,
    impressions: 11,
    frequency: 12,
    currency: 13,
    amount_spent: 14,
    attribution_setting: 15,
    cost_per_lead: Some(16),
    leads: Some(17),
    link_clicks: Some(18),
    ctr: Some(19),
    cpm: Some(20),
    cpc_link: Some(21),
    cpc_all: Some(22),
    views: Some(23),
    report_start: 24,
    report_end: 25,
};

pub const LEGACY_LAYOUT: ColumnMap = ColumnMap {
    account_name: 0,
    campaign_name: 1,
    ad_set_name: 2,
    ad_name: 3,
    account_id: 4,
    campaign_id: 5,
    ad_set_id: 6,
    ad_id: 7,
    ad_label: 8,
    day: None,
    reach: 9,
    impressions: 10,
    frequency: 11,
    currency: 12,
    amount_spent: 13,
    attribution_setting: 14,
    cost_per_lead: None,
    leads: None,
    link_clicks: None,
    ctr: None,
    cpm: None,
    cpc_link: None,
    cpc_all: None,
    views: None,
    report_start: 15,
    report_end: 16,
};
