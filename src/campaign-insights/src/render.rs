//! Presentation formatting for the terminal report.
//!
//! The pipeline returns raw numbers; every locale concern (pt-BR thousand
//! separators, Real currency, percentages) lives here. Currency and integer
//! grouping follow pt-BR; percentages and ratios keep two plain decimals,
//! the way the dashboard rendered them.

use insights_core::types::{AggregateRow, ColumnVisibility, GlobalSummary, GroupKey};

/// Round and group an integer quantity: 1234567 -> "1.234.567".
pub fn format_int(value: f64) -> String {
    group_thousands(value.round() as i64)
}

/// "R$ 1.234,56".
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    format!("R$ {},{:02}", group_thousands(cents / 100), (cents % 100).abs())
}

/// Currency without decimals, used for the large summary values.
pub fn format_currency_whole(value: f64) -> String {
    format!("R$ {}", format_int(value))
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}")
}

/// Compact metric-card number: 1.5M / 12.3K / plain.
pub fn format_compact(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format_int(value)
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// The overview block: headline metrics plus distinct identity counts.
pub fn render_summary(summary: &GlobalSummary) -> String {
    let mut out = String::new();
    out.push_str("Visão Geral\n");
    out.push_str(&format!(
        "  Alcance Total      {}\n",
        format_compact(summary.total_reach)
    ));
    out.push_str(&format!(
        "  Impressões         {}\n",
        format_compact(summary.total_impressions)
    ));
    out.push_str(&format!(
        "  Valor Investido    {}\n",
        format_currency_whole(summary.total_spent)
    ));
    out.push_str(&format!(
        "  Frequência Média   {}\n",
        format_ratio(summary.avg_frequency)
    ));
    out.push_str(&format!(
        "  Leads              {}\n",
        format_int(summary.total_leads)
    ));
    out.push_str(&format!(
        "  CPL                {}\n",
        format_currency(summary.avg_cost_per_lead)
    ));
    out.push_str(&format!(
        "  Cliques            {}\n",
        format_int(summary.total_link_clicks)
    ));
    out.push_str(&format!(
        "  CTR                {}\n",
        format_percent(summary.avg_ctr)
    ));
    out.push_str(&format!(
        "  CPM                {}\n",
        format_currency(summary.avg_cpm)
    ));
    out.push_str(&format!(
        "  Contas {} · Campanhas {} · Conjuntos {} · Anúncios {}",
        summary.unique_accounts,
        summary.unique_campaigns,
        summary.unique_ad_sets,
        summary.unique_ads
    ));
    out
}

fn group_label(group_by: GroupKey) -> &'static str {
    match group_by {
        GroupKey::Account => "Conta",
        GroupKey::Campaign => "Campanha",
        GroupKey::AdSet => "Conjunto de Anúncios",
        GroupKey::Ad => "Anúncio",
    }
}

/// Render the grouped rollups as an aligned text table, honoring column
/// visibility. The first column is the grouping name, left-aligned; metric
/// columns are right-aligned.
pub fn render_table(
    rows: &[AggregateRow],
    group_by: GroupKey,
    visibility: &ColumnVisibility,
) -> String {
    type Fmt = fn(&AggregateRow) -> String;
    let metric_columns: [(&str, bool, Fmt); 9] = [
        ("Leads", visibility.leads, |r| format_int(r.leads)),
        ("CPL", visibility.cost_per_lead, |r| {
            format_currency(r.cost_per_lead)
        }),
        ("Alcance", visibility.reach, |r| format_int(r.reach)),
        ("Impressões", visibility.impressions, |r| {
            format_int(r.impressions)
        }),
        ("Frequência", visibility.frequency, |r| {
            format_ratio(r.frequency)
        }),
        ("Valor gasto", visibility.spent, |r| format_currency(r.spent)),
        ("Cliques", visibility.link_clicks, |r| {
            format_int(r.link_clicks)
        }),
        ("CTR", visibility.ctr, |r| format_percent(r.ctr)),
        ("CPM", visibility.cpm, |r| format_currency(r.cpm)),
    ];

    let mut headers = vec![group_label(group_by).to_string()];
    let mut cells: Vec<Vec<String>> = rows.iter().map(|r| vec![r.name.clone()]).collect();

    for (label, visible, fmt) in metric_columns {
        if !visible {
            continue;
        }
        headers.push(label.to_string());
        for (row, out) in rows.iter().zip(cells.iter_mut()) {
            out.push(fmt(row));
        }
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    render_line(&mut out, &headers, &widths);
    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len().saturating_sub(1));
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for row in &cells {
        render_line(&mut out, row, &widths);
    }
    out.pop();
    out
}

fn render_line(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let pad = widths[i].saturating_sub(cell.chars().count());
        if i == 0 {
            out.push_str(cell);
            if cells.len() > 1 {
                out.push_str(&" ".repeat(pad));
            }
        } else {
            out.push_str(&" ".repeat(pad));
            out.push_str(cell);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousand_grouping() {
        assert_eq!(format_int(0.0), "0");
        assert_eq!(format_int(999.0), "999");
        assert_eq!(format_int(1000.0), "1.000");
        assert_eq!(format_int(1_234_567.0), "1.234.567");
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(0.5), "R$ 0,50");
        assert_eq!(format_currency_whole(1234.56), "R$ 1.235");
    }

    #[test]
    fn test_compact() {
        assert_eq!(format_compact(2_500_000.0), "2.5M");
        assert_eq!(format_compact(12_300.0), "12.3K");
        assert_eq!(format_compact(999.0), "999");
    }

    #[test]
    fn test_table_respects_visibility() {
        let rows = vec![AggregateRow {
            name: "Campanha A".to_string(),
            reach: 1000.0,
            impressions: 2000.0,
            spent: 150.0,
            leads: 15.0,
            link_clicks: 100.0,
            frequency: 2.0,
            cost_per_lead: 10.0,
            ctr: 5.0,
            cpm: 75.0,
            count: 2,
        }];

        let all = render_table(&rows, GroupKey::Campaign, &ColumnVisibility::default());
        assert!(all.contains("Campanha"));
        assert!(all.contains("Leads"));
        assert!(all.contains("R$ 10,00"));

        let mut visibility = ColumnVisibility::default();
        visibility.leads = false;
        visibility.cost_per_lead = false;
        let trimmed = render_table(&rows, GroupKey::Campaign, &visibility);
        assert!(!trimmed.contains("Leads"));
        assert!(!trimmed.contains("CPL"));
        assert!(trimmed.contains("Alcance"));
    }
}
