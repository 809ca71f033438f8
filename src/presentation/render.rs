use crate::analyzers::group_thousands;
use crate::error::Result;
use crate::models::CovidRecord;
use crate::presentation::view::{BarEntry, Bubble, DashboardView, Timeline};
use crate::utils::constants::BAR_CHART_WIDTH;

const NO_DATA: &str = "  (no data in selected range)\n";

pub fn render_json(view: &DashboardView) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();

    out.push_str("Global COVID-19 Data Analysis and Visualization\n\n");
    out.push_str(&view.summary.summary());
    out.push_str("\n\n");

    out.push_str(&format!("Top {} Countries by Total Cases\n", view.top_n));
    out.push_str(&render_bars(&view.top_locations));
    out.push('\n');

    out.push_str("Country Timeline\n");
    if !view.locations.is_empty() {
        out.push_str(&format!("  Countries: {}\n", view.locations.join(", ")));
    }
    match &view.timeline {
        Some(timeline) => out.push_str(&render_timeline(timeline)),
        None => out.push_str(NO_DATA),
    }
    out.push('\n');

    out.push_str("Bubble — Cases vs Deaths (latest per country)\n");
    out.push_str(&render_bubbles(&view.bubbles));
    out.push('\n');

    out.push_str(&format!(
        "Data Preview (showing {} of {} rows)\n",
        view.preview.len(),
        view.preview_total
    ));
    out.push_str(&render_rows(&view.preview));

    out
}

/// Horizontal bars scaled to the largest value.
pub fn render_bars(bars: &[BarEntry]) -> String {
    if bars.is_empty() {
        return NO_DATA.to_string();
    }

    let max = bars.iter().map(|b| b.total_cases).max().unwrap_or(0).max(1);
    let label_width = bars.iter().map(|b| b.location.chars().count()).max().unwrap_or(0);

    bars.iter()
        .map(|bar| {
            let len = ((bar.total_cases as f64 / max as f64) * BAR_CHART_WIDTH as f64).round() as usize;
            format!(
                "  {:<width$} {:<bar_width$} {}\n",
                bar.location,
                "█".repeat(len.max(1)),
                group_thousands(bar.total_cases),
                width = label_width,
                bar_width = BAR_CHART_WIDTH
            )
        })
        .collect()
}

pub fn render_timeline(timeline: &Timeline) -> String {
    let mut out = format!("  {} ({} points)\n", timeline.location, timeline.points.len());
    out.push_str(&format!("  {:<10}  {:>12}  {:>12}\n", "date", "total_cases", "total_deaths"));
    for point in &timeline.points {
        out.push_str(&format!(
            "  {:<10}  {:>12}  {:>12}\n",
            point.date,
            group_thousands(point.total_cases),
            group_thousands(point.total_deaths)
        ));
    }
    out
}

/// Bubbles listed with their log10 coordinates.
pub fn render_bubbles(bubbles: &[Bubble]) -> String {
    if bubbles.is_empty() {
        return NO_DATA.to_string();
    }

    let mut out = format!(
        "  {:<12}  {:>8}  {:>8}  {:>6}\n",
        "location", "log10(c)", "log10(d)", "size"
    );
    for bubble in bubbles {
        out.push_str(&format!(
            "  {:<12}  {:>8.3}  {:>8.3}  {:>6.2}\n",
            bubble.location,
            (bubble.total_cases as f64).log10(),
            (bubble.total_deaths as f64).log10(),
            bubble.size
        ));
    }
    out
}

pub fn render_rows(records: &[CovidRecord]) -> String {
    if records.is_empty() {
        return NO_DATA.to_string();
    }

    let mut out = format!(
        "  {:<10}  {:<12}  {:>12}  {:>12}\n",
        "date", "location", "total_cases", "total_deaths"
    );
    for record in records {
        out.push_str(&format!(
            "  {:<10}  {:<12}  {:>12}  {:>12}\n",
            record.date, record.location, record.total_cases, record.total_deaths
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateWindow;
    use crate::presentation::view::{build_dashboard, DashboardRequest};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn records() -> Vec<CovidRecord> {
        vec![
            CovidRecord::new(day(1), "India".to_string(), 40_000, 100),
            CovidRecord::new(day(2), "USA".to_string(), 20_000, 10),
        ]
    }

    #[test]
    fn test_bars_scale_to_largest() {
        let bars = vec![
            BarEntry {
                location: "India".to_string(),
                total_cases: 40_000,
            },
            BarEntry {
                location: "USA".to_string(),
                total_cases: 20_000,
            },
        ];

        let text = render_bars(&bars);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0].matches('█').count(), BAR_CHART_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_CHART_WIDTH / 2);
        assert!(lines[0].ends_with("40,000"));
    }

    #[test]
    fn test_render_text_sections() {
        let window = DateWindow::new(day(1), day(2)).unwrap();
        let view = build_dashboard(&records(), &DashboardRequest::new(window)).unwrap();

        let text = render_text(&view);

        assert!(text.contains("Top 10 Countries by Total Cases"));
        assert!(text.contains("Countries: India, USA"));
        assert!(text.contains("Data Preview (showing 2 of 2 rows)"));
        assert!(text.contains("4.602"));
    }

    #[test]
    fn test_render_empty_view() {
        let window = DateWindow::new(day(10), day(12)).unwrap();
        let view = build_dashboard(&records(), &DashboardRequest::new(window)).unwrap();

        let text = render_text(&view);

        assert_eq!(text.matches("(no data in selected range)").count(), 4);
    }

    #[test]
    fn test_render_json() {
        let window = DateWindow::new(day(1), day(2)).unwrap();
        let view = build_dashboard(&records(), &DashboardRequest::new(window)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&render_json(&view).unwrap()).unwrap();

        assert_eq!(value["summary"]["rows"], 2);
        assert_eq!(value["top_locations"][0]["location"], "India");
        assert_eq!(value["timeline"]["points"][0]["date"], "2020-01-01");
    }
}
