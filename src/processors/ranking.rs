use crate::models::CovidRecord;

/// The `n` rows with the highest `total_cases`, highest first.
///
/// The sort is stable: rows with equal counts keep their input order, so the
/// earliest-inserted row wins a tie at the cut-off.
pub fn top_n(records: &[CovidRecord], n: usize) -> Vec<CovidRecord> {
    let mut ranked: Vec<&CovidRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.total_cases.cmp(&a.total_cases));
    ranked.into_iter().take(n).cloned().collect()
}
