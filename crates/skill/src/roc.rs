//! Area under the ROC curve via the trapezoidal rule.

use tlaloc_contingency::ContingencyTable;

/// Computes the area under the ROC curve of an aggregate table.
///
/// Each decision rule contributes one curve point: hit rate
/// `H / (H + M)` against false-alarm rate `FA / (FA + CN)`. Rows where
/// either rate is undefined are dropped. Points are sorted by ascending
/// false-alarm rate (the rule ordering does not guarantee it) and the
/// curve is closed with (0,0) and (1,1) before integrating, so the result
/// always lies in [0, 1].
///
/// Returns NaN when no row has both rates defined (no events, or no
/// non-events, in the whole aggregate). Full precision is kept; rounding
/// is left to presentation.
pub fn area_under_roc(table: &ContingencyTable) -> f64 {
    let mut points: Vec<(f64, f64)> = table
        .rows()
        .iter()
        .filter_map(|row| {
            let events = row.hits + row.misses;
            let non_events = row.false_alarms + row.correct_negatives;
            if events == 0 || non_events == 0 {
                return None;
            }
            let hr = row.hits as f64 / events as f64;
            let far = row.false_alarms as f64 / non_events as f64;
            Some((far, hr))
        })
        .collect();

    if points.is_empty() {
        return f64::NAN;
    }

    points.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    points.insert(0, (0.0, 0.0));
    points.push((1.0, 1.0));

    let mut area = 0.0;
    for pair in points.windows(2) {
        let (far0, hr0) = pair[0];
        let (far1, hr1) = pair[1];
        area += (hr0 + hr1) / 2.0 * (far1 - far0);
    }
    area
}
