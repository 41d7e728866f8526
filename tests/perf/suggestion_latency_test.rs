use std::time::Instant;

use crate::model::CompanyRecord;
use crate::search::{filter_suggestions, find_best_match};

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn keystroke_filter_p95_under_15ms() {
    let mut records: Vec<CompanyRecord> = (0..10_000)
        .map(|i| CompanyRecord::new(&format!("{:04}", 1000 + i), &format!("サンプル商事{i:05}")))
        .collect();
    records.push(CompanyRecord::new("9984", "ソフトバンクグループ"));

    for _ in 0..30 {
        let _ = filter_suggestions(&records, "グループ");
    }

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(80);
        for _ in 0..80 {
            let start = Instant::now();
            let _ = filter_suggestions(&records, "グループ");
            let _ = find_best_match(&records, "9984");
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
        }
        batch_p95.push(p95_ms(&mut samples));
    }

    batch_p95.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_p95 = batch_p95[batch_p95.len() / 2];

    assert!(
        median_p95 <= 15.0,
        "median batch p95 too high: {median_p95:.3}ms (budget 15.0ms); batches={batch_p95:?}",
    );
}
