use crate::model::{normalize_query, CompanyRecord};

pub fn find_best_match(records: &[CompanyRecord], query: &str) -> Option<CompanyRecord> {
    let normalized_query = normalize_query(query);
    if normalized_query.is_empty() {
        return None;
    }

    records
        .iter()
        .find(|record| is_exact(record, &normalized_query))
        .or_else(|| {
            records
                .iter()
                .find(|record| is_partial(record, &normalized_query))
        })
        .cloned()
}

pub fn filter_suggestions(records: &[CompanyRecord], query: &str) -> Vec<CompanyRecord> {
    let normalized_query = normalize_query(query);
    if normalized_query.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| is_partial(record, &normalized_query))
        .cloned()
        .collect()
}

fn is_exact(record: &CompanyRecord, normalized_query: &str) -> bool {
    record.folded_name() == normalized_query || record.folded_code() == normalized_query
}

fn is_partial(record: &CompanyRecord, normalized_query: &str) -> bool {
    record.folded_name().contains(normalized_query)
        || record.folded_code().contains(normalized_query)
}
