use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::MetricsError;
use crate::types::RawPeriodRecord;
use crate::MetricsResult;

// ---------------------------------------------------------------------------
// Period keys
// ---------------------------------------------------------------------------

/// Canonicalize a period key to "YYYY-MM".
///
/// Accepts the canonical form and the 6-digit "YYYYMM" shorthand that
/// spreadsheet uploads tend to produce. Anything else is rejected with
/// [`MetricsError::InvalidPeriodFormat`], including well-shaped keys
/// that are not a real calendar month ("2024-13").
pub fn canonicalize_period(raw: &str) -> MetricsResult<String> {
    let invalid = || MetricsError::InvalidPeriodFormat {
        period: raw.to_string(),
    };

    let s = raw.trim();
    let candidate = if s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}", &s[..4], &s[4..])
    } else {
        s.to_string()
    };

    let bytes = candidate.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..].iter().all(u8::is_ascii_digit);
    if !well_formed {
        return Err(invalid());
    }

    let year: i32 = candidate[..4].parse().map_err(|_| invalid())?;
    let month: u32 = candidate[5..].parse().map_err(|_| invalid())?;
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(invalid());
    }

    Ok(candidate)
}

// ---------------------------------------------------------------------------
// Ordered series
// ---------------------------------------------------------------------------

/// A company's records, deduplicated and in strictly increasing period
/// order. The fixed-width zero-padded key makes lexical order
/// chronological, which every cross-period calculation relies on.
#[derive(Debug, Clone, Default)]
pub struct OrderedSeries {
    records: Vec<RawPeriodRecord>,
    replaced: Vec<String>,
}

impl OrderedSeries {
    pub fn records(&self) -> &[RawPeriodRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Periods that appeared more than once in the input; the latest
    /// record won in each case.
    pub fn replaced_periods(&self) -> &[String] {
        &self.replaced
    }
}

/// Normalize an unordered batch of records into an [`OrderedSeries`].
///
/// Every period key is canonicalized first; one bad key rejects the whole
/// batch. Duplicate periods are resolved last-write-wins, matching how
/// repeated imports overwrite earlier uploads. Pure function.
pub fn normalize(records: Vec<RawPeriodRecord>) -> MetricsResult<OrderedSeries> {
    let mut by_period: BTreeMap<String, RawPeriodRecord> = BTreeMap::new();
    let mut replaced = Vec::new();

    for mut record in records {
        let canonical = canonicalize_period(&record.period)?;
        record.period = canonical.clone();
        if by_period.insert(canonical.clone(), record).is_some() {
            replaced.push(canonical);
        }
    }

    Ok(OrderedSeries {
        records: by_period.into_values().collect(),
        replaced,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(period: &str) -> RawPeriodRecord {
        RawPeriodRecord {
            period: period.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_canonical_form_accepted() {
        assert_eq!(canonicalize_period("2024-01").unwrap(), "2024-01");
        assert_eq!(canonicalize_period(" 2024-12 ").unwrap(), "2024-12");
    }

    #[test]
    fn test_six_digit_shorthand_coerced() {
        assert_eq!(canonicalize_period("202401").unwrap(), "2024-01");
    }

    #[test]
    fn test_non_calendar_month_rejected() {
        assert!(canonicalize_period("2024-13").is_err());
        assert!(canonicalize_period("2024-00").is_err());
    }

    #[test]
    fn test_malformed_keys_rejected() {
        for bad in ["2024", "2024-1", "24-01", "2024/01", "abcd-ef", ""] {
            let err = canonicalize_period(bad).unwrap_err();
            assert!(
                matches!(err, MetricsError::InvalidPeriodFormat { .. }),
                "{bad} should be invalid"
            );
        }
    }

    #[test]
    fn test_out_of_order_input_is_sorted() {
        let series =
            normalize(vec![record("2024-01"), record("2024-03"), record("2024-02")]).unwrap();
        let periods: Vec<&str> = series.records().iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, ["2024-01", "2024-02", "2024-03"]);
    }

    #[test]
    fn test_duplicate_period_last_write_wins() {
        let mut first = record("2024-01");
        first.ingresos_netos = Some(dec!(1000));
        let mut second = record("202401");
        second.ingresos_netos = Some(dec!(2500));

        let series = normalize(vec![first, second]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.records()[0].ingresos_netos, Some(dec!(2500)));
        assert_eq!(series.replaced_periods(), ["2024-01"]);
    }

    #[test]
    fn test_one_bad_key_rejects_the_batch() {
        let result = normalize(vec![record("2024-01"), record("not-a-period")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_year_boundary_order() {
        let series = normalize(vec![record("2024-01"), record("2023-12")]).unwrap();
        let periods: Vec<&str> = series.records().iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, ["2023-12", "2024-01"]);
    }
}
