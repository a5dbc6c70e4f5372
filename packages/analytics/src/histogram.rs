//! Fixed-width back-to-back gender histogram.

use vleague_analytics_models::{GenderHistogram, HistogramBucket};
use vleague_match_models::{GenderSegment, MatchRecord};

use crate::AnalyticsError;

/// Absorbs binary floating point error so a rate sitting exactly on a
/// boundary (`1.0 / 0.2 = 4.999...`) lands in the upper bucket.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// Bucket layout: `count` half-open intervals of `width` starting at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBins {
    width: f64,
    upper: f64,
    count: usize,
}

impl HistogramBins {
    /// Layout used by the gender distribution chart: 0.2 wide over
    /// `[0.0, 3.0)`.
    pub const GENDER: Self = Self {
        width: 0.2,
        upper: 3.0,
        count: 15,
    };

    /// Builds a layout of `width`-wide buckets covering `[0, upper)`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidBins`] if either bound is not a
    /// positive finite number or `upper` is not a whole multiple of `width`.
    pub fn new(width: f64, upper: f64) -> Result<Self, AnalyticsError> {
        if !(width.is_finite() && width > 0.0 && upper.is_finite() && upper > 0.0) {
            return Err(AnalyticsError::InvalidBins { width, upper });
        }

        let buckets = upper / width;
        let rounded = buckets.round();
        if (buckets - rounded).abs() > BOUNDARY_EPSILON || rounded < 1.0 {
            return Err(AnalyticsError::InvalidBins { width, upper });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = rounded as usize;
        Ok(Self {
            width,
            upper,
            count,
        })
    }

    /// The gender layout with `width` and/or `upper` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidBins`] if the resulting layout is
    /// invalid (see [`Self::new`]).
    pub fn with_overrides(width: Option<f64>, upper: Option<f64>) -> Result<Self, AnalyticsError> {
        match (width, upper) {
            (None, None) => Ok(Self::GENDER),
            (width, upper) => Self::new(
                width.unwrap_or(Self::GENDER.width),
                upper.unwrap_or(Self::GENDER.upper),
            ),
        }
    }

    /// Bucket width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Number of buckets.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Exclusive upper bound of the last bucket.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// Bucket index for `rate`, or `None` if it falls outside
    /// `[0, upper)` or is not finite.
    #[must_use]
    pub fn index(&self, rate: f64) -> Option<usize> {
        if !rate.is_finite() || rate < 0.0 || rate >= self.upper() {
            return None;
        }

        let raw = (rate / self.width + BOUNDARY_EPSILON).floor();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = raw as usize;
        Some(index.min(self.count - 1))
    }

    fn bucket(&self, index: usize) -> HistogramBucket {
        #[allow(clippy::cast_precision_loss)]
        let lower = self.width * index as f64;
        let upper = lower + self.width;
        HistogramBucket {
            lower,
            upper,
            label: format!("{lower:.1}~{upper:.1}%"),
            men: 0,
            women: 0,
        }
    }
}

impl Default for HistogramBins {
    fn default() -> Self {
        Self::GENDER
    }
}

/// Bins `(segment, rate)` pairs into signed per-bucket counts.
///
/// Men are counted downwards and women upwards so the two series can be
/// drawn back to back. Rates outside the layout are dropped.
#[must_use]
pub fn bin_gender_rates<I>(pairs: I, bins: HistogramBins) -> GenderHistogram
where
    I: IntoIterator<Item = (GenderSegment, f64)>,
{
    let mut buckets: Vec<HistogramBucket> = (0..bins.count).map(|i| bins.bucket(i)).collect();
    let mut dropped = 0_usize;

    for (segment, rate) in pairs {
        let Some(index) = bins.index(rate) else {
            dropped += 1;
            continue;
        };
        match segment {
            GenderSegment::Men => buckets[index].men -= 1,
            GenderSegment::Women => buckets[index].women += 1,
        }
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} rates outside [0, {})", bins.upper());
    }

    let max_abs = buckets
        .iter()
        .flat_map(|b| [b.men.unsigned_abs(), b.women.unsigned_abs()])
        .max()
        .unwrap_or(0);

    GenderHistogram { buckets, max_abs }
}

/// Bins every record that has both a gender segment and a rate.
#[must_use]
pub fn histogram_from_records(records: &[MatchRecord], bins: HistogramBins) -> GenderHistogram {
    bin_gender_rates(
        records
            .iter()
            .filter_map(|r| Some((r.gender?, r.rate()?))),
        bins,
    )
}

/// Histogram of the records whose home city equals `city`, or of every
/// record when `city` is `None`.
#[must_use]
pub fn gender_distribution(
    records: &[MatchRecord],
    city: Option<&str>,
    bins: HistogramBins,
) -> GenderHistogram {
    match city {
        Some(city) => {
            let selected: Vec<MatchRecord> = records
                .iter()
                .filter(|r| r.home_city.as_deref() == Some(city))
                .cloned()
                .collect();
            histogram_from_records(&selected, bins)
        }
        None => histogram_from_records(records, bins),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GenderSegment::{Men, Women};

    #[test]
    fn gender_layout_has_fifteen_labelled_buckets() {
        let hist = bin_gender_rates(std::iter::empty(), HistogramBins::GENDER);
        assert_eq!(hist.buckets.len(), 15);
        assert_eq!(hist.labels()[0], "0.0~0.2%");
        assert_eq!(hist.labels()[5], "1.0~1.2%");
        assert_eq!(hist.labels()[14], "2.8~3.0%");
        assert_eq!(hist.max_abs, 0);
    }

    #[test]
    fn boundary_rate_lands_in_upper_bucket() {
        let bins = HistogramBins::GENDER;
        assert_eq!(bins.index(1.0), Some(5));
        assert_eq!(bins.index(0.6), Some(3));
        assert_eq!(bins.index(0.0), Some(0));
        assert_eq!(bins.index(0.19), Some(0));
        assert_eq!(bins.index(2.99), Some(14));
    }

    #[test]
    fn out_of_range_rates_are_dropped() {
        let bins = HistogramBins::GENDER;
        assert_eq!(bins.index(3.0), None);
        assert_eq!(bins.index(4.5), None);
        assert_eq!(bins.index(-0.1), None);
        assert_eq!(bins.index(f64::NAN), None);
    }

    #[test]
    fn counts_are_signed_by_segment() {
        let hist = bin_gender_rates(
            vec![(Men, 1.0), (Men, 1.1), (Women, 1.05), (Women, 0.1)],
            HistogramBins::GENDER,
        );
        assert_eq!(hist.buckets[5].men, -2);
        assert_eq!(hist.buckets[5].women, 1);
        assert_eq!(hist.buckets[0].women, 1);
        assert_eq!(hist.max_abs, 2);
        assert!(hist.men().iter().all(|&m| m <= 0));
        assert!(hist.women().iter().all(|&w| w >= 0));
    }

    #[test]
    fn totals_match_in_range_rows() {
        let pairs = vec![
            (Men, 0.3),
            (Men, 2.5),
            (Men, 3.2),
            (Women, 0.9),
            (Women, 1.4),
            (Women, 2.2),
            (Women, 7.0),
        ];
        let hist = bin_gender_rates(pairs.clone(), HistogramBins::GENDER);

        let men_in_range = pairs
            .iter()
            .filter(|(s, r)| *s == Men && (0.0..3.0).contains(r))
            .count();
        let women_in_range = pairs
            .iter()
            .filter(|(s, r)| *s == Women && (0.0..3.0).contains(r))
            .count();

        let men_total: u64 = hist.men().iter().map(|m| m.unsigned_abs()).sum();
        let women_total: u64 = hist.women().iter().map(|w| w.unsigned_abs()).sum();
        assert_eq!(men_total, men_in_range as u64);
        assert_eq!(women_total, women_in_range as u64);
    }

    #[test]
    fn records_without_gender_or_rate_are_skipped() {
        let records = vec![
            MatchRecord {
                gender: Some(Women),
                household_rate: Some(1.0),
                ..MatchRecord::default()
            },
            MatchRecord {
                gender: None,
                household_rate: Some(1.0),
                ..MatchRecord::default()
            },
            MatchRecord {
                gender: Some(Men),
                household_rate: None,
                ..MatchRecord::default()
            },
        ];
        let hist = histogram_from_records(&records, HistogramBins::GENDER);
        assert_eq!(hist.women().iter().sum::<i64>(), 1);
        assert_eq!(hist.men().iter().sum::<i64>(), 0);
    }

    #[test]
    fn filters_by_city_before_binning() {
        let records = vec![
            MatchRecord {
                home_city: Some("수원시".to_string()),
                gender: Some(Women),
                household_rate: Some(1.0),
                ..MatchRecord::default()
            },
            MatchRecord {
                home_city: Some("김천시".to_string()),
                gender: Some(Women),
                household_rate: Some(1.0),
                ..MatchRecord::default()
            },
        ];
        let all = gender_distribution(&records, None, HistogramBins::GENDER);
        let suwon = gender_distribution(&records, Some("수원시"), HistogramBins::GENDER);
        let none = gender_distribution(&records, Some("Atlantis"), HistogramBins::GENDER);
        assert_eq!(all.buckets[5].women, 2);
        assert_eq!(suwon.buckets[5].women, 1);
        assert_eq!(none.max_abs, 0);
        assert_eq!(none.buckets.len(), 15);
    }

    #[test]
    fn custom_layout() {
        let bins = HistogramBins::new(0.5, 2.0).unwrap();
        assert_eq!(bins.count(), 4);
        assert_eq!(bins.index(1.5), Some(3));
        assert_eq!(bins.index(2.0), None);
    }

    #[test]
    fn overrides_fall_back_to_gender_layout() {
        assert_eq!(
            HistogramBins::with_overrides(None, None).unwrap(),
            HistogramBins::GENDER
        );
        let wide = HistogramBins::with_overrides(Some(0.5), None).unwrap();
        assert_eq!(wide.count(), 6);
        let short = HistogramBins::with_overrides(None, Some(2.0)).unwrap();
        assert_eq!(short.count(), 10);
        assert!(HistogramBins::with_overrides(Some(0.7), None).is_err());
    }

    #[test]
    fn rejects_invalid_layouts() {
        assert!(matches!(
            HistogramBins::new(0.0, 3.0),
            Err(AnalyticsError::InvalidBins { .. })
        ));
        assert!(HistogramBins::new(0.2, -1.0).is_err());
        assert!(HistogramBins::new(0.4, 1.0).is_err());
        assert!(HistogramBins::new(f64::NAN, 3.0).is_err());
    }
}
