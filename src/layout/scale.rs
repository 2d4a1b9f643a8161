use chrono::{Datelike, NaiveDate, TimeDelta};

/// Band scale over a fixed number of categories, following the usual
/// band-scale semantics (inner/outer padding, centered alignment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
    len: usize,
}

impl BandScale {
    pub fn new(len: usize, range: (f64, f64), padding_inner: f64, padding_outer: f64) -> Self {
        let align = 0.5;
        let (r0, r1) = range;
        let n = len as f64;
        let step = (r1 - r0) / (n - padding_inner + padding_outer * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding_inner)) * align;
        Self {
            start,
            step,
            bandwidth: step * (1.0 - padding_inner),
            len,
        }
    }

    pub fn position(&self, idx: usize) -> f64 {
        self.start + self.step * idx as f64
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Linear scale from calendar dates (day resolution) to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    fn span_days(&self) -> f64 {
        (self.domain.1 - self.domain.0).num_days() as f64
    }

    pub fn apply(&self, date: NaiveDate) -> f64 {
        let span = self.span_days();
        if span == 0.0 {
            return (self.range.0 + self.range.1) / 2.0;
        }
        let t = (date - self.domain.0).num_days() as f64 / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Maps a pixel back to the nearest day. Results outside the
    /// representable date range saturate.
    pub fn invert(&self, px: f64) -> NaiveDate {
        let extent = self.range.1 - self.range.0;
        if extent == 0.0 {
            return self.domain.0;
        }
        let days = ((px - self.range.0) / extent * self.span_days()).round();
        TimeDelta::try_days(days as i64)
            .and_then(|delta| self.domain.0.checked_add_signed(delta))
            .unwrap_or(if days < 0.0 { NaiveDate::MIN } else { NaiveDate::MAX })
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Rounds to the nearest January 1st; exact midpoints round up.
pub fn round_to_year(date: NaiveDate) -> NaiveDate {
    let floor = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
    let Some(ceil) = NaiveDate::from_ymd_opt(date.year() + 1, 1, 1) else {
        return floor;
    };
    if date == floor {
        return floor;
    }
    if (date - floor) < (ceil - date) { floor } else { ceil }
}
