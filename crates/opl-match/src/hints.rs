use chrono::NaiveDate;

/// Caller-supplied context for a single lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupHints {
    /// Expected weight class in kg; `0.0` means unknown.
    pub weight_class_kg: f64,
    /// Meet the lifter is entered in. Reported back, not scored.
    pub meet_name: String,
    /// Reference date for recency.
    ///
    /// Defaults to the index build date, not today, so the same index gives
    /// the same scores after it is persisted and reloaded. Set this to
    /// today's date for wall-clock recency.
    pub as_of: Option<NaiveDate>,
}

impl LookupHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight_class(mut self, kg: f64) -> Self {
        self.weight_class_kg = kg;
        self
    }

    pub fn with_meet_name(mut self, meet_name: impl Into<String>) -> Self {
        self.meet_name = meet_name.into();
        self
    }

    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }
}
