//! Column names of the results dataset.

pub const NAME: &str = "Name";
pub const WEIGHT_CLASS: &str = "WeightClassKg";
pub const SQUAT: &str = "Best3SquatKg";
pub const BENCH: &str = "Best3BenchKg";
pub const DEADLIFT: &str = "Best3DeadliftKg";
pub const TOTAL: &str = "TotalKg";
pub const DOTS: &str = "Dots";
pub const BODYWEIGHT: &str = "BodyweightKg";
pub const AGE: &str = "Age";
pub const DATE: &str = "Date";
pub const MEET_NAME: &str = "MeetName";
pub const DIVISION: &str = "Division";
pub const FEDERATION: &str = "Federation";
pub const COUNTRY: &str = "Country";

/// Columns the index builder reads. Only `Name` is mandatory.
pub const INDEXED: [&str; 14] = [
    NAME,
    WEIGHT_CLASS,
    SQUAT,
    BENCH,
    DEADLIFT,
    TOTAL,
    DOTS,
    BODYWEIGHT,
    AGE,
    DATE,
    MEET_NAME,
    DIVISION,
    FEDERATION,
    COUNTRY,
];
