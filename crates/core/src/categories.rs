//! Fixed category vocabularies for report submission.

use rapport_db::entities::report::ReportKind;

/// Categories available for negative reports.
pub const NEGATIVE_CATEGORIES: [&str; 10] = [
    "Fraud",
    "Scam",
    "Theft",
    "Poor Service",
    "Misconduct",
    "Unprofessional Behavior",
    "Breach of Contract",
    "Overcharging",
    "Discrimination",
    "Other",
];

/// Categories available for positive reports.
pub const POSITIVE_CATEGORIES: [&str; 10] = [
    "Excellent Service",
    "Honesty",
    "Refund Provided",
    "Community Contribution",
    "Fair Pricing",
    "Professional Conduct",
    "Timely Delivery",
    "Going Above and Beyond",
    "Transparency",
    "Other",
];

/// The category vocabulary for a report kind.
#[must_use]
pub const fn categories_for(kind: &ReportKind) -> &'static [&'static str] {
    match kind {
        ReportKind::Positive => &POSITIVE_CATEGORIES,
        ReportKind::Negative => &NEGATIVE_CATEGORIES,
    }
}

/// Whether the category belongs to the kind's vocabulary.
#[must_use]
pub fn is_valid_category(kind: &ReportKind, category: &str) -> bool {
    categories_for(kind).contains(&category)
}
