/// Separator between explanation facts
pub const SEPARATOR: &str = " • ";

/// Explanation used when no fact applies
pub const FALLBACK: &str = "Matches your criteria";

/// Facts an explanation can mention
#[derive(Debug, Clone, Copy)]
pub struct ExplanationFacts<'a> {
    pub cuisine_match: bool,
    pub price_match: bool,
    pub tag_matches: &'a [&'a str],
    pub distance_km: Option<f64>,
    pub rating: Option<f64>,
}

/// Build a human-readable summary of why a candidate matched
///
/// Facts appear in a fixed order: cuisine, price, tags, distance, rating.
/// Informational only, never consulted by filtering or scoring.
pub fn build_explanation(facts: &ExplanationFacts<'_>) -> String {
    let mut parts = Vec::with_capacity(5);

    if facts.cuisine_match {
        parts.push("Cuisine matches".to_string());
    }
    if facts.price_match {
        parts.push("Price range matches".to_string());
    }
    if !facts.tag_matches.is_empty() {
        parts.push(format!("Tags matched: {}", facts.tag_matches.join(", ")));
    }
    if let Some(distance) = facts.distance_km {
        parts.push(format!("Within {} km", one_decimal(distance)));
    }
    if let Some(rating) = facts.rating {
        parts.push(format!("Rating {}", one_decimal(rating)));
    }

    if parts.is_empty() {
        FALLBACK.to_string()
    } else {
        parts.join(SEPARATOR)
    }
}

/// Format with one decimal, rounding exact ties away from zero
///
/// `{:.1}` rounds the exact binary value and sends ties to even. Ties only
/// occur on odd multiples of 0.25, where `value * 10` is exact.
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}
