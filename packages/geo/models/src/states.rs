//! US state name utilities.
//!
//! The statistics dataset spells states in full ("California") while the
//! geocode dataset and request lists use USPS abbreviations; lookups here
//! bridge the two. Covers the 50 states, DC, and the inhabited territories
//! that appear in the county statistics data.

/// USPS abbreviations for the 50 states + DC + inhabited territories.
pub const STATE_ABBREVIATIONS: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY", "AS", "GU", "MP", "PR", "VI",
];

/// Maps a full state name (case-insensitive, whitespace-trimmed) to its
/// USPS abbreviation.
///
/// Returns `None` for unrecognized names.
#[must_use]
pub fn abbreviation_for(name: &str) -> Option<&'static str> {
    match name.trim().to_lowercase().as_str() {
        "alabama" => Some("AL"),
        "alaska" => Some("AK"),
        "arizona" => Some("AZ"),
        "arkansas" => Some("AR"),
        "california" => Some("CA"),
        "colorado" => Some("CO"),
        "connecticut" => Some("CT"),
        "delaware" => Some("DE"),
        "district of columbia" => Some("DC"),
        "florida" => Some("FL"),
        "georgia" => Some("GA"),
        "hawaii" => Some("HI"),
        "idaho" => Some("ID"),
        "illinois" => Some("IL"),
        "indiana" => Some("IN"),
        "iowa" => Some("IA"),
        "kansas" => Some("KS"),
        "kentucky" => Some("KY"),
        "louisiana" => Some("LA"),
        "maine" => Some("ME"),
        "maryland" => Some("MD"),
        "massachusetts" => Some("MA"),
        "michigan" => Some("MI"),
        "minnesota" => Some("MN"),
        "mississippi" => Some("MS"),
        "missouri" => Some("MO"),
        "montana" => Some("MT"),
        "nebraska" => Some("NE"),
        "nevada" => Some("NV"),
        "new hampshire" => Some("NH"),
        "new jersey" => Some("NJ"),
        "new mexico" => Some("NM"),
        "new york" => Some("NY"),
        "north carolina" => Some("NC"),
        "north dakota" => Some("ND"),
        "ohio" => Some("OH"),
        "oklahoma" => Some("OK"),
        "oregon" => Some("OR"),
        "pennsylvania" => Some("PA"),
        "rhode island" => Some("RI"),
        "south carolina" => Some("SC"),
        "south dakota" => Some("SD"),
        "tennessee" => Some("TN"),
        "texas" => Some("TX"),
        "utah" => Some("UT"),
        "vermont" => Some("VT"),
        "virginia" => Some("VA"),
        "washington" => Some("WA"),
        "west virginia" => Some("WV"),
        "wisconsin" => Some("WI"),
        "wyoming" => Some("WY"),
        "american samoa" => Some("AS"),
        "guam" => Some("GU"),
        "northern mariana islands" => Some("MP"),
        "puerto rico" => Some("PR"),
        "virgin islands" | "u.s. virgin islands" => Some("VI"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_count() {
        assert_eq!(STATE_ABBREVIATIONS.len(), 56);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(abbreviation_for("california"), Some("CA"));
        assert_eq!(abbreviation_for("California"), Some("CA"));
        assert_eq!(abbreviation_for("CALIFORNIA"), Some("CA"));
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(abbreviation_for("  New York  "), Some("NY"));
    }

    #[test]
    fn territories() {
        assert_eq!(abbreviation_for("Puerto Rico"), Some("PR"));
        assert_eq!(abbreviation_for("Virgin Islands"), Some("VI"));
        assert_eq!(abbreviation_for("Northern Mariana Islands"), Some("MP"));
    }

    #[test]
    fn unknown_name() {
        assert_eq!(abbreviation_for("Cascadia"), None);
        assert_eq!(abbreviation_for(""), None);
    }

    #[test]
    fn every_abbreviation_reachable() {
        let names = [
            "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado",
            "Connecticut", "Delaware", "District of Columbia", "Florida", "Georgia",
            "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa", "Kansas", "Kentucky",
            "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan", "Minnesota",
            "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
            "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota",
            "Ohio", "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island",
            "South Carolina", "South Dakota", "Tennessee", "Texas", "Utah", "Vermont",
            "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
            "American Samoa", "Guam", "Northern Mariana Islands", "Puerto Rico",
            "Virgin Islands",
        ];
        let mut found: Vec<&str> = names
            .iter()
            .map(|name| abbreviation_for(name).unwrap_or_else(|| panic!("no mapping for {name}")))
            .collect();
        found.sort_unstable();
        found.dedup();
        assert_eq!(found.len(), STATE_ABBREVIATIONS.len());
    }
}
