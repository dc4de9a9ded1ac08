//! Static country and region tables used to build location form options.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, upper case.
    pub code: &'static str,
    /// ISO 3166-1 alpha-3 code, lower case (the search-console country filter format).
    pub alpha3: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionOption {
    pub value: String,
    pub label: String,
}

const fn c(code: &'static str, alpha3: &'static str, name: &'static str) -> Country {
    Country { code, alpha3, name }
}

static COUNTRIES: &[Country] = &[
    c("US", "usa", "United States"),
    c("CA", "can", "Canada"),
    c("GB", "gbr", "United Kingdom"),
    c("IE", "irl", "Ireland"),
    c("AU", "aus", "Australia"),
    c("NZ", "nzl", "New Zealand"),
    c("DE", "deu", "Germany"),
    c("FR", "fra", "France"),
    c("ES", "esp", "Spain"),
    c("IT", "ita", "Italy"),
    c("NL", "nld", "Netherlands"),
    c("BE", "bel", "Belgium"),
    c("CH", "che", "Switzerland"),
    c("AT", "aut", "Austria"),
    c("SE", "swe", "Sweden"),
    c("NO", "nor", "Norway"),
    c("DK", "dnk", "Denmark"),
    c("FI", "fin", "Finland"),
    c("PL", "pol", "Poland"),
    c("PT", "prt", "Portugal"),
    c("MX", "mex", "Mexico"),
    c("BR", "bra", "Brazil"),
    c("AR", "arg", "Argentina"),
    c("IN", "ind", "India"),
    c("JP", "jpn", "Japan"),
    c("KR", "kor", "South Korea"),
    c("SG", "sgp", "Singapore"),
    c("ZA", "zaf", "South Africa"),
    c("AE", "are", "United Arab Emirates"),
    c("PH", "phl", "Philippines"),
];

static US_STATES: &[&str] = &[
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "District of Columbia", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois",
    "Indiana", "Iowa", "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts",
    "Michigan", "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada",
    "New Hampshire", "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota",
    "Ohio", "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina",
    "South Dakota", "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington",
    "West Virginia", "Wisconsin", "Wyoming",
];

static CA_PROVINCES: &[&str] = &[
    "Alberta", "British Columbia", "Manitoba", "New Brunswick", "Newfoundland and Labrador",
    "Northwest Territories", "Nova Scotia", "Nunavut", "Ontario", "Prince Edward Island",
    "Quebec", "Saskatchewan", "Yukon",
];

static AU_STATES: &[&str] = &[
    "Australian Capital Territory", "New South Wales", "Northern Territory", "Queensland",
    "South Australia", "Tasmania", "Victoria", "Western Australia",
];

pub fn countries() -> &'static [Country] {
    COUNTRIES
}

/// Look up a country by alpha-2 code, case-insensitively.
pub fn country(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Regions (states, provinces, territories) known for a country.
pub fn regions_for(code: &str) -> &'static [&'static str] {
    match code.trim().to_ascii_uppercase().as_str() {
        "US" => US_STATES,
        "CA" => CA_PROVINCES,
        "AU" => AU_STATES,
        _ => &[],
    }
}

/// Form options for a country: the whole country first, then each region.
pub fn region_options(code: &str) -> Vec<RegionOption> {
    let Some(country) = country(code) else {
        return Vec::new();
    };
    let mut options = vec![RegionOption {
        value: String::new(),
        label: format!("All of {}", country.name),
    }];
    options.extend(regions_for(country.code).iter().map(|r| RegionOption {
        value: r.to_string(),
        label: r.to_string(),
    }));
    options
}
