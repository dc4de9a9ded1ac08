//! Country and region table tests.

use searchdash::regions::{countries, country, region_options, regions_for};

#[test]
fn country_lookup_is_case_insensitive() {
    let us = country("us").unwrap();
    assert_eq!(us.code, "US");
    assert_eq!(us.alpha3, "usa");
    assert_eq!(us.name, "United States");
    assert!(country("ZZ").is_none());
}

#[test]
fn country_codes_are_unique() {
    let mut codes: Vec<&str> = countries().iter().map(|c| c.code).collect();
    let total = codes.len();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), total);
}

#[test]
fn alpha3_codes_are_lower_case() {
    for c in countries() {
        assert_eq!(c.alpha3.len(), 3, "{}", c.code);
        assert_eq!(c.alpha3, c.alpha3.to_lowercase(), "{}", c.code);
    }
}

#[test]
fn us_regions_include_states_and_dc() {
    let states = regions_for("US");
    assert!(states.contains(&"California"));
    assert!(states.contains(&"District of Columbia"));
    assert!(states.len() >= 51);
}

#[test]
fn countries_without_regions_have_only_the_whole_country_option() {
    let options = region_options("DE");
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].value, "");
    assert_eq!(options[0].label, "All of Germany");
}

#[test]
fn region_options_list_each_region_after_the_whole_country() {
    let options = region_options("au");
    assert_eq!(options[0].label, "All of Australia");
    assert!(options[1..].iter().all(|o| o.value == o.label));
    assert!(options.iter().any(|o| o.value == "Queensland"));
}

#[test]
fn unknown_country_has_no_options() {
    assert!(region_options("XX").is_empty());
    assert!(regions_for("XX").is_empty());
}
