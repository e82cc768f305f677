#![no_main]

// Harness: location_parse
// Focus: any href that parses to a known page re-encodes to an equivalent location.

use libfuzzer_sys::fuzz_target;
use mivet_gate::navigation::Location;

fuzz_target!(|href: &str| {
    if let Some(location) = Location::parse(href) {
        let reparsed = Location::parse(&location.href()).expect("own href must parse");
        assert_eq!(reparsed, location);
    }
});
