//! Property-based tests for the line format.
//!
//! Values are drawn from the character set a line can carry without quoting:
//! no whitespace, and `=` allowed inside values.

use linecfg::{decode, encode, from_str, record, scanner, to_string, LineMap};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq)]
struct Settings {
    name: String,
    level: i32,
    limit: u64,
    ratio: f64,
    timeout: Duration,
    verbose: bool,
    retries: Option<u16>,
}

record!(Settings {
    name,
    level,
    limit as "max_limit",
    ratio,
    timeout,
    verbose,
    retries,
});

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
struct Endpoint {
    url: String,
    port: u16,
    weight: f64,
    #[serde(with = "linecfg::duration")]
    timeout: Duration,
}

fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.:/=-]{0,16}"
}

fn key() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

fn duration() -> impl Strategy<Value = Duration> {
    (0u64..400_000, 0u32..1_000_000_000).prop_map(|(secs, nanos)| Duration::new(secs, nanos))
}

fn settings() -> impl Strategy<Value = Settings> {
    (
        value(),
        any::<i32>(),
        any::<u64>(),
        -1.0e9f64..1.0e9,
        duration(),
        any::<bool>(),
        proptest::option::of(any::<u16>()),
    )
        .prop_map(
            |(name, level, limit, ratio, timeout, verbose, retries)| Settings {
                name,
                level,
                limit,
                ratio,
                timeout,
                verbose,
                retries,
            },
        )
}

proptest! {
    #[test]
    fn prop_record_roundtrip(settings in settings()) {
        let line = encode(&settings);
        let mut back = Settings::default();
        decode(&line, &mut back).unwrap();
        prop_assert_eq!(back, settings);
    }

    #[test]
    fn prop_decode_is_idempotent(settings in settings()) {
        let line = encode(&settings);
        let mut once = Settings::default();
        decode(&line, &mut once).unwrap();
        let mut twice = once.clone();
        decode(&line, &mut twice).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_encoded_line_has_no_zero_fields(settings in settings()) {
        let line = encode(&settings);
        prop_assert_eq!(line.trim(), line.as_str());
        for pair in scanner::pairs(&line) {
            let (key, value) = pair.unwrap();
            prop_assert!(key != "verbose" || value == "true");
            prop_assert!(key != "level" || value != "0");
            prop_assert!(key != "timeout" || value != "0s");
        }
    }

    #[test]
    fn prop_serde_roundtrip(
        url in value(),
        port in any::<u16>(),
        weight in -1.0e6f64..1.0e6,
        timeout in duration(),
    ) {
        let endpoint = Endpoint { url, port, weight, timeout };
        let line = to_string(&endpoint).unwrap();
        let back: Endpoint = from_str(&line).unwrap();
        prop_assert_eq!(back, endpoint);
    }

    #[test]
    fn prop_map_preserves_pairs(pairs in proptest::collection::vec((key(), value()), 0..8)) {
        let line = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("  ");
        let map = LineMap::parse(&line).unwrap();
        for (k, _) in &pairs {
            let last = pairs.iter().rev().find(|(other, _)| other == k).map(|(_, v)| v);
            prop_assert_eq!(map.get(k), last.map(String::as_str));
            prop_assert!(map.contains_key(k));
        }
        let reparsed = LineMap::parse(&map.to_string()).unwrap();
        prop_assert_eq!(reparsed, map);
    }

    #[test]
    fn prop_duration_literal_roundtrip(d in duration()) {
        let literal = linecfg::duration::format(d);
        prop_assert_eq!(linecfg::duration::parse(&literal).unwrap(), d);
    }

    #[test]
    fn prop_pairs_never_panic(line in "\\PC{0,64}") {
        let _ = scanner::pairs(&line).count();
    }
}
