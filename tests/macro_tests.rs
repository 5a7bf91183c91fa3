use linecfg::{decode, encode, record, FieldDescriptor, Record};
use std::time::Duration;

mod nested {
    use std::time::Duration;

    #[derive(Debug, Default, PartialEq)]
    pub struct Worker {
        pub threads: usize,
        pub idle: Duration,
        pub name: String,
    }

    linecfg::record!(Worker {
        threads,
        idle as "idle_timeout",
        name,
    });
}

#[derive(Debug, Default, PartialEq)]
struct Camel {
    #[allow(non_snake_case)]
    MaxConns: u32,
    region: String,
}

record!(Camel { MaxConns, region as "zone" });

#[derive(Debug, Default, PartialEq)]
struct Partial {
    listed: u8,
    hidden: u8,
}

record!(Partial { listed });

#[test]
fn test_macro_in_other_module() {
    use nested::Worker;

    let mut worker = Worker::default();
    decode("threads=4 idle_timeout=1m name=w1", &mut worker).unwrap();
    assert_eq!(worker.threads, 4);
    assert_eq!(worker.idle, Duration::from_secs(60));
    assert_eq!(encode(&worker), "threads=4 idle_timeout=1m0s name=w1");
}

#[test]
fn test_macro_descriptors() {
    assert_eq!(
        Camel::fields(),
        [
            FieldDescriptor::new("MaxConns"),
            FieldDescriptor::new("region").with_tag("zone"),
        ]
    );
    assert_eq!(Camel::fields()[0].key(), "maxconns");
    assert_eq!(Camel::fields()[1].key(), "zone");
}

#[test]
fn test_macro_lower_cases_untagged_keys() {
    let camel = Camel {
        MaxConns: 10,
        region: "eu".to_string(),
    };
    let line = encode(&camel);
    assert_eq!(line, "maxconns=10 zone=eu");

    let mut back = Camel::default();
    decode(&line, &mut back).unwrap();
    assert_eq!(back, camel);
}

#[test]
fn test_macro_field_access() {
    let mut camel = Camel::default();
    camel
        .field_mut("MaxConns")
        .unwrap()
        .assign("7")
        .unwrap();
    assert_eq!(camel.MaxConns, 7);
    let mut out = String::new();
    camel.field("MaxConns").unwrap().render(&mut out);
    assert_eq!(out, "7");
    assert!(camel.field("region").unwrap().is_zero());
    assert!(camel.field("zone").is_none());
}

#[test]
fn test_unlisted_fields_are_invisible() {
    let mut partial = Partial {
        listed: 0,
        hidden: 5,
    };
    assert!(decode("hidden=1", &mut partial).is_err());
    assert_eq!(partial.hidden, 5);
    assert_eq!(encode(&partial), "");
}
