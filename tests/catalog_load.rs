use camino::Utf8PathBuf;
use injector_catalog::model::{GroupOrigin, Node};
use injector_catalog::source::{DataSource, FsSource, StaticSource};
use injector_catalog::{Catalog, LoadError};
use tempfile::tempdir;

const DATASET: &str = include_str!("data/injectors.json");

#[test]
fn loads_brands_in_document_order() {
    let catalog = Catalog::from_json(DATASET).unwrap();
    let brands: Vec<&str> = catalog.brands().keys().map(String::as_str).collect();
    assert_eq!(brands, vec!["Bosch", "Acme", "Denso"]);
    assert_eq!(catalog.total_injectors(), 10);
}

#[test]
fn display_order_sorts_brands_and_capacity() {
    let catalog = Catalog::from_json(DATASET).unwrap();
    let order = catalog.display_order();
    let brands: Vec<&str> = order.iter().map(|(b, _)| *b).collect();
    assert_eq!(brands, vec!["Acme", "Bosch", "Denso"]);

    let bosch: Vec<f64> = order[1].1.iter().map(|n| n.sort_cc()).collect();
    assert_eq!(bosch, vec![440.0, 550.0, 1000.0]);

    let denso: Vec<Option<&str>> = order[2].1.iter().map(|n| n.description()).collect();
    assert_eq!(denso, vec![Some("Legacy set"), Some("Mixed")]);

    // The catalog itself keeps dataset order.
    assert_eq!(catalog.get("Bosch").unwrap()[0].sort_cc(), 550.0);
}

#[test]
fn variants_become_groups_inheriting_description() {
    let catalog = Catalog::from_json(DATASET).unwrap();
    let denso = catalog.get("Denso").unwrap();
    let Node::Group(legacy) = &denso[1] else {
        panic!("expected a group");
    };
    assert_eq!(legacy.origin, GroupOrigin::Variants);
    assert_eq!(legacy.injectors.len(), 2);
    assert!(
        legacy
            .injectors
            .iter()
            .all(|i| i.description.as_deref() == Some("Legacy set"))
    );
    assert!(!legacy.has_pressure_tabs());
}

#[test]
fn pressure_tabs_require_every_member_pressure() {
    let catalog = Catalog::from_json(DATASET).unwrap();
    let Node::Group(giant) = &catalog.get("Bosch").unwrap()[2] else {
        panic!("expected a group");
    };
    assert!(giant.has_pressure_tabs());
    assert_eq!(giant.default_tab(), 0);

    let Node::Group(mixed) = &catalog.get("Denso").unwrap()[0] else {
        panic!("expected a group");
    };
    assert!(!mixed.has_pressure_tabs());
}

#[test]
fn legacy_voltage_latency_arrays_are_zipped() {
    let text = r#"{"Old": [{"cc": 310, "ohm": 13.8, "voltage": [8, 10, "13.5"], "latency": [2.1, 1.5, 0.9]}]}"#;
    let catalog = Catalog::from_json(text).unwrap();
    let Node::Single(injector) = &catalog.get("Old").unwrap()[0] else {
        panic!("expected a single injector");
    };
    let keys: Vec<&str> = injector.offsets.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["8", "10", "13.5"]);
    assert_eq!(injector.offsets["13.5"], 0.9);
}

#[test]
fn mismatched_legacy_arrays_are_a_parse_error() {
    let text = r#"{"Old": [{"cc": 310, "voltage": [8, 10], "latency": [2.1]}]}"#;
    let err = Catalog::from_json(text).unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
    assert_eq!(err.user_message(), "Failed to parse data!");
}

#[test]
fn optional_fields_are_tolerated() {
    let text = r#"{"Bare": [{"cc": 200, "offsets": {"14": 1.5}}, {"cc": 210}]}"#;
    let catalog = Catalog::from_json(text).unwrap();
    let Node::Single(injector) = &catalog.get("Bare").unwrap()[1] else {
        panic!("expected a single injector");
    };
    assert_eq!(injector.ohm, None);
    assert_eq!(injector.effective_pressure(), 43.5);
    assert!(injector.offsets.is_empty());
}

#[test]
fn malformed_documents_are_parse_errors() {
    for text in ["{", "[]", r#"{"Acme": 3}"#, r#"{"Acme": [{"ohm": 12}]}"#] {
        let err = Catalog::from_json(text).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)), "{text}: {err:?}");
    }
}

#[test]
fn missing_file_is_a_network_error() {
    let dir = tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("missing.json")).unwrap();
    let err = Catalog::load(&mut FsSource::new(&path)).unwrap_err();
    assert!(matches!(err, LoadError::Network(_)));
    assert_eq!(err.user_message(), "Failed to load data!");
}

#[test]
fn invalid_utf8_file_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("injectors.json")).unwrap();
    std::fs::write(&path, b"{\"Acme\": [\xff]}").unwrap();
    let err = Catalog::load(&mut FsSource::new(&path)).unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)), "{err:?}");
    assert_eq!(err.user_message(), "Failed to parse data!");

    let err = Catalog::from_slice(b"{\"Acme \xff\": []}").unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)), "{err:?}");
}

#[test]
fn fs_source_loads_and_reports_last_updated() {
    let dir = tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("injectors.json")).unwrap();
    std::fs::write(&path, DATASET).unwrap();

    let mut source = FsSource::new(&path);
    let catalog = Catalog::load(&mut source).unwrap();
    assert_eq!(catalog.brand_count(), 3);

    let date = source.last_updated().unwrap();
    assert_eq!(date.len(), "2024-01-01".len());
}

#[test]
fn static_source_without_date_fails_metadata_only() {
    let mut source = StaticSource::new(DATASET);
    assert!(Catalog::load(&mut source).is_ok());
    assert!(source.last_updated().is_err());

    let mut dated = StaticSource::new(DATASET).with_last_updated("2024-05-01");
    assert_eq!(dated.last_updated().unwrap(), "2024-05-01");
}
