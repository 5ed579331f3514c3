use injector_catalog::model::Node;
use injector_catalog::{Catalog, CatalogState, LoadError};

const DATASET: &str = include_str!("data/injectors.json");

fn catalog() -> Catalog {
    Catalog::from_json(DATASET).unwrap()
}

fn brands(c: &Catalog) -> Vec<&str> {
    c.brands().keys().map(String::as_str).collect()
}

#[test]
fn empty_and_leading_space_terms_return_everything() {
    let c = catalog();
    assert_eq!(c.filter(""), c);
    assert_eq!(c.filter(" zzz"), c);
    assert_eq!(c.filter(" "), c);
}

#[test]
fn sub_terms_are_and_combined() {
    let c = catalog();
    let hit = c.filter("ev14 550");
    assert_eq!(brands(&hit), vec!["Bosch"]);
    let nodes = hit.get("Bosch").unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].description(), Some("EV14 long"));

    assert!(c.filter("ev14 650").is_empty());
}

#[test]
fn brand_name_matches_every_node_of_the_brand() {
    let c = catalog();
    let hit = c.filter("BOSCH");
    assert_eq!(brands(&hit), vec!["Bosch"]);
    assert_eq!(hit.get("Bosch").unwrap().len(), 3);
}

#[test]
fn group_members_are_searched() {
    let c = catalog();
    let hit = c.filter("giant 1150");
    assert_eq!(brands(&hit), vec!["Bosch"]);
    let Node::Group(g) = &hit.get("Bosch").unwrap()[0] else {
        panic!("expected the group");
    };
    // Groups are kept whole.
    assert_eq!(g.injectors.len(), 2);

    let legacy = c.filter("13.8");
    assert_eq!(brands(&legacy), vec!["Denso"]);
    assert_eq!(legacy.get("Denso").unwrap()[0].description(), Some("Legacy set"));
}

#[test]
fn impedance_matches_across_brands() {
    let c = catalog();
    let hit = c.filter("12");
    assert_eq!(brands(&hit), vec!["Bosch", "Acme", "Denso"]);
    assert_eq!(hit.get("Bosch").unwrap().len(), 2);
    assert_eq!(hit.get("Denso").unwrap()[0].description(), Some("Mixed"));
    assert_eq!(hit.total_injectors(), 2 + 1 + 3);
}

#[test]
fn no_match_yields_empty_catalog() {
    let c = catalog();
    let hit = c.filter("zzz");
    assert!(hit.is_empty());
    assert_eq!(hit.total_injectors(), 0);
}

#[test]
fn results_satisfy_the_predicate_and_come_from_the_source() {
    let c = catalog();
    for term in ["12", "ev14 550", "den", "2.4", "set 270", "a", "mixed 650", "14"] {
        let hit = c.filter(term);
        let lower = term.to_lowercase();
        let subs: Vec<&str> = lower.split(' ').collect();
        for (brand, nodes) in hit.brands() {
            let source = c.get(brand).expect("brand must exist in the source");
            assert!(!nodes.is_empty());
            for node in nodes {
                assert!(source.contains(node));
                let brand_lower = brand.to_lowercase();
                assert!(subs.iter().all(|t| node.matches_term(&brand_lower, t)), "{term}");
            }
        }
    }
}

#[test]
fn filtering_does_not_touch_the_catalog() {
    let c = catalog();
    let before = c.clone();
    let _ = c.filter("bosch");
    assert_eq!(c, before);
}

#[test]
fn unloaded_and_pending_states_filter_to_nothing() {
    assert!(CatalogState::Pending.filter("bosch").is_empty());
    let failed = CatalogState::from(Err(LoadError::Network("offline".into())));
    assert!(!failed.is_loaded());
    assert!(failed.filter("").is_empty());
}

#[test]
fn acme_capacity_search_finds_one_injector() {
    let c = Catalog::from_json(r#"{"Acme": [{"cc":550,"ohm":12,"offsets":{"13.8":1.0,"11":1.2}}]}"#)
        .unwrap();
    let hit = c.filter("acme 550");
    assert_eq!(hit.total_injectors(), 1);
}
