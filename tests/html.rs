use injector_catalog::Catalog;
use injector_catalog::html::render_page;
use injector_catalog::view::Renderer;

#[test]
fn collapsed_cards_omit_the_table() {
    let catalog = Catalog::from_json(
        r#"{"Acme": [{"cc":550,"ohm":12,"description":"Top <fuel> & co","offsets":{"13.8":1.0,"11":1.2}}]}"#,
    )
    .unwrap();
    let mut r = Renderer::new();
    r.render(&catalog);
    let views: Vec<_> = r.views().into_iter().map(|(_, v)| v).collect();
    let html = render_page(&views, &r.summary());

    assert!(html.contains("<p class=\"summary\">1 injectors in total.</p>"));
    assert!(html.contains("<h3>Acme</h3>"));
    assert!(html.contains("Top &lt;fuel&gt; &amp; co"));
    assert!(html.contains("550 CC"));
    assert!(html.contains("12 Ohm"));
    assert!(!html.contains("<table"));
}

#[test]
fn expanded_cards_list_offsets_by_latency() {
    let catalog = Catalog::from_json(
        r#"{"Acme": [{"cc":550,"ohm":12,"offsets":{"13.8":1.0,"11":1.2}}]}"#,
    )
    .unwrap();
    let mut r = Renderer::new();
    r.render(&catalog);
    let id = r.card_ids().next().unwrap();
    r.toggle_expanded(id).unwrap();
    let views: Vec<_> = r.views().into_iter().map(|(_, v)| v).collect();
    let html = render_page(&views, &r.summary());

    assert!(html.contains("data-expanded=\"true\""));
    assert!(html.contains("<tr><th>11</th><th>13.8</th></tr>"));
    assert!(html.contains("<tr><td>1.2</td><td>1</td></tr>"));
}

#[test]
fn duplicates_and_tabs_are_marked() {
    let catalog = Catalog::from_json(
        r#"{"Acme": [
            {"cc":550,"ohm":12,"offsets":{"14":1.0}},
            {"cc":550,"ohm":12,"offsets":{"14":1.1}},
            {"description":"Pair","injectors":[
                {"cc":600,"pressure":58,"offsets":{"14":1.0}},
                {"cc":620,"pressure":43.5,"offsets":{"14":1.0}}
            ]}
        ]}"#,
    )
    .unwrap();
    let mut r = Renderer::new();
    r.render(&catalog);
    let views: Vec<_> = r.views().into_iter().map(|(_, v)| v).collect();
    let html = render_page(&views, &r.summary());

    assert_eq!(html.matches("injector-card duplicate").count(), 2);
    assert!(html.contains("<button class=\"tab\" title=\"58 PSI\">58 PSI</button>"));
    assert!(html.contains("<button class=\"tab active\" title=\"43.5 PSI\">43.5 PSI</button>"));
    assert!(html.contains("620 CC"));
    assert!(html.contains("4 injectors in total."));
}
