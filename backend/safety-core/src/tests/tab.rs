use crate::dashboard::Tab;

#[test]
fn given_tab_ids_when_parsed_then_round_trip_case_insensitively() {
    for tab in Tab::ALL {
        assert_eq!(Tab::from_id(tab.id()), Some(tab));
        assert_eq!(Tab::from_id(&tab.id().to_uppercase()), Some(tab));
    }
}

#[test]
fn given_unknown_id_when_parsed_then_none() {
    assert_eq!(Tab::from_id("inbox"), None);
    assert_eq!(Tab::from_id(""), None);
}

#[test]
fn given_default_tab_when_displayed_then_overview_label() {
    assert_eq!(Tab::default(), Tab::Overview);
    assert_eq!(Tab::Map.to_string(), "Safe Locations");
}
