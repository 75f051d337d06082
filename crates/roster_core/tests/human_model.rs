use roster_core::{Address, Human, LazyList, Person, Team};

#[test]
fn new_human_carries_inputs_and_no_identifier() {
    let human = Human::new("Alice", 30);

    assert_eq!(human.name, "Alice");
    assert_eq!(human.age, 30);
    assert_eq!(human.id, None);
    assert_eq!(human.address, None);
}

#[test]
fn new_team_starts_with_an_empty_resolved_list() {
    let team = Team::new("Blue");

    assert_eq!(team.name, "Blue");
    assert_eq!(team.id, None);
    assert!(team.people.is_loaded());
    assert_eq!(team.people.as_slice(), Some(&[][..]));
}

#[test]
fn field_access_returns_last_set_value() {
    let mut human = Human::new("Alice", 30);

    human.age = 31;
    assert_eq!(human.age, 31);
    assert_eq!(human.name, "Alice");
    assert_eq!(human.address, None);

    human.address = Some(Address::new("Seoul", "Teheran-ro", "06236"));
    assert_eq!(human.address.as_ref().unwrap().city, "Seoul");

    let mut team = Team::new("Blue");
    team.name = "Red".to_string();
    assert_eq!(team.name, "Red");
}

#[test]
fn same_inputs_build_independent_instances() {
    let mut first = Human::new("Alice", 30);
    let second = Human::new("Alice", 30);

    first.age = 99;
    first.name = "Alicia".to_string();

    assert_eq!(second.age, 30);
    assert_eq!(second.name, "Alice");
}

#[test]
fn fresh_team_displays_local_state() {
    let team = Team::new("Blue");
    assert_eq!(team.to_string(), "Team(id=unsaved, name=Blue, people=[])");
}

#[test]
fn lazy_list_states_serialize_distinctly() {
    let unresolved = serde_json::to_value(LazyList::<Person>::not_loaded()).unwrap();
    assert_eq!(unresolved, serde_json::json!("not_loaded"));

    let resolved = serde_json::to_value(LazyList::<Person>::empty()).unwrap();
    assert_eq!(resolved, serde_json::json!({ "loaded": [] }));
}
