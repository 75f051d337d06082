use roster_core::db::open_db_in_memory;
use roster_core::{
    Person, PersonRepository, RepoError, SqlitePersonRepository, SqliteTeamRepository, Team,
    TeamRepository,
};

#[test]
fn create_assigns_team_identifier_exactly_once() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();

    let mut team = Team::new("Blue");
    let id = teams.create_team(&mut team).unwrap();
    assert_eq!(team.id, Some(id));

    let err = teams.create_team(&mut team).unwrap_err();
    assert!(matches!(
        err,
        RepoError::AlreadyPersisted {
            entity: "team",
            id: existing
        } if existing == id
    ));
}

#[test]
fn materialized_team_defers_its_person_list() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();

    let mut team = Team::new("Blue");
    let id = teams.create_team(&mut team).unwrap();
    // The instance kept its local resolved list through the save.
    assert!(team.people.is_loaded());

    let materialized = teams.get_team(id).unwrap().unwrap();
    assert!(!materialized.people.is_loaded());
    assert_eq!(materialized.people.as_slice(), None);
}

#[test]
fn load_people_on_fresh_instance_keeps_local_list() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();

    let mut team = Team::new("Blue");
    teams.load_people(&mut team).unwrap();

    assert_eq!(team.people.as_slice(), Some(&[][..]));
}

#[test]
fn resolution_returns_team_members_in_identifier_order() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let persons = SqlitePersonRepository::try_new(&conn).unwrap();

    let blue = teams.create_team(&mut Team::new("Blue")).unwrap();
    let red = teams.create_team(&mut Team::new("Red")).unwrap();

    let first = persons.create_person(&mut Person::in_team(blue)).unwrap();
    persons.create_person(&mut Person::in_team(red)).unwrap();
    let second = persons.create_person(&mut Person::in_team(blue)).unwrap();
    persons.create_person(&mut Person::new()).unwrap();

    let mut team = teams.get_team(blue).unwrap().unwrap();
    teams.load_people(&mut team).unwrap();

    let loaded = team.people.as_slice().unwrap();
    let ids: Vec<_> = loaded.iter().map(|person| person.id).collect();
    assert_eq!(ids, vec![Some(first), Some(second)]);
    assert!(loaded.iter().all(|person| person.team_id == Some(blue)));
}

#[test]
fn resolution_is_not_repeated_once_loaded() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let persons = SqlitePersonRepository::try_new(&conn).unwrap();

    let blue = teams.create_team(&mut Team::new("Blue")).unwrap();
    let mut team = teams.get_team(blue).unwrap().unwrap();
    teams.load_people(&mut team).unwrap();
    assert_eq!(team.people.as_slice(), Some(&[][..]));

    persons.create_person(&mut Person::in_team(blue)).unwrap();

    // Already resolved: no further fetch on the same instance.
    teams.load_people(&mut team).unwrap();
    assert_eq!(team.people.as_slice(), Some(&[][..]));

    // A freshly materialized instance sees the new member.
    let mut fresh = teams.get_team(blue).unwrap().unwrap();
    teams.load_people(&mut fresh).unwrap();
    assert_eq!(fresh.people.as_slice().unwrap().len(), 1);
}

#[test]
fn membership_changes_only_through_person_side() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let persons = SqlitePersonRepository::try_new(&conn).unwrap();

    let blue = teams.create_team(&mut Team::new("Blue")).unwrap();
    let mut person = Person::new();
    let person_id = persons.create_person(&mut person).unwrap();

    persons.assign_team(person_id, Some(blue)).unwrap();
    let mut team = teams.get_team(blue).unwrap().unwrap();
    teams.load_people(&mut team).unwrap();
    assert_eq!(team.people.as_slice().unwrap().len(), 1);

    persons.assign_team(person_id, None).unwrap();
    let mut detached = teams.get_team(blue).unwrap().unwrap();
    teams.load_people(&mut detached).unwrap();
    assert_eq!(detached.people.as_slice(), Some(&[][..]));
}

#[test]
fn team_side_edits_are_never_persisted() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let persons = SqlitePersonRepository::try_new(&conn).unwrap();

    let blue = teams.create_team(&mut Team::new("Blue")).unwrap();
    let stray = persons.create_person(&mut Person::new()).unwrap();

    let mut team = teams.get_team(blue).unwrap().unwrap();
    team.people.set_loaded(vec![Person {
        id: Some(stray),
        team_id: Some(blue),
    }]);
    team.name = "Navy".to_string();
    teams.update_team(&team).unwrap();

    // The rename stuck; the local membership edit did not.
    let renamed = teams.get_team(blue).unwrap().unwrap();
    assert_eq!(renamed.name, "Navy");
    assert_eq!(persons.list_by_team(blue).unwrap(), vec![]);
    assert_eq!(
        persons.get_person(stray).unwrap().unwrap().team_id,
        None
    );
}

#[test]
fn update_requires_a_persisted_team() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();

    let err = teams.update_team(&Team::new("Blue")).unwrap_err();
    assert!(matches!(err, RepoError::NotPersisted("team")));
}

#[test]
fn deleting_a_team_detaches_its_people() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let persons = SqlitePersonRepository::try_new(&conn).unwrap();

    let blue = teams.create_team(&mut Team::new("Blue")).unwrap();
    let member = persons.create_person(&mut Person::in_team(blue)).unwrap();

    teams.delete_team(blue).unwrap();

    assert!(teams.get_team(blue).unwrap().is_none());
    let detached = persons.get_person(member).unwrap().unwrap();
    assert_eq!(detached.team_id, None);
}

#[test]
fn delete_of_missing_team_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();

    let err = teams.delete_team(404).unwrap_err();
    assert!(matches!(err, RepoError::TeamNotFound(404)));
}

#[test]
fn assigning_a_missing_person_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let persons = SqlitePersonRepository::try_new(&conn).unwrap();

    let blue = teams.create_team(&mut Team::new("Blue")).unwrap();
    let err = persons.assign_team(404, Some(blue)).unwrap_err();
    assert!(matches!(err, RepoError::PersonNotFound(404)));
}

#[test]
fn dangling_team_reference_is_rejected_by_storage() {
    let conn = open_db_in_memory().unwrap();
    let persons = SqlitePersonRepository::try_new(&conn).unwrap();

    let err = persons
        .create_person(&mut Person::in_team(404))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn list_teams_orders_by_identifier_and_defers_people() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();

    let blue = teams.create_team(&mut Team::new("Blue")).unwrap();
    let red = teams.create_team(&mut Team::new("Red")).unwrap();

    let listed = teams.list_teams().unwrap();
    let ids: Vec<_> = listed.iter().map(|team| team.id).collect();
    assert_eq!(ids, vec![Some(blue), Some(red)]);
    assert!(listed.iter().all(|team| !team.people.is_loaded()));
}

#[test]
fn display_marks_unresolved_people_without_fetching() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let persons = SqlitePersonRepository::try_new(&conn).unwrap();

    let blue = teams.create_team(&mut Team::new("Blue")).unwrap();
    let member = persons.create_person(&mut Person::in_team(blue)).unwrap();

    let mut team = teams.get_team(blue).unwrap().unwrap();
    assert_eq!(
        team.to_string(),
        format!("Team(id={blue}, name=Blue, people=<not loaded>)")
    );
    // Rendering did not resolve anything behind our back.
    assert!(!team.people.is_loaded());

    teams.load_people(&mut team).unwrap();
    assert_eq!(
        team.to_string(),
        format!("Team(id={blue}, name=Blue, people=[{member}])")
    );
}
