use livingproxy_core::db::{open_db, open_db_in_memory};
use livingproxy_core::model::date::Date;
use livingproxy_core::model::event::{Event, EventRef, EventType};
use livingproxy_core::model::family::{ChildRef, Family};
use livingproxy_core::model::name::Name;
use livingproxy_core::model::person::Person;
use livingproxy_core::model::secondary::{Note, Place, Tag};
use livingproxy_core::{GenealogyStore, ObjectType, SqliteGenealogyStore, StoreError};

#[test]
fn commit_and_lookup_by_handle_and_id() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteGenealogyStore::try_new(&conn).unwrap();

    let person = Person::new("I0001", Name::new("Astrid", "Holm"));
    let handle = store.commit(person.clone()).unwrap();

    assert_eq!(handle, person.handle);
    assert_eq!(store.get_person_from_handle(&handle).unwrap(), Some(person.clone()));
    assert_eq!(store.get_person_from_gramps_id("I0001").unwrap(), Some(person));
    assert!(store.get_person_from_gramps_id("I9999").unwrap().is_none());
    assert!(store.has_handle(ObjectType::Person, &handle).unwrap());
    assert!(!store.has_handle(ObjectType::Family, &handle).unwrap());
}

#[test]
fn handle_listing_and_iteration_follow_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteGenealogyStore::try_new(&conn).unwrap();

    let ids = ["I3", "I1", "I2"];
    let mut handles = Vec::new();
    for id in ids {
        handles.push(store.commit(Person::new(id, Name::new("X", "Y"))).unwrap());
    }

    assert_eq!(store.get_person_handles().unwrap(), handles);
    let seen: Vec<String> = store
        .iter_people()
        .unwrap()
        .map(|person| person.unwrap().gramps_id)
        .collect();
    assert_eq!(seen, ids);
    assert_eq!(store.get_number_of_people().unwrap(), 3);
}

#[test]
fn blank_ids_do_not_collide_and_tags_have_no_id_lookup() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteGenealogyStore::try_new(&conn).unwrap();

    store.commit(Note::new("", "first")).unwrap();
    store.commit(Note::new("", "second")).unwrap();
    let tag = Tag::new("private");
    store.commit(tag.clone()).unwrap();

    assert_eq!(store.get_number_of_records(ObjectType::Note).unwrap(), 2);
    assert_eq!(store.get_tag_from_handle(&tag.handle).unwrap(), Some(tag));
    assert!(store
        .get_record_from_gramps_id(ObjectType::Tag, "private")
        .unwrap()
        .is_none());
}

#[test]
fn backlinks_follow_recommits_and_honor_type_filter() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteGenealogyStore::try_new(&conn).unwrap();

    let place = Place::new("P1", "Uppsala");
    store.commit(place.clone()).unwrap();
    let mut birth = Event::new("E1", EventType::Birth, Date::from_year(1901));
    birth.place = Some(place.handle.clone());
    store.commit(birth.clone()).unwrap();

    let mut person = Person::new("I1", Name::new("Erik", "Sund"));
    person.event_ref_list.push(EventRef::primary(birth.handle.clone()));
    store.commit(person.clone()).unwrap();

    let mut family = Family::new("F1");
    family.father_handle = Some(person.handle.clone());
    family.event_ref_list.push(EventRef::primary(birth.handle.clone()));
    store.commit(family.clone()).unwrap();

    let links = store.find_backlink_handles(&birth.handle, None).unwrap();
    assert_eq!(
        links,
        vec![
            (ObjectType::Family, family.handle.clone()),
            (ObjectType::Person, person.handle.clone()),
        ]
    );
    let only_families = store
        .find_backlink_handles(&birth.handle, Some(&[ObjectType::Family]))
        .unwrap();
    assert_eq!(only_families, vec![(ObjectType::Family, family.handle.clone())]);
    assert_eq!(
        store.find_backlink_handles(&place.handle, None).unwrap(),
        vec![(ObjectType::Event, birth.handle.clone())]
    );

    person.event_ref_list.clear();
    store.commit(person).unwrap();
    assert_eq!(
        store.find_backlink_handles(&birth.handle, None).unwrap(),
        vec![(ObjectType::Family, family.handle)]
    );
}

#[test]
fn default_person_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteGenealogyStore::try_new(&conn).unwrap();
    assert!(store.get_default_handle().unwrap().is_none());

    let person = Person::new("I1", Name::new("Sara", "Lind"));
    store.commit(person.clone()).unwrap();
    store.set_default_person(&person.handle).unwrap();

    assert_eq!(store.get_default_handle().unwrap(), Some(person.handle.clone()));
    assert_eq!(store.get_default_person().unwrap(), Some(person));
}

#[test]
fn corrupt_body_is_an_error_not_absence() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteGenealogyStore::try_new(&conn).unwrap();
    conn.execute(
        "INSERT INTO person (handle, gramps_id, body, change) VALUES ('broken', 'I1', '{', 0);",
        [],
    )
    .unwrap();

    let handle = "broken".into();
    let err = store.get_person_from_handle(&handle).unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));
    let first = store.iter_people().unwrap().next().unwrap();
    assert!(first.is_err());
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.db");

    let mut family = Family::new("F1");
    let child = Person::new("I2", Name::new("Nils", "Berg"));
    family.child_ref_list.push(ChildRef::new(child.handle.clone()));
    {
        let conn = open_db(&path).unwrap();
        let store = SqliteGenealogyStore::try_new(&conn).unwrap();
        store.commit(child.clone()).unwrap();
        store.commit(family.clone()).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteGenealogyStore::try_new(&conn).unwrap();
    assert_eq!(store.get_family_from_gramps_id("F1").unwrap(), Some(family.clone()));
    assert_eq!(
        store.find_backlink_handles(&child.handle, None).unwrap(),
        vec![(ObjectType::Family, family.handle)]
    );
}
