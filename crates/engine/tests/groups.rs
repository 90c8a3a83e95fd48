use std::collections::HashMap;

use chrono::Utc;
use engine::{Engine, EngineError, Group, GroupKind, RecordKind};
use uuid::Uuid;

#[test]
fn member_names_are_unique_case_insensitively() {
    let mut group = Group::new("Flat 303".to_string(), "user-1", GroupKind::Household);
    group.add_member("Ajay", None, None).unwrap();

    let err = group.add_member("  ajay ", None, None).unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("ajay".to_string()));

    let err = group.add_member("AJAY", None, None).unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("AJAY".to_string()));

    assert!(matches!(
        group.add_member("   ", None, None),
        Err(EngineError::InvalidName(_))
    ));
}

#[test]
fn removing_a_member_drops_their_records() {
    let mut group = Group::new("Trip".to_string(), "user-1", GroupKind::Trip);
    let a = group.add_member("A", None, None).unwrap();
    let b = group.add_member("B", None, None).unwrap();
    group.add_expense(a, 60.0, "Lunch", Utc::now()).unwrap();
    group.add_expense(b, 40.0, "Snacks", Utc::now()).unwrap();

    group.remove_member(a).unwrap();

    assert_eq!(group.members.len(), 1);
    assert_eq!(group.records.len(), 1);
    assert!(group.records.iter().all(|r| r.payer_id == b));
    assert!(matches!(
        group.remove_member(a),
        Err(EngineError::KeyNotFound(_))
    ));
}

#[test]
fn expense_validation_rejects_bad_input() {
    let mut group = Group::new("Trip".to_string(), "user-1", GroupKind::Trip);
    let a = group.add_member("A", None, None).unwrap();

    assert!(matches!(
        group.add_expense(a, 0.0, "zero", Utc::now()),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        group.add_expense(a, -5.0, "negative", Utc::now()),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        group.add_expense(Uuid::new_v4(), 10.0, "ghost payer", Utc::now()),
        Err(EngineError::KeyNotFound(_))
    ));
}

#[test]
fn unequal_split_validation() {
    let mut group = Group::new("Trip".to_string(), "user-1", GroupKind::Trip);
    let a = group.add_member("A", None, None).unwrap();
    let b = group.add_member("B", None, None).unwrap();

    // Sum mismatch beyond tolerance.
    let mut bad_sum = HashMap::new();
    bad_sum.insert(a, 10.0);
    bad_sum.insert(b, 10.0);
    assert!(matches!(
        group.add_unequal_expense(a, 30.0, "", Utc::now(), bad_sum),
        Err(EngineError::InvalidSplit(_))
    ));

    // Unknown member in the map.
    let mut unknown = HashMap::new();
    unknown.insert(Uuid::new_v4(), 30.0);
    assert!(matches!(
        group.add_unequal_expense(a, 30.0, "", Utc::now(), unknown),
        Err(EngineError::KeyNotFound(_))
    ));

    // Non-positive share.
    let mut negative = HashMap::new();
    negative.insert(a, 40.0);
    negative.insert(b, -10.0);
    assert!(matches!(
        group.add_unequal_expense(a, 30.0, "", Utc::now(), negative),
        Err(EngineError::InvalidSplit(_))
    ));

    // Within tolerance passes; keys need not cover all members.
    let mut ok = HashMap::new();
    ok.insert(b, 29.995);
    assert!(group.add_unequal_expense(a, 30.0, "", Utc::now(), ok).is_ok());
}

#[test]
fn settlements_are_validated_and_immutable() {
    let mut group = Group::new("Trip".to_string(), "user-1", GroupKind::Trip);
    let a = group.add_member("A", None, None).unwrap();
    let b = group.add_member("B", None, None).unwrap();

    assert!(matches!(
        group.record_settlement(a, a, 10.0, "", Utc::now()),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        group.record_settlement(a, Uuid::new_v4(), 10.0, "", Utc::now()),
        Err(EngineError::KeyNotFound(_))
    ));

    let id = group
        .record_settlement(a, b, 10.0, "Settled up", Utc::now())
        .unwrap();
    assert!(matches!(
        group.update_expense(id, a, 20.0, "edited"),
        Err(EngineError::InvalidAmount(_))
    ));

    // But it can be removed and re-recorded.
    let removed = group.remove_record(id).unwrap();
    assert_eq!(removed.kind, RecordKind::Settlement);
}

#[test]
fn update_expense_changes_payer_amount_and_note() {
    let mut group = Group::new("Trip".to_string(), "user-1", GroupKind::Trip);
    let a = group.add_member("A", None, None).unwrap();
    let b = group.add_member("B", None, None).unwrap();
    let id = group.add_expense(a, 50.0, "Lunch", Utc::now()).unwrap();

    group.update_expense(id, b, 75.0, "  Dinner ").unwrap();

    let record = group.records.iter().find(|r| r.id == id).unwrap();
    assert_eq!(record.payer_id, b);
    assert_eq!(record.amount, 75.0);
    assert_eq!(record.note, "Dinner");
}

#[test]
fn engine_scopes_groups_by_owner() {
    let mut engine = Engine::new();
    let group_id = engine
        .create_group("Manali 2026", "Me", "user-1", GroupKind::Trip)
        .unwrap();

    // Creator sees the group, with themself as first member.
    let group = engine.group(&group_id, "user-1").unwrap();
    assert_eq!(group.members.len(), 1);
    assert_eq!(group.members[0].name, "Me");

    // Other users cannot see, mutate or delete it.
    assert!(engine.group(&group_id, "user-2").is_err());
    assert!(engine.set_settled(&group_id, "user-2", true).is_err());
    assert!(engine.delete_group(&group_id, "user-2").is_err());

    engine.set_settled(&group_id, "user-1", true).unwrap();
    assert!(engine.group(&group_id, "user-1").unwrap().is_settled);

    engine.delete_group(&group_id, "user-1").unwrap();
    assert!(engine.group(&group_id, "user-1").is_err());
}

#[test]
fn groups_for_lists_newest_first() {
    let mut engine = Engine::new();

    let mut old = Group::new("Old".to_string(), "user-1", GroupKind::Trip);
    old.created_at = Utc::now() - chrono::Duration::days(30);
    let mut new = Group::new("New".to_string(), "user-1", GroupKind::Household);
    new.created_at = Utc::now();
    let foreign = Group::new("Foreign".to_string(), "user-2", GroupKind::Trip);

    engine.insert_group(old);
    engine.insert_group(new);
    engine.insert_group(foreign);

    let listed = engine.groups_for("user-1");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "New");
    assert_eq!(listed[1].name, "Old");
}

#[test]
fn insert_group_is_last_writer_wins() {
    let mut engine = Engine::new();
    let mut group = Group::new("Trip".to_string(), "user-1", GroupKind::Trip);
    let group_id = group.id.clone();
    engine.insert_group(group.clone());

    group.add_member("A", None, None).unwrap();
    engine.insert_group(group);

    assert_eq!(engine.group(&group_id, "user-1").unwrap().members.len(), 1);
}
