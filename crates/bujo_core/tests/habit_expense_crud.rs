use bujo_core::db::open_db_in_memory;
use bujo_core::{
    CoreError, DocId, ExpenseInput, ExpenseResource, HabitInput, HabitResource, ProjectInput,
    ProjectResource, ResourceService, Store,
};

const UNKNOWN_ID: &str = "ffffffffffffffffffffffff";

fn store() -> Store {
    Store::new(open_db_in_memory().unwrap())
}

fn create_project(store: &Store) -> DocId {
    let input = ProjectInput {
        symbol: Some("◇".to_string()),
        name: Some("Bienestar".to_string()),
        start_date: Some("2025-01-01".to_string()),
        end_date: Some("2025-12-31".to_string()),
        status: Some("Planificado".to_string()),
        associated_tasks: None,
    };
    ResourceService::<ProjectResource>::new(store)
        .create(&input)
        .unwrap()
        .id
}

fn habit_input(project: Option<&str>) -> HabitInput {
    HabitInput {
        name: Some("Meditar".to_string()),
        frequency: Some("Diario".to_string()),
        status: Some("Pendiente".to_string()),
        notes: None,
        associated_project: project.map(str::to_string),
    }
}

#[test]
fn habit_without_project_resolves_to_no_reference() {
    let store = store();
    let service = ResourceService::<HabitResource>::new(&store);

    let created = service.create(&habit_input(None)).unwrap();
    assert_eq!(created.doc.associated_project, None);
    assert_eq!(created.doc.notes, "");
}

#[test]
fn habit_with_empty_string_project_counts_as_absent() {
    let store = store();
    let service = ResourceService::<HabitResource>::new(&store);

    let created = service.create(&habit_input(Some(""))).unwrap();
    assert_eq!(created.doc.associated_project, None);
}

#[test]
fn habit_with_unknown_project_fails_naming_the_id() {
    let store = store();
    let service = ResourceService::<HabitResource>::new(&store);

    let err = service.create(&habit_input(Some(UNKNOWN_ID))).unwrap_err();
    match &err {
        CoreError::ReferenceNotFound { missing, .. } => {
            assert_eq!(missing, &vec![DocId::from(UNKNOWN_ID)]);
        }
        other => panic!("expected ReferenceNotFound, got {other:?}"),
    }
    assert!(err.to_string().contains(UNKNOWN_ID));
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn habit_with_existing_project_persists_the_reference() {
    let store = store();
    let project_id = create_project(&store);

    let service = ResourceService::<HabitResource>::new(&store);
    let created = service
        .create(&habit_input(Some(project_id.as_str())))
        .unwrap();
    assert_eq!(created.doc.associated_project, Some(project_id.clone()));

    let expanded = service.get_expanded(&created.id).unwrap().unwrap();
    assert_eq!(expanded["associatedProject"]["project"], "Bienestar");
    assert_eq!(expanded["associatedProject"]["id"], project_id.to_string());
}

#[test]
fn dangling_single_reference_expands_to_null() {
    let store = store();
    let project_id = create_project(&store);

    let habits = ResourceService::<HabitResource>::new(&store);
    let created = habits
        .create(&habit_input(Some(project_id.as_str())))
        .unwrap();

    ResourceService::<ProjectResource>::new(&store)
        .delete(&project_id)
        .unwrap();

    // The stored id stays dangling; only the expanded view degrades to null.
    let stored = habits.get(&created.id).unwrap().unwrap();
    assert_eq!(stored.doc.associated_project, Some(project_id));

    let expanded = habits.get_expanded(&created.id).unwrap().unwrap();
    assert!(expanded["associatedProject"].is_null());
}

#[test]
fn expense_round_trip_keeps_explicit_empty_defaults() {
    let store = store();
    let service = ResourceService::<ExpenseResource>::new(&store);

    let input = ExpenseInput {
        category: Some("Transporte".to_string()),
        amount: Some(50.0),
        date: Some("2025-01-10".to_string()),
        description: None,
        associated_project: None,
    };
    let created = service.create(&input).unwrap();

    let document = serde_json::to_value(&created).unwrap();
    assert_eq!(document["category"], "Transporte");
    assert_eq!(document["amount"], 50.0);
    assert_eq!(document["date"], "2025-01-10");
    // Defaults are explicit values, never missing keys.
    assert_eq!(document["description"], "");
    assert!(document["associatedProject"].is_null());
    assert!(document.get("description").is_some());
    assert!(document.get("associatedProject").is_some());
}

#[test]
fn expense_amount_zero_is_present_and_valid() {
    let store = store();
    let service = ResourceService::<ExpenseResource>::new(&store);

    let input = ExpenseInput {
        category: Some("Otros".to_string()),
        amount: Some(0.0),
        date: Some("2025-01-10".to_string()),
        description: Some("ajuste".to_string()),
        associated_project: None,
    };
    let created = service.create(&input).unwrap();
    assert_eq!(created.doc.amount, 0.0);
    assert_eq!(created.doc.description, "ajuste");
}

#[test]
fn expense_update_can_relink_to_another_project() {
    let store = store();
    let first_project = create_project(&store);
    let second_project = create_project(&store);

    let service = ResourceService::<ExpenseResource>::new(&store);
    let input = ExpenseInput {
        category: Some("Salud".to_string()),
        amount: Some(120.5),
        date: Some("2025-03-05".to_string()),
        description: None,
        associated_project: Some(first_project.to_string()),
    };
    let created = service.create(&input).unwrap();
    assert_eq!(created.doc.associated_project, Some(first_project));

    let relinked = ExpenseInput {
        associated_project: Some(second_project.to_string()),
        ..input
    };
    let updated = service.update(&created.id, &relinked).unwrap();
    assert_eq!(updated.doc.associated_project, Some(second_project));
}
