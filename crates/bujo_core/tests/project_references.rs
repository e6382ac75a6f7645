use bujo_core::db::open_db_in_memory;
use bujo_core::{
    CoreError, DocId, ProjectInput, ProjectResource, ResourceService, Store, TaskInput,
    TaskResource,
};

const UNKNOWN_ID: &str = "ffffffffffffffffffffffff";

fn store() -> Store {
    Store::new(open_db_in_memory().unwrap())
}

fn create_task(store: &Store, name: &str) -> DocId {
    let input = TaskInput {
        symbol: Some("•".to_string()),
        name: Some(name.to_string()),
        date: Some("2025-01-01".to_string()),
        priority: Some("Media".to_string()),
        notes: None,
    };
    ResourceService::<TaskResource>::new(store)
        .create(&input)
        .unwrap()
        .id
}

fn project_input(tasks: Option<Vec<String>>) -> ProjectInput {
    ProjectInput {
        symbol: Some("◇".to_string()),
        name: Some("Mudanza".to_string()),
        start_date: Some("2025-01-10".to_string()),
        end_date: Some("2025-02-10".to_string()),
        status: Some("En progreso".to_string()),
        associated_tasks: tasks,
    }
}

#[test]
fn create_with_existing_tasks_persists_the_id_set() {
    let store = store();
    let task_a = create_task(&store, "empacar");
    let task_b = create_task(&store, "contratar flete");

    let service = ResourceService::<ProjectResource>::new(&store);
    let created = service
        .create(&project_input(Some(vec![
            task_a.to_string(),
            task_b.to_string(),
        ])))
        .unwrap();

    assert_eq!(created.doc.associated_tasks, vec![task_a, task_b]);
}

#[test]
fn missing_subset_is_enumerated_exactly() {
    let store = store();
    let task_a = create_task(&store, "a");
    let task_c = create_task(&store, "c");

    let service = ResourceService::<ProjectResource>::new(&store);
    let err = service
        .create(&project_input(Some(vec![
            task_a.to_string(),
            UNKNOWN_ID.to_string(),
            task_c.to_string(),
        ])))
        .unwrap_err();

    match err {
        CoreError::ReferenceNotFound { missing, .. } => {
            assert_eq!(missing, vec![DocId::from(UNKNOWN_ID)]);
        }
        other => panic!("expected ReferenceNotFound, got {other:?}"),
    }

    // The failed write must not have persisted anything.
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn absent_and_empty_task_lists_resolve_to_an_empty_set() {
    let store = store();
    let service = ResourceService::<ProjectResource>::new(&store);

    let without_field = service.create(&project_input(None)).unwrap();
    assert!(without_field.doc.associated_tasks.is_empty());

    let with_empty_list = service.create(&project_input(Some(Vec::new()))).unwrap();
    assert!(with_empty_list.doc.associated_tasks.is_empty());
}

#[test]
fn duplicate_task_ids_collapse_to_one_reference() {
    let store = store();
    let task_a = create_task(&store, "única");

    let service = ResourceService::<ProjectResource>::new(&store);
    let created = service
        .create(&project_input(Some(vec![
            task_a.to_string(),
            task_a.to_string(),
        ])))
        .unwrap();

    assert_eq!(created.doc.associated_tasks, vec![task_a]);
}

#[test]
fn update_revalidates_references_against_the_live_store() {
    let store = store();
    let task_a = create_task(&store, "se borra");

    let projects = ResourceService::<ProjectResource>::new(&store);
    let created = projects
        .create(&project_input(Some(vec![task_a.to_string()])))
        .unwrap();

    ResourceService::<TaskResource>::new(&store)
        .delete(&task_a)
        .unwrap();

    let err = projects
        .update(&created.id, &project_input(Some(vec![task_a.to_string()])))
        .unwrap_err();
    assert!(matches!(err, CoreError::ReferenceNotFound { .. }), "got {err:?}");
}

#[test]
fn list_expands_task_references_in_place() {
    let store = store();
    let task_a = create_task(&store, "visible");

    let service = ResourceService::<ProjectResource>::new(&store);
    service
        .create(&project_input(Some(vec![task_a.to_string()])))
        .unwrap();

    let listed = service.list_expanded().unwrap();
    assert_eq!(listed.len(), 1);

    let tasks = listed[0]["associatedTasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["task"], "visible");
    assert_eq!(tasks[0]["id"], task_a.to_string());
}

#[test]
fn expansion_omits_dangling_batch_members() {
    let store = store();
    let task_a = create_task(&store, "queda");
    let task_b = create_task(&store, "se borra");

    let projects = ResourceService::<ProjectResource>::new(&store);
    let created = projects
        .create(&project_input(Some(vec![
            task_a.to_string(),
            task_b.to_string(),
        ])))
        .unwrap();

    // No cascade on delete: the project keeps the dangling id in storage.
    ResourceService::<TaskResource>::new(&store)
        .delete(&task_b)
        .unwrap();

    let stored = projects.get(&created.id).unwrap().unwrap();
    assert_eq!(stored.doc.associated_tasks.len(), 2);

    let expanded = projects.get_expanded(&created.id).unwrap().unwrap();
    let tasks = expanded["associatedTasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], task_a.to_string());
}

#[test]
fn get_expanded_unknown_id_is_none() {
    let store = store();
    let service = ResourceService::<ProjectResource>::new(&store);
    assert!(service
        .get_expanded(&DocId::from(UNKNOWN_ID))
        .unwrap()
        .is_none());
}
