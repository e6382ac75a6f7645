use bujo_core::db::migrations::latest_version;
use bujo_core::db::{open_db, open_db_in_memory};
use bujo_core::{Collection, DocId, ResourceService, Store, TaskInput, TaskResource};
use tempfile::TempDir;

fn task_input(name: &str) -> TaskInput {
    TaskInput {
        symbol: Some("•".to_string()),
        name: Some(name.to_string()),
        date: Some("2025-01-01".to_string()),
        priority: Some("Media".to_string()),
        notes: None,
    }
}

#[test]
fn open_applies_migrations() {
    let conn = open_db_in_memory().unwrap();
    let version = conn
        .query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn documents_survive_a_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("bujo.sqlite3");

    let created_id = {
        let store = Store::new(open_db(&db_path).unwrap());
        ResourceService::<TaskResource>::new(&store)
            .create(&task_input("persistente"))
            .unwrap()
            .id
    };

    let store = Store::new(open_db(&db_path).unwrap());
    let loaded = ResourceService::<TaskResource>::new(&store)
        .get(&created_id)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.doc.name, "persistente");
}

#[test]
fn generated_ids_are_24_hex_characters() {
    for _ in 0..32 {
        let id = DocId::generate();
        assert_eq!(id.as_str().len(), 24);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[test]
fn existing_ids_resolves_a_batch_in_one_call() {
    let store = Store::new(open_db_in_memory().unwrap());
    let service = ResourceService::<TaskResource>::new(&store);
    let task_a = service.create(&task_input("a")).unwrap().id;
    let task_b = service.create(&task_input("b")).unwrap().id;

    let requested = vec![
        task_a.clone(),
        DocId::from("ffffffffffffffffffffffff"),
        task_b.clone(),
    ];
    let found = store.existing_ids(Collection::Tasks, &requested).unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.contains(&task_a));
    assert!(found.contains(&task_b));
}

#[test]
fn collections_scope_the_id_namespace() {
    let store = Store::new(open_db_in_memory().unwrap());
    let task_id = ResourceService::<TaskResource>::new(&store)
        .create(&task_input("solo tarea"))
        .unwrap()
        .id;

    assert!(store.exists(Collection::Tasks, &task_id).unwrap());
    assert!(!store.exists(Collection::Projects, &task_id).unwrap());
}

#[test]
fn replace_and_delete_report_absence() {
    let store = Store::new(open_db_in_memory().unwrap());
    let unknown = DocId::from("ffffffffffffffffffffffff");

    let replaced = store
        .replace(Collection::Tasks, &unknown, &serde_json::json!({"task": "x"}))
        .unwrap();
    assert!(!replaced);

    let deleted = store.delete(Collection::Tasks, &unknown).unwrap();
    assert!(!deleted);
}
