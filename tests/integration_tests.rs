//! Integration tests for monkeydb
//!
//! Each test works in its own temporary folder with its own credential
//! database.

use std::path::{Path, PathBuf};
use monkeydb::{
    AppConfig, CatalogScanner, CellValue, CredentialStore, DatabaseLifecycle, ErrorKind,
    ExportOutcome, ManagerError, QueryEngine, QueryResult, VerifyResult, Workspace,
};
use tempfile::TempDir;

/// Config pointing all per-user state into the temp folder
fn test_config(temp_dir: &TempDir) -> AppConfig {
    AppConfig {
        users_db_path: Some(temp_dir.path().join("appdata").join("Users.db")),
        default_folder: Some(temp_dir.path().join("dbs")),
        ..AppConfig::default()
    }
}

fn setup() -> (AppConfig, PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let folder = config.start_folder().unwrap();
    std::fs::create_dir_all(&folder).unwrap();
    (config, folder, temp_dir)
}

fn tables(path: &Path) -> Vec<String> {
    CatalogScanner::default().list_tables(path).unwrap()
}

#[test]
fn test_register_twice() {
    let (config, _folder, _temp_dir) = setup();
    let store = CredentialStore::from_config(&config).unwrap();
    store.initialize().unwrap();

    assert!(store.register("Marco", "Rossi", "marco", "banana").unwrap());
    assert!(!store.register("Anna", "Bianchi", "marco", "kiwi").unwrap());
}

#[test]
fn test_verify_outcomes() {
    let (config, _folder, _temp_dir) = setup();
    let store = CredentialStore::from_config(&config).unwrap();
    store.initialize().unwrap();

    let users = [("Marco", "Rossi", "marco", "banana"), ("Anna", "Bianchi", "anna", "kiwi")];
    for (name, surname, username, password) in users {
        assert!(store.register(name, surname, username, password).unwrap());
    }

    for (_, _, username, password) in users {
        match store.verify(username, password).unwrap() {
            VerifyResult::Authenticated(user) => assert_eq!(user.username, username),
            other => panic!("Expected Authenticated for {}, got {:?}", username, other),
        }
        assert_eq!(store.verify(username, "wrong").unwrap(), VerifyResult::WrongCredentials);
    }

    assert_eq!(store.verify("ghost", "banana").unwrap(), VerifyResult::UserNotFound);

    let err = store.verify("ghost", "x").unwrap().into_user("ghost").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
}

#[test]
fn test_credentials_survive_reopen() {
    let (config, _folder, _temp_dir) = setup();
    {
        let store = CredentialStore::from_config(&config).unwrap();
        store.initialize().unwrap();
        store.register("Marco", "Rossi", "marco", "banana").unwrap();
    }

    let store = CredentialStore::from_config(&config).unwrap();
    store.initialize().unwrap();
    assert!(store.verify("marco", "banana").unwrap().is_authenticated());
}

#[test]
fn test_create_scan_drop_delete_round_trip() {
    let (_config, folder, _temp_dir) = setup();
    let scanner = CatalogScanner::default();
    let lifecycle = DatabaseLifecycle::new();
    let engine = QueryEngine::new();

    let db = folder.join("inventory.db");
    lifecycle.create_database(&db).unwrap();
    assert!(scanner.list_databases(&folder).contains(&db));

    engine.execute(&db, "CREATE TABLE items(id INTEGER PRIMARY KEY, label TEXT)").unwrap();
    engine.execute(&db, "CREATE TABLE tags(name TEXT)").unwrap();
    assert_eq!(tables(&db), vec!["items".to_string(), "tags".to_string()]);

    lifecycle.drop_table("items", &db).unwrap();
    assert_eq!(tables(&db), vec!["tags".to_string()]);
    assert!(!scanner.scan(&folder).tables().iter().any(|t| t.table_name == "items"));

    lifecycle.delete_database(&db).unwrap();
    assert!(!scanner.list_databases(&folder).contains(&db));

    let err = lifecycle.delete_database(&db).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_query_classification() {
    let (_config, folder, _temp_dir) = setup();
    let db = folder.join("q.db");
    DatabaseLifecycle::new().create_database(&db).unwrap();
    let engine = QueryEngine::new();

    match engine.execute(&db, "SELECT 1").unwrap() {
        QueryResult::Rows { columns, rows } => {
            assert_eq!(columns.len(), 1);
            assert_eq!(rows, vec![vec![CellValue::Integer(1)]]);
        }
        QueryResult::Ack => panic!("SELECT must return rows"),
    }

    assert_eq!(engine.execute(&db, "CREATE TABLE t(x INT)").unwrap(), QueryResult::Ack);
    assert_eq!(tables(&db), vec!["t".to_string()]);
}

#[test]
fn test_invalid_sql_leaves_file_unmodified() {
    let (_config, folder, _temp_dir) = setup();
    let db = folder.join("q.db");
    DatabaseLifecycle::new().create_database(&db).unwrap();
    let engine = QueryEngine::new();
    engine.execute(&db, "CREATE TABLE x(a INT)").unwrap();
    engine.execute(&db, "INSERT INTO x VALUES (1)").unwrap();
    let before = std::fs::read(&db).unwrap();

    let err = engine.execute(&db, "SELEC * FROM x").unwrap_err();
    assert!(matches!(err, ManagerError::Query(_)));
    assert_eq!(std::fs::read(&db).unwrap(), before);

    let err = engine.execute(&db, "INSERT INTO x VALUES (2); SELEC broken").unwrap_err();
    assert!(matches!(err, ManagerError::Query(_)));
    assert_eq!(std::fs::read(&db).unwrap(), before);
}

#[test]
fn test_scan_with_corrupt_database() {
    let (_config, folder, _temp_dir) = setup();
    let good = folder.join("good.db");
    DatabaseLifecycle::new().create_database(&good).unwrap();
    QueryEngine::new().execute(&good, "CREATE TABLE t(x)").unwrap();
    std::fs::write(folder.join("broken.db"), b"this is not sqlite at all, just text padding it out").unwrap();

    let catalog = CatalogScanner::default().scan(&folder);
    assert_eq!(catalog.databases().len(), 2);
    assert_eq!(catalog.database(&good).unwrap().tables, vec!["t".to_string()]);
}

#[test]
fn test_full_session() {
    let (config, folder, temp_dir) = setup();

    let store = CredentialStore::from_config(&config).unwrap();
    store.initialize().unwrap();
    store.register("Marco", "Rossi", "marco", "banana").unwrap();
    let user = store.verify("marco", "banana").unwrap().into_user("marco").unwrap();

    let mut workspace = Workspace::new(&user.username, &config.start_folder().unwrap(), &config);
    assert!(workspace.catalog().is_empty());

    let db = workspace.create_database("zoo").unwrap();
    workspace.select_database(&db).unwrap();
    workspace.execute("CREATE TABLE monkeys(name TEXT, age INT)").unwrap();
    workspace.execute("INSERT INTO monkeys VALUES ('Bubbles', 4), ('Koko', NULL)").unwrap();

    let result = workspace.execute("SELECT name, age FROM monkeys ORDER BY name").unwrap();
    assert_eq!(result.row_count(), 2);
    for row in result.rows() {
        assert_eq!(row.len(), result.columns().len());
    }

    let out = temp_dir.path().join("monkeys.json");
    assert_eq!(
        workspace.export_last_result(Some(&out)).unwrap(),
        ExportOutcome::Written(out.clone())
    );
    let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([
            {"name": "Bubbles", "age": "4"},
            {"name": "Koko", "age": null}
        ])
    );

    workspace.select_table(&db, "monkeys").unwrap();
    workspace.drop_selected_table().unwrap();
    assert!(workspace.catalog().database(&db).unwrap().tables.is_empty());

    workspace.select_database(&db).unwrap();
    workspace.delete_selected_database().unwrap();
    assert!(workspace.catalog().is_empty());
    assert!(!folder.join("zoo.db").exists());
}
