use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vibing(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vibing").unwrap();
    cmd.env("VIBING_HOME", home.path())
        .env_remove("VIBING_DB")
        .env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_lists_seeds_default_board() {
    let home = TempDir::new().unwrap();

    let value = json_output(vibing(&home).args(["lists", "-o", "json"]));
    let names: Vec<&str> = value["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["To Do", "Ongoing", "Blocked", "Done"]);
    assert!(home.path().join("vibing.db").exists());
}

#[test]
fn test_add_and_list_tickets() {
    let home = TempDir::new().unwrap();

    vibing(&home)
        .args(["add", "Fix login", "--list", "blocked"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fix login"));

    let value = json_output(vibing(&home).args(["tickets", "--list", "blocked", "-o", "json"]));
    assert_eq!(value["list"], "Blocked");
    assert_eq!(value["count"], 1);
    assert_eq!(value["items"][0]["title"], "Fix login");
    assert_eq!(value["items"][0]["order"], 0);
}

#[test]
fn test_reorder_and_move() {
    let home = TempDir::new().unwrap();
    for title in ["a", "b", "c"] {
        vibing(&home).args(["add", title]).assert().success();
    }

    let value = json_output(vibing(&home).args(["reorder", "todo", "2", "1", "3", "-o", "json"]));
    let ids: Vec<i64> = value["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1, 3]);

    vibing(&home).args(["move", "1", "done"]).assert().success();

    let value = json_output(vibing(&home).args(["show", "1", "-o", "json"]));
    assert_eq!(value["listId"], "done");
    assert_eq!(value["order"], 0);
}

#[test]
fn test_delete_twice_succeeds() {
    let home = TempDir::new().unwrap();
    vibing(&home).args(["add", "temp"]).assert().success();

    vibing(&home)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));
    vibing(&home)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing deleted"));
}

#[test]
fn test_show_missing_ticket_fails() {
    let home = TempDir::new().unwrap();

    vibing(&home)
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found: ticket 42"));
}

#[test]
fn test_db_flag_overrides_location() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("other.db");

    vibing(&home)
        .args(["version", "--db"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("latest 3"));
    assert!(db.exists());
    assert!(!home.path().join("vibing.db").exists());
}

#[test]
fn test_opening_v1_database_migrates_lists() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("vibing.db");

    {
        let conn = rusqlite::Connection::open(&db).unwrap();
        conn.execute_batch(
            r"
            CREATE TABLE tickets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                list_id TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );
            CREATE TABLE ticket_lists (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                sort_order INTEGER NOT NULL
            );
            INSERT INTO ticket_lists (id, name, sort_order) VALUES
                ('todo', 'To Do', 0),
                ('in-progress', 'In Progress', 1),
                ('done', 'Done', 2);
            INSERT INTO tickets (title, list_id, sort_order, created_at)
                VALUES ('Old ticket', 'in-progress', 0, '2023-05-01T08:00:00+00:00');
            PRAGMA user_version = 1;
            ",
        )
        .unwrap();
    }

    let value = json_output(vibing(&home).args(["board", "-o", "json"]));
    let lists = value["lists"].as_array().unwrap();
    let summary: Vec<(&str, &str, i64)> = lists
        .iter()
        .map(|l| {
            (
                l["id"].as_str().unwrap(),
                l["name"].as_str().unwrap(),
                l["order"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("todo", "To Do", 0),
            ("in-progress", "Ongoing", 1),
            ("blocked", "Blocked", 2),
            ("done", "Done", 3),
        ]
    );
    assert_eq!(lists[1]["tickets"][0]["title"], "Old ticket");

    let value = json_output(vibing(&home).args(["version", "-o", "json"]));
    assert_eq!(value["schemaVersion"], 3);
}
