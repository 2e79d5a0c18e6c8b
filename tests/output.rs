mod support;

use std::fs;

use bookstore_client::store::CATALOG_FILE;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;

use support::TestStore;

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn books_listing_is_aligned_and_titled() {
    let store = TestStore::new();
    let author = store.add_author("Frank Herbert");
    store.add_book(&author, "Dune", 1965);
    store.add_book(&author, "Dune Messiah", 1969);

    store
        .cmd()
        .arg("books")
        .assert()
        .success()
        .stdout(contains("bookstore books: 2\n"))
        .stdout(contains("\n     1  Dune (1965) by 1, modified "))
        .stdout(contains("\n     2  Dune Messiah (1969) by 1, modified "));
}

#[test]
fn saved_book_fields_line_up() {
    let store = TestStore::new();
    let author = store.add_author("Frank Herbert");

    store
        .cmd()
        .args(["new", "--title", "Dune", "--year", "1965", "--author", "1"])
        .assert()
        .success()
        .stdout(contains("bookstore new: Dune\n"))
        .stdout(contains(format!("  author         {}\n", author.id)))
        .stdout(contains("  year           1965\n"))
        .stdout(contains("  last_modified  "));
}

#[test]
fn quiet_suppresses_report() {
    let store = TestStore::new();
    store
        .cmd()
        .args(["add-author", "Frank Herbert", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn since_override_is_reported_as_warning() {
    let store = TestStore::new();
    let author = store.add_author("Frank Herbert");
    let book = store.add_book(&author, "Dune", 1965);

    let output = store
        .cmd()
        .args(["edit", book.id.to_string().as_str(), "--title", "Mine", "--overwrite"])
        .args(["--since", "2000-01-01T00:00:00Z", "--json"])
        .assert()
        .success()
        .get_output()
        .clone();
    let value = stdout_json(&output);
    assert_eq!(value["status"], "success");
    let warnings = value["warnings"].as_array().expect("warnings");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0]
        .as_str()
        .unwrap()
        .contains("started at 2000-01-01T00:00:00+00:00"));
}

#[test]
fn plain_edit_has_no_warnings() {
    let store = TestStore::new();
    let author = store.add_author("Frank Herbert");
    let book = store.add_book(&author, "Dune", 1965);

    let output = store
        .cmd()
        .args(["edit", book.id.to_string().as_str(), "--year", "1966", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .get_output()
        .clone();
    assert!(stdout_json(&output).get("warnings").is_none());
}

#[test]
fn invalid_config_falls_back_with_warning() {
    let store = TestStore::new();
    store
        .write_config("[session]\ntoken = \"\"\n\n[conflict]\non_conflict = \"keep\"\n")
        .expect("write config");
    store.add_author("Frank Herbert");

    store
        .cmd()
        .arg("authors")
        .assert()
        .success()
        .stdout(contains("Frank Herbert"))
        .stderr(contains("warning: ignoring .bookstore.toml, using defaults"))
        .stderr(contains("session.token cannot be empty"));
}

#[test]
fn invalid_config_warning_lands_in_json_envelope() {
    let store = TestStore::new();
    store
        .write_config("[conflict]\non_conflict = \"merge\"\n")
        .expect("write config");

    let output = store
        .cmd()
        .args(["books", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .get_output()
        .clone();
    let value = stdout_json(&output);
    assert!(value["warnings"][0]
        .as_str()
        .unwrap()
        .starts_with("ignoring .bookstore.toml"));
}

#[test]
fn edit_warns_when_stored_author_is_missing() {
    let store = TestStore::new();
    let author = store.add_author("Frank Herbert");
    let book = store.add_book(&author, "Dune", 1965);

    let path = store.path().join(CATALOG_FILE);
    let mut catalog: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read catalog")).expect("catalog");
    catalog["authors"] = Value::Array(Vec::new());
    fs::write(&path, catalog.to_string()).expect("write catalog");

    store
        .cmd()
        .args(["edit", book.id.to_string().as_str(), "--title", "Dune"])
        .assert()
        .code(2)
        .stderr(contains(format!(
            "warning: book {} refers to author {} which is not in the catalog",
            book.id, author.id
        )))
        .stderr(contains("error: Author must be selected."));
}
