use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn run_cmd(db_path: &Path, args: &[&str]) -> String {
    let output = cargo_bin_cmd!("cadastro")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(db_path: &Path, args: &[&str]) -> Value {
    let output = cargo_bin_cmd!("cadastro")
        .args(["--db-path", db_path.to_str().expect("db path"), "--json"])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn run_cmd_err(db_path: &Path, args: &[&str]) -> i32 {
    let output = cargo_bin_cmd!("cadastro")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command");
    assert!(!output.status.success(), "command succeeded: {:?}", output);
    output.status.code().expect("exit code")
}

// Address flags are always passed so no CEP lookup is attempted.
fn add_args<'a>(name: &'a str, cpf: &'a str) -> Vec<&'a str> {
    vec![
        "add",
        "--name",
        name,
        "--cpf",
        cpf,
        "--email",
        "cliente@example.com",
        "--phone",
        "(11) 98765-4321",
        "--cep",
        "01310-100",
        "--street",
        "Avenida Paulista",
        "--number",
        "1578",
        "--neighborhood",
        "Bela Vista",
        "--city",
        "Sao Paulo",
        "--region",
        "SP",
    ]
}

#[test]
fn cli_add_list_show_search_delete_flow() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("cadastro.sqlite3");

    let created = run_cmd_json(&db_path, &add_args("Ana Souza", "111.444.777-35"));
    assert_eq!(created["name"], "Ana Souza");
    assert_eq!(created["cpf"], "11144477735");
    assert_eq!(created["cep"], "01310100");
    let id = created["id"].as_str().expect("id").to_string();

    let list = run_cmd_json(&db_path, &["list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id.as_str());

    let detail = run_cmd_json(&db_path, &["show", &id]);
    assert_eq!(detail["email"], "cliente@example.com");
    assert_eq!(detail["phone"], "(11) 98765-4321");

    let by_cpf = run_cmd_json(&db_path, &["search", "11144477735"]);
    assert_eq!(by_cpf["id"], id.as_str());

    let by_name = run_cmd_json(&db_path, &["search", "ana"]);
    assert_eq!(by_name["id"], id.as_str());

    run_cmd(&db_path, &["delete", &id]);
    let empty = run_cmd_json(&db_path, &["list"]);
    assert_eq!(empty.as_array().expect("array").len(), 0);
}

#[test]
fn cli_edit_updates_fields() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("cadastro.sqlite3");

    let created = run_cmd_json(&db_path, &add_args("Ana Souza", "111.444.777-35"));
    let id = created["id"].as_str().expect("id").to_string();

    let updated = run_cmd_json(
        &db_path,
        &["edit", &id, "--name", "Ana Souza Lima", "--number", "2000"],
    );
    assert_eq!(updated["name"], "Ana Souza Lima");
    assert_eq!(updated["number"], "2000");
    assert_eq!(updated["cpf"], "11144477735");
}

#[test]
fn cli_add_rejects_invalid_cpf() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("cadastro.sqlite3");

    let code = run_cmd_err(&db_path, &add_args("Ana Souza", "111.444.777-34"));
    assert_eq!(code, 3);

    let list = run_cmd_json(&db_path, &["list"]);
    assert_eq!(list.as_array().expect("array").len(), 0);
}

#[test]
fn cli_add_rejects_duplicate_cpf() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("cadastro.sqlite3");

    run_cmd(&db_path, &add_args("Ana Souza", "11144477735"));
    // Same CPF behind a different mask still collides.
    let code = run_cmd_err(&db_path, &add_args("Outra Pessoa", "111.444.777-35"));
    assert_eq!(code, 3);
}

#[test]
fn cli_missing_customer_exits_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("cadastro.sqlite3");

    let code = run_cmd_err(
        &db_path,
        &["show", "00000000-0000-4000-8000-000000000000"],
    );
    assert_eq!(code, 2);

    let code = run_cmd_err(
        &db_path,
        &["delete", "00000000-0000-4000-8000-000000000000"],
    );
    assert_eq!(code, 2);
}

#[test]
fn cli_search_by_name_picks_most_recently_updated_match() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("cadastro.sqlite3");

    run_cmd(&db_path, &add_args("Ana Souza", "11144477735"));
    // The gap keeps the two updated_at seconds apart.
    std::thread::sleep(std::time::Duration::from_millis(1100));
    let second = run_cmd_json(&db_path, &add_args("Mariana Prado", "52998224725"));

    // "ana" matches both names. The newer record wins even though it
    // sorts after the older one alphabetically, and the older match is
    // dropped from the output entirely.
    let hit = run_cmd_json(&db_path, &["search", "ana"]);
    assert!(hit.is_object(), "expected a single record: {:?}", hit);
    assert_eq!(hit["id"], second["id"]);
    assert_eq!(hit["name"], "Mariana Prado");
}

#[test]
fn cli_search_without_match_exits_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("cadastro.sqlite3");

    run_cmd(&db_path, &add_args("Ana Souza", "11144477735"));
    let code = run_cmd_err(&db_path, &["search", "nobody"]);
    assert_eq!(code, 2);
}

#[test]
fn cli_rejects_malformed_id() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("cadastro.sqlite3");

    let code = run_cmd_err(&db_path, &["show", "not-a-uuid"]);
    assert_eq!(code, 3);
}
