use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn base_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("brecho"));
    cmd.env("HOME", home)
        .env_remove("BRECHO_API_URL")
        .env_remove("BRECHO_HOSTNAME")
        .env_remove("BRECHO_TOKEN")
        .env("HOSTNAME", "test-runner");
    cmd
}

#[test]
fn field_types_lists_kinds_and_categories() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["field-types"])
        .assert()
        .success()
        .stdout(predicate::str::contains("multiline"))
        .stdout(predicate::str::contains("select"))
        .stdout(predicate::str::contains("commercial"));
}

#[test]
fn schema_describes_submission_payload() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ItemSubmission"))
        .stdout(predicate::str::contains("dynamic_fields"));
}

#[test]
fn config_contexts_persist_between_runs() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args([
            "config",
            "set-context",
            "loja",
            "--addr",
            "https://api.example",
            "--operator",
            "ana",
        ])
        .assert()
        .success();

    let saved = fs::read_to_string(home_dir.path().join(".brecho").join("config.json"))
        .expect("config file");
    assert!(saved.contains("https://api.example"));

    base_cmd(home_dir.path())
        .args(["config", "current-context"])
        .assert()
        .success()
        .stdout(predicate::str::contains("loja"));

    base_cmd(home_dir.path())
        .args(["config", "use-context", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("context not found: missing"));
}

#[test]
fn remote_http_requires_insecure_flag() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["--addr", "http://192.0.2.10:8000", "consignor", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "refusing to use http:// without --insecure",
        ));
}

#[test]
fn item_list_filters_and_resolves_consignor_names() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();

    server
        .mock("GET", "/items")
        .match_header("authorization", "Bearer token")
        .with_status(200)
        .with_body(
            json!([
                { "sku": "BR-1", "name": "Blusa de seda", "consignor_id": 1, "status": "available" },
                { "sku": "BR-2", "name": "Calça jeans", "consignor_id": 99, "status": "available" },
                { "sku": "BR-3", "name": "Casaco", "consignor_id": 1, "active": false },
            ])
            .to_string(),
        )
        .create();
    server
        .mock("GET", "/consignors")
        .with_status(200)
        .with_body(json!({ "consignors": [{ "id": 1, "name": "Ana Souza" }] }).to_string())
        .create();

    base_cmd(home_dir.path())
        .args([
            "--addr",
            &server.url(),
            "--token",
            "token",
            "item",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Souza"))
        .stdout(predicate::str::contains("N/A"))
        .stdout(predicate::str::contains("BR-3").not());

    base_cmd(home_dir.path())
        .args([
            "--addr",
            &server.url(),
            "--token",
            "token",
            "item",
            "list",
            "--search",
            "calca",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("BR-2"))
        .stdout(predicate::str::contains("BR-1").not());
}

#[test]
fn intake_submit_requires_consignor() {
    let home_dir = tempdir().expect("tempdir");
    let proposal = home_dir.path().join("proposal.json");
    fs::write(
        &proposal,
        json!({ "sku": "BR-9", "cadastro": { "Cor": "Azul" } }).to_string(),
    )
    .expect("proposal");

    base_cmd(home_dir.path())
        .args(["intake", "submit"])
        .arg(&proposal)
        .assert()
        .failure()
        .stderr(predicate::str::contains("consignor is required"));
}

#[test]
fn intake_submit_dry_run_prints_both_shapes() {
    let home_dir = tempdir().expect("tempdir");
    let proposal = home_dir.path().join("proposal.json");
    fs::write(
        &proposal,
        json!({
            "sku": "BR-9",
            "cadastro": { "Cor": "Azul", "preco_maximo": "60" },
        })
        .to_string(),
    )
    .expect("proposal");

    base_cmd(home_dir.path())
        .args(["intake", "submit", "--consignor", "5", "--set", "manga=curta", "--dry-run"])
        .arg(&proposal)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"precoMax\": \"60\""))
        .stdout(predicate::str::contains("\"preco_maximo\": \"60\""))
        .stdout(predicate::str::contains("\"manga\": \"curta\""))
        .stdout(predicate::str::contains("\"dynamic_fields\""));
}

#[test]
fn sale_summary_totals_per_consignor() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();

    server
        .mock("GET", "/sales")
        .with_status(200)
        .with_body(
            json!([
                { "id": 1, "sku": "BR-1", "price": 40.0, "consignor_id": 1, "sold_at": "2026-04-01T12:00:00Z" },
                { "id": 2, "sku": "BR-2", "price": 60.0, "consignor_id": 1, "sold_at": "2026-04-02T12:00:00Z" },
            ])
            .to_string(),
        )
        .create();
    server
        .mock("GET", "/consignors")
        .with_status(200)
        .with_body(json!([{ "id": 1, "name": "Ana Souza" }]).to_string())
        .create();
    server
        .mock("GET", "/items")
        .with_status(200)
        .with_body("[]")
        .create();

    base_cmd(home_dir.path())
        .args(["--addr", &server.url(), "sale", "summary", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 2"))
        .stdout(predicate::str::contains("\"Ana Souza\": 100.0"));
}

#[test]
fn consignor_create_reports_server_errors() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();

    server
        .mock("POST", "/consignors")
        .match_body(Matcher::PartialJson(json!({ "name": "Bia" })))
        .with_status(422)
        .with_body("phone is invalid")
        .create();

    base_cmd(home_dir.path())
        .args([
            "--addr",
            &server.url(),
            "consignor",
            "create",
            "--name",
            "Bia",
            "--phone",
            "x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Request failed: 422"))
        .stderr(predicate::str::contains("phone is invalid"));
}
