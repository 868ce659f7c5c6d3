use assert_cmd::Command;
use assert_cmd::cargo_bin;
use predicates::prelude::*;

mod common;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(cargo_bin!("shopcart"))
        .arg("tests/fixtures/checkout.jsonl")
        .output()?;
    assert!(output.status.success());

    let responses = common::responses(&output.stdout);
    assert_eq!(responses.len(), 7);
    assert!(responses.iter().all(|r| r["status"] == "success"));

    // Demo catalog
    assert_eq!(responses[0]["body"].as_array().unwrap().len(), 4);
    assert_eq!(responses[0]["body"][0]["name"], "Laptop");

    assert_eq!(responses[3]["body"].as_array().unwrap().len(), 2);
    assert_eq!(responses[3]["body"][1]["product"]["name"], "Computer mouse");

    let payment = &responses[4]["body"];
    assert_eq!(payment["status"], "completed");
    assert_eq!(payment["amount"], "2299.97");
    assert_eq!(payment["cardNumber"], "4242424242424242");

    assert_eq!(responses[5]["body"], serde_json::json!([]));
    assert_eq!(responses[6]["body"].as_array().unwrap().len(), 1);
    Ok(())
}

#[test]
fn test_cli_reads_stdin() {
    let mut cmd = Command::new(cargo_bin!("shopcart"));
    cmd.write_stdin("{\"op\":\"get_product\",\"id\":3}\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"Headphones\""));
}

#[test]
fn test_cli_logs_to_stderr_only() {
    let mut cmd = Command::new(cargo_bin!("shopcart"));
    cmd.env("RUST_LOG", "shopcart=info")
        .write_stdin("{\"op\":\"list_payments\"}\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("{\"status\":\"success\",\"body\":[]}\n"))
        .stderr(predicate::str::contains("seeded demo catalog"));
}

#[test]
fn test_cli_json_logs() {
    let mut cmd = Command::new(cargo_bin!("shopcart"));
    cmd.env("RUST_LOG", "shopcart=info")
        .arg("--log-format")
        .arg("json")
        .write_stdin("");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("\"message\":\"seeded demo catalog\""));
}

#[test]
fn test_cli_missing_request_file() {
    let mut cmd = Command::new(cargo_bin!("shopcart"));
    cmd.arg("tests/fixtures/does_not_exist.jsonl");

    cmd.assert().failure();
}
