use assert_cmd::Command;
use assert_cmd::cargo_bin;
use predicates::prelude::*;

mod common;

#[test]
fn test_catalog_file_replaces_demo_products() {
    let output = Command::new(cargo_bin!("shopcart"))
        .arg("--catalog")
        .arg("tests/fixtures/catalog.csv")
        .write_stdin("{\"op\":\"list_products\"}\n{\"op\":\"list_products\",\"minPrice\":\"100\"}\n")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let responses = common::responses(&output.stdout);
    let names: Vec<&str> = responses[0]["body"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Desk", "Lamp"]);
    assert_eq!(responses[0]["body"][0]["imageUrl"], "https://example.com/desk.png");
    assert_eq!(responses[1]["body"].as_array().unwrap().len(), 1);
}

#[test]
fn test_catalog_bad_rows_are_logged() {
    let mut cmd = Command::new(cargo_bin!("shopcart"));
    cmd.arg("--catalog")
        .arg("tests/fixtures/catalog.csv")
        .env("RUST_LOG", "shopcart=warn")
        .write_stdin("");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("skipping catalog row"));
}

#[test]
fn test_product_update_is_visible_in_cart() {
    let mut cmd = Command::new(cargo_bin!("shopcart"));
    cmd.write_stdin(
        "{\"op\":\"add_cart_item\",\"productId\":4,\"quantity\":3}\n\
         {\"op\":\"update_product\",\"id\":4,\"name\":\"Trackball\",\"price\":\"89.50\"}\n\
         {\"op\":\"list_cart\"}\n",
    );
    let output = cmd.output().expect("Failed to execute command");

    let responses = common::responses(&output.stdout);
    assert_eq!(responses[1]["body"]["name"], "Trackball");
    let line = &responses[2]["body"][0];
    assert_eq!(line["quantity"], 3);
    assert_eq!(line["product"]["name"], "Trackball");
    assert_eq!(line["product"]["price"], "89.50");
}

#[test]
fn test_deleted_product_leaves_cart_listing() {
    let mut cmd = Command::new(cargo_bin!("shopcart"));
    cmd.write_stdin(
        "{\"op\":\"add_cart_item\",\"productId\":1,\"quantity\":1}\n\
         {\"op\":\"add_cart_item\",\"productId\":3,\"quantity\":2}\n\
         {\"op\":\"delete_product\",\"id\":3}\n\
         {\"op\":\"list_cart\"}\n\
         {\"op\":\"get_product\",\"id\":3}\n",
    );
    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());

    let responses = common::responses(&output.stdout);
    assert_eq!(responses[2]["body"]["name"], "Headphones");
    let cart = responses[3]["body"].as_array().unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["product"]["name"], "Laptop");
    assert_eq!(responses[4]["status"], "not_found");
}
