use grocerbot_protocols::{CatalogItem, Price};
use serde_json::json;

use super::*;

fn rows(value: Value) -> Vec<Vec<Value>> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_parse_rows_skips_header() {
    let list = parse_rows(&rows(json!([
        ["Item", "Quantity"],
        ["milk", "2"],
        ["eggs", "1"]
    ])))
    .unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], ShoppingRequest::new("milk", 2).unwrap());
    assert_eq!(list[1], ShoppingRequest::new("eggs", 1).unwrap());
}

#[test]
fn test_parse_rows_blank_quantity_means_one() {
    let list = parse_rows(&rows(json!([["Item", "Quantity"], ["bread"], ["butter", " "]]))).unwrap();
    assert_eq!(list[0].quantity.get(), 1);
    assert_eq!(list[1].quantity.get(), 1);
}

#[test]
fn test_parse_rows_skips_blank_names() {
    let list = parse_rows(&rows(json!([["Item", "Quantity"], [], ["", "3"], ["  ", "1"], ["apples", "6"]]))).unwrap();
    assert_eq!(list, vec![ShoppingRequest::new("apples", 6).unwrap()]);
}

#[test]
fn test_parse_rows_numeric_cells() {
    let list = parse_rows(&rows(json!([["Item", "Quantity"], ["limes", 4]]))).unwrap();
    assert_eq!(list[0].quantity.get(), 4);
}

#[test]
fn test_parse_rows_rejects_bad_quantity() {
    let err = parse_rows(&rows(json!([["Item", "Quantity"], ["milk", "1"], ["eggs", "a dozen"]]))).unwrap_err();
    assert!(matches!(err, SourceError::InvalidRow { row: 3, .. }));

    let err = parse_rows(&rows(json!([["Item", "Quantity"], ["milk", "0"]]))).unwrap_err();
    assert!(matches!(err, SourceError::InvalidRow { row: 2, .. }));
}

#[test]
fn test_parse_rows_empty_sheet() {
    assert!(parse_rows(&[]).unwrap().is_empty());
    assert!(parse_rows(&rows(json!([["Item", "Quantity"]]))).unwrap().is_empty());
}

#[test]
fn test_results_batch_layout() {
    let results = vec![
        ShoppingResult::new(
            "milk",
            Some(CatalogItem {
                title: "Whole Milk".into(),
                price: Price::from_cents(349),
                price_text: "$3.49".into(),
                on_sale: false,
                image_url: None,
                was_previously_purchased: true,
            }),
        ),
        ShoppingResult::new("saffron", None),
    ];
    let batch = results_batch("Shopping Trip on October 16th 2026 @ 9:05 am", 1_792_000_000, &results);
    let requests = batch["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 3);

    let props = &requests[0]["addSheet"]["properties"];
    assert_eq!(props["sheetId"], 1_792_000_000_i64);
    assert_eq!(props["index"], 1);
    assert_eq!(props["gridProperties"]["rowCount"], 3);
    assert_eq!(props["gridProperties"]["columnCount"], 3);

    let rows = requests[1]["updateCells"]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["values"][2]["userEnteredValue"]["stringValue"], "Price");
    assert_eq!(rows[1]["values"][1]["userEnteredValue"]["stringValue"], "Whole Milk");
    assert_eq!(rows[1]["values"][2]["userEnteredValue"]["numberValue"], 3.49);
    // Unresolved items only name the request.
    assert_eq!(rows[2]["values"].as_array().unwrap().len(), 1);

    let dims = &requests[2]["autoResizeDimensions"]["dimensions"];
    assert_eq!(dims["dimension"], "COLUMNS");
    assert_eq!(dims["endIndex"], 3);
}
