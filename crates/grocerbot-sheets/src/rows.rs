//! Sheet rows in and out.

use grocerbot_protocols::{ShoppingRequest, ShoppingResult, SourceError};
use serde_json::{json, Value};

/// Number of columns in a results sheet.
const RESULT_COLUMNS: u32 = 3;

fn cell_text(cell: Option<&Value>) -> String {
    match cell {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Turn `values.get` rows into shopping requests.
///
/// The first row is a header. Rows with a blank name are skipped; a blank
/// quantity means one. Row numbers in errors are 1-based sheet rows.
pub fn parse_rows(values: &[Vec<Value>]) -> Result<Vec<ShoppingRequest>, SourceError> {
    let mut list = Vec::new();
    for (i, row) in values.iter().enumerate().skip(1) {
        let name = cell_text(row.first());
        if name.is_empty() {
            continue;
        }

        let quantity_text = cell_text(row.get(1));
        let quantity = if quantity_text.is_empty() {
            1
        } else {
            quantity_text.parse::<u32>().map_err(|_| SourceError::InvalidRow {
                row: i + 1,
                message: format!("quantity '{}' is not a positive integer", quantity_text),
            })?
        };

        let request = ShoppingRequest::new(name, quantity).ok_or_else(|| SourceError::InvalidRow {
            row: i + 1,
            message: "quantity must be at least 1".to_string(),
        })?;
        list.push(request);
    }
    Ok(list)
}

fn string_cell(s: &str) -> Value {
    json!({ "userEnteredValue": { "stringValue": s } })
}

/// `batchUpdate` requests that add a results sheet, fill it and size its columns.
pub fn results_batch(title: &str, sheet_id: i64, results: &[ShoppingResult]) -> Value {
    let mut rows = vec![json!({
        "values": [string_cell("Requested"), string_cell("Item"), string_cell("Price")]
    })];
    for result in results {
        let mut cells = vec![string_cell(&result.requested)];
        if let Some(item) = &result.result {
            cells.push(string_cell(&item.title));
            cells.push(json!({ "userEnteredValue": { "numberValue": item.price.as_f64() } }));
        }
        rows.push(json!({ "values": cells }));
    }

    json!({
        "requests": [
            {
                "addSheet": {
                    "properties": {
                        "sheetId": sheet_id,
                        "title": title,
                        "index": 1,
                        "sheetType": "GRID",
                        "gridProperties": {
                            "rowCount": rows.len(),
                            "columnCount": RESULT_COLUMNS
                        }
                    }
                }
            },
            {
                "updateCells": {
                    "rows": rows,
                    "fields": "*",
                    "start": { "sheetId": sheet_id, "rowIndex": 0, "columnIndex": 0 }
                }
            },
            {
                "autoResizeDimensions": {
                    "dimensions": {
                        "sheetId": sheet_id,
                        "dimension": "COLUMNS",
                        "startIndex": 0,
                        "endIndex": RESULT_COLUMNS
                    }
                }
            }
        ]
    })
}

#[cfg(test)]
#[path = "rows_tests.rs"]
mod tests;
