use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json\s*\n(.*?)\n```").expect("fenced-block pattern is valid")
});

/// Keys the renderer knows how to tabulate, with their display titles.
const RECOGNIZED_KEYS: [(&str, &str); 3] = [
    ("restaurants", "Top Restaurants"),
    ("hotels", "Top Hotels"),
    ("forecast", "7-Day Forecast"),
];

/// A structured fragment recovered from generated markdown, rendered as an
/// aligned text table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTable {
    pub title: String,
    pub rendered: String,
}

/// Best-effort scan of generated text for ```json fenced blocks carrying a
/// recognized key. Anything that fails to parse is skipped silently; the
/// generation side never guarantees these blocks exist.
pub fn structured_tables(text: &str) -> Vec<ExtractedTable> {
    let mut tables = Vec::new();

    for captures in FENCED_JSON.captures_iter(text) {
        let Ok(value) = serde_json::from_str::<Value>(&captures[1]) else {
            continue;
        };
        let Some(object) = value.as_object() else {
            continue;
        };

        for (key, title) in RECOGNIZED_KEYS {
            let Some(rows) = object.get(key).and_then(Value::as_array) else {
                continue;
            };
            if let Some(rendered) = render_table(rows) {
                tables.push(ExtractedTable {
                    title: title.to_string(),
                    rendered,
                });
            }
        }
    }

    tables
}

/// Render an array of flat JSON records as an aligned pipe table. Columns
/// are the union of record keys in first-seen order. Returns `None` when
/// the rows are not uniform records.
fn render_table(rows: &[Value]) -> Option<String> {
    let mut columns: Vec<&str> = Vec::new();
    let mut records: Vec<&Map<String, Value>> = Vec::new();

    for row in rows {
        let record = row.as_object()?;
        for key in record.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key.as_str());
            }
        }
        records.push(record);
    }

    if records.is_empty() || columns.is_empty() {
        return None;
    }

    let body: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(*column).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            body.iter()
                .map(|cells| cells[index].chars().count())
                .chain([column.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&render_row(
        &columns.iter().map(ToString::to_string).collect::<Vec<_>>(),
        &widths,
    ));
    out.push_str(&render_separator(&widths));
    for cells in &body {
        out.push_str(&render_row(cells, &widths));
    }

    Some(out)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

fn render_separator(widths: &[usize]) -> String {
    let dashes: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    format!("|-{}-|\n", dashes.join("-|-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restaurants_block_becomes_a_table() {
        let text = "Here are my picks.\n\n```json\n{\"restaurants\": [\
                    {\"name\": \"Chez Nous\", \"address\": \"1 Rue de Lyon\", \"rating\": 4.5},\
                    {\"name\": \"Le Petit\", \"address\": \"2 Avenue Foch\", \"rating\": 4.2}\
                    ]}\n```\nEnjoy!";

        let tables = structured_tables(text);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title, "Top Restaurants");
        assert!(tables[0].rendered.contains("Chez Nous"));
        assert!(tables[0].rendered.contains("| name"));
        assert!(tables[0].rendered.contains("4.5"));
    }

    #[test]
    fn one_block_can_yield_restaurant_and_hotel_tables() {
        let text = "```json\n{\"restaurants\": [{\"name\": \"A\"}], \"hotels\": [{\"name\": \"B\"}]}\n```";

        let titles: Vec<String> = structured_tables(text)
            .into_iter()
            .map(|table| table.title)
            .collect();

        assert_eq!(titles, ["Top Restaurants", "Top Hotels"]);
    }

    #[test]
    fn forecast_key_is_recognized() {
        let text = "```json\n{\"forecast\": [\
                    {\"day\": \"Mon\", \"high\": 22, \"low\": 14}\
                    ]}\n```";

        let tables = structured_tables(text);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title, "7-Day Forecast");
        assert!(tables[0].rendered.contains("22"));
    }

    #[test]
    fn malformed_json_is_ignored() {
        let text = "```json\n{not json at all\n```";
        assert!(structured_tables(text).is_empty());
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let text = "```json\n{\"museums\": [{\"name\": \"Louvre\"}]}\n```";
        assert!(structured_tables(text).is_empty());
    }

    #[test]
    fn non_record_rows_are_ignored() {
        let text = "```json\n{\"hotels\": [\"just a string\"]}\n```";
        assert!(structured_tables(text).is_empty());
    }

    #[test]
    fn plain_markdown_without_blocks_yields_nothing() {
        assert!(structured_tables("## Day 1\nWalk along the Seine.").is_empty());
    }

    #[test]
    fn columns_union_preserves_first_seen_order() {
        let text = "```json\n{\"hotels\": [\
                    {\"name\": \"A\", \"stars\": 5},\
                    {\"name\": \"B\", \"price\": \"$120\"}\
                    ]}\n```";

        let tables = structured_tables(text);
        let header = tables[0].rendered.lines().next().unwrap().to_string();

        let name = header.find("name").unwrap();
        let stars = header.find("stars").unwrap();
        let price = header.find("price").unwrap();
        assert!(name < stars && stars < price);
    }
}
