use std::path::Path;

use serde_json::{Value, json};

/// Write `<stem>-result.json` into `dir` with the given JSON body.
pub fn write_result(dir: &Path, stem: &str, body: &Value) {
    let path = dir.join(format!("{}-result.json", stem));
    std::fs::write(path, serde_json::to_string_pretty(body).unwrap()).unwrap();
}

/// A typical Allure result object.
pub fn allure_result(name: &str, status: &str, start: i64, stop: i64, suite: &str) -> Value {
    json!({
        "uuid": format!("uuid-{}", name),
        "name": name,
        "status": status,
        "start": start,
        "stop": stop,
        "labels": [
            { "name": "suite", "value": suite },
            { "name": "package", "value": "com.example.tests" },
            { "name": "framework", "value": "testng" }
        ]
    })
}

/// The `<tbody>` section of a rendered report.
pub fn table_body(html: &str) -> &str {
    let start = html.find("<tbody>").expect("report has a tbody");
    let end = html.find("</tbody>").expect("report closes its tbody");
    &html[start + "<tbody>".len()..end]
}
