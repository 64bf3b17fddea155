use brecho_core::{EditSession, FieldKind, PRICE_ALIASES};

pub(crate) fn print_session(session: &EditSession) {
    println!("SKU  {}", session.sku());
    println!(
        "Consignor  {}",
        session.consignor().unwrap_or_else(|| "-".to_string())
    );

    let statics = session.statics();
    if !statics.is_empty() {
        println!();
        println!("[static]");
        let width = statics.keys().map(String::len).max().unwrap_or(0);
        for (key, value) in statics {
            println!("  {key:<width$}  {}", render_json(value));
        }
    }

    for (category, fields) in session.fields().grouped() {
        println!();
        println!("[{category}]");
        let width = fields.iter().map(|f| f.display_name.len()).max().unwrap_or(0);
        for field in fields {
            let required = if session.required_fields().contains(&field.key) {
                "*"
            } else {
                " "
            };
            let mut line = format!(
                "{required} {:<width$}  {:<9}  {}",
                field.display_name,
                field.kind.as_str(),
                field.value
            );
            if field.kind == FieldKind::Select && !field.options.is_empty() {
                line.push_str(&format!("  ({})", field.options.join("|")));
            }
            println!("{}", line.trim_end());
        }
    }

    println!();
    println!("[pricing]");
    for (canonical, _) in PRICE_ALIASES {
        let value = session
            .pricing()
            .get(canonical)
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("  {canonical:<19}  {value}");
    }

    if !session.photos().is_empty() {
        println!();
        println!("Photos  {}", session.photos().len());
    }
}

fn render_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
