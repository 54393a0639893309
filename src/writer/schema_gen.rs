use crate::schema::TableSchema;

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);
    let mut columns = Vec::new();

    let single_key = schema.unique_keys.len() == 1;

    for col in schema.columns {
        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
        let pk = if single_key && schema.unique_keys[0] == col.name {
            " PRIMARY KEY"
        } else {
            ""
        };

        columns.push(format!(
            "    {} {}{}{}",
            col.name,
            col.col_type.sql_type(),
            pk,
            null_constraint
        ));
    }

    if !single_key {
        columns.push(format!("    PRIMARY KEY ({})", schema.unique_keys.join(", ")));
    }

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key and declared index columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    let fk_columns = schema.foreign_keys.iter().map(|fk| fk.column);
    let extra = schema.indexes.iter().copied();

    let mut seen = Vec::new();
    fk_columns
        .chain(extra)
        .filter(|col| {
            if seen.contains(col) {
                false
            } else {
                seen.push(*col);
                true
            }
        })
        .map(|col| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                schema.name, col, schema.name, col
            )
        })
        .collect()
}

/// Generate the insert-or-update statement keyed on the table's unique keys
pub fn generate_upsert(schema: &TableSchema) -> String {
    let columns = schema.column_names();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    let updates: Vec<String> = schema
        .update_columns()
        .iter()
        .map(|col| format!("{} = excluded.{}", col, col))
        .collect();

    let conflict_action = if updates.is_empty() {
        "DO NOTHING".to_string()
    } else {
        format!("DO UPDATE SET {}", updates.join(", "))
    };

    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({}) {}",
        schema.name,
        columns.join(", "),
        placeholders.join(", "),
        schema.unique_keys.join(", "),
        conflict_action
    )
}
