//! Table definitions for the normalized prize schema.
//!
//! Surrogate ids are SQLite rowid aliases, assigned on insert. The unique
//! indexes carry the identity rules: category by name, recipient by the
//! observed name pair, prize by (year, category).

use super::types::*;

pub static CATEGORY: TableSchema = TableSchema {
    name: "category",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
    ],
    foreign_keys: &[],
    indexes: &[Index::unique("name", &["name"])],
};

// The unique index normalizes absent name components through ifnull:
// SQLite treats NULLs as distinct in unique indexes, and organization
// laureates routinely carry no surname, so a plain column index would let
// a re-run re-insert the same name pair.
pub static RECIPIENT: TableSchema = TableSchema {
    name: "recipient",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("first_name", ColumnType::Text),
        Column::new("last_name", ColumnType::Text),
    ],
    foreign_keys: &[],
    indexes: &[Index::unique(
        "name_pair",
        &["ifnull(first_name, '')", "ifnull(last_name, '')"],
    )],
};

pub static PRIZE: TableSchema = TableSchema {
    name: "prize",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("year", ColumnType::Integer),
        Column::new("category_id", ColumnType::Integer),
    ],
    foreign_keys: &[ForeignKey::new("category_id", "category")],
    indexes: &[Index::unique("year_category", &["year", "category_id"])],
};

// No unique index: a re-run without a prior schema drop may duplicate
// awards, which the duplicate-tolerant load accepts.
pub static AWARD: TableSchema = TableSchema {
    name: "award",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("motivation", ColumnType::Text),
        Column::new("share", ColumnType::Integer),
        Column::new("prize_id", ColumnType::Integer),
        Column::new("recipient_id", ColumnType::Integer),
    ],
    foreign_keys: &[
        ForeignKey::new("prize_id", "prize"),
        ForeignKey::new("recipient_id", "recipient"),
    ],
    indexes: &[],
};

/// All tables in dependency order (FK parents before children)
pub static ALL_TABLES: &[&TableSchema] = &[&CATEGORY, &RECIPIENT, &PRIZE, &AWARD];

/// Table names in dependency order
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}

pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}
