pub mod ddl;
pub mod tables;
pub mod types;

pub use ddl::{create_schema, open_database, open_database_readonly};
pub use tables::{get_table, table_names, ALL_TABLES};
pub use types::*;
