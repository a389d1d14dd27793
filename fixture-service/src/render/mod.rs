pub mod seed_sql;
pub mod simulator_csv;

pub use seed_sql::{render_seed_sql, write_seed_sql, SeedSqlOptions};
pub use simulator_csv::write_simulator_csv;
