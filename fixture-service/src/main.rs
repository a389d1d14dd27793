use anyhow::Result;
use fixture_service::{
    config::AppConfig,
    generator::{self, identity},
    observability,
    render::{self, SeedSqlOptions},
};
use std::env;

fn main() -> Result<()> {
    observability::init_tracing();

    // Config path: first argument, else FIXTURE_CONFIG, else the default
    // file name next to the invocation.
    let args: Vec<String> = env::args().collect();
    let cfg = match args.get(1) {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let fixtures = generator::generate(&cfg)?;
    tracing::info!(
        users = fixtures.users.len(),
        meters = fixtures.meters.len(),
        "generated fixture set"
    );

    render::write_simulator_csv(&cfg.output.csv_path, &fixtures.meters)?;
    tracing::info!(path = %cfg.output.csv_path, "wrote simulator csv");

    let g = &cfg.generation;
    let sql_opts = SeedSqlOptions {
        emit_cleanup: cfg.output.emit_cleanup,
        email_prefix: g.email_prefix.clone(),
        serial_first: identity::meter_serial(&g.serial_prefix, g.start_meter_id, 0),
        serial_past_end: identity::meter_serial(
            &g.serial_prefix,
            g.start_meter_id,
            u64::from(g.count),
        ),
        demo_email: cfg.demo.as_ref().map(|d| d.email.clone()),
        demo_serial: cfg.demo.as_ref().map(|d| d.meter_serial.clone()),
    };
    render::write_seed_sql(&cfg.output.sql_path, &fixtures.users, &fixtures.meters, &sql_opts)?;
    tracing::info!(path = %cfg.output.sql_path, "wrote seed sql");

    Ok(())
}
