use serde::Deserialize;
use std::fs;

use crate::generator::FixtureError;

/// How per-record identifiers (user/meter ids, wallet suffixes) are derived.
///
/// `Deterministic` hashes the record's unique key (email, serial number) so
/// identifiers survive regeneration; `Random` draws them from the run's RNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    Deterministic,
    Random,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub count: u32,
    pub start_meter_id: u64,
    #[serde(default = "default_serial_prefix")]
    pub serial_prefix: String,
    #[serde(default = "default_email_prefix")]
    pub email_prefix: String,
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
    #[serde(default = "default_prosumer_probability")]
    pub prosumer_probability: f64,
    #[serde(default = "default_user_balance")]
    pub user_balance: f64,
    #[serde(default = "default_identity")]
    pub identity: IdentityMode,
    /// Seed for the run's RNG; omit to seed from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Geographic sampling area and per-meter physical attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    /// Half-width of the sampling square, in degrees.
    pub radius: f64,
    #[serde(default = "default_transformer_id_max")]
    pub transformer_id_max: u32,
    #[serde(default = "default_contract_capacity_kw")]
    pub contract_capacity_kw: f64,
    #[serde(default = "default_building_area_m2")]
    pub building_area_m2: f64,
    #[serde(default = "default_min_dist_to_transformer_m")]
    pub min_dist_to_transformer_m: f64,
    #[serde(default = "default_max_dist_to_transformer_m")]
    pub max_dist_to_transformer_m: f64,
}

/// Fixed demo account emitted ahead of the generated population, for UI
/// login against a seeded database. Omit the table to skip it.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    pub email: String,
    pub username: String,
    /// Precomputed password hash; the generator never hashes passwords.
    pub password_hash: String,
    pub wallet_address: String,
    pub meter_serial: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub csv_path: String,
    pub sql_path: String,
    #[serde(default = "default_emit_cleanup")]
    pub emit_cleanup: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub area: AreaConfig,
    pub demo: Option<DemoConfig>,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("FIXTURE_CONFIG").unwrap_or_else(|_| "fixture-config.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let cfg: AppConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }

    /// Input validation. Runs before any output file is opened so a bad
    /// parameter set never leaves a half-written artifact behind.
    pub fn validate(&self) -> Result<(), FixtureError> {
        let g = &self.generation;
        let a = &self.area;

        if !(0.0..=1.0).contains(&g.prosumer_probability) {
            return Err(FixtureError::Config(format!(
                "prosumer_probability must be within [0, 1], got {}",
                g.prosumer_probability
            )));
        }
        if g.serial_prefix.is_empty() || g.email_prefix.is_empty() || g.email_domain.is_empty() {
            return Err(FixtureError::Config(
                "serial_prefix, email_prefix and email_domain must be non-empty".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&a.center_lat) || !(-180.0..=180.0).contains(&a.center_lon) {
            return Err(FixtureError::Config(format!(
                "({}, {}) is not a valid coordinate pair",
                a.center_lat, a.center_lon
            )));
        }
        if !(a.radius > 0.0) {
            return Err(FixtureError::Config(format!(
                "radius must be positive, got {}",
                a.radius
            )));
        }
        if !(a.min_dist_to_transformer_m > 0.0)
            || a.min_dist_to_transformer_m > a.max_dist_to_transformer_m
        {
            return Err(FixtureError::Config(format!(
                "dist_to_transformer_m range [{}, {}] is invalid",
                a.min_dist_to_transformer_m, a.max_dist_to_transformer_m
            )));
        }

        Ok(())
    }
}

fn default_serial_prefix() -> String {
    "MEA-".to_string()
}

fn default_email_prefix() -> String {
    "loadtest_".to_string()
}

fn default_email_domain() -> String {
    "test.com".to_string()
}

fn default_prosumer_probability() -> f64 {
    0.3
}

fn default_user_balance() -> f64 {
    1000.0
}

fn default_identity() -> IdentityMode {
    IdentityMode::Deterministic
}

fn default_transformer_id_max() -> u32 {
    50
}

fn default_contract_capacity_kw() -> f64 {
    15.0
}

fn default_building_area_m2() -> f64 {
    150.0
}

fn default_min_dist_to_transformer_m() -> f64 {
    10.0
}

fn default_max_dist_to_transformer_m() -> f64 {
    500.0
}

fn default_emit_cleanup() -> bool {
    true
}
