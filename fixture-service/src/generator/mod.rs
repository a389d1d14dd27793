use grid_client::domain::{GeoPoint, MeterType, Role, SyntheticMeter, SyntheticUser};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::AppConfig;

pub mod identity;

/// Placeholder credential for generated load-test accounts. These accounts
/// are never logged into interactively; the demo account carries a real
/// hash from configuration instead.
const LOADTEST_PASSWORD_HASH: &str = "loadtest_password_hash";

const DEMO_TRANSFORMER_ID: u32 = 1;
const DEMO_DIST_TO_TRANSFORMER_M: f64 = 100.0;

#[derive(thiserror::Error, Debug)]
pub enum FixtureError {
    #[error("config error: {0}")]
    Config(String),
    #[error("csv render error: {0}")]
    CsvRender(String),
    #[error("sql render error: {0}")]
    SqlRender(String),
}

/// Users and meters from one generation pass, index-aligned: `meters[i]` is
/// owned by `users[i]`. When a demo account is configured it occupies
/// index 0 in both sequences.
#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    pub users: Vec<SyntheticUser>,
    pub meters: Vec<SyntheticMeter>,
}

impl FixtureSet {
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Run the generation pass: validate inputs, then produce `count` linked
/// (user, meter) pairs plus the optional demo pair, entirely in memory.
///
/// Record identity (emails, serials) is derived from the index, never from
/// wall-clock or the RNG, so two runs over the same configuration agree on
/// every unique key. With a configured seed the sampled attributes agree too.
pub fn generate(cfg: &AppConfig) -> Result<FixtureSet, FixtureError> {
    cfg.validate()?;

    let g = &cfg.generation;
    let a = &cfg.area;

    let mut rng = match g.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let capacity = g.count as usize + usize::from(cfg.demo.is_some());
    let mut set = FixtureSet {
        users: Vec::with_capacity(capacity),
        meters: Vec::with_capacity(capacity),
    };

    if let Some(demo) = &cfg.demo {
        let user_id = identity::derive_user_id(g.identity, &demo.email, &mut rng);
        set.users.push(SyntheticUser {
            id: user_id,
            email: demo.email.clone(),
            username: demo.username.clone(),
            password_hash: demo.password_hash.clone(),
            wallet_address: demo.wallet_address.clone(),
            role: Role::Prosumer,
            balance: g.user_balance,
        });
        set.meters.push(SyntheticMeter {
            id: identity::derive_meter_id(g.identity, &demo.meter_serial, &mut rng),
            user_id,
            serial_number: demo.meter_serial.clone(),
            meter_type: MeterType::SolarProsumer,
            location: GeoPoint {
                lat: a.center_lat,
                lon: a.center_lon,
            },
            transformer_id: DEMO_TRANSFORMER_ID,
            contract_capacity_kw: a.contract_capacity_kw,
            building_area_m2: a.building_area_m2,
            dist_to_transformer_m: DEMO_DIST_TO_TRANSFORMER_M,
        });
    }

    for i in 0..u64::from(g.count) {
        let email = identity::user_email(&g.email_prefix, &g.email_domain, i);
        let serial = identity::meter_serial(&g.serial_prefix, g.start_meter_id, i);

        let user_id = identity::derive_user_id(g.identity, &email, &mut rng);
        let meter_id = identity::derive_meter_id(g.identity, &serial, &mut rng);
        let wallet_address = identity::derive_wallet(g.identity, &email, &mut rng);

        let role = if rng.gen_bool(g.prosumer_probability) {
            Role::Prosumer
        } else {
            Role::Consumer
        };

        let location = GeoPoint {
            lat: rng.gen_range(a.center_lat - a.radius..=a.center_lat + a.radius),
            lon: rng.gen_range(a.center_lon - a.radius..=a.center_lon + a.radius),
        };

        set.users.push(SyntheticUser {
            id: user_id,
            email,
            username: identity::username(&g.email_prefix, i),
            password_hash: LOADTEST_PASSWORD_HASH.to_string(),
            wallet_address,
            role,
            balance: g.user_balance,
        });

        set.meters.push(SyntheticMeter {
            id: meter_id,
            user_id,
            serial_number: serial,
            meter_type: MeterType::for_role(role),
            location,
            transformer_id: rng.gen_range(0..=a.transformer_id_max),
            contract_capacity_kw: a.contract_capacity_kw,
            building_area_m2: a.building_area_m2,
            dist_to_transformer_m: rng
                .gen_range(a.min_dist_to_transformer_m..=a.max_dist_to_transformer_m),
        });
    }

    Ok(set)
}
