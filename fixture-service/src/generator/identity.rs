use rand::Rng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::config::IdentityMode;

/// Fixed prefix on generated wallet addresses so fixture wallets are
/// recognizable in downstream systems.
const WALLET_PREFIX: &str = "LOADTEST";

/// Synthetic account email for index `i`; the mailbox name is 1-based.
pub fn user_email(prefix: &str, domain: &str, i: u64) -> String {
    format!("{prefix}{}@{domain}", i + 1)
}

pub fn username(prefix: &str, i: u64) -> String {
    format!("{prefix}{}", i + 1)
}

/// Sequential meter serial: `{prefix}{start + i}`.
pub fn meter_serial(prefix: &str, start: u64, i: u64) -> String {
    format!("{prefix}{}", start + i)
}

/// Name-based id over the DNS namespace: the same email or serial number
/// maps to the same id on every run.
fn name_uuid(name: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, name.as_bytes())
}

/// Version-4 id drawn from the run's RNG rather than the OS, so seeded runs
/// stay reproducible even in random identity mode.
fn random_uuid(rng: &mut ChaCha8Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

pub fn derive_user_id(mode: IdentityMode, email: &str, rng: &mut ChaCha8Rng) -> Uuid {
    match mode {
        IdentityMode::Deterministic => name_uuid(email),
        IdentityMode::Random => random_uuid(rng),
    }
}

pub fn derive_meter_id(mode: IdentityMode, serial: &str, rng: &mut ChaCha8Rng) -> Uuid {
    match mode {
        IdentityMode::Deterministic => name_uuid(serial),
        IdentityMode::Random => random_uuid(rng),
    }
}

/// Wallet address: the fixture prefix plus a 32-hex-char suffix. The
/// deterministic variant derives the suffix from the email so the address
/// survives regeneration; wallets are a unique key in the users table.
pub fn derive_wallet(mode: IdentityMode, email: &str, rng: &mut ChaCha8Rng) -> String {
    let suffix = match mode {
        IdentityMode::Deterministic => name_uuid(email),
        IdentityMode::Random => random_uuid(rng),
    };
    format!("{WALLET_PREFIX}{}", suffix.simple())
}
