use std::{fs, path::Path};

use grid_client::domain::{SyntheticMeter, SyntheticUser};

use crate::generator::FixtureError;

/// Scope and prologue settings for the seed script.
#[derive(Debug, Clone)]
pub struct SeedSqlOptions {
    /// Emit DELETEs scoped to the generated identifier range ahead of the
    /// upserts, so repeated runs do not accumulate stale rows.
    pub emit_cleanup: bool,
    /// Mailbox prefix of generated accounts; cleanup matches `{prefix}%`.
    pub email_prefix: String,
    /// First generated serial (inclusive cleanup bound).
    pub serial_first: String,
    /// One-past-the-last generated serial (exclusive cleanup bound).
    pub serial_past_end: String,
    pub demo_email: Option<String>,
    pub demo_serial: Option<String>,
}

/// Append `value` as a single-quoted SQL string literal.
///
/// Single quotes are doubled. Control characters are rejected outright
/// rather than escaped: a fixture value carrying NUL or a newline would
/// change the meaning of the surrounding script.
fn push_str_lit(out: &mut String, value: &str) -> Result<(), FixtureError> {
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => out.push_str("''"),
            c if c.is_control() => {
                return Err(FixtureError::SqlRender(format!(
                    "control character {c:?} in value {value:?}"
                )));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    Ok(())
}

fn write_user_upsert(out: &mut String, user: &SyntheticUser) -> Result<(), FixtureError> {
    out.push_str(
        "INSERT INTO users (id, email, username, password_hash, wallet_address, role, balance, created_at, updated_at) VALUES (",
    );
    push_str_lit(out, &user.id.to_string())?;
    out.push_str(", ");
    push_str_lit(out, &user.email)?;
    out.push_str(", ");
    push_str_lit(out, &user.username)?;
    out.push_str(", ");
    push_str_lit(out, &user.password_hash)?;
    out.push_str(", ");
    push_str_lit(out, &user.wallet_address)?;
    out.push_str(", ");
    push_str_lit(out, user.role.as_str())?;
    out.push_str(", ");
    out.push_str(&user.balance.to_string());
    out.push_str(", NOW(), NOW()) ON CONFLICT (email) DO UPDATE SET balance = ");
    out.push_str(&user.balance.to_string());
    out.push_str(";\n");
    Ok(())
}

fn write_meter_upsert(out: &mut String, meter: &SyntheticMeter) -> Result<(), FixtureError> {
    out.push_str(
        "INSERT INTO meters (id, user_id, serial_number, meter_type, location, is_verified, created_at, updated_at) VALUES (",
    );
    push_str_lit(out, &meter.id.to_string())?;
    out.push_str(", ");
    push_str_lit(out, &meter.user_id.to_string())?;
    out.push_str(", ");
    push_str_lit(out, &meter.serial_number)?;
    out.push_str(", ");
    push_str_lit(out, meter.meter_type.as_str())?;
    out.push_str(", ");
    push_str_lit(out, &meter.location.to_wire())?;
    out.push_str(
        ", true, NOW(), NOW()) ON CONFLICT (serial_number) DO UPDATE SET user_id = EXCLUDED.user_id;\n",
    );
    Ok(())
}

/// DELETEs for rows left by earlier runs, child tables first so no foreign
/// key is violated mid-script.
fn write_cleanup(out: &mut String, opts: &SeedSqlOptions) -> Result<(), FixtureError> {
    let mut account_match = String::new();
    account_match.push_str("email LIKE ");
    push_str_lit(&mut account_match, &format!("{}%", opts.email_prefix))?;
    if let Some(demo_email) = &opts.demo_email {
        account_match.push_str(" OR email = ");
        push_str_lit(&mut account_match, demo_email)?;
    }
    let account_ids = format!("(SELECT id FROM users WHERE {account_match})");

    out.push_str("-- Remove rows from earlier fixture runs\n");
    out.push_str(&format!(
        "DELETE FROM p2p_orders WHERE user_id IN {account_ids};\n"
    ));
    out.push_str(&format!(
        "DELETE FROM swap_transactions WHERE user_id IN {account_ids};\n"
    ));
    out.push_str(&format!(
        "DELETE FROM carbon_transactions WHERE from_user_id IN {account_ids} OR to_user_id IN {account_ids};\n"
    ));
    out.push_str(&format!(
        "DELETE FROM zone_rates WHERE created_by IN {account_ids};\n"
    ));

    out.push_str("DELETE FROM meters WHERE (serial_number >= ");
    push_str_lit(out, &opts.serial_first)?;
    out.push_str(" AND serial_number < ");
    push_str_lit(out, &opts.serial_past_end)?;
    out.push(')');
    if let Some(demo_serial) = &opts.demo_serial {
        out.push_str(" OR serial_number = ");
        push_str_lit(out, demo_serial)?;
    }
    out.push_str(";\n");

    out.push_str(&format!("DELETE FROM users WHERE {account_match};\n"));
    Ok(())
}

/// Render the seed script: optional cleanup prologue, then one upsert per
/// user, then one per meter. Users come first because meters reference them.
///
/// Every INSERT carries an ON CONFLICT clause keyed on the row's unique key,
/// so executing the script twice is equivalent to executing it once.
pub fn render_seed_sql(
    users: &[SyntheticUser],
    meters: &[SyntheticMeter],
    opts: &SeedSqlOptions,
) -> Result<String, FixtureError> {
    // Heuristic capacity: ~240 bytes per user statement, ~280 per meter.
    let mut out = String::with_capacity(
        users.len().saturating_mul(240) + meters.len().saturating_mul(280) + 1024,
    );

    out.push_str("-- Load-test fixture seed\n");
    if opts.emit_cleanup {
        write_cleanup(&mut out, opts)?;
    }

    out.push_str("\n-- Users\n");
    for user in users {
        write_user_upsert(&mut out, user)?;
    }

    out.push_str("\n-- Meters\n");
    for meter in meters {
        write_meter_upsert(&mut out, meter)?;
    }

    Ok(out)
}

/// Render and write the seed script in one step.
pub fn write_seed_sql<P: AsRef<Path>>(
    path: P,
    users: &[SyntheticUser],
    meters: &[SyntheticMeter],
    opts: &SeedSqlOptions,
) -> Result<(), FixtureError> {
    let path = path.as_ref();
    let script = render_seed_sql(users, meters, opts)?;
    fs::write(path, script)
        .map_err(|e| FixtureError::SqlRender(format!("failed to write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_client::domain::{GeoPoint, MeterType, Role};
    use uuid::Uuid;

    fn str_lit(value: &str) -> Result<String, FixtureError> {
        let mut out = String::new();
        push_str_lit(&mut out, value)?;
        Ok(out)
    }

    fn opts() -> SeedSqlOptions {
        SeedSqlOptions {
            emit_cleanup: true,
            email_prefix: "loadtest_".to_string(),
            serial_first: "MEA-20000".to_string(),
            serial_past_end: "MEA-20002".to_string(),
            demo_email: Some("demo@gridtokenx.com".to_string()),
            demo_serial: Some("MEA-DEMO-2026".to_string()),
        }
    }

    fn sample_user(email: &str) -> SyntheticUser {
        SyntheticUser {
            id: Uuid::new_v5(&Uuid::NAMESPACE_DNS, email.as_bytes()),
            email: email.to_string(),
            username: "loadtest_1".to_string(),
            password_hash: "loadtest_password_hash".to_string(),
            wallet_address: "LOADTESTdeadbeef".to_string(),
            role: Role::Consumer,
            balance: 1000.0,
        }
    }

    fn sample_meter(serial: &str, owner: &SyntheticUser) -> SyntheticMeter {
        SyntheticMeter {
            id: Uuid::new_v5(&Uuid::NAMESPACE_DNS, serial.as_bytes()),
            user_id: owner.id,
            serial_number: serial.to_string(),
            meter_type: MeterType::GridConsumer,
            location: GeoPoint { lat: 13.78, lon: 100.56 },
            transformer_id: 3,
            contract_capacity_kw: 15.0,
            building_area_m2: 150.0,
            dist_to_transformer_m: 99.0,
        }
    }

    #[test]
    fn string_literals_double_embedded_quotes() {
        assert_eq!(str_lit("o'brien").unwrap(), "'o''brien'");
        assert_eq!(str_lit("plain").unwrap(), "'plain'");
    }

    #[test]
    fn control_characters_are_rejected() {
        let err = str_lit("line\nbreak").unwrap_err();
        assert!(matches!(err, FixtureError::SqlRender(_)));
        assert!(str_lit("nul\0byte").is_err());
    }

    #[test]
    fn every_insert_is_an_upsert() {
        let user = sample_user("loadtest_1@test.com");
        let meter = sample_meter("MEA-20000", &user);
        let script = render_seed_sql(&[user], &[meter], &opts()).unwrap();

        for line in script.lines().filter(|l| l.starts_with("INSERT INTO")) {
            assert!(line.contains("ON CONFLICT"), "not idempotent: {line}");
        }
        assert!(script.contains("ON CONFLICT (email) DO UPDATE SET balance = 1000"));
        assert!(script.contains("ON CONFLICT (serial_number) DO UPDATE SET user_id = EXCLUDED.user_id"));
    }

    #[test]
    fn users_are_emitted_before_meters() {
        let user = sample_user("loadtest_1@test.com");
        let meter = sample_meter("MEA-20000", &user);
        let script = render_seed_sql(&[user], &[meter], &opts()).unwrap();

        let user_pos = script.find("INSERT INTO users").unwrap();
        let meter_pos = script.find("INSERT INTO meters").unwrap();
        assert!(user_pos < meter_pos);
    }

    #[test]
    fn cleanup_is_scoped_to_the_generated_range() {
        let script = render_seed_sql(&[], &[], &opts()).unwrap();

        assert!(script.contains("DELETE FROM p2p_orders"));
        assert!(script.contains("DELETE FROM swap_transactions"));
        assert!(script.contains("from_user_id IN") && script.contains("to_user_id IN"));
        assert!(script.contains("DELETE FROM zone_rates"));
        assert!(script.contains("email LIKE 'loadtest_%'"));
        assert!(script.contains("OR email = 'demo@gridtokenx.com'"));
        assert!(script
            .contains("serial_number >= 'MEA-20000' AND serial_number < 'MEA-20002'"));
        assert!(script.contains("OR serial_number = 'MEA-DEMO-2026'"));

        // Child tables are cleared before their parents.
        let orders_pos = script.find("DELETE FROM p2p_orders").unwrap();
        let meters_pos = script.find("DELETE FROM meters").unwrap();
        let users_pos = script.find("DELETE FROM users").unwrap();
        assert!(orders_pos < meters_pos && meters_pos < users_pos);
    }

    #[test]
    fn cleanup_can_be_disabled() {
        let mut o = opts();
        o.emit_cleanup = false;
        let script = render_seed_sql(&[], &[], &o).unwrap();
        assert!(!script.contains("DELETE FROM"));
    }

    #[test]
    fn cleanup_without_demo_omits_demo_clauses() {
        let mut o = opts();
        o.demo_email = None;
        o.demo_serial = None;
        let script = render_seed_sql(&[], &[], &o).unwrap();
        assert!(!script.contains("demo@"));
        assert!(!script.contains("OR serial_number ="));
    }

    #[test]
    fn meter_location_uses_the_comma_joined_wire_form() {
        let user = sample_user("loadtest_1@test.com");
        let meter = sample_meter("MEA-20000", &user);
        let script = render_seed_sql(&[user], &[meter], &opts()).unwrap();
        assert!(script.contains("'13.78,100.56'"));
        assert!(script.contains(", true, NOW(), NOW())"));
    }

    #[test]
    fn quoted_email_cannot_break_out_of_its_literal() {
        let user = sample_user("load'test@test.com");
        let script = render_seed_sql(&[user], &[], &opts()).unwrap();
        assert!(script.contains("'load''test@test.com'"));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let user = sample_user("loadtest_1@test.com");
        let meter = sample_meter("MEA-20000", &user);
        let a = render_seed_sql(std::slice::from_ref(&user), std::slice::from_ref(&meter), &opts()).unwrap();
        let b = render_seed_sql(&[user], &[meter], &opts()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn write_reports_the_sql_artifact_on_io_failure() {
        let err = write_seed_sql("/nonexistent-dir/seed.sql", &[], &[], &opts()).unwrap_err();
        assert!(matches!(err, FixtureError::SqlRender(_)));
    }
}
