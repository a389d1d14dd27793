use std::path::Path;

use grid_client::domain::SyntheticMeter;
use serde::Serialize;

use crate::generator::FixtureError;

/// Simulator catalog columns, in the order the simulator reads them.
const COLUMNS: [&str; 8] = [
    "meter_id",
    "meter_type",
    "lat",
    "lon",
    "transformer_id",
    "contract_capacity_kw",
    "building_area",
    "dist_to_transformer_m",
];

/// One row of the load simulator's meter catalog.
///
/// `meter_type` here is the capacity-class label, not the role-based label
/// stored in the meters table.
#[derive(Debug, Serialize)]
struct SimulatorRow<'a> {
    meter_id: &'a str,
    meter_type: &'a str,
    lat: f64,
    lon: f64,
    transformer_id: u32,
    contract_capacity_kw: f64,
    building_area: f64,
    dist_to_transformer_m: f64,
}

impl<'a> From<&'a SyntheticMeter> for SimulatorRow<'a> {
    fn from(m: &'a SyntheticMeter) -> Self {
        SimulatorRow {
            meter_id: &m.serial_number,
            meter_type: m.meter_type.capacity_class(),
            lat: m.location.lat,
            lon: m.location.lon,
            transformer_id: m.transformer_id,
            contract_capacity_kw: m.contract_capacity_kw,
            building_area: m.building_area_m2,
            dist_to_transformer_m: m.dist_to_transformer_m,
        }
    }
}

/// Write the simulator CSV: one header row, then one row per meter in
/// generation order. Output is byte-stable for identical input. The header
/// is written even for an empty meter set.
pub fn write_simulator_csv<P: AsRef<Path>>(
    path: P,
    meters: &[SyntheticMeter],
) -> Result<(), FixtureError> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| FixtureError::CsvRender(format!("failed to open {}: {e}", path.display())))?;

    writer
        .write_record(COLUMNS)
        .map_err(|e| FixtureError::CsvRender(format!("failed to write header: {e}")))?;

    for meter in meters {
        writer.serialize(SimulatorRow::from(meter)).map_err(|e| {
            FixtureError::CsvRender(format!(
                "failed to write row for {}: {e}",
                meter.serial_number
            ))
        })?;
    }

    writer
        .flush()
        .map_err(|e| FixtureError::CsvRender(format!("failed to flush {}: {e}", path.display())))?;

    Ok(())
}
