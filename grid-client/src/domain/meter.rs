use uuid::Uuid;

use crate::domain::user::Role;

/// Meter classification, mirrored 1:1 from the owning account's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeterType {
    #[cfg_attr(feature = "serde", serde(rename = "Solar_Prosumer"))]
    SolarProsumer,
    #[cfg_attr(feature = "serde", serde(rename = "Grid_Consumer"))]
    GridConsumer,
}

impl MeterType {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Prosumer => MeterType::SolarProsumer,
            Role::Consumer => MeterType::GridConsumer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeterType::SolarProsumer => "Solar_Prosumer",
            MeterType::GridConsumer => "Grid_Consumer",
        }
    }

    /// Capacity-class label used by the load simulator's meter catalog.
    pub fn capacity_class(&self) -> &'static str {
        match self {
            MeterType::SolarProsumer => "15(45) A",
            MeterType::GridConsumer => "5(15) A",
        }
    }
}

/// Meter coordinates. The meters table stores these as a comma-joined
/// "lat,lon" string rather than a structured geographic type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn to_wire(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// A generated smart meter, owned by exactly one [`SyntheticUser`].
#[derive(Debug, Clone)]
pub struct SyntheticMeter {
    pub id: Uuid,
    pub user_id: Uuid,
    pub serial_number: String,
    pub meter_type: MeterType,
    pub location: GeoPoint,
    pub transformer_id: u32,
    pub contract_capacity_kw: f64,
    pub building_area_m2: f64,
    pub dist_to_transformer_m: f64,
}
