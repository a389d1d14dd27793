use uuid::Uuid;

/// Account role on the trading platform.
///
/// A prosumer both produces (rooftop solar) and consumes energy; a consumer
/// only draws from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    Prosumer,
    Consumer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Prosumer => "prosumer",
            Role::Consumer => "consumer",
        }
    }
}

/// A generated platform account.
///
/// `password_hash` is opaque here: generated accounts carry a placeholder
/// and the demo account carries a precomputed hash from configuration.
#[derive(Debug, Clone)]
pub struct SyntheticUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub wallet_address: String,
    pub role: Role,
    pub balance: f64,
}
