use serde::{Deserialize, Serialize};

use crate::status::SignalStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Male
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone_number: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pwid {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    /// Absent for PWIDs with no recorded conditions; renders as "None".
    #[serde(default)]
    pub medical_conditions: Option<Vec<String>>,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
}

/// The server serializes an unassigned responder as `{}` rather than `null`,
/// so every field tolerates absence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Responder {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub location: Location,
}

/// One distress report as returned by `GET /distress`. Status is never stored;
/// it is derived from the two flags on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "group_chat_message_id")]
    pub id: i64,
    pub location: Location,
    pub pwid: Pwid,
    #[serde(default)]
    pub responder: Option<Responder>,
    #[serde(default)]
    pub is_acknowledged: bool,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub acknowledged_at: Option<String>,
}

impl Signal {
    pub fn status(&self) -> SignalStatus {
        SignalStatus::derive(self.is_acknowledged, self.is_completed)
    }

    /// Assigned responder's name, treating `null`, `{}` and an empty name all
    /// as unassigned.
    pub fn responder_name(&self) -> Option<&str> {
        self.responder
            .as_ref()
            .map(|responder| responder.name.as_str())
            .filter(|name| !name.is_empty())
    }
}
