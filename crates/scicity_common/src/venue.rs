//! Venue data for Science City Kolkata.
//!
//! One structured record describing the museum: opening hours, ticket
//! prices, attractions, facilities. Loaded once at startup from a JSON
//! file; when the file is missing or malformed the built-in fallback
//! record is substituted so the service still answers basic questions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Failure to read or parse the venue data file.
#[derive(Debug, Error)]
pub enum VenueDataError {
    #[error("cannot read venue data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("venue data file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Structured description of the venue. Immutable after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueRecord {
    pub name: String,
    pub location: String,
    /// Day-range -> time-range string, e.g. "Everyday" -> "10:00 AM - 7:00 PM".
    #[serde(default)]
    pub hours: BTreeMap<String, String>,
    /// Fare category -> priced string, e.g. "Entry Fee (General)" -> "₹70.00".
    #[serde(default)]
    pub ticket_prices: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attractions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facilities: Vec<String>,
}

impl Default for VenueRecord {
    /// Fallback record used when the data file is unavailable.
    fn default() -> Self {
        let mut hours = BTreeMap::new();
        hours.insert("Everyday".to_string(), "10:00 AM - 7:00 PM".to_string());

        let mut ticket_prices = BTreeMap::new();
        ticket_prices.insert(
            "Entry Fee (General)".to_string(),
            "₹70.00".to_string(),
        );
        ticket_prices.insert(
            "Entry Fee (Organized School Groups)".to_string(),
            "₹35.00".to_string(),
        );

        Self {
            name: "Science City Kolkata".to_string(),
            location: "J.B.S Haldane Avenue, Kolkata".to_string(),
            hours,
            ticket_prices,
            attractions: Vec::new(),
            facilities: Vec::new(),
        }
    }
}

impl VenueRecord {
    /// Load the record from a JSON file.
    pub fn load(path: &Path) -> Result<Self, VenueDataError> {
        let raw = fs::read_to_string(path)?;
        let record = serde_json::from_str(&raw)?;
        Ok(record)
    }

    /// Serialized form embedded into venue and itinerary prompts.
    pub fn context_json(&self) -> String {
        // Pretty-printing a record we just serialized cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// One-line opening hours summary for the welcome message.
    pub fn hours_summary(&self) -> String {
        if self.hours.is_empty() {
            return "Please check locally for opening hours".to_string();
        }
        self.hours
            .iter()
            .map(|(days, times)| format!("{}: {}", days, times))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
