//! Lead records as produced by the extraction step.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The nine report columns, in the fixed order used for CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadColumn {
    CompanyName,
    Website,
    Location,
    Sector,
    Email,
    Phone,
    LinkedIn,
    CompanySize,
    Rationale,
}

impl LeadColumn {
    pub const ALL: [LeadColumn; 9] = [
        LeadColumn::CompanyName,
        LeadColumn::Website,
        LeadColumn::Location,
        LeadColumn::Sector,
        LeadColumn::Email,
        LeadColumn::Phone,
        LeadColumn::LinkedIn,
        LeadColumn::CompanySize,
        LeadColumn::Rationale,
    ];

    /// Key used both in the model's JSON output and as the CSV header.
    pub fn header(self) -> &'static str {
        match self {
            LeadColumn::CompanyName => "Bedrijfsnaam",
            LeadColumn::Website => "Website URL",
            LeadColumn::Location => "Locatie",
            LeadColumn::Sector => "Branche",
            LeadColumn::Email => "Emailadres",
            LeadColumn::Phone => "Telefoonnummer",
            LeadColumn::LinkedIn => "LinkedIn",
            LeadColumn::CompanySize => "Bedrijfsgrootte",
            LeadColumn::Rationale => "AI-Matching",
        }
    }
}

/// One prospective business contact.
///
/// Every field is optional on the wire: the model is told to drop incomplete
/// candidates, but nothing downstream trusts that. Non-string scalars (e.g. a
/// numeric `Bedrijfsgrootte`) are kept as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(rename = "Bedrijfsnaam", default, deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    #[serde(rename = "Website URL", default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(rename = "Locatie", default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(rename = "Branche", default, deserialize_with = "lenient_text")]
    pub sector: Option<String>,
    #[serde(rename = "Emailadres", default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(rename = "Telefoonnummer", default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(rename = "LinkedIn", default, deserialize_with = "lenient_text")]
    pub linkedin: Option<String>,
    #[serde(rename = "Bedrijfsgrootte", default, deserialize_with = "lenient_text")]
    pub company_size: Option<String>,
    #[serde(rename = "AI-Matching", default, deserialize_with = "lenient_text")]
    pub rationale: Option<String>,
}

impl Lead {
    pub fn get(&self, column: LeadColumn) -> Option<&str> {
        let value = match column {
            LeadColumn::CompanyName => &self.company_name,
            LeadColumn::Website => &self.website,
            LeadColumn::Location => &self.location,
            LeadColumn::Sector => &self.sector,
            LeadColumn::Email => &self.email,
            LeadColumn::Phone => &self.phone,
            LeadColumn::LinkedIn => &self.linkedin,
            LeadColumn::CompanySize => &self.company_size,
            LeadColumn::Rationale => &self.rationale,
        };
        value.as_deref()
    }

    /// Columns that are absent or blank in this record.
    pub fn missing_columns(&self) -> Vec<LeadColumn> {
        LeadColumn::ALL
            .into_iter()
            .filter(|c| self.get(*c).map(|v| v.trim().is_empty()).unwrap_or(true))
            .collect()
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Search criteria entered by the requester. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadCriteria {
    pub sector: String,
    pub region: String,
    pub extra: String,
}

impl LeadCriteria {
    pub fn new(
        sector: impl Into<String>,
        region: impl Into<String>,
        extra: impl Into<String>,
    ) -> Self {
        Self {
            sector: sector.into(),
            region: region.into(),
            extra: extra.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_names_in_any_order() {
        let raw = r#"{
            "AI-Matching": "Past bij de criteria.",
            "Bedrijfsnaam": "Acme BV",
            "Website URL": "https://acme.nl",
            "Bedrijfsgrootte": 25
        }"#;
        let lead: Lead = serde_json::from_str(raw).unwrap();
        assert_eq!(lead.company_name.as_deref(), Some("Acme BV"));
        assert_eq!(lead.get(LeadColumn::Website), Some("https://acme.nl"));
        assert_eq!(lead.get(LeadColumn::CompanySize), Some("25"));
        assert_eq!(lead.get(LeadColumn::Rationale), Some("Past bij de criteria."));
        assert_eq!(lead.get(LeadColumn::Phone), None);
    }

    #[test]
    fn null_and_blank_fields_count_as_missing() {
        let raw = r#"{"Bedrijfsnaam": "Acme BV", "Locatie": null, "Branche": "  "}"#;
        let lead: Lead = serde_json::from_str(raw).unwrap();
        let missing = lead.missing_columns();
        assert!(missing.contains(&LeadColumn::Location));
        assert!(missing.contains(&LeadColumn::Sector));
        assert!(!missing.contains(&LeadColumn::CompanyName));
        assert_eq!(missing.len(), 8);
    }

    #[test]
    fn headers_follow_report_order() {
        let headers: Vec<_> = LeadColumn::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            vec![
                "Bedrijfsnaam",
                "Website URL",
                "Locatie",
                "Branche",
                "Emailadres",
                "Telefoonnummer",
                "LinkedIn",
                "Bedrijfsgrootte",
                "AI-Matching",
            ]
        );
    }
}
