use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Jurisdiction code of national-level bills
pub const FEDERAL_CODE: &str = "US";

/// Jurisdiction name the feed gives national-level bills
pub const FEDERAL_NAME: &str = "Federal";

/// A single legislative bill as published by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRecord {
    /// Upstream identifier (number or string, depending on the scraper)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(
        rename = "bill_number",
        alias = "billNumber",
        default,
        deserialize_with = "null_as_default"
    )]
    pub bill_number: String,
    #[serde(
        rename = "state_name",
        alias = "jurisdictionName",
        alias = "jurisdiction_name",
        default,
        deserialize_with = "null_as_default"
    )]
    pub jurisdiction_name: String,
    #[serde(
        rename = "state_code",
        alias = "jurisdictionCode",
        alias = "jurisdiction_code",
        default,
        deserialize_with = "null_as_default"
    )]
    pub jurisdiction_code: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i64>,
    #[serde(default, alias = "statusDate", skip_serializing_if = "Option::is_none")]
    pub status_date: Option<String>,
    #[serde(default, alias = "lastAction", skip_serializing_if = "Option::is_none")]
    pub last_action: Option<String>,
    #[serde(default, alias = "lastActionDate")]
    pub last_action_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sponsors: Vec<Sponsor>,
    #[serde(
        rename = "url",
        alias = "sourceUrl",
        alias = "source_url",
        default,
        deserialize_with = "null_as_default"
    )]
    pub source_url: String,
    #[serde(default, alias = "analysisUrl")]
    pub analysis_url: Option<String>,
}

/// A named sponsor, optionally with a party affiliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Sponsor {
    pub fn new(name: impl Into<String>, party: Option<&str>) -> Self {
        Self {
            name: name.into(),
            party: party.map(str::to_string),
            role: None,
        }
    }

    /// `{name} ({party})` when a party is known, otherwise just the name
    pub fn label(&self) -> String {
        match non_blank(self.party.as_deref()) {
            Some(party) => format!("{} ({})", self.name, party),
            None => self.name.clone(),
        }
    }
}

impl BillRecord {
    /// Create a record with the identifying fields set and everything else empty
    pub fn new(
        jurisdiction_code: impl Into<String>,
        jurisdiction_name: impl Into<String>,
        bill_number: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            bill_number: bill_number.into(),
            jurisdiction_name: jurisdiction_name.into(),
            jurisdiction_code: jurisdiction_code.into(),
            title: None,
            description: None,
            status: None,
            status_code: None,
            status_date: None,
            last_action: None,
            last_action_date: None,
            sponsors: Vec::new(),
            source_url: String::new(),
            analysis_url: None,
        }
    }

    pub fn is_federal(&self) -> bool {
        self.jurisdiction_code == FEDERAL_CODE
    }

    /// Date used for sorting and display: last action, falling back to status date
    pub fn action_date(&self) -> Option<&str> {
        non_blank(self.last_action_date.as_deref()).or_else(|| non_blank(self.status_date.as_deref()))
    }

    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    pub fn status(&self) -> Option<&str> {
        non_blank(self.status.as_deref())
    }

    pub fn last_action(&self) -> Option<&str> {
        non_blank(self.last_action.as_deref())
    }

    pub fn analysis_url(&self) -> Option<&str> {
        non_blank(self.analysis_url.as_deref())
    }
}

/// The full set of bills loaded for a session. Never mutated after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillCollection {
    bills: Vec<BillRecord>,
    last_updated: Option<DateTime<Utc>>,
}

impl BillCollection {
    pub fn new(bills: Vec<BillRecord>, last_updated: Option<DateTime<Utc>>) -> Self {
        Self {
            bills,
            last_updated,
        }
    }

    pub fn bills(&self) -> &[BillRecord] {
        &self.bills
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_scraper_field_names() {
        let record: BillRecord = serde_json::from_value(json!({
            "id": 1912345,
            "state_code": "CO",
            "state_name": "Colorado",
            "bill_number": "HB1001",
            "title": "Cannabis Business Licensing",
            "status": "In Committee",
            "status_code": 2,
            "last_action_date": "2024-03-01",
            "url": "https://legiscan.com/CO/bill/HB1001/2024",
            "sponsors": [{"name": "Jane Doe", "party": "D", "role": "Rep"}],
            "analysis_url": null
        }))
        .unwrap();

        assert_eq!(record.jurisdiction_code, "CO");
        assert_eq!(record.jurisdiction_name, "Colorado");
        assert_eq!(record.bill_number, "HB1001");
        assert_eq!(record.source_url, "https://legiscan.com/CO/bill/HB1001/2024");
        assert_eq!(record.sponsors[0].label(), "Jane Doe (D)");
        assert_eq!(record.analysis_url(), None);
    }

    #[test]
    fn deserializes_camel_case_aliases() {
        let record: BillRecord = serde_json::from_value(json!({
            "billNumber": "S 123",
            "jurisdictionName": "Federal",
            "jurisdictionCode": "US",
            "lastActionDate": "2024-01-02",
            "sourceUrl": "https://congress.gov/bill/s123",
            "analysisUrl": "https://example.org/analysis"
        }))
        .unwrap();

        assert!(record.is_federal());
        assert_eq!(record.action_date(), Some("2024-01-02"));
        assert_eq!(record.analysis_url(), Some("https://example.org/analysis"));
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let record: BillRecord = serde_json::from_value(json!({
            "bill_number": null,
            "sponsors": null,
            "url": null
        }))
        .unwrap();

        assert_eq!(record.bill_number, "");
        assert!(record.sponsors.is_empty());
        assert_eq!(record.source_url, "");
    }

    #[test]
    fn action_date_falls_back_to_status_date() {
        let mut record = BillRecord::new("CA", "California", "AB 1");
        record.status_date = Some("2024-02-10".to_string());
        assert_eq!(record.action_date(), Some("2024-02-10"));

        record.last_action_date = Some("  ".to_string());
        assert_eq!(record.action_date(), Some("2024-02-10"));

        record.last_action_date = Some("2024-04-01".to_string());
        assert_eq!(record.action_date(), Some("2024-04-01"));
    }

    #[test]
    fn sponsor_label_omits_blank_party() {
        assert_eq!(Sponsor::new("Sam Lee", Some("")).label(), "Sam Lee");
        assert_eq!(Sponsor::new("Sam Lee", None).label(), "Sam Lee");
        assert_eq!(Sponsor::new("Sam Lee", Some("R")).label(), "Sam Lee (R)");
    }
}
