//! Transaction Record Module
//! Fixed 16-column schema for HM Land Registry price paid rows.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::geo::Coordinates;

/// Column names of a raw price paid row, in file order.
pub const COLUMNS: [&str; 16] = [
    "transaction_id",
    "price",
    "date_of_transfer",
    "postcode",
    "property_type",
    "old_new",
    "duration",
    "paon",
    "saon",
    "street",
    "locality",
    "town_city",
    "district",
    "county",
    "ppd_category_type",
    "record_status",
];

/// Column names after geographic enrichment.
pub const ENRICHED_COLUMNS: [&str; 18] = [
    "transaction_id",
    "price",
    "date_of_transfer",
    "postcode",
    "property_type",
    "old_new",
    "duration",
    "paon",
    "saon",
    "street",
    "locality",
    "town_city",
    "district",
    "county",
    "ppd_category_type",
    "record_status",
    "latitude",
    "longitude",
];

/// Property type code from the price paid schema.
///
/// Note: the published data guidance defines "F" as Flats/Maisonettes, but
/// one of its explanatory tables also lists "F" under Detached. The five-way
/// reading below follows the field definition; the conflict is flagged here
/// because it exists in the source documentation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum PropertyType {
    Terraced,
    SemiDetached,
    Detached,
    Flat,
    /// "Other" in the dataset; also absorbs unrecognized type codes.
    Other,
}

impl PropertyType {
    pub fn code(&self) -> &'static str {
        match self {
            PropertyType::Terraced => "T",
            PropertyType::SemiDetached => "S",
            PropertyType::Detached => "D",
            PropertyType::Flat => "F",
            PropertyType::Other => "O",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "T" | "t" => PropertyType::Terraced,
            "S" | "s" => PropertyType::SemiDetached,
            "D" | "d" => PropertyType::Detached,
            "F" | "f" => PropertyType::Flat,
            _ => PropertyType::Other,
        }
    }
}

impl From<String> for PropertyType {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

/// Tenure of the transaction. Unrecognized codes fall back to Freehold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Tenure {
    Freehold,
    Leasehold,
}

impl Tenure {
    pub fn code(&self) -> &'static str {
        match self {
            Tenure::Freehold => "F",
            Tenure::Leasehold => "L",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "L" | "l" => Tenure::Leasehold,
            _ => Tenure::Freehold,
        }
    }
}

impl From<String> for Tenure {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

/// PPD category: standard price paid entry or additional entry.
/// Unrecognized codes fall back to Standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum PpdCategory {
    Standard,
    Additional,
}

impl PpdCategory {
    pub fn code(&self) -> &'static str {
        match self {
            PpdCategory::Standard => "A",
            PpdCategory::Additional => "B",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "B" | "b" => PpdCategory::Additional,
            _ => PpdCategory::Standard,
        }
    }
}

impl From<String> for PpdCategory {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

/// Record status of a monthly update row. Unrecognized codes fall back to
/// Added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum RecordStatus {
    Added,
    Changed,
    Deleted,
}

impl RecordStatus {
    pub fn code(&self) -> &'static str {
        match self {
            RecordStatus::Added => "A",
            RecordStatus::Changed => "C",
            RecordStatus::Deleted => "D",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "C" | "c" => RecordStatus::Changed,
            "D" | "d" => RecordStatus::Deleted,
            _ => RecordStatus::Added,
        }
    }
}

impl From<String> for RecordStatus {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

/// One price paid transaction, decoded positionally from a headerless row.
///
/// Cell-level decode is lenient: an unparseable price or date becomes `None`
/// and unknown enum codes fold into their documented fallback, so a
/// malformed row still loads. `coordinates` is not part of the input file;
/// the enricher fills it in.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    #[serde(deserialize_with = "de_lenient_price")]
    pub price: Option<i64>,
    #[serde(deserialize_with = "de_lenient_date")]
    pub date_of_transfer: Option<NaiveDate>,
    pub postcode: String,
    pub property_type: PropertyType,
    #[serde(deserialize_with = "de_yes_no")]
    pub is_new_build: bool,
    pub duration: Tenure,
    pub paon: String,
    pub saon: String,
    pub street: String,
    pub locality: String,
    pub town_city: String,
    pub district: String,
    pub county: String,
    pub ppd_category: PpdCategory,
    pub record_status: RecordStatus,
    #[serde(skip)]
    pub coordinates: Option<Coordinates>,
}

impl Transaction {
    pub fn has_postcode(&self) -> bool {
        !self.postcode.trim().is_empty()
    }

    /// The 16 raw columns in wire order, re-encoded with canonical codes.
    pub fn wire_fields(&self) -> Vec<String> {
        vec![
            self.transaction_id.clone(),
            self.price.map(|p| p.to_string()).unwrap_or_default(),
            self.date_of_transfer
                .map(|d| d.format("%Y-%m-%d 00:00").to_string())
                .unwrap_or_default(),
            self.postcode.clone(),
            self.property_type.code().to_string(),
            if self.is_new_build { "Y" } else { "N" }.to_string(),
            self.duration.code().to_string(),
            self.paon.clone(),
            self.saon.clone(),
            self.street.clone(),
            self.locality.clone(),
            self.town_city.clone(),
            self.district.clone(),
            self.county.clone(),
            self.ppd_category.code().to_string(),
            self.record_status.code().to_string(),
        ]
    }

    /// The 18 enriched columns: raw columns plus latitude and longitude,
    /// empty when no coordinates resolved.
    pub fn enriched_wire_fields(&self) -> Vec<String> {
        let mut fields = self.wire_fields();
        match self.coordinates {
            Some(c) => {
                fields.push(c.latitude.to_string());
                fields.push(c.longitude.to_string());
            }
            None => {
                fields.push(String::new());
                fields.push(String::new());
            }
        }
        fields
    }
}

/// Ordered sequence of transactions sharing the fixed schema.
#[derive(Debug, Clone, Default)]
pub struct TransactionTable {
    records: Vec<Transaction>,
}

impl TransactionTable {
    pub fn new(records: Vec<Transaction>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Transaction] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&Transaction) -> bool) {
        self.records.retain(keep);
    }
}

fn de_lenient_price<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
    let raw = String::deserialize(de)?;
    Ok(raw.trim().replace(',', "").parse().ok())
}

fn de_lenient_date<'de, D: Deserializer<'de>>(de: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = String::deserialize(de)?;
    Ok(parse_transfer_date(&raw))
}

fn de_yes_no<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(de)?;
    Ok(raw.trim().eq_ignore_ascii_case("y"))
}

/// Transfer dates appear as "2024-01-15 00:00" in the monthly files; accept
/// the bare date as well.
pub(crate) fn parse_transfer_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}
