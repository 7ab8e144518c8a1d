use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of delimiter-separated fields every input line must carry.
pub const EXPECTED_FIELDS: usize = 6;

/// A customer and the vehicle they rent out, built from one input line.
///
/// `full_name` is derived when the record is built and never read from input,
/// so the fields stay private and the record is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    first_name: String,
    last_name: String,
    full_name: String,
    email: String,
    vehicle_type: String,
    vehicle_name: String,
    vehicle_length: String,
}

impl Customer {
    /// Maps six tokens positionally onto a record. Tokens are kept verbatim.
    pub fn from_fields(fields: [&str; EXPECTED_FIELDS]) -> Self {
        let [first_name, last_name, email, vehicle_type, vehicle_name, vehicle_length] = fields;
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            full_name: format!("{} {}", first_name, last_name),
            email: email.to_string(),
            vehicle_type: vehicle_type.to_string(),
            vehicle_name: vehicle_name.to_string(),
            vehicle_length: vehicle_length.to_string(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn vehicle_type(&self) -> &str {
        &self.vehicle_type
    }

    pub fn vehicle_name(&self) -> &str {
        &self.vehicle_name
    }

    /// Raw length text; units vary between files (`24’`, `32 ft`, `5 feet`).
    pub fn vehicle_length(&self) -> &str {
        &self.vehicle_length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Pipe,
}

impl Delimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Pipe => "|",
        }
    }
}

impl FromStr for Delimiter {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "," => Ok(Delimiter::Comma),
            "|" => Ok(Delimiter::Pipe),
            other => Err(EtlError::InvalidDelimiter {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    FullName,
    VehicleType,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::FullName => "full_name",
            SortKey::VehicleType => "vehicle_type",
        }
    }

    /// The field of `customer` this key orders by.
    pub fn field<'a>(&self, customer: &'a Customer) -> &'a str {
        match self {
            SortKey::FullName => customer.full_name(),
            SortKey::VehicleType => customer.vehicle_type(),
        }
    }
}

impl FromStr for SortKey {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full_name" => Ok(SortKey::FullName),
            "vehicle_type" => Ok(SortKey::VehicleType),
            other => Err(EtlError::InvalidSortKey {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated parser inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub delimiter: Delimiter,
    pub sort_key: SortKey,
}

impl ParseOptions {
    /// Checks the sort key first, then the delimiter.
    pub fn new(delimiter: &str, sort_by: &str) -> Result<Self> {
        let sort_key = sort_by.parse::<SortKey>()?;
        let delimiter = delimiter.parse::<Delimiter>()?;
        Ok(Self {
            delimiter,
            sort_key,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(EtlError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: s.to_string(),
                reason: "Unsupported format. Valid formats: json, csv".to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub customers: Vec<Customer>,
    pub document: String,
}
