use serde::{Deserialize, Serialize};

/// Tag assigned to a normalized line by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Line denotes a person name
    Name,
    /// Line denotes a company or organization
    Company,
    /// Line carries nothing usable; dropped by the assembler
    Ignored,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Classification::Name => "name",
            Classification::Company => "company",
            Classification::Ignored => "ignored",
        };
        f.write_str(label)
    }
}

/// A reconstructed attendee entry.
///
/// Absent fields are empty strings, which is also how they are written to CSV.
/// Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
}

impl Record {
    pub fn new(first_name: &str, last_name: &str, company: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            company: company.to_string(),
        }
    }

    /// Both name parts are present
    pub fn has_complete_name(&self) -> bool {
        !self.first_name.is_empty() && !self.last_name.is_empty()
    }

    /// No field has been collected yet
    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty() && self.last_name.is_empty() && self.company.is_empty()
    }
}

/// Output of the two-field variant: a full name and a company taken from one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCompanyPair {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Company")]
    pub company: String,
}

impl NameCompanyPair {
    pub fn new(name: &str, company: &str) -> Self {
        Self {
            name: name.to_string(),
            company: company.to_string(),
        }
    }
}

/// Accumulation state of the entry assembler's working record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryState {
    /// Nothing collected
    #[default]
    Empty,
    /// Only a company has been seen
    HasCompanyOnly,
    /// A name line was seen but one of its parts is empty
    HasNameOnly,
    /// First and last name are both set; a company may or may not be present
    HasBoth,
}
