use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

const fn default_top() -> u32 {
    30
}

const fn default_active() -> bool {
    true
}

/// Paging parameters for the insured list.
///
/// `top` is the upstream page size and `skip` the offset. Both are sent to
/// the OData endpoint unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListQuery {
    /// Maximum number of records to request from NowCerts (page size).
    #[serde(default = "default_top")]
    pub top: u32,
    /// Number of records to skip (offset).
    #[serde(default)]
    pub skip: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            top: default_top(),
            skip: 0,
        }
    }
}

/// A new insured record as supplied by the caller.
///
/// Only `database_id`, `first_name` and `last_name` are required; every
/// other field falls back to an empty string, `0` or `true`.
///
/// # Examples
///
/// ```
/// use nowcerts_common::InsuredRecord;
///
/// let record = InsuredRecord::builder()
///     .database_id("db-1")
///     .first_name("Grace")
///     .last_name("Hopper")
///     .city("Arlington")
///     .build();
///
/// assert_eq!(record.city, "Arlington");
/// assert_eq!(record.insured_type, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, TypedBuilder)]
pub struct InsuredRecord {
    /// NowCerts agency database identifier.
    #[builder(setter(into))]
    pub database_id: String,
    /// Insured first name.
    #[builder(setter(into))]
    pub first_name: String,
    /// Insured last name.
    #[builder(setter(into))]
    pub last_name: String,
    /// Insured middle name.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub middle_name: String,
    /// Insured type code (0 = commercial, 1 = personal).
    #[serde(default)]
    #[builder(default)]
    pub insured_type: i32,
    /// First address line.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub address_line1: String,
    /// Second address line.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub address_line2: String,
    /// City.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub city: String,
    /// State or province code.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub state: String,
    /// Postal code.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub zip_code: String,
    /// Mobile phone number.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub cell_phone: String,
    /// Email address.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub email: String,
    /// Federal employer identification number.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub fein: String,
    /// Free-form description.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub description: String,
    /// Whether the insured is active.
    #[serde(default = "default_active")]
    #[builder(default = true)]
    pub active: bool,
    /// Agency-specific customer identifier.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub custom_id: String,
    /// Existing NowCerts insured identifier, if any.
    #[serde(default)]
    #[builder(default, setter(into))]
    pub insured_id: String,
}

/// Request body for `POST /api/Insured/Insert`.
///
/// Field names follow the upstream API. Two of them differ from the local
/// record beyond casing: `insured_type` is sent as `type` and `custom_id`
/// as `customerId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuredPayload {
    pub database_id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    #[serde(rename = "type")]
    pub insured_type: i32,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub cell_phone: String,
    pub email: String,
    pub fein: String,
    pub description: String,
    pub active: bool,
    #[serde(rename = "customerId")]
    pub custom_id: String,
    pub insured_id: String,
}

impl From<&InsuredRecord> for InsuredPayload {
    fn from(record: &InsuredRecord) -> Self {
        Self {
            database_id: record.database_id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            middle_name: record.middle_name.clone(),
            insured_type: record.insured_type,
            address_line1: record.address_line1.clone(),
            address_line2: record.address_line2.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            zip_code: record.zip_code.clone(),
            cell_phone: record.cell_phone.clone(),
            email: record.email.clone(),
            fein: record.fein.clone(),
            description: record.description.clone(),
            active: record.active,
            custom_id: record.custom_id.clone(),
            insured_id: record.insured_id.clone(),
        }
    }
}
