//! View model for decoded FIT messages.
//!
//! Converts the raw message sequence from [`crate::source`] into owned
//! records and metadata messages, resolving each field's origin once at
//! conversion time. Only the three message kinds the report cares about
//! survive the conversion; everything else is dropped.

use std::collections::HashSet;

use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};
use tracing::debug;

/// Field-description field that declares a developer field's name.
const FIELD_NAME_KEY: &str = "field_name";
/// Record field carrying the sample timestamp.
const TIMESTAMP_KEY: &str = "timestamp";

/// Where a field's definition comes from.
///
/// `fitparser` does not flag developer fields on decoded records, so the
/// origin is resolved from the developer field names declared by the file's
/// own `field_description` messages. A field whose description is missing
/// or unresolvable stays [`FieldOrigin::Standard`]; the lactate-name
/// fallback on [`RecordData`] covers that gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldOrigin {
    /// Defined by the base FIT profile.
    #[default]
    Standard,
    /// Defined by an application-specific field description.
    Developer,
}

impl FieldOrigin {
    /// Resolve a field name against the declared developer names.
    pub fn resolve(name: &str, declared: &HashSet<String>) -> Self {
        if declared.contains(name) {
            FieldOrigin::Developer
        } else {
            FieldOrigin::Standard
        }
    }

    pub fn is_developer(self) -> bool {
        self == FieldOrigin::Developer
    }
}

/// A single decoded field with its resolved origin.
#[derive(Debug, Clone)]
pub struct FieldData {
    pub name: String,
    pub value: Value,
    pub units: String,
    pub origin: FieldOrigin,
}

/// One "record" message: a per-sample message that may carry developer
/// fields alongside standard ones.
#[derive(Debug, Clone)]
pub struct RecordData {
    /// 0-based position among record messages, in file order.
    pub index: usize,
    /// Value of the record's `timestamp` field, if it has one.
    pub timestamp: Option<Value>,
    /// Every field on the record, in native order.
    pub fields: Vec<FieldData>,
}

impl RecordData {
    /// Fields resolved as developer-defined.
    pub fn developer_fields(&self) -> Vec<&FieldData> {
        self.fields.iter().filter(|f| f.origin.is_developer()).collect()
    }

    /// Fields whose name contains "lactate", in any case.
    ///
    /// Fallback for files whose field descriptions do not resolve. The name
    /// check applies to every field on the record, developer or not.
    pub fn lactate_named_fields(&self) -> Vec<&FieldData> {
        self.fields
            .iter()
            .filter(|f| f.name.to_ascii_lowercase().contains("lactate"))
            .collect()
    }

    /// The fields that make this record worth reporting: developer fields
    /// when any resolved, otherwise the lactate-named fallback.
    pub fn reportable_fields(&self) -> Vec<&FieldData> {
        let dev = self.developer_fields();
        if dev.is_empty() {
            self.lactate_named_fields()
        } else {
            dev
        }
    }
}

/// One metadata message (`field_description` or `developer_data_id`).
#[derive(Debug, Clone)]
pub struct MessageData {
    /// Every field on the message, in native order.
    pub fields: Vec<FieldData>,
}

/// The complete converted view of one decoded pass over a FIT file.
#[derive(Debug, Clone, Default)]
pub struct InspectionData {
    pub records: Vec<RecordData>,
    pub field_descriptions: Vec<MessageData>,
    pub developer_data_ids: Vec<MessageData>,
}

impl InspectionData {
    /// Convert a decoded message sequence into the inspection view.
    ///
    /// Makes a preliminary pass to collect the developer field names the
    /// file declares, then converts each message by kind.
    pub fn from_messages(messages: &[FitDataRecord]) -> Self {
        let declared = declared_developer_names(messages);
        debug!(count = declared.len(), "declared developer field names");

        let mut data = Self::default();
        for message in messages {
            match message.kind() {
                MesgNum::Record => {
                    let index = data.records.len();
                    data.records.push(convert_record(index, message, &declared));
                }
                MesgNum::FieldDescription => {
                    data.field_descriptions.push(convert_metadata(message));
                }
                MesgNum::DeveloperDataId => {
                    data.developer_data_ids.push(convert_metadata(message));
                }
                _ => {}
            }
        }
        debug!(
            records = data.records.len(),
            field_descriptions = data.field_descriptions.len(),
            developer_data_ids = data.developer_data_ids.len(),
            "converted FIT messages"
        );
        data
    }
}

/// Developer field names declared by the file's field-description messages.
fn declared_developer_names(messages: &[FitDataRecord]) -> HashSet<String> {
    let mut names = HashSet::new();
    for message in messages {
        if message.kind() != MesgNum::FieldDescription {
            continue;
        }
        for field in message.fields() {
            if field.name() == FIELD_NAME_KEY {
                collect_names(field.value(), &mut names);
            }
        }
    }
    names
}

/// `field_name` values are strings, or arrays of strings on multi-part
/// descriptions. Anything else is ignored.
fn collect_names(value: &Value, names: &mut HashSet<String>) {
    match value {
        Value::String(s) => {
            names.insert(s.clone());
        }
        Value::Array(values) => {
            for v in values {
                collect_names(v, names);
            }
        }
        _ => {}
    }
}

fn convert_record(
    index: usize,
    message: &FitDataRecord,
    declared: &HashSet<String>,
) -> RecordData {
    let fields: Vec<FieldData> = message
        .fields()
        .iter()
        .map(|field| FieldData {
            name: field.name().to_string(),
            value: field.value().clone(),
            units: field.units().to_string(),
            origin: FieldOrigin::resolve(field.name(), declared),
        })
        .collect();
    let timestamp = fields
        .iter()
        .find(|f| f.name == TIMESTAMP_KEY)
        .map(|f| f.value.clone());
    RecordData { index, timestamp, fields }
}

fn convert_metadata(message: &FitDataRecord) -> MessageData {
    MessageData {
        fields: message
            .fields()
            .iter()
            .map(|field| FieldData {
                name: field.name().to_string(),
                value: field.value().clone(),
                units: field.units().to_string(),
                origin: FieldOrigin::Standard,
            })
            .collect(),
    }
}
