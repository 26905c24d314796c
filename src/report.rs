//! Plain-text report rendering.
//!
//! Writes the three banner-delimited sections of the diagnostic report to
//! any [`io::Write`] sink. The section layout is the tool's output
//! contract; diagnostics go through `tracing` on stderr, never through the
//! sink given here.

use std::io::{self, Write};

use crate::data::{InspectionData, MessageData, RecordData};

const RECORDS_BANNER: &str = "=== ALL RECORD MESSAGES WITH DEVELOPER FIELDS ===";
const DESCRIPTIONS_BANNER: &str = "=== ALL DEVELOPER FIELD DESCRIPTION MESSAGES ===";
const DATA_IDS_BANNER: &str = "=== ALL DEVELOPER DATA ID MESSAGES ===";

/// Write the full three-section report.
///
/// Sections appear in fixed order; a section with nothing to show still
/// prints its banner. No aggregation, sorting, or deduplication — messages
/// render in the order they were decoded.
pub fn write_report(out: &mut impl Write, data: &InspectionData) -> io::Result<()> {
    writeln!(out, "{RECORDS_BANNER}\n")?;
    for record in &data.records {
        write_record(out, record)?;
    }

    writeln!(out, "\n{DESCRIPTIONS_BANNER}\n")?;
    for message in &data.field_descriptions {
        write_metadata(out, "Field Description:", message)?;
    }

    writeln!(out, "\n{DATA_IDS_BANNER}\n")?;
    for message in &data.developer_data_ids {
        write_metadata(out, "Developer Data ID:", message)?;
    }
    Ok(())
}

/// One record entry: index and timestamp line, then every field on the
/// record (not just the reportable ones), then a blank separator. Records
/// with nothing reportable are skipped entirely.
fn write_record(out: &mut impl Write, record: &RecordData) -> io::Result<()> {
    if record.reportable_fields().is_empty() {
        return Ok(());
    }
    match &record.timestamp {
        Some(ts) => writeln!(out, "Record #{} timestamp={}", record.index, ts)?,
        None => writeln!(out, "Record #{} timestamp=none", record.index)?,
    }
    for field in &record.fields {
        writeln!(out, "  {}: {} ({})", field.name, field.value, field.units)?;
    }
    writeln!(out)
}

fn write_metadata(out: &mut impl Write, header: &str, message: &MessageData) -> io::Result<()> {
    writeln!(out, "{header}")?;
    for field in &message.fields {
        writeln!(out, "  {}: {}", field.name, field.value)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FieldData, FieldOrigin};
    use fitparser::Value;

    fn field(name: &str, value: Value, units: &str, origin: FieldOrigin) -> FieldData {
        FieldData {
            name: name.to_string(),
            value,
            units: units.to_string(),
            origin,
        }
    }

    fn render(data: &InspectionData) -> String {
        let mut out = Vec::new();
        write_report(&mut out, data).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_data_prints_banners_only() {
        let output = render(&InspectionData::default());

        assert_eq!(
            output,
            "=== ALL RECORD MESSAGES WITH DEVELOPER FIELDS ===\n\n\
             \n=== ALL DEVELOPER FIELD DESCRIPTION MESSAGES ===\n\n\
             \n=== ALL DEVELOPER DATA ID MESSAGES ===\n\n"
        );
    }

    #[test]
    fn test_plain_records_leave_first_section_empty() {
        let data = InspectionData {
            records: vec![RecordData {
                index: 0,
                timestamp: Some(Value::UInt32(1000)),
                fields: vec![
                    field("heart_rate", Value::UInt8(150), "bpm", FieldOrigin::Standard),
                    field("power", Value::UInt16(220), "watts", FieldOrigin::Standard),
                ],
            }],
            ..Default::default()
        };

        let output = render(&data);
        assert!(!output.contains("Record #"));
        assert!(output.starts_with("=== ALL RECORD MESSAGES WITH DEVELOPER FIELDS ===\n\n"));
    }

    #[test]
    fn test_developer_record_renders_index_and_all_fields() {
        let data = InspectionData {
            records: vec![RecordData {
                index: 41,
                timestamp: Some(Value::UInt32(987654)),
                fields: vec![
                    field("timestamp", Value::UInt32(987654), "s", FieldOrigin::Standard),
                    field("heart_rate", Value::UInt8(150), "bpm", FieldOrigin::Standard),
                    field("SmO2", Value::Float64(61.5), "percent", FieldOrigin::Developer),
                ],
            }],
            ..Default::default()
        };

        let output = render(&data);
        // Developer origin alone selects the record, whatever the name.
        assert!(output.contains("Record #41 timestamp=987654\n"));
        assert!(output.contains("  timestamp: 987654 (s)\n"));
        assert!(output.contains("  heart_rate: 150 (bpm)\n"));
        assert!(output.contains("  SmO2: 61.5 (percent)\n"));
    }

    #[test]
    fn test_timestamp_value_renders_via_display() {
        use chrono::TimeZone;

        let ts = chrono::Local.with_ymd_and_hms(2021, 9, 12, 6, 30, 0).unwrap();
        let data = InspectionData {
            records: vec![RecordData {
                index: 0,
                timestamp: Some(Value::Timestamp(ts)),
                fields: vec![field(
                    "Lactate",
                    Value::Float64(2.5),
                    "mmol/L",
                    FieldOrigin::Developer,
                )],
            }],
            ..Default::default()
        };

        let output = render(&data);
        assert!(output.contains("Record #0 timestamp=2021-09-12"));
    }

    #[test]
    fn test_fallback_record_appears_exactly_once() {
        let data = InspectionData {
            records: vec![RecordData {
                index: 7,
                timestamp: None,
                fields: vec![field(
                    "Lactate Threshold",
                    Value::UInt16(301),
                    "",
                    FieldOrigin::Standard,
                )],
            }],
            ..Default::default()
        };

        let output = render(&data);
        assert_eq!(output.matches("Record #7").count(), 1);
        assert!(output.contains("Record #7 timestamp=none\n"));
        assert!(output.contains("  Lactate Threshold: 301 ()\n"));
    }

    #[test]
    fn test_each_field_description_gets_a_header() {
        let data = InspectionData {
            field_descriptions: vec![
                MessageData {
                    fields: vec![
                        field(
                            "field_name",
                            Value::String("Lactate".to_string()),
                            "",
                            FieldOrigin::Standard,
                        ),
                        field(
                            "units",
                            Value::String("mmol/L".to_string()),
                            "",
                            FieldOrigin::Standard,
                        ),
                    ],
                },
                MessageData {
                    fields: vec![field(
                        "field_name",
                        Value::String("SmO2".to_string()),
                        "",
                        FieldOrigin::Standard,
                    )],
                },
            ],
            ..Default::default()
        };

        let output = render(&data);
        assert_eq!(output.matches("Field Description:\n").count(), 2);
        // Fields follow their header in native order.
        assert!(output.contains(
            "Field Description:\n  field_name: Lactate\n  units: mmol/L\n"
        ));
        assert!(output.contains("Field Description:\n  field_name: SmO2\n"));
    }

    #[test]
    fn test_developer_data_id_section() {
        let data = InspectionData {
            developer_data_ids: vec![MessageData {
                fields: vec![field(
                    "application_id",
                    Value::String("0badf00d".to_string()),
                    "",
                    FieldOrigin::Standard,
                )],
            }],
            ..Default::default()
        };

        let output = render(&data);
        assert_eq!(output.matches("Developer Data ID:\n").count(), 1);
        assert!(output.contains("  application_id: 0badf00d\n"));
    }
}
