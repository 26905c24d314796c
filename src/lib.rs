//! # fit-doctor
//!
//! A diagnostic dump of developer-defined fields in Garmin FIT activity
//! files.
//!
//! Activity files from devices paired with third-party sensors (lactate
//! meters, muscle oxygen sensors, and the like) carry those readings as
//! developer fields: per-sample values whose name, unit, and type are
//! declared by `field_description` messages rather than the base FIT
//! profile. This crate reads one activity file and prints every record
//! message carrying such fields, plus all of the declaring metadata, as a
//! plain-text report.
//!
//! ## Architecture
//!
//! The crate is a three-stage pipeline over `fitparser`'s decoded message
//! sequence:
//!
//! - **[`source`]**: opens the file and decodes it into raw messages
//! - **[`data`]**: converts raw messages into the owned view model,
//!   resolving each field's [`FieldOrigin`] from the file's own field
//!   descriptions
//! - **[`report`]**: renders the three banner-delimited report sections to
//!   any writer
//!
//! [`inspect_file`] runs the whole pipeline:
//!
//! ```no_run
//! use std::path::Path;
//!
//! let mut out = Vec::new();
//! fit_doctor::inspect_file(Path::new("assets/activity.fit"), &mut out)?;
//! # anyhow::Ok(())
//! ```

pub mod data;
pub mod report;
pub mod source;

use std::io::Write;
use std::path::Path;

use anyhow::Result;

pub use data::{FieldData, FieldOrigin, InspectionData, MessageData, RecordData};
pub use source::SourceError;

/// Inspect one FIT file and write the full report to `out`.
///
/// Nothing is written until the whole file has decoded; an open or decode
/// failure propagates and leaves `out` untouched.
pub fn inspect_file(path: &Path, out: &mut impl Write) -> Result<()> {
    let messages = source::read_messages(path)?;
    let data = InspectionData::from_messages(&messages);
    report::write_report(out, &data)?;
    Ok(())
}
