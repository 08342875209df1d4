//! Typed outbound command requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::protocol::command_set::FieldName;

/// Canonical field-value map of a command request.
///
/// Keyed by [`FieldName`] in its natural order, so two maps built from the
/// same entries compare equal regardless of insertion order. This ordered
/// comparison is the queue's dedup key and deliberately does not depend on
/// any serialization format.
pub type FieldMap = BTreeMap<FieldName, u16>;

/// One outbound command as submitted by the host.
///
/// Field values are 16-bit to accommodate the delay command's seconds field;
/// every other field truncates to its low byte when laid into a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Wire opcode naming the command.
    pub opcode: u8,
    /// Field values keyed by name.
    pub fields: FieldMap,
}

impl CommandRequest {
    /// Create a request with no fields.
    pub fn new(opcode: u8) -> Self {
        Self { opcode, fields: FieldMap::new() }
    }

    /// Builder-style field insertion.
    pub fn with(mut self, field: FieldName, value: u16) -> Self {
        self.fields.insert(field, value);
        self
    }

    /// Look up a field value.
    pub fn field(&self, field: FieldName) -> Option<u16> {
        self.fields.get(&field).copied()
    }

    /// Build a request from the loose string-keyed map a host delivers over
    /// the exchange bridge. Unknown field names are skipped; whether the
    /// request carries everything its command needs is checked later, at
    /// encode time.
    pub fn from_loose<'a, I>(opcode: u8, fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u16)>,
    {
        let mut request = CommandRequest::new(opcode);
        for (name, value) in fields {
            match FieldName::parse(name) {
                Some(field) => {
                    request.fields.insert(field, value);
                }
                None => {
                    debug!("skipping unknown field '{}' in request for opcode {:#04x}", name, opcode);
                }
            }
        }
        request
    }
}
