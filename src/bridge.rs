//! Host exchange bridge.
//!
//! The host application and the engine meet over a small key/value channel:
//! pending command batches come down under the `"SET"` key, and the current
//! telemetry snapshot is published back one field at a time. The trait here
//! is what a host implements; the free functions turn a raw batch into
//! ordered, typed [`CommandRequest`]s.

use std::collections::HashMap;

use tracing::warn;

use crate::types::CommandRequest;

/// Key under which hosts stage pending command batches.
pub const REQUEST_KEY: &str = "SET";

/// Loose field values of one staged request, keyed by wire field name.
pub type RequestFields = HashMap<String, u16>;

/// One staged batch: composite key `"<opcode>_<index>"` to field values.
pub type RequestBatch = HashMap<String, RequestFields>;

/// Host-provided key/value channel.
pub trait ExchangeBridge: Send {
    /// Fetch **and consume** the value stored under `key`. Returns `None`
    /// when nothing is staged. Consumption matters: a batch must not be
    /// redelivered once the engine has taken it.
    fn take(&mut self, key: &str) -> Option<RequestBatch>;

    /// Publish one telemetry field to the host.
    fn publish(&mut self, key: &str, value: u8);
}

/// Turn a staged batch into typed requests in caller-intended order.
///
/// Composite keys sort by their ascending numeric `index` suffix so a batch
/// staged as `131_0, 128_1, 128_2` encodes in exactly that order. A missing
/// or unparsable suffix counts as index 0; ties break on the full key to
/// keep the order deterministic. Keys whose opcode prefix is not a decimal
/// byte are dropped with a warning.
pub fn ordered_requests(batch: RequestBatch) -> Vec<CommandRequest> {
    let mut staged: Vec<(u32, String, RequestFields)> = batch
        .into_iter()
        .map(|(key, fields)| (composite_index(&key), key, fields))
        .collect();
    staged.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));

    let mut requests = Vec::with_capacity(staged.len());
    for (_, key, fields) in staged {
        let Some(opcode) = composite_opcode(&key) else {
            warn!("request key '{}' has no parsable opcode, dropping", key);
            continue;
        };
        requests.push(CommandRequest::from_loose(
            opcode,
            fields.iter().map(|(name, value)| (name.as_str(), *value)),
        ));
    }
    requests
}

/// The opcode prefix of a composite key, e.g. `"131_2"` → `131`.
fn composite_opcode(key: &str) -> Option<u8> {
    let prefix = key.split('_').next().unwrap_or(key);
    prefix.parse::<u8>().ok()
}

/// The numeric index suffix of a composite key; absent or malformed → 0.
fn composite_index(key: &str) -> u32 {
    key.split('_').nth(1).and_then(|suffix| suffix.parse::<u32>().ok()).unwrap_or(0)
}
