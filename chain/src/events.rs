//! Event log decoding.

use alloy_sol_types::SolEvent;

use crate::receipt::Log;

/// Decode `log` as event `E`, or `None` if it is some other log.
///
/// A log whose first topic matches but whose body fails to decode is also
/// `None`; callers scanning a receipt simply move on to the next log.
pub fn decode_if_matches<E: SolEvent>(log: &Log) -> Option<E> {
    if log.topics.first() != Some(&E::SIGNATURE_HASH) {
        return None;
    }
    E::decode_raw_log(log.topics.iter().copied(), &log.data, true).ok()
}

/// First log in `logs` that decodes as `E`, with its position.
pub fn find_first_event<E: SolEvent>(logs: &[Log]) -> Option<(usize, E)> {
    logs.iter()
        .enumerate()
        .find_map(|(index, log)| decode_if_matches::<E>(log).map(|event| (index, event)))
}
