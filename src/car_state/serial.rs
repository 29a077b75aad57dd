//! Serialization of [CarSnapshot] for the `status json` command

use crate::car_state::CarSnapshot;
use crate::print;


/// Serializes a `CarSnapshot` as pretty JSON.
///
/// If serialization fails, the function logs the error and returns `None`.
///
/// ## Parameters
/// - `snapshot`: A reference to the `CarSnapshot` to be serialized.
///
/// ## Returns
/// - A `String` containing the JSON document.
pub fn serialize_snapshot(snapshot: &CarSnapshot) -> Option<String> {
    match serde_json::to_string_pretty(snapshot) {
        Ok(json) => Some(json),
        Err(e) => {
            print::err(format!("Serialization failed: {} (serial.rs, serialize_snapshot())", e));
            None
        }
    }
}
