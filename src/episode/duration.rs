/// Formats a number of seconds as `HH:MM:SS`.
///
/// Hours are not capped, so anything past 99 hours widens the first field.
pub fn convert_duration_to_time_string(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
