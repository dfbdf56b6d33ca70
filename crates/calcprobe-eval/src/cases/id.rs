//! Case id parsing from free-form descriptions

/// Marker preceding a case id in a description
pub const ID_MARKER: &str = "ID: ";

/// Extract the id following `ID: ` up to the next space
///
/// Returns an empty string when the marker is absent.
pub fn extract_id_from_description(description: &str) -> &str {
    let Some(start) = description.find(ID_MARKER) else {
        return "";
    };
    let rest = &description[start + ID_MARKER.len()..];
    let end = rest.find(' ').unwrap_or(rest.len());
    rest[..end].trim()
}
