/// Free-text preferences attached to one upload. Missing form fields
/// arrive as empty strings and are passed through as-is.
#[derive(Debug, Default, Clone)]
pub struct Submission {
    pub event: String,
    pub skin_type: String,
    pub style: String,
    pub duration: String,
    pub focus_area: String,
    pub manual_skin: String,
}
