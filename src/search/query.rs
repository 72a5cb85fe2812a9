use crate::models::submission::Submission;

/// Build the free-text search query. Field order is fixed; blank fields
/// are kept in place, so the string may contain runs of spaces. The
/// downstream search API tolerates those.
pub fn compose(skin_term: &str, s: &Submission) -> String {
    format!(
        "{} skin {} {} {} makeup tutorial {} {}",
        skin_term, s.skin_type, s.style, s.event, s.focus_area, s.duration
    )
}
