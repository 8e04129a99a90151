/// Set matching contract violations.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// A match query with no candidate pairs would score everything 0/0;
    /// rejected rather than reported as a vacuous perfect match.
    #[error("candidate query contains no object/time pairs")]
    EmptyCandidate,
}
