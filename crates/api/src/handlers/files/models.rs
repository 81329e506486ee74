/// A validated request for a file under the storage root
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedRequest {
    /// One of the storage subtrees (`uploads`, `galleries`, `entries`, `blogs`)
    pub area: &'static str,
    /// Decoded path segments below the area
    pub segments: Vec<String>,
}
