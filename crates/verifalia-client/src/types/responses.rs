/*
[INPUT]:  Raw JSON payloads returned by the jobs endpoints
[OUTPUT]: Normalized Job snapshots
[POS]:    Data layer - response envelopes
[UPDATE]: When API schema changes or new types added
*/

use serde::Deserialize;

use super::models::{Job, JobEntry, JobOverview, ListingPage};

/// Body of submission and retrieval responses: the overview plus an optional first
/// page of entries
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PartialJob {
    pub overview: JobOverview,
    #[serde(default)]
    pub entries: Option<ListingPage<JobEntry>>,
}

impl From<PartialJob> for Job {
    fn from(partial: PartialJob) -> Self {
        Job {
            overview: partial.overview,
            entries: partial.entries.map(|page| page.data).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobStatus;

    const OVERVIEW: &str = r#"{
        "id": "job-1",
        "createdOn": "2024-05-10T09:23:41Z",
        "submittedOn": "2024-05-10T09:23:41Z",
        "quality": "Standard",
        "retention": "30.0:0:0",
        "deduplication": "Off",
        "status": "InProgress",
        "noOfEntries": 2
    }"#;

    #[test]
    fn test_accepted_response_without_entries() {
        let raw = format!(r#"{{"overview": {OVERVIEW}}}"#);
        let job: Job = serde_json::from_str::<PartialJob>(&raw).unwrap().into();
        assert_eq!(job.id(), "job-1");
        assert_eq!(job.status(), JobStatus::InProgress);
        assert!(job.entries.is_empty());
    }

    #[test]
    fn test_response_with_entry_page() {
        let raw = format!(
            r#"{{
                "overview": {OVERVIEW},
                "entries": {{
                    "meta": {{"isTruncated": false}},
                    "data": [
                        {{"index": 0, "inputData": "a@b.com", "status": "Success", "classification": "Deliverable"}},
                        {{"index": 1, "inputData": "a@b.com", "status": "Duplicate", "classification": "Unknown", "duplicateOf": 0}}
                    ]
                }}
            }}"#
        );
        let job: Job = serde_json::from_str::<PartialJob>(&raw).unwrap().into();
        assert_eq!(job.entries.len(), 2);
        assert_eq!(job.entries[1].duplicate_of, Some(0));
    }
}
