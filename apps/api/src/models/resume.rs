use serde::Serialize;

use crate::query::Row;

/// The aggregated payload served by the API.
///
/// Child collections are flat and independent of `resumes`; clients join them
/// back through each row's `resume_id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFeed {
    pub resumes: Vec<Row>,
    pub educations: Vec<Row>,
    pub work_experiences: Vec<Row>,
    pub computer_skills: Vec<Row>,
    pub skills: Vec<Row>,
    pub languages: Vec<Row>,
    pub awards: Vec<Row>,
}
