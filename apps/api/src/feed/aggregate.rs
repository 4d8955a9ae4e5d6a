//! Aggregation Engine — one parent query, then six child queries in flight together.
//!
//! Flow:
//! 1. `select * from resumes` (full table; the endpoint is a snapshot dump)
//! 2. Key Set = distinct `id` of every parent row
//! 3. Six `resume_id = any($1)` queries joined with `try_join!`, so latency is
//!    bounded by the slowest one and the first failure fails the whole feed
//! 4. `user_id` on each parent row is re-encoded as a decimal string

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, info};

use crate::models::resume::ResumeFeed;
use crate::query::{QueryArg, QueryError, QueryExecutor, Row};

pub const RESUMES_TABLE: &str = "resumes";

pub const EDUCATIONS_TABLE: &str = "resume_educations";
pub const WORK_EXPERIENCES_TABLE: &str = "resume_work_experiences";
pub const COMPUTER_SKILLS_TABLE: &str = "resume_computer_skills";
pub const SKILLS_TABLE: &str = "resume_skills";
pub const LANGUAGES_TABLE: &str = "resume_languages";
pub const AWARDS_TABLE: &str = "resume_awards";

/// Builds the full feed. All-or-nothing: any failed query fails the feed.
pub async fn build_feed(executor: &dyn QueryExecutor) -> Result<ResumeFeed, QueryError> {
    let resumes = executor
        .execute(&format!("select * from {RESUMES_TABLE}"), &[])
        .await?;
    let keys = key_set(&resumes)?;
    info!(resumes = resumes.len(), keys = keys.len(), "fetched parent rows");

    let (educations, work_experiences, computer_skills, skills, languages, awards) = tokio::try_join!(
        fetch_children(executor, EDUCATIONS_TABLE, &keys),
        fetch_children(executor, WORK_EXPERIENCES_TABLE, &keys),
        fetch_children(executor, COMPUTER_SKILLS_TABLE, &keys),
        fetch_children(executor, SKILLS_TABLE, &keys),
        fetch_children(executor, LANGUAGES_TABLE, &keys),
        fetch_children(executor, AWARDS_TABLE, &keys),
    )?;

    Ok(ResumeFeed {
        resumes: resumes.into_iter().map(stringify_user_id).collect(),
        educations,
        work_experiences,
        computer_skills,
        skills,
        languages,
        awards,
    })
}

/// Distinct parent identifiers. A parent row without an integer `id` is a decode error.
pub fn key_set(resumes: &[Row]) -> Result<Vec<i64>, QueryError> {
    resumes
        .iter()
        .map(|row| {
            row.get("id").and_then(Value::as_i64).ok_or_else(|| {
                QueryError::Decode(format!("{RESUMES_TABLE} row without an integer id"))
            })
        })
        .collect::<Result<BTreeSet<i64>, _>>()
        .map(|ids| ids.into_iter().collect())
}

async fn fetch_children(
    executor: &dyn QueryExecutor,
    table: &'static str,
    keys: &[i64],
) -> Result<Vec<Row>, QueryError> {
    let statement = format!("select * from {table} where resume_id = any($1::bigint[])");
    let rows = executor
        .execute(&statement, &[QueryArg::IntArray(keys.to_vec())])
        .await?;
    debug!(table, rows = rows.len(), "fetched child rows");
    Ok(rows)
}

/// Re-encodes a numeric `user_id` as its exact decimal string so large
/// identifiers survive clients that parse JSON numbers as doubles.
/// Strings, `null`, and a missing field are left as they are.
pub fn stringify_user_id(mut row: Row) -> Row {
    if let Some(Value::Number(n)) = row.get("user_id") {
        let digits = n.to_string();
        row.insert("user_id".to_string(), Value::String(digits));
    }
    row
}
