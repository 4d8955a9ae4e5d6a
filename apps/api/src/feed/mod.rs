// Resume feed: the single read path of the API.
// Parent rows from `resumes`, child rows from six `resume_*` tables, merged flat.

pub mod aggregate;
pub mod handlers;
