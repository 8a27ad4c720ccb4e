// handlers/jobs/mod.rs - upload job lifecycle
//
// create job -> presigned URL -> client PUTs straight to the bucket
// -> storage/client calls /jobs/:id/complete
//
// Jobs are not persisted yet; lookups and listings return sample records.

pub mod complete; // POST /jobs/:id/complete
pub mod create;   // POST /jobs
pub mod delete;   // DELETE /jobs/:id
pub mod get;      // GET /jobs/:id
pub mod list;     // GET /jobs

pub use complete::complete_post;
pub use create::create_post;
pub use delete::job_delete;
pub use get::job_get;
pub use list::list_get;

use chrono::{Duration, Utc};

use crate::models::{UploadJob, UploadJobStatus};
use crate::services::upload::content_type_for;

/// Sample job record used until a job store exists
pub(crate) fn sample_job(
    id: &str,
    device_id: &str,
    file_name: &str,
    file_size: i64,
    status: UploadJobStatus,
    created_ago: Duration,
    updated_ago: Duration,
) -> UploadJob {
    let now = Utc::now();
    let file_type = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).unwrap_or_default();

    UploadJob {
        id: id.to_string(),
        device_id: device_id.to_string(),
        file_name: file_name.to_string(),
        file_size,
        file_type,
        content_type: content_type_for(file_name).to_string(),
        description: String::new(),
        bucket: String::new(),
        key: String::new(),
        status,
        upload_url: String::new(),
        ttl: 0,
        expires_at: None,
        created_at: now - created_ago,
        updated_at: now - updated_ago,
    }
}
