// handlers/detection/mod.rs - audio detection endpoints
//
// Uploads are accepted and acknowledged with a task id; results and status are
// canned until the detection pipeline is wired in.

pub mod result; // GET /detection/result/:id
pub mod status; // GET /detection/status/:id
pub mod upload; // POST /detection/upload

pub use result::result_get;
pub use status::status_get;
pub use upload::upload_post;
