// handlers/device/mod.rs - device management (sample data, no registry yet)

pub mod info;     // GET /device/:id
pub mod list;     // GET /device/list
pub mod register; // POST /device/register

pub use info::info_get;
pub use list::list_get;
pub use register::register_post;
