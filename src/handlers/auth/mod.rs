// handlers/auth/mod.rs - token acquisition and verification
//
// There is no user store yet: login signs a token for whatever username is
// presented, and register only echoes the account back.

pub mod login;    // POST /auth/login
pub mod register; // POST /auth/register
pub mod verify;   // GET /auth/verify

pub use login::login_post;
pub use register::register_post;
pub use verify::verify_get;
