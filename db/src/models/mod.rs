mod question;
mod user;

pub use self::question::*;
pub use self::user::*;
