mod list;
mod login;
mod logout;
mod promote;
mod register;

pub use self::list::*;
pub use self::login::*;
pub use self::logout::*;
pub use self::promote::*;
pub use self::register::*;
