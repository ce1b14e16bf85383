mod answer;
mod ask;
mod index;
mod unanswered;
mod view;

pub use self::answer::*;
pub use self::ask::*;
pub use self::index::*;
pub use self::unanswered::*;
pub use self::view::*;
