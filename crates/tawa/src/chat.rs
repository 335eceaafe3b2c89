mod conversation;
mod responder;

pub use conversation::*;
pub use responder::*;
