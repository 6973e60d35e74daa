// Direct messages between users, with e-mail notification to the receiver.

pub mod conversations;
pub mod handlers;
pub mod store;
