// Interview scheduling. Creating or updating an interview may carry an
// ephemeral notify_manager instruction; the actual recipient resolution and
// inbox write live in `notify::relay` and never affect the interview write.

pub mod handlers;
pub mod scheduler;
