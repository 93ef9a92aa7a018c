// Notification relay and inbox. The relay resolves an interview event to the
// hiring manager who owns the related position and writes an inbox message.
// Every failure along that path is logged and swallowed: notifications are
// best-effort and never affect the primary write.

pub mod handlers;
pub mod relay;
