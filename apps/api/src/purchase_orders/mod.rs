// Purchase order gate: the approve/reject workflow for vendor paperwork.
// Not linked to the hiring pipeline, but it shares the pipeline's terminal
// discipline, with one softening: re-applying the status a terminal order
// already has is a no-op instead of an error.

pub mod gate;
pub mod handlers;
