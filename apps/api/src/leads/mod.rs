// Lead Profile collaborator: one profile per user, updated from wizard
// activity and the diagnosis; interactions form an append-only activity log.

pub mod handlers;
pub mod repository;
