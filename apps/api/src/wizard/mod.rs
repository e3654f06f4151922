// Wizard Session collaborator: the step catalog, session lifecycle, and the
// completion pipeline that hands answers to the diagnosis engine.

pub mod completion;
pub mod diagnoses;
pub mod guard;
pub mod handlers;
pub mod session;
pub mod steps;
