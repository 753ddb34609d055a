//! Audit event recording for envmon-cli
//!
//! Every mutating data-lifecycle operation records exactly one free-text
//! audit event after its body completes successfully. Events land in the
//! store's audit log, so they travel with snapshots like any other entity
//! kind.
//!
//! The write is best-effort with respect to the operation it describes: a
//! crash between operation success and the audit write loses the event,
//! not the operation.

mod sink;

pub use sink::AuditSink;
