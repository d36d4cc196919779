//! Background tasks owned by the runtime.
mod session;

pub(crate) use session::{SessionWorker, WorkerCommand};
