pub mod batch;
pub mod inspect;
pub mod processor;

pub use batch::{collect_inputs, run_batch, BatchSummary};
pub use inspect::{inspect, AlphaStatus, InspectReport, Probe};
pub use processor::{ImageProcessor, Outcome, ProcessReport};
