//! Pipeline components.
//!
//! - **load**: Decode input files into pixel buffers
//! - **layout**: Per-image output directory and artifact encoding
//! - **settings**: Parameters for one run
//! - **observer**: Progress reporting sink
//! - **driver**: Orchestrates the full pipeline

pub mod driver;
pub mod layout;
pub mod load;
pub mod observer;
pub mod settings;

// Re-exports for convenient access
pub use driver::PipelineDriver;
pub use layout::OutputLayout;
pub use load::ImageLoader;
pub use observer::{NullObserver, PipelineObserver, TracingObserver};
pub use settings::PipelineSettings;
