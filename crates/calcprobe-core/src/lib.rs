//! Calcprobe Core
//!
//! Drives an external arbitrary-precision calculator (`bc` by default) as a
//! child process and turns each evaluation into an [`EvaluationResult`].
//!
//! # Features
//!
//! - **Literal and streamed input**: complete expressions or lazily generated
//!   byte streams of unbounded size
//! - **Concurrent draining**: stdout and stderr are consumed while input is
//!   still being written, so large inputs and outputs cannot deadlock
//! - **Timeout guard**: a hard wall-clock budget that kills the calculator
//!   when it is exceeded
//! - **Layered configuration**: defaults, JSON/TOML/YAML files and
//!   `CALCPROBE_*` environment variables
//!
//! # Example
//!
//! ```rust,ignore
//! use calcprobe_core::{EvaluatorConfig, InputSource, ProcessEvaluator};
//!
//! let evaluator = ProcessEvaluator::new(EvaluatorConfig::default());
//! let result = evaluator.evaluate_with_timeout(InputSource::literal("2+2")).await;
//! assert_eq!(result.output(), Some("4"));
//! ```

pub mod config;
pub mod drainer;
pub mod error;
pub mod evaluator;
pub mod input;
pub mod logging;
pub mod result;
pub mod timeout;

// Re-exports for convenience
pub use config::{Config, DrainMode, EvaluatorConfig, load_from_file};
pub use drainer::{DrainedOutput, StreamDrainer};
pub use error::{EvalError, EvalResult, IoStage};
pub use evaluator::{Calculator, ProcessEvaluator, normalize_stdout};
pub use input::{ChunkReader, InputSource, RepeatChunks, StreamInput};
pub use logging::{LoggingConfig, init_logging};
pub use result::EvaluationResult;
pub use timeout::{TimeoutGuard, run_with_timeout};
