//! # BTC Forecast
//!
//! A small batch pipeline for Bitcoin price forecasting on resampled
//! OHLCV (Open, High, Low, Close, Volume) data.
//!
//! The pipeline runs strictly downstream, each stage handing a file to
//! the next:
//!
//! 1. **Dataset acquisition** ([`fetch`]) - download the raw minute-level
//!    price history.
//! 2. **Feature pipeline** ([`pipeline`]) - resample ticks into daily,
//!    weekly or monthly bars and enrich them with technical indicators
//!    (SMA, EMA, RSI, MACD, Bollinger Bands).
//! 3. **Model trainer** ([`trainer`]) - fit an ordinary least squares
//!    model predicting the next period's close, report its test MSE,
//!    persist the model and chart actual vs. predicted values.
//! 4. **Future projector** ([`projector`]) - iteratively extend the
//!    series forward with the persisted model.
//!
//! ## Usage Example
//!
//! ```no_run
//! use btc_forecast::config::PipelineConfig;
//! use btc_forecast::pipeline::preprocess;
//! use btc_forecast::projector::project_forward;
//! use btc_forecast::trainer::train_and_evaluate;
//! use btc_forecast::Frequency;
//!
//! # fn main() -> btc_forecast::Result<()> {
//! let config = PipelineConfig::default();
//!
//! // Resample and enrich the raw minute data
//! let enriched = preprocess(&config, Frequency::Daily)?;
//! println!("{} enriched bars", enriched.len());
//!
//! // Train, evaluate and persist a linear model
//! let report = train_and_evaluate(&config, Frequency::Daily)?;
//! println!("{}", report.metrics);
//!
//! // Project 30 periods into the future
//! let projections = project_forward(&config, Frequency::Daily, 30)?;
//! for p in &projections {
//!     println!("{} -> {:.2}", p.date, p.predicted_close);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod fetch;
pub mod frequency;
pub mod indicators;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod plot;
pub mod projector;
pub mod trainer;

// Re-export commonly used types
pub use crate::config::PipelineConfig;
pub use crate::data::{Bar, EnrichedRecord, RawTick};
pub use crate::error::{PipelineError, Result};
pub use crate::frequency::Frequency;
pub use crate::model::{LinearRegression, TrainedLinearModel};
pub use crate::projector::Projection;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
