//! Granulation Scale-Up Core Library
//!
//! Scale-up relationships for top-spray fluid-bed granulation, carrying lab
//! process parameters (spray rate, fluidizing air volume, atomizing air) to a
//! pilot-scale unit, plus a report assembler that renders the results.
//!
//! ## Layers
//!
//! - [`formulas`] - pure proportionality functions, validated, never rounded
//! - [`steps`] - one input struct per sheet section, producing a labeled [`ScaleUpResult`]
//! - [`workflow`] - runs the sheet in order, chaining outputs at full precision
//! - [`results`] - [`ResultBook`], the ordered collection the report is built from
//! - [`report`] - [`Report`] assembly and PDF/text/JSON rendering
//! - [`config`] - JSON configuration for step inputs and report layout
//!
//! ```
//! use granulation_scaleup_core::{Report, ScaleUpWorkflow};
//!
//! let outcome = ScaleUpWorkflow::default().run();
//! let report = Report::assemble("Scale-Up", outcome.book.report_sections()).unwrap();
//! assert_eq!(report.sections().len(), 6);
//! ```

// Core types and utilities
pub mod core_types;

// Formula library
pub mod formulas;

// Sheet sections and the workflow that runs them
pub mod results;
pub mod steps;
pub mod workflow;

// Output
pub mod config;
pub mod report;

// Re-export core types
pub use core_types::{ResultEntry, ResultValue, ScaleUpError, ScaleUpResult, Unit};

// Re-export formula metadata
pub use formulas::{Formula, FormulaMetadata};

// Re-export steps and workflow
pub use results::ResultBook;
pub use steps::{
    AirVolumeInput, AreaScaling, AtomizingAirPressureInput, AtomizingAirVolumeInput,
    BottomScreenAreas, BottomScreenInput, PressureScaling, PressureToFlowInput, ScaleUpStep,
    ScreenDimension, SprayRateInput,
};
pub use workflow::{ScaleUpWorkflow, StepFailure, WorkflowOutcome};

// Re-export reporting and configuration
pub use config::{ConfigError, ReportConfig, ScaleUpConfig};
pub use report::{
    DocumentRenderer, JsonRenderer, PageLayout, PageSize, PdfRenderer, Report, ReportEntry,
    ReportError, ReportSection, TextRenderer,
};
