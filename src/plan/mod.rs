//! Plan parsing and visualization module
//!
//! This module provides parsing and rendering capabilities for OpenTofu/
//! Terraform plan output: a single-pass line-oriented parser that recovers a
//! typed change-set from the tool's human-readable log, and renderers that
//! display the result.
//!
//! # Features
//!
//! - **Parsing**: Extract resources, nested blocks, and typed attribute
//!   changes from plan output, including `old -> new` transitions and
//!   multi-line arrays
//! - **ASCII Rendering**: Terminal-friendly colored diff output
//! - **HTML Rendering**: Export diffs to HTML for documentation/sharing
//! - **JSON Export**: The whole model serializes with serde
//!
//! # Example
//!
//! ```ignore
//! use planview::plan::{PlanParser, AsciiRenderer, PlanRenderer, RenderOptions};
//!
//! let parser = PlanParser::new();
//! let plan = parser.parse(&plan_output);
//!
//! let renderer = AsciiRenderer::new();
//! let options = RenderOptions::default();
//!
//! println!("{}", renderer.render(&plan, &options));
//! ```

mod parser;
mod renderer;
mod sample;
mod types;
pub(crate) mod value;

pub use parser::PlanParser;
pub use renderer::{AsciiRenderer, HtmlRenderer, PlanRenderer, RenderOptions};
pub use sample::SAMPLE_PLAN;
pub use types::{
    AttrValue, Attribute, Block, ChangeSummary, ChangeSymbol, Plan, Resource, ResourceAction,
    ValueChange,
};
