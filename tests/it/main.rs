//! Single test binary entry point.
//!
//! Consolidates all tests into one binary to keep linking overhead down.
//!
//! Structure:
//! - helpers: builders and stub collaborators shared across tests
//! - unit: single-component tests
//! - integration: full gesture/content workflows through `PlanCanvas`
