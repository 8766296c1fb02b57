//! Algorithm implementations for employee survey analysis
//!
//! This module contains the department classification pipeline: qualifying
//! employees are counted per department, joined with department totals and
//! turned into percentages that are compared against a threshold.

pub mod classification;
