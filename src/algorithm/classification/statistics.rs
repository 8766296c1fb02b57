//! Per-department counts and percentages
//!
//! A [`DepartmentTally`] holds the two group-by counts for any subset of the
//! input. Tallies merge by adding counts, so batches can be tallied in any
//! order or in parallel and combined afterwards.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::models::DepartmentResult;

/// Percentage of qualifying employees, rounded half-up to two decimals
///
/// Rounding happens on the exact ratio, so `1 / 800` gives `0.13` rather than
/// whatever the nearest binary double of `0.125` rounds to. Returns `None`
/// when the department has no counted employees.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn high_satisfaction_percentage(qualifying: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }

    let qualifying = qualifying as u128;
    let total = total as u128;
    // floor(qualifying * 10_000 / total + 1/2)
    let hundredths = (qualifying * 20_000 + total) / (2 * total);

    Some(hundredths as f64 / 100.0)
}

/// Department counts gathered from one or more record batches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentTally {
    /// Employees counted per department
    totals: FxHashMap<String, usize>,
    /// Qualifying employees counted per department
    qualifying: FxHashMap<String, usize>,
    /// Rows seen, including rows that were not counted
    records: usize,
    /// Rows skipped because their department was null
    null_departments: usize,
}

impl DepartmentTally {
    #[must_use]
    pub fn new(
        totals: FxHashMap<String, usize>,
        qualifying: FxHashMap<String, usize>,
        records: usize,
        null_departments: usize,
    ) -> Self {
        Self {
            totals,
            qualifying,
            records,
            null_departments,
        }
    }

    /// Combine two tallies by adding their counts
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (department, count) in other.totals {
            *self.totals.entry(department).or_insert(0) += count;
        }
        for (department, count) in other.qualifying {
            *self.qualifying.entry(department).or_insert(0) += count;
        }
        self.records += other.records;
        self.null_departments += other.null_departments;
        self
    }

    #[must_use]
    pub fn records(&self) -> usize {
        self.records
    }

    #[must_use]
    pub fn null_departments(&self) -> usize {
        self.null_departments
    }

    #[must_use]
    pub fn department_count(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn total_for(&self, department: &str) -> usize {
        self.totals.get(department).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn qualifying_for(&self, department: &str) -> usize {
        self.qualifying.get(department).copied().unwrap_or(0)
    }

    /// Join totals with qualifying counts, one entry per department
    ///
    /// Departments without qualifying employees get a qualifying count of
    /// zero. The result is sorted by department name.
    #[must_use]
    pub fn stats(&self) -> Vec<DepartmentStats> {
        let mut stats: Vec<DepartmentStats> = self
            .totals
            .iter()
            .map(|(department, &total)| {
                DepartmentStats::new(department.clone(), total, self.qualifying_for(department))
            })
            .collect();
        stats.sort_unstable_by(|a, b| a.department.cmp(&b.department));
        stats
    }
}

/// Joined counts and percentage for one department
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentStats {
    pub department: String,
    pub total_employees: usize,
    pub high_satisfaction_count: usize,
    /// `None` when the department has no counted employees
    pub high_satisfaction_percentage: Option<f64>,
}

impl DepartmentStats {
    #[must_use]
    pub fn new(department: String, total_employees: usize, high_satisfaction_count: usize) -> Self {
        Self {
            high_satisfaction_percentage: high_satisfaction_percentage(
                high_satisfaction_count,
                total_employees,
            ),
            department,
            total_employees,
            high_satisfaction_count,
        }
    }

    /// Whether the percentage is strictly greater than the threshold
    #[must_use]
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.high_satisfaction_percentage
            .is_some_and(|percentage| percentage > threshold)
    }

    #[must_use]
    pub fn to_result(&self) -> Option<DepartmentResult> {
        self.high_satisfaction_percentage
            .map(|percentage| DepartmentResult::new(self.department.clone(), percentage))
    }
}

/// Counts describing one classification run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationSummary {
    /// Input rows seen
    pub records: usize,
    /// Distinct departments evaluated
    pub departments: usize,
    /// Departments above the threshold
    pub retained: usize,
    /// Rows skipped because their department was null
    pub null_departments: usize,
    pub threshold: f64,
}

impl fmt::Display for ClassificationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} departments above {}% ({} records",
            self.retained, self.departments, self.threshold, self.records
        )?;
        if self.null_departments > 0 {
            write!(f, ", {} without department", self.null_departments)?;
        }
        write!(f, ")")
    }
}
