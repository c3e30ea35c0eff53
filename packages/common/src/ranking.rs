//! Company rankings by applicant count, sales revenue and employee count.
//!
//! Ranks are 1-based positions in a descending order over the complete set
//! of active companies, so a rank stays meaningful when only one page of
//! companies is shown. Equal metrics are ordered by ascending id.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// The per-company figures a ranking is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyMetrics<K> {
    pub id: K,
    /// Sales revenue; compared as an exact integer.
    pub revenue: i64,
    pub employees: i32,
    /// Number of applications referencing the company (zero allowed).
    pub applicants: u64,
}

/// Id → rank lookup tables for the three comparison metrics.
#[derive(Debug, Clone)]
pub struct Rankings<K> {
    applicant: HashMap<K, u32>,
    revenue: HashMap<K, u32>,
    employee: HashMap<K, u32>,
}

impl<K> Rankings<K>
where
    K: Copy + Eq + Hash + Ord,
{
    /// Rank every company in `companies` by each metric independently.
    pub fn compute(companies: &[CompanyMetrics<K>]) -> Self {
        Self {
            applicant: rank_by(companies, |a, b| b.applicants.cmp(&a.applicants)),
            revenue: rank_by(companies, |a, b| b.revenue.cmp(&a.revenue)),
            employee: rank_by(companies, |a, b| b.employees.cmp(&a.employees)),
        }
    }

    pub fn applicant_rank(&self, id: &K) -> Option<u32> {
        self.applicant.get(id).copied()
    }

    pub fn revenue_rank(&self, id: &K) -> Option<u32> {
        self.revenue.get(id).copied()
    }

    pub fn employee_rank(&self, id: &K) -> Option<u32> {
        self.employee.get(id).copied()
    }

    /// Number of ranked companies.
    pub fn len(&self) -> usize {
        self.revenue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revenue.is_empty()
    }
}

fn rank_by<K, F>(companies: &[CompanyMetrics<K>], metric_desc: F) -> HashMap<K, u32>
where
    K: Copy + Eq + Hash + Ord,
    F: Fn(&CompanyMetrics<K>, &CompanyMetrics<K>) -> Ordering,
{
    let mut ordered: Vec<&CompanyMetrics<K>> = companies.iter().collect();
    ordered.sort_by(|a, b| metric_desc(a, b).then_with(|| a.id.cmp(&b.id)));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, company)| (company.id, index as u32 + 1))
        .collect()
}
