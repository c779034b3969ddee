// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure computations over transaction and budget snapshots.
//!
//! Nothing in here touches storage or keeps state between calls; callers
//! re-run these whenever the month, the transactions or the budgets change.

pub mod aggregate;
pub mod alerts;
pub mod calendar;
pub mod insights;
pub mod pacing;
pub mod resolver;
pub mod search;

pub use aggregate::{aggregate, sub_aggregate, CategoryTotal, DayTotals, MonthlyAggregate};
pub use alerts::{evaluate, evaluate_total, AlertLevel, BudgetAlert};
pub use pacing::{pace, MonthPosition, PacingResult};
pub use resolver::{CategoryResolver, ResolvedCategory};
