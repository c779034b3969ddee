// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed record stores. They hand the engine plain, normalized data.

pub mod budgets;
pub mod categories;
pub mod transactions;
