// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod day_set;
mod model;
mod next;

pub use day_set::DaySet;
pub use model::{Recurrence, RecurrenceKind, Termination};
