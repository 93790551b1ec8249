// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod hash;
mod rrule;
mod vcal;

pub use hash::{HashCycle, HashPattern, HashRange, HashRangeType, RecurrenceHash};
