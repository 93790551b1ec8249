// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar recurrence engine.
//!
//! A [`Recurrence`] couples an anchor instant with a description of how an
//! event repeats. The engine answers *next occurrence after* queries,
//! tracks per-instance exceptions and completions, and converts rules to
//! and from their wire forms: the vCalendar 1.0 line format, the iCalendar
//! 2.0 `RRULE` value, and a named-field hash.

mod codec;
mod datetime;
mod recurrence;

pub use crate::{
    codec::{HashCycle, HashPattern, HashRange, HashRangeType, RecurrenceHash},
    recurrence::{DaySet, Recurrence, RecurrenceKind, Termination},
};
