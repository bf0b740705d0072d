// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `copy`: Copy matching files once
//! - `watch`: Copy, then keep copying on every source change

/// One-shot copy command.
pub mod copy;
/// Continuous watch command.
pub mod watch;
