// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Per-family primitive adapters.

pub mod curve25519;
pub mod nist;
pub mod rsa_pss;
