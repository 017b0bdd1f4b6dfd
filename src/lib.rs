// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

pub mod config;
pub mod generation;
pub mod prompt;
pub mod routes;
pub mod segment;
pub mod wake;
