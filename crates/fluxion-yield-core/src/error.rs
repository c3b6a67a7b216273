// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Error types for the aggregation engine

use chrono::NaiveDate;
use thiserror::Error;

/// Failures surfaced by the engine.
///
/// Store failures keep the backend's error chain; a missing day or a missing
/// comparison row is never an error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("sample store error: {0:#}")]
    SampleStore(anyhow::Error),

    #[error("summary store error: {0:#}")]
    SummaryStore(anyhow::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("comparison window reaches before the earliest representable date from {target}")]
    DateOutOfRange { target: NaiveDate },
}

pub type Result<T> = std::result::Result<T, EngineError>;
