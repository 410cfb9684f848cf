// Copyright 2025 Cowboy AI, LLC.

//! Vocabulary constants
//!
//! IRIs of the external vocabularies the domain model reads or writes.

/// schema.org terms
pub struct Schema;

impl Schema {
    /// schema.org namespace IRI
    pub const NS: &'static str = "http://schema.org/";

    /// schema:PotentialActionStatus - the action is queued but not started
    pub const POTENTIAL_ACTION_STATUS: &'static str = "http://schema.org/PotentialActionStatus";

    /// schema:ActiveActionStatus - the action is in progress
    pub const ACTIVE_ACTION_STATUS: &'static str = "http://schema.org/ActiveActionStatus";

    /// schema:CompletedActionStatus - the action finished successfully
    pub const COMPLETED_ACTION_STATUS: &'static str = "http://schema.org/CompletedActionStatus";

    /// schema:FailedActionStatus - the action finished with an error
    pub const FAILED_ACTION_STATUS: &'static str = "http://schema.org/FailedActionStatus";
}

/// CSV on the Web terms
pub struct Csvw;

impl Csvw {
    /// JSON-LD context of CSVW metadata documents
    pub const CONTEXT: &'static str = "http://www.w3.org/ns/csvw";
}
