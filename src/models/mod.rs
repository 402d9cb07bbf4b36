// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Person, Group, Partition, Degradation};
pub use requests::GroupingParams;
pub use responses::{GroupingReport, GroupReport, MemberReport, Diagnostics};
