// Static lookup tables: role templates, per-job skill requirements and demand indicators.
// Everything here is compiled in; there is no persistence layer.

pub mod demand;
pub mod job_skills;
pub mod roles;

pub use demand::{industry_demand, IndustryDemand};
pub use job_skills::{job_role_options, required_skills_for};
pub use roles::{find_role, role_definitions};
