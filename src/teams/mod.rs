pub mod aggregation;
pub mod eligibility;

pub use aggregation::{group, order_by_placement, top_four, Team, TeamMember, TeamSet};
pub use eligibility::{evaluate, Eligibility};
