pub mod fare_recalculation;
pub mod member_transition;
pub mod ride_completion;
