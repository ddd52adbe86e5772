pub mod all_earnings;
pub mod detailed_payouts;
pub mod earnings;
pub mod moderator;
pub mod monthly;
pub mod payouts;
