/// Unique review identifier from the review source.
/// Example: `Xqd0DzHaiyRqVH3WRG7hzg`
pub type ReviewId = String;
/// Identifier of the user who wrote a review.
/// Example: `CR2y7yEm4X035ZMzrTtN9Q`
pub type UserId = String;
/// Identifier of the reviewed business.
/// Example: `vcNAWiLM4dR7D2nwwJ7nCA`
pub type BusinessId = String;
/// Integer category code assigned to a business by the external encoding step.
pub type CategoryCode = u32;
/// Review age in whole days relative to a split's reference date.
pub type AgeDays = i64;
/// Star rating (1.0 to 5.0 in the source data).
pub type Stars = f64;
