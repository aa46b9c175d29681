//! Fallback recommendation sources.

mod file_recommendation_source;
mod in_memory_recommendation_source;

pub use file_recommendation_source::FileRecommendationSource;
pub use in_memory_recommendation_source::InMemoryRecommendationSource;
