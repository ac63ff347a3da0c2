//! Prompt templates for the guide service.
//!
//! Three fixed templates (venue Q&A, general science Q&A, itinerary
//! synthesis) plus the out-of-scope redirect. Templates are plain
//! functions over typed parameters so their contents can be asserted on
//! directly in tests, with no LLM in the loop.

use crate::venue::VenueRecord;
use serde::{Deserialize, Serialize};

/// Fixed reply for questions that are neither about the venue nor about
/// science. This path never reaches the LLM gateway.
pub const SCOPE_REDIRECT: &str = "I'm specialized in Science City Kolkata and general science \
     topics. I'd be happy to help with questions about Science City, its exhibits, or any \
     science-related topics!";

/// Placeholder rendered for preference fields the visitor never filled in.
pub const NOT_SPECIFIED: &str = "Not specified";

/// The five free-text preferences collected by the planning dialogue.
///
/// Fields are optional because `/plan_trip` may restart collection at any
/// point; rendering substitutes [`NOT_SPECIFIED`] for absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitPreferences {
    pub interests: Option<String>,
    pub time_available: Option<String>,
    pub start_time: Option<String>,
    pub with_kids: Option<String>,
    pub meal_preferences: Option<String>,
}

impl VisitPreferences {
    fn field(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn is_complete(&self) -> bool {
        self.interests.is_some()
            && self.time_available.is_some()
            && self.start_time.is_some()
            && self.with_kids.is_some()
            && self.meal_preferences.is_some()
    }
}

/// Prompt for questions about the venue itself: the model must answer only
/// from the supplied record and admit when data is absent.
pub fn venue_prompt(question: &str, venue: &VenueRecord) -> String {
    format!(
        "You are a knowledgeable guide at Science City Kolkata.\n\
         Answer the following question based ONLY on the Science City information provided.\n\
         \n\
         SCIENCE CITY INFORMATION:\n\
         {context}\n\
         \n\
         QUESTION: {question}\n\
         \n\
         Instructions:\n\
         1. Be direct, concise and factual\n\
         2. Provide specific location details if applicable\n\
         3. If information is not available, say \"I don't have that information\"\n\
         4. Keep response under 3 sentences",
        context = venue.context_json(),
        question = question,
    )
}

/// Prompt for general science questions. No venue data is embedded.
pub fn science_prompt(question: &str) -> String {
    format!(
        "You are a helpful science educator. Answer the following science question:\n\
         \n\
         QUESTION: {question}\n\
         \n\
         Instructions:\n\
         1. Provide accurate, educational information\n\
         2. Explain concepts clearly and simply\n\
         3. Keep response concise but informative\n\
         4. If you don't know the answer, say so",
        question = question,
    )
}

/// Prompt synthesizing a personalized visit plan from the collected
/// preferences and the full venue record.
pub fn itinerary_prompt(preferences: &VisitPreferences, venue: &VenueRecord) -> String {
    format!(
        "You are a visit planner at Science City Kolkata.\n\
         Create a personalized itinerary based on the visitor's preferences and the venue \
         information provided.\n\
         \n\
         SCIENCE CITY INFORMATION:\n\
         {context}\n\
         \n\
         VISITOR PREFERENCES:\n\
         - Interests: {interests}\n\
         - Time available: {time_available}\n\
         - Preferred start time: {start_time}\n\
         - Visiting with children: {with_kids}\n\
         - Meal preferences: {meal_preferences}\n\
         \n\
         Instructions:\n\
         1. Suggest an ordered list of attractions to visit\n\
         2. Give an approximate time to spend at each attraction\n\
         3. Suggest where a meal break fits, honoring the meal preferences\n\
         4. Highlight attractions matching the stated interests",
        context = venue.context_json(),
        interests = VisitPreferences::field(&preferences.interests),
        time_available = VisitPreferences::field(&preferences.time_available),
        start_time = VisitPreferences::field(&preferences.start_time),
        with_kids = VisitPreferences::field(&preferences.with_kids),
        meal_preferences = VisitPreferences::field(&preferences.meal_preferences),
    )
}
