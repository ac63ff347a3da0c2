//! Conversation state machine for the guided dialogue.
//!
//! A linear sequence of states collects five visit preferences before a
//! single LLM call synthesizes an itinerary. The machine itself never
//! talks to the gateway: [`Session::advance`] returns a [`TurnOutcome`]
//! and the HTTP handler performs the completion when one is requested.
//! That split keeps every transition unit-testable without network.

use crate::classifier::{classify, Topic};
use scicity_common::prompts::{self, VisitPreferences, SCOPE_REDIRECT};
use scicity_common::rpc::ConversationState;
use scicity_common::venue::VenueRecord;

/// Inputs that, from the main menu, enter the planning dialogue.
/// Substring match, case-insensitive, same coarseness as the classifier.
const PLANNING_KEYWORDS: &[&str] = &["plan", "itinerary", "visit", "1", "one"];

const ASK_INTERESTS: &str = "Great, let's plan your visit! What are you most interested in? \
     (e.g. space, technology, nature)";
const ASK_TIME: &str = "How much time do you have for your visit?";
const ASK_START_TIME: &str = "What time would you like to start your visit?";
const ASK_KIDS: &str = "Will you be visiting with children?";
const ASK_MEALS: &str = "Any meal preferences for your visit? (e.g. vegetarian, snacks only)";

/// How the handler should finish the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Static text, no LLM call.
    Reply(String),
    /// Complete `prompt` through the gateway, then apply `framing`.
    Generate { prompt: String, framing: Framing },
}

/// Framing applied to gateway output before it reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Plain answer, returned as-is.
    Answer,
    /// Itinerary plan, wrapped via [`frame_plan`].
    Plan,
}

/// Wrap a generated plan in the fixed framing text.
pub fn frame_plan(plan: &str) -> String {
    format!(
        "Here's your personalized visit plan:\n\n{}\n\nIs there anything else I can help you with?",
        plan
    )
}

/// Per-session conversation state: current position plus the preferences
/// collected so far. Lives in the session store between turns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub state: ConversationState,
    pub preferences: VisitPreferences,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to `Welcome` with cleared preferences.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Force-enter the planning dialogue, bypassing the main menu.
    /// Previously collected fields stay and are overwritten as the
    /// questions are re-answered.
    pub fn start_planning(&mut self) -> String {
        self.state = ConversationState::AskingInterests;
        ASK_INTERESTS.to_string()
    }

    fn welcome_text(venue: &VenueRecord) -> String {
        format!(
            "Welcome to {}! Opening hours: {}.\n\n\
             I can help you with:\n\
             1. Planning your visit\n\
             2. Ticket prices and opening hours\n\
             3. Attractions and facilities\n\
             4. General science questions\n\n\
             What would you like to know?",
            venue.name,
            venue.hours_summary()
        )
    }

    fn wants_planning(input: &str) -> bool {
        let lower = input.to_lowercase();
        PLANNING_KEYWORDS.iter().any(|k| lower.contains(k))
    }

    /// Advance the machine by one turn of non-empty user input.
    ///
    /// Every collection state accepts any text verbatim; there is no
    /// validation, back-navigation, or skip. Empty input must be rejected
    /// by the caller before the machine runs.
    pub fn advance(&mut self, input: &str, venue: &VenueRecord) -> TurnOutcome {
        match self.state {
            ConversationState::Welcome => {
                self.state = ConversationState::MainMenu;
                TurnOutcome::Reply(Self::welcome_text(venue))
            }
            ConversationState::MainMenu => {
                if Self::wants_planning(input) {
                    self.state = ConversationState::AskingInterests;
                    return TurnOutcome::Reply(ASK_INTERESTS.to_string());
                }
                match classify(input) {
                    Topic::Venue => TurnOutcome::Generate {
                        prompt: prompts::venue_prompt(input, venue),
                        framing: Framing::Answer,
                    },
                    Topic::Science => TurnOutcome::Generate {
                        prompt: prompts::science_prompt(input),
                        framing: Framing::Answer,
                    },
                    Topic::Other => TurnOutcome::Reply(SCOPE_REDIRECT.to_string()),
                }
            }
            ConversationState::AskingInterests => {
                self.preferences.interests = Some(input.to_string());
                self.state = ConversationState::AskingTime;
                TurnOutcome::Reply(ASK_TIME.to_string())
            }
            ConversationState::AskingTime => {
                self.preferences.time_available = Some(input.to_string());
                self.state = ConversationState::AskingStartTime;
                TurnOutcome::Reply(ASK_START_TIME.to_string())
            }
            ConversationState::AskingStartTime => {
                self.preferences.start_time = Some(input.to_string());
                self.state = ConversationState::AskingKids;
                TurnOutcome::Reply(ASK_KIDS.to_string())
            }
            ConversationState::AskingKids => {
                self.preferences.with_kids = Some(input.to_string());
                self.state = ConversationState::AskingMeals;
                TurnOutcome::Reply(ASK_MEALS.to_string())
            }
            ConversationState::AskingMeals => {
                self.preferences.meal_preferences = Some(input.to_string());
                self.state = ConversationState::MainMenu;
                TurnOutcome::Generate {
                    prompt: prompts::itinerary_prompt(&self.preferences, venue),
                    framing: Framing::Plan,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue() -> VenueRecord {
        VenueRecord::default()
    }

    #[test]
    fn welcome_emits_menu_with_hours() {
        let mut session = Session::new();
        let outcome = session.advance("hi", &venue());

        assert_eq!(session.state, ConversationState::MainMenu);
        match outcome {
            TurnOutcome::Reply(text) => {
                assert!(text.contains("Welcome to Science City Kolkata"));
                assert!(text.contains("10:00 AM - 7:00 PM"));
                assert!(text.contains("1. Planning your visit"));
            }
            other => panic!("expected static reply, got {:?}", other),
        }
    }

    #[test]
    fn full_planning_walk_populates_all_five_fields() {
        let mut session = Session::new();
        let venue = venue();

        session.advance("hello", &venue);
        assert_eq!(session.state, ConversationState::MainMenu);

        session.advance("plan my visit", &venue);
        assert_eq!(session.state, ConversationState::AskingInterests);

        session.advance("space and biology", &venue);
        assert_eq!(session.state, ConversationState::AskingTime);

        session.advance("2 hours", &venue);
        assert_eq!(session.state, ConversationState::AskingStartTime);

        session.advance("10:00 AM", &venue);
        assert_eq!(session.state, ConversationState::AskingKids);

        session.advance("no", &venue);
        assert_eq!(session.state, ConversationState::AskingMeals);

        let outcome = session.advance("vegetarian", &venue);
        assert_eq!(session.state, ConversationState::MainMenu);

        assert_eq!(session.preferences.interests.as_deref(), Some("space and biology"));
        assert_eq!(session.preferences.time_available.as_deref(), Some("2 hours"));
        assert_eq!(session.preferences.start_time.as_deref(), Some("10:00 AM"));
        assert_eq!(session.preferences.with_kids.as_deref(), Some("no"));
        assert_eq!(session.preferences.meal_preferences.as_deref(), Some("vegetarian"));

        match outcome {
            TurnOutcome::Generate { prompt, framing } => {
                assert_eq!(framing, Framing::Plan);
                assert!(prompt.contains("Interests: space and biology"));
                assert!(prompt.contains("Meal preferences: vegetarian"));
            }
            other => panic!("expected itinerary generation, got {:?}", other),
        }
    }

    #[test]
    fn off_topic_question_gets_redirect_without_generation() {
        let mut session = Session::new();
        let venue = venue();
        session.advance("hi", &venue);

        let outcome = session.advance("who won the cricket match", &venue);
        assert_eq!(outcome, TurnOutcome::Reply(SCOPE_REDIRECT.to_string()));
        assert_eq!(session.state, ConversationState::MainMenu);
    }

    #[test]
    fn venue_question_requests_generation_with_venue_data() {
        let mut session = Session::new();
        let venue = venue();
        session.advance("hi", &venue);

        match session.advance("how much does a ticket cost", &venue) {
            TurnOutcome::Generate { prompt, framing } => {
                assert_eq!(framing, Framing::Answer);
                assert!(prompt.contains("₹70.00"));
                assert!(prompt.contains("QUESTION: how much does a ticket cost"));
            }
            other => panic!("expected generation, got {:?}", other),
        }
    }

    #[test]
    fn science_question_requests_generation_without_venue_data() {
        let mut session = Session::new();
        let venue = venue();
        session.advance("hi", &venue);

        match session.advance("explain gravity and energy", &venue) {
            TurnOutcome::Generate { prompt, .. } => {
                assert!(!prompt.contains("SCIENCE CITY INFORMATION"));
            }
            other => panic!("expected generation, got {:?}", other),
        }
    }

    #[test]
    fn collection_states_store_input_verbatim() {
        let mut session = Session::new();
        let venue = venue();
        session.start_planning();

        session.advance("  EVERYTHING, really!  ", &venue);
        assert_eq!(
            session.preferences.interests.as_deref(),
            Some("  EVERYTHING, really!  ")
        );
    }

    #[test]
    fn reset_clears_state_and_preferences_from_any_point() {
        let mut session = Session::new();
        let venue = venue();
        session.advance("hi", &venue);
        session.advance("plan", &venue);
        session.advance("space", &venue);

        session.reset();
        assert_eq!(session.state, ConversationState::Welcome);
        assert_eq!(session.preferences, VisitPreferences::default());
    }

    #[test]
    fn start_planning_bypasses_main_menu() {
        let mut session = Session::new();
        let first_question = session.start_planning();

        assert_eq!(session.state, ConversationState::AskingInterests);
        assert!(first_question.contains("plan your visit"));
    }

    #[test]
    fn plan_framing_wraps_generated_text() {
        let framed = frame_plan("1. Space Odyssey (45 min)");
        assert!(framed.starts_with("Here's your personalized visit plan:"));
        assert!(framed.contains("1. Space Odyssey (45 min)"));
        assert!(framed.ends_with("Is there anything else I can help you with?"));
    }
}
