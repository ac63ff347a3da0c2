//! Topic classification for incoming questions.
//!
//! Decides whether a question concerns the venue itself, general science,
//! or neither, via case-insensitive substring containment against two
//! fixed keyword lists. Deliberately coarse: no tokenization, no stemming,
//! and a keyword inside an unrelated word still matches. Venue keywords
//! win over science keywords.

/// Question topic, in match-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// About Science City itself: tickets, hours, directions, facilities.
    Venue,
    /// A general science question.
    Science,
    /// Neither; answered with the fixed scope redirect, no LLM call.
    Other,
}

/// Terms that mark a question as being about the venue.
const VENUE_KEYWORDS: &[&str] = &[
    "science city",
    "kolkata",
    "opening",
    "hour",
    "time",
    "ticket",
    "price",
    "cost",
    "fee",
    "attraction",
    "exhibit",
    "show",
    "theater",
    "parking",
    "location",
    "address",
    "how to reach",
    "direction",
    "facility",
    "amenity",
    "restaurant",
    "food",
    "cafe",
    "shop",
    "store",
    "gift",
    "souvenir",
];

/// Terms that mark a question as general science.
const SCIENCE_KEYWORDS: &[&str] = &[
    "science",
    "physics",
    "chemistry",
    "biology",
    "astronomy",
    "space",
    "technology",
    "math",
    "mathematics",
    "engineering",
    "experiment",
    "research",
    "discovery",
    "invention",
    "scientist",
    "theory",
    "evolution",
    "planet",
    "star",
    "galaxy",
    "atom",
    "molecule",
    "cell",
    "dna",
    "genetic",
    "energy",
    "force",
    "motion",
    "electric",
    "magnet",
    "light",
    "sound",
    "heat",
    "temperature",
    "climate",
    "environment",
    "ecology",
    "geology",
    "volcano",
    "earthquake",
    "computer",
    "robot",
    "ai",
    "artificial intelligence",
    "machine",
    "laboratory",
    "microscope",
    "telescope",
    "observatory",
];

/// Classify a question. Pure function of the input text.
pub fn classify(text: &str) -> Topic {
    let lower = text.to_lowercase();

    if VENUE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Topic::Venue;
    }

    if SCIENCE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Topic::Science;
    }

    Topic::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_keywords_classify_as_venue() {
        assert_eq!(classify("How much is a ticket?"), Topic::Venue);
        assert_eq!(classify("Is there parking nearby?"), Topic::Venue);
        assert_eq!(classify("WHAT ARE THE OPENING HOURS"), Topic::Venue);
        assert_eq!(classify("can I buy a souvenir"), Topic::Venue);
    }

    #[test]
    fn venue_wins_over_science() {
        // "ticket" and "physics" both present; venue list is checked first.
        assert_eq!(classify("ticket for the physics show"), Topic::Venue);
    }

    #[test]
    fn science_keywords_classify_as_science() {
        assert_eq!(classify("Explain quantum physics"), Topic::Science);
        assert_eq!(classify("what is DNA made of"), Topic::Science);
        assert_eq!(classify("Tell me about the nearest GALAXY"), Topic::Science);
    }

    #[test]
    fn unrelated_text_is_other() {
        assert_eq!(classify("who won the cricket match"), Topic::Other);
        assert_eq!(classify("hello"), Topic::Other);
    }

    #[test]
    fn substring_matching_is_coarse() {
        // "time" matches inside "sometimes"; the lists are known to
        // over-match and that behavior is kept.
        assert_eq!(classify("sometimes I wonder"), Topic::Venue);
        // "ai" matches inside "rain".
        assert_eq!(classify("will it be sunny or will we see the r@in"), Topic::Other);
        assert_eq!(classify("rain tomorrow"), Topic::Science);
    }

    #[test]
    fn surrounding_text_does_not_matter() {
        assert_eq!(
            classify("my friend asked me yesterday about the entry fee there"),
            Topic::Venue
        );
    }
}
