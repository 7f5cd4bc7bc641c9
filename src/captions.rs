//! Fixed candidate caption set.
//!
//! Defined once at compile time and immutable for the process lifetime. The
//! order matters: ranking ties are broken by position in this list, so the
//! list (duplicates included) is part of the observable contract.

/// Candidate captions ranked against every uploaded image.
pub const CANDIDATE_CAPTIONS: &[&str] = &[
    "Trees, Travel and Tea!",
    "A refreshing beverage.",
    "A moment of indulgence.",
    "The perfect thirst quencher.",
    "Your daily dose of delight.",
    "Taste the tradition.",
    "Savor the flavor.",
    "Refresh and rejuvenate.",
    "Unwind and enjoy.",
    "The taste of home.",
    "A treat for your senses.",
    "A taste of adventure.",
    "A moment of bliss.",
    "Your travel companion.",
    "Fuel for your journey.",
    "The essence of nature.",
    "The warmth of comfort.",
    "A sip of happiness.",
    "Pure indulgence.",
    "Quench your thirst, ignite your spirit.",
    "Awaken your senses, embrace the moment.",
    "The taste of faraway lands.",
    "A taste of home, wherever you are.",
    "Your daily dose of delight.",
    "Your moment of serenity.",
    "The perfect pick-me-up.",
    "The perfect way to unwind.",
    "Taste the difference.",
    "Experience the difference.",
    "A refreshing escape.",
    "A delightful escape.",
    "The taste of tradition, the spirit of adventure.",
    "The warmth of home, the joy of discovery.",
    "Your passport to flavor.",
    "Your ticket to tranquility.",
    "Sip, savor, and explore.",
    "Indulge, relax, and rejuvenate.",
    "The taste of wanderlust.",
    "The comfort of home.",
    "A journey for your taste buds.",
    "A haven for your senses.",
    "Your refreshing companion.",
    "Your delightful escape.",
    "Taste the world, one sip at a time.",
    "Embrace the moment, one cup at a time.",
    "The essence of exploration.",
    "The comfort of connection.",
    "Quench your thirst for adventure.",
    "Savor the moment of peace.",
    "The taste of discovery.",
    "The warmth of belonging.",
    "Your travel companion, your daily delight.",
    "Your moment of peace, your daily indulgence.",
    "The spirit of exploration, the comfort of home.",
    "The joy of discovery, the warmth of connection.",
    "Sip, savor, and set off on an adventure.",
    "Indulge, relax, and find your peace.",
    "A delightful beverage.",
    "A moment of relaxation.",
    "The perfect way to start your day.",
    "The perfect way to end your day.",
    "A treat for yourself.",
    "Something to savor.",
    "A moment of calm.",
    "A taste of something special.",
    "A refreshing pick-me-up.",
    "A comforting drink.",
    "A taste of adventure.",
    "A moment of peace.",
    "A small indulgence.",
    "A daily ritual.",
    "A way to connect with others.",
    "A way to connect with yourself.",
    "A taste of home.",
    "A taste of something new.",
    "A moment to enjoy.",
    "A moment to remember.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_set_is_nonempty_and_stable() {
        assert_eq!(CANDIDATE_CAPTIONS.len(), 80);
        assert_eq!(CANDIDATE_CAPTIONS[0], "Trees, Travel and Tea!");
        assert_eq!(CANDIDATE_CAPTIONS[79], "A moment to remember.");
    }

    #[test]
    fn captions_are_nonempty_strings() {
        for caption in CANDIDATE_CAPTIONS {
            assert!(!caption.trim().is_empty());
        }
    }

    #[test]
    fn duplicate_captions_are_preserved() {
        // "A taste of adventure." appears twice; ties between them resolve by
        // list position, so the duplicates must survive.
        let count = CANDIDATE_CAPTIONS
            .iter()
            .filter(|c| **c == "A taste of adventure.")
            .count();
        assert_eq!(count, 2);
    }
}
